//! Beta-Bernoulli confidence scoring types (spec.md §4.7 `PATTERN.confidence`
//! — posterior mean of a `Beta(alpha, beta)` updated by feedback).

/// Whether a pattern's confidence is trending up, down, or holding steady
/// across recent scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MomentumDirection {
    Rising,
    Stable,
    Falling,
}

/// Maturity bucket derived from the posterior mean and the width of its
/// credible interval — used by convention discovery to tell a young,
/// noisy pattern from a long-observed, settled one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceTier {
    Emerging,
    Developing,
    Established,
}

impl ConfidenceTier {
    fn from_alpha_beta(alpha: f64, beta: f64) -> Self {
        let n = alpha + beta;
        if n >= 100.0 {
            Self::Established
        } else if n >= 20.0 {
            Self::Developing
        } else {
            Self::Emerging
        }
    }
}

/// A pattern's Beta-Bernoulli confidence: posterior mean plus the
/// parameters and derived metadata that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceScore {
    pub alpha: f64,
    pub beta: f64,
    /// Posterior mean `alpha / (alpha + beta)`.
    pub value: f64,
    pub tier: ConfidenceTier,
    pub momentum: MomentumDirection,
}

impl ConfidenceScore {
    /// Build directly from Beta parameters and an already-known momentum.
    pub fn from_params(alpha: f64, beta: f64, momentum: MomentumDirection) -> Self {
        let value = if alpha + beta > 0.0 {
            alpha / (alpha + beta)
        } else {
            0.5
        };
        Self {
            alpha,
            beta,
            value,
            tier: ConfidenceTier::from_alpha_beta(alpha, beta),
            momentum,
        }
    }

    /// `Beta(1, 1)` — the uninformative prior, mean 0.5.
    pub fn uniform_prior() -> Self {
        Self::from_params(1.0, 1.0, MomentumDirection::Stable)
    }

    /// Width of the approximate 95% credible interval
    /// (`3.92 * sqrt(variance)`), used to judge convergence.
    pub fn credible_interval_width(&self) -> f64 {
        let n = self.alpha + self.beta;
        if n <= 0.0 {
            return 1.0;
        }
        let variance = (self.alpha * self.beta) / (n * n * (n + 1.0));
        3.92 * variance.sqrt()
    }

    /// Apply a `fix` observation: `alpha += 1`.
    pub fn apply_fix(&self) -> Self {
        Self::from_params(self.alpha + 1.0, self.beta, self.momentum)
    }

    /// Apply a `dismiss` observation: `beta += 1`.
    pub fn apply_dismiss(&self) -> Self {
        Self::from_params(self.alpha, self.beta + 1.0, self.momentum)
    }

    /// Apply a `suppress` observation: `beta += 0.5`.
    pub fn apply_suppress(&self) -> Self {
        Self::from_params(self.alpha, self.beta + 0.5, self.momentum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_prior_is_half() {
        assert!((ConfidenceScore::uniform_prior().value - 0.5).abs() < 1e-9);
    }

    #[test]
    fn feedback_bayesian_update_matches_spec_scenario() {
        // spec.md §8 scenario 7: alpha=1,beta=1 -> two fix, one dismiss -> alpha=3,beta=2, confidence=0.6
        let score = ConfidenceScore::uniform_prior()
            .apply_fix()
            .apply_fix()
            .apply_dismiss();
        assert!((score.alpha - 3.0).abs() < 1e-9);
        assert!((score.beta - 2.0).abs() < 1e-9);
        assert!((score.value - 0.6).abs() < 1e-9);
    }

    #[test]
    fn established_tier_requires_enough_observations() {
        assert_eq!(ConfidenceScore::from_params(1.0, 1.0, MomentumDirection::Stable).tier, ConfidenceTier::Emerging);
        assert_eq!(ConfidenceScore::from_params(200.0, 10.0, MomentumDirection::Stable).tier, ConfidenceTier::Established);
    }
}
