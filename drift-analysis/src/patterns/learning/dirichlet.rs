//! Dirichlet-multinomial model over a category's competing pattern
//! variants — used to decide whether a category has a settled leader or
//! is still contested between near-tied alternatives.

/// Posterior over `labels`' shares within a category, with a uniform
/// `Dirichlet(1, 1, ..., 1)` prior updated by observed location counts.
pub struct DirichletMultinomial {
    labels: Vec<String>,
    alpha: Vec<f64>,
}

impl DirichletMultinomial {
    pub fn new(labels: Vec<String>) -> Self {
        let alpha = vec![1.0; labels.len()];
        Self { labels, alpha }
    }

    /// Add `n` observations to label index `i`.
    pub fn observe_n(&mut self, i: usize, n: u64) {
        if let Some(a) = self.alpha.get_mut(i) {
            *a += n as f64;
        }
    }

    /// Posterior mean share for each label, in the original label order.
    pub fn posterior_means(&self) -> Vec<(String, f64)> {
        let sum: f64 = self.alpha.iter().sum();
        self.labels
            .iter()
            .zip(self.alpha.iter())
            .map(|(label, a)| (label.clone(), if sum > 0.0 { a / sum } else { 0.0 }))
            .collect()
    }

    /// A category is contested when its top two posterior shares sit
    /// within `threshold` of each other — no variant has pulled clearly
    /// ahead of its closest competitor.
    pub fn is_contested(&self, threshold: f64) -> bool {
        if self.labels.len() < 2 {
            return false;
        }
        let mut shares: Vec<f64> = self.posterior_means().into_iter().map(|(_, s)| s).collect();
        shares.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
        (shares[0] - shares[1]) < threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dominant_label_is_not_contested() {
        let mut dist = DirichletMultinomial::new(vec!["a".to_string(), "b".to_string()]);
        dist.observe_n(0, 900);
        dist.observe_n(1, 10);
        assert!(!dist.is_contested(0.5));
    }

    #[test]
    fn near_tied_labels_are_contested() {
        let mut dist = DirichletMultinomial::new(vec!["a".to_string(), "b".to_string()]);
        dist.observe_n(0, 45);
        dist.observe_n(1, 55);
        assert!(dist.is_contested(0.5));
    }

    #[test]
    fn single_label_is_never_contested() {
        let dist = DirichletMultinomial::new(vec!["a".to_string()]);
        assert!(!dist.is_contested(0.9));
    }
}
