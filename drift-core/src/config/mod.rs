//! Configuration for the Drift engine, loaded from TOML with
//! `#[serde(default)]` on every field so a partial config file is valid.

pub mod scan_config;

use serde::{Deserialize, Serialize};

pub use scan_config::ScanConfig;

/// Resolver tuning knobs (spec.md §4.4).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Minimum Jaro-Winkler similarity for the fuzzy resolution strategy.
    pub fuzzy_similarity_threshold: f64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            fuzzy_similarity_threshold: 0.9,
        }
    }
}

/// Pattern/feedback tuning knobs (spec.md §4.8).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    /// Posterior mean at or above which a pattern is auto-approved.
    pub auto_approve_confidence: f64,
    /// Outlier ratio at or below which a pattern is eligible for auto-approval.
    pub auto_approve_max_outlier_ratio: f64,
    /// Minimum distinct locations for auto-approval.
    pub auto_approve_min_locations: u32,
    /// Posterior mean below which a pattern is flagged likely-false-positive.
    pub likely_fp_confidence: f64,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            auto_approve_confidence: 0.90,
            auto_approve_max_outlier_ratio: 0.50,
            auto_approve_min_locations: 3,
            likely_fp_confidence: 0.30,
        }
    }
}

/// Streaming build tuning knobs (spec.md §4.3).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Rows accumulated by the writer actor before a transaction commits.
    pub batch_size: usize,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self { batch_size: 100 }
    }
}

/// `scan_history` retention tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetentionConfig {
    /// Most recent scan records kept; older ones are pruned after each scan.
    pub max_scan_history_entries: usize,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self { max_scan_history_entries: 200 }
    }
}

/// Top-level configuration for the Drift engine. Every section has its
/// own defaults so an empty TOML file (or no file at all) is valid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftConfig {
    pub scan: ScanConfig,
    pub resolver: ResolverConfig,
    pub pattern: PatternConfig,
    pub build: BuildConfig,
    pub retention: RetentionConfig,
}

impl DriftConfig {
    /// Parse a `DriftConfig` from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}
