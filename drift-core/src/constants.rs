//! Tunable thresholds shared across the analysis and temporal-memory pipelines.
//! Centralized so a calibration change doesn't require hunting through every
//! module that reads a confidence value.

/// Minimum Jaro-Winkler similarity for the fuzzy/dynamic-dispatch resolution
/// strategy to accept a name match.
pub const FUZZY_RESOLUTION_THRESHOLD: f64 = 0.9;

/// Confidence floor for a pattern to become eligible for auto-approval.
pub const PATTERN_AUTO_APPROVE_CONFIDENCE: f64 = 0.90;

/// Maximum outlier ratio tolerated for auto-approval.
pub const PATTERN_AUTO_APPROVE_MAX_OUTLIER_RATIO: f64 = 0.50;

/// Minimum distinct locations required before a pattern can auto-approve.
pub const PATTERN_AUTO_APPROVE_MIN_LOCATIONS: usize = 3;

/// Minimum sample size before outlier detection (MAD) runs at all.
pub const OUTLIER_DETECTION_MIN_SAMPLES: usize = 3;

/// Absolute confidence delta beyond which a diff reports a "confidence shift".
pub const CONFIDENCE_SHIFT_THRESHOLD: f64 = 0.2;

/// Correction dampening base multiplier, applied per propagation hop.
pub const CORRECTION_DAMPENING_BASE: f64 = 0.7;

/// Correction strength below which propagation stops.
pub const CORRECTION_DAMPENING_CUTOFF: f64 = 0.05;

/// Prior trust assigned to an agent with no recorded interaction history.
pub const TRUST_BOOTSTRAP_SCORE: f64 = 0.5;

/// Bounded channel capacity for the single-writer batch actor.
pub const WRITER_CHANNEL_BOUND: usize = 1024;

/// Rows per transaction before the batch writer flushes.
pub const WRITER_BATCH_SIZE: usize = 500;

/// Maximum time a partial batch waits before an idle flush.
pub const WRITER_FLUSH_TIMEOUT_MS: u64 = 100;
