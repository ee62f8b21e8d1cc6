//! Temporal subsystem configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the temporal reasoning subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemporalConfig {
    // Snapshot settings
    pub snapshot_event_threshold: u64,
    pub snapshot_periodic_interval_hours: u64,
    pub snapshot_retention_full_days: u64,
    pub snapshot_retention_monthly_days: u64,

    // Event compaction
    pub event_compaction_age_days: u64,
    /// Number of most-recent events per memory that must survive compaction
    /// regardless of snapshot coverage.
    pub k_older_events: u64,
}

impl Default for TemporalConfig {
    fn default() -> Self {
        Self {
            snapshot_event_threshold: 50,
            snapshot_periodic_interval_hours: 168, // weekly
            snapshot_retention_full_days: 180,     // 6 months
            snapshot_retention_monthly_days: 730,  // 2 years
            event_compaction_age_days: 180,
            k_older_events: 100,
        }
    }
}
