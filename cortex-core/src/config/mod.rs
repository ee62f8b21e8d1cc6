pub mod causal_config;
pub mod defaults;
pub mod storage_config;
pub mod temporal_config;

use serde::{Deserialize, Serialize};

pub use causal_config::CausalConfig;
pub use storage_config::StorageConfig;
pub use temporal_config::TemporalConfig;

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CortexConfig {
    pub storage: StorageConfig,
    pub temporal: TemporalConfig,
    pub causal: CausalConfig,
}

impl CortexConfig {
    /// Load config from a TOML string, falling back to defaults for missing fields.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}
