/// Causal graph subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum CausalError {
    #[error("causal cycle detected: {path}")]
    CycleDetected { path: String },

    #[error("edge not found: {source} -> {target}")]
    EdgeNotFound { source: String, target: String },

    #[error("node not found: {id}")]
    NodeNotFound { id: String },

    #[error("invalid strength value: {0} (must be in [0,1])")]
    InvalidStrength(f64),

    #[error("sync conflict: {0}")]
    SyncConflict(String),

    #[error("vector clock error: {0}")]
    VectorClockError(String),

    #[error("trust below threshold: peer {peer} trust {trust}")]
    TrustBelowThreshold { peer: String, trust: f64 },
}
