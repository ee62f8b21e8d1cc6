mod causal_engine;
mod temporal_engine;

pub use causal_engine::{CausalEdge, CausalEvidence};
pub use temporal_engine::{
    ITemporalEngine, TemporalTraversalNode, TemporalTraversalResult,
};
