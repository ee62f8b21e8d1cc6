mod causal_error;
mod cortex_error;
mod storage_error;
mod temporal_error;

pub use causal_error::CausalError;
pub use cortex_error::{CortexError, CortexResult};
pub use storage_error::StorageError;
pub use temporal_error::TemporalError;
