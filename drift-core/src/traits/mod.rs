//! Shared traits used across Drift crates.

pub mod cancellation;
pub mod storage;
pub mod weight_provider;

pub use cancellation::CancellationToken;
pub use storage::{
    IDriftAnalysis, IDriftBatchWriter, IDriftEnforcement, IDriftFiles, IDriftStructural,
    IWorkspaceStorage,
};
pub use weight_provider::{
    AdaptiveWeightTable, MigrationPath, StaticWeightProvider, WeightProvider,
};
