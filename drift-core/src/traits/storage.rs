//! Storage trait module — re-exports all drift storage traits.
//!
//! These traits define the contract between drift business logic and
//! the underlying storage backend. The SQLite implementation lives in
//! `drift-storage`; a future Postgres implementation will live in a
//! cloud crate. All traits are object-safe, `Send + Sync`, and have
//! blanket `Arc<T>` impls.

pub mod drift_files;
pub mod drift_analysis;
pub mod drift_structural;
pub mod drift_enforcement;
pub mod drift_batch;
pub mod workspace;
pub mod workspace_types;

pub use drift_files::IDriftFiles;
pub use drift_analysis::IDriftAnalysis;
pub use drift_structural::IDriftStructural;
pub use drift_enforcement::IDriftEnforcement;
pub use drift_batch::IDriftBatchWriter;
pub use workspace::IWorkspaceStorage;
pub use workspace_types::*;
