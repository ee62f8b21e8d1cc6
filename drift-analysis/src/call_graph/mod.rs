//! CG.StreamingBuild + CG.Resolver (spec.md §4.3–§4.4): builds the call
//! graph from parsed functions/call sites and resolves edges through a
//! confidence-ordered strategy chain, with DI-framework support and entry
//! point detection.

pub mod builder;
pub mod di_support;
pub mod resolution;
pub mod traversal;
pub mod types;

pub use builder::CallGraphBuilder;
pub use types::{CallEdge, CallGraph, CallGraphStats, FunctionNode, Resolution};
