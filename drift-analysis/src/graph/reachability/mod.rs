//! `CG.Reachability` (spec.md §4.5): forward/inverse BFS over the call
//! graph, available both as an in-memory `petgraph` engine ([`engine`])
//! and, via [`super::store_engine`], backed directly by the store.
//! Invariant B2 requires the two engines' `reachable_access` sets to
//! agree for the same source and direction.

pub mod cache;
pub mod engine;
pub mod field_flow;
pub mod types;

pub use cache::ReachabilityCache;
pub use engine::ReachabilityEngine;
pub use field_flow::{track_field_flow, track_multiple_fields, FieldFlowHop, FieldFlowResult, TrackedField};
pub use types::{ReachabilityResult, TraversalDirection};
