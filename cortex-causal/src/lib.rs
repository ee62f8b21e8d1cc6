//! # cortex-causal
//!
//! Causal graph engine for the Cortex memory system.
//!
//! Owns the relationship vocabulary (`CausalRelation`), the DAG-enforced
//! in-memory graph (`graph::GraphManager`/`graph::stable_graph::IndexedGraph`),
//! forward/backward/bidirectional traversal (`traversal`), historical graph
//! reconstruction (`graph::temporal_graph`), correction dampening
//! (`dampening`), inter-agent trust (`trust`), and the vector-clock delta
//! sync protocol that keeps independent agents' causal graphs convergent
//! (`vector_clock`, `delta_sync`).
//!
//! This crate never touches a database connection — it is the pure
//! algorithmic core `cortex-storage` persists rows for and `cortex-temporal`
//! wires into the append-only event log.

pub mod dampening;
pub mod delta_sync;
pub mod graph;
pub mod relations;
pub mod traversal;
pub mod trust;
pub mod vector_clock;

pub use delta_sync::{CausalDeliveryManager, DeltaMessage, StampedEvent, SyncResult};
pub use graph::GraphManager;
pub use relations::CausalRelation;
pub use traversal::{TraversalConfig, TraversalEngine, TraversalNode, TraversalResult};
pub use trust::{trust_for, AgentTrust, BOOTSTRAP_TRUST};
pub use vector_clock::VectorClock;
