mod audit_entry;
mod compressed_memory;
mod decision_replay;
mod provenance;
mod temporal_diff;
mod temporal_event;
mod temporal_query;

pub use audit_entry::{AuditActor, AuditEntry, AuditOperation};
pub use compressed_memory::CompressedMemory;
pub use decision_replay::{CausalEdgeSnapshot, CausalGraphSnapshot, DecisionReplay, HindsightItem};
pub use provenance::ProvenanceHop;
pub use temporal_diff::{
    ConfidenceShift, DiffStats, MemoryModification, Reclassification, TemporalDiff,
};
pub use temporal_event::{EventActor, MemoryEvent, MemoryEventType, MemorySnapshot, SnapshotReason};
pub use temporal_query::{
    AsOfQuery, DecisionReplayQuery, DiffScope, MemoryFilter, TemporalCausalQuery, TemporalDiffQuery,
    TemporalRangeMode, TemporalRangeQuery, TraversalDirection,
};
