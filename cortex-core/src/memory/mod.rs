//! The temporal-memory domain model: `BaseMemory` and its typed payloads.

pub mod types;

pub use types::{
    BaseMemory, Confidence, ConstraintContent, ConstraintLink, CoreContent, DecisionContent,
    DecisionContextContent, EpisodicContent, FileLink, FunctionLink, Importance, MemoryType,
    ObservationContent, PatternLink, PatternRationaleContent, PreferenceContent, ProceduralContent,
    ReferenceContent, SemanticContent, TypedContent,
};
