//! Shared default constants used across config structs and call sites
//! that construct memories/events without going through `CortexConfig`.

/// Default confidence assigned to a newly created memory with no explicit evidence.
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Minimum confidence delta treated as a real change (vs. floating point noise)
/// when emitting `ConfidenceChanged` events.
pub const CONFIDENCE_CHANGE_EPSILON: f64 = f64::EPSILON;

/// Default token budget for a decision replay when the caller doesn't override it.
pub const DEFAULT_REPLAY_TOKEN_BUDGET: usize = 4000;

/// Relevance threshold above which a memory counts as "hindsight" context
/// for a replayed decision.
pub const HINDSIGHT_RELEVANCE_THRESHOLD: f64 = 0.7;
