//! The causal relationship vocabulary shared by every edge in the graph.

use serde::{Deserialize, Serialize};

/// How one memory relates causally to another.
///
/// Stored as the lowercase-snake string in `as_str()` everywhere the
/// relation crosses a serialization boundary (the `causal_edges.relation`
/// column, `CausalEdgeSnapshot.relation_type`, event deltas).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CausalRelation {
    /// `source` directly brought about `target`.
    Causes,
    /// `source` made `target` possible without directly causing it.
    Enables,
    /// `source` and `target` cannot both be true.
    Contradicts,
    /// `source` is evidence for `target`.
    Supports,
    /// `source` must hold before `target` can apply.
    PrerequisiteFor,
    /// `source` and `target` tend to co-occur with no established direction.
    CorrelatesWith,
}

impl CausalRelation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Causes => "caused",
            Self::Enables => "enables",
            Self::Contradicts => "contradicts",
            Self::Supports => "supports",
            Self::PrerequisiteFor => "prerequisite_for",
            Self::CorrelatesWith => "correlates_with",
        }
    }

    /// Parse the storage/wire string form. Unknown strings are the caller's
    /// problem to handle (callers in this crate fall back to `Supports` —
    /// the weakest, most reversible relation — when reconstructing graphs
    /// from event deltas that may predate a relation rename).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s {
            "caused" | "causes" => Some(Self::Causes),
            "enables" => Some(Self::Enables),
            "contradicts" => Some(Self::Contradicts),
            "supports" => Some(Self::Supports),
            "prerequisite_for" => Some(Self::PrerequisiteFor),
            "correlates_with" => Some(Self::CorrelatesWith),
            _ => None,
        }
    }

    /// Whether this relation asserts a direction that participates in the
    /// DAG-acyclicity invariant. `CorrelatesWith` is symmetric and is
    /// exempted from cycle enforcement at the call site that adds edges.
    pub fn is_directed(&self) -> bool {
        !matches!(self, Self::CorrelatesWith)
    }
}

impl std::fmt::Display for CausalRelation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_str() {
        for r in [
            CausalRelation::Causes,
            CausalRelation::Enables,
            CausalRelation::Contradicts,
            CausalRelation::Supports,
            CausalRelation::PrerequisiteFor,
            CausalRelation::CorrelatesWith,
        ] {
            assert_eq!(CausalRelation::from_str_name(r.as_str()), Some(r));
        }
    }

    #[test]
    fn unknown_string_is_none() {
        assert_eq!(CausalRelation::from_str_name("nonsense"), None);
    }
}
