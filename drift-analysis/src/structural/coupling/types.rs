//! Shared types for `CG.Coupling`: the import dependency graph, a
//! detected cycle, and one suggested edge to break it (spec.md §4.6).

use drift_core::types::collections::FxHashMap;

/// Module-level import dependency graph: `edges[a]` is the set of modules
/// `a` imports from. Built once per scan from `BoundaryRow`/import
/// extraction, then handed to [`super::metrics::compute_coupling_metrics`]
/// and [`super::cycle_detection::detect_cycles`]. `abstract_counts`/
/// `total_type_counts` feed abstractness (`A = abstract / total`).
#[derive(Debug, Clone, Default)]
pub struct ImportGraph {
    pub modules: Vec<String>,
    pub edges: FxHashMap<String, Vec<String>>,
    pub abstract_counts: FxHashMap<String, u32>,
    pub total_type_counts: FxHashMap<String, u32>,
}

impl ImportGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_module(&mut self, module: &str) {
        if !self.modules.iter().any(|m| m == module) {
            self.modules.push(module.to_string());
        }
        self.edges.entry(module.to_string()).or_default();
    }

    /// Record that `from` imports from `to`.
    pub fn add_import(&mut self, from: &str, to: &str) {
        self.add_module(from);
        self.add_module(to);
        self.edges.entry(from.to_string()).or_default().push(to.to_string());
    }

    /// Efferent coupling: how many distinct modules `module` imports from.
    pub fn efferent(&self, module: &str) -> u32 {
        self.edges
            .get(module)
            .map(|targets| {
                let mut unique = targets.clone();
                unique.sort();
                unique.dedup();
                unique.len() as u32
            })
            .unwrap_or(0)
    }

    /// Afferent coupling: how many distinct modules import from `module`.
    pub fn afferent(&self, module: &str) -> u32 {
        let mut importers: Vec<&str> = self
            .edges
            .iter()
            .filter(|(from, targets)| from.as_str() != module && targets.iter().any(|t| t == module))
            .map(|(from, _)| from.as_str())
            .collect();
        importers.sort_unstable();
        importers.dedup();
        importers.len() as u32
    }

    /// Abstractness: ratio of abstract (interface/trait/abstract-class)
    /// exports to total exported types. Zero when the module has no
    /// types (e.g. pure-function utility modules).
    pub fn abstractness(&self, module: &str) -> f64 {
        let total = *self.total_type_counts.get(module).unwrap_or(&0);
        if total == 0 {
            return 0.0;
        }
        let abstract_count = *self.abstract_counts.get(module).unwrap_or(&0);
        abstract_count as f64 / total as f64
    }
}

/// Coupling metrics for one module, the in-memory counterpart of
/// `drift_core::traits::storage::drift_structural::CouplingMetricsRow`.
#[derive(Debug, Clone, PartialEq)]
pub struct CouplingMetrics {
    pub module: String,
    pub ce: u32,
    pub ca: u32,
    pub instability: f64,
    pub abstractness: f64,
    pub distance: f64,
    pub zone: ZoneClassification,
}

/// Robert Martin's stability/abstractness zones (spec.md §4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneClassification {
    MainSequence,
    ZoneOfPain,
    ZoneOfUselessness,
}

impl ZoneClassification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MainSequence => "main_sequence",
            Self::ZoneOfPain => "zone_of_pain",
            Self::ZoneOfUselessness => "zone_of_uselessness",
        }
    }
}

impl std::fmt::Display for ZoneClassification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of distance-from-main-sequence change between two scans of
/// the same module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Improving,
    Degrading,
    Stable,
}

/// Before/after comparison for one module across two coupling computations.
#[derive(Debug, Clone, PartialEq)]
pub struct CouplingTrend {
    pub module: String,
    pub previous: CouplingMetrics,
    pub current: CouplingMetrics,
    pub direction: TrendDirection,
}

/// One dependency cycle (a non-trivial Tarjan SCC).
#[derive(Debug, Clone, PartialEq)]
pub struct CycleInfo {
    pub members: Vec<String>,
    pub break_suggestions: Vec<CycleBreakSuggestion>,
}

impl CycleInfo {
    /// Severity bucketed by member count: `>5` critical, `>3` high,
    /// `>2` medium, else low.
    pub fn severity(&self) -> &'static str {
        match self.members.len() {
            n if n > 5 => "critical",
            n if n > 3 => "high",
            n if n > 2 => "medium",
            _ => "low",
        }
    }
}

/// A candidate edge to remove to break a cycle, scored by the inverse of
/// the target's in-degree within the SCC (removing an edge into a node
/// with other dependents is lower-impact).
#[derive(Debug, Clone, PartialEq)]
pub struct CycleBreakSuggestion {
    pub from: String,
    pub to: String,
    pub impact_score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn efferent_and_afferent_counts() {
        let mut graph = ImportGraph::new();
        graph.add_import("a", "b");
        graph.add_import("a", "c");
        graph.add_import("d", "b");

        assert_eq!(graph.efferent("a"), 2);
        assert_eq!(graph.afferent("b"), 2);
        assert_eq!(graph.afferent("c"), 1);
        assert_eq!(graph.efferent("b"), 0);
    }

    #[test]
    fn abstractness_ratio_from_type_counts() {
        let mut graph = ImportGraph::new();
        graph.add_module("types");
        graph.abstract_counts.insert("types".into(), 3);
        graph.total_type_counts.insert("types".into(), 4);

        assert!((graph.abstractness("types") - 0.75).abs() < 1e-9);
        assert_eq!(graph.abstractness("unknown"), 0.0);
    }

    #[test]
    fn severity_buckets_by_member_count() {
        let small = CycleInfo { members: vec!["a".into(), "b".into()], break_suggestions: vec![] };
        let medium = CycleInfo { members: vec!["a".into(), "b".into(), "c".into()], break_suggestions: vec![] };
        let large = CycleInfo {
            members: (0..6).map(|i| i.to_string()).collect(),
            break_suggestions: vec![],
        };

        assert_eq!(small.severity(), "low");
        assert_eq!(medium.severity(), "medium");
        assert_eq!(large.severity(), "critical");
    }
}
