//! Core call-graph types: the petgraph-backed `CallGraph`, its node/edge
//! payloads, and the 6-strategy `Resolution` enum (spec.md §4.4).

use std::time::Duration;

use drift_core::types::collections::FxHashMap;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};

use super::resolution::ResolutionDiagnostics;

/// A function or method, one node per call graph.
#[derive(Debug, Clone)]
pub struct FunctionNode {
    pub file: String,
    pub name: String,
    pub qualified_name: Option<String>,
    pub language: String,
    pub line: u32,
    pub end_line: u32,
    pub is_entry_point: bool,
    pub is_exported: bool,
    pub signature_hash: u64,
    pub body_hash: u64,
}

/// How a call site was resolved to a callee, in descending confidence order
/// (spec.md §4.4 CG.Resolver strategies).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// Same-file direct call. Confidence 1.0.
    SameFile,
    /// Method call resolved via class/qualified-name index. Confidence 0.9.
    Method,
    /// Dependency-injection constructor/parameter resolution. Confidence 0.85.
    DiInjection,
    /// Resolved via an explicit import. Confidence 0.8.
    Import,
    /// Resolved via a cross-file export with no direct import link. Confidence 0.7.
    Export,
    /// Best-effort unique-name match with no structural evidence. Confidence ≤0.5.
    Fuzzy,
}

impl Resolution {
    pub fn default_confidence(&self) -> f32 {
        match self {
            Self::SameFile => 1.0,
            Self::Method => 0.9,
            Self::DiInjection => 0.85,
            Self::Import => 0.8,
            Self::Export => 0.7,
            Self::Fuzzy => 0.5,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::SameFile => "same_file",
            Self::Method => "method",
            Self::DiInjection => "di_injection",
            Self::Import => "import",
            Self::Export => "export",
            Self::Fuzzy => "fuzzy",
        }
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An edge between two `FunctionNode`s, recording how it was resolved.
#[derive(Debug, Clone)]
pub struct CallEdge {
    pub resolution: Resolution,
    pub confidence: f32,
    pub call_site_line: u32,
}

/// The call graph itself: a `StableDiGraph` plus a key → node index lookup
/// so callers can address nodes by `"{file}::{name}"` instead of carrying
/// `NodeIndex` values around.
#[derive(Debug, Default)]
pub struct CallGraph {
    pub graph: StableDiGraph<FunctionNode, CallEdge>,
    index: FxHashMap<String, NodeIndex>,
}

impl CallGraph {
    pub fn new() -> Self {
        Self {
            graph: StableDiGraph::new(),
            index: FxHashMap::default(),
        }
    }

    /// Add a function node, keyed by `"{file}::{name}"`.
    pub fn add_function(&mut self, node: FunctionNode) -> NodeIndex {
        let key = format!("{}::{}", node.file, node.name);
        let idx = self.graph.add_node(node);
        self.index.insert(key, idx);
        idx
    }

    pub fn get_node(&self, key: &str) -> Option<NodeIndex> {
        self.index.get(key).copied()
    }

    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex, edge: CallEdge) {
        self.graph.add_edge(from, to, edge);
    }

    pub fn function_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn node_key(&self, idx: NodeIndex) -> Option<String> {
        self.graph
            .node_weight(idx)
            .map(|n| format!("{}::{}", n.file, n.name))
    }
}

/// Summary statistics produced by a `CallGraphBuilder::build` pass.
#[derive(Debug)]
pub struct CallGraphStats {
    pub total_functions: usize,
    pub total_edges: usize,
    pub entry_points: usize,
    pub resolution_counts: FxHashMap<String, usize>,
    pub resolution_rate: f64,
    pub build_duration: Duration,
    pub cycles_detected: usize,
    pub diagnostics: ResolutionDiagnostics,
}
