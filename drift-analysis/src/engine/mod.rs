//! CG.Extractor (spec.md §4.2): the 4-phase per-file analysis pipeline
//! (AST visitor → string extraction → regex matching → cross-file
//! resolution index), plus the generalized-AST layer and incremental
//! re-analysis on top of it.

pub mod gast;
pub mod incremental;
pub mod pipeline;
pub mod regex_engine;
pub mod resolution;
pub mod string_extraction;
pub mod types;
pub mod visitor;

pub use incremental::IncrementalAnalyzer;
pub use pipeline::AnalysisPipeline;
pub use regex_engine::{RegexEngine, RegexPattern};
pub use resolution::{ResolutionEntry, ResolutionIndex, ResolutionStrategy, SymbolKind};
pub use string_extraction::{extract_strings, ExtractedString, StringExtractionContext, StringKind};
pub use types::{AnalysisPhase, AnalysisResult, DetectionMethod, PatternCategory, PatternMatch};
pub use visitor::{DetectionContext, DetectionEngine, DetectorHandler, VisitorRegistry};
