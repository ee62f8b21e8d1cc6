//! CG.Extractor (spec.md §4.2) — per-language tree-sitter parsing behind a
//! `ParserManager` that caches results by content hash.

pub mod cache;
pub mod languages;
pub mod manager;
pub mod traits;
pub mod types;

pub use manager::ParserManager;
pub use traits::LanguageParser;
pub use types::ParseResult;
