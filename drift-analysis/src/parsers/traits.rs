//! The common interface every per-language parser implements.

use std::path::Path;

use drift_core::errors::ParseError;

use super::types::ParseResult;

/// A parser for one source language. Implementations wrap a tree-sitter
/// grammar and walk the resulting tree to populate a `ParseResult`.
pub trait LanguageParser: Send + Sync {
    fn parse(&self, source: &[u8], path: &Path) -> Result<ParseResult, ParseError>;
}
