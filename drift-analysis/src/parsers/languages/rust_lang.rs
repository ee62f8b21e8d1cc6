//! Rust parser: thin `NodeKinds` wrapper around the common walker.
//!
//! Named `rust_lang` (not `rust`) to avoid shadowing the `Language::Rust`
//! variant and the `rust` crate-name convention.

use std::path::Path;

use drift_core::errors::ParseError;

use super::common::{self, NodeKinds};
use super::super::traits::LanguageParser;
use super::super::types::ParseResult;
use crate::scanner::language_detect::Language;

const KINDS: NodeKinds = NodeKinds {
    function: &["function_item"],
    class: &["struct_item", "enum_item", "trait_item", "impl_item"],
    call: &["call_expression"],
    new_expr: &[],
    import: &["use_declaration"],
    export_modifier: &["visibility_modifier"],
    string_literal: &["string_literal", "raw_string_literal"],
    async_keyword: &["async"],
};

#[derive(Debug, Default)]
pub struct RustParser;

impl RustParser {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageParser for RustParser {
    fn parse(&self, source: &[u8], path: &Path) -> Result<ParseResult, ParseError> {
        let ts_lang = Language::Rust.ts_language_for_ext(None);
        let (result, _tree) = common::parse_with_kinds(ts_lang, source, path, Language::Rust, &KINDS)?;
        Ok(result)
    }
}
