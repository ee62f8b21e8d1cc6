//! Kotlin parser: thin `NodeKinds` wrapper around the common walker.

use std::path::Path;

use drift_core::errors::ParseError;

use super::common::{self, NodeKinds};
use super::super::traits::LanguageParser;
use super::super::types::ParseResult;
use crate::scanner::language_detect::Language;

const KINDS: NodeKinds = NodeKinds {
    function: &["function_declaration"],
    class: &["class_declaration", "object_declaration"],
    call: &["call_expression"],
    new_expr: &[],
    import: &["import_header"],
    export_modifier: &[],
    string_literal: &["string_literal"],
    async_keyword: &[],
};

#[derive(Debug, Default)]
pub struct KotlinParser;

impl KotlinParser {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageParser for KotlinParser {
    fn parse(&self, source: &[u8], path: &Path) -> Result<ParseResult, ParseError> {
        let ts_lang = Language::Kotlin.ts_language_for_ext(None);
        let (result, _tree) = common::parse_with_kinds(ts_lang, source, path, Language::Kotlin, &KINDS)?;
        Ok(result)
    }
}
