//! Go parser: thin `NodeKinds` wrapper around the common walker.

use std::path::Path;

use drift_core::errors::ParseError;

use super::common::{self, NodeKinds};
use super::super::traits::LanguageParser;
use super::super::types::ParseResult;
use crate::scanner::language_detect::Language;

const KINDS: NodeKinds = NodeKinds {
    function: &["function_declaration", "method_declaration", "func_literal"],
    class: &["type_declaration"],
    call: &["call_expression"],
    new_expr: &[],
    import: &["import_spec"],
    export_modifier: &[],
    string_literal: &["interpreted_string_literal", "raw_string_literal"],
    async_keyword: &[],
};

#[derive(Debug, Default)]
pub struct GoParser;

impl GoParser {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageParser for GoParser {
    fn parse(&self, source: &[u8], path: &Path) -> Result<ParseResult, ParseError> {
        let ts_lang = Language::Go.ts_language_for_ext(None);
        let (result, _tree) = common::parse_with_kinds(ts_lang, source, path, Language::Go, &KINDS)?;
        Ok(result)
    }
}
