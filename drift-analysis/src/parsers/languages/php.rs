//! PHP parser: thin `NodeKinds` wrapper around the common walker.

use std::path::Path;

use drift_core::errors::ParseError;

use super::common::{self, NodeKinds};
use super::super::traits::LanguageParser;
use super::super::types::ParseResult;
use crate::scanner::language_detect::Language;

const KINDS: NodeKinds = NodeKinds {
    function: &["function_definition", "method_declaration"],
    class: &["class_declaration", "interface_declaration", "trait_declaration"],
    call: &["function_call_expression", "member_call_expression", "scoped_call_expression"],
    new_expr: &["object_creation_expression"],
    import: &["namespace_use_declaration"],
    export_modifier: &[],
    string_literal: &["string", "encapsed_string"],
    async_keyword: &[],
};

#[derive(Debug, Default)]
pub struct PhpParser;

impl PhpParser {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageParser for PhpParser {
    fn parse(&self, source: &[u8], path: &Path) -> Result<ParseResult, ParseError> {
        let ts_lang = Language::Php.ts_language_for_ext(None);
        let (result, _tree) = common::parse_with_kinds(ts_lang, source, path, Language::Php, &KINDS)?;
        Ok(result)
    }
}
