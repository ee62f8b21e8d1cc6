//! TypeScript/TSX parser: thin `NodeKinds` wrapper around the common walker.

use std::path::Path;

use drift_core::errors::ParseError;

use super::common::{self, NodeKinds};
use super::super::traits::LanguageParser;
use super::super::types::ParseResult;
use crate::scanner::language_detect::Language;

const KINDS: NodeKinds = NodeKinds {
    function: &[
        "function_declaration",
        "function_expression",
        "arrow_function",
        "method_definition",
        "function_signature",
    ],
    class: &["class_declaration", "abstract_class_declaration"],
    call: &["call_expression"],
    new_expr: &["new_expression"],
    import: &["import_statement"],
    export_modifier: &["export_statement"],
    string_literal: &["string", "template_string"],
    async_keyword: &["async"],
};

#[derive(Debug, Default)]
pub struct TypeScriptParser;

impl TypeScriptParser {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageParser for TypeScriptParser {
    fn parse(&self, source: &[u8], path: &Path) -> Result<ParseResult, ParseError> {
        let ext = path.extension().and_then(|e| e.to_str());
        let ts_lang = Language::TypeScript.ts_language_for_ext(ext);
        let (result, _tree) = common::parse_with_kinds(ts_lang, source, path, Language::TypeScript, &KINDS)?;
        Ok(result)
    }
}
