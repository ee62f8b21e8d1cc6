//! Java parser: thin `NodeKinds` wrapper around the common walker.
//!
//! Also used as the fallback parser for Swift and Scala (no dedicated
//! grammar ships in the workspace dependency set) — see
//! `ParserManager::parser_for`.

use std::path::Path;

use drift_core::errors::ParseError;

use super::common::{self, NodeKinds};
use super::super::traits::LanguageParser;
use super::super::types::ParseResult;
use crate::scanner::language_detect::Language;

const KINDS: NodeKinds = NodeKinds {
    function: &["method_declaration", "constructor_declaration"],
    class: &["class_declaration", "interface_declaration", "enum_declaration", "record_declaration"],
    call: &["method_invocation"],
    new_expr: &["object_creation_expression"],
    import: &["import_declaration"],
    export_modifier: &[],
    string_literal: &["string_literal"],
    async_keyword: &[],
};

#[derive(Debug, Default)]
pub struct JavaParser;

impl JavaParser {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageParser for JavaParser {
    fn parse(&self, source: &[u8], path: &Path) -> Result<ParseResult, ParseError> {
        let ts_lang = Language::Java.ts_language_for_ext(None);
        let (result, _tree) = common::parse_with_kinds(ts_lang, source, path, Language::Java, &KINDS)?;
        Ok(result)
    }
}
