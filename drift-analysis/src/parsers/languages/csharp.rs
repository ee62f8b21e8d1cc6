//! C# parser: thin `NodeKinds` wrapper around the common walker.
//!
//! Also used as the fallback parser for C and C++ (no dedicated grammar
//! ships in the workspace dependency set) — see `ParserManager::parser_for`.

use std::path::Path;

use drift_core::errors::ParseError;

use super::common::{self, NodeKinds};
use super::super::traits::LanguageParser;
use super::super::types::ParseResult;
use crate::scanner::language_detect::Language;

const KINDS: NodeKinds = NodeKinds {
    function: &["method_declaration", "constructor_declaration", "local_function_statement"],
    class: &["class_declaration", "interface_declaration", "struct_declaration", "record_declaration"],
    call: &["invocation_expression"],
    new_expr: &["object_creation_expression"],
    import: &["using_directive"],
    export_modifier: &[],
    string_literal: &["string_literal", "raw_string_literal", "verbatim_string_literal"],
    async_keyword: &["async"],
};

#[derive(Debug, Default)]
pub struct CSharpParser;

impl CSharpParser {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageParser for CSharpParser {
    fn parse(&self, source: &[u8], path: &Path) -> Result<ParseResult, ParseError> {
        let ts_lang = Language::CSharp.ts_language_for_ext(None);
        let (result, _tree) = common::parse_with_kinds(ts_lang, source, path, Language::CSharp, &KINDS)?;
        Ok(result)
    }
}
