//! Ruby parser: thin `NodeKinds` wrapper around the common walker.

use std::path::Path;

use drift_core::errors::ParseError;

use super::common::{self, NodeKinds};
use super::super::traits::LanguageParser;
use super::super::types::ParseResult;
use crate::scanner::language_detect::Language;

const KINDS: NodeKinds = NodeKinds {
    function: &["method", "singleton_method"],
    class: &["class", "module"],
    call: &["call", "method_call"],
    new_expr: &[],
    import: &[],
    export_modifier: &[],
    string_literal: &["string"],
    async_keyword: &[],
};

#[derive(Debug, Default)]
pub struct RubyParser;

impl RubyParser {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageParser for RubyParser {
    fn parse(&self, source: &[u8], path: &Path) -> Result<ParseResult, ParseError> {
        let ts_lang = Language::Ruby.ts_language_for_ext(None);
        let (result, _tree) = common::parse_with_kinds(ts_lang, source, path, Language::Ruby, &KINDS)?;
        Ok(result)
    }
}
