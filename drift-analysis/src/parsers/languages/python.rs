//! Python parser: thin `NodeKinds` wrapper plus a decorator post-pass
//! (the common walker doesn't special-case Python's `decorated_definition`
//! wrapper, so decorators are pulled out and attached after the fact).

use std::path::Path;

use drift_core::errors::ParseError;

use super::common::{self, NodeKinds};
use super::super::traits::LanguageParser;
use super::super::types::{DecoratorInfo, ParseResult};
use crate::scanner::language_detect::Language;

const KINDS: NodeKinds = NodeKinds {
    function: &["function_definition"],
    class: &["class_definition"],
    call: &["call"],
    new_expr: &[],
    import: &["import_statement", "import_from_statement"],
    export_modifier: &[],
    string_literal: &["string"],
    async_keyword: &["async"],
};

#[derive(Debug, Default)]
pub struct PythonParser;

impl PythonParser {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageParser for PythonParser {
    fn parse(&self, source: &[u8], path: &Path) -> Result<ParseResult, ParseError> {
        let ts_lang = Language::Python.ts_language_for_ext(None);
        let (mut result, tree) =
            common::parse_with_kinds(ts_lang, source, path, Language::Python, &KINDS)?;
        attach_decorators(&mut result, &tree, source);
        Ok(result)
    }
}

/// Walk `decorated_definition` nodes and attach their `decorator` children
/// to the `FunctionInfo`/`ClassInfo` the common walker already produced for
/// the wrapped `function_definition`/`class_definition` by matching on line.
fn attach_decorators(result: &mut ParseResult, tree: &tree_sitter::Tree, source: &[u8]) {
    collect_decorated(tree.root_node(), source, result);
}

fn collect_decorated(node: tree_sitter::Node, source: &[u8], result: &mut ParseResult) {
    if node.kind() == "decorated_definition" {
        let mut decorators = Vec::new();
        let mut body_line = None;
        let mut c = node.walk();
        for child in node.children(&mut c) {
            if child.kind() == "decorator" {
                let text = child.utf8_text(source).unwrap_or("").trim_start_matches('@').trim();
                let name = text.split(['(', '.']).next().unwrap_or(text).to_string();
                decorators.push(DecoratorInfo {
                    name,
                    arguments: Vec::new(),
                });
            } else if child.kind() == "function_definition" || child.kind() == "class_definition" {
                body_line = Some(child.start_position().row as u32 + 1);
            }
        }
        if let Some(line) = body_line {
            if let Some(func) = result.functions.iter_mut().find(|f| f.line == line) {
                func.decorators = decorators.clone();
            }
            if let Some(class) = result.classes.iter_mut().find(|c| c.range.start.line == line) {
                class.decorators = decorators;
            }
        }
    }

    let mut c = node.walk();
    for child in node.children(&mut c) {
        collect_decorated(child, source, result);
    }
}

