//! A tree-sitter-grammar-agnostic walker shared by every per-language
//! parser. Each language supplies a `NodeKinds` table naming the grammar's
//! node kinds for functions, classes, calls, imports, and string literals;
//! this module does the walking, name extraction via tree-sitter's `name`
//! field convention, and `ParseResult` assembly.
//!
//! This trades per-language precision (a bespoke walker could use each
//! grammar's exact field names for decorators, generics, etc.) for a single
//! well-tested traversal. Languages that need sharper extraction override
//! specific steps by post-processing the `ParseResult` the common walker
//! returns (see `languages::python` for an example of a decorator pass).

use std::path::Path;

use tree_sitter::{Node, Parser, Tree};
use xxhash_rust::xxh3::xxh3_64;

use drift_core::errors::ParseError;

use super::super::types::{
    CallSite, ClassInfo, ExportInfo, FunctionInfo, ImportInfo, ImportSpecifier, ParseResult,
    Position, Range, StringLiteral,
};
use crate::scanner::language_detect::Language;

/// The grammar-specific vocabulary the common walker needs.
pub struct NodeKinds {
    pub function: &'static [&'static str],
    pub class: &'static [&'static str],
    pub call: &'static [&'static str],
    pub new_expr: &'static [&'static str],
    pub import: &'static [&'static str],
    pub export_modifier: &'static [&'static str],
    pub string_literal: &'static [&'static str],
    pub async_keyword: &'static [&'static str],
}

pub fn parse_tree(
    ts_lang: tree_sitter::Language,
    source: &[u8],
    path: &Path,
) -> Result<Tree, ParseError> {
    let mut parser = Parser::new();
    parser
        .set_language(&ts_lang)
        .map_err(|_| ParseError::TreeSitterFailure {
            path: path.display().to_string(),
        })?;
    parser
        .parse(source, None)
        .ok_or_else(|| ParseError::TreeSitterFailure {
            path: path.display().to_string(),
        })
}

pub fn extract(
    tree: &Tree,
    source: &[u8],
    lang: Language,
    path: &Path,
    kinds: &NodeKinds,
) -> ParseResult {
    let mut result = ParseResult {
        language: lang,
        file: path.display().to_string(),
        ..Default::default()
    };
    let mut fn_stack: Vec<String> = Vec::new();
    let mut class_stack: Vec<usize> = Vec::new();
    walk(
        tree.root_node(),
        source,
        kinds,
        &mut result,
        &mut fn_stack,
        &mut class_stack,
    );
    result.had_errors = tree.root_node().has_error();
    result
}

fn node_text<'a>(node: Node, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("").trim()
}

fn node_name(node: Node, source: &[u8]) -> Option<String> {
    if let Some(name_node) = node.child_by_field_name("name") {
        return Some(node_text(name_node, source).to_string());
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind().ends_with("identifier") {
            return Some(node_text(child, source).to_string());
        }
    }
    None
}

fn is_exported(node: Node, kinds: &NodeKinds) -> bool {
    let mut cur = node;
    while let Some(parent) = cur.parent() {
        if kinds.export_modifier.contains(&parent.kind()) {
            return true;
        }
        // Most grammars wrap a decl in a small number of intermediate
        // nodes before an export wrapper; stop once we leave the
        // immediate statement context.
        if parent.kind().ends_with("statement") || parent.kind().ends_with("_declaration") {
            cur = parent;
            continue;
        }
        break;
    }
    false
}

fn contains_async(node: Node, source: &[u8], kinds: &NodeKinds) -> bool {
    if kinds.async_keyword.is_empty() {
        return false;
    }
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .any(|c| kinds.async_keyword.contains(&c.kind()) || node_text(c, source) == "async")
}

fn position_of(node: Node, at_start: bool) -> Position {
    let p = if at_start {
        node.start_position()
    } else {
        node.end_position()
    };
    Position {
        line: p.row as u32 + 1,
        column: p.column as u32,
    }
}

fn build_function_info(
    node: Node,
    source: &[u8],
    kinds: &NodeKinds,
    qualified_name: Option<String>,
) -> (String, FunctionInfo) {
    let name = node_name(node, source).unwrap_or_else(|| "<anonymous>".to_string());
    let start = node.start_position().row as u32 + 1;
    let end = node.end_position().row as u32 + 1;
    let param_count = node
        .child_by_field_name("parameters")
        .map(|p| {
            let mut c = p.walk();
            p.named_children(&mut c).count()
        })
        .unwrap_or(0);
    let return_type = node
        .child_by_field_name("return_type")
        .map(|r| node_text(r, source).to_string());
    let body_text = node_text(node, source).to_string();
    let is_async = contains_async(node, source, kinds);
    let signature_sample = format!(
        "{}|{}|{}|{}",
        name,
        param_count,
        return_type.as_deref().unwrap_or(""),
        is_async
    );
    let info = FunctionInfo {
        name: name.clone(),
        qualified_name,
        line: start,
        end_line: end,
        parameter_count: param_count,
        return_type,
        is_exported: is_exported(node, kinds),
        is_async,
        decorators: Vec::new(),
        signature_hash: xxh3_64(signature_sample.as_bytes()),
        body_hash: xxh3_64(body_text.as_bytes()),
        body_text,
    };
    (name, info)
}

#[allow(clippy::too_many_arguments)]
fn walk(
    node: Node,
    source: &[u8],
    kinds: &NodeKinds,
    result: &mut ParseResult,
    fn_stack: &mut Vec<String>,
    class_stack: &mut Vec<usize>,
) {
    let kind = node.kind();
    let mut pushed_fn = false;
    let mut pushed_class = false;

    if kinds.function.contains(&kind) {
        // A function directly under a class with no enclosing function is a
        // method; its qualified_name follows the spec's "Class.method" form
        // and it's attached to the class rather than top-level `functions`.
        if let (Some(&class_idx), true) = (class_stack.last(), fn_stack.is_empty()) {
            let class_name = result.classes[class_idx].name.clone();
            let method_name = node_name(node, source).unwrap_or_default();
            let (name, info) = build_function_info(
                node,
                source,
                kinds,
                Some(format!("{class_name}.{method_name}")),
            );
            result.classes[class_idx].methods.push(info);
            fn_stack.push(name);
        } else {
            let method_name = node_name(node, source).unwrap_or_default();
            let qualified = fn_stack
                .last()
                .map(|parent| format!("{parent}::{method_name}"));
            let (name, info) = build_function_info(node, source, kinds, qualified);
            result.functions.push(info);
            fn_stack.push(name);
        }
        pushed_fn = true;
    } else if kinds.class.contains(&kind) {
        let name = node_name(node, source).unwrap_or_else(|| "<anonymous>".to_string());
        result.classes.push(ClassInfo {
            name,
            range: Range {
                start: position_of(node, true),
                end: position_of(node, false),
            },
            extends: node
                .child_by_field_name("superclass")
                .or_else(|| node.child_by_field_name("heritage"))
                .map(|s| node_text(s, source).trim_start_matches("extends").trim().to_string()),
            implements: Vec::new(),
            decorators: Vec::new(),
            properties: Vec::new(),
            is_exported: is_exported(node, kinds),
            methods: Vec::new(),
        });
        class_stack.push(result.classes.len() - 1);
        pushed_class = true;
    } else if kinds.call.contains(&kind) || kinds.new_expr.contains(&kind) {
        if let Some(site) = extract_call(node, source, kinds, fn_stack.last().map(|s| s.as_str()))
        {
            result.call_sites.push(site);
        }
    } else if kinds.import.contains(&kind) {
        let text = node_text(node, source);
        result.imports.push(ImportInfo {
            source: text.to_string(),
            specifiers: Vec::new(),
            alias: None,
            line: node.start_position().row as u32 + 1,
        });
    } else if kinds.string_literal.contains(&kind) {
        let text = node_text(node, source);
        let trimmed = text.trim_matches(|c| c == '"' || c == '\'' || c == '`');
        if !trimmed.is_empty() {
            let pos = position_of(node, true);
            result.string_literals.push(StringLiteral {
                value: trimmed.to_string(),
                line: pos.line,
                column: pos.column,
            });
        }
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk(child, source, kinds, result, fn_stack, class_stack);
    }

    if pushed_fn {
        fn_stack.pop();
    }
    if pushed_class {
        class_stack.pop();
    }
}

fn extract_call(
    node: Node,
    source: &[u8],
    kinds: &NodeKinds,
    caller: Option<&str>,
) -> Option<CallSite> {
    let callee_node = node
        .child_by_field_name("function")
        .or_else(|| node.child_by_field_name("name"))?;
    let text = node_text(callee_node, source);

    let (receiver, callee_name) = if let Some(idx) = text.rfind(['.', ':']) {
        let sep_len = if text[idx..].starts_with("::") { 2 } else { 1 };
        (
            Some(text[..idx].to_string()),
            text[idx + sep_len..].to_string(),
        )
    } else {
        (None, text.to_string())
    };

    let call_kind: &'static str = if kinds.new_expr.contains(&node.kind()) {
        "new"
    } else if receiver.is_some() {
        "method"
    } else {
        "direct"
    };

    let pos = position_of(node, true);
    Some(CallSite {
        caller_name: caller.unwrap_or("<module>").to_string(),
        callee_name,
        receiver,
        line: pos.line,
        column: pos.column,
        call_kind,
    })
}

/// Also exposed for `ParserManager::parse_returning_tree`, which needs the
/// raw `Tree` alongside the `ParseResult` to avoid a redundant parse.
pub fn parse_with_kinds(
    ts_lang: tree_sitter::Language,
    source: &[u8],
    path: &Path,
    lang: Language,
    kinds: &NodeKinds,
) -> Result<(ParseResult, Tree), ParseError> {
    let tree = parse_tree(ts_lang, source, path)?;
    let result = extract(&tree, source, lang, path, kinds);
    Ok((result, tree))
}

/// Exports are not separately walked by every grammar (most surface them
/// via the `export_modifier` wrapper already checked during function/class
/// extraction); languages whose grammar exposes a distinct export-list
/// node (e.g. TypeScript `export_statement` with named exports) can push
/// additional `ExportInfo` entries from their own thin wrapper.
pub fn push_export(result: &mut ParseResult, symbol: String, line: u32) {
    result.exports.push(ExportInfo {
        name: Some(symbol),
        line,
    });
}

/// Attach a named specifier (`import { Foo as Bar } from "..."`) to the
/// most recently pushed import.
pub fn push_import_specifier(result: &mut ParseResult, name: String, alias: Option<String>) {
    if let Some(last) = result.imports.last_mut() {
        last.specifiers.push(ImportSpecifier { name, alias });
    }
}
