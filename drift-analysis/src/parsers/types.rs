//! The value types produced by a language parser: functions, classes,
//! imports, exports, call sites, decorators/annotations, and string
//! literals, normalized across all ten supported languages.

use crate::scanner::language_detect::Language;

#[derive(Debug, Clone, Default)]
pub struct DecoratorInfo {
    pub name: String,
    pub arguments: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct PropertyInfo {
    pub name: String,
    pub type_annotation: Option<String>,
    pub decorators: Vec<DecoratorInfo>,
}

/// A 1-indexed line/column source position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

#[derive(Debug, Clone, Default)]
pub struct ClassInfo {
    pub name: String,
    pub range: Range,
    pub extends: Option<String>,
    pub implements: Vec<String>,
    pub decorators: Vec<DecoratorInfo>,
    pub properties: Vec<PropertyInfo>,
    pub is_exported: bool,
    /// Methods declared in this class, surfaced as `FunctionInfo` with a
    /// `"Class.method"`-style `qualified_name` (spec.md §3 FUNCTION.id).
    pub methods: Vec<FunctionInfo>,
}

#[derive(Debug, Clone, Default)]
pub struct FunctionInfo {
    pub name: String,
    pub qualified_name: Option<String>,
    pub line: u32,
    pub end_line: u32,
    pub parameter_count: usize,
    pub return_type: Option<String>,
    pub is_exported: bool,
    pub is_async: bool,
    pub decorators: Vec<DecoratorInfo>,
    pub body_text: String,
    /// xxhash3 of the normalized signature (name + param count + return type),
    /// used by CG.StreamingBuild to detect "function unchanged" across scans.
    pub signature_hash: u64,
    /// xxhash3 of `body_text`, used to detect body-only edits.
    pub body_hash: u64,
}

/// A call expression found inside a function body, before resolution.
#[derive(Debug, Clone)]
pub struct CallSite {
    pub caller_name: String,
    pub callee_name: String,
    pub receiver: Option<String>,
    pub line: u32,
    pub column: u32,
    /// `direct`, `method`, `new`, or `di` (spec.md §3 `CALL_EDGE.call_kind`).
    pub call_kind: &'static str,
}

/// One named or aliased symbol pulled in by an `ImportInfo`.
#[derive(Debug, Clone)]
pub struct ImportSpecifier {
    pub name: String,
    pub alias: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ImportInfo {
    /// The module/package the import resolves against, e.g. `"./utils"` or
    /// `"@nestjs/common"`.
    pub source: String,
    pub specifiers: Vec<ImportSpecifier>,
    pub alias: Option<String>,
    pub line: u32,
}

#[derive(Debug, Clone)]
pub struct ExportInfo {
    pub name: Option<String>,
    pub line: u32,
}

/// A string literal, kept for ORM table-name/SQL-literal recognition
/// (spec.md §4.2, `patterns::aggregation`).
#[derive(Debug, Clone)]
pub struct StringLiteral {
    pub value: String,
    pub line: u32,
    pub column: u32,
}

/// Everything extracted from one source file.
#[derive(Debug, Clone, Default)]
pub struct ParseResult {
    pub file: String,
    pub language: Language,
    pub functions: Vec<FunctionInfo>,
    pub classes: Vec<ClassInfo>,
    pub imports: Vec<ImportInfo>,
    pub exports: Vec<ExportInfo>,
    pub call_sites: Vec<CallSite>,
    pub string_literals: Vec<StringLiteral>,
    pub had_errors: bool,
}
