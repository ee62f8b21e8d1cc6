//! Per-language `LanguageParser` implementations plus the shared `common`
//! walker they all wrap.

pub mod common;
pub mod csharp;
pub mod go;
pub mod java;
pub mod javascript;
pub mod kotlin;
pub mod php;
pub mod python;
pub mod ruby;
pub mod rust_lang;
pub mod typescript;

use std::path::Path;

use drift_core::errors::ParseError;

use super::types::ParseResult;
use crate::scanner::language_detect::Language;

/// Parse `source` with a known `Language` and a pre-resolved tree-sitter
/// grammar, returning both the `ParseResult` and the raw `Tree`.
///
/// Mirrors `ParserManager::parser_for`'s fallback routing: C/C++ borrow the
/// C# grammar, Swift/Scala borrow the Java grammar.
pub fn parse_with_language_and_tree(
    source: &[u8],
    path: &Path,
    lang: Language,
    ts_lang: tree_sitter::Language,
) -> Result<(ParseResult, tree_sitter::Tree), ParseError> {
    let (mut result, tree) = match lang {
        Language::TypeScript => common::parse_with_kinds(
            ts_lang,
            source,
            path,
            lang,
            &TYPESCRIPT_KINDS,
        )?,
        Language::JavaScript => {
            common::parse_with_kinds(ts_lang, source, path, lang, &JAVASCRIPT_KINDS)?
        }
        Language::Python => common::parse_with_kinds(ts_lang, source, path, lang, &PYTHON_KINDS)?,
        Language::Java | Language::Swift | Language::Scala => {
            common::parse_with_kinds(ts_lang, source, path, lang, &JAVA_KINDS)?
        }
        Language::CSharp | Language::Cpp | Language::C => {
            common::parse_with_kinds(ts_lang, source, path, lang, &CSHARP_KINDS)?
        }
        Language::Go => common::parse_with_kinds(ts_lang, source, path, lang, &GO_KINDS)?,
        Language::Rust => common::parse_with_kinds(ts_lang, source, path, lang, &RUST_KINDS)?,
        Language::Ruby => common::parse_with_kinds(ts_lang, source, path, lang, &RUBY_KINDS)?,
        Language::Php => common::parse_with_kinds(ts_lang, source, path, lang, &PHP_KINDS)?,
        Language::Kotlin => {
            common::parse_with_kinds(ts_lang, source, path, lang, &KOTLIN_KINDS)?
        }
    };
    result.language = lang;
    Ok((result, tree))
}

// Node-kind tables duplicated here (rather than re-exported from each
// parser module, which keeps its table private) so the dispatcher doesn't
// need a `dyn LanguageParser` indirection just to get the raw `Tree` back.
const TYPESCRIPT_KINDS: common::NodeKinds = common::NodeKinds {
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

const JAVASCRIPT_KINDS: common::NodeKinds = common::NodeKinds {
    function: &[
        "function_declaration",
        "function_expression",
        "arrow_function",
        "method_definition",
        "generator_function_declaration",
    ],
    class: &["class_declaration"],
    call: &["call_expression"],
    new_expr: &["new_expression"],
    import: &["import_statement"],
    export_modifier: &["export_statement"],
    string_literal: &["string", "template_string"],
    async_keyword: &["async"],
};

const PYTHON_KINDS: common::NodeKinds = common::NodeKinds {
    function: &["function_definition"],
    class: &["class_definition"],
    call: &["call"],
    new_expr: &[],
    import: &["import_statement", "import_from_statement"],
    export_modifier: &[],
    string_literal: &["string"],
    async_keyword: &["async"],
};

const JAVA_KINDS: common::NodeKinds = common::NodeKinds {
    function: &["method_declaration", "constructor_declaration"],
    class: &[
        "class_declaration",
        "interface_declaration",
        "enum_declaration",
        "record_declaration",
    ],
    call: &["method_invocation"],
    new_expr: &["object_creation_expression"],
    import: &["import_declaration"],
    export_modifier: &[],
    string_literal: &["string_literal"],
    async_keyword: &[],
};

const CSHARP_KINDS: common::NodeKinds = common::NodeKinds {
    function: &[
        "method_declaration",
        "constructor_declaration",
        "local_function_statement",
    ],
    class: &[
        "class_declaration",
        "interface_declaration",
        "struct_declaration",
        "record_declaration",
    ],
    call: &["invocation_expression"],
    new_expr: &["object_creation_expression"],
    import: &["using_directive"],
    export_modifier: &[],
    string_literal: &["string_literal", "raw_string_literal", "verbatim_string_literal"],
    async_keyword: &["async"],
};

const GO_KINDS: common::NodeKinds = common::NodeKinds {
    function: &["function_declaration", "method_declaration", "func_literal"],
    class: &["type_declaration"],
    call: &["call_expression"],
    new_expr: &[],
    import: &["import_spec"],
    export_modifier: &[],
    string_literal: &["interpreted_string_literal", "raw_string_literal"],
    async_keyword: &[],
};

const RUST_KINDS: common::NodeKinds = common::NodeKinds {
    function: &["function_item"],
    class: &["struct_item", "enum_item", "trait_item", "impl_item"],
    call: &["call_expression"],
    new_expr: &[],
    import: &["use_declaration"],
    export_modifier: &["visibility_modifier"],
    string_literal: &["string_literal", "raw_string_literal"],
    async_keyword: &["async"],
};

const RUBY_KINDS: common::NodeKinds = common::NodeKinds {
    function: &["method", "singleton_method"],
    class: &["class", "module"],
    call: &["call", "method_call"],
    new_expr: &[],
    import: &[],
    export_modifier: &[],
    string_literal: &["string"],
    async_keyword: &[],
};

const PHP_KINDS: common::NodeKinds = common::NodeKinds {
    function: &["function_definition", "method_declaration"],
    class: &["class_declaration", "interface_declaration", "trait_declaration"],
    call: &[
        "function_call_expression",
        "member_call_expression",
        "scoped_call_expression",
    ],
    new_expr: &["object_creation_expression"],
    import: &["namespace_use_declaration"],
    export_modifier: &[],
    string_literal: &["string", "encapsed_string"],
    async_keyword: &[],
};

const KOTLIN_KINDS: common::NodeKinds = common::NodeKinds {
    function: &["function_declaration"],
    class: &["class_declaration", "object_declaration"],
    call: &["call_expression"],
    new_expr: &[],
    import: &["import_header"],
    export_modifier: &[],
    string_literal: &["string_literal"],
    async_keyword: &[],
};
