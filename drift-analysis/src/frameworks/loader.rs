//! TOML pack parsing → compiled, regex/Aho-Corasick-accelerated match blocks.
//!
//! Compilation happens once per pack load; matching happens once per file.
//! Pre-building an `AhoCorasick` automaton for multi-pattern substring fields
//! (imports, decorators, extends, implements) turns an O(files × patterns)
//! scan into a single automaton pass per field.

use std::path::Path;

use aho_corasick::AhoCorasick;
use drift_core::errors::DetectionError;
use regex::{Regex, RegexSet};

use crate::engine::types::PatternCategory;
use crate::scanner::language_detect::Language;

use super::types::{DetectSignal, FrameworkSpec, MatchBlock, PatternDef};

/// A framework pack after TOML parsing and regex/automaton compilation.
#[derive(Debug, Clone)]
pub struct CompiledFrameworkPack {
    pub name: String,
    pub version: Option<String>,
    pub languages: Vec<Language>,
    pub detect_signals: Vec<CompiledDetectSignal>,
    pub patterns: Vec<CompiledPattern>,
}

#[derive(Debug, Clone)]
pub enum CompiledDetectSignal {
    Import(String),
    FilePattern(glob::Pattern),
    Decorator(String),
    Dependency(String),
}

#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub id: String,
    pub category: PatternCategory,
    pub sub_type: Option<String>,
    pub confidence: f32,
    pub cwe_ids: Vec<u32>,
    pub owasp: Option<String>,
    pub match_block: CompiledMatchBlock,
}

#[derive(Debug, Clone)]
pub struct CompiledCall {
    pub receiver: Option<String>,
    pub method: String,
}

#[derive(Debug, Clone, Default)]
pub struct CompiledMatchBlock {
    pub imports: Vec<String>,
    pub import_ac: Option<AhoCorasick>,
    pub decorators: Vec<String>,
    pub decorator_ac: Option<AhoCorasick>,
    pub calls: Vec<CompiledCall>,
    pub extends: Vec<String>,
    pub extends_ac: Option<AhoCorasick>,
    pub implements: Vec<String>,
    pub implements_ac: Option<AhoCorasick>,
    pub function_names: Vec<Regex>,
    pub function_name_regex_set: Option<RegexSet>,
    pub class_names: Vec<Regex>,
    pub class_name_regex_set: Option<RegexSet>,
    pub string_literals: Vec<Regex>,
    pub string_literal_regex_set: Option<RegexSet>,
    pub param_types: Vec<String>,
    pub return_types: Vec<String>,
    pub content_patterns: Vec<Regex>,
    pub content_regex_set: Option<RegexSet>,
    pub exports: Vec<String>,
    pub error_handling: Vec<String>,
    pub doc_comments: Vec<Regex>,
    pub doc_comment_regex_set: Option<RegexSet>,
    pub type_annotations: Vec<Regex>,
    pub type_annotation_regex_set: Option<RegexSet>,
    pub file_patterns: Vec<glob::Pattern>,
    pub language: Option<Language>,
    pub not: Option<Box<CompiledMatchBlock>>,
}

/// Parse and compile a framework pack from a TOML string.
pub fn load_from_str(toml_str: &str) -> Result<CompiledFrameworkPack, DetectionError> {
    let spec: FrameworkSpec = toml::from_str(toml_str)
        .map_err(|e| DetectionError::PackParseFailed { message: e.to_string() })?;
    compile(spec)
}

/// Parse and compile a framework pack from a `.toml` file on disk.
pub fn load_from_file(path: &Path) -> Result<CompiledFrameworkPack, DetectionError> {
    let content = std::fs::read_to_string(path).map_err(|e| DetectionError::PackParseFailed {
        message: format!("{}: {e}", path.display()),
    })?;
    load_from_str(&content)
}

fn compile(spec: FrameworkSpec) -> Result<CompiledFrameworkPack, DetectionError> {
    let languages = spec
        .framework
        .languages
        .iter()
        .filter_map(|l| Language::from_name(l))
        .collect();

    let detect_signals = spec
        .framework
        .detect_by
        .into_iter()
        .map(compile_detect_signal)
        .collect::<Result<Vec<_>, _>>()?;

    let patterns = spec
        .patterns
        .into_iter()
        .map(compile_pattern)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CompiledFrameworkPack {
        name: spec.framework.name,
        version: spec.framework.version,
        languages,
        detect_signals,
        patterns,
    })
}

fn compile_detect_signal(signal: DetectSignal) -> Result<CompiledDetectSignal, DetectionError> {
    Ok(match signal {
        DetectSignal::Import { import } => CompiledDetectSignal::Import(import),
        DetectSignal::FilePattern { file_pattern } => {
            CompiledDetectSignal::FilePattern(compile_glob(&file_pattern)?)
        }
        DetectSignal::Decorator { decorator } => CompiledDetectSignal::Decorator(decorator),
        DetectSignal::Dependency { dependency } => CompiledDetectSignal::Dependency(dependency),
    })
}

fn compile_pattern(def: PatternDef) -> Result<CompiledPattern, DetectionError> {
    let category = PatternCategory::parse_str(&def.category).ok_or_else(|| {
        DetectionError::InvalidPattern {
            pattern_id: def.id.clone(),
            reason: format!("unknown category '{}'", def.category),
        }
    })?;

    Ok(CompiledPattern {
        id: def.id.clone(),
        category,
        sub_type: def.sub_type,
        confidence: def.confidence,
        cwe_ids: def.cwe_ids,
        owasp: def.owasp,
        match_block: compile_match_block(&def.id, def.match_predicates)?,
    })
}

fn compile_match_block(
    pattern_id: &str,
    block: MatchBlock,
) -> Result<CompiledMatchBlock, DetectionError> {
    let calls = block
        .calls
        .iter()
        .map(|spec| match spec.split_once('.') {
            Some((recv, method)) => CompiledCall {
                receiver: Some(recv.to_string()),
                method: method.to_string(),
            },
            None => CompiledCall {
                receiver: None,
                method: spec.clone(),
            },
        })
        .collect();

    let function_names = compile_regex_vec(pattern_id, &block.function_names)?;
    let class_names = compile_regex_vec(pattern_id, &block.class_names)?;
    let string_literals = compile_regex_vec(pattern_id, &block.string_literals)?;
    let content_patterns = compile_regex_vec(pattern_id, &block.content_patterns)?;
    let doc_comments = compile_regex_vec(pattern_id, &block.doc_comments)?;
    let type_annotations = compile_regex_vec(pattern_id, &block.type_annotations)?;

    let file_patterns = block
        .file_patterns
        .iter()
        .map(|p| compile_glob(p))
        .collect::<Result<Vec<_>, _>>()?;

    let language = block.language.as_deref().and_then(Language::from_name);

    let not = match block.not {
        Some(inner) => Some(Box::new(compile_match_block(pattern_id, *inner)?)),
        None => None,
    };

    Ok(CompiledMatchBlock {
        import_ac: build_ac(&block.imports),
        imports: block.imports,
        decorator_ac: build_ac(&block.decorators),
        decorators: block.decorators,
        calls,
        extends_ac: build_ac(&block.extends),
        extends: block.extends,
        implements_ac: build_ac(&block.implements),
        implements: block.implements,
        function_name_regex_set: build_regex_set(&function_names),
        function_names,
        class_name_regex_set: build_regex_set(&class_names),
        class_names,
        string_literal_regex_set: build_regex_set(&string_literals),
        string_literals,
        param_types: block.param_types,
        return_types: block.return_types,
        content_regex_set: build_regex_set(&content_patterns),
        content_patterns,
        exports: block.exports,
        error_handling: block.error_handling,
        doc_comment_regex_set: build_regex_set(&doc_comments),
        doc_comments,
        type_annotation_regex_set: build_regex_set(&type_annotations),
        type_annotations,
        file_patterns,
        language,
        not,
    })
}

fn compile_regex_vec(pattern_id: &str, patterns: &[String]) -> Result<Vec<Regex>, DetectionError> {
    patterns
        .iter()
        .map(|p| {
            Regex::new(p).map_err(|e| DetectionError::InvalidPattern {
                pattern_id: pattern_id.to_string(),
                reason: format!("invalid regex '{p}': {e}"),
            })
        })
        .collect()
}

fn build_regex_set(regexes: &[Regex]) -> Option<RegexSet> {
    if regexes.len() < 2 {
        return None;
    }
    RegexSet::new(regexes.iter().map(|r| r.as_str())).ok()
}

fn build_ac(patterns: &[String]) -> Option<AhoCorasick> {
    if patterns.len() < 2 {
        return None;
    }
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(patterns)
        .ok()
}

fn compile_glob(pattern: &str) -> Result<glob::Pattern, DetectionError> {
    glob::Pattern::new(pattern).map_err(|e| DetectionError::InvalidPattern {
        pattern_id: pattern.to_string(),
        reason: e.to_string(),
    })
}
