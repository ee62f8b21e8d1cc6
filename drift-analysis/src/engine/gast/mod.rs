//! Generalized AST: language-neutral normalization of tree-sitter trees.

pub mod base_normalizer;
pub mod normalizers;
pub mod types;

pub use base_normalizer::{BaseNormalizer, GASTNormalizer};
pub use types::GASTNode;

use crate::scanner::language_detect::Language;

/// Look up the normalizer for a language, falling back to the base
/// (TypeScript-shaped) normalizer for languages without a dedicated one.
pub fn normalizer_for(language: Language) -> Box<dyn GASTNormalizer> {
    match language {
        Language::Python => Box::new(normalizers::PythonNormalizer),
        Language::Ruby => Box::new(normalizers::RubyNormalizer),
        Language::TypeScript | Language::JavaScript => Box::new(normalizers::TypeScriptNormalizer),
        _ => Box::new(BaseNormalizer),
    }
}
