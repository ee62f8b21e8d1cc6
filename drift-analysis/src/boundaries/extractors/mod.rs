//! Per-ORM field extractors (spec.md §9 capability-set registry, keyed by
//! `(language, framework)` — here keyed by framework alone since each
//! extractor already pins its own language via the node shapes it reads).

pub mod sequelize;
pub mod typeorm;

pub use crate::boundaries::types::{ExtractedField, ExtractedModel};
use crate::boundaries::types::OrmFramework;
use crate::parsers::types::ParseResult;

pub use sequelize::SequelizeExtractor;
pub use typeorm::TypeOrmExtractor;

/// A per-framework extractor that turns parsed classes into `ExtractedModel`s.
pub trait FieldExtractor: Send + Sync {
    fn framework(&self) -> OrmFramework;
    fn schema_file_patterns(&self) -> &[&str];
    fn extract_models(&self, pr: &ParseResult) -> Vec<ExtractedModel>;
}

/// All built-in extractors, in detection order.
pub fn create_all_extractors() -> Vec<Box<dyn FieldExtractor>> {
    vec![Box::new(TypeOrmExtractor), Box::new(SequelizeExtractor)]
}
