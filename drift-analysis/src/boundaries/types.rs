//! Value types shared by the boundary detector: detected ORM frameworks,
//! the models/fields extracted from them, and the sensitive-field matches
//! computed over those fields (spec.md §3 `SENSITIVE_FIELD` — computed,
//! never ingested).

use serde::{Deserialize, Serialize};

/// An ORM/persistence framework the boundary detector knows how to
/// recognize. Detecting one doesn't imply a `FieldExtractor` exists for
/// it yet — new extractors plug into the registry without touching the
/// rest of the core (spec.md §9 polymorphism-across-ORMs note).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrmFramework {
    Sequelize,
    TypeOrm,
    Prisma,
    Mongoose,
    Django,
    SqlAlchemy,
    ActiveRecord,
    Hibernate,
    EfCore,
    Eloquent,
}

/// An import/decorator/file-pattern signature used to detect whether a
/// framework is in use in a given codebase.
#[derive(Debug, Clone)]
pub struct FrameworkSignature {
    pub framework: OrmFramework,
    pub import_patterns: Vec<String>,
    pub decorator_patterns: Vec<String>,
    pub schema_file_patterns: Vec<String>,
}

/// A single extracted model field.
#[derive(Debug, Clone)]
pub struct ExtractedField {
    pub name: String,
    pub field_type: Option<String>,
    pub is_primary_key: bool,
    pub is_nullable: bool,
    pub is_unique: bool,
    pub default_value: Option<String>,
    pub line: u32,
}

/// A relationship from one model's field to another model (foreign key,
/// association, embed).
#[derive(Debug, Clone)]
pub struct ModelRelationship {
    pub field: String,
    pub target_model: String,
    pub kind: String,
}

/// A data model (ORM entity / table mapping) extracted from source.
#[derive(Debug, Clone)]
pub struct ExtractedModel {
    pub name: String,
    pub table_name: Option<String>,
    pub file: String,
    pub line: u32,
    pub framework: OrmFramework,
    pub fields: Vec<ExtractedField>,
    pub relationships: Vec<ModelRelationship>,
    /// Extraction confidence, not the spec.md §4.2 five-factor DATA_ACCESS
    /// score — this one reflects how certain the extractor is that a given
    /// class/decorator combination really is an ORM model at all.
    pub confidence: f64,
}

/// The category a sensitive field falls into (spec.md §3 `SENSITIVE_FIELD`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensitiveCategory {
    Pii,
    Credential,
    Financial,
    Health,
}

/// A field recognized as sensitive, with how specific the match was.
#[derive(Debug, Clone)]
pub struct SensitiveFieldMatch {
    pub table: String,
    pub field: String,
    pub category: SensitiveCategory,
    /// `1.0` for an exact known field name, lower for a substring match.
    pub specificity: f64,
}

/// Aggregate result of a full boundary-detection pass over a file set.
#[derive(Debug, Clone, Default)]
pub struct BoundaryScanResult {
    pub frameworks_detected: Vec<OrmFramework>,
    pub models: Vec<ExtractedModel>,
    pub total_fields: usize,
    pub sensitive_fields: Vec<SensitiveFieldMatch>,
    pub total_sensitive: usize,
}
