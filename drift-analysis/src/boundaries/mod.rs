//! Data boundary detection: ORM/framework recognition, model/field
//! extraction, and sensitive-field classification (spec.md §3
//! `DATA_ACCESS`/`SENSITIVE_FIELD`, §4.2 ORM recognizers).

pub mod detector;
pub mod extractors;
pub mod sensitive;
pub mod types;

pub use detector::BoundaryDetector;
pub use sensitive::SensitiveFieldDetector;
pub use types::{
    BoundaryScanResult, ExtractedField, ExtractedModel, FrameworkSignature, ModelRelationship,
    OrmFramework, SensitiveCategory, SensitiveFieldMatch,
};
