//! The `Detector` trait every pattern-category detector implements, plus
//! the category/variant enums the registry filters and groups by.

use crate::engine::types::PatternMatch;
use crate::engine::visitor::DetectionContext;

/// One of the 16 pattern categories a detector can be registered under
/// (spec.md §4.2, mirrors `engine::types::PatternCategory` 1:1 so a
/// detector's category and its matches' category never disagree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetectorCategory {
    Api,
    Auth,
    Components,
    Config,
    Contracts,
    DataAccess,
    Documentation,
    Errors,
    Logging,
    Performance,
    Security,
    Structural,
    Styling,
    Testing,
    Types,
    Accessibility,
}

/// Whether a detector runs its base (AST-driven, always-on) logic, or an
/// extended variant layered on top of a learned convention. Skeleton
/// detectors are always `Base`; detectors that grow a learning-driven
/// sibling register a second `Learned` instance under the same category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetectorVariant {
    Base,
    Learned,
}

/// A single pattern detector. Implementations inspect one `DetectionContext`
/// (one file's parsed functions/classes/imports/call sites/strings) and
/// return zero or more `PatternMatch`es.
pub trait Detector: Send + Sync {
    /// Stable identifier, e.g. `"security-base"`.
    fn id(&self) -> &str;
    fn category(&self) -> DetectorCategory;
    fn variant(&self) -> DetectorVariant;
    /// Critical detectors still run under `DetectorRegistry::set_critical_only`.
    fn is_critical(&self) -> bool;
    fn detect(&self, ctx: &DetectionContext) -> Vec<PatternMatch>;
}
