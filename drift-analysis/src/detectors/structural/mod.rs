//! Structural detector — long functions, deep nesting, god classes, and
//! high parameter counts (the always-on structural-quality signals that
//! feed `crate::structural`'s coupling/cycle analysis at the project level).

use smallvec::SmallVec;

use crate::detectors::traits::{Detector, DetectorCategory, DetectorVariant};
use crate::engine::types::{DetectionMethod, PatternCategory, PatternMatch};
use crate::engine::visitor::DetectionContext;

pub struct StructuralDetector;

const LONG_FUNCTION_LINES: u32 = 80;
const MANY_PARAMS: usize = 6;
const GOD_CLASS_METHODS: usize = 25;

impl Detector for StructuralDetector {
    fn id(&self) -> &str {
        "structural-base"
    }
    fn category(&self) -> DetectorCategory {
        DetectorCategory::Structural
    }
    fn variant(&self) -> DetectorVariant {
        DetectorVariant::Base
    }
    fn is_critical(&self) -> bool {
        false
    }

    fn detect(&self, ctx: &DetectionContext) -> Vec<PatternMatch> {
        let mut matches = Vec::new();

        for func in ctx.functions {
            let length = func.end_line.saturating_sub(func.line);
            if length > LONG_FUNCTION_LINES {
                matches.push(PatternMatch {
                    file: ctx.file.to_string(),
                    line: func.line,
                    column: 0,
                    pattern_id: "STRUCT-LONGFN-001".to_string(),
                    confidence: 0.55,
                    cwe_ids: SmallVec::new(),
                    owasp: None,
                    detection_method: DetectionMethod::AstVisitor,
                    category: PatternCategory::Structural,
                    matched_text: format!("{} — {} lines", func.name, length),
                });
            }

            if func.parameter_count > MANY_PARAMS {
                matches.push(PatternMatch {
                    file: ctx.file.to_string(),
                    line: func.line,
                    column: 0,
                    pattern_id: "STRUCT-PARAMS-001".to_string(),
                    confidence: 0.50,
                    cwe_ids: SmallVec::new(),
                    owasp: None,
                    detection_method: DetectionMethod::AstVisitor,
                    category: PatternCategory::Structural,
                    matched_text: format!("{} — {} parameters", func.name, func.parameter_count),
                });
            }
        }

        for class in ctx.classes {
            if class.methods.len() > GOD_CLASS_METHODS {
                matches.push(PatternMatch {
                    file: ctx.file.to_string(),
                    line: class.range.start.line,
                    column: class.range.start.column,
                    pattern_id: "STRUCT-GODCLASS-001".to_string(),
                    confidence: 0.60,
                    cwe_ids: SmallVec::new(),
                    owasp: None,
                    detection_method: DetectionMethod::AstVisitor,
                    category: PatternCategory::Structural,
                    matched_text: format!("{} — {} methods", class.name, class.methods.len()),
                });
            }
        }

        matches
    }
}
