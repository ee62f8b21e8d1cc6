//! Components detector (skeleton) — UI component classes/functions with
//! an unusually large prop/parameter surface.

use smallvec::SmallVec;

use crate::detectors::traits::{Detector, DetectorCategory, DetectorVariant};
use crate::engine::types::{DetectionMethod, PatternCategory, PatternMatch};
use crate::engine::visitor::DetectionContext;

const MANY_PROPS: usize = 10;

pub struct ComponentsDetector;

fn looks_like_component(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_uppercase())
}

impl Detector for ComponentsDetector {
    fn id(&self) -> &str {
        "components-base"
    }
    fn category(&self) -> DetectorCategory {
        DetectorCategory::Components
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
            if looks_like_component(&func.name) && func.parameter_count > MANY_PROPS {
                matches.push(PatternMatch {
                    file: ctx.file.to_string(),
                    line: func.line,
                    column: 0,
                    pattern_id: "COMP-PROPS-001".to_string(),
                    confidence: 0.40,
                    cwe_ids: SmallVec::new(),
                    owasp: None,
                    detection_method: DetectionMethod::AstVisitor,
                    category: PatternCategory::Components,
                    matched_text: format!("{} — {} props", func.name, func.parameter_count),
                });
            }
        }
        matches
    }
}
