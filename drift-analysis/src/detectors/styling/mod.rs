//! Styling detector (skeleton) — function naming that breaks from the
//! dominant case convention observed elsewhere in the file.

use smallvec::SmallVec;

use crate::detectors::traits::{Detector, DetectorCategory, DetectorVariant};
use crate::engine::types::{DetectionMethod, PatternCategory, PatternMatch};
use crate::engine::visitor::DetectionContext;

fn is_snake_case(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_lowercase() || c.is_numeric() || c == '_')
}

fn is_camel_case(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_lowercase()) && name.contains(char::is_uppercase) && !name.contains('_')
}

pub struct StylingDetector;

impl Detector for StylingDetector {
    fn id(&self) -> &str {
        "styling-base"
    }
    fn category(&self) -> DetectorCategory {
        DetectorCategory::Styling
    }
    fn variant(&self) -> DetectorVariant {
        DetectorVariant::Base
    }
    fn is_critical(&self) -> bool {
        false
    }

    fn detect(&self, ctx: &DetectionContext) -> Vec<PatternMatch> {
        let mut matches = Vec::new();
        let snake_count = ctx.functions.iter().filter(|f| is_snake_case(&f.name)).count();
        let camel_count = ctx.functions.iter().filter(|f| is_camel_case(&f.name)).count();
        if snake_count == 0 || camel_count == 0 {
            return matches;
        }
        let dominant_is_camel = camel_count >= snake_count;
        for func in ctx.functions {
            let breaks_convention = if dominant_is_camel { is_snake_case(&func.name) } else { is_camel_case(&func.name) };
            if breaks_convention {
                matches.push(PatternMatch {
                    file: ctx.file.to_string(),
                    line: func.line,
                    column: 0,
                    pattern_id: "STYLE-NAMING-001".to_string(),
                    confidence: 0.35,
                    cwe_ids: SmallVec::new(),
                    owasp: None,
                    detection_method: DetectionMethod::AstVisitor,
                    category: PatternCategory::Styling,
                    matched_text: format!("{} — breaks dominant naming convention in file", func.name),
                });
            }
        }
        matches
    }
}
