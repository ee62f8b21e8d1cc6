//! Documentation detector (skeleton) — exported functions/classes with no
//! doc comment immediately above them.

use smallvec::SmallVec;

use crate::detectors::traits::{Detector, DetectorCategory, DetectorVariant};
use crate::engine::types::{DetectionMethod, PatternCategory, PatternMatch};
use crate::engine::visitor::DetectionContext;

pub struct DocumentationDetector;

impl Detector for DocumentationDetector {
    fn id(&self) -> &str {
        "documentation-base"
    }
    fn category(&self) -> DetectorCategory {
        DetectorCategory::Documentation
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
            if !func.is_exported {
                continue;
            }
            let body_start = func.body_text.trim_start();
            let has_doc = body_start.starts_with("///")
                || body_start.starts_with("/**")
                || body_start.starts_with("\"\"\"")
                || body_start.starts_with('#');
            if !has_doc {
                matches.push(PatternMatch {
                    file: ctx.file.to_string(),
                    line: func.line,
                    column: 0,
                    pattern_id: "DOC-MISSING-001".to_string(),
                    confidence: 0.30,
                    cwe_ids: SmallVec::new(),
                    owasp: None,
                    detection_method: DetectionMethod::AstVisitor,
                    category: PatternCategory::Documentation,
                    matched_text: format!("{} — exported, undocumented", func.name),
                });
            }
        }
        matches
    }
}
