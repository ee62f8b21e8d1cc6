//! API detector (skeleton) — inconsistent REST verb/response-shape usage.

use smallvec::SmallVec;

use crate::detectors::traits::{Detector, DetectorCategory, DetectorVariant};
use crate::engine::types::{DetectionMethod, PatternCategory, PatternMatch};
use crate::engine::visitor::DetectionContext;

pub struct ApiDetector;

impl Detector for ApiDetector {
    fn id(&self) -> &str {
        "api-base"
    }
    fn category(&self) -> DetectorCategory {
        DetectorCategory::Api
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
            // API-VERB-001: a handler decorated with an HTTP verb but named
            // after a different one (e.g. `@Get("/users") fn deleteUser`).
            for dec in &func.decorators {
                let verb = dec.name.to_lowercase();
                let name = func.name.to_lowercase();
                let mismatch = (verb == "get" && (name.starts_with("delete") || name.starts_with("create")))
                    || (verb == "delete" && name.starts_with("create"))
                    || (verb == "post" && name.starts_with("get"));
                if mismatch {
                    matches.push(PatternMatch {
                        file: ctx.file.to_string(),
                        line: func.line,
                        column: 0,
                        pattern_id: "API-VERB-001".to_string(),
                        confidence: 0.45,
                        cwe_ids: SmallVec::new(),
                        owasp: None,
                        detection_method: DetectionMethod::AstVisitor,
                        category: PatternCategory::Api,
                        matched_text: format!("{} decorated @{} but named like a different verb", func.name, dec.name),
                    });
                }
            }
        }
        matches
    }
}
