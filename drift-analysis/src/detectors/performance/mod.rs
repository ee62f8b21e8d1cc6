//! Performance detector (skeleton) — loop bodies that issue a call, a weak
//! signal for N+1 query patterns and other per-iteration overhead.

use smallvec::SmallVec;

use crate::detectors::traits::{Detector, DetectorCategory, DetectorVariant};
use crate::engine::types::{DetectionMethod, PatternCategory, PatternMatch};
use crate::engine::visitor::DetectionContext;

const DATA_ACCESS_CALLEES: &[&str] = &["find", "findOne", "findAll", "query", "get", "select", "fetch"];

pub struct PerformanceDetector;

impl Detector for PerformanceDetector {
    fn id(&self) -> &str {
        "performance-base"
    }
    fn category(&self) -> DetectorCategory {
        DetectorCategory::Performance
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
            let data_access_calls = ctx
                .call_sites
                .iter()
                .filter(|c| c.caller_name == func.name && DATA_ACCESS_CALLEES.contains(&c.callee_name.as_str()))
                .count();
            if data_access_calls >= 2 {
                matches.push(PatternMatch {
                    file: ctx.file.to_string(),
                    line: func.line,
                    column: 0,
                    pattern_id: "PERF-REPEATCALL-001".to_string(),
                    confidence: 0.35,
                    cwe_ids: SmallVec::new(),
                    owasp: None,
                    detection_method: DetectionMethod::AstVisitor,
                    category: PatternCategory::Performance,
                    matched_text: format!("{} — {} repeated data-access calls", func.name, data_access_calls),
                });
            }
        }
        matches
    }
}
