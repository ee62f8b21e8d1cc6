//! Config detector (skeleton) — hardcoded configuration values (URLs,
//! ports, timeouts) that should be environment-driven.

use smallvec::SmallVec;

use crate::detectors::traits::{Detector, DetectorCategory, DetectorVariant};
use crate::engine::types::{DetectionMethod, PatternCategory, PatternMatch};
use crate::engine::visitor::DetectionContext;

pub struct ConfigDetector;

impl Detector for ConfigDetector {
    fn id(&self) -> &str {
        "config-base"
    }
    fn category(&self) -> DetectorCategory {
        DetectorCategory::Config
    }
    fn variant(&self) -> DetectorVariant {
        DetectorVariant::Base
    }
    fn is_critical(&self) -> bool {
        false
    }

    fn detect(&self, ctx: &DetectionContext) -> Vec<PatternMatch> {
        let mut matches = Vec::new();
        for lit in &ctx.parse_result.string_literals {
            let is_url = lit.value.starts_with("http://") || lit.value.starts_with("https://");
            let is_localhost = lit.value.contains("localhost") || lit.value.contains("127.0.0.1");
            if is_url && !is_localhost {
                matches.push(PatternMatch {
                    file: ctx.file.to_string(),
                    line: lit.line,
                    column: lit.column,
                    pattern_id: "CFG-HARDCODED-001".to_string(),
                    confidence: 0.40,
                    cwe_ids: SmallVec::from_buf([798, 0]),
                    owasp: None,
                    detection_method: DetectionMethod::AstVisitor,
                    category: PatternCategory::Config,
                    matched_text: "hardcoded URL — should be environment-driven".to_string(),
                });
            }
        }
        matches
    }
}
