//! Contracts detector (skeleton) — exported functions with no return-type
//! annotation, a weak signal of an undocumented public contract.

use smallvec::SmallVec;

use crate::detectors::traits::{Detector, DetectorCategory, DetectorVariant};
use crate::engine::types::{DetectionMethod, PatternCategory, PatternMatch};
use crate::engine::visitor::DetectionContext;

pub struct ContractsDetector;

impl Detector for ContractsDetector {
    fn id(&self) -> &str {
        "contracts-base"
    }
    fn category(&self) -> DetectorCategory {
        DetectorCategory::Contracts
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
            if func.is_exported && func.return_type.is_none() {
                matches.push(PatternMatch {
                    file: ctx.file.to_string(),
                    line: func.line,
                    column: 0,
                    pattern_id: "CONTRACT-NOTYPE-001".to_string(),
                    confidence: 0.35,
                    cwe_ids: SmallVec::new(),
                    owasp: None,
                    detection_method: DetectionMethod::AstVisitor,
                    category: PatternCategory::Contracts,
                    matched_text: format!("{} — exported with no declared return type", func.name),
                });
            }
        }
        matches
    }
}
