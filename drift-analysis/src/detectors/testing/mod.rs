//! Testing detector — test-name/assertion conventions, skipped tests, and
//! tests with no assertions at all.

use smallvec::SmallVec;

use crate::detectors::traits::{Detector, DetectorCategory, DetectorVariant};
use crate::engine::types::{DetectionMethod, PatternCategory, PatternMatch};
use crate::engine::visitor::DetectionContext;

pub struct TestingDetector;

const ASSERTION_CALLEES: &[&str] = &[
    "assert", "assertEquals", "assertTrue", "assertFalse", "assert_eq",
    "assert_ne", "expect", "should", "assertThat", "Assert",
];

fn is_test_function(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.starts_with("test_") || lower.starts_with("test") || lower.starts_with("it_") || lower.starts_with("should_")
}

impl Detector for TestingDetector {
    fn id(&self) -> &str {
        "testing-base"
    }
    fn category(&self) -> DetectorCategory {
        DetectorCategory::Testing
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
            if !is_test_function(&func.name) {
                continue;
            }

            // TEST-SKIP-001: a test marked skip/disabled/pending via decorator.
            let skipped = func.decorators.iter().any(|d| {
                let dl = d.name.to_lowercase();
                dl.contains("skip") || dl.contains("ignore") || dl.contains("disabled") || dl.contains("pending")
            });
            if skipped {
                matches.push(PatternMatch {
                    file: ctx.file.to_string(),
                    line: func.line,
                    column: 0,
                    pattern_id: "TEST-SKIP-001".to_string(),
                    confidence: 0.95,
                    cwe_ids: SmallVec::new(),
                    owasp: None,
                    detection_method: DetectionMethod::AstVisitor,
                    category: PatternCategory::Testing,
                    matched_text: format!("{} — skipped test", func.name),
                });
                continue;
            }

            // TEST-NOASSERT-001: a test body with no recognizable assertion call.
            let has_assertion = ctx.call_sites.iter().any(|c| {
                c.line >= func.line
                    && c.line <= func.end_line
                    && (ASSERTION_CALLEES.contains(&c.callee_name.as_str())
                        || c.callee_name.to_lowercase().starts_with("assert")
                        || c.callee_name.to_lowercase().starts_with("expect"))
            });
            if !has_assertion && func.end_line > func.line {
                matches.push(PatternMatch {
                    file: ctx.file.to_string(),
                    line: func.line,
                    column: 0,
                    pattern_id: "TEST-NOASSERT-001".to_string(),
                    confidence: 0.50,
                    cwe_ids: SmallVec::new(),
                    owasp: None,
                    detection_method: DetectionMethod::AstVisitor,
                    category: PatternCategory::Testing,
                    matched_text: format!("{} — no assertion found", func.name),
                });
            }
        }

        matches
    }
}
