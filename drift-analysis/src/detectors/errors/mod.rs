//! Errors detector — swallowed exceptions, generic catch-and-ignore,
//! missing error propagation, bare `except`/`catch` blocks.

use smallvec::SmallVec;

use crate::detectors::traits::{Detector, DetectorCategory, DetectorVariant};
use crate::engine::types::{DetectionMethod, PatternCategory, PatternMatch};
use crate::engine::visitor::DetectionContext;

pub struct ErrorsDetector;

impl Detector for ErrorsDetector {
    fn id(&self) -> &str {
        "errors-base"
    }
    fn category(&self) -> DetectorCategory {
        DetectorCategory::Errors
    }
    fn variant(&self) -> DetectorVariant {
        DetectorVariant::Base
    }
    fn is_critical(&self) -> bool {
        false
    }

    fn detect(&self, ctx: &DetectionContext) -> Vec<PatternMatch> {
        let mut matches = Vec::new();

        // ERR-SWALLOW-001: a function whose entire body is a no-op catch,
        // e.g. `catch (e) {}` or `except: pass` — the body text is short
        // and contains no further calls once the catch keyword appears.
        for func in ctx.functions {
            let trimmed = func.body_text.trim();
            let lower = trimmed.to_lowercase();
            let looks_like_empty_catch = (lower.contains("catch") || lower.contains("except") || lower.contains("rescue"))
                && (trimmed.ends_with("{}") || lower.trim_end().ends_with("pass") || lower.contains("# ignore") || lower.contains("// ignore"));
            if looks_like_empty_catch {
                matches.push(PatternMatch {
                    file: ctx.file.to_string(),
                    line: func.line,
                    column: 0,
                    pattern_id: "ERR-SWALLOW-001".to_string(),
                    confidence: 0.60,
                    cwe_ids: SmallVec::from_buf([390, 0]),
                    owasp: None,
                    detection_method: DetectionMethod::AstVisitor,
                    category: PatternCategory::Errors,
                    matched_text: format!("{} — error silently swallowed", func.name),
                });
            }
        }

        // ERR-GENERIC-001: catching/rescuing the broadest possible type.
        for lit in &ctx.parse_result.string_literals {
            if matches!(lit.value.as_str(), "Exception" | "BaseException" | "StandardError" | "Throwable" | "Error") {
                matches.push(PatternMatch {
                    file: ctx.file.to_string(),
                    line: lit.line,
                    column: lit.column,
                    pattern_id: "ERR-GENERIC-001".to_string(),
                    confidence: 0.40,
                    cwe_ids: SmallVec::from_buf([396, 0]),
                    owasp: None,
                    detection_method: DetectionMethod::AstVisitor,
                    category: PatternCategory::Errors,
                    matched_text: format!("catch-all on {}", lit.value),
                });
            }
        }

        matches
    }
}
