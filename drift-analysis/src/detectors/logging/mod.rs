//! Logging detector (skeleton) — `console.log`/`print`-style debug logging
//! left in place of a structured logger call.

use smallvec::SmallVec;

use crate::detectors::traits::{Detector, DetectorCategory, DetectorVariant};
use crate::engine::types::{DetectionMethod, PatternCategory, PatternMatch};
use crate::engine::visitor::DetectionContext;

const DEBUG_LOG_CALLEES: &[&str] = &["log", "print", "println", "puts", "var_dump", "print_r", "Console.WriteLine"];

pub struct LoggingDetector;

impl Detector for LoggingDetector {
    fn id(&self) -> &str {
        "logging-base"
    }
    fn category(&self) -> DetectorCategory {
        DetectorCategory::Logging
    }
    fn variant(&self) -> DetectorVariant {
        DetectorVariant::Base
    }
    fn is_critical(&self) -> bool {
        false
    }

    fn detect(&self, ctx: &DetectionContext) -> Vec<PatternMatch> {
        let mut matches = Vec::new();
        for call in ctx.call_sites {
            let is_console_log = call.receiver.as_deref() == Some("console") && call.callee_name == "log";
            let is_bare_debug_call = call.receiver.is_none() && DEBUG_LOG_CALLEES.contains(&call.callee_name.as_str());
            if is_console_log || is_bare_debug_call {
                matches.push(PatternMatch {
                    file: ctx.file.to_string(),
                    line: call.line,
                    column: call.column,
                    pattern_id: "LOG-DEBUG-001".to_string(),
                    confidence: 0.45,
                    cwe_ids: SmallVec::new(),
                    owasp: None,
                    detection_method: DetectionMethod::AstVisitor,
                    category: PatternCategory::Logging,
                    matched_text: format!("{} — debug print instead of structured logging", call.callee_name),
                });
            }
        }
        matches
    }
}
