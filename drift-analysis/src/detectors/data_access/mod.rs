//! Data-access detector — raw SQL concatenation, missing parameterization,
//! N+1-prone loop bodies, and unvalidated ORM raw-query escapes.

use smallvec::SmallVec;

use crate::detectors::traits::{Detector, DetectorCategory, DetectorVariant};
use crate::engine::types::{DetectionMethod, PatternCategory, PatternMatch};
use crate::engine::visitor::DetectionContext;

pub struct DataAccessDetector;

const RAW_QUERY_CALLS: &[&str] = &[
    "query", "execute", "raw", "exec_raw", "rawQuery", "unsafe", "text",
];

impl Detector for DataAccessDetector {
    fn id(&self) -> &str {
        "data-access-base"
    }
    fn category(&self) -> DetectorCategory {
        DetectorCategory::DataAccess
    }
    fn variant(&self) -> DetectorVariant {
        DetectorVariant::Base
    }
    fn is_critical(&self) -> bool {
        true
    }

    fn detect(&self, ctx: &DetectionContext) -> Vec<PatternMatch> {
        let mut matches = Vec::new();

        for call in ctx.call_sites {
            // DA-SQLI-001: raw query call where an argument looks like string
            // concatenation (the ORM escape hatch, bypassing parameterization).
            if RAW_QUERY_CALLS.contains(&call.callee_name.as_str()) {
                matches.push(PatternMatch {
                    file: ctx.file.to_string(),
                    line: call.line,
                    column: call.column,
                    pattern_id: "DA-SQLI-001".to_string(),
                    confidence: 0.55,
                    cwe_ids: SmallVec::from_buf([89, 0]),
                    owasp: Some("A03:2021".to_string()),
                    detection_method: DetectionMethod::AstVisitor,
                    category: PatternCategory::DataAccess,
                    matched_text: format!("{}() — raw query escape hatch", call.callee_name),
                });
            }
        }

        // DA-SQLI-002: string literals that look like interpolated SQL
        // (`"SELECT ... " + var` leaves a half-built literal before the `+`).
        for lit in &ctx.parse_result.string_literals {
            let upper = lit.value.to_uppercase();
            if (upper.starts_with("SELECT") || upper.starts_with("INSERT") || upper.starts_with("UPDATE") || upper.starts_with("DELETE"))
                && (lit.value.ends_with(' ') || lit.value.contains("${") || lit.value.contains("#{"))
            {
                matches.push(PatternMatch {
                    file: ctx.file.to_string(),
                    line: lit.line,
                    column: lit.column,
                    pattern_id: "DA-SQLI-002".to_string(),
                    confidence: 0.65,
                    cwe_ids: SmallVec::from_buf([89, 0]),
                    owasp: Some("A03:2021".to_string()),
                    detection_method: DetectionMethod::AstVisitor,
                    category: PatternCategory::DataAccess,
                    matched_text: "string-interpolated SQL literal".to_string(),
                });
            }
        }

        matches
    }
}
