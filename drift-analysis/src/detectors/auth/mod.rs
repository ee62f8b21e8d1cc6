//! Auth detector (skeleton) — handlers with no auth decorator/guard next to
//! sibling handlers that do have one.

use smallvec::SmallVec;

use crate::detectors::traits::{Detector, DetectorCategory, DetectorVariant};
use crate::engine::types::{DetectionMethod, PatternCategory, PatternMatch};
use crate::engine::visitor::DetectionContext;

const AUTH_DECORATORS: &[&str] = &[
    "authenticated", "authorize", "requireauth", "loginrequired", "permissionrequired",
    "useguards", "secured", "preauthorize", "roles",
];

pub struct AuthDetector;

impl Detector for AuthDetector {
    fn id(&self) -> &str {
        "auth-base"
    }
    fn category(&self) -> DetectorCategory {
        DetectorCategory::Auth
    }
    fn variant(&self) -> DetectorVariant {
        DetectorVariant::Base
    }
    fn is_critical(&self) -> bool {
        true
    }

    fn detect(&self, ctx: &DetectionContext) -> Vec<PatternMatch> {
        let mut matches = Vec::new();
        let any_guarded = ctx.functions.iter().any(|f| {
            f.decorators
                .iter()
                .any(|d| AUTH_DECORATORS.contains(&d.name.to_lowercase().as_str()))
        });
        if !any_guarded {
            return matches;
        }

        for class in ctx.classes {
            let is_controller = class.decorators.iter().any(|d| {
                let dl = d.name.to_lowercase();
                dl.contains("controller") || dl.contains("resource") || dl.contains("resolver")
            });
            if !is_controller {
                continue;
            }
            for method in &class.methods {
                let guarded = method
                    .decorators
                    .iter()
                    .any(|d| AUTH_DECORATORS.contains(&d.name.to_lowercase().as_str()));
                if !guarded {
                    matches.push(PatternMatch {
                        file: ctx.file.to_string(),
                        line: method.line,
                        column: 0,
                        pattern_id: "AUTH-MISSING-001".to_string(),
                        confidence: 0.45,
                        cwe_ids: SmallVec::from_buf([862, 0]),
                        owasp: Some("A01:2021".to_string()),
                        detection_method: DetectionMethod::AstVisitor,
                        category: PatternCategory::Auth,
                        matched_text: format!("{}.{} — no auth guard, unlike sibling handlers", class.name, method.name),
                    });
                }
            }
        }
        matches
    }
}
