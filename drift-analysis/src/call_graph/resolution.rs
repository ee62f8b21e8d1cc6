//! CG.Resolver (spec.md §4.4) — resolves call sites to callee functions
//! through a fixed confidence-ordered strategy chain: same-file (1.0),
//! method (0.9), DI injection (0.85, handled by `di_support` as a
//! fallback), import (0.8), export (0.7), fuzzy (≤0.5).

use drift_core::types::collections::FxHashMap;

use crate::parsers::types::{CallSite, ImportInfo};

use super::types::Resolution;

/// Attempt to resolve one call site using the non-DI strategies, in
/// confidence order. DI resolution (`di_support::resolve_di_injection`) is
/// tried by the caller only if this returns `None`.
pub fn resolve_call(
    call_site: &CallSite,
    file: &str,
    caller_language: &str,
    imports: &[ImportInfo],
    name_index: &FxHashMap<String, Vec<String>>,
    qualified_index: &FxHashMap<String, String>,
    export_index: &FxHashMap<String, Vec<String>>,
    language_index: &FxHashMap<String, String>,
) -> Option<(String, Resolution)> {
    let callee = call_site.callee_name.as_str();
    let same_file_prefix = format!("{file}::");

    // Strategy 1: Direct, same-file call.
    if call_site.receiver.is_none() {
        if let Some(keys) = name_index.get(callee) {
            if let Some(key) = keys.iter().find(|k| k.starts_with(&same_file_prefix)) {
                return Some((key.clone(), Resolution::SameFile));
            }
        }
    }

    // Strategy 2: Method call, resolved via `Class.method` qualified index.
    if call_site.receiver.is_some() || call_site.call_kind == "method" {
        if let Some(key) = qualified_index.get(callee) {
            return Some((key.clone(), Resolution::Method));
        }
    }

    // Strategy 3 (DI) is tried by the caller between here and Strategy 4.

    // Strategy 4: Resolved via an explicit import of the callee's name.
    let imported = imports.iter().any(|imp| {
        imp.specifiers
            .iter()
            .any(|spec| spec.alias.as_deref().unwrap_or(spec.name.as_str()) == callee)
    });
    if imported {
        if let Some(keys) = name_index.get(callee) {
            if let Some(key) = keys.first() {
                return Some((key.clone(), Resolution::Import));
            }
        }
    }

    // Strategy 5: Resolved via a cross-file export with no direct import.
    if let Some(keys) = export_index.get(callee) {
        if let Some(key) = keys.first() {
            return Some((key.clone(), Resolution::Export));
        }
    }

    // Strategy 6: Fuzzy — a unique name match anywhere in the same
    // language, with no structural evidence it's actually the right one.
    if let Some(keys) = name_index.get(callee) {
        let same_language: Vec<&String> = keys
            .iter()
            .filter(|k| language_index.get(*k).map(|l| l.as_str()) == Some(caller_language))
            .collect();
        if same_language.len() == 1 {
            return Some((same_language[0].clone(), Resolution::Fuzzy));
        }
        if keys.len() == 1 {
            return Some((keys[0].clone(), Resolution::Fuzzy));
        }
    }

    None
}

/// Per-language resolved/total call-site counters, used to warn when a
/// language's resolution rate is suspiciously low (CG-RES-12).
#[derive(Debug, Default)]
pub struct ResolutionDiagnostics {
    per_language: FxHashMap<String, (usize, usize)>,
}

impl ResolutionDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, resolution: Option<&Resolution>, language: &str) {
        let entry = self.per_language.entry(language.to_string()).or_insert((0, 0));
        entry.1 += 1;
        if resolution.is_some() {
            entry.0 += 1;
        }
    }

    /// Languages with at least 10 call sites and a resolution rate below 50%.
    pub fn low_resolution_warnings(&self) -> Vec<String> {
        self.per_language
            .iter()
            .filter_map(|(lang, (resolved, total))| {
                if *total >= 10 && (*resolved as f64 / *total as f64) < 0.5 {
                    Some(format!(
                        "low call resolution rate for {lang}: {resolved}/{total} ({:.0}%)",
                        *resolved as f64 / *total as f64 * 100.0
                    ))
                } else {
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::types::ImportSpecifier;

    fn site(callee: &str, receiver: Option<&str>, call_kind: &'static str) -> CallSite {
        CallSite {
            caller_name: "caller".into(),
            callee_name: callee.into(),
            receiver: receiver.map(|s| s.to_string()),
            line: 1,
            column: 0,
            call_kind,
        }
    }

    #[test]
    fn resolves_same_file_direct_call() {
        let mut name_index = FxHashMap::default();
        name_index.insert("helper".to_string(), vec!["a.ts::helper".to_string()]);
        let result = resolve_call(
            &site("helper", None, "direct"),
            "a.ts",
            "TypeScript",
            &[],
            &name_index,
            &FxHashMap::default(),
            &FxHashMap::default(),
            &FxHashMap::default(),
        );
        assert_eq!(result, Some(("a.ts::helper".to_string(), Resolution::SameFile)));
    }

    #[test]
    fn resolves_method_via_qualified_index() {
        let mut qualified_index = FxHashMap::default();
        qualified_index.insert("save".to_string(), "repo.ts::Repo.save".to_string());
        let result = resolve_call(
            &site("save", Some("repo"), "method"),
            "a.ts",
            "TypeScript",
            &[],
            &FxHashMap::default(),
            &qualified_index,
            &FxHashMap::default(),
            &FxHashMap::default(),
        );
        assert_eq!(result, Some(("repo.ts::Repo.save".to_string(), Resolution::Method)));
    }

    #[test]
    fn resolves_import_over_fuzzy() {
        let mut name_index = FxHashMap::default();
        name_index.insert("build".to_string(), vec!["other.ts::build".to_string()]);
        let imports = vec![ImportInfo {
            source: "./other".into(),
            specifiers: vec![ImportSpecifier {
                name: "build".into(),
                alias: None,
            }],
            alias: None,
            line: 1,
        }];
        let result = resolve_call(
            &site("build", None, "direct"),
            "a.ts",
            "TypeScript",
            &imports,
            &name_index,
            &FxHashMap::default(),
            &FxHashMap::default(),
            &FxHashMap::default(),
        );
        assert_eq!(result, Some(("other.ts::build".to_string(), Resolution::Import)));
    }

    #[test]
    fn returns_none_when_unresolvable() {
        let result = resolve_call(
            &site("ghost", None, "direct"),
            "a.ts",
            "TypeScript",
            &[],
            &FxHashMap::default(),
            &FxHashMap::default(),
            &FxHashMap::default(),
            &FxHashMap::default(),
        );
        assert_eq!(result, None);
    }

    #[test]
    fn low_resolution_warning_fires_below_half() {
        let mut diag = ResolutionDiagnostics::new();
        for _ in 0..3 {
            diag.record(Some(&Resolution::SameFile), "Go");
        }
        for _ in 0..8 {
            diag.record(None, "Go");
        }
        let warnings = diag.low_resolution_warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Go"));
    }
}
