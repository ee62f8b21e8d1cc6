//! Taint label, source/sink/sanitizer vocabulary shared by `propagation`.

use serde::{Deserialize, Serialize};

/// Where a tainted value entered the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceType {
    UserInput,
    NetworkRequest,
    FileSystem,
    Environment,
    Database,
    Other,
}

/// A CWE-mapped sink a tainted value can reach unsafely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SinkType {
    SqlInjection,
    CommandInjection,
    PathTraversal,
    Xss,
    LogInjection,
    Other,
}

/// A transformation that neutralizes taint for one or more sink types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SanitizerType {
    Escaping,
    Parameterization,
    Validation,
    Encoding,
    Other,
}

/// A taint label attached to a variable, tracking which sanitizers have
/// already been applied to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaintLabel {
    pub id: u64,
    pub source_type: SourceType,
    pub applied_sanitizers: Vec<SanitizerType>,
    pub sanitized: bool,
}

impl TaintLabel {
    pub fn new(id: u64, source_type: SourceType) -> Self {
        Self {
            id,
            source_type,
            applied_sanitizers: Vec::new(),
            sanitized: false,
        }
    }

    pub fn has_sanitizer(&self, sanitizer: SanitizerType) -> bool {
        self.applied_sanitizers.contains(&sanitizer)
    }

    pub fn apply_sanitizer(&mut self, sanitizer: SanitizerType) {
        if !self.has_sanitizer(sanitizer) {
            self.applied_sanitizers.push(sanitizer);
        }
        self.sanitized = true;
    }
}

/// A sanitizer application site recorded during propagation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaintSanitizer {
    pub file: String,
    pub line: u32,
    pub expression: String,
    pub sanitizer_type: SanitizerType,
    pub labels_sanitized: Vec<SinkType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_tracks_applied_sanitizers() {
        let mut label = TaintLabel::new(1, SourceType::UserInput);
        assert!(!label.sanitized);
        label.apply_sanitizer(SanitizerType::Escaping);
        assert!(label.sanitized);
        assert!(label.has_sanitizer(SanitizerType::Escaping));
        assert!(!label.has_sanitizer(SanitizerType::Validation));
    }

    #[test]
    fn applying_same_sanitizer_twice_does_not_duplicate() {
        let mut label = TaintLabel::new(1, SourceType::NetworkRequest);
        label.apply_sanitizer(SanitizerType::Encoding);
        label.apply_sanitizer(SanitizerType::Encoding);
        assert_eq!(label.applied_sanitizers.len(), 1);
    }
}
