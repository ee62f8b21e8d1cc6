//! Convention discovery types: what a learned convention looks like, its
//! lifecycle status, where it applies, and how discovered conventions are
//! persisted across scans.

use std::collections::HashMap;

use crate::patterns::confidence::types::ConfidenceScore;

/// How broadly a convention has taken hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConventionCategory {
    /// Dominant across nearly the whole project.
    Universal,
    /// Rising momentum, not yet dominant.
    Emerging,
    /// Falling momentum — was once common, now fading.
    Legacy,
    /// Settled, but scoped to part of the project.
    ProjectSpecific,
    /// No single variant dominates its category.
    Contested,
}

/// Where in the project tree a convention applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConventionScope {
    Project,
    Directory(String),
}

/// Lifecycle status of a discovered convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromotionStatus {
    Discovered,
    Approved,
    Rejected,
    Expired,
}

/// A learned convention: a pattern that has been observed enough to be
/// treated as a project-level rule rather than a one-off detection.
#[derive(Debug, Clone)]
pub struct Convention {
    pub id: String,
    pub pattern_id: String,
    pub category: ConventionCategory,
    pub scope: ConventionScope,
    pub confidence_score: ConfidenceScore,
    pub dominance_ratio: f64,
    pub discovery_date: u64,
    pub last_seen: u64,
    pub promotion_status: PromotionStatus,
    pub observation_count: u64,
    pub scan_count: u64,
}

impl Convention {
    /// How settled this convention's confidence estimate is: `1 -
    /// credible_interval_width`, clamped to `[0, 1]`. A narrow interval
    /// (many consistent observations) converges toward 1.
    pub fn convergence_score(&self) -> f64 {
        (1.0 - self.confidence_score.credible_interval_width()).clamp(0.0, 1.0)
    }
}

/// Tunables for convention discovery.
#[derive(Debug, Clone, Copy)]
pub struct LearningConfig {
    /// Minimum deduplicated location count to consider a pattern at all.
    pub min_occurrences: u64,
    /// Minimum distinct files to consider a pattern at all.
    pub min_files: u64,
    /// Minimum within-category dominance ratio before checking contested status.
    pub dominance_threshold: f64,
    /// Dirichlet-posterior-spread threshold above which a category is contested.
    pub contested_threshold: f64,
    /// Minimum file-spread ratio (file_spread / total_files) for Universal.
    pub universal_spread_threshold: f64,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            min_occurrences: 5,
            min_files: 2,
            dominance_threshold: 0.6,
            contested_threshold: 0.5,
            universal_spread_threshold: 0.7,
        }
    }
}

/// Aggregate counts over a batch of discovered conventions.
#[derive(Debug, Clone)]
pub struct LearningDiagnostics {
    pub total_conventions: usize,
    pub per_category: HashMap<ConventionCategory, usize>,
    pub per_status: HashMap<PromotionStatus, usize>,
}

impl LearningDiagnostics {
    pub fn from_conventions(conventions: &[Convention]) -> Self {
        let mut per_category: HashMap<ConventionCategory, usize> = HashMap::new();
        let mut per_status: HashMap<PromotionStatus, usize> = HashMap::new();
        for c in conventions {
            *per_category.entry(c.category).or_insert(0) += 1;
            *per_status.entry(c.promotion_status).or_insert(0) += 1;
        }
        Self {
            total_conventions: conventions.len(),
            per_category,
            per_status,
        }
    }
}

/// Persistence boundary for discovered conventions across scans.
pub trait ConventionStore {
    fn load_all(&self) -> Vec<Convention>;
    fn load_by_pattern_id(&self, pattern_id: &str) -> Option<Convention>;
    fn save(&mut self, convention: &Convention);
}

/// An in-memory `ConventionStore`, keyed by `pattern_id`. The reference
/// implementation tests exercise; a real deployment would back this with
/// `drift-storage`.
#[derive(Debug, Default)]
pub struct InMemoryConventionStore {
    by_pattern_id: HashMap<String, Convention>,
}

impl InMemoryConventionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.by_pattern_id.is_empty()
    }

    pub fn len(&self) -> usize {
        self.by_pattern_id.len()
    }
}

impl ConventionStore for InMemoryConventionStore {
    fn load_all(&self) -> Vec<Convention> {
        self.by_pattern_id.values().cloned().collect()
    }

    fn load_by_pattern_id(&self, pattern_id: &str) -> Option<Convention> {
        self.by_pattern_id.get(pattern_id).cloned()
    }

    fn save(&mut self, convention: &Convention) {
        self.by_pattern_id.insert(convention.pattern_id.clone(), convention.clone());
    }
}
