//! Core temporal-memory domain types: `BaseMemory`, its typed content
//! payloads, and the small value types (`Confidence`, `Importance`) that
//! compose it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of knowledge a memory represents. Drives which `TypedContent`
/// variant it carries and how replay/retrieval treat it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryType {
    /// A single interaction/outcome, the rawest form of memory.
    Episodic,
    /// A generalized, reusable statement distilled from episodes.
    Semantic,
    /// A how-to: steps for accomplishing something.
    Procedural,
    /// A foundational fact the agent treats as durable ground truth.
    Core,
    /// A decision that was made.
    Decision,
    /// The context/options considered around a decision.
    DecisionContext,
    /// A pointer to external material (docs, issues, code).
    Reference,
    /// The rationale behind an adopted pattern.
    PatternRationale,
    /// A rule or boundary the agent must respect.
    Constraint,
    /// A raw observation about the system under study.
    Observation,
    /// A stated preference (style, tooling, process).
    Preference,
}

/// Confidence posterior mean in `[0, 1]`. Unlike CG's Beta-distribution
/// pattern confidence, TM confidence is a plain scalar updated directly by
/// events (`ConfidenceChanged`).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Confidence(f64);

impl Confidence {
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Serialize for Confidence {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_f64(self.0)
    }
}

impl<'de> Deserialize<'de> for Confidence {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = f64::deserialize(deserializer)?;
        Ok(Confidence::new(raw))
    }
}

/// Subjective importance, used to weight retrieval and snapshot priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    Low,
    Medium,
    High,
    Critical,
}

/// A memory linked to a CG pattern by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternLink {
    pub pattern_id: String,
    pub pattern_name: String,
}

/// A memory linked to a CG constraint/violation rule by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintLink {
    pub constraint_id: String,
    pub constraint_name: String,
}

/// A memory linked to a specific file and line range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileLink {
    pub file_path: String,
    pub line_start: i64,
    pub line_end: i64,
    pub content_hash: String,
}

/// A memory linked to a specific function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionLink {
    pub function_name: String,
    pub file_path: String,
    pub signature: String,
}

/// A raw interaction and its outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodicContent {
    pub interaction: String,
    pub context: String,
    pub outcome: Option<String>,
}

/// A distilled, reusable statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticContent {
    pub statement: String,
    pub category: Option<String>,
}

/// A procedure: a named sequence of steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProceduralContent {
    pub procedure: String,
    pub steps: Vec<String>,
}

/// A foundational, durable fact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreContent {
    pub statement: String,
}

/// A decision and the reasoning behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionContent {
    pub decision: String,
    pub rationale: String,
}

/// The context/options considered when a decision was made.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionContextContent {
    pub decision: String,
    pub context: String,
}

/// A pointer to external material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceContent {
    pub title: String,
    pub url: Option<String>,
    pub excerpt: Option<String>,
}

/// The rationale behind an adopted pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternRationaleContent {
    pub pattern_name: String,
    pub rationale: String,
}

/// A rule or boundary the agent must respect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintContent {
    pub rule: String,
    pub scope: Option<String>,
}

/// A raw observation about the system under study.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationContent {
    pub observation: String,
    pub source: Option<String>,
}

/// A stated preference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceContent {
    pub preference: String,
    pub scope: Option<String>,
}

/// The typed payload of a memory. The variant must match the memory's
/// `MemoryType`; `row_to_base_memory` and `insert_memory` rely on this
/// invariant holding (enforced by constructors in practice, not the type
/// system, since the two are stored as separate columns).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TypedContent {
    Episodic(EpisodicContent),
    Semantic(SemanticContent),
    Procedural(ProceduralContent),
    Core(CoreContent),
    Decision(DecisionContent),
    DecisionContext(DecisionContextContent),
    Reference(ReferenceContent),
    PatternRationale(PatternRationaleContent),
    Constraint(ConstraintContent),
    Observation(ObservationContent),
    Preference(PreferenceContent),
}

/// The bitemporal unit of knowledge: what the system believes, when it
/// started believing it, when it recorded that belief, and its provenance
/// links into the codebase-intelligence graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseMemory {
    pub id: String,
    pub memory_type: MemoryType,
    pub content: TypedContent,
    pub summary: String,
    /// When this state was recorded (system/transaction time).
    pub transaction_time: DateTime<Utc>,
    /// When this state became true in the world (valid time).
    pub valid_time: DateTime<Utc>,
    /// When this state stopped being true, if it has.
    pub valid_until: Option<DateTime<Utc>>,
    pub confidence: Confidence,
    pub importance: Importance,
    pub last_accessed: DateTime<Utc>,
    pub access_count: u64,
    pub linked_patterns: Vec<PatternLink>,
    pub linked_constraints: Vec<ConstraintLink>,
    pub linked_files: Vec<FileLink>,
    pub linked_functions: Vec<FunctionLink>,
    pub tags: Vec<String>,
    pub archived: bool,
    pub superseded_by: Option<String>,
    pub supersedes: Option<String>,
    pub content_hash: String,
}
