//! `IDriftStructural` trait — coupling metrics, impact scoring, reachability
//! cache, and data-access boundary records.
//!
//! Maps to `drift-storage/src/queries/structural.rs`, `queries/data_access.rs`,
//! and the graph-intelligence tables in `queries/graph.rs`.

use crate::errors::StorageError;
use std::sync::Arc;

// ─── Row Types ──────────────────────────────────────────────────────

/// `Ca`/`Ce`/instability/abstractness/distance for one module (spec.md §4.6).
#[derive(Debug, Clone)]
pub struct CouplingMetricsRow {
    pub module: String,
    pub ce: u32,
    pub ca: u32,
    pub instability: f64,
    pub abstractness: f64,
    pub distance: f64,
    pub zone: String,
}

/// A Tarjan-detected dependency cycle, severity bucketed by member count.
#[derive(Debug, Clone)]
pub struct CouplingCycleRow {
    pub id: i64,
    pub members: String,
    pub break_suggestions: String,
    pub created_at: i64,
}

/// A `DATA_ACCESS` record (spec.md §3).
#[derive(Debug, Clone)]
pub struct DataAccessRow {
    pub id: Option<i64>,
    pub function_id: i64,
    pub table_name: String,
    pub operation: String,
    pub fields: String,
    pub orm: Option<String>,
    pub line: i64,
    pub confidence: f64,
}

/// A computed `SENSITIVE_FIELD` classification (spec.md §3 — derived, not
/// ingested).
#[derive(Debug, Clone)]
pub struct SensitiveFieldRow {
    pub table_name: String,
    pub field_name: String,
    pub category: String,
    pub specificity: f64,
}

/// Cached reachability result, keyed by source node and traversal direction
/// (spec.md §4.5).
#[derive(Debug, Clone)]
pub struct ReachabilityCacheRow {
    pub source_node: String,
    pub direction: String,
    pub reachable_set: String,
    pub sensitivity: String,
}

/// A reverse-BFS impact/blast-radius score for one function (spec.md §4.6).
#[derive(Debug, Clone)]
pub struct ImpactScoreRow {
    pub function_id: i64,
    pub affected_count: u32,
    pub entry_point_hits: u32,
    pub sensitive_paths: u32,
    pub depth: u32,
    pub risk_score: f64,
    pub risk_bucket: String,
}

// ─── Trait ───────────────────────────────────────────────────────────

/// Structural intelligence storage operations: coupling, data access,
/// sensitive-field classification, reachability cache, impact scores.
pub trait IDriftStructural: Send + Sync {
    // ── coupling_metrics ──

    fn upsert_coupling_metrics(&self, row: &CouplingMetricsRow) -> Result<(), StorageError>;
    fn get_coupling_metrics(&self, module: &str) -> Result<Option<CouplingMetricsRow>, StorageError>;
    fn get_all_coupling_metrics(&self) -> Result<Vec<CouplingMetricsRow>, StorageError>;
    fn get_coupling_metrics_by_zone(&self, zone: &str) -> Result<Vec<CouplingMetricsRow>, StorageError>;

    // ── coupling_cycles ──

    fn insert_coupling_cycle(&self, members: &str, break_suggestions: &str) -> Result<(), StorageError>;
    fn query_coupling_cycles(&self) -> Result<Vec<CouplingCycleRow>, StorageError>;

    // ── data_access ──

    fn insert_data_access(&self, row: &DataAccessRow) -> Result<(), StorageError>;
    fn insert_data_access_batch(&self, rows: &[DataAccessRow]) -> Result<usize, StorageError>;
    fn query_data_access_by_function(&self, function_id: i64) -> Result<Vec<DataAccessRow>, StorageError>;
    fn query_data_access_by_table(&self, table_name: &str) -> Result<Vec<DataAccessRow>, StorageError>;
    fn delete_data_access_by_function(&self, function_id: i64) -> Result<usize, StorageError>;
    fn count_data_access(&self) -> Result<i64, StorageError>;

    // ── sensitive_fields (computed) ──

    fn upsert_sensitive_field(&self, row: &SensitiveFieldRow) -> Result<(), StorageError>;
    fn get_sensitive_fields_by_table(&self, table_name: &str) -> Result<Vec<SensitiveFieldRow>, StorageError>;
    fn get_all_sensitive_fields(&self) -> Result<Vec<SensitiveFieldRow>, StorageError>;

    // ── reachability_cache ──

    fn upsert_reachability(&self, row: &ReachabilityCacheRow) -> Result<(), StorageError>;
    fn get_reachability(&self, source_node: &str, direction: &str) -> Result<Option<ReachabilityCacheRow>, StorageError>;
    fn clear_reachability_cache(&self) -> Result<(), StorageError>;

    // ── impact_scores ──

    fn upsert_impact_score(&self, row: &ImpactScoreRow) -> Result<(), StorageError>;
    fn get_impact_score(&self, function_id: i64) -> Result<Option<ImpactScoreRow>, StorageError>;
}

// ─── Arc blanket impl ───────────────────────────────────────────────

impl<T: IDriftStructural + ?Sized> IDriftStructural for Arc<T> {
    fn upsert_coupling_metrics(&self, row: &CouplingMetricsRow) -> Result<(), StorageError> { (**self).upsert_coupling_metrics(row) }
    fn get_coupling_metrics(&self, module: &str) -> Result<Option<CouplingMetricsRow>, StorageError> { (**self).get_coupling_metrics(module) }
    fn get_all_coupling_metrics(&self) -> Result<Vec<CouplingMetricsRow>, StorageError> { (**self).get_all_coupling_metrics() }
    fn get_coupling_metrics_by_zone(&self, zone: &str) -> Result<Vec<CouplingMetricsRow>, StorageError> { (**self).get_coupling_metrics_by_zone(zone) }
    fn insert_coupling_cycle(&self, members: &str, break_suggestions: &str) -> Result<(), StorageError> { (**self).insert_coupling_cycle(members, break_suggestions) }
    fn query_coupling_cycles(&self) -> Result<Vec<CouplingCycleRow>, StorageError> { (**self).query_coupling_cycles() }
    fn insert_data_access(&self, row: &DataAccessRow) -> Result<(), StorageError> { (**self).insert_data_access(row) }
    fn insert_data_access_batch(&self, rows: &[DataAccessRow]) -> Result<usize, StorageError> { (**self).insert_data_access_batch(rows) }
    fn query_data_access_by_function(&self, fid: i64) -> Result<Vec<DataAccessRow>, StorageError> { (**self).query_data_access_by_function(fid) }
    fn query_data_access_by_table(&self, tbl: &str) -> Result<Vec<DataAccessRow>, StorageError> { (**self).query_data_access_by_table(tbl) }
    fn delete_data_access_by_function(&self, fid: i64) -> Result<usize, StorageError> { (**self).delete_data_access_by_function(fid) }
    fn count_data_access(&self) -> Result<i64, StorageError> { (**self).count_data_access() }
    fn upsert_sensitive_field(&self, row: &SensitiveFieldRow) -> Result<(), StorageError> { (**self).upsert_sensitive_field(row) }
    fn get_sensitive_fields_by_table(&self, tbl: &str) -> Result<Vec<SensitiveFieldRow>, StorageError> { (**self).get_sensitive_fields_by_table(tbl) }
    fn get_all_sensitive_fields(&self) -> Result<Vec<SensitiveFieldRow>, StorageError> { (**self).get_all_sensitive_fields() }
    fn upsert_reachability(&self, row: &ReachabilityCacheRow) -> Result<(), StorageError> { (**self).upsert_reachability(row) }
    fn get_reachability(&self, sn: &str, dir: &str) -> Result<Option<ReachabilityCacheRow>, StorageError> { (**self).get_reachability(sn, dir) }
    fn clear_reachability_cache(&self) -> Result<(), StorageError> { (**self).clear_reachability_cache() }
    fn upsert_impact_score(&self, row: &ImpactScoreRow) -> Result<(), StorageError> { (**self).upsert_impact_score(row) }
    fn get_impact_score(&self, function_id: i64) -> Result<Option<ImpactScoreRow>, StorageError> { (**self).get_impact_score(function_id) }
}
