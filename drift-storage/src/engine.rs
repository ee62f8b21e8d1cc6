//! `DriftStorageEngine` — unified storage engine implementing all 6 drift
//! storage traits.
//!
//! Wraps `DatabaseManager` (read/write routing) + `BatchWriter` (bulk batch
//! writes for `CG.StreamingBuild`). Trait methods go straight through
//! `with_reader`/`with_writer`; `send_batch` is the separate bulk-throughput
//! path used by the scanner during a full or incremental scan.

use std::path::Path;
use std::sync::Arc;

use drift_core::errors::StorageError;
use drift_core::traits::storage::drift_analysis::{
    BoundaryRow, CallEdgeRow, ConventionRow as ConventionTraitRow, DetectionRow,
    DetectionSummaryRow, FunctionRow, IDriftAnalysis, OutlierRow as OutlierTraitRow,
    PatternConfidenceRow, ScanHistoryRow,
};
use drift_core::traits::storage::drift_batch::{IDriftBatchWriter, WriteStats};
use drift_core::traits::storage::drift_enforcement::{
    FeedbackRow, FeedbackStats, IDriftEnforcement, PatternStatusRow, ViolationRow,
};
use drift_core::traits::storage::drift_files::{FileMetadataRow, IDriftFiles, ParseCacheRow};
use drift_core::traits::storage::drift_structural::{
    CouplingCycleRow, CouplingMetricsRow, DataAccessRow, IDriftStructural, ImpactScoreRow,
    ReachabilityCacheRow, SensitiveFieldRow,
};
use drift_core::traits::storage::workspace::IWorkspaceStorage;
use drift_core::traits::storage::workspace_types::{
    BackupResult, GcStats, IntegrityResult, ProjectInfo, WorkspaceContext, WorkspaceStatus,
};

use crate::batch::BatchWriter;
use crate::batch::commands::BatchCommand;
use crate::connection::DatabaseManager;
use crate::queries;

pub struct DriftStorageEngine {
    db: DatabaseManager,
    batch: BatchWriter,
}

impl DriftStorageEngine {
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let db = DatabaseManager::open(path)?;
        let batch_conn = db.open_batch_connection()?;
        let batch = BatchWriter::new(batch_conn);
        Ok(Self { db, batch })
    }

    /// In-memory engine for tests. `DatabaseManager::open_in_memory` uses a
    /// named shared-cache URI so the batch writer's connection sees the same
    /// schema and rows as the reader connection.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let db = DatabaseManager::open_in_memory()?;
        let batch_conn = db.open_batch_connection()?;
        Ok(Self { db, batch: BatchWriter::new(batch_conn) })
    }

    pub fn send_batch(&self, command: BatchCommand) -> Result<(), StorageError> {
        self.batch.send(command)
    }

    pub fn flush_batch(&self) -> Result<(), StorageError> {
        self.batch.flush()
    }

    pub fn flush_batch_sync(&self) -> Result<WriteStats, StorageError> {
        self.batch.flush_sync()
    }

    pub fn checkpoint(&self) -> Result<(), StorageError> {
        self.db.checkpoint()
    }

    pub fn path(&self) -> Option<&Path> {
        self.db.path()
    }
}

fn sqe(e: impl std::fmt::Display) -> StorageError {
    StorageError::SqliteError { message: e.to_string() }
}

use rusqlite::Connection;

// ─── IDriftFiles ──────────────────────────────────────────────────────

impl IDriftFiles for DriftStorageEngine {
    fn load_all_file_metadata(&self) -> Result<Vec<FileMetadataRow>, StorageError> {
        self.db.with_reader(|c| queries::files::load_all_file_metadata(c))
            .map(|rs| rs.into_iter().map(Into::into).collect())
    }
    fn get_file_metadata(&self, path: &str) -> Result<Option<FileMetadataRow>, StorageError> {
        self.db.with_reader(|c| queries::files::get_file_metadata(c, path)).map(|r| r.map(Into::into))
    }
    fn update_function_count(&self, path: &str, count: i64) -> Result<(), StorageError> {
        self.db.with_writer(|c| queries::files::update_function_count(c, path, count))
    }
    fn update_file_error(&self, path: &str, error_count: i64, error_msg: Option<&str>) -> Result<(), StorageError> {
        self.db.with_writer(|c| queries::files::update_file_error(c, path, error_count, error_msg))
    }
    fn count_files(&self) -> Result<i64, StorageError> {
        self.db.with_reader(|c| queries::files::count_files(c))
    }
    fn get_parse_cache_by_hash(&self, content_hash: &[u8]) -> Result<Option<ParseCacheRow>, StorageError> {
        self.db.with_reader(|c| queries::parse_cache::get_parse_cache_by_hash(c, content_hash)).map(|r| r.map(Into::into))
    }
    fn insert_parse_cache(&self, content_hash: &[u8], language: &str, parse_result_json: &str, created_at: i64) -> Result<(), StorageError> {
        self.db.with_writer(|c| queries::parse_cache::insert_parse_cache(c, content_hash, language, parse_result_json, created_at))
    }
    fn invalidate_parse_cache(&self, content_hash: &[u8]) -> Result<(), StorageError> {
        self.db.with_writer(|c| queries::parse_cache::invalidate_parse_cache(c, content_hash))
    }
    fn count_parse_cache(&self) -> Result<i64, StorageError> {
        self.db.with_reader(|c| queries::parse_cache::count_parse_cache(c))
    }
}

impl From<queries::files::FileMetadataRecord> for FileMetadataRow {
    fn from(r: queries::files::FileMetadataRecord) -> Self {
        Self {
            path: r.path, language: r.language, file_size: r.file_size, content_hash: r.content_hash,
            mtime_secs: r.mtime_secs, mtime_nanos: r.mtime_nanos, last_scanned_at: r.last_scanned_at,
            scan_duration_us: r.scan_duration_us, pattern_count: r.pattern_count,
            function_count: r.function_count, error_count: r.error_count, error: r.error,
        }
    }
}

impl From<queries::parse_cache::ParseCacheRecord> for ParseCacheRow {
    fn from(r: queries::parse_cache::ParseCacheRecord) -> Self {
        Self { content_hash: r.content_hash, language: r.language, parse_result_json: r.parse_result_json, created_at: r.created_at }
    }
}

// ─── IDriftAnalysis ───────────────────────────────────────────────────

impl IDriftAnalysis for DriftStorageEngine {
    fn get_functions_by_file(&self, file: &str) -> Result<Vec<FunctionRow>, StorageError> {
        self.db.with_reader(|c| queries::functions::get_functions_by_file(c, file)).map(|rs| rs.into_iter().map(Into::into).collect())
    }
    fn get_function_by_qualified_name(&self, qualified_name: &str) -> Result<Option<FunctionRow>, StorageError> {
        self.db.with_reader(|c| queries::functions::get_function_by_qualified_name(c, qualified_name)).map(|r| r.map(Into::into))
    }
    fn delete_functions_by_file(&self, file: &str) -> Result<usize, StorageError> {
        self.db.with_writer(|c| queries::functions::delete_functions_by_file(c, file))
    }
    fn count_functions(&self) -> Result<i64, StorageError> {
        self.db.with_reader(|c| queries::functions::count_functions(c))
    }
    fn count_entry_points(&self) -> Result<i64, StorageError> {
        self.db.with_reader(|c| queries::functions::count_entry_points(c))
    }

    fn insert_detections(&self, detections: &[DetectionRow]) -> Result<usize, StorageError> {
        let records: Vec<_> = detections.iter().cloned().map(Into::into).collect();
        self.db.with_writer(|c| queries::detections::insert_detections(c, &records))
    }
    fn get_detections_by_file(&self, file: &str) -> Result<Vec<DetectionRow>, StorageError> {
        self.db.with_reader(|c| queries::detections::get_detections_by_file(c, file)).map(|rs| rs.into_iter().map(Into::into).collect())
    }
    fn get_detections_by_category(&self, category: &str) -> Result<Vec<DetectionRow>, StorageError> {
        self.db.with_reader(|c| queries::detections::get_detections_by_category(c, category)).map(|rs| rs.into_iter().map(Into::into).collect())
    }
    fn query_all_detections(&self, limit: usize) -> Result<Vec<DetectionRow>, StorageError> {
        self.db.with_reader(|c| queries::detections::query_all_detections(c, limit)).map(|rs| rs.into_iter().map(Into::into).collect())
    }
    fn delete_detections_by_file(&self, file: &str) -> Result<usize, StorageError> {
        self.db.with_writer(|c| queries::detections::delete_detections_by_file(c, file))
    }
    fn count_detections(&self) -> Result<i64, StorageError> {
        self.db.with_reader(|c| queries::detections::count_detections(c))
    }
    fn get_detections_by_method(&self, method: &str) -> Result<Vec<DetectionRow>, StorageError> {
        self.db.with_reader(|c| queries::detections::get_detections_by_method(c, method)).map(|rs| rs.into_iter().map(Into::into).collect())
    }
    fn get_detections_by_pattern_prefix(&self, prefix: &str) -> Result<Vec<DetectionRow>, StorageError> {
        self.db.with_reader(|c| queries::detections::get_detections_by_pattern_prefix(c, prefix)).map(|rs| rs.into_iter().map(Into::into).collect())
    }
    fn get_detections_by_cwe(&self, cwe_id: u32) -> Result<Vec<DetectionRow>, StorageError> {
        self.db.with_reader(|c| queries::detections::get_detections_by_cwe(c, cwe_id)).map(|rs| rs.into_iter().map(Into::into).collect())
    }
    fn get_framework_detection_summary(&self) -> Result<Vec<DetectionSummaryRow>, StorageError> {
        self.db.with_reader(|c| queries::detections::get_framework_detection_summary(c)).map(|rs| rs.into_iter().map(Into::into).collect())
    }

    fn upsert_confidence(&self, row: &PatternConfidenceRow) -> Result<(), StorageError> {
        self.db.with_writer(|c| queries::patterns::upsert_confidence(c, &row.clone().into()))
    }
    fn query_confidence_by_tier(&self, tier: &str, after_id: Option<&str>, limit: usize) -> Result<Vec<PatternConfidenceRow>, StorageError> {
        self.db.with_reader(|c| queries::patterns::query_confidence_by_tier(c, tier, after_id, limit)).map(|rs| rs.into_iter().map(Into::into).collect())
    }
    fn query_all_confidence(&self) -> Result<Vec<PatternConfidenceRow>, StorageError> {
        self.db.with_reader(|c| queries::patterns::query_all_confidence(c)).map(|rs| rs.into_iter().map(Into::into).collect())
    }
    fn insert_outlier(&self, row: &OutlierTraitRow) -> Result<(), StorageError> {
        self.db.with_writer(|c| queries::patterns::insert_outlier(c, &row.clone().into()))
    }
    fn query_outliers_by_pattern(&self, pattern_id: &str) -> Result<Vec<OutlierTraitRow>, StorageError> {
        self.db.with_reader(|c| queries::patterns::query_outliers_by_pattern(c, pattern_id)).map(|rs| rs.into_iter().map(Into::into).collect())
    }
    fn insert_convention(&self, row: &ConventionTraitRow) -> Result<(), StorageError> {
        self.db.with_writer(|c| queries::patterns::insert_convention(c, &row.clone().into()))
    }
    fn query_conventions_by_category(&self, category: &str) -> Result<Vec<ConventionTraitRow>, StorageError> {
        self.db.with_reader(|c| queries::patterns::query_conventions_by_category(c, category)).map(|rs| rs.into_iter().map(Into::into).collect())
    }
    fn query_all_conventions(&self) -> Result<Vec<ConventionTraitRow>, StorageError> {
        self.db.with_reader(|c| queries::patterns::query_all_conventions(c)).map(|rs| rs.into_iter().map(Into::into).collect())
    }

    fn insert_boundaries(&self, boundaries: &[BoundaryRow]) -> Result<usize, StorageError> {
        let records: Vec<_> = boundaries.iter().cloned().map(Into::into).collect();
        self.db.with_writer(|c| queries::boundaries::insert_boundaries(c, &records))
    }
    fn get_boundaries_by_file(&self, file: &str) -> Result<Vec<BoundaryRow>, StorageError> {
        self.db.with_reader(|c| queries::boundaries::get_boundaries_by_file(c, file)).map(|rs| rs.into_iter().map(Into::into).collect())
    }
    fn get_boundaries_by_framework(&self, framework: &str) -> Result<Vec<BoundaryRow>, StorageError> {
        self.db.with_reader(|c| queries::boundaries::get_boundaries_by_framework(c, framework)).map(|rs| rs.into_iter().map(Into::into).collect())
    }
    fn get_sensitive_boundaries(&self) -> Result<Vec<BoundaryRow>, StorageError> {
        self.db.with_reader(|c| queries::boundaries::get_sensitive_boundaries(c)).map(|rs| rs.into_iter().map(Into::into).collect())
    }
    fn delete_boundaries_by_file(&self, file: &str) -> Result<usize, StorageError> {
        self.db.with_writer(|c| queries::boundaries::delete_boundaries_by_file(c, file))
    }
    fn count_boundaries(&self) -> Result<i64, StorageError> {
        self.db.with_reader(|c| queries::boundaries::count_boundaries(c))
    }

    fn insert_call_edges(&self, edges: &[CallEdgeRow]) -> Result<usize, StorageError> {
        let records: Vec<_> = edges.iter().cloned().map(Into::into).collect();
        self.db.with_writer(|c| queries::call_edges::insert_call_edges(c, &records))
    }
    fn get_edges_by_caller(&self, caller_id: i64) -> Result<Vec<CallEdgeRow>, StorageError> {
        self.db.with_reader(|c| queries::call_edges::get_edges_by_caller(c, caller_id)).map(|rs| rs.into_iter().map(Into::into).collect())
    }
    fn get_edges_by_callee(&self, callee_id: i64) -> Result<Vec<CallEdgeRow>, StorageError> {
        self.db.with_reader(|c| queries::call_edges::get_edges_by_callee(c, callee_id)).map(|rs| rs.into_iter().map(Into::into).collect())
    }
    fn delete_edges_by_file(&self, file: &str) -> Result<usize, StorageError> {
        self.db.with_writer(|c| queries::call_edges::delete_edges_by_file(c, file))
    }
    fn get_unresolved_edges(&self) -> Result<Vec<CallEdgeRow>, StorageError> {
        self.db.with_reader(|c| queries::call_edges::get_unresolved_edges(c)).map(|rs| rs.into_iter().map(Into::into).collect())
    }
    fn resolve_call_edge(&self, caller_id: i64, call_site_line: i64, callee_name: &str, callee_id: i64, resolution: &str, confidence: f64) -> Result<(), StorageError> {
        self.db.with_writer(|c| queries::call_edges::resolve_call_edge(c, caller_id, call_site_line, callee_name, callee_id, resolution, confidence))
    }
    fn count_call_edges(&self) -> Result<i64, StorageError> {
        self.db.with_reader(|c| queries::call_edges::count_call_edges(c))
    }
    fn count_resolved_edges(&self) -> Result<i64, StorageError> {
        self.db.with_reader(|c| queries::call_edges::count_resolved_edges(c))
    }

    fn insert_scan_start(&self, started_at: i64, root_path: &str) -> Result<i64, StorageError> {
        self.db.with_writer(|c| queries::scan_history::insert_scan_start(c, started_at, root_path))
    }
    fn update_scan_complete(&self, id: i64, completed_at: i64, total_files: i64, added_files: i64, modified_files: i64, removed_files: i64, unchanged_files: i64, duration_ms: i64, status: &str, error: Option<&str>) -> Result<(), StorageError> {
        self.db.with_writer(|c| queries::scan_history::update_scan_complete(c, id, completed_at, total_files, added_files, modified_files, removed_files, unchanged_files, duration_ms, status, error))
    }
    fn query_recent_scans(&self, limit: usize) -> Result<Vec<ScanHistoryRow>, StorageError> {
        self.db.with_reader(|c| queries::scan_history::query_recent_scans(c, limit)).map(|rs| rs.into_iter().map(Into::into).collect())
    }
    fn count_scans(&self) -> Result<i64, StorageError> {
        self.db.with_reader(|c| queries::scan_history::count_scans(c))
    }
}

impl From<queries::functions::FunctionRecord> for FunctionRow {
    fn from(r: queries::functions::FunctionRecord) -> Self {
        Self {
            id: r.id, file: r.file, name: r.name, qualified_name: r.qualified_name, language: r.language,
            line: r.line, end_line: r.end_line, parameter_count: r.parameter_count, return_type: r.return_type,
            is_exported: r.is_exported, is_async: r.is_async, body_hash: r.body_hash, signature_hash: r.signature_hash,
        }
    }
}

impl From<DetectionRow> for queries::detections::DetectionRecord {
    fn from(r: DetectionRow) -> Self {
        Self {
            id: r.id, file: r.file, line: r.line, column_num: r.column_num, pattern_id: r.pattern_id,
            category: r.category, confidence: r.confidence, detection_method: r.detection_method,
            cwe_ids: r.cwe_ids, owasp: r.owasp, matched_text: r.matched_text, created_at: r.created_at,
        }
    }
}
impl From<queries::detections::DetectionRecord> for DetectionRow {
    fn from(r: queries::detections::DetectionRecord) -> Self {
        Self {
            id: r.id, file: r.file, line: r.line, column_num: r.column_num, pattern_id: r.pattern_id,
            category: r.category, confidence: r.confidence, detection_method: r.detection_method,
            cwe_ids: r.cwe_ids, owasp: r.owasp, matched_text: r.matched_text, created_at: r.created_at,
        }
    }
}
impl From<queries::detections::DetectionSummaryRow> for DetectionSummaryRow {
    fn from(r: queries::detections::DetectionSummaryRow) -> Self {
        Self { detection_method: r.detection_method, count: r.count, avg_confidence: r.avg_confidence }
    }
}

impl From<PatternConfidenceRow> for queries::patterns::PatternConfidenceRow {
    fn from(r: PatternConfidenceRow) -> Self {
        Self {
            pattern_id: r.pattern_id, alpha: r.alpha, beta: r.beta, posterior_mean: r.posterior_mean,
            credible_interval_low: r.credible_interval_low, credible_interval_high: r.credible_interval_high,
            tier: r.tier, momentum: r.momentum, last_updated: r.last_updated,
        }
    }
}
impl From<queries::patterns::PatternConfidenceRow> for PatternConfidenceRow {
    fn from(r: queries::patterns::PatternConfidenceRow) -> Self {
        Self {
            pattern_id: r.pattern_id, alpha: r.alpha, beta: r.beta, posterior_mean: r.posterior_mean,
            credible_interval_low: r.credible_interval_low, credible_interval_high: r.credible_interval_high,
            tier: r.tier, momentum: r.momentum, last_updated: r.last_updated,
        }
    }
}
impl From<OutlierTraitRow> for queries::patterns::OutlierRow {
    fn from(r: OutlierTraitRow) -> Self {
        Self { id: r.id, pattern_id: r.pattern_id, file: r.file, line: r.line, deviation_score: r.deviation_score, significance: r.significance, method: r.method, created_at: r.created_at }
    }
}
impl From<queries::patterns::OutlierRow> for OutlierTraitRow {
    fn from(r: queries::patterns::OutlierRow) -> Self {
        Self { id: r.id, pattern_id: r.pattern_id, file: r.file, line: r.line, deviation_score: r.deviation_score, significance: r.significance, method: r.method, created_at: r.created_at }
    }
}
impl From<ConventionTraitRow> for queries::patterns::ConventionRow {
    fn from(r: ConventionTraitRow) -> Self {
        Self {
            id: r.id, pattern_id: r.pattern_id, category: r.category, scope: r.scope,
            dominance_ratio: r.dominance_ratio, promotion_status: r.promotion_status,
            discovered_at: r.discovered_at, last_seen: r.last_seen, expires_at: r.expires_at,
        }
    }
}
impl From<queries::patterns::ConventionRow> for ConventionTraitRow {
    fn from(r: queries::patterns::ConventionRow) -> Self {
        Self {
            id: r.id, pattern_id: r.pattern_id, category: r.category, scope: r.scope,
            dominance_ratio: r.dominance_ratio, promotion_status: r.promotion_status,
            discovered_at: r.discovered_at, last_seen: r.last_seen, expires_at: r.expires_at,
        }
    }
}

impl From<BoundaryRow> for queries::boundaries::BoundaryRecord {
    fn from(r: BoundaryRow) -> Self {
        Self {
            id: r.id, file: r.file, framework: r.framework, model_name: r.model_name,
            table_name: r.table_name, field_name: r.field_name, sensitivity: r.sensitivity,
            confidence: r.confidence, created_at: r.created_at,
        }
    }
}
impl From<queries::boundaries::BoundaryRecord> for BoundaryRow {
    fn from(r: queries::boundaries::BoundaryRecord) -> Self {
        Self {
            id: r.id, file: r.file, framework: r.framework, model_name: r.model_name,
            table_name: r.table_name, field_name: r.field_name, sensitivity: r.sensitivity,
            confidence: r.confidence, created_at: r.created_at,
        }
    }
}

impl From<CallEdgeRow> for queries::call_edges::CallEdgeRecord {
    fn from(r: CallEdgeRow) -> Self {
        Self {
            caller_id: r.caller_id, callee_id: r.callee_id, callee_name: r.callee_name,
            call_kind: r.call_kind, resolution: r.resolution, confidence: r.confidence,
            call_site_line: r.call_site_line,
        }
    }
}
impl From<queries::call_edges::CallEdgeRecord> for CallEdgeRow {
    fn from(r: queries::call_edges::CallEdgeRecord) -> Self {
        Self {
            caller_id: r.caller_id, callee_id: r.callee_id, callee_name: r.callee_name,
            call_kind: r.call_kind, resolution: r.resolution, confidence: r.confidence,
            call_site_line: r.call_site_line,
        }
    }
}

impl From<queries::scan_history::ScanHistoryRecord> for ScanHistoryRow {
    fn from(r: queries::scan_history::ScanHistoryRecord) -> Self {
        Self {
            id: r.id, started_at: r.started_at, completed_at: r.completed_at, root_path: r.root_path,
            total_files: r.total_files, added_files: r.added_files, modified_files: r.modified_files,
            removed_files: r.removed_files, unchanged_files: r.unchanged_files, duration_ms: r.duration_ms,
            status: r.status, error: r.error,
        }
    }
}

// ─── IDriftStructural ──────────────────────────────────────────────────

impl IDriftStructural for DriftStorageEngine {
    fn upsert_coupling_metrics(&self, row: &CouplingMetricsRow) -> Result<(), StorageError> {
        self.db.with_writer(|c| queries::structural::upsert_coupling_metrics(c, &row.clone().into()))
    }
    fn get_coupling_metrics(&self, module: &str) -> Result<Option<CouplingMetricsRow>, StorageError> {
        self.db.with_reader(|c| queries::structural::get_coupling_metrics(c, module)).map(|r| r.map(Into::into))
    }
    fn get_all_coupling_metrics(&self) -> Result<Vec<CouplingMetricsRow>, StorageError> {
        self.db.with_reader(|c| queries::structural::get_all_coupling_metrics(c)).map(|rs| rs.into_iter().map(Into::into).collect())
    }
    fn get_coupling_metrics_by_zone(&self, zone: &str) -> Result<Vec<CouplingMetricsRow>, StorageError> {
        self.db.with_reader(|c| queries::structural::get_coupling_metrics_by_zone(c, zone)).map(|rs| rs.into_iter().map(Into::into).collect())
    }
    fn insert_coupling_cycle(&self, members: &str, break_suggestions: &str) -> Result<(), StorageError> {
        self.db.with_writer(|c| queries::structural::insert_coupling_cycle(c, members, break_suggestions))
    }
    fn query_coupling_cycles(&self) -> Result<Vec<CouplingCycleRow>, StorageError> {
        self.db.with_reader(|c| queries::structural::query_coupling_cycles(c)).map(|rs| rs.into_iter().map(Into::into).collect())
    }
    fn insert_data_access(&self, row: &DataAccessRow) -> Result<(), StorageError> {
        self.db.with_writer(|c| queries::data_access::insert_data_access(c, &row.clone().into()))
    }
    fn insert_data_access_batch(&self, rows: &[DataAccessRow]) -> Result<usize, StorageError> {
        let records: Vec<_> = rows.iter().cloned().map(Into::into).collect();
        self.db.with_writer(|c| queries::data_access::insert_data_access_batch(c, &records))
    }
    fn query_data_access_by_function(&self, function_id: i64) -> Result<Vec<DataAccessRow>, StorageError> {
        self.db.with_reader(|c| queries::data_access::query_data_access_by_function(c, function_id)).map(|rs| rs.into_iter().map(Into::into).collect())
    }
    fn query_data_access_by_table(&self, table_name: &str) -> Result<Vec<DataAccessRow>, StorageError> {
        self.db.with_reader(|c| queries::data_access::query_data_access_by_table(c, table_name)).map(|rs| rs.into_iter().map(Into::into).collect())
    }
    fn delete_data_access_by_function(&self, function_id: i64) -> Result<usize, StorageError> {
        self.db.with_writer(|c| queries::data_access::delete_data_access_by_function(c, function_id))
    }
    fn count_data_access(&self) -> Result<i64, StorageError> {
        self.db.with_reader(|c| queries::data_access::count_data_access(c))
    }
    fn upsert_sensitive_field(&self, row: &SensitiveFieldRow) -> Result<(), StorageError> {
        self.db.with_writer(|c| queries::data_access::upsert_sensitive_field(c, &row.clone().into()))
    }
    fn get_sensitive_fields_by_table(&self, table_name: &str) -> Result<Vec<SensitiveFieldRow>, StorageError> {
        self.db.with_reader(|c| queries::data_access::get_sensitive_fields_by_table(c, table_name)).map(|rs| rs.into_iter().map(Into::into).collect())
    }
    fn get_all_sensitive_fields(&self) -> Result<Vec<SensitiveFieldRow>, StorageError> {
        self.db.with_reader(|c| queries::data_access::get_all_sensitive_fields(c)).map(|rs| rs.into_iter().map(Into::into).collect())
    }
    fn upsert_reachability(&self, row: &ReachabilityCacheRow) -> Result<(), StorageError> {
        self.db.with_writer(|c| queries::structural::upsert_reachability(c, &row.clone().into()))
    }
    fn get_reachability(&self, source_node: &str, direction: &str) -> Result<Option<ReachabilityCacheRow>, StorageError> {
        self.db.with_reader(|c| queries::structural::get_reachability(c, source_node, direction)).map(|r| r.map(Into::into))
    }
    fn clear_reachability_cache(&self) -> Result<(), StorageError> {
        self.db.with_writer(|c| queries::structural::clear_reachability_cache(c))
    }
    fn upsert_impact_score(&self, row: &ImpactScoreRow) -> Result<(), StorageError> {
        self.db.with_writer(|c| queries::structural::upsert_impact_score(c, &row.clone().into()))
    }
    fn get_impact_score(&self, function_id: i64) -> Result<Option<ImpactScoreRow>, StorageError> {
        self.db.with_reader(|c| queries::structural::get_impact_score(c, function_id)).map(|r| r.map(Into::into))
    }
}

impl From<CouplingMetricsRow> for queries::structural::CouplingMetricsRecord {
    fn from(r: CouplingMetricsRow) -> Self {
        Self { module: r.module, ce: r.ce, ca: r.ca, instability: r.instability, abstractness: r.abstractness, distance: r.distance, zone: r.zone }
    }
}
impl From<queries::structural::CouplingMetricsRecord> for CouplingMetricsRow {
    fn from(r: queries::structural::CouplingMetricsRecord) -> Self {
        Self { module: r.module, ce: r.ce, ca: r.ca, instability: r.instability, abstractness: r.abstractness, distance: r.distance, zone: r.zone }
    }
}
impl From<queries::structural::CouplingCycleRecord> for CouplingCycleRow {
    fn from(r: queries::structural::CouplingCycleRecord) -> Self {
        Self { id: r.id, members: r.members, break_suggestions: r.break_suggestions, created_at: r.created_at }
    }
}
impl From<DataAccessRow> for queries::data_access::DataAccessRecord {
    fn from(r: DataAccessRow) -> Self {
        Self { id: r.id, function_id: r.function_id, table_name: r.table_name, operation: r.operation, fields: r.fields, orm: r.orm, line: r.line, confidence: r.confidence }
    }
}
impl From<queries::data_access::DataAccessRecord> for DataAccessRow {
    fn from(r: queries::data_access::DataAccessRecord) -> Self {
        Self { id: r.id, function_id: r.function_id, table_name: r.table_name, operation: r.operation, fields: r.fields, orm: r.orm, line: r.line, confidence: r.confidence }
    }
}
impl From<SensitiveFieldRow> for queries::data_access::SensitiveFieldRecord {
    fn from(r: SensitiveFieldRow) -> Self {
        Self { table_name: r.table_name, field_name: r.field_name, category: r.category, specificity: r.specificity }
    }
}
impl From<queries::data_access::SensitiveFieldRecord> for SensitiveFieldRow {
    fn from(r: queries::data_access::SensitiveFieldRecord) -> Self {
        Self { table_name: r.table_name, field_name: r.field_name, category: r.category, specificity: r.specificity }
    }
}
impl From<ReachabilityCacheRow> for queries::structural::ReachabilityCacheRecord {
    fn from(r: ReachabilityCacheRow) -> Self {
        Self { source_node: r.source_node, direction: r.direction, reachable_set: r.reachable_set, sensitivity: r.sensitivity }
    }
}
impl From<queries::structural::ReachabilityCacheRecord> for ReachabilityCacheRow {
    fn from(r: queries::structural::ReachabilityCacheRecord) -> Self {
        Self { source_node: r.source_node, direction: r.direction, reachable_set: r.reachable_set, sensitivity: r.sensitivity }
    }
}
impl From<ImpactScoreRow> for queries::structural::ImpactScoreRecord {
    fn from(r: ImpactScoreRow) -> Self {
        Self { function_id: r.function_id, affected_count: r.affected_count, entry_point_hits: r.entry_point_hits, sensitive_paths: r.sensitive_paths, depth: r.depth, risk_score: r.risk_score, risk_bucket: r.risk_bucket }
    }
}
impl From<queries::structural::ImpactScoreRecord> for ImpactScoreRow {
    fn from(r: queries::structural::ImpactScoreRecord) -> Self {
        Self { function_id: r.function_id, affected_count: r.affected_count, entry_point_hits: r.entry_point_hits, sensitive_paths: r.sensitive_paths, depth: r.depth, risk_score: r.risk_score, risk_bucket: r.risk_bucket }
    }
}

// ─── IDriftEnforcement ─────────────────────────────────────────────────

impl IDriftEnforcement for DriftStorageEngine {
    fn insert_violation(&self, v: &ViolationRow) -> Result<(), StorageError> {
        self.db.with_writer(|c| queries::enforcement::insert_violation(c, &v.clone().into()))
    }
    fn get_violation(&self, id: &str) -> Result<Option<ViolationRow>, StorageError> {
        self.db.with_reader(|c| queries::enforcement::get_violation(c, id)).map(|r| r.map(Into::into))
    }
    fn query_violations_by_file(&self, file: &str) -> Result<Vec<ViolationRow>, StorageError> {
        self.db.with_reader(|c| queries::enforcement::query_violations_by_file(c, file)).map(|rs| rs.into_iter().map(Into::into).collect())
    }
    fn query_violations_by_pattern(&self, pattern_id: &str) -> Result<Vec<ViolationRow>, StorageError> {
        self.db.with_reader(|c| queries::enforcement::query_violations_by_pattern(c, pattern_id)).map(|rs| rs.into_iter().map(Into::into).collect())
    }
    fn query_all_violations(&self) -> Result<Vec<ViolationRow>, StorageError> {
        self.db.with_reader(|c| queries::enforcement::query_all_violations(c)).map(|rs| rs.into_iter().map(Into::into).collect())
    }
    fn insert_feedback(&self, f: &FeedbackRow) -> Result<(), StorageError> {
        self.db.with_writer(|c| queries::enforcement::insert_feedback(c, &f.clone().into()))
    }
    fn query_feedback_by_pattern(&self, pattern_id: &str) -> Result<Vec<FeedbackRow>, StorageError> {
        self.db.with_reader(|c| queries::enforcement::query_feedback_by_pattern(c, pattern_id)).map(|rs| rs.into_iter().map(Into::into).collect())
    }
    fn query_feedback_stats(&self, pattern_id: &str) -> Result<FeedbackStats, StorageError> {
        self.db.with_reader(|c| queries::enforcement::query_feedback_stats(c, pattern_id)).map(Into::into)
    }
    fn get_pattern_status(&self, pattern_id: &str) -> Result<Option<PatternStatusRow>, StorageError> {
        self.db.with_reader(|c| queries::pattern_status::get_status(c, pattern_id)).map(|r| r.map(Into::into))
    }
    fn upsert_pattern_status(&self, row: &PatternStatusRow) -> Result<(), StorageError> {
        let status = queries::pattern_status::PatternLifecycle::from_str(&row.status);
        self.db.with_writer(|c| {
            queries::pattern_status::upsert_status(
                c,
                &row.pattern_id,
                status,
                row.user_set,
                row.actor_id.as_deref(),
                row.updated_at,
            )
        })
    }
    fn query_patterns_by_status(&self, status: &str) -> Result<Vec<PatternStatusRow>, StorageError> {
        let status = queries::pattern_status::PatternLifecycle::from_str(status);
        self.db
            .with_reader(|c| queries::pattern_status::query_by_status(c, status))
            .map(|rs| rs.into_iter().map(Into::into).collect())
    }
}

impl From<queries::pattern_status::PatternStatusRow> for PatternStatusRow {
    fn from(r: queries::pattern_status::PatternStatusRow) -> Self {
        Self {
            pattern_id: r.pattern_id,
            status: r.status.as_str().to_string(),
            user_set: r.user_set,
            actor_id: r.actor_id,
            updated_at: r.updated_at,
        }
    }
}

impl From<ViolationRow> for queries::enforcement::ViolationRecord {
    fn from(r: ViolationRow) -> Self {
        Self { id: r.id, pattern_id: r.pattern_id, file: r.file, line: r.line, severity: r.severity, confidence_at_detection: r.confidence_at_detection }
    }
}
impl From<queries::enforcement::ViolationRecord> for ViolationRow {
    fn from(r: queries::enforcement::ViolationRecord) -> Self {
        Self { id: r.id, pattern_id: r.pattern_id, file: r.file, line: r.line, severity: r.severity, confidence_at_detection: r.confidence_at_detection }
    }
}
impl From<FeedbackRow> for queries::enforcement::FeedbackRecord {
    fn from(r: FeedbackRow) -> Self {
        Self { violation_id: r.violation_id, pattern_id: r.pattern_id, action: r.action, reason: r.reason, created_at: r.created_at }
    }
}
impl From<queries::enforcement::FeedbackRecord> for FeedbackRow {
    fn from(r: queries::enforcement::FeedbackRecord) -> Self {
        Self { violation_id: r.violation_id, pattern_id: r.pattern_id, action: r.action, reason: r.reason, created_at: r.created_at }
    }
}
impl From<queries::enforcement::FeedbackStats> for FeedbackStats {
    fn from(r: queries::enforcement::FeedbackStats) -> Self {
        Self { total_count: r.total_count, fix_count: r.fix_count, dismiss_count: r.dismiss_count, suppress_count: r.suppress_count }
    }
}

// ─── IDriftBatchWriter ─────────────────────────────────────────────────

impl IDriftBatchWriter for DriftStorageEngine {
    fn send_raw(&self, _command_name: &str, payload: &[u8]) -> Result<(), StorageError> {
        let command: BatchCommand = serde_json::from_slice(payload)
            .map_err(|e| StorageError::SqliteError { message: format!("decode batch command: {e}") })?;
        self.batch.send(command)
    }
    fn flush(&self) -> Result<(), StorageError> {
        self.batch.flush()
    }
    fn flush_sync(&self) -> Result<WriteStats, StorageError> {
        self.batch.flush_sync()
    }
    fn stats(&self) -> WriteStats {
        self.batch.stats()
    }
    fn shutdown(self: Box<Self>) -> Result<WriteStats, StorageError> {
        self.batch.flush_sync()
    }
}

// ─── IWorkspaceStorage ─────────────────────────────────────────────────

impl IWorkspaceStorage for DriftStorageEngine {
    fn initialize(&self, _path: &str) -> Result<(), StorageError> {
        // Migrations already ran in `open`/`open_in_memory`; re-initializing
        // an already-open engine is a no-op.
        Ok(())
    }

    fn status(&self) -> Result<WorkspaceStatus, StorageError> {
        let schema_version = self.db.schema_version()?;
        let file_count = self.count_files()?;
        let db_path = self.path().map(|p| p.display().to_string());
        let (db_size_bytes, wal_size_bytes) = match self.path() {
            Some(p) => {
                let db = std::fs::metadata(p).map(|m| m.len()).unwrap_or(0);
                let wal_path = p.with_extension("db-wal");
                let wal = std::fs::metadata(wal_path).map(|m| m.len()).unwrap_or(0);
                (db, wal)
            }
            None => (0, 0),
        };
        Ok(WorkspaceStatus {
            initialized: true,
            db_path,
            schema_version,
            file_count,
            db_size_bytes,
            wal_size_bytes,
        })
    }

    fn project_info(&self) -> Result<ProjectInfo, StorageError> {
        let root_path = self.path().and_then(|p| p.parent()).map(|p| p.display().to_string()).unwrap_or_default();
        let name = self.path()
            .and_then(|p| p.parent())
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "workspace".into());
        let language_breakdown = self.db.with_reader(|c| {
            let mut stmt = c.prepare_cached(
                "SELECT COALESCE(language, 'unknown'), COUNT(*) FROM file_metadata GROUP BY language",
            ).map_err(sqe)?;
            let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as u64))).map_err(sqe)?;
            rows.map(|r| r.map_err(sqe)).collect::<Result<Vec<_>, _>>()
        })?;
        let total_files = self.count_files()?;
        let total_functions = self.count_functions()?;
        let total_patterns = self.db.with_reader(|c| c.query_row("SELECT COUNT(*) FROM pattern_confidence", [], |row| row.get(0)).map_err(sqe))?;
        let last_scan_at = self.db.with_reader(|c| {
            c.query_row("SELECT MAX(completed_at) FROM scan_history", [], |row| row.get(0)).map_err(sqe)
        })?;
        Ok(ProjectInfo { root_path, name, language_breakdown, total_files, total_functions, total_patterns, last_scan_at })
    }

    fn workspace_context(&self) -> Result<WorkspaceContext, StorageError> {
        let info = self.project_info()?;
        let languages = info.language_breakdown.iter().map(|(l, _)| l.clone()).collect();
        let frameworks = self.db.with_reader(|c| {
            let mut stmt = c.prepare_cached("SELECT DISTINCT framework FROM boundaries").map_err(sqe)?;
            let rows = stmt.query_map([], |row| row.get::<_, String>(0)).map_err(sqe)?;
            rows.map(|r| r.map_err(sqe)).collect::<Result<Vec<_>, _>>()
        })?;
        Ok(WorkspaceContext {
            root_path: info.root_path,
            languages,
            frameworks,
            file_count: info.total_files,
            function_count: info.total_functions,
            pattern_count: info.total_patterns,
            boundary_count: self.count_boundaries()?,
            detection_count: self.count_detections()?,
        })
    }

    fn gc(&self) -> Result<GcStats, StorageError> {
        let orphan_files_removed = self.db.with_writer(|c| {
            c.execute(
                "DELETE FROM functions WHERE file NOT IN (SELECT path FROM file_metadata)",
                [],
            ).map_err(sqe)
        })? as u64;
        let stale_cache_entries_removed = self.db.with_writer(|c| {
            c.execute(
                "DELETE FROM parse_cache WHERE content_hash NOT IN (SELECT content_hash FROM file_metadata)",
                [],
            ).map_err(sqe)
        })? as u64;
        self.checkpoint()?;
        Ok(GcStats { orphan_files_removed, stale_cache_entries_removed, wal_checkpointed: true, freed_bytes: 0 })
    }

    fn backup(&self, destination: &str) -> Result<BackupResult, StorageError> {
        let start = std::time::Instant::now();
        self.db.with_reader(|c| {
            c.execute("VACUUM INTO ?1", [destination]).map_err(sqe)
        })?;
        let size_bytes = std::fs::metadata(destination).map(|m| m.len()).unwrap_or(0);
        Ok(BackupResult { destination: destination.to_string(), size_bytes, duration_ms: start.elapsed().as_millis() as u64 })
    }

    fn export(&self, destination: &str) -> Result<(), StorageError> {
        self.backup(destination).map(|_| ())
    }

    fn import(&self, _source: &str) -> Result<(), StorageError> {
        Err(StorageError::NotSupported {
            operation: "import".into(),
            reason: "restore from a VACUUM INTO backup by replacing the database file directly".into(),
        })
    }

    fn integrity_check(&self) -> Result<IntegrityResult, StorageError> {
        let issues: Vec<String> = self.db.with_reader(|c| {
            let mut stmt = c.prepare_cached("PRAGMA integrity_check").map_err(sqe)?;
            let rows = stmt.query_map([], |row| row.get::<_, String>(0)).map_err(sqe)?;
            rows.map(|r| r.map_err(sqe)).collect::<Result<Vec<_>, _>>()
        })?;
        let ok = issues.len() == 1 && issues[0] == "ok";
        Ok(IntegrityResult { ok, issues: if ok { Vec::new() } else { issues } })
    }

    fn schema_version(&self) -> Result<u32, StorageError> {
        self.db.schema_version()
    }
}
