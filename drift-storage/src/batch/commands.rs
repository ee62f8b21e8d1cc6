//! `BatchCommand` — every write `CG.StreamingBuild` issues against the
//! single writer connection, batched into transactions of up to
//! [`crate::batch::writer::BATCH_SIZE`] commands (spec.md §4.3, invariant
//! B1 — batch atomicity).

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use drift_core::errors::StorageError;

use crate::queries::{
    boundaries::BoundaryRecord, call_edges::CallEdgeRecord, data_access::DataAccessRecord,
    detections::DetectionRecord, files::FileMetadataRecord, functions::FunctionRecord,
    parse_cache::ParseCacheRecord, patterns::ConventionRow, patterns::OutlierRow,
    patterns::PatternConfidenceRow, structural::CouplingMetricsRecord,
    structural::ImpactScoreRecord, structural::ReachabilityCacheRecord,
    enforcement::ViolationRecord,
};
use crate::queries;

/// One unit of writer work. `Serialize`/`Deserialize` so the trait-level
/// `IDriftBatchWriter::send_raw` (spec.md's storage-backend abstraction) can
/// ship these across a boundary other than an in-process channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BatchCommand {
    UpsertFileMetadata(FileMetadataRecord),
    DeleteFileMetadata { path: String },
    InsertParseCache(ParseCacheRecord),
    InvalidateParseCache { content_hash: Vec<u8> },

    InsertFunctions { rows: Vec<FunctionRecord> },
    DeleteFunctionsByFile { file: String },
    UpdateFunctionCount { path: String, count: i64 },
    UpdateFileError { path: String, error_count: i64, error: Option<String> },

    InsertCallEdges { rows: Vec<CallEdgeRecord> },
    DeleteEdgesByFile { file: String },
    ResolveCallEdge {
        caller_id: i64,
        call_site_line: i64,
        callee_name: String,
        callee_id: i64,
        resolution: String,
        confidence: f64,
    },

    InsertDetections { rows: Vec<DetectionRecord> },
    DeleteDetectionsByFile { file: String },

    InsertBoundaries { rows: Vec<BoundaryRecord> },
    DeleteBoundariesByFile { file: String },

    UpsertPatternConfidence(PatternConfidenceRow),
    InsertOutlier(OutlierRow),
    InsertConvention(ConventionRow),

    InsertScanStart { started_at: i64, root_path: String },
    #[allow(clippy::too_many_arguments)]
    UpdateScanComplete {
        id: i64,
        completed_at: i64,
        total_files: i64,
        added_files: i64,
        modified_files: i64,
        removed_files: i64,
        unchanged_files: i64,
        duration_ms: i64,
        status: String,
        error: Option<String>,
    },

    InsertDataAccess { rows: Vec<DataAccessRecord> },
    DeleteDataAccessByFunction { function_id: i64 },

    UpsertReachability(ReachabilityCacheRecord),
    ClearReachabilityCache,
    UpsertImpactScore(ImpactScoreRecord),
    UpsertCouplingMetrics(CouplingMetricsRecord),
    InsertCouplingCycle { members: String, break_suggestions: String },

    InsertViolation(ViolationRecord),

    /// Fire-and-forget flush signal; carries no row data.
    Flush,
}

/// Apply one command within an already-open transaction, bumping the
/// matching counter in `stats`.
pub(crate) fn apply(
    conn: &Connection,
    command: BatchCommand,
    stats: &mut drift_core::traits::storage::drift_batch::WriteStats,
) -> Result<(), StorageError> {
    use queries::*;

    match command {
        BatchCommand::UpsertFileMetadata(r) => {
            files::upsert_file_metadata(conn, &r)?;
            stats.file_metadata_rows += 1;
        }
        BatchCommand::DeleteFileMetadata { path } => {
            files::delete_file_metadata(conn, &path)?;
        }
        BatchCommand::InsertParseCache(r) => {
            parse_cache::insert_parse_cache(conn, &r.content_hash, &r.language, &r.parse_result_json, r.created_at)?;
            stats.parse_cache_rows += 1;
        }
        BatchCommand::InvalidateParseCache { content_hash } => {
            parse_cache::invalidate_parse_cache(conn, &content_hash)?;
        }
        BatchCommand::InsertFunctions { rows } => {
            let n = rows.len();
            functions::insert_functions(conn, &rows)?;
            stats.function_rows += n;
        }
        BatchCommand::DeleteFunctionsByFile { file } => {
            functions::delete_functions_by_file(conn, &file)?;
        }
        BatchCommand::UpdateFunctionCount { path, count } => {
            files::update_function_count(conn, &path, count)?;
        }
        BatchCommand::UpdateFileError { path, error_count, error } => {
            files::update_file_error(conn, &path, error_count, error.as_deref())?;
        }
        BatchCommand::InsertCallEdges { rows } => {
            let n = call_edges::insert_call_edges(conn, &rows)?;
            stats.call_edge_rows += n;
        }
        BatchCommand::DeleteEdgesByFile { file } => {
            call_edges::delete_edges_by_file(conn, &file)?;
        }
        BatchCommand::ResolveCallEdge { caller_id, call_site_line, callee_name, callee_id, resolution, confidence } => {
            call_edges::resolve_call_edge(conn, caller_id, call_site_line, &callee_name, callee_id, &resolution, confidence)?;
        }
        BatchCommand::InsertDetections { rows } => {
            let n = detections::insert_detections(conn, &rows)?;
            stats.detection_rows += n;
        }
        BatchCommand::DeleteDetectionsByFile { file } => {
            detections::delete_detections_by_file(conn, &file)?;
        }
        BatchCommand::InsertBoundaries { rows } => {
            let n = boundaries::insert_boundaries(conn, &rows)?;
            stats.boundary_rows += n;
        }
        BatchCommand::DeleteBoundariesByFile { file } => {
            boundaries::delete_boundaries_by_file(conn, &file)?;
        }
        BatchCommand::UpsertPatternConfidence(r) => {
            patterns::upsert_confidence(conn, &r)?;
            stats.pattern_confidence_rows += 1;
        }
        BatchCommand::InsertOutlier(r) => {
            patterns::insert_outlier(conn, &r)?;
            stats.outlier_rows += 1;
        }
        BatchCommand::InsertConvention(r) => {
            patterns::insert_convention(conn, &r)?;
            stats.convention_rows += 1;
        }
        BatchCommand::InsertScanStart { started_at, root_path } => {
            scan_history::insert_scan_start(conn, started_at, &root_path)?;
            stats.scan_history_rows += 1;
        }
        BatchCommand::UpdateScanComplete {
            id, completed_at, total_files, added_files, modified_files,
            removed_files, unchanged_files, duration_ms, status, error,
        } => {
            scan_history::update_scan_complete(
                conn, id, completed_at, total_files, added_files, modified_files,
                removed_files, unchanged_files, duration_ms, &status, error.as_deref(),
            )?;
        }
        BatchCommand::InsertDataAccess { rows } => {
            let n = data_access::insert_data_access_batch(conn, &rows)?;
            stats.data_access_rows += n;
        }
        BatchCommand::DeleteDataAccessByFunction { function_id } => {
            data_access::delete_data_access_by_function(conn, function_id)?;
        }
        BatchCommand::UpsertReachability(r) => {
            structural::upsert_reachability(conn, &r)?;
            stats.reachability_rows += 1;
        }
        BatchCommand::ClearReachabilityCache => {
            structural::clear_reachability_cache(conn)?;
        }
        BatchCommand::UpsertImpactScore(r) => {
            structural::upsert_impact_score(conn, &r)?;
            stats.impact_score_rows += 1;
        }
        BatchCommand::UpsertCouplingMetrics(r) => {
            structural::upsert_coupling_metrics(conn, &r)?;
            stats.coupling_metric_rows += 1;
        }
        BatchCommand::InsertCouplingCycle { members, break_suggestions } => {
            structural::insert_coupling_cycle(conn, &members, &break_suggestions)?;
            stats.coupling_cycle_rows += 1;
        }
        BatchCommand::InsertViolation(r) => {
            enforcement::insert_violation(conn, &r)?;
            stats.violation_rows += 1;
        }
        BatchCommand::Flush => {}
    }
    Ok(())
}
