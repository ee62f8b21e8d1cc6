//! Provenance hop CRUD: the append-only trail of agent actions that moved
//! a memory's confidence, queried for `ProvenanceHop` lists in decision
//! replay (`DecisionReplay::causal_state`).

use rusqlite::{params, Connection};

use cortex_core::errors::CortexResult;
use cortex_core::models::ProvenanceHop;

use crate::to_storage_err;

/// Append a provenance hop, returning it with its assigned id.
pub fn insert_hop(conn: &Connection, hop: &ProvenanceHop) -> CortexResult<ProvenanceHop> {
    conn.execute(
        "INSERT INTO provenance_hops (memory_id, agent_id, action, timestamp, confidence_delta)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            hop.memory_id,
            hop.agent_id,
            hop.action,
            hop.timestamp.to_rfc3339(),
            hop.confidence_delta,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    let id = conn.last_insert_rowid();
    Ok(ProvenanceHop { id: Some(id), ..hop.clone() })
}

/// All provenance hops for a memory, oldest first.
pub fn hops_for_memory(conn: &Connection, memory_id: &str) -> CortexResult<Vec<ProvenanceHop>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, memory_id, agent_id, action, timestamp, confidence_delta
             FROM provenance_hops WHERE memory_id = ?1
             ORDER BY timestamp ASC, id ASC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![memory_id], row_to_hop)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut hops = Vec::new();
    for row in rows {
        hops.push(row.map_err(|e| to_storage_err(e.to_string()))?);
    }
    Ok(hops)
}

/// All provenance hops recorded by a given agent, most recent first.
pub fn hops_by_agent(conn: &Connection, agent_id: &str) -> CortexResult<Vec<ProvenanceHop>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, memory_id, agent_id, action, timestamp, confidence_delta
             FROM provenance_hops WHERE agent_id = ?1
             ORDER BY timestamp DESC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![agent_id], row_to_hop)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut hops = Vec::new();
    for row in rows {
        hops.push(row.map_err(|e| to_storage_err(e.to_string()))?);
    }
    Ok(hops)
}

fn row_to_hop(row: &rusqlite::Row<'_>) -> rusqlite::Result<ProvenanceHop> {
    let ts_str: String = row.get(4)?;
    let timestamp = chrono::DateTime::parse_from_rfc3339(&ts_str)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .unwrap_or_else(|_| chrono::Utc::now());

    Ok(ProvenanceHop {
        id: Some(row.get(0)?),
        memory_id: row.get(1)?,
        agent_id: row.get(2)?,
        action: row.get(3)?,
        timestamp,
        confidence_delta: row.get(5)?,
    })
}
