//! Persistence for vector clock counters and inter-agent trust tallies.
//!
//! Kept flat (plain rows, no `cortex_causal::VectorClock`/`AgentTrust`
//! types) so this crate doesn't need a dependency on cortex-causal;
//! `cortex-temporal` (which depends on both) assembles the richer types
//! from these rows.

use rusqlite::{params, Connection};

use cortex_core::errors::CortexResult;

use crate::to_storage_err;

/// One `(agent_id, counter)` component of an owning agent's vector clock.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorClockRow {
    pub agent_id: String,
    pub counter: u64,
}

/// Read every component of `owner_agent_id`'s locally-tracked vector clock.
pub fn load_vector_clock(conn: &Connection, owner_agent_id: &str) -> CortexResult<Vec<VectorClockRow>> {
    let mut stmt = conn
        .prepare("SELECT agent_id, counter FROM agent_vector_clocks WHERE owner_agent_id = ?1")
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![owner_agent_id], |row| {
            Ok(VectorClockRow { agent_id: row.get(0)?, counter: row.get::<_, i64>(1)? as u64 })
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut result = Vec::new();
    for row in rows {
        result.push(row.map_err(|e| to_storage_err(e.to_string()))?);
    }
    Ok(result)
}

/// Upsert a single component of an owning agent's vector clock.
pub fn set_vector_clock_component(
    conn: &Connection,
    owner_agent_id: &str,
    agent_id: &str,
    counter: u64,
) -> CortexResult<()> {
    conn.execute(
        "INSERT INTO agent_vector_clocks (owner_agent_id, agent_id, counter)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(owner_agent_id, agent_id) DO UPDATE SET counter = excluded.counter",
        params![owner_agent_id, agent_id, counter as i64],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// One observer's running trust tally of a subject agent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrustRow {
    pub validated: u64,
    pub useful: u64,
    pub contradicted: u64,
    pub total: u64,
}

/// Load `observer_id`'s trust tally of `subject_id`, if any has been
/// recorded. `None` means no history — callers fall back to the bootstrap
/// trust value rather than treating this as zero evidence.
pub fn load_trust(conn: &Connection, observer_id: &str, subject_id: &str) -> CortexResult<Option<TrustRow>> {
    conn.query_row(
        "SELECT validated, useful, contradicted, total FROM agent_trust
         WHERE observer_id = ?1 AND subject_id = ?2",
        params![observer_id, subject_id],
        |row| {
            Ok(TrustRow {
                validated: row.get::<_, i64>(0)? as u64,
                useful: row.get::<_, i64>(1)? as u64,
                contradicted: row.get::<_, i64>(2)? as u64,
                total: row.get::<_, i64>(3)? as u64,
            })
        },
    )
    .map(Some)
    .or_else(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => Ok(None),
        other => Err(to_storage_err(other.to_string())),
    })
}

/// Persist an observer's updated trust tally of a subject, creating the
/// row if this is their first recorded interaction.
pub fn save_trust(conn: &Connection, observer_id: &str, subject_id: &str, trust: TrustRow) -> CortexResult<()> {
    conn.execute(
        "INSERT INTO agent_trust (observer_id, subject_id, validated, useful, contradicted, total)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(observer_id, subject_id) DO UPDATE SET
            validated = excluded.validated,
            useful = excluded.useful,
            contradicted = excluded.contradicted,
            total = excluded.total",
        params![
            observer_id,
            subject_id,
            trust.validated as i64,
            trust.useful as i64,
            trust.contradicted as i64,
            trust.total as i64,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
