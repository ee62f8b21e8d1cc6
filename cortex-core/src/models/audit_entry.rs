//! Provenance / audit trail entries for memory mutations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single provenance hop: who did what to a memory, and when.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub memory_id: String,
    pub operation: AuditOperation,
    pub details: String,
    pub actor: AuditActor,
    pub timestamp: DateTime<Utc>,
}

/// The kind of mutation an audit entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditOperation {
    Created,
    Updated,
    Archived,
    Restored,
    LinkAdded,
    LinkRemoved,
    RelationshipAdded,
    RelationshipRemoved,
    Validated,
    Reclassified,
}

/// Who performed the operation being audited.
///
/// Serializes as a single `"kind:id"` string (not a tagged object) so it can
/// be stored directly in a text column alongside `AuditOperation`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditActor {
    User(String),
    Agent(String),
    System(String),
}

impl Serialize for AuditActor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let (kind, id) = match self {
            AuditActor::User(id) => ("user", id),
            AuditActor::Agent(id) => ("agent", id),
            AuditActor::System(id) => ("system", id),
        };
        serializer.serialize_str(&format!("{kind}:{id}"))
    }
}

impl<'de> Deserialize<'de> for AuditActor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.split_once(':') {
            Some(("user", id)) => AuditActor::User(id.to_string()),
            Some(("agent", id)) => AuditActor::Agent(id.to_string()),
            Some((_, id)) => AuditActor::System(id.to_string()),
            None => AuditActor::System(raw),
        })
    }
}
