//! Compressed retrieval-ready memory representation.

use serde::{Deserialize, Serialize};

use crate::memory::{Importance, MemoryType};

/// A memory compressed to a retrieval "level" for inclusion in an agent's
/// context window. Lower levels are terser summaries; level 0 is full content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressedMemory {
    pub memory_id: String,
    pub memory_type: MemoryType,
    pub importance: Importance,
    /// Compression level: 0 = full content, higher = more aggressively summarized.
    pub level: u8,
    pub text: String,
    pub token_count: usize,
    pub relevance_score: f64,
}
