//! # cortex-core
//!
//! Shared domain model for the Cortex temporal-memory engine: the
//! `BaseMemory` type and its typed content payloads, configuration,
//! error types, and the engine-facing traits other cortex crates
//! implement or consume.

pub mod config;
pub mod errors;
pub mod memory;
pub mod models;
pub mod traits;

pub use config::CortexConfig;
pub use errors::{CortexError, CortexResult};
pub use memory::BaseMemory;
