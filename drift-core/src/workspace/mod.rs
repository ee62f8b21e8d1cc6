//! Workspace management — project lifecycle orchestrator.
//!
//! This is the first thing that runs on every CLI command, every MCP tool call,
//! every IDE interaction. Without it, there is no `.drift/` directory, no `drift.db`,
//! no configuration, no project context.
//!
//! ## Components
//! - **lock** — Workspace locking via `fd-lock` for concurrent access safety
//! - **project** — Multi-project switching with health indicators
//! - **context** — Event-driven context refresh (zero staleness)
//! - **detect** — Language and framework auto-detection

pub mod context;
pub mod detect;
pub mod errors;
pub mod lock;
pub mod project;

pub use context::{
    get_agent_context, get_workspace_context, refresh_workspace_context, AgentProjectContext,
    AnalysisStatus, ProjectContext, WorkspaceContext,
};
pub use detect::{detect_frameworks, detect_languages, generate_config_template};
pub use errors::{WorkspaceError, WorkspaceResult};
pub use lock::WorkspaceLock;
pub use project::{
    format_project_header, format_project_indicator, generate_project_id, get_active_project,
    list_projects, resolve_project, switch_project, HealthStatus, ProjectInfo,
};
