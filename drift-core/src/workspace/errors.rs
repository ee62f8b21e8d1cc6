//! Workspace error types.
//! One error enum covering all workspace operations.

#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    // Initialization
    #[error("Workspace already initialized at {0}")]
    AlreadyInitialized(String),

    #[error("Workspace not initialized. Run `drift init` first.")]
    NotInitialized,

    // Locking
    #[error("Workspace locked: {message} (operation: {operation})")]
    Locked { operation: String, message: String },

    // Migration
    #[error("Migration failed: {message}")]
    MigrationFailed { message: String },

    // Project
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Ambiguous project identifier '{identifier}'. Matches: {matches:?}")]
    AmbiguousProject {
        identifier: String,
        matches: Vec<String>,
    },

    // Config
    #[error("Configuration error: {0}")]
    ConfigError(String),

    // Storage
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    // IO
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // TOML
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl WorkspaceError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyInitialized(_) => "ALREADY_INITIALIZED",
            Self::NotInitialized => "NOT_INITIALIZED",
            Self::Locked { .. } => "WORKSPACE_LOCKED",
            Self::MigrationFailed { .. } => "MIGRATION_FAILED",
            Self::ProjectNotFound(_) => "PROJECT_NOT_FOUND",
            Self::AmbiguousProject { .. } => "AMBIGUOUS_PROJECT",
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::TomlParse(_) => "CONFIG_PARSE_ERROR",
        }
    }
}

pub type WorkspaceResult<T> = Result<T, WorkspaceError>;
