/// Storage subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("sqlite error: {message}")]
    SqliteError { message: String },

    #[error("connection pool exhausted")]
    PoolExhausted,

    #[error("migration failed: {0}")]
    MigrationFailed(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("database busy")]
    Busy,

    #[error("database corrupt: {0}")]
    Corrupt(String),
}
