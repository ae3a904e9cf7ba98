//! # Contactql - GraphQL CRUD over a contacts table
//!
//! Contactql provides:
//! - SQLite-backed storage for a single `contacts` table
//! - A GraphQL schema mapping each query and mutation to one SQL statement
//! - An axum HTTP server mounting the schema at `/graphql`

pub mod contact;
pub mod storage;
pub mod graphql;
pub mod server;
pub mod config;

// Re-exports for convenient access
pub use contact::{Contact, ContactFields};
pub use storage::{ContactStore, SqliteStore};
pub use graphql::{ContactSchema, build_schema};
pub use config::{ContactqlConfig, ServerSettings};

/// Result type alias for Contactql operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Contactql operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Message is the SQLite engine's own text
    #[error("{0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error in {}: {source}", .path.display())]
    Config {
        path: std::path::PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid contact id: {0}")]
    InvalidId(String),

    #[error("Contact {0} not found")]
    NotFound(i64),

    #[error("Storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Storage connection poisoned")]
    Poisoned,
}

impl Error {
    /// True for a UNIQUE constraint failure (duplicate email)
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            Error::Storage(rusqlite::Error::SqliteFailure(err, _))
                if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        )
    }

    /// Stable machine-readable code exposed in GraphQL error extensions
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidId(_) => "BAD_USER_INPUT",
            Error::NotFound(_) => "NOT_FOUND",
            e if e.is_unique_violation() => "CONSTRAINT_VIOLATION",
            _ => "STORAGE_ERROR",
        }
    }
}
