use std::path::PathBuf;

use thiserror::Error;
use tosec_dat::DatError;
use tosec_db::OperationError;

#[derive(Debug, Error)]
pub enum ImportError {
    /// No explicit inputs were given and the base directory is missing.
    #[error("No TOSEC catalog found at {}", path.display())]
    Configuration { path: PathBuf },

    /// The base directory exists but could not be listed.
    #[error("Failed to scan {}: {source}", path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: DatError,
    },

    /// The parsed catalog cannot become a valid category.
    #[error("Invalid catalog: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Db(#[from] OperationError),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl ImportError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Errors that stop the whole batch rather than a single file.
    pub fn is_fatal_to_run(&self) -> bool {
        matches!(self, Self::Configuration { .. } | Self::Scan { .. })
    }

    /// Validation failures, including constraints rejected by the store.
    pub fn is_validation(&self) -> bool {
        match self {
            Self::Validation(_) => true,
            Self::Db(e) => matches!(e, OperationError::Validation { .. }) || e.is_constraint_violation(),
            _ => false,
        }
    }
}
