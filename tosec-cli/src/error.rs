use thiserror::Error;
use tosec_import::ImportError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Database could not be opened or queried
    #[error("Database error: {0}")]
    Database(String),

    /// Import aborted before any file was processed
    #[error("{0}")]
    Import(#[from] ImportError),

    /// Some files in the batch failed
    #[error("{failed} of {total} file(s) failed to import")]
    ImportFailed { failed: usize, total: usize },

    /// Hash argument is not a CRC32, MD5 or SHA1
    #[error("Not a CRC32, MD5 or SHA1 hash: {0}")]
    InvalidHash(String),
}

impl CliError {
    pub(crate) fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub(crate) fn invalid_hash(msg: impl Into<String>) -> Self {
        Self::InvalidHash(msg.into())
    }
}
