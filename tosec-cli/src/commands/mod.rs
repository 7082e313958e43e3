pub(crate) mod config;
pub(crate) mod import;
pub(crate) mod list;
pub(crate) mod lookup;
pub(crate) mod remove;
pub(crate) mod stats;

use rusqlite::Connection;
use tosec_import::ImportConfig;

use crate::CliError;

/// Open the configured database, or `None` (with a hint) if it doesn't exist yet.
pub(crate) fn open_existing(config: &ImportConfig) -> Result<Option<Connection>, CliError> {
    if !config.db_path.exists() {
        log::warn!("No catalog database found at {}", config.db_path.display());
        log::info!("Run 'tosec-import import' to create one.");
        return Ok(None);
    }

    tosec_db::open_database(&config.db_path)
        .map(Some)
        .map_err(|e| CliError::database(format!("Failed to open catalog database: {}", e)))
}

/// Truncate a string to a maximum width, appending "..." if needed.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let head: String = s.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max).collect()
    }
}
