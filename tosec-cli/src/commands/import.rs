use std::path::PathBuf;

use tosec_import::{ImportConfig, Importer};

use crate::CliError;
use crate::progress::CliImportProgress;

/// Import DAT files into the catalog database.
pub(crate) fn run_import(
    config: ImportConfig,
    files: Vec<PathBuf>,
    quiet: bool,
) -> Result<(), CliError> {
    let conn = tosec_db::open_database(&config.db_path).map_err(|e| {
        CliError::database(format!(
            "Failed to open catalog database at {}: {}",
            config.db_path.display(),
            e
        ))
    })?;

    log::debug!("Using database {}", config.db_path.display());

    let progress = CliImportProgress::new(quiet);
    let importer = Importer::new(&conn, config).with_progress(&progress);
    let summary = importer.run(files)?;

    if !summary.is_success() {
        return Err(CliError::ImportFailed {
            failed: summary.files_failed(),
            total: summary.files_total,
        });
    }

    Ok(())
}
