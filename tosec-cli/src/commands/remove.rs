use tosec_db::OperationError;
use tosec_import::ImportConfig;

use super::open_existing;
use crate::CliError;

pub(crate) fn run_remove(config: &ImportConfig, id: i64) -> Result<(), CliError> {
    let Some(conn) = open_existing(config)? else {
        return Ok(());
    };

    match tosec_db::delete_category(&conn, id) {
        Ok(()) => {
            log::info!("Removed category {}", id);
            Ok(())
        }
        Err(OperationError::NotFound { .. }) => {
            log::warn!("No category with ID {}", id);
            Ok(())
        }
        Err(e) => Err(CliError::database(format!("Failed to remove category: {}", e))),
    }
}
