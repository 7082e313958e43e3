use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use tosec_import::ImportConfig;

use super::open_existing;
use crate::CliError;

pub(crate) fn run_stats(config: &ImportConfig) -> Result<(), CliError> {
    let Some(conn) = open_existing(config)? else {
        return Ok(());
    };

    let stats = tosec_db::catalog_stats(&conn)
        .map_err(|e| CliError::database(format!("Failed to query catalog stats: {}", e)))?;

    log::info!(
        "{}",
        "Catalog Database Statistics".if_supports_color(Stderr, |t| t.bold()),
    );
    log::info!("  Database: {}", config.db_path.display());
    crate::logging::log_blank();
    log::info!("  Categories:  {:>10}", stats.categories);
    log::info!("  Games:       {:>10}", stats.games);
    log::info!("  Roms:        {:>10}", stats.roms);

    Ok(())
}
