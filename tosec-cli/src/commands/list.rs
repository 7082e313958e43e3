use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use tosec_import::ImportConfig;

use super::{open_existing, truncate_str};
use crate::CliError;

pub(crate) fn run_list(config: &ImportConfig) -> Result<(), CliError> {
    let Some(conn) = open_existing(config)? else {
        return Ok(());
    };

    let rows = tosec_db::list_categories(&conn)
        .map_err(|e| CliError::database(format!("Failed to list categories: {}", e)))?;

    if rows.is_empty() {
        log::info!("No categories imported yet.");
        return Ok(());
    }

    log::info!(
        "{}",
        format!("{:>5}  {:>7}  {:<60}  {}", "ID", "Games", "Name", "Version")
            .if_supports_color(Stderr, |t| t.bold()),
    );
    for row in &rows {
        log::info!(
            "{:>5}  {:>7}  {:<60}  {}",
            row.category.id,
            row.game_count,
            truncate_str(&row.category.name, 60),
            row.category.version,
        );
    }

    Ok(())
}
