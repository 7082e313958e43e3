//! tosec-import CLI
//!
//! Command-line interface for importing TOSEC DAT catalogs into SQLite.

mod cli_types;
mod commands;
mod error;
mod logging;
mod progress;

use std::process::ExitCode;

use clap::Parser;

use tosec_import::ImportConfig;

use cli_types::{Cli, Commands};
pub(crate) use error::CliError;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        log::warn!("Could not open log file: {}", e);
    }

    let config = ImportConfig::resolve(cli.dat_path, cli.db);

    let result = match cli.command {
        Commands::Import { files } => commands::import::run_import(config, files, cli.quiet),
        Commands::List => commands::list::run_list(&config),
        Commands::Stats => commands::stats::run_stats(&config),
        Commands::Lookup { hash } => commands::lookup::run_lookup(&config, &hash),
        Commands::Remove { id } => commands::remove::run_remove(&config, id),
        Commands::Config => {
            commands::config::run_config(&config);
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
