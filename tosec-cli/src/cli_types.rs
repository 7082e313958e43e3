//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tosec-import")]
#[command(about = "Import TOSEC DAT catalogs into a SQLite database", long_about = None)]
pub(crate) struct Cli {
    /// Catalog database file (defaults to settings.toml, then the user data directory)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Root of the DAT collection; catalogs are read from <DAT_PATH>/TOSEC
    #[arg(long, global = true)]
    pub dat_path: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Import DAT files (defaults to every file in <DAT_PATH>/TOSEC)
    Import {
        /// DAT files to import, in order
        files: Vec<PathBuf>,
    },

    /// List imported categories
    List,

    /// Show row counts for the catalog database
    Stats,

    /// Find ROMs by CRC32, MD5 or SHA1 (chosen by length)
    Lookup {
        /// Hash in hex
        hash: String,
    },

    /// Remove an imported category with its games and ROMs
    Remove {
        /// Category ID as shown by `list`
        id: i64,
    },

    /// Show the resolved configuration
    Config,
}
