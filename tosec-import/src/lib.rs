//! Import TOSEC DAT files into the catalog database.
//!
//! This crate owns the import flow: resolving which files to read, running
//! the parser, and persisting each file as one transactional unit.

pub mod config;
pub mod error;
pub mod importer;
pub mod progress;

pub use config::ImportConfig;
pub use error::ImportError;
pub use importer::{BatchSummary, FileStats, Importer, import_dat, validate_header};
pub use progress::{ImportProgress, LogProgress, SilentProgress};
