//! Import progress reporting.

use std::path::Path;

use tosec_dat::RecordSkipped;

use crate::error::ImportError;
use crate::importer::{BatchSummary, FileStats};

/// Trait for receiving import progress updates.
pub trait ImportProgress {
    /// Called before each file is processed. `current` is 1-based.
    fn on_file(&self, current: usize, total: usize, path: &Path);

    /// Called for each game entry the parser had to leave out.
    fn on_skipped(&self, path: &Path, skipped: &RecordSkipped);

    /// Called when a file could not be imported. The batch continues.
    fn on_file_failed(&self, path: &Path, error: &ImportError);

    /// Called after a file's rows were committed.
    fn on_file_done(&self, path: &Path, stats: &FileStats);

    /// Called when the batch is complete.
    fn on_complete(&self, summary: &BatchSummary);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl ImportProgress for SilentProgress {
    fn on_file(&self, _current: usize, _total: usize, _path: &Path) {}
    fn on_skipped(&self, _path: &Path, _skipped: &RecordSkipped) {}
    fn on_file_failed(&self, _path: &Path, _error: &ImportError) {}
    fn on_file_done(&self, _path: &Path, _stats: &FileStats) {}
    fn on_complete(&self, _summary: &BatchSummary) {}
}

/// A progress reporter that logs to the `log` crate.
pub struct LogProgress;

impl ImportProgress for LogProgress {
    fn on_file(&self, current: usize, total: usize, path: &Path) {
        log::info!("Importing {} [{} of {}]", path.display(), current, total);
    }

    fn on_skipped(&self, path: &Path, skipped: &RecordSkipped) {
        log::warn!("  {}: {}", path.display(), skipped);
    }

    fn on_file_failed(&self, path: &Path, error: &ImportError) {
        log::error!("  {}: import failed: {}", path.display(), error);
    }

    fn on_file_done(&self, path: &Path, stats: &FileStats) {
        log::info!(
            "  {}: {} games, {} roms, {} skipped",
            path.display(),
            stats.games,
            stats.roms,
            stats.skipped,
        );
    }

    fn on_complete(&self, summary: &BatchSummary) {
        log::info!(
            "Imported {} of {} file(s): {} games, {} roms, {} skipped, {} failed",
            summary.files_imported,
            summary.files_total,
            summary.games,
            summary.roms,
            summary.skipped,
            summary.files_failed(),
        );
    }
}
