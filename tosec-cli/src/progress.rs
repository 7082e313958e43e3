//! Terminal progress reporter for imports.

use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use tosec_dat::RecordSkipped;
use tosec_import::{BatchSummary, FileStats, ImportError, ImportProgress};

/// Shows a file-level progress bar and logs one line per event.
pub(crate) struct CliImportProgress {
    bar: ProgressBar,
}

impl CliImportProgress {
    pub(crate) fn new(quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(0)
        };
        bar.set_style(
            ProgressStyle::with_template("  {bar:30.cyan/blue} {pos}/{len} {wide_msg}")
                .expect("static pattern")
                .progress_chars("=> "),
        );
        Self { bar }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Tag for a failed file: catalogs the store refused are "rejected",
/// anything else (unreadable, malformed) "failed".
fn failure_label(error: &ImportError) -> &'static str {
    if error.is_validation() {
        "rejected"
    } else {
        "failed"
    }
}

impl ImportProgress for CliImportProgress {
    fn on_file(&self, current: usize, total: usize, path: &Path) {
        self.bar.set_length(total as u64);
        self.bar.set_position(current.saturating_sub(1) as u64);
        self.bar.set_message(display_name(path));
        self.bar.suspend(|| {
            log::info!("Importing {} [{} of {}]", path.display(), current, total);
        });
    }

    fn on_skipped(&self, path: &Path, skipped: &RecordSkipped) {
        self.bar.suspend(|| {
            log::warn!(
                "  {} {}: {}",
                "\u{26A0}".if_supports_color(Stderr, |t| t.yellow()),
                display_name(path),
                skipped,
            );
        });
    }

    fn on_file_failed(&self, path: &Path, error: &ImportError) {
        self.bar.inc(1);
        self.bar.suspend(|| {
            log::error!(
                "  {} {} ({}): {}",
                "\u{2718}".if_supports_color(Stderr, |t| t.red()),
                display_name(path).if_supports_color(Stderr, |t| t.bold()),
                failure_label(error),
                error,
            );
        });
    }

    fn on_file_done(&self, path: &Path, stats: &FileStats) {
        self.bar.inc(1);
        self.bar.suspend(|| {
            log::info!(
                "  {} {}: {} games, {} roms, {} skipped",
                "\u{2714}".if_supports_color(Stderr, |t| t.green()),
                display_name(path).if_supports_color(Stderr, |t| t.bold()),
                stats.games,
                stats.roms,
                stats.skipped,
            );
        });
    }

    fn on_complete(&self, summary: &BatchSummary) {
        self.bar.finish_and_clear();

        crate::logging::log_blank();
        log::info!(
            "{}",
            "Import complete".if_supports_color(Stderr, |t| t.bold()),
        );
        log::info!(
            "  Files: {} imported, {} failed, {} total",
            summary.files_imported,
            summary.files_failed(),
            summary.files_total,
        );
        log::info!("  Games: {}", summary.games);
        log::info!("  Roms: {}", summary.roms);
        if summary.skipped > 0 {
            log::info!("  Skipped entries: {}", summary.skipped);
        }
        for (path, error) in &summary.failures {
            log::warn!("  Failed: {}: {}", path.display(), error);
        }
    }
}
