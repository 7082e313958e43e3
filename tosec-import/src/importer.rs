//! Import TOSEC DAT files into the catalog database.
//!
//! Each file becomes one Category with its Games and Roms, written in a
//! single transaction: a failure anywhere in the file leaves no rows behind.
//! Files are independent, so one bad file never stops the batch.

use std::path::{Path, PathBuf};

use rusqlite::Connection;
use tosec_dat::{DatFile, DatHeader};
use tosec_db::operations;
use tosec_db::{NewCategory, NewGame, NewRom};

use crate::config::ImportConfig;
use crate::error::ImportError;
use crate::progress::{ImportProgress, SilentProgress};

/// Statistics from a single file import.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FileStats {
    pub category_id: i64,
    pub games: u64,
    pub roms: u64,
    /// Game entries the parser left out.
    pub skipped: u64,
}

/// Outcome of a whole batch.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub files_total: usize,
    pub files_imported: usize,
    pub games: u64,
    pub roms: u64,
    pub skipped: u64,
    /// Files that failed, with the error message.
    pub failures: Vec<(PathBuf, String)>,
}

impl BatchSummary {
    pub fn files_failed(&self) -> usize {
        self.failures.len()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, stats: &FileStats) {
        self.files_imported += 1;
        self.games += stats.games;
        self.roms += stats.roms;
        self.skipped += stats.skipped;
    }
}

/// Check that a header can become a category.
pub fn validate_header(header: &DatHeader) -> Result<(), ImportError> {
    if header.name.trim().is_empty() {
        return Err(ImportError::validation("header has no name"));
    }
    Ok(())
}

/// Persist a parsed DAT file as one Category with its Games and Roms.
///
/// Nothing is written unless every row succeeds. `source` is stored on the
/// category for reference. Importing the same file twice creates two
/// categories; there is no deduplication key.
pub fn import_dat(
    conn: &Connection,
    dat: &DatFile,
    source: Option<&Path>,
) -> Result<FileStats, ImportError> {
    validate_header(&dat.header)?;

    let source = source.map(|p| p.to_string_lossy());
    let header = &dat.header;
    let mut stats = FileStats {
        skipped: dat.skipped.len() as u64,
        ..FileStats::default()
    };

    let tx = conn.unchecked_transaction()?;

    stats.category_id = operations::insert_category(
        &tx,
        &NewCategory {
            name: &header.name,
            description: &header.description,
            category: &header.category,
            version: &header.version,
            author: &header.author,
            source_path: source.as_deref(),
        },
    )?;

    for game in &dat.games {
        let game_id = operations::insert_game(
            &tx,
            stats.category_id,
            &NewGame {
                name: &game.name,
                description: &game.description,
            },
        )?;
        stats.games += 1;

        for rom in &game.roms {
            operations::insert_rom(
                &tx,
                game_id,
                &NewRom {
                    name: &rom.name,
                    size: rom.size,
                    crc: &rom.crc,
                    md5: rom.md5(),
                    sha1: rom.sha1(),
                },
            )?;
            stats.roms += 1;
        }
    }

    tx.commit()?;

    Ok(stats)
}

/// Drives the parser and the store over a list of DAT files.
pub struct Importer<'a> {
    conn: &'a Connection,
    config: ImportConfig,
    progress: &'a dyn ImportProgress,
}

impl<'a> Importer<'a> {
    pub fn new(conn: &'a Connection, config: ImportConfig) -> Self {
        Self {
            conn,
            config,
            progress: &SilentProgress,
        }
    }

    pub fn with_progress(mut self, progress: &'a dyn ImportProgress) -> Self {
        self.progress = progress;
        self
    }

    /// Determine which files to import.
    ///
    /// Explicit paths are returned as given. Otherwise every regular file
    /// directly inside the base directory is returned, sorted by name.
    pub fn resolve_inputs(&self, paths: Vec<PathBuf>) -> Result<Vec<PathBuf>, ImportError> {
        if !paths.is_empty() {
            return Ok(paths);
        }

        let base = self.config.base_dir();
        if !base.is_dir() {
            return Err(ImportError::Configuration { path: base });
        }

        let entries = std::fs::read_dir(&base).map_err(|source| ImportError::Scan {
            path: base.clone(),
            source,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| ImportError::Scan {
                path: base.clone(),
                source,
            })?;
            let path = entry.path();
            if path.is_file() {
                files.push(path);
            }
        }
        files.sort();

        log::debug!("Found {} file(s) in {}", files.len(), base.display());
        Ok(files)
    }

    /// Read, parse and persist one file.
    pub fn import_file(&self, path: &Path) -> Result<FileStats, ImportError> {
        let bytes = std::fs::read(path).map_err(|source| ImportError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let dat = tosec_dat::parse_dat(bytes.as_slice()).map_err(|source| ImportError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        for skipped in &dat.skipped {
            self.progress.on_skipped(path, skipped);
        }

        log::debug!(
            "Parsed {}: '{}' with {} game(s)",
            path.display(),
            dat.header.name,
            dat.games.len()
        );

        import_dat(self.conn, &dat, Some(path))
    }

    /// Import every input in order.
    ///
    /// Per-file failures are reported and recorded in the summary; only a
    /// configuration problem aborts the run.
    pub fn run(&self, paths: Vec<PathBuf>) -> Result<BatchSummary, ImportError> {
        let files = self.resolve_inputs(paths)?;
        let total = files.len();
        let mut summary = BatchSummary {
            files_total: total,
            ..BatchSummary::default()
        };

        for (i, path) in files.iter().enumerate() {
            self.progress.on_file(i + 1, total, path);

            match self.import_file(path) {
                Ok(stats) => {
                    self.progress.on_file_done(path, &stats);
                    summary.record(&stats);
                }
                Err(e) => {
                    self.progress.on_file_failed(path, &e);
                    summary.failures.push((path.clone(), e.to_string()));
                }
            }
        }

        self.progress.on_complete(&summary);
        Ok(summary)
    }
}
