//! Importer configuration.
//!
//! Settings live in `~/.config/tosec-import/settings.toml`:
//!
//! ```toml
//! [import]
//! dat_path = "/srv/dats"
//! db_path = "/srv/tosec.db"
//! ```
//!
//! Catalog files are expected under `<dat_path>/TOSEC`.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Directory under the DAT root holding the TOSEC catalog files.
pub const TOSEC_SUBDIR: &str = "TOSEC";

/// Explicit configuration passed to the [`Importer`](crate::Importer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    /// Root of the DAT collection.
    pub dat_root: PathBuf,
    /// SQLite database file.
    pub db_path: PathBuf,
}

impl ImportConfig {
    pub fn new(dat_root: impl Into<PathBuf>) -> Self {
        Self {
            dat_root: dat_root.into(),
            db_path: default_db_path(),
        }
    }

    pub fn with_db_path(mut self, db_path: impl Into<PathBuf>) -> Self {
        self.db_path = db_path.into();
        self
    }

    /// Directory scanned when no explicit files are given.
    pub fn base_dir(&self) -> PathBuf {
        self.dat_root.join(TOSEC_SUBDIR)
    }

    /// Resolve configuration using a priority chain:
    ///
    /// 1. CLI override (if `Some`)
    /// 2. Value saved in `settings.toml`
    /// 3. Current working directory / default database location
    pub fn resolve(dat_override: Option<PathBuf>, db_override: Option<PathBuf>) -> Self {
        Self::resolve_with(&settings_path(), dat_override, db_override)
    }

    /// Same as [`ImportConfig::resolve`] with an explicit settings file.
    pub fn resolve_with(
        settings: &Path,
        dat_override: Option<PathBuf>,
        db_override: Option<PathBuf>,
    ) -> Self {
        let saved = load_settings(settings).unwrap_or_default();

        let dat_root = dat_override
            .or(saved.import.dat_path)
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
        let db_path = db_override
            .or(saved.import.db_path)
            .unwrap_or_else(default_db_path);

        Self { dat_root, db_path }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Settings {
    import: ImportSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ImportSection {
    dat_path: Option<PathBuf>,
    db_path: Option<PathBuf>,
}

/// Canonical path to the settings file: `~/.config/tosec-import/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("tosec-import").join("settings.toml")
}

/// Default database location: `<data dir>/tosec-import/tosec.db`.
pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tosec-import")
        .join("tosec.db")
}

fn load_settings(path: &Path) -> Option<Settings> {
    let contents = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&contents) {
        Ok(settings) => Some(settings),
        Err(e) => {
            log::warn!("Ignoring malformed settings file {}: {}", path.display(), e);
            None
        }
    }
}
