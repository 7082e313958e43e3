use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;
use rusqlite::Connection;

use tosec_db::{OperationError, Rom};
use tosec_import::ImportConfig;

use super::open_existing;
use crate::CliError;

/// Hash kinds, distinguished by hex length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HashKind {
    Crc32,
    Md5,
    Sha1,
}

impl HashKind {
    fn detect(hash: &str) -> Option<Self> {
        if !hash.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match hash.len() {
            8 => Some(Self::Crc32),
            32 => Some(Self::Md5),
            40 => Some(Self::Sha1),
            _ => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Crc32 => "CRC32",
            Self::Md5 => "MD5",
            Self::Sha1 => "SHA1",
        }
    }

    fn find(self, conn: &Connection, hash: &str) -> Result<Vec<Rom>, OperationError> {
        match self {
            Self::Crc32 => tosec_db::find_roms_by_crc(conn, hash),
            Self::Md5 => tosec_db::find_roms_by_md5(conn, hash),
            Self::Sha1 => tosec_db::find_roms_by_sha1(conn, hash),
        }
    }
}

pub(crate) fn run_lookup(config: &ImportConfig, hash: &str) -> Result<(), CliError> {
    let kind = HashKind::detect(hash).ok_or_else(|| CliError::invalid_hash(hash))?;

    let Some(conn) = open_existing(config)? else {
        return Ok(());
    };

    let roms = kind
        .find(&conn, hash)
        .map_err(|e| CliError::database(format!("Lookup failed: {}", e)))?;

    if roms.is_empty() {
        log::info!("No ROMs with {} {}", kind.label(), hash.to_lowercase());
        return Ok(());
    }

    for rom in &roms {
        let game = tosec_db::find_game(&conn, rom.game_id)
            .map_err(|e| CliError::database(e.to_string()))?;
        let category = match &game {
            Some(g) => tosec_db::find_category(&conn, g.category_id)
                .map_err(|e| CliError::database(e.to_string()))?,
            None => None,
        };

        log::info!(
            "{}",
            rom.name.if_supports_color(Stderr, |t| t.bold()),
        );
        log::info!("  Size:     {}", rom.size);
        log::info!("  CRC32:    {}", rom.crc);
        if !rom.md5.is_empty() {
            log::info!("  MD5:      {}", rom.md5);
        }
        if !rom.sha1.is_empty() {
            log::info!("  SHA1:     {}", rom.sha1);
        }
        if let Some(game) = &game {
            log::info!("  Game:     {}", game.name);
        }
        if let Some(category) = &category {
            log::info!("  Category: {} [{}]", category.name, category.id);
        }
    }

    Ok(())
}
