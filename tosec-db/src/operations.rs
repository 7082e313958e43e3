//! Create operations for categories, games and ROMs.
//!
//! Each insert returns the new row id. Callers that need all-or-nothing
//! behaviour wrap a sequence of inserts in a transaction.

use rusqlite::{Connection, params};
use thiserror::Error;

use crate::types::{NewCategory, NewGame, NewRom};

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Entity not found: {entity_type} with id '{id}'")]
    NotFound { entity_type: String, id: String },
    #[error("Invalid {entity_type}: {field} must not be empty")]
    Validation {
        entity_type: &'static str,
        field: &'static str,
    },
    #[error("ROM size {0} does not fit in the database")]
    SizeOverflow(u64),
}

impl OperationError {
    /// True for SQLite constraint failures (NOT NULL, CHECK, UNIQUE, FOREIGN KEY).
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            OperationError::Sqlite(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation
        )
    }
}

fn require(
    entity_type: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), OperationError> {
    if value.trim().is_empty() {
        return Err(OperationError::Validation { entity_type, field });
    }
    Ok(())
}

// ── Category Operations ─────────────────────────────────────────────────────

/// Insert a category. Returns the generated ID.
pub fn insert_category(conn: &Connection, category: &NewCategory<'_>) -> Result<i64, OperationError> {
    require("category", "name", category.name)?;
    conn.execute(
        "INSERT INTO categories (name, description, category, version, author, source_path)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            category.name,
            category.description,
            category.category,
            category.version,
            category.author,
            category.source_path,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

// ── Game Operations ─────────────────────────────────────────────────────────

/// Insert a game owned by `category_id`. Returns the generated ID.
pub fn insert_game(
    conn: &Connection,
    category_id: i64,
    game: &NewGame<'_>,
) -> Result<i64, OperationError> {
    require("game", "name", game.name)?;
    conn.execute(
        "INSERT INTO games (category_id, name, description) VALUES (?1, ?2, ?3)",
        params![category_id, game.name, game.description],
    )?;
    Ok(conn.last_insert_rowid())
}

// ── ROM Operations ──────────────────────────────────────────────────────────

/// Insert a ROM owned by `game_id`. Returns the generated ID.
pub fn insert_rom(conn: &Connection, game_id: i64, rom: &NewRom<'_>) -> Result<i64, OperationError> {
    require("rom", "name", rom.name)?;
    require("rom", "crc", rom.crc)?;
    let size = i64::try_from(rom.size).map_err(|_| OperationError::SizeOverflow(rom.size))?;
    conn.execute(
        "INSERT INTO roms (game_id, name, size, crc, md5, sha1)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![game_id, rom.name, size, rom.crc, rom.md5, rom.sha1],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Delete a category and, through cascading keys, its games and ROMs.
pub fn delete_category(conn: &Connection, id: i64) -> Result<(), OperationError> {
    let changed = conn.execute("DELETE FROM categories WHERE id = ?1", params![id])?;
    if changed == 0 {
        return Err(OperationError::NotFound {
            entity_type: "category".to_string(),
            id: id.to_string(),
        });
    }
    Ok(())
}
