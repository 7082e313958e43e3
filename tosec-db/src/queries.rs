//! Read queries for the catalog database.
//!
//! Provides listing, lookup by hash, and row counts.

use rusqlite::{Connection, Row, params};

use crate::operations::OperationError;
use crate::types::{Category, Game, Rom};

// ── Category Queries ────────────────────────────────────────────────────────

/// A category with the number of games it owns.
#[derive(Debug, Clone)]
pub struct CategoryRow {
    pub category: Category,
    pub game_count: u64,
}

/// List all categories in import order.
pub fn list_categories(conn: &Connection) -> Result<Vec<CategoryRow>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT c.id, c.name, c.description, c.category, c.version, c.author,
                c.source_path, c.imported_at,
                (SELECT COUNT(*) FROM games g WHERE g.category_id = c.id)
         FROM categories c ORDER BY c.id",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(CategoryRow {
            category: row_to_category(row)?,
            game_count: row.get::<_, i64>(8)? as u64,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Find a category by ID.
pub fn find_category(conn: &Connection, id: i64) -> Result<Option<Category>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, description, category, version, author, source_path, imported_at
         FROM categories WHERE id = ?1",
    )?;
    let result = stmt.query_row(params![id], row_to_category);
    match result {
        Ok(category) => Ok(Some(category)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

// ── Game Queries ────────────────────────────────────────────────────────────

/// List the games of a category in insertion (source) order.
pub fn games_for_category(conn: &Connection, category_id: i64) -> Result<Vec<Game>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, category_id, name, description FROM games
         WHERE category_id = ?1 ORDER BY id",
    )?;
    let rows = stmt.query_map(params![category_id], row_to_game)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Find a game by ID.
pub fn find_game(conn: &Connection, id: i64) -> Result<Option<Game>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, category_id, name, description FROM games WHERE id = ?1",
    )?;
    match stmt.query_row(params![id], row_to_game) {
        Ok(game) => Ok(Some(game)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

// ── ROM Lookups ─────────────────────────────────────────────────────────────

/// List the ROMs of a game in insertion (source) order.
pub fn roms_for_game(conn: &Connection, game_id: i64) -> Result<Vec<Rom>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, game_id, name, size, crc, md5, sha1 FROM roms
         WHERE game_id = ?1 ORDER BY id",
    )?;
    let rows = stmt.query_map(params![game_id], row_to_rom)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Find ROMs by CRC32 (case-insensitive).
pub fn find_roms_by_crc(conn: &Connection, crc: &str) -> Result<Vec<Rom>, OperationError> {
    find_roms_by("crc", conn, crc)
}

/// Find ROMs by MD5 (case-insensitive).
pub fn find_roms_by_md5(conn: &Connection, md5: &str) -> Result<Vec<Rom>, OperationError> {
    find_roms_by("md5", conn, md5)
}

/// Find ROMs by SHA1 (case-insensitive).
pub fn find_roms_by_sha1(conn: &Connection, sha1: &str) -> Result<Vec<Rom>, OperationError> {
    find_roms_by("sha1", conn, sha1)
}

fn find_roms_by(
    column: &'static str,
    conn: &Connection,
    hash: &str,
) -> Result<Vec<Rom>, OperationError> {
    // Hashes are stored lowercase, so the indexed column is compared directly.
    let sql = format!(
        "SELECT id, game_id, name, size, crc, md5, sha1 FROM roms WHERE {column} = ?1 ORDER BY id"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![hash.to_lowercase()], row_to_rom)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Statistics ──────────────────────────────────────────────────────────────

/// Row counts across the catalog.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CatalogStats {
    pub categories: u64,
    pub games: u64,
    pub roms: u64,
}

/// Count the rows of each catalog table.
pub fn catalog_stats(conn: &Connection) -> Result<CatalogStats, OperationError> {
    let count = |table: &str| -> Result<u64, OperationError> {
        let n: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
            row.get(0)
        })?;
        Ok(n as u64)
    };

    Ok(CatalogStats {
        categories: count("categories")?,
        games: count("games")?,
        roms: count("roms")?,
    })
}

// ── Helpers ─────────────────────────────────────────────────────────────────

fn row_to_category(row: &Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        category: row.get(3)?,
        version: row.get(4)?,
        author: row.get(5)?,
        source_path: row.get(6)?,
        imported_at: row.get(7)?,
    })
}

fn row_to_game(row: &Row<'_>) -> rusqlite::Result<Game> {
    Ok(Game {
        id: row.get(0)?,
        category_id: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
    })
}

fn row_to_rom(row: &Row<'_>) -> rusqlite::Result<Rom> {
    Ok(Rom {
        id: row.get(0)?,
        game_id: row.get(1)?,
        name: row.get(2)?,
        size: row.get::<_, i64>(3)? as u64,
        crc: row.get(4)?,
        md5: row.get(5)?,
        sha1: row.get(6)?,
    })
}
