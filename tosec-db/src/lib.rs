//! SQLite persistence layer for imported TOSEC catalogs.
//!
//! Provides schema creation, create operations, and query APIs
//! backed by SQLite (via rusqlite with bundled feature).

pub mod operations;
pub mod queries;
pub mod schema;
pub mod types;

pub use operations::{OperationError, delete_category, insert_category, insert_game, insert_rom};
pub use queries::{
    CatalogStats, CategoryRow, catalog_stats, find_category, find_game, find_roms_by_crc, find_roms_by_md5,
    find_roms_by_sha1, games_for_category, list_categories, roms_for_game,
};
pub use schema::{SchemaError, open_database, open_memory};
pub use types::{Category, Game, NewCategory, NewGame, NewRom, Rom};
