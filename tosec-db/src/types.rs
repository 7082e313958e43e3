//! Row types for the catalog tables.

/// Fields for a new `categories` row, borrowed from the parsed header.
#[derive(Debug, Clone, Copy, Default)]
pub struct NewCategory<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub version: &'a str,
    pub author: &'a str,
    /// DAT file the category was imported from, if any.
    pub source_path: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NewGame<'a> {
    pub name: &'a str,
    pub description: &'a str,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NewRom<'a> {
    pub name: &'a str,
    pub size: u64,
    pub crc: &'a str,
    /// Empty when the DAT had no MD5.
    pub md5: &'a str,
    /// Empty when the DAT had no SHA1.
    pub sha1: &'a str,
}

/// A persisted category (one imported DAT file).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub category: String,
    pub version: String,
    pub author: String,
    pub source_path: Option<String>,
    pub imported_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rom {
    pub id: i64,
    pub game_id: i64,
    pub name: String,
    pub size: u64,
    pub crc: String,
    pub md5: String,
    pub sha1: String,
}
