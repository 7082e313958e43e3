//! Parser for TOSEC DAT catalog files.
//!
//! Handles the bracketed ClrMamePro-style text format and its Logiqx XML
//! equivalent. Parsing is pure: no database or filesystem access beyond the
//! `parse_dat_file` convenience.

pub mod dat;
pub mod error;
mod xml;

pub use dat::{
    DatFile, DatHeader, DatParser, GameRecord, RomRecord, parse_dat, parse_dat_file,
    parse_dat_str,
};
pub use error::{DatError, RecordSkipped, SkipReason};
