/// Errors that abort parsing of a whole DAT file.
#[derive(Debug, thiserror::Error)]
pub enum DatError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    /// For XML input `line` counts games instead: a game's position among
    /// games, or the number of games before any other element.
    #[error("Unclosed '{keyword}' block opened at line {line}")]
    UnclosedBlock { keyword: String, line: usize },

    #[error("Unexpected ')' at line {line} with no open block")]
    UnexpectedClose { line: usize },

    #[error("Unterminated quoted string at line {line}")]
    UnterminatedQuote { line: usize },
}

impl DatError {
    pub fn unclosed(keyword: impl Into<String>, line: usize) -> Self {
        Self::UnclosedBlock {
            keyword: keyword.into(),
            line,
        }
    }
}

/// Why a single game entry was left out of the parse result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
    #[error("game has no name")]
    MissingGameName,

    #[error("game has no rom entries")]
    NoRoms,

    #[error("rom has no name")]
    MissingRomName,

    #[error("rom '{rom}' has no size")]
    MissingSize { rom: String },

    #[error("rom '{rom}' has non-numeric size '{value}'")]
    InvalidSize { rom: String, value: String },

    #[error("rom '{rom}' has no crc")]
    MissingCrc { rom: String },
}

/// A game entry that could not be turned into a record.
///
/// Non-fatal: the rest of the file is still parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("skipped game '{game}' (line {line}): {reason}")]
pub struct RecordSkipped {
    /// Game name if one was seen, otherwise empty.
    pub game: String,
    /// Line on which the game block opened (the element's position among
    /// games for XML input).
    pub line: usize,
    pub reason: SkipReason,
}
