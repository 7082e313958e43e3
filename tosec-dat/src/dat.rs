use std::io::{BufRead, Read};

use crate::error::{DatError, RecordSkipped, SkipReason};

/// A parsed TOSEC DAT file.
#[derive(Debug, Clone, Default)]
pub struct DatFile {
    pub header: DatHeader,
    /// Game records in source order.
    pub games: Vec<GameRecord>,
    /// Game entries left out of `games`, in source order.
    pub skipped: Vec<RecordSkipped>,
}

/// Metadata from the top-level `header ( ... )` block.
///
/// Keys absent from the source are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatHeader {
    pub name: String,
    pub description: String,
    pub category: String,
    pub version: String,
    pub author: String,
}

impl DatHeader {
    /// Keys recognised inside a header block.
    pub const KEYS: [&'static str; 5] = ["name", "description", "category", "version", "author"];

    /// Look up a header field by key, returning `""` for absent or unknown keys.
    pub fn get(&self, key: &str) -> &str {
        match key {
            "name" => &self.name,
            "description" => &self.description,
            "category" => &self.category,
            "version" => &self.version,
            "author" => &self.author,
            _ => "",
        }
    }

    /// Set a field by key. Returns false (and changes nothing) for unknown keys.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> bool {
        let slot = match key {
            "name" => &mut self.name,
            "description" => &mut self.description,
            "category" => &mut self.category,
            "version" => &mut self.version,
            "author" => &mut self.author,
            _ => return false,
        };
        *slot = value.into();
        true
    }

    /// True when no recognised key carried a value.
    pub fn is_empty(&self) -> bool {
        Self::KEYS.iter().all(|k| self.get(k).is_empty())
    }
}

/// A single game entry from a DAT file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub name: String,
    pub description: String,
    /// ROM entries in source order. Never empty for parsed records.
    pub roms: Vec<RomRecord>,
}

impl GameRecord {
    /// The first ROM of the game.
    pub fn rom(&self) -> Option<&RomRecord> {
        self.roms.first()
    }
}

/// A single ROM entry within a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RomRecord {
    pub name: String,
    pub size: u64,
    /// CRC32 checksum (lowercase hex)
    pub crc: String,
    /// MD5 checksum (lowercase hex), if present
    pub md5: Option<String>,
    /// SHA1 checksum (lowercase hex), if present
    pub sha1: Option<String>,
}

impl RomRecord {
    pub fn md5(&self) -> &str {
        self.md5.as_deref().unwrap_or("")
    }

    pub fn sha1(&self) -> &str {
        self.sha1.as_deref().unwrap_or("")
    }
}

/// Parse a DAT file, auto-detecting format (bracket text or Logiqx XML).
pub fn parse_dat<R: BufRead>(mut reader: R) -> Result<DatFile, DatError> {
    // Peek at the first non-whitespace content to detect format
    let mut first_bytes = Vec::new();
    let mut buf = [0u8; 1];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            return Ok(DatFile::default());
        }
        first_bytes.push(buf[0]);
        if !buf[0].is_ascii_whitespace() {
            break;
        }
    }

    // Build a chained reader with the peeked bytes + remaining data
    let chain = std::io::Cursor::new(first_bytes).chain(reader);
    let mut buffered = std::io::BufReader::new(chain);

    if buf[0] == b'<' {
        return crate::xml::parse_xml(buffered);
    }

    let mut parser = DatParser::new();
    let mut raw = Vec::new();
    loop {
        raw.clear();
        if buffered.read_until(b'\n', &mut raw)? == 0 {
            break;
        }
        parser.push_line(&String::from_utf8_lossy(&raw))?;
    }
    parser.finish()
}

/// Parse DAT text that is already in memory.
pub fn parse_dat_str(text: &str) -> Result<DatFile, DatError> {
    parse_dat(text.as_bytes())
}

/// Parse a DAT file from a file path.
pub fn parse_dat_file(path: &std::path::Path) -> Result<DatFile, DatError> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    parse_dat(reader)
}

// ---------------------------------------------------------------------------
// Bracket-format parser
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Open,
    Close,
    Word(String),
    Quoted(String),
}

#[derive(Debug)]
enum Value {
    Text(String),
    Block(Vec<Entry>),
}

#[derive(Debug)]
struct Entry {
    key: String,
    value: Value,
}

/// A block that has been opened but not yet closed.
#[derive(Debug)]
struct Frame {
    keyword: String,
    line: usize,
    entries: Vec<Entry>,
    /// Key waiting for its value, with the line it was read on.
    pending_key: Option<(String, usize)>,
}

impl Frame {
    fn new(keyword: String, line: usize) -> Self {
        Self {
            keyword: keyword.to_ascii_lowercase(),
            line,
            entries: Vec::new(),
            pending_key: None,
        }
    }
}

/// Incremental parser for the bracket format.
///
/// Format:
/// ```text
/// header (
///     name "Commodore C64 - Games - [D64]"
///     version 2023-01-01
/// )
///
/// game (
///     name "Game (1984)(Publisher)"
///     description "Game (1984)(Publisher)"
///     rom ( name "Game (1984)(Publisher).d64" size 174848 crc 1a2b3c4d md5 ... sha1 ... )
/// )
/// ```
///
/// Lines are fed one at a time with [`DatParser::push_line`]. The stack of
/// open frames is the nesting depth: a block only closes when the depth
/// drops back to the level it was opened at, so blocks may span lines or
/// share one.
#[derive(Debug, Default)]
pub struct DatParser {
    line: usize,
    stack: Vec<Frame>,
    /// Bare word seen at depth 0, waiting for its `(`.
    pending_keyword: Option<String>,
    header: DatHeader,
    header_seen: bool,
    games: Vec<GameRecord>,
    skipped: Vec<RecordSkipped>,
}

impl DatParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Feed the next line of the file.
    pub fn push_line(&mut self, line: &str) -> Result<(), DatError> {
        self.line += 1;
        let tokens = tokenize_line(line, self.line)?;
        let mut rest = tokens.as_slice();
        while let Some((token, tail)) = rest.split_first() {
            if self.expects_line_value() {
                let run = value_run(rest);
                if run > 1 {
                    let words: Vec<&str> = rest[..run].iter().filter_map(Token::word).collect();
                    self.push_token(Token::Word(words.join(" ")))?;
                    rest = &rest[run..];
                    continue;
                }
            }
            self.push_token(token.clone())?;
            rest = tail;
        }
        Ok(())
    }

    /// Finish parsing. Fails if any block is still open.
    pub fn finish(self) -> Result<DatFile, DatError> {
        if let Some(outer) = self.stack.first() {
            return Err(DatError::unclosed(&outer.keyword, outer.line));
        }
        Ok(DatFile {
            header: self.header,
            games: self.games,
            skipped: self.skipped,
        })
    }

    fn push_token(&mut self, token: Token) -> Result<(), DatError> {
        let line = self.line;
        match token {
            Token::Open => {
                let keyword = match self.stack.last_mut() {
                    Some(top) => top.pending_key.take().map(|(key, _)| key),
                    None => self.pending_keyword.take(),
                };
                self.stack
                    .push(Frame::new(keyword.unwrap_or_default(), line));
            }
            Token::Close => {
                let frame = self
                    .stack
                    .pop()
                    .ok_or(DatError::UnexpectedClose { line })?;
                match self.stack.last_mut() {
                    Some(parent) => parent.entries.push(Entry {
                        key: frame.keyword,
                        value: Value::Block(frame.entries),
                    }),
                    None => self.close_top_level(frame),
                }
            }
            Token::Word(text) | Token::Quoted(text) => match self.stack.last_mut() {
                // A key left over from an earlier line only survives to
                // name a block, so a new scalar replaces it.
                Some(top) => match top.pending_key.take() {
                    Some((key, key_line)) if key_line == line => top.entries.push(Entry {
                        key,
                        value: Value::Text(text),
                    }),
                    _ => top.pending_key = Some((text.to_ascii_lowercase(), line)),
                },
                None => self.pending_keyword = Some(text),
            },
        }
        Ok(())
    }

    /// True when a field of a top-level block has its key on this line and
    /// still lacks a value. Such values run to the end of the line.
    fn expects_line_value(&self) -> bool {
        match self.stack.as_slice() {
            [top] => top
                .pending_key
                .as_ref()
                .is_some_and(|(_, key_line)| *key_line == self.line),
            _ => false,
        }
    }

    fn close_top_level(&mut self, frame: Frame) {
        match frame.keyword.as_str() {
            "header" | "clrmamepro" => {
                if self.header_seen {
                    log::debug!("Ignoring extra header block at line {}", frame.line);
                    return;
                }
                self.header_seen = true;
                for entry in frame.entries {
                    if let Value::Text(text) = entry.value {
                        self.header.set(&entry.key, text);
                    }
                }
            }
            "game" | "machine" => match game_from_entries(frame.entries, frame.line) {
                Ok(game) => self.games.push(game),
                Err(skip) => self.skipped.push(skip),
            },
            other => {
                log::debug!("Ignoring '{}' block at line {}", other, frame.line);
            }
        }
    }
}

fn game_from_entries(entries: Vec<Entry>, line: usize) -> Result<GameRecord, RecordSkipped> {
    let mut name = String::new();
    let mut description = String::new();
    let mut roms = Vec::new();

    for entry in entries {
        match (entry.key.as_str(), entry.value) {
            ("name", Value::Text(text)) => name = text,
            ("description", Value::Text(text)) => description = text,
            ("rom", Value::Block(fields)) => {
                let pairs = fields.iter().filter_map(|f| match &f.value {
                    Value::Text(text) => Some((f.key.as_str(), text.as_str())),
                    Value::Block(_) => None,
                });
                roms.push(rom_from_fields(pairs));
            }
            _ => {}
        }
    }

    finish_game(name, description, roms, line)
}

/// Assemble a game record, rejecting it if it or any of its ROMs lacks
/// an identity field.
pub(crate) fn finish_game(
    name: String,
    description: String,
    roms: Vec<Result<RomRecord, SkipReason>>,
    line: usize,
) -> Result<GameRecord, RecordSkipped> {
    let skip = |game: &str, reason| RecordSkipped {
        game: game.to_string(),
        line,
        reason,
    };

    if name.is_empty() {
        return Err(skip("", SkipReason::MissingGameName));
    }
    if roms.is_empty() {
        return Err(skip(&name, SkipReason::NoRoms));
    }

    let mut parsed = Vec::with_capacity(roms.len());
    for rom in roms {
        match rom {
            Ok(rom) => parsed.push(rom),
            Err(reason) => return Err(skip(&name, reason)),
        }
    }

    Ok(GameRecord {
        name,
        description,
        roms: parsed,
    })
}

/// Build a ROM from its `key value` pairs. Later duplicates win.
pub(crate) fn rom_from_fields<'a>(
    fields: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> Result<RomRecord, SkipReason> {
    let mut name = String::new();
    let mut size = None;
    let mut crc = String::new();
    let mut md5 = None;
    let mut sha1 = None;

    for (key, value) in fields {
        match key {
            "name" => name = value.to_string(),
            "size" => size = Some(value),
            "crc" => crc = value.to_lowercase(),
            "md5" => md5 = Some(value.to_lowercase()),
            "sha1" => sha1 = Some(value.to_lowercase()),
            _ => {}
        }
    }

    if name.is_empty() {
        return Err(SkipReason::MissingRomName);
    }
    let size = match size {
        Some(raw) => raw.parse().map_err(|_| SkipReason::InvalidSize {
            rom: name.clone(),
            value: raw.to_string(),
        })?,
        None => return Err(SkipReason::MissingSize { rom: name }),
    };
    if crc.is_empty() {
        return Err(SkipReason::MissingCrc { rom: name });
    }

    Ok(RomRecord {
        name,
        size,
        crc,
        md5: md5.filter(|s: &String| !s.is_empty()),
        sha1: sha1.filter(|s: &String| !s.is_empty()),
    })
}

impl Token {
    fn word(&self) -> Option<&str> {
        match self {
            Token::Word(text) => Some(text),
            _ => None,
        }
    }
}

/// Number of leading bare words that form one unquoted value. Stops before
/// a word that opens a block.
fn value_run(tokens: &[Token]) -> usize {
    let mut run = 0;
    while let Some(Token::Word(_)) = tokens.get(run) {
        if matches!(tokens.get(run + 1), Some(Token::Open)) {
            break;
        }
        run += 1;
    }
    run
}

/// Tokenize one line, respecting quoted strings.
/// `rom ( name "Game (1990).bin" size 12 )` → [Word(rom), Open, Word(name), Quoted(Game (1990).bin), Word(size), Word(12), Close]
fn tokenize_line(input: &str, line: usize) -> Result<Vec<Token>, DatError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    loop {
        // Skip whitespace
        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }

        let Some(&c) = chars.peek() else {
            break;
        };

        match c {
            '(' => {
                chars.next();
                tokens.push(Token::Open);
            }
            ')' => {
                chars.next();
                tokens.push(Token::Close);
            }
            '"' => {
                chars.next(); // consume opening quote
                let mut token = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '"' {
                        closed = true;
                        break;
                    }
                    token.push(c);
                }
                if !closed {
                    return Err(DatError::UnterminatedQuote { line });
                }
                tokens.push(Token::Quoted(token));
            }
            _ => {
                let mut token = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_whitespace() || matches!(c, '(' | ')' | '"') {
                        break;
                    }
                    token.push(c);
                    chars.next();
                }
                tokens.push(Token::Word(token));
            }
        }
    }

    Ok(tokens)
}

#[cfg(test)]
#[path = "tests/dat_tests.rs"]
mod tests;
