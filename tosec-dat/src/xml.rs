//! Logiqx XML flavour of the DAT format.
//!
//! TOSEC publishes the same catalogs as XML. Records go through the same
//! validation as the bracket format, so both produce identical results.

use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::dat::{DatFile, RomRecord, finish_game, rom_from_fields};
use crate::error::{DatError, SkipReason};

/// A `<game>` element being accumulated.
struct PendingGame {
    keyword: String,
    name: String,
    description: String,
    roms: Vec<Result<RomRecord, SkipReason>>,
    line: usize,
}

pub(crate) fn parse_xml<R: BufRead>(reader: R) -> Result<DatFile, DatError> {
    let mut xml = Reader::from_reader(reader);
    xml.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut dat = DatFile::default();

    let mut in_header = false;
    let mut current_tag = String::new();
    let mut current_game: Option<PendingGame> = None;
    let mut game_count = 0usize;
    // Open elements with the number of games opened before them.
    let mut open: Vec<(String, usize)> = Vec::new();

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let tag_name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                open.push((tag_name.clone(), game_count));
                match tag_name.as_str() {
                    "header" => in_header = true,
                    "game" | "machine" => {
                        game_count += 1;
                        current_game = Some(PendingGame {
                            keyword: tag_name.clone(),
                            name: attribute(e, b"name")?.unwrap_or_default(),
                            description: String::new(),
                            roms: Vec::new(),
                            line: game_count,
                        });
                    }
                    "rom" => push_rom(&mut current_game, e)?,
                    _ => current_tag = tag_name,
                }
            }
            Event::Empty(ref e) => {
                if e.name().as_ref() == b"rom" {
                    push_rom(&mut current_game, e)?;
                }
            }
            Event::Text(ref e) => {
                let text = e.unescape()?.to_string();
                if in_header {
                    dat.header.set(&current_tag, text);
                } else if let Some(ref mut game) = current_game {
                    if current_tag == "description" {
                        game.description = text;
                    }
                }
            }
            Event::End(ref e) => {
                let tag_name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                open.pop();
                match tag_name.as_str() {
                    "header" => in_header = false,
                    "game" | "machine" => {
                        if let Some(game) = current_game.take() {
                            match finish_game(game.name, game.description, game.roms, game.line) {
                                Ok(record) => dat.games.push(record),
                                Err(skip) => dat.skipped.push(skip),
                            }
                        }
                    }
                    _ => current_tag.clear(),
                }
            }
            Event::Eof => {
                if let Some(game) = current_game.take() {
                    return Err(DatError::unclosed(game.keyword, game.line));
                }
                if let Some((tag, line)) = open.first() {
                    return Err(DatError::unclosed(tag.as_str(), *line));
                }
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(dat)
}

fn push_rom(game: &mut Option<PendingGame>, e: &BytesStart<'_>) -> Result<(), DatError> {
    let Some(game) = game else {
        return Ok(());
    };

    let mut fields = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr.unescape_value()?.to_string();
        fields.push((key, value));
    }
    game.roms
        .push(rom_from_fields(fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))));
    Ok(())
}

fn attribute(e: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>, DatError> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == name {
            return Ok(Some(attr.unescape_value()?.to_string()));
        }
    }
    Ok(None)
}

#[cfg(test)]
#[path = "tests/xml_tests.rs"]
mod tests;
