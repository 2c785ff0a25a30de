use std::io::BufRead;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::DatError;

/// The parts of a Logiqx/No-Intro XML DAT catalog needed to map serials to
/// game names.
#[derive(Debug, Clone, Default)]
pub struct DatFile {
    /// Header name (e.g., "Nintendo - Game Boy Advance"), if present
    pub name: String,
    /// Header version, if present
    pub version: String,
    /// Every `rom` element in document order
    pub roms: Vec<DatRom>,
}

/// A single `rom` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatRom {
    /// ROM file name (e.g., "Some Game (USA).gba"), empty if missing
    pub name: String,
    /// 4-character ROM serial; BIOS rows have none
    pub serial: Option<String>,
}

/// Parse an XML DAT catalog.
///
/// `rom` elements are collected wherever they appear in the document; other
/// elements and attributes are ignored.
pub fn parse_dat<R: BufRead>(reader: R) -> Result<DatFile, DatError> {
    let mut xml = Reader::from_reader(reader);
    xml.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut dat = DatFile::default();
    let mut in_header = false;
    let mut current_tag = String::new();

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) => match e.name().as_ref() {
                b"header" => in_header = true,
                b"rom" => dat.roms.push(parse_rom_attributes(e)?),
                name => current_tag = String::from_utf8_lossy(name).into_owned(),
            },
            Event::Empty(ref e) => {
                if e.name().as_ref() == b"rom" {
                    dat.roms.push(parse_rom_attributes(e)?);
                }
            }
            Event::Text(ref e) if in_header => {
                let text = e.unescape()?.into_owned();
                match current_tag.as_str() {
                    "name" => dat.name = text,
                    "version" => dat.version = text,
                    _ => {}
                }
            }
            Event::End(ref e) => {
                if e.name().as_ref() == b"header" {
                    in_header = false;
                }
                current_tag.clear();
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if dat.roms.is_empty() {
        return Err(DatError::invalid_dat("No rom entries found in DAT file"));
    }

    Ok(dat)
}

/// Parse a DAT catalog from a file path.
pub fn parse_dat_file(path: &Path) -> Result<DatFile, DatError> {
    let file = std::fs::File::open(path)?;
    parse_dat(std::io::BufReader::new(file))
}

fn parse_rom_attributes(e: &BytesStart<'_>) -> Result<DatRom, DatError> {
    let mut rom = DatRom {
        name: String::new(),
        serial: None,
    };

    for attr in e.attributes() {
        let attr = attr?;
        match attr.key.as_ref() {
            b"name" => rom.name = attr.unescape_value()?.into_owned(),
            b"serial" => rom.serial = Some(attr.unescape_value()?.into_owned()),
            _ => {}
        }
    }

    Ok(rom)
}
