//! Serial → short game name index.
//!
//! The Omega's `GameID2cht.bin` is keyed by ROM serial while Libretro cheat
//! files are named after the game, so the DAT catalog is used to bridge the
//! two. Both sides are reduced to a "short name": the file name with its
//! extension, region tags, and any subtitle after `&` removed.

use std::collections::HashMap;

use crate::dat::{DatFile, DatRom};

/// Delimiters that end the short name of a DAT `rom` name, after the
/// extension has been stripped.
pub const DAT_NAME_DELIMITERS: &[char] = &['(', '&'];

/// Reduce a file name to its short game name.
///
/// The name is cut at the last `.`, then at the first occurrence of each of
/// `delimiters`. A delimiter that doesn't occur cuts nothing. Whitespace is
/// trimmed once at the end.
///
/// ```
/// use omega_cheats_dat::{DAT_NAME_DELIMITERS, short_name};
///
/// assert_eq!(short_name("Golden Sun (USA, Europe).gba", DAT_NAME_DELIMITERS), "Golden Sun");
/// ```
pub fn short_name<'a>(name: &'a str, delimiters: &[char]) -> &'a str {
    let mut end = name.rfind('.').unwrap_or(name.len());
    for &delimiter in delimiters {
        if let Some(i) = name.find(delimiter) {
            end = end.min(i);
        }
    }
    name[..end].trim()
}

/// An index of DAT serials to short game names.
#[derive(Debug, Default)]
pub struct SerialIndex {
    by_serial: HashMap<String, String>,
}

impl SerialIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from every serial-bearing ROM in a DAT file.
    ///
    /// ROMs without a serial (BIOS rows) or whose short name is empty are
    /// skipped. Duplicate serials keep the last entry.
    pub fn from_dat(dat: &DatFile) -> Self {
        let mut index = Self::new();
        for rom in &dat.roms {
            index.insert_rom(rom);
        }
        log::debug!("Indexed {} serials from DAT {:?}", index.len(), dat.name);
        index
    }

    fn insert_rom(&mut self, rom: &DatRom) {
        let Some(serial) = rom.serial.as_deref() else {
            log::warn!(
                "Skipping ROM without `serial` field, this should be a BIOS file (name: {})",
                rom.name
            );
            return;
        };
        let name = short_name(&rom.name, DAT_NAME_DELIMITERS);
        if name.is_empty() {
            log::warn!("Skipping ROM with serial {serial} and no usable name ({:?})", rom.name);
            return;
        }
        if let Some(previous) = self.insert(serial, name) {
            log::debug!("Serial {serial} was mapped to {previous:?}, replaced by {:?}", rom.name);
        }
    }

    /// Map `serial` to `name`, returning the name it replaced, if any.
    pub fn insert(&mut self, serial: impl Into<String>, name: impl Into<String>) -> Option<String> {
        self.by_serial.insert(serial.into(), name.into())
    }

    /// Look up the short game name for a serial.
    pub fn get(&self, serial: &str) -> Option<&str> {
        self.by_serial.get(serial).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_serial.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_serial.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rom(name: &str, serial: Option<&str>) -> DatRom {
        DatRom {
            name: name.to_string(),
            serial: serial.map(str::to_string),
        }
    }

    #[test]
    fn test_short_name_dat_rules() {
        let cases = [
            ("Some Game (USA).gba", "Some Game"),
            ("Mario & Luigi - Superstar Saga (USA).gba", "Mario"),
            ("No Region.gba", "No Region"),
            ("Tight(USA).gba", "Tight"),
            ("Dr. Mario (USA).gba", "Dr. Mario"),
            ("  Padded  ", "Padded"),
            ("", ""),
        ];
        for (input, expected) in cases {
            assert_eq!(short_name(input, DAT_NAME_DELIMITERS), expected, "{input}");
        }
    }

    #[test]
    fn test_short_name_underscore_rules() {
        let delimiters = &['(', '_'];
        assert_eq!(short_name("Golden Sun (USA, Europe).cht", delimiters), "Golden Sun");
        assert_eq!(short_name("Kirby_Nightmare.cht", delimiters), "Kirby");
        assert_eq!(short_name("Metroid Fusion.cht", delimiters), "Metroid Fusion");
    }

    #[test]
    fn test_from_dat_skips_bios() {
        let dat = DatFile {
            roms: vec![
                rom("[BIOS] Game Boy Advance (World).gba", None),
                rom("Golden Sun (USA, Europe).gba", Some("AGSE")),
            ],
            ..Default::default()
        };
        let index = SerialIndex::from_dat(&dat);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("AGSE"), Some("Golden Sun"));
        assert_eq!(index.get("XXXX"), None);
    }

    #[test]
    fn test_from_dat_skips_nameless_roms() {
        let dat = DatFile {
            roms: vec![
                rom("", Some("ABCD")),
                rom("(Proto).gba", Some("PRTO")),
                rom("Metroid Fusion (USA).gba", Some("AMTE")),
            ],
            ..Default::default()
        };
        let index = SerialIndex::from_dat(&dat);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("ABCD"), None);
        assert_eq!(index.get("PRTO"), None);
        assert_eq!(index.get("AMTE"), Some("Metroid Fusion"));
    }

    #[test]
    fn test_duplicate_serial_last_wins() {
        let dat = DatFile {
            roms: vec![
                rom("First Name (USA).gba", Some("ABCD")),
                rom("Second Name (Europe).gba", Some("ABCD")),
            ],
            ..Default::default()
        };
        let index = SerialIndex::from_dat(&dat);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("ABCD"), Some("Second Name"));
    }

    #[test]
    fn test_insert_reports_replaced() {
        let mut index = SerialIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.insert("ABCD", "One"), None);
        assert_eq!(index.insert("ABCD", "Two"), Some("One".to_string()));
    }
}
