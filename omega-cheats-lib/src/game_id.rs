//! Reader for the Omega's packed `GameID2cht.bin` map.
//!
//! The file is a flat run of 8-byte ASCII records with no header or
//! separator: 4 bytes of ROM serial followed by the 4-digit decimal numeric
//! ID used to lay out the cheat directory.

use std::io::{self, Read};

use crate::error::PatchError;

/// Size of one record in `GameID2cht.bin`.
pub const ENTRY_LEN: usize = 8;

/// One serial → numeric ID mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameIdEntry {
    pub serial: String,
    pub numeric_id: u32,
}

impl GameIdEntry {
    /// Decode one 8-byte record.
    pub fn from_bytes(record: &[u8; ENTRY_LEN]) -> Result<Self, PatchError> {
        let (serial, id) = record.split_at(4);
        let id = std::str::from_utf8(id)
            .ok()
            .filter(|s| s.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| {
                PatchError::invalid_game_id_entry(format!(
                    "{:?} has a non-numeric ID",
                    String::from_utf8_lossy(record)
                ))
            })?;
        Ok(Self {
            serial: String::from_utf8_lossy(serial).into_owned(),
            numeric_id: id,
        })
    }
}

/// Iterator over the records of a `GameID2cht.bin` stream, in file order.
///
/// Iteration stops at the first short read; a trailing partial record is
/// ignored.
pub struct GameIdReader<R> {
    reader: R,
    done: bool,
}

impl<R: Read> GameIdReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            done: false,
        }
    }

    /// Fill `buf` completely, returning false if the stream ended first.
    fn read_record(&mut self, buf: &mut [u8; ENTRY_LEN]) -> io::Result<bool> {
        match self.reader.read_exact(buf) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(false),
            Err(e) => Err(e),
        }
    }
}

impl<R: Read> Iterator for GameIdReader<R> {
    type Item = Result<GameIdEntry, PatchError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let mut record = [0u8; ENTRY_LEN];
        match self.read_record(&mut record) {
            Ok(true) => Some(GameIdEntry::from_bytes(&record)),
            Ok(false) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e.into()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all(data: &[u8]) -> Vec<GameIdEntry> {
        GameIdReader::new(data)
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    fn entry(serial: &str, numeric_id: u32) -> GameIdEntry {
        GameIdEntry {
            serial: serial.to_string(),
            numeric_id,
        }
    }

    #[test]
    fn test_walk_in_file_order() {
        assert_eq!(
            read_all(b"ABCD0042WXYZ0200"),
            vec![entry("ABCD", 42), entry("WXYZ", 200)]
        );
    }

    #[test]
    fn test_empty_file() {
        assert!(read_all(b"").is_empty());
    }

    #[test]
    fn test_partial_trailing_record_is_eof() {
        assert_eq!(read_all(b"ABCD0042WXYZ02"), vec![entry("ABCD", 42)]);
        assert!(read_all(b"ABCD004").is_empty());
    }

    #[test]
    fn test_non_numeric_id() {
        let results: Vec<_> = GameIdReader::new(&b"ABCD00X2WXYZ0200"[..]).collect();
        assert_eq!(results.len(), 2);
        assert!(matches!(results[0], Err(PatchError::InvalidGameIdEntry(_))));
        assert_eq!(results[1].as_ref().unwrap(), &entry("WXYZ", 200));
    }

    #[test]
    fn test_signed_id_is_rejected() {
        let mut results = GameIdReader::new(&b"ABCD+042"[..]);
        assert!(matches!(
            results.next(),
            Some(Err(PatchError::InvalidGameIdEntry(_)))
        ));
    }

    /// Reader that hands out one byte per call.
    struct Trickle<'a>(&'a [u8]);

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.0.split_first() {
                Some((&b, rest)) if !buf.is_empty() => {
                    buf[0] = b;
                    self.0 = rest;
                    Ok(1)
                }
                _ => Ok(0),
            }
        }
    }

    /// Reader that fails after handing out its data.
    struct Failing<'a>(&'a [u8]);

    impl Read for Failing<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.0.is_empty() {
                return Err(io::Error::other("device removed"));
            }
            self.0.read(buf)
        }
    }

    #[test]
    fn test_read_error_is_reported_once() {
        let mut reader = GameIdReader::new(Failing(b"ABCD0042"));
        assert_eq!(reader.next().unwrap().unwrap(), entry("ABCD", 42));
        assert!(matches!(reader.next(), Some(Err(PatchError::Io(_)))));
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_short_reads_are_reassembled() {
        let entries: Vec<_> = GameIdReader::new(Trickle(b"BPEE1234AXVE0007"))
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(entries, vec![entry("BPEE", 1234), entry("AXVE", 7)]);
    }
}
