//! Parser for Libretro `.cht` cheat files.
//!
//! The format is line oriented:
//!
//! ```text
//! cheats = 2
//!
//! cheat0_desc = "Infinite HP"
//! cheat0_code = "30001234+63"
//! cheat0_enable = false
//!
//! cheat1_desc = "Max Gold"
//! cheat1_code = "8000ABCD+1234"
//! ```
//!
//! Each key is `<prefix>_<attribute>`; the prefix groups attributes into one
//! record. Only `desc` and `code` are kept.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::error::CheatError;

/// A single cheat as it appears in a Libretro cheat file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibretroCheat {
    /// Free-text description
    pub desc: String,
    /// `+`-separated Code Breaker address/value tokens
    pub code: String,
}

impl LibretroCheat {
    pub fn new(desc: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            desc: desc.into(),
            code: code.into(),
        }
    }
}

/// Parse the contents of a Libretro cheat file.
///
/// Records are returned ordered by their key prefix compared as strings, so
/// `cheat10` comes before `cheat2`. Existing Omega cheat files were produced
/// with that ordering, and keeping it makes re-runs produce identical output.
///
/// Values have their first and last character removed whether or not those
/// are quotes. Some upstream files are sloppy about quoting and this keeps
/// them usable.
pub fn parse_cheats(text: &str) -> Result<Vec<LibretroCheat>, CheatError> {
    let mut expected: Option<usize> = None;
    let mut records: BTreeMap<&str, HashMap<&str, &str>> = BTreeMap::new();

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_no = index + 1;

        let (key, value) = line
            .split_once('=')
            .ok_or_else(|| CheatError::parse(format!("line {line_no}: expected `key = value`")))?;
        let key = key.trim();
        let value = value.trim();

        match key {
            "cheats" => {
                let count = value.parse().map_err(|_| {
                    CheatError::parse(format!("line {line_no}: invalid cheat count {value:?}"))
                })?;
                expected = Some(count);
                continue;
            }
            // Malformed upstream entry, should be cheatN_enable
            "cheat_enable" => continue,
            _ => {}
        }

        let (prefix, attribute) = key.split_once('_').ok_or_else(|| {
            CheatError::parse(format!("line {line_no}: unrecognized key {key:?}"))
        })?;
        records
            .entry(prefix)
            .or_default()
            .insert(attribute, strip_outer(value));
    }

    match expected {
        Some(n) if n == records.len() => {}
        Some(n) => {
            return Err(CheatError::parse(format!(
                "unexpected number of cheats: got {}, expected {n}",
                records.len()
            )));
        }
        None => {
            return Err(CheatError::parse(format!(
                "missing `cheats` header ({} records found)",
                records.len()
            )));
        }
    }

    records
        .into_iter()
        .map(|(prefix, attributes)| {
            let desc = attributes
                .get("desc")
                .ok_or_else(|| CheatError::parse(format!("{prefix} has no `desc`")))?;
            let code = attributes
                .get("code")
                .ok_or_else(|| CheatError::parse(format!("{prefix} has no `code`")))?;
            Ok(LibretroCheat::new(*desc, *code))
        })
        .collect()
}

/// Read and parse a Libretro cheat file from disk.
///
/// The file is decoded as UTF-8, replacing invalid sequences. Parse errors
/// are prefixed with the file path.
pub fn parse_cheat_file(path: &Path) -> Result<Vec<LibretroCheat>, CheatError> {
    let bytes = std::fs::read(path)?;
    parse_cheats(&String::from_utf8_lossy(&bytes)).map_err(|e| match e {
        CheatError::Parse(msg) => CheatError::parse(format!("{}: {msg}", path.display())),
        other => other,
    })
}

/// Drop the first and last character of a value.
fn strip_outer(value: &str) -> &str {
    let mut chars = value.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"cheats = 2

cheat0_desc = "Infinite HP"
cheat0_code = "30001234+63"
cheat0_enable = false

cheat1_desc = "Max Gold"
cheat1_code = "8000ABCD+1234"
cheat1_enable = false
"#;

    #[test]
    fn test_parse_sample() {
        let cheats = parse_cheats(SAMPLE).unwrap();
        assert_eq!(
            cheats,
            vec![
                LibretroCheat::new("Infinite HP", "30001234+63"),
                LibretroCheat::new("Max Gold", "8000ABCD+1234"),
            ]
        );
    }

    #[test]
    fn test_count_matches_header() {
        let mut text = String::from("cheats = 12\n");
        for i in 0..12 {
            text.push_str(&format!("cheat{i}_desc = \"Cheat {i}\"\n"));
            text.push_str(&format!("cheat{i}_code = \"3000000{}+01\"\n", i % 10));
        }
        assert_eq!(parse_cheats(&text).unwrap().len(), 12);
    }

    #[test]
    fn test_prefixes_sort_as_strings() {
        let text = r#"cheats = 3
cheat2_desc = "two"
cheat2_code = "30000002+02"
cheat10_desc = "ten"
cheat10_code = "30000010+10"
cheat1_desc = "one"
cheat1_code = "30000001+01"
"#;
        let descs: Vec<String> = parse_cheats(text)
            .unwrap()
            .into_iter()
            .map(|c| c.desc)
            .collect();
        // "cheat10" < "cheat2" lexicographically
        assert_eq!(descs, vec!["one", "ten", "two"]);
    }

    #[test]
    fn test_count_mismatch() {
        let text = r#"cheats = 3
cheat1_desc = "a"
cheat1_code = "30000001+01"
cheat2_desc = "b"
cheat2_code = "30000002+02"
"#;
        let err = parse_cheats(text).unwrap_err();
        assert!(matches!(err, CheatError::Parse(_)));
        assert!(err.to_string().contains("got 2, expected 3"));
    }

    #[test]
    fn test_missing_header() {
        let text = "cheat0_desc = \"a\"\ncheat0_code = \"30000001+01\"\n";
        assert!(matches!(parse_cheats(text), Err(CheatError::Parse(_))));
    }

    #[test]
    fn test_missing_code() {
        let text = "cheats = 1\ncheat0_desc = \"a\"\ncheat0_enable = false\n";
        let err = parse_cheats(text).unwrap_err();
        assert!(err.to_string().contains("cheat0 has no `code`"));
    }

    #[test]
    fn test_missing_desc() {
        let text = "cheats = 1\ncheat0_code = \"30000001+01\"\n";
        let err = parse_cheats(text).unwrap_err();
        assert!(err.to_string().contains("cheat0 has no `desc`"));
    }

    #[test]
    fn test_unindexed_enable_is_ignored() {
        let text = "cheats = 1\ncheat_enable = false\ncheat0_desc = \"a\"\ncheat0_code = \"30000001+01\"\n";
        assert_eq!(parse_cheats(text).unwrap().len(), 1);
    }

    #[test]
    fn test_whitespace_and_blank_lines() {
        let text = "\n  cheats=1  \n\n\t\ncheat0_desc=\"a b\"\ncheat0_code   =   \"30000001+01\"\n";
        let cheats = parse_cheats(text).unwrap();
        assert_eq!(cheats[0], LibretroCheat::new("a b", "30000001+01"));
    }

    #[test]
    fn test_unquoted_values_lose_outer_chars() {
        let text = "cheats = 1\ncheat0_desc = [HP]\ncheat0_code = x30000001+01x\n";
        let cheats = parse_cheats(text).unwrap();
        assert_eq!(cheats[0], LibretroCheat::new("HP", "30000001+01"));
    }

    #[test]
    fn test_strip_outer_short_values() {
        assert_eq!(strip_outer(""), "");
        assert_eq!(strip_outer("\""), "");
        assert_eq!(strip_outer("\"\""), "");
        assert_eq!(strip_outer("\"é\""), "é");
    }

    #[test]
    fn test_line_without_equals() {
        let err = parse_cheats("cheats = 1\ngarbage\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_bad_count() {
        assert!(matches!(
            parse_cheats("cheats = many\n"),
            Err(CheatError::Parse(_))
        ));
    }

    #[test]
    fn test_extra_attributes_are_ignored() {
        let text = "cheats = 1\ncheat0_desc = \"a\"\ncheat0_code = \"30000001+01\"\ncheat0_repeat_count = \"1\"\n";
        assert_eq!(parse_cheats(text).unwrap().len(), 1);
    }

    #[test]
    fn test_parse_cheat_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Game (USA).cht");
        std::fs::write(&path, SAMPLE).unwrap();
        assert_eq!(parse_cheat_file(&path).unwrap().len(), 2);

        std::fs::write(&path, "cheats = 5\n").unwrap();
        let err = parse_cheat_file(&path).unwrap_err();
        assert!(err.to_string().contains("Game (USA).cht"));

        let missing = dir.path().join("missing.cht");
        assert!(matches!(parse_cheat_file(&missing), Err(CheatError::Io(_))));
    }
}
