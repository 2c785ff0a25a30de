//! Expand a cheat spreadsheet export (TSV) into one text file per cheat.
//!
//! The export starts with two title lines, then a header row. Each row's
//! `Key in…` column holds `+`-separated codes, written one per line to
//! `<out>/<Game>/<Effect…>.txt`.

use std::fs;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::error::PatchError;

const GAME_COLUMN: &str = "Game";
const EFFECT_COLUMN: &str = "Effect…";
const CODES_COLUMN: &str = "Key in…";

/// Number of lines before the header row.
const PREAMBLE_LINES: usize = 2;

/// Expand `in_tsv` into `out_dir`, returning the number of files written.
pub fn expand_tsv(in_tsv: &Path, out_dir: &Path) -> Result<usize, PatchError> {
    let file = fs::File::open(in_tsv)?;
    expand_reader(BufReader::new(file), out_dir)
}

/// Expand TSV data read from `reader` into `out_dir`.
pub fn expand_reader<R: BufRead>(mut reader: R, out_dir: &Path) -> Result<usize, PatchError> {
    let mut skipped = String::new();
    for _ in 0..PREAMBLE_LINES {
        skipped.clear();
        if reader.read_line(&mut skipped)? == 0 {
            break;
        }
    }

    fs::create_dir_all(out_dir)?;
    expand_records(reader, out_dir)
}

fn expand_records<R: Read>(reader: R, out_dir: &Path) -> Result<usize, PatchError> {
    let mut tsv = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_reader(reader);

    let headers = tsv.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| PatchError::invalid_tsv(format!("missing column {name:?}")))
    };
    let game_col = column(GAME_COLUMN)?;
    let effect_col = column(EFFECT_COLUMN)?;
    let codes_col = column(CODES_COLUMN)?;

    let mut written = 0;
    for record in tsv.records() {
        let record = record?;
        let field = |i: usize| record.get(i).unwrap_or_default();

        let game_dir = out_dir.join(field(game_col));
        fs::create_dir_all(&game_dir)?;

        let cheat_path = game_dir.join(format!("{}.txt", file_stem(field(effect_col))));
        fs::write(&cheat_path, code_lines(field(codes_col)))?;
        log::debug!("Wrote {}", cheat_path.display());
        written += 1;
    }

    Ok(written)
}

/// Turn an effect description into a file stem.
fn file_stem(effect: &str) -> String {
    effect.trim().replace([' ', '/'], "_")
}

/// One trimmed code per line, newline-terminated.
fn code_lines(codes: &str) -> String {
    let mut out = codes.split('+').map(str::trim).collect::<Vec<_>>().join("\n");
    out.push('\n');
    out
}
