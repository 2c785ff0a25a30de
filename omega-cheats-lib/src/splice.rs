//! Writing translated cheats into Omega `.cht` files.

use std::fs;
use std::io;
use std::path::Path;

use omega_cheats_core::{LibretroCheat, translate};

/// Separator between cheat blocks, and between the new blocks and the
/// original file contents.
const BLOCK_SEPARATOR: &str = "\n\n";

/// What to put in a target file that doesn't exist yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StubPolicy {
    /// Create an empty file.
    #[default]
    Empty,
    /// Create the file with this text as its only content.
    Header(String),
}

impl StubPolicy {
    /// `Header` for non-empty text, `Empty` otherwise.
    pub fn from_header(header: Option<&str>) -> Self {
        match header {
            Some(h) if !h.is_empty() => Self::Header(h.to_string()),
            _ => Self::Empty,
        }
    }
}

/// Cheat blocks translated from one Libretro file.
#[derive(Debug, Clone, Default)]
pub struct Translation {
    /// Rendered Omega blocks, in source order
    pub blocks: Vec<String>,
    /// Number of cheats that failed to translate
    pub skipped: usize,
}

/// Translate every cheat, skipping (and logging) any that fail.
pub fn translate_all(cheats: &[LibretroCheat]) -> Translation {
    let mut translation = Translation::default();
    for cheat in cheats {
        match translate(cheat) {
            Ok(omega) => {
                let block = omega.to_string();
                log::debug!("Translated {:?} to {block:?}", cheat.desc);
                translation.blocks.push(block);
            }
            Err(e) => {
                log::warn!("Skipping libretro cheat {:?}: {e}", cheat.desc);
                translation.skipped += 1;
            }
        }
    }
    translation
}

/// Create `destination` (and its parent directory) according to `policy`.
///
/// The official Omega database has no bucket directories past ID 2800, but
/// Libretro has cheats for games in that range.
pub fn create_stub(destination: &Path, policy: &StubPolicy) -> io::Result<()> {
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }
    let contents = match policy {
        StubPolicy::Empty => "",
        StubPolicy::Header(header) => header.as_str(),
    };
    fs::write(destination, contents)
}

/// The new contents of a target: the blocks, a separator, then the original
/// bytes unchanged.
pub fn spliced_contents(blocks: &[String], original: &[u8]) -> Vec<u8> {
    let joined = blocks.join(BLOCK_SEPARATOR);
    let mut out = Vec::with_capacity(joined.len() + BLOCK_SEPARATOR.len() + original.len());
    out.extend_from_slice(joined.as_bytes());
    out.extend_from_slice(BLOCK_SEPARATOR.as_bytes());
    out.extend_from_slice(original);
    out
}

/// Prepend `blocks` to the file at `target`.
///
/// With `atomic` set the new contents are written to a sibling `.tmp` file
/// and renamed over the target; otherwise the target is rewritten in place.
pub fn splice(target: &Path, blocks: &[String], atomic: bool) -> io::Result<()> {
    let original = fs::read(target)?;
    let contents = spliced_contents(blocks, &original);

    if atomic {
        write_atomic(target, &contents)
    } else {
        fs::write(target, &contents)
    }
}

/// Write `contents` to a sibling `.cht.tmp` file and rename it over `target`.
/// The temp file is removed if either step fails.
fn write_atomic(target: &Path, contents: &[u8]) -> io::Result<()> {
    let tmp = target.with_extension("cht.tmp");
    let written = fs::write(&tmp, contents).and_then(|()| fs::rename(&tmp, target));
    if written.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    written
}
