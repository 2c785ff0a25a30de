//! The patch pipeline: walk `GameID2cht.bin`, resolve each serial to a
//! Libretro cheat file through the DAT catalog, and prepend the translated
//! cheats to the matching Omega `.cht` file.

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use omega_cheats_core::{CheatError, parse_cheat_file};
use omega_cheats_dat::{SerialIndex, parse_dat_file};

use crate::error::PatchError;
use crate::game_id::{GameIdEntry, GameIdReader};
use crate::layout::{game_id_map_path, libretro_cheats_dir, target_cht_path};
use crate::libretro_index::LibretroIndex;
use crate::splice::{StubPolicy, Translation, create_stub, splice, translate_all};

/// Inputs and switches for a patch run.
#[derive(Debug, Clone)]
pub struct PatchOptions {
    /// Omega `CHEATS` directory (contains `GameID2cht.bin` and `Eng/`)
    pub cheats_root: PathBuf,
    /// No-Intro XML DAT catalog
    pub dat_path: PathBuf,
    /// Root of a libretro-database checkout
    pub libretro_db: PathBuf,
    /// Contents of target files that have to be created
    pub stub: StubPolicy,
    /// Write targets through a temp file and rename
    pub atomic_write: bool,
    /// Resolve and translate only; leave the cheats directory untouched
    pub dry_run: bool,
}

impl PatchOptions {
    pub fn new(
        cheats_root: impl Into<PathBuf>,
        dat_path: impl Into<PathBuf>,
        libretro_db: impl Into<PathBuf>,
    ) -> Self {
        Self {
            cheats_root: cheats_root.into(),
            dat_path: dat_path.into(),
            libretro_db: libretro_db.into(),
            stub: StubPolicy::default(),
            atomic_write: true,
            dry_run: false,
        }
    }
}

/// Why a `GameID2cht.bin` entry was not patched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The serial is not in the DAT catalog
    UnknownSerial,
    /// The DAT name has no Libretro cheat file
    NoCheatFile { game_name: String },
    /// The Libretro cheat file could not be parsed
    InvalidCheatFile { path: PathBuf, message: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSerial => write!(f, "serial not found in DAT"),
            Self::NoCheatFile { game_name } => {
                write!(f, "no libretro cheats for game name {game_name}")
            }
            Self::InvalidCheatFile { message, .. } => write!(f, "{message}"),
        }
    }
}

/// Progress information for callbacks.
#[derive(Debug, Clone)]
pub enum PatchProgress {
    /// DAT and Libretro indexes are ready
    IndexesBuilt { serials: usize, cheat_files: usize },
    /// A target was patched (or would be, in a dry run)
    Patched {
        target: PathBuf,
        added: usize,
        skipped: usize,
    },
    /// An entry was skipped
    Skipped {
        serial: String,
        numeric_id: u32,
        reason: SkipReason,
    },
    /// Finished walking the index
    Done,
}

/// Totals for a patch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchSummary {
    pub files_patched: usize,
    pub cheats_added: usize,
    pub cheats_skipped: usize,
    /// Entries whose serial or game name could not be resolved
    pub entries_unmatched: usize,
    /// Libretro files that failed to parse
    pub files_invalid: usize,
}

enum EntryOutcome {
    Patched {
        target: PathBuf,
        translation: Translation,
    },
    Skipped(SkipReason),
}

/// Run the whole pipeline.
///
/// Lookup misses and unparseable Libretro files are reported through
/// `progress` and skipped. I/O failures, an unreadable DAT, and malformed
/// `GameID2cht.bin` records abort the run.
pub fn patch(
    options: &PatchOptions,
    progress: &dyn Fn(PatchProgress),
) -> Result<PatchSummary, PatchError> {
    let dat = parse_dat_file(&options.dat_path)?;
    let serials = SerialIndex::from_dat(&dat);
    let cheat_files = LibretroIndex::from_dir(&libretro_cheats_dir(&options.libretro_db))?;
    log::info!(
        "Loaded {} serials from {} and {} Libretro cheat files",
        serials.len(),
        options.dat_path.display(),
        cheat_files.len()
    );
    progress(PatchProgress::IndexesBuilt {
        serials: serials.len(),
        cheat_files: cheat_files.len(),
    });

    let map = File::open(game_id_map_path(&options.cheats_root))?;
    let mut summary = PatchSummary::default();
    let mut walked = 0usize;

    for entry in GameIdReader::new(BufReader::new(map)) {
        let entry = entry?;
        walked += 1;

        match patch_entry(&entry, &serials, &cheat_files, options)? {
            EntryOutcome::Patched {
                target,
                translation,
            } => {
                summary.files_patched += 1;
                summary.cheats_added += translation.blocks.len();
                summary.cheats_skipped += translation.skipped;
                progress(PatchProgress::Patched {
                    target,
                    added: translation.blocks.len(),
                    skipped: translation.skipped,
                });
            }
            EntryOutcome::Skipped(reason) => {
                match reason {
                    SkipReason::InvalidCheatFile { .. } => summary.files_invalid += 1,
                    _ => summary.entries_unmatched += 1,
                }
                progress(PatchProgress::Skipped {
                    serial: entry.serial,
                    numeric_id: entry.numeric_id,
                    reason,
                });
            }
        }
    }

    log::info!("Walked {walked} game ID entries");
    progress(PatchProgress::Done);
    Ok(summary)
}

fn patch_entry(
    entry: &GameIdEntry,
    serials: &SerialIndex,
    cheat_files: &LibretroIndex,
    options: &PatchOptions,
) -> Result<EntryOutcome, PatchError> {
    let GameIdEntry { serial, numeric_id } = entry;

    let Some(game_name) = serials.get(serial) else {
        log::warn!("Could not find game with serial code {serial}");
        return Ok(EntryOutcome::Skipped(SkipReason::UnknownSerial));
    };

    let Some(cheat_path) = cheat_files.get(game_name) else {
        log::warn!(
            "No libretro cheats for game name {game_name}, serial {serial}, numeric ID {numeric_id:04}"
        );
        return Ok(EntryOutcome::Skipped(SkipReason::NoCheatFile {
            game_name: game_name.to_string(),
        }));
    };

    let cheats = match parse_cheat_file(cheat_path) {
        Ok(cheats) => cheats,
        Err(e) if e.is_skippable() => {
            log::warn!("Skipping libretro cheat file: {e}");
            return Ok(EntryOutcome::Skipped(SkipReason::InvalidCheatFile {
                path: cheat_path.to_path_buf(),
                message: e.to_string(),
            }));
        }
        Err(e) => return Err(io_context(e, cheat_path)),
    };

    let translation = translate_all(&cheats);
    let target = target_cht_path(&options.cheats_root, *numeric_id);

    if !options.dry_run {
        if !target.exists() {
            log::debug!("Creating {}", target.display());
            create_stub(&target, &options.stub)?;
        }
        splice(&target, &translation.blocks, options.atomic_write)?;
    }

    Ok(EntryOutcome::Patched {
        target,
        translation,
    })
}

fn io_context(err: CheatError, path: &Path) -> PatchError {
    match err {
        CheatError::Io(e) => PatchError::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {e}", path.display()),
        )),
        other => other.into(),
    }
}
