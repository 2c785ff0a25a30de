use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use omega_cheats_lib::{PatchOptions, PatchProgress, Settings, StubPolicy, patch};

use crate::error::CliError;

pub(crate) fn run_patch(
    cheats_db: PathBuf,
    dat: PathBuf,
    libretro_database: PathBuf,
    dry_run: bool,
    stub_header: Option<String>,
    no_atomic: bool,
) -> Result<(), CliError> {
    let settings = Settings::load().map_err(|e| CliError::config(e.to_string()))?;

    let mut options = PatchOptions::new(cheats_db, dat, libretro_database);
    options.dry_run = dry_run;
    options.atomic_write = settings.patch.atomic_write && !no_atomic;
    options.stub = match stub_header {
        Some(header) => StubPolicy::from_header(Some(header.as_str())),
        None => settings.patch.stub_policy(),
    };

    if dry_run {
        println!(
            "{}",
            "Dry run: no files will be modified".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    let summary = patch(&options, &|progress| report(progress, dry_run))?;

    println!(
        "{}",
        "Patches applied".if_supports_color(Stdout, |t| t.green()),
    );
    println!(
        "  {} files, {} cheats added, {} cheats skipped, {} games without cheats, {} invalid cheat files",
        summary.files_patched,
        summary.cheats_added,
        summary.cheats_skipped,
        summary.entries_unmatched,
        summary.files_invalid,
    );
    Ok(())
}

fn report(progress: PatchProgress, dry_run: bool) {
    match progress {
        PatchProgress::IndexesBuilt {
            serials,
            cheat_files,
        } => {
            log::info!("Indexed {serials} DAT serials and {cheat_files} libretro cheat files");
        }
        PatchProgress::Patched { target, added, .. } => {
            let verb = if dry_run { "Would patch" } else { "Patched" };
            println!(
                "{verb} {} successfully, added {added} cheats",
                target.display().if_supports_color(Stdout, |t| t.cyan()),
            );
        }
        PatchProgress::Skipped {
            serial,
            numeric_id,
            reason,
        } => {
            log::debug!("Skipped {serial} ({numeric_id:04}): {reason}");
        }
        PatchProgress::Done => {}
    }
}
