use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use omega_cheats_lib::expand_tsv;

use crate::error::CliError;

pub(crate) fn run_expand(in_tsv: &Path, out_dir: &Path) -> Result<(), CliError> {
    let written = expand_tsv(in_tsv, out_dir)?;
    println!(
        "Wrote {written} cheat files to {}",
        out_dir.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}
