//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// Merge the libretro GBA cheat database into an EZ-Flash Omega CHEATS
/// directory, giving better English descriptions and many more cheats.
#[derive(Parser)]
#[command(name = "omega-cheats", version)]
pub(crate) struct Cli {
    /// Increase log verbosity; repeat for more (-vvvv shows debug output)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Patch a local CHEATS directory with cheats from the libretro-database repository
    Patch {
        /// Unzipped CHEATS directory as downloaded from ezflash.cn. THIS WILL BE MODIFIED.
        #[arg(short, long = "cheats-db", value_name = "CHEATS")]
        cheats_db: PathBuf,

        /// No-Intro (Dat-O-Matic) XML .dat file for the Game Boy Advance
        #[arg(short, long, value_name = "DATFILE")]
        dat: PathBuf,

        /// Root of a cloned or downloaded libretro-database repository
        #[arg(short, long = "libretro-database", value_name = "LIBRETRODATABASE")]
        libretro_database: PathBuf,

        /// Show what would be patched without writing anything
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Contents for cheat files that have to be created (overrides settings)
        #[arg(long, value_name = "TEXT")]
        stub_header: Option<String>,

        /// Rewrite cheat files in place instead of via a temp file
        #[arg(long)]
        no_atomic: bool,
    },

    /// Expand a tab-separated cheat list into one text file per cheat
    Expand {
        /// Input TSV export
        #[arg(short, long, value_name = "TSV")]
        in_tsv: PathBuf,

        /// Output directory (created if missing)
        #[arg(short, long, value_name = "DIR")]
        out_dir: PathBuf,
    },

    /// Inspect the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the effective settings
    Show,

    /// Print the settings file path
    Path,
}
