//! omega-cheats CLI
//!
//! Merges the libretro GBA cheat database into an EZ-Flash Omega CHEATS
//! directory.

mod cli_types;
mod commands;
mod error;

use clap::Parser;
use log::LevelFilter;

use cli_types::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let result = match cli.command {
        Commands::Patch {
            cheats_db,
            dat,
            libretro_database,
            dry_run,
            stub_header,
            no_atomic,
        } => commands::patch::run_patch(
            cheats_db,
            dat,
            libretro_database,
            dry_run,
            stub_header,
            no_atomic,
        ),
        Commands::Expand { in_tsv, out_dir } => commands::expand::run_expand(&in_tsv, &out_dir),
        Commands::Config { action } => commands::config::run_config(action),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Map the `-v` count to a log level: none shows nothing, each extra `v`
/// adds error, warn, info, then debug.
fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Off,
        1 => LevelFilter::Error,
        2 => LevelFilter::Warn,
        3 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

fn init_logger(verbose: u8) {
    env_logger::Builder::new()
        .filter_level(level_for(verbose))
        .format_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_level_for() {
        assert_eq!(level_for(0), LevelFilter::Off);
        assert_eq!(level_for(2), LevelFilter::Warn);
        assert_eq!(level_for(4), LevelFilter::Debug);
        assert_eq!(level_for(9), LevelFilter::Debug);
    }

    #[test]
    fn test_parse_patch() {
        let cli = Cli::try_parse_from([
            "omega-cheats",
            "-vv",
            "patch",
            "-c",
            "CHEATS",
            "-d",
            "gba.dat",
            "--libretro-database",
            "libretro-database",
            "--dry-run",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Patch {
                cheats_db,
                dry_run,
                no_atomic,
                stub_header,
                ..
            } => {
                assert_eq!(cheats_db, std::path::PathBuf::from("CHEATS"));
                assert!(dry_run);
                assert!(!no_atomic);
                assert_eq!(stub_header, None);
            }
            _ => panic!("expected patch"),
        }
    }

    #[test]
    fn test_patch_requires_paths() {
        assert!(Cli::try_parse_from(["omega-cheats", "patch", "-c", "CHEATS"]).is_err());
    }
}
