use thiserror::Error;

use omega_cheats_core::CheatError;
use omega_cheats_dat::DatError;

/// Errors that abort a patch or expand run.
#[derive(Debug, Error)]
pub enum PatchError {
    /// I/O error on the cheats directory, index file, or a target file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The DAT catalog could not be read
    #[error("DAT error: {0}")]
    Dat(#[from] DatError),

    /// A cheat error that could not be handled by skipping
    #[error("{0}")]
    Cheat(#[from] CheatError),

    /// A `GameID2cht.bin` record whose ID is not a decimal number
    #[error("Invalid game ID entry: {0}")]
    InvalidGameIdEntry(String),

    /// The settings file could not be read or parsed
    #[error("Settings error: {0}")]
    Settings(String),

    /// TSV input error
    #[error("TSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The TSV header row lacks a required column
    #[error("Invalid TSV: {0}")]
    InvalidTsv(String),
}

impl PatchError {
    pub fn invalid_game_id_entry(msg: impl Into<String>) -> Self {
        Self::InvalidGameIdEntry(msg.into())
    }

    pub fn settings(msg: impl Into<String>) -> Self {
        Self::Settings(msg.into())
    }

    pub fn invalid_tsv(msg: impl Into<String>) -> Self {
        Self::InvalidTsv(msg.into())
    }
}
