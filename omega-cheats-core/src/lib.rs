//! Cheat record types, the Libretro `.cht` parser, and the Code Breaker to
//! EZ-Flash Omega translator.

pub mod codebreaker;
pub mod error;
pub mod libretro;

pub use codebreaker::{Directive, OmegaCheat, PROVENANCE_TAG, translate};
pub use error::CheatError;
pub use libretro::{LibretroCheat, parse_cheat_file, parse_cheats};
