//! Merge the Libretro GBA cheat database into an EZ-Flash Omega `CHEATS`
//! directory.

pub mod error;
pub mod expand;
pub mod game_id;
pub mod layout;
pub mod libretro_index;
pub mod patch;
pub mod settings;
pub mod splice;

pub use error::PatchError;
pub use expand::expand_tsv;
pub use game_id::{GameIdEntry, GameIdReader};
pub use layout::target_cht_path;
pub use libretro_index::LibretroIndex;
pub use patch::{PatchOptions, PatchProgress, PatchSummary, SkipReason, patch};
pub use settings::Settings;
pub use splice::StubPolicy;

pub use omega_cheats_core::{CheatError, LibretroCheat, OmegaCheat, translate};
pub use omega_cheats_dat::{DatError, SerialIndex};
