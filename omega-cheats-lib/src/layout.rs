//! On-disk layout of the EZ-Flash Omega `CHEATS` directory and the Libretro
//! database checkout.

use std::path::{Path, PathBuf};

/// Packed serial → numeric ID map at the root of the `CHEATS` directory.
pub const GAME_ID_MAP_FILENAME: &str = "GameID2cht.bin";

/// Directory holding the English cheat files.
pub const ENGLISH_CHEATS_DIRNAME: &str = "Eng";

/// GBA cheats inside a libretro-database checkout.
pub const LIBRETRO_GBA_CHEATS_DIRNAME: &str = "cht/Nintendo - Game Boy Advance";

/// Number of consecutive IDs grouped into one bucket directory.
pub const BUCKET_SIZE: u32 = 200;

/// First ID of the bucket containing `numeric_id`.
pub fn bucket(numeric_id: u32) -> u32 {
    numeric_id - (numeric_id % BUCKET_SIZE)
}

/// Path of the cheat file for `numeric_id`: `<root>/Eng/<bucket>/<id>.cht`,
/// both components zero-padded to 4 digits.
pub fn target_cht_path(cheats_root: &Path, numeric_id: u32) -> PathBuf {
    cheats_root
        .join(ENGLISH_CHEATS_DIRNAME)
        .join(format!("{:04}", bucket(numeric_id)))
        .join(format!("{numeric_id:04}.cht"))
}

pub fn game_id_map_path(cheats_root: &Path) -> PathBuf {
    cheats_root.join(GAME_ID_MAP_FILENAME)
}

pub fn libretro_cheats_dir(libretro_db: &Path) -> PathBuf {
    libretro_db.join(LIBRETRO_GBA_CHEATS_DIRNAME)
}
