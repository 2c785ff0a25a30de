//! Short game name → Libretro cheat file index.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use omega_cheats_dat::short_name;

/// Delimiters that end the short name of a Libretro cheat file name, after
/// the extension has been stripped.
pub const LIBRETRO_NAME_DELIMITERS: &[char] = &['(', '_'];

/// An index of the cheat files in a Libretro cheat directory, keyed by short
/// game name.
#[derive(Debug, Default)]
pub struct LibretroIndex {
    by_name: HashMap<String, PathBuf>,
}

impl LibretroIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every regular file directly inside `dir`.
    ///
    /// Entries are visited in path order, so when two files reduce to the
    /// same short name the one sorting last wins.
    pub fn from_dir(dir: &Path) -> io::Result<Self> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();

        let mut index = Self::new();
        for path in paths {
            index.insert_path(path);
        }
        log::debug!(
            "Indexed {} Libretro cheat files from {}",
            index.len(),
            dir.display()
        );
        Ok(index)
    }

    fn insert_path(&mut self, path: PathBuf) {
        let name = {
            let file_name = path.file_name().unwrap_or_default().to_string_lossy();
            short_name(&file_name, LIBRETRO_NAME_DELIMITERS).to_string()
        };
        if let Some(previous) = self.insert(name.clone(), path) {
            log::debug!(
                "Cheat file {} for {name:?} replaced by a later file",
                previous.display()
            );
        }
    }

    /// Map a short name to a cheat file, returning the path it replaced.
    pub fn insert(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) -> Option<PathBuf> {
        self.by_name.insert(name.into(), path.into())
    }

    /// Look up the cheat file for a short game name.
    pub fn get(&self, name: &str) -> Option<&Path> {
        self.by_name.get(name).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Golden Sun (USA, Europe).cht"), "").unwrap();
        std::fs::write(dir.path().join("Metroid Fusion.cht"), "").unwrap();
        std::fs::write(dir.path().join("Kirby_Nightmare in Dream Land.cht"), "").unwrap();
        std::fs::create_dir(dir.path().join("Subdir (USA)")).unwrap();

        let index = LibretroIndex::from_dir(dir.path()).unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(
            index.get("Golden Sun"),
            Some(dir.path().join("Golden Sun (USA, Europe).cht").as_path())
        );
        assert!(index.get("Metroid Fusion").is_some());
        assert!(index.get("Kirby").is_some());
        assert!(index.get("Subdir").is_none());
    }

    #[test]
    fn test_collision_last_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Pokemon (Europe).cht"), "").unwrap();
        std::fs::write(dir.path().join("Pokemon (USA).cht"), "").unwrap();

        let index = LibretroIndex::from_dir(dir.path()).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(
            index.get("Pokemon"),
            Some(dir.path().join("Pokemon (USA).cht").as_path())
        );
    }

    #[test]
    fn test_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(LibretroIndex::from_dir(&dir.path().join("nope")).is_err());
    }
}
