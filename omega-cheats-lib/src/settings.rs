//! User settings, read from `~/.config/omega-cheats/settings.toml`.
//!
//! ```toml
//! [patch]
//! stub_header = ""
//! atomic_write = true
//! ```
//!
//! Every field is optional; a missing file means defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::PatchError;
use crate::splice::StubPolicy;

/// Canonical path to the settings file.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("omega-cheats").join("settings.toml")
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub patch: PatchSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatchSettings {
    /// Contents of newly created target files; empty means an empty file.
    pub stub_header: String,
    /// Write targets through a temp file and rename.
    pub atomic_write: bool,
}

impl Default for PatchSettings {
    fn default() -> Self {
        Self {
            stub_header: String::new(),
            atomic_write: true,
        }
    }
}

impl PatchSettings {
    pub fn stub_policy(&self) -> StubPolicy {
        StubPolicy::from_header(Some(self.stub_header.as_str()))
    }
}

impl Settings {
    /// Load settings from the canonical path.
    pub fn load() -> Result<Self, PatchError> {
        Self::load_from(&settings_path())
    }

    /// Load settings from `path`, falling back to defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self, PatchError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents)
                .map_err(|e| PatchError::settings(format!("{}: {e}", path.display()))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn parse(contents: &str) -> Result<Self, PatchError> {
        toml::from_str(contents).map_err(|e| PatchError::settings(e.to_string()))
    }

    /// Pretty-printed TOML, for display.
    pub fn to_toml_string(&self) -> Result<String, PatchError> {
        toml::to_string_pretty(self).map_err(|e| PatchError::settings(e.to_string()))
    }
}
