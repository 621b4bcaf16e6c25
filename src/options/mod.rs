//! Playback options with TOML preset support.
//!
//! Timing, palette and canvas settings are consolidated here. Options
//! serialize to/from TOML so a host can keep named presets on disk.

mod canvas;
mod colors;
mod timing;

use std::path::Path;

pub use canvas::CanvasOptions;
pub use colors::ColorOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use timing::TimingOptions;

use crate::error::SaplingError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[timing]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[serde(default)]
pub struct Options {
    /// Step delays.
    pub timing: TimingOptions,
    /// Highlight and fade colors.
    #[schemars(skip)]
    pub colors: ColorOptions,
    /// Layout drawing area.
    pub canvas: CanvasOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, SaplingError> {
        let content = std::fs::read_to_string(path).map_err(SaplingError::Io)?;
        toml::from_str(&content)
            .map_err(|e| SaplingError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), SaplingError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SaplingError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(SaplingError::Io)?;
        }
        std::fs::write(path, content).map_err(SaplingError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}
