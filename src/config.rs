use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tunables of the editor core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Marquee selections smaller than this (image pixels) in either direction are rejected
    pub min_selection_px: f32,
    /// Lower bound for layer width/height during resize, in percent of the canvas
    pub min_layer_size_percent: f32,
    /// Blur sigma applied to magic-wand masks
    pub magic_wand_feather: f32,
    /// Image-pixel distance within which a polygonal lasso click closes the loop
    pub lasso_close_radius: f32,
    pub default_export_quality: u8,
    /// Seconds between autosaves
    pub autosave_interval_secs: u64,
    pub max_autosaves: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_selection_px: 5.0,
            min_layer_size_percent: 1.0,
            magic_wand_feather: 2.0,
            lasso_close_radius: 10.0,
            default_export_quality: 92,
            autosave_interval_secs: 300,
            max_autosaves: 5,
        }
    }
}

impl EditorConfig {
    /// Loads a JSON config; missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}
