use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{DEFAULT_DEPTH, DEFAULT_MODEL};
use crate::prediction::LabelScheme;
use crate::raster::{Extraction, DEFAULT_GRID};

/// Settings a [`crate::Recognizer`] is built from. Every field has a default,
/// so a config file only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecognizerConfig {
    pub model: String,
    pub weights_dir: PathBuf,
    /// Number of weight matrices per model.
    pub depth: usize,
    pub grid: usize,
    pub extraction: Extraction,
    pub labels: LabelScheme,
    pub confidence_threshold: f64,
    /// Log each extracted grid as text.
    pub debug: bool,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        RecognizerConfig {
            model: DEFAULT_MODEL.to_string(),
            weights_dir: PathBuf::from("weights"),
            depth: DEFAULT_DEPTH,
            grid: DEFAULT_GRID,
            extraction: Extraction::Alpha,
            labels: LabelScheme::OneBased,
            confidence_threshold: 0.5,
            debug: false,
        }
    }
}

impl RecognizerConfig {
    pub fn from_json_str(s: &str) -> Result<RecognizerConfig> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_json_file(path: &Path) -> Result<RecognizerConfig> {
        let text = fs::read_to_string(path)?;
        RecognizerConfig::from_json_str(&text)
    }
}
