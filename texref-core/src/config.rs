//! Configuration loading from texref.toml.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::Path};

use crate::error::{IoResultExt, TexrefError};
use crate::report::ColorChoice;

/// File name looked up next to the analyzed document.
pub const CONFIG_FILE: &str = "texref.toml";

/// Main configuration structure for texref.toml.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TexrefConfig {
    /// Output configuration.
    pub output: Option<OutputConfig>,
}

/// Output configuration.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Output format: "plain" or "json".
    pub format: Option<OutputFormat>,
    /// When to colorize the plain report.
    pub color: Option<ColorChoice>,
    /// Display width for context lines.
    pub width: Option<usize>,
}

/// Report format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Plain,
    Json,
}

impl TexrefConfig {
    pub fn format(&self) -> Option<OutputFormat> {
        self.output.as_ref().and_then(|o| o.format)
    }

    pub fn color(&self) -> Option<ColorChoice> {
        self.output.as_ref().and_then(|o| o.color)
    }

    pub fn width(&self) -> Option<usize> {
        self.output.as_ref().and_then(|o| o.width)
    }
}

/// Loads texref.toml from `dir` if it exists.
pub fn load_config(dir: &Path) -> Result<Option<TexrefConfig>> {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(None);
    }
    load_config_file(&path).map(Some)
}

/// Loads an explicitly named configuration file.
pub fn load_config_file(path: &Path) -> Result<TexrefConfig> {
    let content = fs::read_to_string(path).with_path(path)?;
    let cfg: TexrefConfig =
        toml::from_str(&content).map_err(|e| TexrefError::config(path, e.to_string()))?;
    Ok(cfg)
}
