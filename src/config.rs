//! Demo and display configuration.
//!
//! Loaded from YAML with precedence: CLI > file > defaults.

use crate::error::{Error, Result};
use crate::figure::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where and how figures are written and shown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Directory figures are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Open written figures in the default browser.
    #[serde(default = "default_open_browser")]
    pub open_browser: bool,

    /// File format of written figures.
    #[serde(default)]
    pub format: OutputFormat,

    /// Figure width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Figure height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,
}

/// `<cache dir>/graphing`, or `<temp dir>/graphing` where the platform has
/// no cache directory.
#[must_use]
pub fn default_output_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("graphing")
}
fn default_open_browser() -> bool {
    true
}
fn default_width() -> u32 {
    800
}
fn default_height() -> u32 {
    600
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            open_browser: default_open_browser(),
            format: OutputFormat::default(),
            width: default_width(),
            height: default_height(),
        }
    }
}

/// Settings for the demo run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Rows in the generated table.
    #[serde(default = "default_rows")]
    pub rows: usize,

    /// RNG seed; `None` draws from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Prefix lengths used for the 2D scatters.
    #[serde(default = "default_sample_sizes")]
    pub sample_sizes: Vec<usize>,

    /// Output settings.
    #[serde(default)]
    pub display: DisplayConfig,
}

fn default_rows() -> usize {
    1000
}
fn default_sample_sizes() -> Vec<usize> {
    vec![10, 50, 200, 1000]
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            seed: None,
            sample_sizes: default_sample_sizes(),
            display: DisplayConfig::default(),
        }
    }
}

impl DemoConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails.
    pub fn parse(yaml: &str) -> Result<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map(|l| l.line()).unwrap_or(0);
            Error::ConfigParse {
                line,
                message: e.to_string(),
            }
        })
    }

    /// Checks that the demo has rows to draw.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] when `rows` or any sample size is 0.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 {
            return Err(Error::InvalidConfig("rows must be at least 1".to_string()));
        }
        if self.sample_sizes.contains(&0) {
            return Err(Error::InvalidConfig(
                "sample_sizes entries must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
