//! Configuration loading from opcompare.toml
//!
//! Hardware peaks, backend labels and output settings can be specified in an
//! `opcompare.toml` file. The file is discovered by walking up from the current
//! directory unless a path is passed with `--config`.

use opcompare_model::HardwareProfile;
use opcompare_report::DEFAULT_INDENT;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the discovered configuration file
pub const CONFIG_FILE_NAME: &str = "opcompare.toml";

/// opcompare configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OpcompareConfig {
    /// Device peaks used by the theoretical model
    #[serde(default)]
    pub hardware: HardwareProfile,
    /// Backend label overrides
    #[serde(default)]
    pub labels: LabelConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Backend label overrides
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LabelConfig {
    /// Label for the first document's backend
    #[serde(default)]
    pub baseline: Option<String>,
    /// Label for the second document's backend
    #[serde(default)]
    pub candidate: Option<String>,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format: "json" or "human"
    #[serde(default = "default_format")]
    pub format: String,
    /// JSON indentation width
    #[serde(default = "default_indent")]
    pub indent: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            indent: default_indent(),
        }
    }
}

fn default_format() -> String {
    "json".to_string()
}
fn default_indent() -> usize {
    DEFAULT_INDENT
}

impl OpcompareConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Find `opcompare.toml` by walking up from `start`
    pub fn find(start: impl Into<PathBuf>) -> Option<PathBuf> {
        let mut dir = start.into();
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Some(config_path);
            }
            if !dir.pop() {
                return None;
            }
        }
    }

    /// Try to discover and load configuration from the current directory upwards
    pub fn discover() -> anyhow::Result<Option<Self>> {
        let cwd = std::env::current_dir()?;
        Self::find(cwd).map(|path| Self::load(&path)).transpose()
    }
}
