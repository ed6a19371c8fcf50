use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::EndemicityError;

/// Config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "endemicity.toml";

/// Settings controlling how matrices are loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// 1-based area number removed before analysis; 0 keeps every area
    pub outgroup: usize,
    /// Cell symbols read as missing by the CSV and Excel loaders
    pub missing_symbols: Vec<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            outgroup: 0,
            missing_symbols: vec!["?".to_string(), "-".to_string()],
        }
    }
}

/// Settings controlling rendered output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Width of the label column in the plain-text report
    pub label_width: usize,
    /// Significant digits shown for percentages
    pub precision: usize,
    /// Where to write the plain-text report, if anywhere
    pub output: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            label_width: 40,
            precision: 3,
            output: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub input: InputConfig,
    pub report: ReportConfig,
}

impl AnalysisConfig {
    /// Parse a TOML config string. Missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, EndemicityError> {
        Ok(toml::from_str(content)?)
    }

    /// Read a TOML config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, EndemicityError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        debug!(path = %path.as_ref().display(), "loaded config file");
        Self::from_toml_str(&content)
    }

    /// Load `path` if given, else [`DEFAULT_CONFIG_FILE`] if it exists, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, EndemicityError> {
        match path {
            Some(p) => Self::from_file(p),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::from_file(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
