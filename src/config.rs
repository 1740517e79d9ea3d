//! Configuration loading.
//!
//! Settings come from a `patternscout.toml` file in the analyzed project (or
//! the working directory), overridden by CLI arguments in `main`.

use crate::errors::{AnalysisError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "patternscout.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Subdirectories to restrict analysis to (empty = whole project).
    pub targets: Vec<PathBuf>,

    /// Path substrings to exclude from discovery.
    pub exclude: Vec<String>,

    /// Where to write the per-batch CSV report, if anywhere.
    pub csv_report: Option<PathBuf>,
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| AnalysisError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&text).map_err(|e| AnalysisError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Look for a config file next to the project, then in the working
    /// directory; fall back to defaults when neither exists.
    pub fn from_default_locations(project: &Path) -> Result<Self> {
        let candidates = [
            project.join(CONFIG_FILE_NAME),
            PathBuf::from(CONFIG_FILE_NAME),
        ];
        for candidate in candidates {
            if candidate.is_file() {
                return Self::from_file(&candidate);
            }
        }
        Ok(Self::default())
    }
}
