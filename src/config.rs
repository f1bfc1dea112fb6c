//! User configuration loaded from `config.toml`.

use directories::ProjectDirs;
use serde::Deserialize;
use sheets_engine::engine::EvalOptions;
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};

const MAX_CONFIG_FILE_BYTES: u64 = 1_048_576; // 1 MiB

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub eval: EvalConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EvalConfig {
    #[serde(default = "default_detect_cycles")]
    pub detect_cycles: bool,
}

fn default_detect_cycles() -> bool {
    true
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            detect_cycles: default_detect_cycles(),
        }
    }
}

impl Config {
    pub fn eval_options(&self) -> EvalOptions {
        EvalOptions {
            detect_cycles: self.eval.detect_cycles,
        }
    }

    pub fn from_toml(content: &str, path: &Path) -> Result<Config> {
        toml::from_str(content).map_err(|err| AppError::Config {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }
}

/// Load the configuration from `explicit`, or from the user config directory.
///
/// A missing default file yields the defaults; a missing explicit file is an error.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match user_config_path() {
            Some(path) if path.is_file() => path,
            _ => return Ok(Config::default()),
        },
    };

    let meta = std::fs::metadata(&path).map_err(|err| AppError::Config {
        path: path.clone(),
        message: err.to_string(),
    })?;
    if meta.len() > MAX_CONFIG_FILE_BYTES {
        return Err(AppError::Config {
            path,
            message: format!(
                "file too large ({} bytes, max {})",
                meta.len(),
                MAX_CONFIG_FILE_BYTES
            ),
        });
    }

    let content = std::fs::read_to_string(&path)?;
    log::debug!("loading config from {}", path.display());
    Config::from_toml(&content, &path)
}

fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "sheets")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}
