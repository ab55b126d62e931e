use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Result, VrsnError};

/// Name of the configuration file looked up in the config directories.
pub const CONFIG_FILE_NAME: &str = "vrsn.toml";

/// Represents the complete configuration for vrsn.
///
/// Contains global options plus per-command defaults for `bump` and `check`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(default)]
    pub verbose: bool,

    #[serde(default)]
    pub bump: BumpConfig,

    #[serde(default)]
    pub check: CheckConfig,
}

fn default_commit_msg() -> String {
    "bump version".to_string()
}

fn default_tag_msg() -> String {
    "release {version}".to_string()
}

fn default_base_branch() -> String {
    "main".to_string()
}

/// Defaults for the `bump` command.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct BumpConfig {
    #[serde(default)]
    pub commit: bool,

    #[serde(default = "default_commit_msg")]
    pub commit_msg: String,

    #[serde(default)]
    pub git_tag: bool,

    /// Annotation for created tags; `{version}` is replaced by the new version.
    #[serde(default = "default_tag_msg")]
    pub tag_msg: String,
}

impl Default for BumpConfig {
    fn default() -> Self {
        BumpConfig {
            commit: false,
            commit_msg: default_commit_msg(),
            git_tag: false,
            tag_msg: default_tag_msg(),
        }
    }
}

/// Defaults for the `check` command.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct CheckConfig {
    #[serde(default = "default_base_branch")]
    pub base_branch: String,
}

impl Default for CheckConfig {
    fn default() -> Self {
        CheckConfig {
            base_branch: default_base_branch(),
        }
    }
}

impl Config {
    /// Parses a config from TOML, filling in defaults.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(contents).map_err(|e| VrsnError::config(e.to_string()))?;
        Ok(config.with_defaults())
    }

    /// Replaces empty strings with their defaults.
    fn with_defaults(mut self) -> Self {
        if self.bump.commit_msg.trim().is_empty() {
            self.bump.commit_msg = default_commit_msg();
        }
        if self.bump.tag_msg.trim().is_empty() {
            self.bump.tag_msg = default_tag_msg();
        }
        if self.check.base_branch.trim().is_empty() {
            self.check.base_branch = default_base_branch();
        }
        self
    }
}

/// Candidate config file locations, in lookup order.
///
/// 1. `$XDG_CONFIG_DIR/vrsn.toml`
/// 2. `~/.config/vrsn.toml`
fn config_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(dir) = env::var("XDG_CONFIG_DIR") {
        if !dir.is_empty() {
            candidates.push(PathBuf::from(dir).join(CONFIG_FILE_NAME));
        }
    }

    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(".config").join(CONFIG_FILE_NAME));
    }

    candidates
}

/// Returns the first config file that exists, if any.
pub fn find_config_file() -> Option<PathBuf> {
    config_candidates().into_iter().find(|path| path.is_file())
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter (must exist)
/// 2. `$XDG_CONFIG_DIR/vrsn.toml`
/// 3. `~/.config/vrsn.toml`
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = match config_path {
        Some(path) => {
            if !path.is_file() {
                return Err(VrsnError::config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            path.to_path_buf()
        }
        None => match find_config_file() {
            Some(path) => path,
            None => {
                debug!("no config file found, using defaults");
                return Ok(Config::default());
            }
        },
    };

    debug!("loading config from {}", path.display());
    let contents = fs::read_to_string(&path)?;
    Config::from_toml(&contents)
}
