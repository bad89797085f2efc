use crate::error::{GitEpochError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name looked up in the repository work tree
pub const CONFIG_FILE_NAME: &str = "git-epoch.toml";

/// File name looked up in the user configuration directory
pub const USER_CONFIG_FILE_NAME: &str = ".git-epoch.toml";

/// Represents the complete configuration for git-epoch.
///
/// Every field has a default, so an empty file (or no file) is valid.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub tagging: TaggingConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

fn default_tag_message() -> String {
    "Release {version}".to_string()
}

fn default_max_commits() -> usize {
    10
}

fn default_true() -> bool {
    true
}

/// How release tags are written.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TaggingConfig {
    /// Create annotated tags instead of lightweight ones
    #[serde(default)]
    pub annotated: bool,

    /// Message template for annotated tags; `{version}` is replaced
    #[serde(default = "default_tag_message")]
    pub message: String,
}

impl Default for TaggingConfig {
    fn default() -> Self {
        TaggingConfig {
            annotated: false,
            message: default_tag_message(),
        }
    }
}

impl TaggingConfig {
    /// Tag message for `version`, or `None` when tags are lightweight
    pub fn message_for(&self, version: &str) -> Option<String> {
        self.annotated
            .then(|| self.message.replace("{version}", version))
    }
}

/// Output settings for the command line front end.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DisplayConfig {
    /// Commits listed by `analyze` before the list is truncated
    #[serde(default = "default_max_commits")]
    pub max_commits: usize,

    /// Show the `.devN` version when HEAD is past the latest tag
    #[serde(default = "default_true")]
    pub show_dev_version: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            max_commits: default_max_commits(),
            show_dev_version: true,
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Lookup order:
/// 1. `config_path`, when given (must exist)
/// 2. `git-epoch.toml` in `workdir`
/// 3. `.git-epoch.toml` in the user config directory
/// 4. Default configuration
pub fn load_config(config_path: Option<&Path>, workdir: Option<&Path>) -> Result<Config> {
    let path = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => find_config_file(workdir),
    };

    let Some(path) = path else {
        debug!("No configuration file found, using defaults");
        return Ok(Config::default());
    };

    let content = fs::read_to_string(&path).map_err(|e| {
        GitEpochError::config(format!("Cannot read {}: {}", path.display(), e))
    })?;
    debug!(path = %path.display(), "Loaded configuration");

    parse_config(&content)
        .map_err(|e| GitEpochError::config(format!("{}: {}", path.display(), e)))
}

/// Parse configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config> {
    toml::from_str(content).map_err(|e| GitEpochError::config(e.to_string()))
}

fn find_config_file(workdir: Option<&Path>) -> Option<PathBuf> {
    let local = workdir.map(|dir| dir.join(CONFIG_FILE_NAME));
    let user = dirs::config_dir().map(|dir| dir.join(USER_CONFIG_FILE_NAME));

    local.into_iter().chain(user).find(|path| path.is_file())
}
