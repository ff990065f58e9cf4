use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "releasenotes.toml";

/// Represents the complete configuration for git-release-notes.
///
/// Contains the commit range defaults, reference extraction settings and
/// the repository host coordinates used to build links.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_base_ref")]
    pub base_ref: String,

    #[serde(default = "default_task_prefix")]
    pub task_prefix: String,

    #[serde(default)]
    pub task_base_url: Option<String>,

    /// Application name; selects the `<app>@` tag prefix and the default scope filter.
    #[serde(default)]
    pub app: Option<String>,

    #[serde(default)]
    pub commit_scope: Option<String>,

    #[serde(default)]
    pub repository: RepositoryConfig,
}

/// Returns the default base reference used when no release tag exists.
fn default_base_ref() -> String {
    "master".to_string()
}

/// Returns the default task identifier prefix.
fn default_task_prefix() -> String {
    "JIRA-".to_string()
}

fn default_host_url() -> String {
    "https://github.com".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

/// Coordinates of the repository on its web host.
///
/// `owner` and `name` may be left out; they are then inferred from the URL
/// of `remote` in the local repository.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RepositoryConfig {
    #[serde(default = "default_host_url")]
    pub host_url: String,

    #[serde(default)]
    pub owner: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default = "default_remote")]
    pub remote: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        RepositoryConfig {
            host_url: default_host_url(),
            owner: None,
            name: None,
            remote: default_remote(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_ref: default_base_ref(),
            task_prefix: default_task_prefix(),
            task_base_url: None,
            app: None,
            commit_scope: None,
            repository: RepositoryConfig::default(),
        }
    }
}

impl Config {
    /// Tag prefix for releases: `<app>@` for app-scoped releases, `v` otherwise.
    pub fn tag_prefix(&self) -> String {
        match self.app.as_deref() {
            Some(app) if !app.is_empty() => format!("{}@", app),
            _ => "v".to_string(),
        }
    }

    /// Scope filter applied during classification.
    ///
    /// An explicit `commit_scope` wins; otherwise the app name doubles as scope.
    pub fn effective_scope(&self) -> Option<&str> {
        self.commit_scope
            .as_deref()
            .or(self.app.as_deref())
            .filter(|scope| !scope.is_empty())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `releasenotes.toml` in current directory
/// 3. `.releasenotes.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        fs::read_to_string(CONFIG_FILE_NAME)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}
