//! Chorus configuration management
//! Handles loading, merging with defaults, and saving the config file

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Environment variable that overrides the config file location
pub const CONFIG_ENV: &str = "CHORUS_CONFIG";

/// Chorus configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding every repo and its workspaces
    #[serde(default = "default_backing_directory")]
    pub backing_directory: String,

    /// Agent commands offered by `connect`
    #[serde(default)]
    pub agents: Vec<String>,

    /// Name of the tmux session managed by Chorus
    #[serde(default = "default_session_name")]
    pub session_name: String,
}

fn default_backing_directory() -> String {
    "~/.chorus".to_string()
}

fn default_session_name() -> String {
    "chorus".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backing_directory: default_backing_directory(),
            agents: Vec::new(),
            session_name: default_session_name(),
        }
    }
}

impl Config {
    /// Load config from the default location or specified path.
    ///
    /// A missing file yields the defaults without writing anything. A file
    /// that fails to parse is reported and the defaults are used instead.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = Self::config_path(path)?;

        if !config_path.exists() {
            debug!("Config file {:?} not found, using defaults", config_path);
            return Ok(Config::default());
        }

        let raw = fs::read_to_string(&config_path).context("Failed to read config file")?;

        Ok(Self::from_yaml(&raw).unwrap_or_else(|e| {
            warn!("Error loading config file {:?}: {}", config_path, e);
            Config::default()
        }))
    }

    /// Parse YAML, filling absent fields from the defaults
    pub fn from_yaml(raw: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes as null
        let config: Option<Config> = serde_yaml::from_str(raw)?;
        Ok(config.unwrap_or_default())
    }

    /// Save config to the default location or specified path
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let config_path = Self::config_path(path)?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(&self)?;
        fs::write(&config_path, content).context("Failed to write config file")?;

        info!("Saved config to {:?}", config_path);
        Ok(())
    }

    /// Get the config file path
    pub fn config_path(path: Option<&Path>) -> Result<PathBuf> {
        if let Some(p) = path {
            return Ok(p.to_path_buf());
        }

        if let Ok(env_path) = std::env::var(CONFIG_ENV) {
            return Ok(PathBuf::from(env_path));
        }

        let home = dirs::home_dir().context("Cannot find home directory")?;
        Ok(home.join(".config").join("chorus.yaml"))
    }

    /// Add an agent command. Returns false if it was already configured.
    pub fn add_agent(&mut self, agent: &str) -> bool {
        if self.agents.iter().any(|a| a == agent) {
            return false;
        }
        self.agents.push(agent.to_string());
        true
    }

    /// Resolve the backing directory (expand ~)
    pub fn chorus_directory(&self) -> Result<PathBuf> {
        expand_home(&self.backing_directory)
    }
}

/// Expand a leading `~` against the user's home directory
pub fn expand_home(path: &str) -> Result<PathBuf> {
    if path == "~" {
        return dirs::home_dir().context("Cannot find home directory");
    }

    match path.strip_prefix("~/") {
        Some(rest) => {
            let home = dirs::home_dir().context("Cannot find home directory")?;
            Ok(home.join(rest))
        }
        None => Ok(PathBuf::from(path)),
    }
}
