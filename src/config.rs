//! Global configuration
//!
//! Configuration lives in a single `config.toml` under the tool's config
//! directory. It can pin the docker-compose executable instead of relying
//! on search-path lookup, and set defaults applied to every invocation.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Environment variable overriding the configuration directory.
pub const CONFIG_DIR_ENV: &str = "COMPOSE_BRIDGE_DIR";

/// Get the configuration directory path
/// Checks the COMPOSE_BRIDGE_DIR environment variable first,
/// then defaults to ~/.compose-bridge
pub fn config_dir() -> Result<PathBuf> {
    if let Ok(custom_dir) = env::var(CONFIG_DIR_ENV) {
        return Ok(PathBuf::from(custom_dir));
    }

    let home_dir = dirs::home_dir().ok_or_else(|| Error::Config {
        message: "failed to locate home directory".to_string(),
    })?;

    Ok(home_dir.join(".compose-bridge"))
}

/// Ensure the configuration directory exists, writing a commented default
/// config.toml on first use
pub fn ensure_config_dir() -> Result<PathBuf> {
    let config_dir = config_dir()?;

    fs::create_dir_all(&config_dir).map_err(|source| Error::Io {
        path: config_dir.clone(),
        source,
    })?;

    let config_file = config_dir.join("config.toml");
    if !config_file.exists() {
        create_default_config(&config_file)?;
    }

    Ok(config_dir)
}

fn create_default_config(config_path: &Path) -> Result<()> {
    let default_config = r#"# Global configuration for compose-bridge

[runner]
# Pin the docker-compose executable instead of searching PATH.
# The COMPOSE_BRIDGE_BIN environment variable takes precedence over this.
# executable = "/usr/local/bin/docker-compose"

[defaults]
# Apply --always-yes to every invocation.
always_yes = false
"#;

    fs::write(config_path, default_config).map_err(|source| Error::Io {
        path: config_path.to_path_buf(),
        source,
    })
}

/// Global configuration file contents.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Executable resolution settings.
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Defaults applied to every invocation.
    #[serde(default)]
    pub defaults: DefaultSettings,
}

/// Executable resolution settings.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RunnerConfig {
    /// Explicit docker-compose executable, overriding search-path lookup.
    pub executable: Option<PathBuf>,
}

/// Defaults applied to every invocation.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DefaultSettings {
    /// Apply `--always-yes` to every invocation.
    #[serde(default)]
    pub always_yes: bool,
}

/// Load the global configuration, falling back to built-in defaults when
/// the file does not exist yet.
pub fn load() -> Result<Config> {
    load_from(&config_dir()?.join("config.toml"))
}

/// Load configuration from a specific path.
pub fn load_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&content).map_err(|err| Error::Config {
        message: format!("failed to parse {}: {}", path.display(), err),
    })
}
