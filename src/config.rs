//! Server configuration.
//!
//! Configuration is read from a YAML file. The file path comes from the
//! `MCP_SERVER_CONFIG` environment variable, falling back to `config.yml`
//! next to the running binary. A missing file means defaults.

use std::path::{Path, PathBuf};

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Environment variable naming the configuration file.
pub const ENV_MCP_SERVER_CONFIG: &str = "MCP_SERVER_CONFIG";

/// File name looked up beside the executable.
pub const DEFAULT_CONFIG_FILE: &str = "config.yml";

const MIN_TIMEOUT_SECS: u64 = 3;

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    #[diagnostic(code(finance::config::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    #[diagnostic(
        code(finance::config::parse),
        help("The file must be YAML with a top-level `database` section")
    )]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(finance::config::invalid))]
    Invalid { message: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Connection pool settings for the SQLite store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConnectionConfig {
    /// Database file, or `:memory:` for an in-memory store.
    pub path: String,
    /// Seconds to wait for a pooled connection or a locked database.
    pub timeout: u64,
    /// Connections kept open while idle.
    pub max_idle_conns: u32,
    /// Upper bound on open connections.
    pub max_open_conns: u32,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            path: "mcp_db.sqlite".to_string(),
            timeout: MIN_TIMEOUT_SECS,
            max_idle_conns: 5,
            max_open_conns: 10,
        }
    }
}

impl ConnectionConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        let invalid = |message: String| Err(ConfigError::Invalid { message });

        if self.path.trim().is_empty() {
            return invalid("database path must not be empty".to_string());
        }
        if self.timeout < MIN_TIMEOUT_SECS {
            return invalid(format!(
                "timeout must be at least {MIN_TIMEOUT_SECS}s, got {}s",
                self.timeout
            ));
        }
        if self.max_idle_conns < 1 {
            return invalid("maxIdleConns must be at least 1".to_string());
        }
        if self.max_open_conns < 2 {
            return invalid(format!(
                "maxOpenConns must be at least 2, got {}",
                self.max_open_conns
            ));
        }
        if self.max_idle_conns > self.max_open_conns {
            return invalid(format!(
                "maxIdleConns ({}) must not exceed maxOpenConns ({})",
                self.max_idle_conns, self.max_open_conns
            ));
        }
        Ok(())
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: ConnectionConfig,
}

impl Config {
    /// Load from `MCP_SERVER_CONFIG`, else `config.yml` beside the binary.
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(config_path()?)
    }

    /// Load from the given file, returning defaults when it does not exist.
    pub fn load_from(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        // An empty file parses to null; treat it as "all defaults".
        if data.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Resolve the configuration file location.
pub fn config_path() -> ConfigResult<PathBuf> {
    if let Ok(path) = std::env::var(ENV_MCP_SERVER_CONFIG)
        && !path.is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    let exe = std::env::current_exe().map_err(|source| ConfigError::Io {
        path: PathBuf::from("<current executable>"),
        source,
    })?;
    let dir = exe.parent().unwrap_or_else(|| Path::new("."));
    Ok(dir.join(DEFAULT_CONFIG_FILE))
}
