//! Tests for configuration loading.

use serial_test::serial;
use tempfile::TempDir;

use crate::config::{Config, ConfigError, ConnectionConfig, ENV_MCP_SERVER_CONFIG, config_path};

#[test]
fn default_connection_config() {
    let config = ConnectionConfig::default();

    assert_eq!(config.path, "mcp_db.sqlite");
    assert_eq!(config.timeout, 3);
    assert_eq!(config.max_idle_conns, 5);
    assert_eq!(config.max_open_conns, 10);
    assert!(config.validate().is_ok());
}

#[test]
fn default_config_wraps_default_connection() {
    let config = Config::default();
    assert_eq!(config.database, ConnectionConfig::default());
}

#[test]
fn load_from_missing_file_returns_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::load_from(temp_dir.path().join("absent.yml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn load_from_empty_file_returns_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.yml");
    std::fs::write(&path, "").unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn load_from_file_reads_all_fields() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.yml");
    std::fs::write(
        &path,
        "database:\n  path: /var/lib/finance.db\n  timeout: 5\n  maxIdleConns: 10\n  maxOpenConns: 20\n",
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.database.path, "/var/lib/finance.db");
    assert_eq!(config.database.timeout, 5);
    assert_eq!(config.database.max_idle_conns, 10);
    assert_eq!(config.database.max_open_conns, 20);
}

#[test]
fn load_from_partial_file_fills_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.yml");
    std::fs::write(&path, "database:\n  path: ':memory:'\n").unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.database.path, ":memory:");
    assert_eq!(config.database.max_open_conns, 10);
}

#[test]
fn load_from_written_config_round_trips() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.yml");
    let custom = Config {
        database: ConnectionConfig {
            path: "custom.db".to_string(),
            timeout: 7,
            max_idle_conns: 2,
            max_open_conns: 4,
        },
    };
    std::fs::write(&path, serde_yaml::to_string(&custom).unwrap()).unwrap();

    assert_eq!(Config::load_from(&path).unwrap(), custom);
}

#[test]
fn load_from_malformed_file_is_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.yml");
    std::fs::write(&path, "database: [not, a, map").unwrap();

    let result = Config::load_from(&path);
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[test]
fn validate_rejects_short_timeout() {
    let config = ConnectionConfig {
        timeout: 1,
        ..ConnectionConfig::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));
}

#[test]
fn validate_rejects_pool_bounds() {
    let too_small = ConnectionConfig {
        max_open_conns: 1,
        max_idle_conns: 1,
        ..ConnectionConfig::default()
    };
    assert!(too_small.validate().is_err());

    let idle_over_open = ConnectionConfig {
        max_idle_conns: 8,
        max_open_conns: 4,
        ..ConnectionConfig::default()
    };
    assert!(idle_over_open.validate().is_err());

    let no_idle = ConnectionConfig {
        max_idle_conns: 0,
        ..ConnectionConfig::default()
    };
    assert!(no_idle.validate().is_err());
}

#[test]
fn validate_rejects_empty_path() {
    let config = ConnectionConfig {
        path: "  ".to_string(),
        ..ConnectionConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
#[serial]
fn load_uses_env_var_path() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("from-env.yml");
    std::fs::write(&path, "database:\n  path: env.db\n").unwrap();

    // SAFETY: serialized with every other test touching the environment.
    unsafe { std::env::set_var(ENV_MCP_SERVER_CONFIG, &path) };
    let loaded = Config::load();
    unsafe { std::env::remove_var(ENV_MCP_SERVER_CONFIG) };

    assert_eq!(loaded.unwrap().database.path, "env.db");
}

#[test]
#[serial]
fn config_path_falls_back_to_executable_dir() {
    // SAFETY: serialized with every other test touching the environment.
    unsafe { std::env::remove_var(ENV_MCP_SERVER_CONFIG) };

    let path = config_path().unwrap();
    let exe_dir = std::env::current_exe().unwrap().parent().unwrap().to_path_buf();
    assert_eq!(path, exe_dir.join("config.yml"));
}
