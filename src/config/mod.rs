use crate::constants::{database as db_defaults, env_vars, server as server_defaults};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub mod paths;
pub mod validation;

use paths::{get_config_path, get_log_dir_path};
use validation::validate_config;

/// Configuration structure for the application.
/// Handles loading, saving, and managing application settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Path of the SQLite database holding the `results` table.
    pub database_path: String,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Connection pool and query settings.
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// HTTP listener settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Sessions beyond this count evict the least recently used one.
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

/// Connection pool and query settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DatabaseConfig {
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,
    #[serde(default = "default_query_timeout")]
    pub query_timeout_seconds: u64,
    #[serde(default = "default_busy_timeout")]
    pub busy_timeout_ms: u64,
}

fn default_host() -> String {
    server_defaults::DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    server_defaults::DEFAULT_PORT
}

fn default_max_sessions() -> usize {
    server_defaults::DEFAULT_MAX_SESSIONS
}

fn default_pool_size() -> usize {
    db_defaults::DEFAULT_POOL_SIZE
}

fn default_query_timeout() -> u64 {
    db_defaults::DEFAULT_QUERY_TIMEOUT_SECONDS
}

fn default_busy_timeout() -> u64 {
    db_defaults::DEFAULT_BUSY_TIMEOUT_MS
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: default_host(),
            port: default_port(),
            max_sessions: default_max_sessions(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            pool_size: default_pool_size(),
            query_timeout_seconds: default_query_timeout(),
            busy_timeout_ms: default_busy_timeout(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_path: String::new(),
            log_file_path: None,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from `custom_path` or the default config file location,
    /// then applies environment variable overrides.
    ///
    /// A missing file is not an error: defaults are used and the database path
    /// must then come from the environment or the command line.
    ///
    /// # Environment Variables
    /// - `SOCCER_DATABASE` - Override database path
    /// - `SOCCER_HOST` - Override bind host
    /// - `SOCCER_PORT` - Override bind port
    /// - `SOCCER_LOG_FILE` - Override log file path
    /// - `SOCCER_QUERY_TIMEOUT` - Override query timeout in seconds
    ///
    /// The result is not validated; call [`Config::validate`] after applying
    /// command line overrides.
    pub async fn load(custom_path: Option<&str>) -> Result<Self, AppError> {
        let config_path = custom_path
            .map(str::to_string)
            .unwrap_or_else(get_config_path);

        let mut config = if Path::new(&config_path).exists() {
            Self::load_from_path(&config_path).await?
        } else {
            tracing::debug!("No config file at {config_path}, using defaults");
            Config::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Overrides settings with the `SOCCER_*` environment variables that are set
    pub fn apply_env_overrides(&mut self) {
        if let Ok(database_path) = std::env::var(env_vars::DATABASE) {
            self.database_path = database_path;
        }

        if let Ok(host) = std::env::var(env_vars::HOST) {
            self.server.host = host;
        }

        if let Some(port) = std::env::var(env_vars::PORT)
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.server.port = port;
        }

        if let Ok(log_file_path) = std::env::var(env_vars::LOG_FILE) {
            self.log_file_path = Some(log_file_path);
        }

        if let Some(timeout) = std::env::var(env_vars::QUERY_TIMEOUT)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.database.query_timeout_seconds = timeout;
        }
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(
            &self.database_path,
            &self.log_file_path,
            &self.server,
            &self.database,
        )
    }

    /// Address the HTTP listener binds to, as `host:port`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Saves current configuration to `custom_path` or the default config file location.
    pub async fn save(&self, custom_path: Option<&str>) -> Result<(), AppError> {
        let config_path = custom_path
            .map(str::to_string)
            .unwrap_or_else(get_config_path);
        self.save_to_path(&config_path).await
    }

    /// Returns the platform-specific path for the config file.
    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    /// Returns the platform-specific path for the log directory.
    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// Displays current configuration settings to stdout.
    ///
    /// # Notes
    /// - Shows config file location and effective settings (file plus environment)
    /// - Handles case when no config file exists
    pub async fn display(custom_path: Option<&str>) -> Result<(), AppError> {
        let config_path = custom_path
            .map(str::to_string)
            .unwrap_or_else(get_config_path);
        let log_dir = get_log_dir_path();

        if !Path::new(&config_path).exists() {
            println!("\nNo configuration file found at:");
            println!("{config_path}");
        }

        let config = Config::load(Some(&config_path)).await?;
        println!("\nCurrent Configuration");
        println!("────────────────────────────────────");
        println!("Config Location:");
        println!("{config_path}");
        println!("────────────────────────────────────");
        println!("Database:");
        if config.database_path.is_empty() {
            println!("(not configured)");
        } else {
            println!("{}", config.database_path);
        }
        println!(
            "pool size {}, query timeout {} seconds",
            config.database.pool_size, config.database.query_timeout_seconds
        );
        println!("────────────────────────────────────");
        println!("Listen Address:");
        println!("{}", config.bind_address());
        println!("────────────────────────────────────");
        println!("Log File Location:");
        if let Some(custom_path) = &config.log_file_path {
            println!("{custom_path}");
        } else {
            println!("{log_dir}/{}", crate::constants::LOG_FILE_NAME);
            println!("(Default location)");
        }

        Ok(())
    }

    /// Saves configuration to a custom file path.
    ///
    /// Creates the parent directory if it doesn't exist.
    ///
    /// # Errors
    /// * `AppError::Config` - If the provided path has no parent directory
    /// * `AppError::Io` - If there's an I/O error creating directories or writing the file
    /// * `AppError::TomlSerialize` - If there's an error serializing the configuration
    pub async fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        let config_dir = Path::new(path).parent().ok_or_else(|| {
            AppError::config_error(format!("Path '{path}' has no parent directory"))
        })?;

        if !config_dir.as_os_str().is_empty() && !config_dir.exists() {
            fs::create_dir_all(config_dir).await?;
        }
        let content = toml::to_string_pretty(self)?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Loads configuration from a file path without environment overrides.
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    fn clear_env() {
        unsafe {
            std::env::remove_var(env_vars::DATABASE);
            std::env::remove_var(env_vars::HOST);
            std::env::remove_var(env_vars::PORT);
            std::env::remove_var(env_vars::LOG_FILE);
            std::env::remove_var(env_vars::QUERY_TIMEOUT);
        }
    }

    fn sample_config() -> Config {
        Config {
            database_path: "/data/results.db".to_string(),
            log_file_path: Some("/custom/log/path.log".to_string()),
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 9000,
                max_sessions: 16,
            },
            database: DatabaseConfig {
                pool_size: 2,
                query_timeout_seconds: 5,
                busy_timeout_ms: 500,
            },
        }
    }

    #[tokio::test]
    async fn test_config_load_existing_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path_str = config_path.to_string_lossy();

        let config_content = r#"
database_path = "/data/results.db"
log_file_path = "/custom/log/path"

[server]
port = 9090
"#;
        tokio::fs::write(&config_path, config_content).await.unwrap();

        let config = Config::load_from_path(&config_path_str).await.unwrap();

        assert_eq!(config.database_path, "/data/results.db");
        assert_eq!(config.log_file_path, Some("/custom/log/path".to_string()));
        assert_eq!(config.server.port, 9090);
        // Unset keys fall back to defaults
        assert_eq!(config.server.host, server_defaults::DEFAULT_HOST);
        assert_eq!(config.database, DatabaseConfig::default());
    }

    #[tokio::test]
    async fn test_config_save_and_load_roundtrip() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");
        let config_path_str = config_path.to_string_lossy();

        let original = sample_config();
        original.save_to_path(&config_path_str).await.unwrap();
        assert!(config_path.exists());

        let loaded = Config::load_from_path(&config_path_str).await.unwrap();
        assert_eq!(original, loaded);
    }

    #[test]
    fn test_config_without_log_file_path_serialization() {
        let config = Config {
            log_file_path: None,
            ..sample_config()
        };

        let toml_string = toml::to_string_pretty(&config).unwrap();
        assert!(toml_string.contains("database_path = \"/data/results.db\""));
        assert!(!toml_string.contains("log_file_path"));
        assert!(toml_string.contains("[server]"));
        assert!(toml_string.contains("[database]"));
    }

    #[tokio::test]
    async fn test_config_missing_required_field() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("incomplete_config.toml");
        let config_path_str = config_path.to_string_lossy();

        tokio::fs::write(&config_path, "log_file_path = \"/some/path\"\n")
            .await
            .unwrap();

        let result = Config::load_from_path(&config_path_str).await;
        assert!(matches!(result.unwrap_err(), AppError::TomlDeserialize(_)));
    }

    #[tokio::test]
    async fn test_config_load_from_nonexistent_path() {
        let result = Config::load_from_path("/nonexistent/path/config.toml").await;
        assert!(matches!(result.unwrap_err(), AppError::Io(_)));
    }

    #[tokio::test]
    #[serial]
    async fn test_config_load_missing_file_uses_defaults() {
        clear_env();
        let temp_dir = tempdir().unwrap();
        let missing = temp_dir.path().join("absent.toml");

        let config = Config::load(Some(&missing.to_string_lossy())).await.unwrap();
        assert_eq!(config, Config::default());
        // No database configured yet
        assert!(config.validate().is_err());
    }

    #[tokio::test]
    #[serial]
    async fn test_environment_variable_override() {
        clear_env();
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        sample_config()
            .save_to_path(&config_path.to_string_lossy())
            .await
            .unwrap();

        unsafe {
            std::env::set_var(env_vars::DATABASE, "/env/results.db");
            std::env::set_var(env_vars::PORT, "8123");
            std::env::set_var(env_vars::QUERY_TIMEOUT, "3");
            std::env::set_var(env_vars::HOST, "localhost");
        }

        let config = Config::load(Some(&config_path.to_string_lossy()))
            .await
            .unwrap();
        clear_env();

        assert_eq!(config.database_path, "/env/results.db");
        assert_eq!(config.server.port, 8123);
        assert_eq!(config.server.host, "localhost");
        assert_eq!(config.database.query_timeout_seconds, 3);
        // Untouched values come from the file
        assert_eq!(config.database.pool_size, 2);
    }

    #[tokio::test]
    #[serial]
    async fn test_unparseable_port_override_is_ignored() {
        clear_env();
        unsafe {
            std::env::set_var(env_vars::PORT, "not-a-port");
        }
        let mut config = sample_config();
        config.apply_env_overrides();
        clear_env();
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_bind_address() {
        let config = Config {
            database_path: "results.db".to_string(),
            ..Config::default()
        };
        assert_eq!(config.bind_address(), "0.0.0.0:8050");
    }

    #[test]
    fn test_config_validation_valid_configs() {
        let mut relative = sample_config();
        relative.database_path = "results.db".to_string();
        relative.log_file_path = None;

        for config in [sample_config(), relative] {
            // log directory creation may be attempted for /custom, skip that case
            let config = Config {
                log_file_path: None,
                ..config
            };
            assert!(config.validate().is_ok(), "Config should be valid: {config:?}");
        }
    }

    #[test]
    fn test_config_validation_invalid_configs() {
        let base = Config {
            log_file_path: None,
            ..sample_config()
        };
        let invalid_configs = vec![
            Config {
                database_path: "  ".to_string(),
                ..base.clone()
            },
            Config {
                server: ServerConfig {
                    port: 0,
                    ..base.server.clone()
                },
                ..base.clone()
            },
            Config {
                server: ServerConfig {
                    host: String::new(),
                    ..base.server.clone()
                },
                ..base.clone()
            },
            Config {
                database: DatabaseConfig {
                    pool_size: 0,
                    ..base.database.clone()
                },
                ..base.clone()
            },
            Config {
                database: DatabaseConfig {
                    query_timeout_seconds: 0,
                    ..base.database.clone()
                },
                ..base.clone()
            },
            Config {
                log_file_path: Some(String::new()),
                ..base.clone()
            },
        ];

        for config in invalid_configs {
            assert!(config.validate().is_err(), "Config should be invalid: {config:?}");
        }
    }

    #[test]
    fn test_config_path_generation() {
        let config_path = Config::get_config_path();
        assert!(config_path.contains("soccer_results"));
        assert!(config_path.ends_with("config.toml"));

        let log_dir_path = Config::get_log_dir_path();
        assert!(log_dir_path.contains("soccer_results"));
        assert!(log_dir_path.ends_with("logs"));
    }
}
