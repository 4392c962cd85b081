use super::{DatabaseConfig, ServerConfig};
use crate::error::AppError;
use std::path::Path;

/// Validates the configuration settings
///
/// # Arguments
/// * `database_path` - Path of the results database
/// * `log_file_path` - Optional log file path to validate
/// * `server` - HTTP listener settings
/// * `database` - Pool and timeout settings
///
/// # Validation Rules
/// - Database path cannot be empty
/// - Host cannot be empty and port cannot be 0
/// - Session limit, pool size and query timeout must be positive
/// - If log file path is provided, it cannot be empty
/// - Log file path parent directory must exist or be creatable
pub fn validate_config(
    database_path: &str,
    log_file_path: &Option<String>,
    server: &ServerConfig,
    database: &DatabaseConfig,
) -> Result<(), AppError> {
    if database_path.trim().is_empty() {
        return Err(AppError::config_error(
            "Database path is not configured (use --database or --set-database)",
        ));
    }

    if server.host.trim().is_empty() {
        return Err(AppError::config_error("Server host cannot be empty"));
    }

    if server.port == 0 {
        return Err(AppError::config_error("Server port must be between 1 and 65535"));
    }

    if server.max_sessions == 0 {
        return Err(AppError::config_error("max_sessions must be at least 1"));
    }

    if database.pool_size == 0 {
        return Err(AppError::config_error("pool_size must be at least 1"));
    }

    if database.query_timeout_seconds == 0 {
        return Err(AppError::config_error(
            "query_timeout_seconds must be at least 1",
        ));
    }

    if let Some(log_path) = log_file_path {
        if log_path.is_empty() {
            return Err(AppError::config_error("Log file path cannot be empty"));
        }

        // Check if parent directory exists or can be created
        if let Some(parent) = Path::new(log_path).parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::config_error(format!(
                    "Cannot create log directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}
