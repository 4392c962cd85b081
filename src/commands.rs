use crate::cli::Args;
use soccer_results::config::Config;
use soccer_results::data_access::Database;
use soccer_results::error::AppError;
use soccer_results::server;
use std::path::Path;
use tracing::{error, info};

/// Validates command line argument combinations.
///
/// Returns an error if incompatible arguments are used together.
pub fn validate_args(args: &Args) -> Result<(), AppError> {
    if args.new_log_file_path.is_some() && args.clear_log_file_path {
        return Err(AppError::config_error(
            "Cannot use both --set-log-file and --clear-log-file",
        ));
    }
    Ok(())
}

/// Handles the --list-config command.
pub async fn handle_list_config_command(args: &Args) -> Result<(), AppError> {
    Config::display(args.config.as_deref()).await
}

/// Handles configuration update commands (--set-database, --set-log-file, --clear-log-file).
///
/// Only the file contents are rewritten; environment overrides are not persisted.
pub async fn handle_config_update_command(args: &Args) -> Result<(), AppError> {
    let config_path = args.config.clone().unwrap_or_else(Config::get_config_path);
    let mut config = if Path::new(&config_path).exists() {
        Config::load_from_path(&config_path).await?
    } else {
        Config::default()
    };

    if let Some(new_database) = &args.new_database_path {
        config.database_path = new_database.clone();
    }

    if let Some(new_log_path) = &args.new_log_file_path {
        config.log_file_path = Some(new_log_path.clone());
    } else if args.clear_log_file_path {
        config.log_file_path = None;
        println!("Custom log file path cleared. Using default location.");
    }

    config.save_to_path(&config_path).await?;
    println!("Config updated successfully!");

    Ok(())
}

/// Applies --host, --port, --database and --log-file on top of the loaded config.
pub fn apply_cli_overrides(config: &mut Config, args: &Args) {
    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(database) = &args.database {
        config.database_path = database.clone();
    }
    if let Some(log_file) = &args.log_file {
        config.log_file_path = Some(log_file.clone());
    }
}

/// Connects to the results store and serves the dashboard until shutdown.
///
/// A store that cannot be reached or lacks the expected schema stops startup.
pub async fn handle_serve_command(config: &Config) -> Result<(), AppError> {
    let database = match Database::connect(&config.database_path, &config.database).await {
        Ok(database) => database,
        Err(e) => {
            error!("Cannot start without the results store: {e}");
            return Err(e);
        }
    };
    info!(
        database = %config.database_path,
        pool_size = config.database.pool_size,
        "Results store ready"
    );

    server::serve(config, database).await
}
