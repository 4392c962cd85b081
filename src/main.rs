// src/main.rs
mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Args, is_config_operation};
use commands::{
    apply_cli_overrides, handle_config_update_command, handle_list_config_command,
    handle_serve_command, validate_args,
};
use soccer_results::config::Config;
use soccer_results::error::AppError;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();
    validate_args(&args)?;

    if args.list_config {
        return handle_list_config_command(&args).await;
    }

    if is_config_operation(&args) {
        return handle_config_update_command(&args).await;
    }

    let mut config = Config::load(args.config.as_deref()).await?;
    apply_cli_overrides(&mut config, &args);

    // The guard must be kept alive for the duration of the program
    let (log_file_path, _guard) = logging::setup_logging(&args, &config).await?;
    info!(
        version = soccer_results::VERSION,
        log_file = %log_file_path,
        "Starting soccer results viewer"
    );

    config.validate()?;
    handle_serve_command(&config).await
}
