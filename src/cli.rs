use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// True when the invocation only edits or prints the configuration
pub fn is_config_operation(args: &Args) -> bool {
    args.list_config
        || args.new_database_path.is_some()
        || args.new_log_file_path.is_some()
        || args.clear_log_file_path
}

/// Soccer Results Viewer
///
/// Serves a dashboard for browsing soccer match results by division, season
/// and team. Pick the three values from the cascading selectors and press
/// Submit to see the team's matches, its season record and a chart of its
/// accumulated points.
#[derive(Parser, Debug)]
#[command(about, long_about = None)]
#[command(styles = get_styles())]
pub struct Args {
    /// Read configuration from this file instead of the default location.
    #[arg(long = "config", value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Interface to bind. Overrides the configured host.
    #[arg(long = "host", help_heading = "Server")]
    pub host: Option<String>,

    /// Port to listen on. Overrides the configured port.
    #[arg(long = "port", help_heading = "Server")]
    pub port: Option<u16>,

    /// SQLite database holding the `results` table. Overrides the configured path.
    #[arg(long = "database", value_name = "PATH", help_heading = "Server")]
    pub database: Option<String>,

    /// Store the database path in the config file and exit.
    #[arg(long = "set-database", value_name = "PATH", help_heading = "Configuration")]
    pub new_database_path: Option<String>,

    /// Store a custom log file path in the config file and exit.
    #[arg(long = "set-log-file", value_name = "PATH", help_heading = "Configuration")]
    pub new_log_file_path: Option<String>,

    /// Remove the custom log file path from the config file and exit.
    #[arg(long = "clear-log-file", help_heading = "Configuration")]
    pub clear_log_file_path: bool,

    /// List current configuration settings
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Log at debug level, including every selection event and query.
    #[arg(long = "debug", help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", help_heading = "Debug")]
    pub log_file: Option<String>,
}
