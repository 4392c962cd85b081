//! Application-wide constants and configuration values
//!
//! This module centralizes the defaults and limits used across the
//! data access, session and rendering layers.

/// Application directory name used under the platform config directory
pub const APP_DIR_NAME: &str = "soccer_results";

/// Default log file name
pub const LOG_FILE_NAME: &str = "soccer_results.log";

/// Name of the relational table holding match rows
pub const RESULTS_TABLE: &str = "results";

/// Columns the `results` table must provide
pub const RESULTS_COLUMNS: [&str; 9] = [
    "division",
    "season",
    "team",
    "opponent",
    "date",
    "goals_for",
    "goals_against",
    "outcome",
    "points",
];

/// HTTP server defaults
pub mod server {
    /// Bind on all interfaces by default
    pub const DEFAULT_HOST: &str = "0.0.0.0";

    /// Default listening port
    pub const DEFAULT_PORT: u16 = 8050;

    /// Upper bound on concurrently tracked browser sessions
    pub const DEFAULT_MAX_SESSIONS: usize = 256;

    /// Cookie carrying the session token
    pub const SESSION_COOKIE: &str = "soccer_session";
}

/// Database access defaults
pub mod database {
    /// Number of pooled read-only connections
    pub const DEFAULT_POOL_SIZE: usize = 4;

    /// Time allowed for a single query before it is interrupted (seconds)
    pub const DEFAULT_QUERY_TIMEOUT_SECONDS: u64 = 10;

    /// SQLite busy handler timeout (milliseconds)
    pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 2000;
}

/// Rendering limits and chart geometry
pub mod presentation {
    /// Maximum number of match rows shown in the results table
    pub const MAX_RESULT_ROWS: usize = 50;

    /// Page heading
    pub const PAGE_TITLE: &str = "Soccer Results Viewer";

    /// Title of the cumulative points chart
    pub const CHART_TITLE: &str = "Points Accumulation";

    /// Chart canvas width in pixels
    pub const CHART_WIDTH: u32 = 640;

    /// Chart canvas height in pixels
    pub const CHART_HEIGHT: u32 = 360;

    /// Padding between the canvas edge and the plot area in pixels
    pub const CHART_PADDING: u32 = 48;

    /// Radius of the point markers in pixels
    pub const MARKER_RADIUS: u32 = 4;
}

/// Environment variable names
pub mod env_vars {
    /// Environment variable for database path override
    pub const DATABASE: &str = "SOCCER_DATABASE";

    /// Environment variable for bind host override
    pub const HOST: &str = "SOCCER_HOST";

    /// Environment variable for bind port override
    pub const PORT: &str = "SOCCER_PORT";

    /// Environment variable for log file path override
    pub const LOG_FILE: &str = "SOCCER_LOG_FILE";

    /// Environment variable for query timeout override in seconds
    pub const QUERY_TIMEOUT: &str = "SOCCER_QUERY_TIMEOUT";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_results_columns_are_unique() {
        let mut columns = RESULTS_COLUMNS.to_vec();
        columns.sort_unstable();
        columns.dedup();
        assert_eq!(columns.len(), RESULTS_COLUMNS.len());
    }

    #[test]
    fn test_chart_geometry_leaves_room_for_plot() {
        // The plot area must be positive in both dimensions
        assert!(presentation::CHART_WIDTH > presentation::CHART_PADDING * 2);
        assert!(presentation::CHART_HEIGHT > presentation::CHART_PADDING * 2);
    }

    #[test]
    fn test_database_defaults_are_reasonable() {
        assert!(database::DEFAULT_POOL_SIZE > 0);
        assert!(database::DEFAULT_QUERY_TIMEOUT_SECONDS > 0);
        assert!(database::DEFAULT_BUSY_TIMEOUT_MS / 1000 < database::DEFAULT_QUERY_TIMEOUT_SECONDS);
    }
}
