use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    // Data source reachability
    #[error("Cannot connect to data source {target}: {message}")]
    Connectivity { target: String, message: String },

    #[error("Data source schema mismatch: {message}")]
    SchemaMismatch { message: String },

    // Row decoding
    #[error("Invalid value in column '{column}': {message}")]
    InvalidRow { column: String, message: String },

    #[error("Query '{query}' timed out after {seconds} seconds")]
    QueryTimeout { query: String, seconds: u64 },

    #[error("Background query task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Log setup error: {0}")]
    LogSetup(String),

    #[error("Server error: {0}")]
    Server(String),
}

impl AppError {
    /// Create a configuration error with context
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a log setup error with context
    pub fn log_setup_error(msg: impl Into<String>) -> Self {
        Self::LogSetup(msg.into())
    }

    /// Create a server error with context
    pub fn server_error(msg: impl Into<String>) -> Self {
        Self::Server(msg.into())
    }

    /// Create a connectivity error for the given data source
    pub fn connectivity(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Connectivity {
            target: target.into(),
            message: message.into(),
        }
    }

    /// Create a schema mismatch error
    pub fn schema_mismatch(message: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            message: message.into(),
        }
    }

    /// Create an invalid row error for a column that could not be decoded
    pub fn invalid_row(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidRow {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a query timeout error
    pub fn query_timeout(query: impl Into<String>, seconds: u64) -> Self {
        Self::QueryTimeout {
            query: query.into(),
            seconds,
        }
    }

    /// Check if error must stop the process instead of being reported to a user
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            AppError::Connectivity { .. } | AppError::SchemaMismatch { .. } | AppError::Config(_)
        )
    }

    /// Check if error is a query timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, AppError::QueryTimeout { .. })
    }

    /// Short message suitable for the page's error banner
    pub fn user_message(&self) -> String {
        match self {
            AppError::QueryTimeout { seconds, .. } => {
                format!("The data source did not answer within {seconds} seconds. Please try again.")
            }
            AppError::InvalidRow { .. } => {
                "The data source returned a match row that could not be read.".to_string()
            }
            _ => format!("Could not load data: {self}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_helper() {
        let error = AppError::config_error("Invalid configuration");
        assert!(matches!(error, AppError::Config(_)));
        assert_eq!(
            error.to_string(),
            "Configuration error: Invalid configuration"
        );
    }

    #[test]
    fn test_log_setup_error_helper() {
        let error = AppError::log_setup_error("Failed to initialize logger");
        assert!(matches!(error, AppError::LogSetup(_)));
        assert_eq!(
            error.to_string(),
            "Log setup error: Failed to initialize logger"
        );
    }

    #[test]
    fn test_connectivity_helper() {
        let error = AppError::connectivity("/data/results.db", "unable to open database file");
        assert!(matches!(error, AppError::Connectivity { .. }));
        assert_eq!(
            error.to_string(),
            "Cannot connect to data source /data/results.db: unable to open database file"
        );
    }

    #[test]
    fn test_invalid_row_helper() {
        let error = AppError::invalid_row("outcome", "unknown outcome 'X'");
        assert_eq!(
            error.to_string(),
            "Invalid value in column 'outcome': unknown outcome 'X'"
        );
    }

    #[test]
    fn test_query_timeout_helper() {
        let error = AppError::query_timeout("list_matches", 10);
        assert!(error.is_timeout());
        assert!(!error.is_fatal());
        assert_eq!(
            error.to_string(),
            "Query 'list_matches' timed out after 10 seconds"
        );
        assert!(error.user_message().contains("10 seconds"));
    }

    #[test]
    fn test_fatal_classification() {
        assert!(AppError::connectivity("db", "down").is_fatal());
        assert!(AppError::schema_mismatch("missing table").is_fatal());
        assert!(AppError::config_error("bad").is_fatal());
        assert!(!AppError::invalid_row("date", "bad").is_fatal());
        assert!(!AppError::server_error("bind").is_timeout());
    }

    #[test]
    fn test_from_rusqlite_error() {
        let error: AppError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(error, AppError::Database(_)));
        assert!(error.to_string().starts_with("Database error:"));
    }

    #[test]
    fn test_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error: AppError = io_error.into();
        assert!(matches!(error, AppError::Io(_)));
    }
}
