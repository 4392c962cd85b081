pub mod database;
pub mod models;
pub mod pool;
pub mod query;
pub mod store;

pub use database::Database;
pub use models::{MatchResult, Outcome};
pub use pool::{ConnectionPool, PooledConnection};
pub use query::{Answer, Query};
pub use store::{ResultsStore, SqliteResultsStore, verify_schema};
