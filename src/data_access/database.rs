use super::pool::ConnectionPool;
use super::query::{Answer, Query};
use super::store::{ResultsStore, SqliteResultsStore};
use crate::config::DatabaseConfig;
use crate::error::AppError;
use rusqlite::InterruptHandle;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Async handle to the results store.
///
/// Cloning is cheap; all clones share one connection pool. Every query runs on
/// the blocking thread pool under the configured timeout.
#[derive(Clone)]
pub struct Database {
    pool: ConnectionPool,
    query_timeout: Duration,
}

impl Database {
    /// Builds a handle without touching the store.
    pub fn new(path: impl Into<String>, config: &DatabaseConfig) -> Self {
        Self {
            pool: ConnectionPool::new(
                path,
                config.pool_size,
                Duration::from_millis(config.busy_timeout_ms),
            ),
            query_timeout: Duration::from_secs(config.query_timeout_seconds),
        }
    }

    /// Builds a handle and proves the store is usable: the schema is checked and
    /// the division list is fetched once.
    ///
    /// # Errors
    /// * `AppError::Connectivity` - the store cannot be opened or queried
    /// * `AppError::SchemaMismatch` - the `results` table or one of its columns is missing
    pub async fn connect(path: impl Into<String>, config: &DatabaseConfig) -> Result<Self, AppError> {
        let database = Self::new(path, config);
        let target = database.pool.path().to_string();
        let started = Instant::now();

        let probe = database
            .with_store("connect", |store| {
                store.verify()?;
                store.list_divisions()
            })
            .await;

        match probe {
            Ok(divisions) => {
                info!(
                    target_db = %target,
                    divisions = divisions.len(),
                    duration_ms = started.elapsed().as_millis() as u64,
                    "Connected to results store"
                );
                Ok(database)
            }
            Err(err @ AppError::SchemaMismatch { .. }) => Err(err),
            Err(err) => Err(AppError::connectivity(target, err.to_string())),
        }
    }

    /// Distinct divisions, ascending.
    pub async fn list_divisions(&self) -> Result<Vec<String>, AppError> {
        self.with_store("list_divisions", |store| store.list_divisions())
            .await
    }

    /// Runs a selection-driven lookup.
    pub async fn run(&self, query: Query) -> Result<Answer, AppError> {
        let name = query.name();
        self.with_store(name, move |store| query.execute(store)).await
    }

    async fn with_store<T, F>(&self, name: &'static str, work: F) -> Result<T, AppError>
    where
        T: Send + 'static,
        F: FnOnce(&SqliteResultsStore<'_>) -> Result<T, AppError> + Send + 'static,
    {
        let mut slot = self.pool.checkout().await?;
        let running = RunningStatement::default();
        let started = Instant::now();

        let task_running = running.clone();
        let task = tokio::task::spawn_blocking(move || {
            let conn = slot.connection()?;
            task_running.arm(conn.get_interrupt_handle());
            let result = work(&SqliteResultsStore::new(conn));
            // Disarmed before the slot returns the connection to the pool
            task_running.disarm();
            result
        });

        match tokio::time::timeout(self.query_timeout, task).await {
            Ok(joined) => {
                let result = joined?;
                debug!(
                    query = name,
                    ok = result.is_ok(),
                    duration_ms = started.elapsed().as_millis() as u64,
                    "Query finished"
                );
                result
            }
            Err(_) => {
                // The statement keeps running on its blocking thread until interrupted
                let interrupted = running.interrupt();
                warn!(
                    query = name,
                    interrupted,
                    timeout_secs = self.query_timeout.as_secs(),
                    "Query timed out"
                );
                Err(AppError::query_timeout(name, self.query_timeout.as_secs()))
            }
        }
    }
}

/// Interrupt handle of the connection a query is using, present only while
/// that query still owns the connection.
#[derive(Clone, Default)]
struct RunningStatement {
    handle: Arc<Mutex<Option<InterruptHandle>>>,
}

impl RunningStatement {
    fn arm(&self, handle: InterruptHandle) {
        if let Ok(mut slot) = self.handle.lock() {
            *slot = Some(handle);
        }
    }

    fn disarm(&self) {
        if let Ok(mut slot) = self.handle.lock() {
            *slot = None;
        }
    }

    /// Interrupts the query if it still owns its connection.
    fn interrupt(&self) -> bool {
        match self.handle.lock() {
            Ok(slot) => match slot.as_ref() {
                Some(handle) => {
                    handle.interrupt();
                    true
                }
                None => false,
            },
            Err(_) => false,
        }
    }
}
