//! Fixed-size pool of read-only SQLite connections.
//!
//! A checkout holds a semaphore permit for its whole lifetime, so at most
//! `size` queries touch the store at once. Connections are opened lazily on the
//! blocking thread that first needs them and go back to the idle list on drop.

use crate::error::AppError;
use rusqlite::{Connection, OpenFlags};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

struct PoolInner {
    path: String,
    busy_timeout: Duration,
    idle: Mutex<Vec<Connection>>,
    permits: Arc<Semaphore>,
}

/// Shared handle to the connection pool.
#[derive(Clone)]
pub struct ConnectionPool {
    inner: Arc<PoolInner>,
}

/// A checked-out slot. Holds a connection once [`PooledConnection::connection`]
/// has been called.
pub struct PooledConnection {
    conn: Option<Connection>,
    pool: Arc<PoolInner>,
    _permit: OwnedSemaphorePermit,
}

impl ConnectionPool {
    pub fn new(path: impl Into<String>, size: usize, busy_timeout: Duration) -> Self {
        let size = size.max(1);
        Self {
            inner: Arc::new(PoolInner {
                path: path.into(),
                busy_timeout,
                idle: Mutex::new(Vec::with_capacity(size)),
                permits: Arc::new(Semaphore::new(size)),
            }),
        }
    }

    /// Path of the database file the pool connects to
    pub fn path(&self) -> &str {
        &self.inner.path
    }

    /// Number of checkouts that can be granted right now
    pub fn available(&self) -> usize {
        self.inner.permits.available_permits()
    }

    /// Number of opened connections waiting for reuse
    pub fn idle_count(&self) -> usize {
        self.inner.idle.lock().map(|idle| idle.len()).unwrap_or(0)
    }

    /// Waits for a free slot and reserves it.
    pub async fn checkout(&self) -> Result<PooledConnection, AppError> {
        let permit = self
            .inner
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| AppError::server_error("connection pool is closed"))?;

        let conn = self
            .inner
            .idle
            .lock()
            .map_err(|_| AppError::server_error("connection pool lock poisoned"))?
            .pop();

        Ok(PooledConnection {
            conn,
            pool: Arc::clone(&self.inner),
            _permit: permit,
        })
    }
}

impl PooledConnection {
    /// Returns the slot's connection, opening it on first use. Performs
    /// blocking I/O, call it from a blocking context.
    pub fn connection(&mut self) -> Result<&Connection, AppError> {
        if self.conn.is_none() {
            self.conn = Some(open_read_only(&self.pool.path, self.pool.busy_timeout)?);
        }
        self.conn
            .as_ref()
            .ok_or_else(|| AppError::server_error("pooled connection unavailable"))
    }
}

impl Drop for PooledConnection {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take()
            && let Ok(mut idle) = self.pool.idle.lock()
        {
            idle.push(conn);
        }
    }
}

fn open_read_only(path: &str, busy_timeout: Duration) -> Result<Connection, AppError> {
    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
        | OpenFlags::SQLITE_OPEN_URI
        | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let conn = Connection::open_with_flags(path, flags)?;
    conn.busy_timeout(busy_timeout)?;
    tracing::debug!("Opened read-only connection to {path}");
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing_utils::{TestDataBuilder, create_results_db};
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_checkout_limits_concurrency_and_reuses_connections() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("results.db");
        create_results_db(&db_path, &TestDataBuilder::league_rows()).unwrap();

        let pool = ConnectionPool::new(db_path.to_string_lossy(), 2, Duration::from_millis(100));
        assert_eq!(pool.available(), 2);

        let mut first = pool.checkout().await.unwrap();
        first.connection().unwrap();
        let second = pool.checkout().await.unwrap();
        assert_eq!(pool.available(), 0);

        drop(second);
        assert_eq!(pool.available(), 1);
        // Unopened slots do not return a connection
        assert_eq!(pool.idle_count(), 0);

        drop(first);
        assert_eq!(pool.available(), 2);
        assert_eq!(pool.idle_count(), 1);

        // The next checkout picks up the idle connection
        let third = pool.checkout().await.unwrap();
        assert_eq!(pool.idle_count(), 0);
        drop(third);
    }

    #[tokio::test]
    async fn test_connection_to_missing_file_fails() {
        let temp_dir = tempdir().unwrap();
        let missing = temp_dir.path().join("missing.db");
        let pool = ConnectionPool::new(missing.to_string_lossy(), 1, Duration::from_millis(100));

        let mut slot = pool.checkout().await.unwrap();
        assert!(matches!(slot.connection(), Err(AppError::Database(_))));
    }

    #[tokio::test]
    async fn test_connections_are_read_only() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("results.db");
        create_results_db(&db_path, &[]).unwrap();

        let pool = ConnectionPool::new(db_path.to_string_lossy(), 1, Duration::from_millis(100));
        let mut slot = pool.checkout().await.unwrap();
        let conn = slot.connection().unwrap();
        assert!(conn.execute("DELETE FROM results", []).is_err());
    }

    #[test]
    fn test_zero_size_is_clamped() {
        let pool = ConnectionPool::new("unused.db", 0, Duration::from_millis(100));
        assert_eq!(pool.available(), 1);
        assert_eq!(pool.path(), "unused.db");
    }
}
