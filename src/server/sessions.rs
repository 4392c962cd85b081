//! Per-browser sessions kept in a bounded LRU.

use crate::selection::Session;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// A session shared between requests of the same browser. Holding the lock
/// for a whole interaction keeps that browser's events sequential.
pub type SharedSession = Arc<Mutex<Session>>;

/// Session table. When full, the least recently used session is evicted.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<LruCache<String, SharedSession>>>,
}

impl SessionStore {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            sessions: Arc::new(Mutex::new(LruCache::new(capacity))),
        }
    }

    /// Looks up a session and marks it as recently used.
    pub async fn get(&self, id: &str) -> Option<SharedSession> {
        self.sessions.lock().await.get(id).cloned()
    }

    /// Stores `session` under a fresh id and returns both.
    pub async fn insert(&self, session: Session) -> (String, SharedSession) {
        let id = new_session_id();
        let shared = Arc::new(Mutex::new(session));
        let mut sessions = self.sessions.lock().await;
        if let Some((evicted, _)) = sessions.push(id.clone(), shared.clone())
            && evicted != id
        {
            debug!(session = %evicted, "Evicted least recently used session");
        }
        (id, shared)
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Random 128-bit token as 32 hex digits.
fn new_session_id() -> String {
    format!("{:032x}", rand::random::<u128>())
}
