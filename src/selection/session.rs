use super::machine::{Selection, SelectionEvent, Step, Suppression};
use crate::data_access::Database;
use tracing::{debug, warn};

/// What happened to a dispatched event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatched {
    /// The state moved (and any lookup it needed was stored)
    Applied,
    /// The event was ignored
    Suppressed(Suppression),
    /// The lookup finished after the selection had moved on
    Stale,
    /// The lookup failed; the previous state was restored
    Failed,
}

/// One viewer's selection plus the error banner shown on their page.
#[derive(Debug, Clone, Default)]
pub struct Session {
    selection: Selection,
    last_error: Option<String>,
}

impl Session {
    pub fn new(divisions: Vec<String>) -> Self {
        Self {
            selection: Selection::new(divisions),
            last_error: None,
        }
    }

    /// Opens a session with the current division list.
    ///
    /// A failing lookup still yields a usable session: it starts with no
    /// division options and the failure in its error banner.
    pub async fn open(database: &Database) -> Self {
        match database.list_divisions().await {
            Ok(divisions) => Self::new(divisions),
            Err(e) => {
                warn!("Failed to list divisions for new session: {e}");
                Self {
                    selection: Selection::default(),
                    last_error: Some(e.user_message()),
                }
            }
        }
    }

    /// True when the division list could not be read when the session opened
    pub fn needs_divisions(&self) -> bool {
        self.selection.divisions().is_empty() && self.last_error.is_some()
    }

    /// Retries the division lookup of a session that opened without one.
    ///
    /// Returns `true` when the options were filled in. Sessions that already
    /// have divisions, or whose store simply has none, are left alone.
    pub async fn refresh_divisions(&mut self, database: &Database) -> bool {
        if !self.needs_divisions() {
            return false;
        }
        match database.list_divisions().await {
            Ok(divisions) => {
                debug!(divisions = divisions.len(), "Recovered division list");
                self.selection = Selection::new(divisions);
                self.last_error = None;
                true
            }
            Err(e) => {
                warn!("Division lookup still failing: {e}");
                self.last_error = Some(e.user_message());
                false
            }
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Feeds `event` to the selection and runs the lookup it asks for.
    ///
    /// Lookup failures never escape: the selection is rolled back to where it
    /// was before the event and the message is kept for the banner.
    pub async fn dispatch(&mut self, event: SelectionEvent, database: &Database) -> Dispatched {
        let snapshot = self.selection.clone();
        debug!(?event, "Dispatching selection event");

        match self.selection.handle(event) {
            Step::Suppressed(reason) => {
                debug!(?reason, "Selection event suppressed");
                Dispatched::Suppressed(reason)
            }
            Step::Settled => {
                self.last_error = None;
                Dispatched::Applied
            }
            Step::Fetch(query) => match database.run(query.clone()).await {
                Ok(answer) => {
                    self.last_error = None;
                    if self.selection.apply(&query, answer) {
                        Dispatched::Applied
                    } else {
                        debug!(query = query.name(), "Discarded stale answer");
                        Dispatched::Stale
                    }
                }
                Err(e) => {
                    warn!(query = query.name(), "Lookup failed: {e}");
                    self.selection = snapshot;
                    self.last_error = Some(e.user_message());
                    Dispatched::Failed
                }
            },
        }
    }
}
