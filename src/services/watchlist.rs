use std::sync::{Arc, Weak};

use tokio::{
    sync::{Mutex, RwLock},
    task::JoinHandle,
};

use crate::{
    error::AppError,
    models::{Credential, MovieId, WatchlistEntry, WatchlistPhase, WatchlistSnapshot},
    services::{backend::MovieBackend, session::SessionStore},
};

const ADDED: &str = "Added to watchlist";
const REMOVED: &str = "Removed from watchlist";

/// Which mutation a failure belongs to; selects the prompt shown to signed-out users
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchlistAction {
    Add,
    Remove,
}

impl WatchlistAction {
    fn login_prompt(self) -> &'static str {
        match self {
            WatchlistAction::Add => "Please login to add movies to watchlist",
            WatchlistAction::Remove => "Please login to manage watchlist",
        }
    }
}

/// Why a watchlist mutation did not happen.
///
/// `Display` is the message shown to the user.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum WatchlistError {
    #[error("{}", .0.login_prompt())]
    NotAuthenticated(WatchlistAction),

    /// The server answered with a non-success status; carries its message or a fallback
    #[error("{0}")]
    Rejected(String),

    /// No usable answer; the cause is kept for logs only
    #[error("Network error. Please try again.")]
    Transport(String),
}

impl From<AppError> for WatchlistError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Rejected { message, .. } => WatchlistError::Rejected(message),
            other => WatchlistError::Transport(other.to_string()),
        }
    }
}

#[derive(Debug, Default)]
struct WatchlistInner {
    snapshot: Option<WatchlistSnapshot>,
    /// Credential the snapshot was fetched with
    owner: Option<Credential>,
    in_flight: usize,
    /// Ticket handed to the most recently started refresh
    issued: u64,
    /// Ticket of the refresh whose snapshot is currently held
    applied: u64,
}

impl WatchlistInner {
    fn begin(&mut self) -> u64 {
        self.in_flight += 1;
        self.issued += 1;
        self.issued
    }

    fn finish(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    /// Replaces the snapshot unless a later refresh already landed
    fn apply(&mut self, ticket: u64, owner: Credential, snapshot: WatchlistSnapshot) -> bool {
        if ticket <= self.applied {
            return false;
        }
        self.applied = ticket;
        self.owner = Some(owner);
        self.snapshot = Some(snapshot);
        true
    }

    /// The snapshot, if it belongs to `current`
    fn visible(&self, current: Option<&Credential>) -> Option<&WatchlistSnapshot> {
        match (current, self.owner.as_ref()) {
            (Some(current), Some(owner)) if current == owner => self.snapshot.as_ref(),
            _ => None,
        }
    }

    fn clear(&mut self) {
        self.snapshot = None;
        self.owner = None;
        // Responses started before the clear must not resurrect it
        self.applied = self.issued;
    }
}

/// Client-side view of the signed-in user's saved movies.
///
/// The server is the source of truth: every successful mutation is followed
/// by a full refetch, nothing is patched locally. Mutations run one at a time.
/// Reads only ever expose a snapshot fetched with the current credential, so
/// the list reads as empty whenever the session is not authenticated.
pub struct WatchlistStore {
    backend: Arc<dyn MovieBackend>,
    session: Arc<SessionStore>,
    inner: RwLock<WatchlistInner>,
    mutations: Mutex<()>,
}

impl WatchlistStore {
    pub fn new(backend: Arc<dyn MovieBackend>, session: Arc<SessionStore>) -> Self {
        Self {
            backend,
            session,
            inner: RwLock::new(WatchlistInner::default()),
            mutations: Mutex::new(()),
        }
    }

    /// Refetches the whole list for the current credential.
    ///
    /// Without a credential this does nothing. Failures are logged and leave
    /// the previous snapshot in place.
    pub async fn refresh(&self) {
        let Some(credential) = self.session.credential().await else {
            tracing::debug!("Skipping watchlist refresh without a session");
            return;
        };

        let ticket = self.inner.write().await.begin();
        let result = self.backend.fetch_watchlist(&credential).await;

        // Checked before taking the store lock; the session never waits on it
        let same_session = self.session.credential().await.as_ref() == Some(&credential);

        let mut inner = self.inner.write().await;
        inner.finish();

        match result {
            Ok(movies) if same_session => {
                let snapshot = WatchlistSnapshot::from_movies(movies);
                let count = snapshot.len();
                if inner.apply(ticket, credential, snapshot) {
                    tracing::debug!(ticket, count, "Watchlist refreshed");
                } else {
                    tracing::debug!(ticket, "Dropping superseded watchlist response");
                }
            }
            Ok(_) => {
                tracing::debug!(ticket, "Dropping watchlist response for an ended session");
            }
            Err(e) => {
                tracing::warn!(error = %e, ticket, "Failed to refresh watchlist");
            }
        }
    }

    /// Saves a movie, then resynchronizes with the server
    pub async fn add(&self, id: MovieId) -> Result<&'static str, WatchlistError> {
        let _guard = self.mutations.lock().await;
        self.add_locked(id).await
    }

    /// Unsaves a movie, then resynchronizes with the server
    pub async fn remove(&self, id: MovieId) -> Result<&'static str, WatchlistError> {
        let _guard = self.mutations.lock().await;
        self.remove_locked(id).await
    }

    /// Removes the movie when saved, adds it otherwise
    pub async fn toggle(&self, id: MovieId) -> Result<&'static str, WatchlistError> {
        let _guard = self.mutations.lock().await;
        if self.contains(id).await {
            self.remove_locked(id).await
        } else {
            self.add_locked(id).await
        }
    }

    pub async fn contains(&self, id: MovieId) -> bool {
        let current = self.session.credential().await;
        self.inner
            .read()
            .await
            .visible(current.as_ref())
            .is_some_and(|s| s.contains(id))
    }

    pub async fn entries(&self) -> Vec<WatchlistEntry> {
        let current = self.session.credential().await;
        self.inner
            .read()
            .await
            .visible(current.as_ref())
            .map(|s| s.entries().to_vec())
            .unwrap_or_default()
    }

    pub async fn len(&self) -> usize {
        let current = self.session.credential().await;
        self.inner
            .read()
            .await
            .visible(current.as_ref())
            .map_or(0, WatchlistSnapshot::len)
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn phase(&self) -> WatchlistPhase {
        let Some(current) = self.session.credential().await else {
            return WatchlistPhase::Empty;
        };
        let inner = self.inner.read().await;
        if inner.in_flight > 0 {
            WatchlistPhase::Loading
        } else if inner.visible(Some(&current)).is_some() {
            WatchlistPhase::Ready
        } else {
            WatchlistPhase::Empty
        }
    }

    /// Drops the held snapshot
    pub async fn clear(&self) {
        self.inner.write().await.clear();
        tracing::debug!("Watchlist cleared");
    }

    /// Follows the session: refresh on login, clear on logout.
    ///
    /// The task ends once the store or the session store is dropped.
    /// Must be called from within a Tokio runtime.
    pub fn spawn_session_sync(self: &Arc<Self>) -> JoinHandle<()> {
        let mut changes = self.session.subscribe();
        let store: Weak<Self> = Arc::downgrade(self);

        tokio::spawn(async move {
            while changes.changed().await.is_ok() {
                let authenticated = *changes.borrow_and_update();
                let Some(store) = store.upgrade() else {
                    break;
                };
                if authenticated {
                    store.refresh().await;
                } else {
                    store.clear().await;
                }
            }
            tracing::debug!("Watchlist session sync stopped");
        })
    }

    // The credential is read only once `mutations` is held, so a queued
    // change never outlives the session it was issued for.
    async fn add_locked(&self, id: MovieId) -> Result<&'static str, WatchlistError> {
        let credential = self.require_credential(WatchlistAction::Add).await?;

        self.backend
            .add_to_watchlist(&credential, id)
            .await
            .map_err(|e| Self::mutation_failed(WatchlistAction::Add, id, e))?;

        tracing::info!(movie_id = %id, "Movie added to watchlist");
        self.refresh().await;
        Ok(ADDED)
    }

    async fn remove_locked(&self, id: MovieId) -> Result<&'static str, WatchlistError> {
        let credential = self.require_credential(WatchlistAction::Remove).await?;

        self.backend
            .remove_from_watchlist(&credential, id)
            .await
            .map_err(|e| Self::mutation_failed(WatchlistAction::Remove, id, e))?;

        tracing::info!(movie_id = %id, "Movie removed from watchlist");
        self.refresh().await;
        Ok(REMOVED)
    }

    async fn require_credential(
        &self,
        action: WatchlistAction,
    ) -> Result<Credential, WatchlistError> {
        self.session
            .credential()
            .await
            .ok_or(WatchlistError::NotAuthenticated(action))
    }

    fn mutation_failed(action: WatchlistAction, id: MovieId, err: AppError) -> WatchlistError {
        let err = WatchlistError::from(err);
        match &err {
            WatchlistError::Transport(cause) => {
                tracing::error!(movie_id = %id, ?action, cause = %cause, "Watchlist request failed")
            }
            _ => tracing::warn!(movie_id = %id, ?action, error = %err, "Watchlist change rejected"),
        }
        err
    }
}
