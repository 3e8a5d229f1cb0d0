use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{Movie, MovieId};

/// A saved movie with the summary fields the server denormalizes into the list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchlistEntry {
    pub id: MovieId,
    pub title: String,
    pub thumbnail_url: Option<String>,
}

impl From<Movie> for WatchlistEntry {
    fn from(movie: Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            thumbnail_url: movie.thumbnail_url,
        }
    }
}

/// One complete server copy of the user's watchlist.
///
/// Keeps the server's order for display; membership goes through the id index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WatchlistSnapshot {
    entries: Vec<WatchlistEntry>,
    ids: HashSet<MovieId>,
}

impl WatchlistSnapshot {
    /// Builds a snapshot, keeping the first occurrence of any repeated id
    pub fn from_movies(movies: Vec<Movie>) -> Self {
        let mut snapshot = Self::default();
        for movie in movies {
            if snapshot.ids.insert(movie.id) {
                snapshot.entries.push(movie.into());
            }
        }
        snapshot
    }

    pub fn contains(&self, id: MovieId) -> bool {
        self.ids.contains(&id)
    }

    pub fn entries(&self) -> &[WatchlistEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Lifecycle of the watchlist store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WatchlistPhase {
    /// Not signed in, or nothing loaded yet
    Empty,
    /// A refresh is in flight
    Loading,
    /// Holding the last successful snapshot
    Ready,
}

/// Caller-visible result of a user action
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActionOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ActionOutcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: i64, title: &str) -> Movie {
        serde_json::from_value(serde_json::json!({ "id": id, "title": title })).unwrap()
    }

    #[test]
    fn test_snapshot_drops_duplicate_ids() {
        let snapshot = WatchlistSnapshot::from_movies(vec![
            movie(42, "Inception"),
            movie(7, "Heat"),
            movie(42, "Inception (again)"),
        ]);
        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.contains(MovieId(42)));
        assert!(snapshot.contains(MovieId(7)));
        assert_eq!(snapshot.entries()[0].title, "Inception");
        assert_eq!(snapshot.entries()[1].id, MovieId(7));
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = WatchlistSnapshot::from_movies(Vec::new());
        assert!(snapshot.is_empty());
        assert!(!snapshot.contains(MovieId(1)));
    }

    #[test]
    fn test_outcome_failure_shape() {
        let outcome = ActionOutcome::failed("Please login to add movies to watchlist");
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            serde_json::json!({
                "success": false,
                "error": "Please login to add movies to watchlist"
            })
        );
    }

    #[test]
    fn test_outcome_success_shape() {
        let outcome = ActionOutcome::ok("Added to watchlist");
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            serde_json::json!({ "success": true, "message": "Added to watchlist" })
        );
    }
}
