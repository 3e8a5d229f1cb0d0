use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub mod user;
pub mod watchlist;

pub use user::{
    Credential, LoginResponse, PasswordChange, ProfileUpdate, Role, Session, User, MIN_PASSWORD_LEN,
};
pub use watchlist::{ActionOutcome, WatchlistEntry, WatchlistPhase, WatchlistSnapshot};

/// Server-assigned identifier of a movie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub i64);

impl Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for MovieId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A movie as served by the catalog API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub youtube_trailer_url: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub interpreter_name: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_popular: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Movie {
    pub fn has_trailer(&self) -> bool {
        self.youtube_trailer_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }
}

// ============================================================================
// Admin payloads
// ============================================================================

/// Editable movie fields accepted by the admin create/update endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MovieInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub youtube_trailer_url: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub interpreter_name: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieFlags {
    pub is_featured: bool,
    pub is_popular: bool,
}

/// Dashboard figures; the shapes are owned by the server and passed through untouched
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Analytics {
    pub visits: serde_json::Value,
    pub top_movies: serde_json::Value,
    pub countries: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_id_display() {
        assert_eq!(MovieId(42).to_string(), "42");
    }

    #[test]
    fn test_movie_deserialization_with_defaults() {
        let json = r#"{
            "id": 42,
            "title": "Inception",
            "description": "A thief who steals corporate secrets",
            "youtube_trailer_url": "https://youtube.com/watch?v=YoHD9XEInc0",
            "created_at": "2024-01-05T10:00:00Z"
        }"#;

        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.id, MovieId(42));
        assert_eq!(movie.title, "Inception");
        assert!(!movie.is_featured);
        assert!(!movie.is_popular);
        assert!(movie.has_trailer());
        assert_eq!(movie.thumbnail_url, None);
        assert!(movie.created_at.is_some());
    }

    #[test]
    fn test_blank_trailer_is_no_trailer() {
        let json = r#"{ "id": 1, "title": "Quiet", "youtube_trailer_url": "  " }"#;
        let movie: Movie = serde_json::from_str(json).unwrap();
        assert!(!movie.has_trailer());
    }

    #[test]
    fn test_movie_input_serializes_only_editable_fields() {
        let input = MovieInput {
            title: "Heat".to_string(),
            interpreter_name: Some("Narrator".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&input).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 6);
        assert!(!keys.contains(&"id"));
        assert_eq!(value["interpreter_name"], "Narrator");
    }
}
