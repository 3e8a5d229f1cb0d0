//! View models for the pages of the front-end.
//!
//! Builders here are pure: they take data already fetched by the stores and
//! shape it for display. Nothing in this module performs I/O.

use serde::Serialize;
use std::collections::HashSet;

use crate::models::{Movie, MovieId, User, WatchlistEntry, WatchlistPhase};

pub mod format;
pub mod home;

pub use format::{format_date, stream_url, truncate_text};

pub const PLACEHOLDER_THUMBNAIL: &str =
    "https://via.placeholder.com/300x450/1a1a2e/ffffff?text=Movie";

/// Grid tile for a movie
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MovieCard {
    pub id: MovieId,
    pub title: String,
    pub summary: Option<String>,
    pub thumbnail_url: String,
    pub has_trailer: bool,
    /// Where clicking the thumbnail leads; straight to the trailer when there is one
    pub link: String,
    pub in_watchlist: bool,
}

impl MovieCard {
    pub fn new(movie: &Movie, in_watchlist: bool) -> Self {
        let has_trailer = movie.has_trailer();
        let link = if has_trailer {
            format!("/movie/{}?t=trailer", movie.id)
        } else {
            format!("/movie/{}", movie.id)
        };

        Self {
            id: movie.id,
            title: movie.title.clone(),
            summary: movie
                .description
                .as_deref()
                .map(|d| truncate_text(d, format::DEFAULT_SUMMARY_LEN)),
            thumbnail_url: thumbnail_or_placeholder(movie.thumbnail_url.as_deref()),
            has_trailer,
            link,
            in_watchlist,
        }
    }
}

fn thumbnail_or_placeholder(url: Option<&str>) -> String {
    url.filter(|u| !u.trim().is_empty())
        .unwrap_or(PLACEHOLDER_THUMBNAIL)
        .to_string()
}

fn cards<'a>(
    movies: impl IntoIterator<Item = &'a Movie>,
    saved: &HashSet<MovieId>,
) -> Vec<MovieCard> {
    movies
        .into_iter()
        .map(|m| MovieCard::new(m, saved.contains(&m.id)))
        .collect()
}

/// Landing page
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HomeView {
    pub featured: Option<MovieCard>,
    pub popular_now: Vec<MovieCard>,
    pub recent_releases: Vec<MovieCard>,
    /// Present only when a search term was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_results: Option<Vec<MovieCard>>,
}

impl HomeView {
    pub fn build(movies: &[Movie], search: Option<&str>, saved: &HashSet<MovieId>) -> Self {
        let search_results = search
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(|term| cards(home::search(movies, term), saved));

        Self {
            featured: home::featured(movies).map(|m| MovieCard::new(m, saved.contains(&m.id))),
            popular_now: cards(home::popular_now(movies), saved),
            recent_releases: cards(home::recent_releases(movies), saved),
            search_results,
        }
    }
}

/// Single movie page
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MovieDetailView {
    pub movie: Movie,
    pub thumbnail_url: String,
    pub stream_url: String,
    pub added_on: Option<String>,
    pub in_watchlist: bool,
    pub show_trailer: bool,
    pub popular: Vec<MovieCard>,
}

impl MovieDetailView {
    pub fn build(
        movie: Movie,
        catalog: &[Movie],
        api_base_url: &str,
        saved: &HashSet<MovieId>,
        trailer_requested: bool,
    ) -> Self {
        Self {
            thumbnail_url: thumbnail_or_placeholder(movie.thumbnail_url.as_deref()),
            stream_url: stream_url(api_base_url, movie.id),
            added_on: movie.created_at.as_ref().map(format_date),
            in_watchlist: saved.contains(&movie.id),
            show_trailer: trailer_requested && movie.has_trailer(),
            popular: cards(home::popular_now(catalog), saved),
            movie,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WatchlistView {
    pub phase: WatchlistPhase,
    pub entries: Vec<WatchlistEntry>,
}

/// What the navigation bar needs to know about the session
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SessionView {
    pub authenticated: bool,
    pub is_admin: bool,
    pub user: Option<User>,
    pub watchlist_count: usize,
}
