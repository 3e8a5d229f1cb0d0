use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::{
    error::AppResult,
    models::MovieId,
    routes::AppState,
    views::{HomeView, MovieDetailView},
};

#[derive(Debug, Deserialize)]
pub struct HomeQuery {
    search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DetailQuery {
    /// `t=trailer` opens the page on the trailer
    t: Option<String>,
}

/// Handler for the landing page
pub async fn home(
    State(state): State<AppState>,
    Query(query): Query<HomeQuery>,
) -> AppResult<Json<HomeView>> {
    let movies = state.catalog.list_movies().await?;
    let saved = state.saved_ids().await;
    Ok(Json(HomeView::build(&movies, query.search.as_deref(), &saved)))
}

/// Handler for a movie page; the sidebar needs the whole catalog as well
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<MovieId>,
    Query(query): Query<DetailQuery>,
) -> AppResult<Json<MovieDetailView>> {
    let movie = state.catalog.get_movie(id).await?;
    let catalog = state.catalog.list_movies().await?;
    let saved = state.saved_ids().await;

    Ok(Json(MovieDetailView::build(
        movie,
        &catalog,
        &state.api_base_url,
        &saved,
        query.t.as_deref() == Some("trailer"),
    )))
}
