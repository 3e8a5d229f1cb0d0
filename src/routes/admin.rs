use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    error::AppResult,
    models::{ActionOutcome, Analytics, Movie, MovieFlags, MovieId, MovieInput, Role, User},
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct RoleRequest {
    pub role: Role,
}

pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    Ok(Json(state.admin.list_users().await?))
}

pub async fn update_user_role(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(request): Json<RoleRequest>,
) -> AppResult<Json<ActionOutcome>> {
    state.admin.update_user_role(user_id, request.role).await?;
    Ok(Json(ActionOutcome::ok("User role updated")))
}

pub async fn create_movie(
    State(state): State<AppState>,
    Json(input): Json<MovieInput>,
) -> AppResult<(StatusCode, Json<Movie>)> {
    let movie = state.admin.create_movie(&input).await?;
    Ok((StatusCode::CREATED, Json(movie)))
}

pub async fn update_movie(
    State(state): State<AppState>,
    Path(id): Path<MovieId>,
    Json(input): Json<MovieInput>,
) -> AppResult<Json<Movie>> {
    Ok(Json(state.admin.update_movie(id, &input).await?))
}

pub async fn delete_movie(
    State(state): State<AppState>,
    Path(id): Path<MovieId>,
) -> AppResult<Json<ActionOutcome>> {
    state.admin.delete_movie(id).await?;
    Ok(Json(ActionOutcome::ok("Movie deleted")))
}

pub async fn set_movie_flags(
    State(state): State<AppState>,
    Path(id): Path<MovieId>,
    Json(flags): Json<MovieFlags>,
) -> AppResult<Json<ActionOutcome>> {
    state.admin.set_movie_flags(id, flags).await?;
    Ok(Json(ActionOutcome::ok("Flags updated")))
}

pub async fn analytics(State(state): State<AppState>) -> AppResult<Json<Analytics>> {
    Ok(Json(state.admin.analytics().await?))
}
