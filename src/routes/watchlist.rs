use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    models::{ActionOutcome, MovieId},
    routes::AppState,
    services::WatchlistError,
    views::WatchlistView,
};

type Outcome = (StatusCode, Json<ActionOutcome>);

pub async fn list(State(state): State<AppState>) -> Json<WatchlistView> {
    Json(WatchlistView {
        phase: state.watchlist.phase().await,
        entries: state.watchlist.entries().await,
    })
}

pub async fn add(State(state): State<AppState>, Path(id): Path<MovieId>) -> Outcome {
    respond(state.watchlist.add(id).await)
}

pub async fn remove(State(state): State<AppState>, Path(id): Path<MovieId>) -> Outcome {
    respond(state.watchlist.remove(id).await)
}

pub async fn toggle(State(state): State<AppState>, Path(id): Path<MovieId>) -> Outcome {
    respond(state.watchlist.toggle(id).await)
}

fn respond(result: Result<&'static str, WatchlistError>) -> Outcome {
    match result {
        Ok(message) => (StatusCode::OK, Json(ActionOutcome::ok(message))),
        Err(err) => {
            let status = match err {
                WatchlistError::NotAuthenticated(_) => StatusCode::UNAUTHORIZED,
                WatchlistError::Rejected(_) => StatusCode::BAD_REQUEST,
                WatchlistError::Transport(_) => StatusCode::BAD_GATEWAY,
            };
            (status, Json(ActionOutcome::failed(err.to_string())))
        }
    }
}
