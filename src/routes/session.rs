use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{ActionOutcome, User},
    routes::AppState,
    services::admin::ACCESS_DENIED,
    views::SessionView,
};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginOutcome {
    pub success: bool,
    pub user: User,
}

pub async fn current(State(state): State<AppState>) -> Json<SessionView> {
    let user = state.session.current_user().await;
    Json(SessionView {
        authenticated: user.is_some(),
        is_admin: user.as_ref().is_some_and(User::is_admin),
        user,
        watchlist_count: state.watchlist.len().await,
    })
}

pub async fn login(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginOutcome>> {
    tracing::info!(request_id = %request_id, "Processing login");

    let user = state
        .session
        .login(&request.username, &request.password)
        .await?;

    Ok(Json(LoginOutcome {
        success: true,
        user,
    }))
}

/// Login for the admin portal; a non-admin stays signed in but is turned away
pub async fn admin_login(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginOutcome>> {
    tracing::info!(request_id = %request_id, "Processing admin login");

    let user = state
        .session
        .login(&request.username, &request.password)
        .await?;

    if !user.is_admin() {
        tracing::warn!(request_id = %request_id, user_id = user.id, "Admin portal denied");
        return Err(AppError::Forbidden(ACCESS_DENIED.to_string()));
    }

    Ok(Json(LoginOutcome {
        success: true,
        user,
    }))
}

pub async fn logout(State(state): State<AppState>) -> Json<ActionOutcome> {
    state.session.logout().await;
    Json(ActionOutcome::ok("Logged out"))
}
