use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::{ActionOutcome, PasswordChange, ProfileUpdate, User},
    routes::AppState,
};

pub async fn show(State(state): State<AppState>) -> AppResult<Json<User>> {
    Ok(Json(state.account.profile().await?))
}

pub async fn update(
    State(state): State<AppState>,
    Json(update): Json<ProfileUpdate>,
) -> AppResult<Json<User>> {
    Ok(Json(state.account.update_profile(&update).await?))
}

pub async fn change_password(
    State(state): State<AppState>,
    Json(change): Json<PasswordChange>,
) -> AppResult<Json<ActionOutcome>> {
    state
        .account
        .change_password(&change.current_password, &change.new_password)
        .await?;
    Ok(Json(ActionOutcome::ok("Password changed successfully")))
}
