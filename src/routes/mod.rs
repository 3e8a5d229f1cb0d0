use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use std::{collections::HashSet, sync::Arc};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    middleware::{make_span_with_request_id, request_id_middleware},
    models::MovieId,
    services::{
        AccountService, AdminBackend, AdminService, CatalogService, HttpBackend, MovieBackend,
        SessionStore, WatchlistStore,
    },
};

pub mod admin;
pub mod movies;
pub mod profile;
pub mod session;
pub mod watchlist;

/// Stores and accessors shared by every view handler
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
    pub session: Arc<SessionStore>,
    pub watchlist: Arc<WatchlistStore>,
    pub account: AccountService,
    pub admin: AdminService,
    pub api_base_url: Arc<str>,
}

impl AppState {
    /// Wires the stores together and starts the watchlist's session sync.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(
        backend: Arc<dyn MovieBackend>,
        admin_backend: Arc<dyn AdminBackend>,
        api_base_url: &str,
    ) -> Self {
        let session = Arc::new(SessionStore::new(backend.clone()));
        let watchlist = Arc::new(WatchlistStore::new(backend.clone(), session.clone()));
        watchlist.spawn_session_sync();

        Self {
            catalog: CatalogService::new(backend.clone()),
            account: AccountService::new(backend, session.clone()),
            admin: AdminService::new(admin_backend, session.clone()),
            session,
            watchlist,
            api_base_url: Arc::from(api_base_url.trim_end_matches('/')),
        }
    }

    pub fn from_http(backend: HttpBackend) -> Self {
        let api_base_url = backend.api_url().to_string();
        let backend = Arc::new(backend);
        Self::new(backend.clone(), backend, &api_base_url)
    }

    /// Ids currently in the signed-in user's watchlist
    pub async fn saved_ids(&self) -> HashSet<MovieId> {
        self.watchlist
            .entries()
            .await
            .into_iter()
            .map(|entry| entry.id)
            .collect()
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(view_routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
}

fn view_routes() -> Router<AppState> {
    Router::new()
        // Session
        .route("/session", get(session::current))
        .route("/session/login", post(session::login))
        .route("/session/admin-login", post(session::admin_login))
        .route("/session/logout", post(session::logout))
        // Catalog
        .route("/movies", get(movies::home))
        .route("/movies/:id", get(movies::detail))
        // Watchlist
        .route("/watchlist", get(watchlist::list))
        .route(
            "/watchlist/:id",
            post(watchlist::add).delete(watchlist::remove),
        )
        .route("/watchlist/:id/toggle", post(watchlist::toggle))
        // Profile
        .route("/profile", get(profile::show).put(profile::update))
        .route("/profile/password", put(profile::change_password))
        // Admin
        .route("/admin/users", get(admin::list_users))
        .route("/admin/users/:id/role", put(admin::update_user_role))
        .route("/admin/movies", post(admin::create_movie))
        .route(
            "/admin/movies/:id",
            put(admin::update_movie).delete(admin::delete_movie),
        )
        .route("/admin/movies/:id/flags", put(admin::set_movie_flags))
        .route("/admin/analytics", get(admin::analytics))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
