/// REST boundary of the movie platform
///
/// Everything the front-end knows about the server goes through these two
/// traits. The stores depend on the traits, never on HTTP, so they can be
/// driven by a scripted backend in tests.
use crate::{
    error::AppResult,
    models::{
        Analytics, Credential, LoginResponse, Movie, MovieFlags, MovieId, MovieInput,
        PasswordChange, ProfileUpdate, Role, User,
    },
};

pub mod http;

pub use http::HttpBackend;

/// Catalog, session and per-user endpoints
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieBackend: Send + Sync {
    /// `GET /movies`
    async fn list_movies(&self) -> AppResult<Vec<Movie>>;

    /// `GET /movies/{id}`
    async fn get_movie(&self, id: MovieId) -> AppResult<Movie>;

    /// Exchanges a username and password for a bearer token and identity
    async fn login(&self, username: &str, password: &str) -> AppResult<LoginResponse>;

    /// `GET /watchlist`, the caller's full saved set
    async fn fetch_watchlist(&self, credential: &Credential) -> AppResult<Vec<Movie>>;

    /// `POST /watchlist/{id}`
    async fn add_to_watchlist(&self, credential: &Credential, id: MovieId) -> AppResult<()>;

    /// `DELETE /watchlist/{id}`
    async fn remove_from_watchlist(&self, credential: &Credential, id: MovieId) -> AppResult<()>;

    async fn fetch_profile(&self, credential: &Credential) -> AppResult<User>;

    async fn update_profile(
        &self,
        credential: &Credential,
        update: &ProfileUpdate,
    ) -> AppResult<User>;

    async fn change_password(
        &self,
        credential: &Credential,
        user_id: i64,
        change: &PasswordChange,
    ) -> AppResult<()>;
}

/// Administration endpoints; the server enforces the admin role on each of them
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait AdminBackend: Send + Sync {
    async fn create_movie(&self, credential: &Credential, input: &MovieInput) -> AppResult<Movie>;

    async fn update_movie(
        &self,
        credential: &Credential,
        id: MovieId,
        input: &MovieInput,
    ) -> AppResult<Movie>;

    async fn delete_movie(&self, credential: &Credential, id: MovieId) -> AppResult<()>;

    async fn set_movie_flags(
        &self,
        credential: &Credential,
        id: MovieId,
        flags: MovieFlags,
    ) -> AppResult<()>;

    async fn list_users(&self, credential: &Credential) -> AppResult<Vec<User>>;

    async fn update_user_role(&self, credential: &Credential, user_id: i64, role: Role)
        -> AppResult<()>;

    /// Visits, top movies and countries, fetched together
    async fn fetch_analytics(&self, credential: &Credential) -> AppResult<Analytics>;
}
