/// reqwest implementation of the movie platform API
///
/// Paths are appended to the configured base URL, so a base of
/// `http://localhost:3000/api` yields `http://localhost:3000/api/movies`.
/// Authenticated calls send `Authorization: Bearer <token>`. There are no
/// retries: one failed attempt is reported as is.
use crate::{
    error::{AppError, AppResult},
    models::{
        Analytics, Credential, LoginResponse, Movie, MovieFlags, MovieId, MovieInput,
        PasswordChange, ProfileUpdate, Role, User,
    },
    services::backend::{AdminBackend, MovieBackend},
};
use reqwest::{Client as HttpClient, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;

const ANALYTICS_FAILED: &str = "Failed to fetch analytics data";

#[derive(Clone)]
pub struct HttpBackend {
    http_client: HttpClient,
    api_url: String,
}

/// Error payload of the movie API; endpoints disagree on the field name
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        self.error
            .or(self.message)
            .filter(|message| !message.trim().is_empty())
    }
}

impl HttpBackend {
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        let api_url = api_url.into().trim_end_matches('/').to_string();

        tracing::info!(api_url = %api_url, "Movie API backend configured");

        Ok(Self {
            http_client,
            api_url,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    fn authorized(&self, builder: RequestBuilder, credential: &Credential) -> RequestBuilder {
        builder.bearer_auth(credential.as_str())
    }

    /// Sends a request and turns a non-success status into `AppError::Rejected`
    async fn send(&self, builder: RequestBuilder, fallback: &str) -> AppResult<Response> {
        let response = builder.send().await.map_err(|e| {
            tracing::error!(error = %e, "Movie API request failed");
            AppError::from(e)
        })?;
        ensure_success(response, fallback).await
    }

    async fn get_authorized<T: DeserializeOwned>(
        &self,
        credential: &Credential,
        path: &str,
        fallback: &str,
    ) -> AppResult<T> {
        let builder = self.authorized(self.http_client.get(self.url(path)), credential);
        let response = self.send(builder, fallback).await?;
        Ok(response.json().await?)
    }
}

/// Passes successful responses through, otherwise extracts the server's message
async fn ensure_success(response: Response, fallback: &str) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or_else(|| fallback.to_string());

    tracing::warn!(
        status = %status,
        message = %message,
        "Movie API rejected request"
    );

    Err(AppError::Rejected {
        status: status.as_u16(),
        message,
    })
}

#[async_trait::async_trait]
impl MovieBackend for HttpBackend {
    async fn list_movies(&self) -> AppResult<Vec<Movie>> {
        let response = self
            .send(self.http_client.get(self.url("/movies")), "Failed to fetch movies")
            .await?;
        let movies: Vec<Movie> = response.json().await?;

        tracing::debug!(count = movies.len(), "Movies fetched");

        Ok(movies)
    }

    async fn get_movie(&self, id: MovieId) -> AppResult<Movie> {
        let response = self
            .http_client
            .get(self.url(&format!("/movies/{}", id)))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound("Movie not found".to_string()));
        }

        let response = ensure_success(response, "Failed to fetch movie").await?;
        Ok(response.json().await?)
    }

    async fn login(&self, username: &str, password: &str) -> AppResult<LoginResponse> {
        #[derive(Serialize)]
        struct LoginRequest<'a> {
            username: &'a str,
            password: &'a str,
        }

        let builder = self
            .http_client
            .post(self.url("/auth/login"))
            .json(&LoginRequest { username, password });
        let response = self.send(builder, "Login failed").await?;
        Ok(response.json().await?)
    }

    async fn fetch_watchlist(&self, credential: &Credential) -> AppResult<Vec<Movie>> {
        self.get_authorized(credential, "/watchlist", "Failed to fetch watchlist")
            .await
    }

    async fn add_to_watchlist(&self, credential: &Credential, id: MovieId) -> AppResult<()> {
        let builder = self.authorized(
            self.http_client.post(self.url(&format!("/watchlist/{}", id))),
            credential,
        );
        self.send(builder, "Failed to add to watchlist").await?;
        Ok(())
    }

    async fn remove_from_watchlist(&self, credential: &Credential, id: MovieId) -> AppResult<()> {
        let builder = self.authorized(
            self.http_client.delete(self.url(&format!("/watchlist/{}", id))),
            credential,
        );
        self.send(builder, "Failed to remove from watchlist").await?;
        Ok(())
    }

    async fn fetch_profile(&self, credential: &Credential) -> AppResult<User> {
        self.get_authorized(credential, "/users/profile", "Failed to fetch profile")
            .await
    }

    async fn update_profile(
        &self,
        credential: &Credential,
        update: &ProfileUpdate,
    ) -> AppResult<User> {
        let builder = self
            .authorized(self.http_client.put(self.url("/users/profile")), credential)
            .json(update);
        let response = self.send(builder, "Failed to update profile").await?;
        Ok(response.json().await?)
    }

    async fn change_password(
        &self,
        credential: &Credential,
        user_id: i64,
        change: &PasswordChange,
    ) -> AppResult<()> {
        let builder = self
            .authorized(
                self.http_client
                    .put(self.url(&format!("/users/{}/password", user_id))),
                credential,
            )
            .json(change);
        self.send(builder, "Failed to change password").await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl AdminBackend for HttpBackend {
    async fn create_movie(&self, credential: &Credential, input: &MovieInput) -> AppResult<Movie> {
        let builder = self
            .authorized(self.http_client.post(self.url("/movies")), credential)
            .json(input);
        let response = self.send(builder, "Failed to add movie").await?;
        Ok(response.json().await?)
    }

    async fn update_movie(
        &self,
        credential: &Credential,
        id: MovieId,
        input: &MovieInput,
    ) -> AppResult<Movie> {
        let builder = self
            .authorized(
                self.http_client.put(self.url(&format!("/movies/{}", id))),
                credential,
            )
            .json(input);
        let response = self.send(builder, "Failed to update movie").await?;
        Ok(response.json().await?)
    }

    async fn delete_movie(&self, credential: &Credential, id: MovieId) -> AppResult<()> {
        let builder = self.authorized(
            self.http_client.delete(self.url(&format!("/movies/{}", id))),
            credential,
        );
        self.send(builder, "Failed to delete movie").await?;
        Ok(())
    }

    async fn set_movie_flags(
        &self,
        credential: &Credential,
        id: MovieId,
        flags: MovieFlags,
    ) -> AppResult<()> {
        let builder = self
            .authorized(
                self.http_client
                    .put(self.url(&format!("/admin/movies/{}/flags", id))),
                credential,
            )
            .json(&flags);
        self.send(builder, "Failed to update flags").await?;
        Ok(())
    }

    async fn list_users(&self, credential: &Credential) -> AppResult<Vec<User>> {
        self.get_authorized(credential, "/users", "Failed to fetch users")
            .await
    }

    async fn update_user_role(
        &self,
        credential: &Credential,
        user_id: i64,
        role: Role,
    ) -> AppResult<()> {
        #[derive(Serialize)]
        struct RoleRequest {
            role: Role,
        }

        let builder = self
            .authorized(
                self.http_client
                    .put(self.url(&format!("/users/{}/role", user_id))),
                credential,
            )
            .json(&RoleRequest { role });
        self.send(builder, "Failed to update user role").await?;
        Ok(())
    }

    async fn fetch_analytics(&self, credential: &Credential) -> AppResult<Analytics> {
        let result = tokio::try_join!(
            self.get_authorized(credential, "/admin/analytics/visits", ANALYTICS_FAILED),
            self.get_authorized(credential, "/admin/analytics/top-movies", ANALYTICS_FAILED),
            self.get_authorized(credential, "/admin/analytics/countries", ANALYTICS_FAILED),
        );

        match result {
            Ok((visits, top_movies, countries)) => Ok(Analytics {
                visits,
                top_movies,
                countries,
            }),
            Err(AppError::Rejected { status, .. }) => Err(AppError::Rejected {
                status,
                message: ANALYTICS_FAILED.to_string(),
            }),
            Err(e) => Err(e),
        }
    }
}
