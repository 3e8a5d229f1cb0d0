use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{Analytics, Credential, Movie, MovieFlags, MovieId, MovieInput, Role, User},
    services::{backend::AdminBackend, session::SessionStore},
};

pub const ACCESS_DENIED: &str = "Access denied. Administrator privileges required.";

/// Administration accessor, usable only while an administrator is signed in
#[derive(Clone)]
pub struct AdminService {
    backend: Arc<dyn AdminBackend>,
    session: Arc<SessionStore>,
}

impl AdminService {
    pub fn new(backend: Arc<dyn AdminBackend>, session: Arc<SessionStore>) -> Self {
        Self { backend, session }
    }

    pub async fn create_movie(&self, input: &MovieInput) -> AppResult<Movie> {
        validate(input)?;
        let credential = self.credential().await?;
        let movie = self.backend.create_movie(&credential, input).await?;
        tracing::info!(movie_id = %movie.id, "Movie created");
        Ok(movie)
    }

    pub async fn update_movie(&self, id: MovieId, input: &MovieInput) -> AppResult<Movie> {
        validate(input)?;
        let credential = self.credential().await?;
        let movie = self.backend.update_movie(&credential, id, input).await?;
        tracing::info!(movie_id = %id, "Movie updated");
        Ok(movie)
    }

    pub async fn delete_movie(&self, id: MovieId) -> AppResult<()> {
        let credential = self.credential().await?;
        self.backend.delete_movie(&credential, id).await?;
        tracing::info!(movie_id = %id, "Movie deleted");
        Ok(())
    }

    pub async fn set_movie_flags(&self, id: MovieId, flags: MovieFlags) -> AppResult<()> {
        let credential = self.credential().await?;
        self.backend.set_movie_flags(&credential, id, flags).await?;
        tracing::info!(
            movie_id = %id,
            featured = flags.is_featured,
            popular = flags.is_popular,
            "Movie flags updated"
        );
        Ok(())
    }

    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        let credential = self.credential().await?;
        self.backend.list_users(&credential).await
    }

    pub async fn update_user_role(&self, user_id: i64, role: Role) -> AppResult<()> {
        if role == Role::Other {
            return Err(AppError::InvalidInput("Unknown role".to_string()));
        }
        let credential = self.credential().await?;
        self.backend
            .update_user_role(&credential, user_id, role)
            .await?;
        tracing::info!(user_id, ?role, "User role updated");
        Ok(())
    }

    pub async fn analytics(&self) -> AppResult<Analytics> {
        let credential = self.credential().await?;
        self.backend.fetch_analytics(&credential).await
    }

    async fn credential(&self) -> AppResult<Credential> {
        self.session
            .admin_credential()
            .await
            .ok_or_else(|| AppError::Forbidden(ACCESS_DENIED.to_string()))
    }
}

fn validate(input: &MovieInput) -> AppResult<()> {
    if input.title.trim().is_empty() {
        return Err(AppError::InvalidInput("Title is required".to_string()));
    }
    Ok(())
}
