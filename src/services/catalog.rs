use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{Movie, MovieId},
    services::backend::MovieBackend,
};

/// Read-only access to the movie catalog.
///
/// No caching; every call is a full round trip and errors reach the caller.
#[derive(Clone)]
pub struct CatalogService {
    backend: Arc<dyn MovieBackend>,
}

impl CatalogService {
    pub fn new(backend: Arc<dyn MovieBackend>) -> Self {
        Self { backend }
    }

    pub async fn list_movies(&self) -> AppResult<Vec<Movie>> {
        self.backend.list_movies().await.map_err(|e| {
            tracing::error!(error = %e, "Error fetching movies");
            e
        })
    }

    pub async fn get_movie(&self, id: MovieId) -> AppResult<Movie> {
        self.backend.get_movie(id).await.map_err(|e| {
            tracing::error!(movie_id = %id, error = %e, "Error fetching movie");
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::services::backend::MockMovieBackend;

    #[tokio::test]
    async fn test_every_call_hits_the_backend() {
        let mut backend = MockMovieBackend::new();
        backend
            .expect_list_movies()
            .times(2)
            .returning(|| Ok(Vec::new()));

        let catalog = CatalogService::new(Arc::new(backend));
        tokio_test::assert_ok!(catalog.list_movies().await);
        tokio_test::assert_ok!(catalog.list_movies().await);
    }

    #[tokio::test]
    async fn test_get_movie_propagates_not_found() {
        let mut backend = MockMovieBackend::new();
        backend
            .expect_get_movie()
            .withf(|id| *id == MovieId(404))
            .returning(|_| Err(AppError::NotFound("Movie not found".to_string())));

        let catalog = CatalogService::new(Arc::new(backend));
        let err = tokio_test::assert_err!(catalog.get_movie(MovieId(404)).await);
        assert_eq!(err.to_string(), "Movie not found");
    }
}
