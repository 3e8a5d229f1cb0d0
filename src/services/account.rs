use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{Credential, PasswordChange, ProfileUpdate, User, MIN_PASSWORD_LEN},
    services::{backend::MovieBackend, session::SessionStore},
};

/// Profile and password endpoints of the signed-in user
#[derive(Clone)]
pub struct AccountService {
    backend: Arc<dyn MovieBackend>,
    session: Arc<SessionStore>,
}

impl AccountService {
    pub fn new(backend: Arc<dyn MovieBackend>, session: Arc<SessionStore>) -> Self {
        Self { backend, session }
    }

    pub async fn profile(&self) -> AppResult<User> {
        let credential = self.credential().await?;
        self.backend.fetch_profile(&credential).await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> AppResult<User> {
        let credential = self.credential().await?;
        let user = self.backend.update_profile(&credential, update).await?;
        tracing::info!(user_id = user.id, "Profile updated");
        Ok(user)
    }

    pub async fn change_password(&self, current: &str, new: &str) -> AppResult<()> {
        if new.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::InvalidInput(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        let credential = self.credential().await?;
        let user_id = match credential.subject_id() {
            Some(id) => id,
            None => self
                .session
                .current_user()
                .await
                .map(|u| u.id)
                .ok_or_else(|| AppError::Unauthorized("Please login".to_string()))?,
        };

        let change = PasswordChange {
            current_password: current.to_string(),
            new_password: new.to_string(),
        };
        self.backend
            .change_password(&credential, user_id, &change)
            .await?;

        tracing::info!(user_id, "Password changed");
        Ok(())
    }

    async fn credential(&self) -> AppResult<Credential> {
        self.session
            .credential()
            .await
            .ok_or_else(|| AppError::Unauthorized("Please login".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LoginResponse, Role};
    use crate::services::backend::MockMovieBackend;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

    fn expect_login(backend: &mut MockMovieBackend, token: String) {
        backend.expect_login().returning(move |_, _| {
            Ok(LoginResponse {
                token: token.clone(),
                user: User {
                    id: 4,
                    username: "ana".to_string(),
                    email: None,
                    role: Role::User,
                },
            })
        });
    }

    async fn account(backend: MockMovieBackend, sign_in: bool) -> AccountService {
        let backend: Arc<dyn MovieBackend> = Arc::new(backend);
        let session = Arc::new(SessionStore::new(backend.clone()));
        if sign_in {
            session.login("ana", "hunter22").await.unwrap();
        }
        AccountService::new(backend, session)
    }

    #[tokio::test]
    async fn test_profile_requires_session() {
        let mut backend = MockMovieBackend::new();
        backend.expect_fetch_profile().never();

        let err = account(backend, false).await.profile().await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_change_password_uses_token_subject() {
        let token = format!("h.{}.s", URL_SAFE_NO_PAD.encode(r#"{"id":77}"#));
        let mut backend = MockMovieBackend::new();
        expect_login(&mut backend, token);
        backend
            .expect_change_password()
            .withf(|_, user_id, change| *user_id == 77 && change.new_password == "brand-new")
            .times(1)
            .returning(|_, _, _| Ok(()));

        account(backend, true)
            .await
            .change_password("old-secret", "brand-new")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_change_password_falls_back_to_identity() {
        let mut backend = MockMovieBackend::new();
        expect_login(&mut backend, "opaque".to_string());
        backend
            .expect_change_password()
            .withf(|_, user_id, _| *user_id == 4)
            .times(1)
            .returning(|_, _, _| Ok(()));

        account(backend, true)
            .await
            .change_password("old-secret", "brand-new")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_short_password_rejected_locally() {
        let mut backend = MockMovieBackend::new();
        expect_login(&mut backend, "opaque".to_string());
        backend.expect_change_password().never();

        let err = account(backend, true)
            .await
            .change_password("old-secret", "short")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }
}
