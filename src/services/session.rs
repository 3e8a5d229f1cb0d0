use std::sync::Arc;

use tokio::sync::{watch, RwLock};

use crate::{
    error::{AppError, AppResult},
    models::{Credential, Session, User, MIN_PASSWORD_LEN},
    services::backend::MovieBackend,
};

/// Owner of the authentication lifecycle.
///
/// The session is created by a successful `login` and dropped by `logout`.
/// Everything else only reads it. Changes of the authenticated flag are
/// broadcast on a watch channel so dependent stores can react.
pub struct SessionStore {
    backend: Arc<dyn MovieBackend>,
    session: RwLock<Option<Session>>,
    authenticated: watch::Sender<bool>,
}

impl SessionStore {
    pub fn new(backend: Arc<dyn MovieBackend>) -> Self {
        let (authenticated, _) = watch::channel(false);
        Self {
            backend,
            session: RwLock::new(None),
            authenticated,
        }
    }

    /// Exchanges credentials with the server and stores the resulting session
    pub async fn login(&self, username: &str, password: &str) -> AppResult<User> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AppError::InvalidInput(
                "Username and password are required".to_string(),
            ));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::InvalidInput(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        let response = self.backend.login(username.trim(), password).await?;
        let user = response.user;

        *self.session.write().await = Some(Session {
            identity: user.clone(),
            credential: Credential::new(response.token),
        });
        self.authenticated.send_replace(true);

        tracing::info!(user_id = user.id, admin = user.is_admin(), "Logged in");

        Ok(user)
    }

    pub async fn logout(&self) {
        let previous = self.session.write().await.take();
        self.authenticated.send_replace(false);

        if let Some(session) = previous {
            tracing::info!(user_id = session.identity.id, "Logged out");
        }
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_some()
    }

    pub async fn current_user(&self) -> Option<User> {
        self.session
            .read()
            .await
            .as_ref()
            .map(|s| s.identity.clone())
    }

    pub async fn credential(&self) -> Option<Credential> {
        self.session
            .read()
            .await
            .as_ref()
            .map(|s| s.credential.clone())
    }

    pub async fn is_admin(&self) -> bool {
        self.session
            .read()
            .await
            .as_ref()
            .is_some_and(|s| s.identity.is_admin())
    }

    /// The credential, but only while the signed-in identity is an administrator
    pub async fn admin_credential(&self) -> Option<Credential> {
        self.session
            .read()
            .await
            .as_ref()
            .filter(|s| s.identity.is_admin())
            .map(|s| s.credential.clone())
    }

    /// Receiver that observes every login and logout
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.authenticated.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LoginResponse, Role};
    use crate::services::backend::MockMovieBackend;

    fn login_response(role: Role) -> LoginResponse {
        LoginResponse {
            token: "token-1".to_string(),
            user: User {
                id: 9,
                username: "ana".to_string(),
                email: None,
                role,
            },
        }
    }

    #[tokio::test]
    async fn test_login_stores_session() {
        let mut backend = MockMovieBackend::new();
        backend
            .expect_login()
            .withf(|username, password| username == "ana" && password == "hunter22")
            .times(1)
            .returning(|_, _| Ok(login_response(Role::User)));

        let store = SessionStore::new(Arc::new(backend));
        let mut changes = store.subscribe();

        let user = store.login(" ana ", "hunter22").await.unwrap();
        assert_eq!(user.id, 9);
        assert!(store.is_authenticated().await);
        assert!(!store.is_admin().await);
        assert_eq!(store.credential().await, Some(Credential::new("token-1")));
        assert!(changes.has_changed().unwrap());
        assert!(*changes.borrow_and_update());
    }

    #[tokio::test]
    async fn test_failed_login_keeps_signed_out() {
        let mut backend = MockMovieBackend::new();
        backend.expect_login().returning(|_, _| {
            Err(AppError::Rejected {
                status: 401,
                message: "Invalid credentials".to_string(),
            })
        });

        let store = SessionStore::new(Arc::new(backend));
        let err = store.login("ana", "wrong-one").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials");
        assert!(!store.is_authenticated().await);
        assert_eq!(store.credential().await, None);
    }

    #[tokio::test]
    async fn test_blank_credentials_skip_network() {
        let mut backend = MockMovieBackend::new();
        backend.expect_login().never();

        let store = SessionStore::new(Arc::new(backend));
        let err = store.login("   ", "secret").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_short_password_skips_network() {
        let mut backend = MockMovieBackend::new();
        backend.expect_login().never();

        let store = SessionStore::new(Arc::new(backend));
        let err = store.login("ana", "12345").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: Password must be at least 6 characters");
        assert!(!store.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_logout_clears_session_and_notifies() {
        let mut backend = MockMovieBackend::new();
        backend
            .expect_login()
            .returning(|_, _| Ok(login_response(Role::Admin)));

        let store = SessionStore::new(Arc::new(backend));
        store.login("ana", "hunter22").await.unwrap();
        assert!(store.is_admin().await);
        assert!(store.admin_credential().await.is_some());

        let mut changes = store.subscribe();
        store.logout().await;

        assert!(!store.is_authenticated().await);
        assert_eq!(store.current_user().await, None);
        assert_eq!(store.admin_credential().await, None);
        assert!(!*changes.borrow_and_update());
    }

    #[tokio::test]
    async fn test_admin_credential_withheld_from_regular_user() {
        let mut backend = MockMovieBackend::new();
        backend
            .expect_login()
            .returning(|_, _| Ok(login_response(Role::User)));

        let store = SessionStore::new(Arc::new(backend));
        store.login("ana", "hunter22").await.unwrap();
        assert!(store.credential().await.is_some());
        assert_eq!(store.admin_credential().await, None);
    }
}
