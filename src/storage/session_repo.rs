use crate::domain::session::{Role, Session};
use crate::domain::user::UserProfile;
use crate::error::StorageError;
use crate::storage::KeyValueStore;
use std::sync::Arc;

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const LEGACY_TOKEN_KEY: &str = "token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub const USER_ID_KEY: &str = "user_id";
pub const USER_KEY: &str = "user";
pub const USER_ROLE_KEY: &str = "user_role";
pub const LOGGED_IN_KEY: &str = "loggedIn";

/// Every key a session may occupy, including the legacy token alias.
pub const SESSION_KEYS: [&str; 7] = [
    ACCESS_TOKEN_KEY,
    LEGACY_TOKEN_KEY,
    REFRESH_TOKEN_KEY,
    USER_ID_KEY,
    USER_KEY,
    USER_ROLE_KEY,
    LOGGED_IN_KEY,
];

/// Maps [`Session`] onto the canonical key schema of a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct SessionRepository {
    store: Arc<dyn KeyValueStore>,
}

impl SessionRepository {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Replaces the stored session with `session`.
    ///
    /// # Errors
    /// Returns `StorageError` if any write fails; earlier writes are not rolled back.
    #[tracing::instrument(err, skip_all)]
    pub async fn save(&self, session: &Session) -> Result<(), StorageError> {
        self.store.set(ACCESS_TOKEN_KEY, &session.access_token).await?;
        self.store.remove(LEGACY_TOKEN_KEY).await?;
        self.set_or_remove(REFRESH_TOKEN_KEY, session.refresh_token.as_deref()).await?;
        self.set_or_remove(USER_ID_KEY, session.user_id.as_deref()).await?;
        self.set_or_remove(USER_ROLE_KEY, session.role.as_ref().map(Role::as_str)).await?;

        match &session.user {
            Some(user) => self.store.set(USER_KEY, &serde_json::to_string(user)?).await?,
            None => self.store.remove(USER_KEY).await?,
        }

        self.set_or_remove(LOGGED_IN_KEY, session.logged_in.then_some("true")).await
    }

    /// Reads the stored session. Returns `None` when no access token is present.
    ///
    /// # Errors
    /// Returns `StorageError` if the store fails or the stored user is not valid JSON.
    pub async fn load(&self) -> Result<Option<Session>, StorageError> {
        let Some(access_token) = self.access_token().await? else {
            return Ok(None);
        };

        Ok(Some(Session {
            access_token,
            refresh_token: self.refresh_token().await?,
            logged_in: self.logged_in().await?,
            user_id: self.store.get(USER_ID_KEY).await?,
            role: self.role().await?,
            user: self.user().await?,
        }))
    }

    /// The bearer token, falling back to the legacy `token` key.
    ///
    /// # Errors
    /// Returns `StorageError` if the store fails.
    pub async fn access_token(&self) -> Result<Option<String>, StorageError> {
        match self.store.get(ACCESS_TOKEN_KEY).await? {
            Some(token) => Ok(Some(token)),
            None => self.store.get(LEGACY_TOKEN_KEY).await,
        }
    }

    /// # Errors
    /// Returns `StorageError` if the store fails.
    pub async fn refresh_token(&self) -> Result<Option<String>, StorageError> {
        self.store.get(REFRESH_TOKEN_KEY).await
    }

    /// # Errors
    /// Returns `StorageError` if the store fails.
    pub async fn logged_in(&self) -> Result<bool, StorageError> {
        Ok(self.store.get(LOGGED_IN_KEY).await?.is_some_and(|flag| flag == "true"))
    }

    /// True when a non-empty access token is stored and the `loggedIn` flag is set.
    /// The stored user record is not read.
    ///
    /// # Errors
    /// Returns `StorageError` if the store fails.
    pub async fn is_authenticated(&self) -> Result<bool, StorageError> {
        let has_token = self.access_token().await?.is_some_and(|token| !token.is_empty());
        Ok(has_token && self.logged_in().await?)
    }

    /// # Errors
    /// Returns `StorageError` if the store fails or the stored user is not valid JSON.
    pub async fn user(&self) -> Result<Option<UserProfile>, StorageError> {
        match self.store.get(USER_KEY).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// # Errors
    /// Returns `StorageError` if the store fails.
    pub async fn role(&self) -> Result<Option<Role>, StorageError> {
        Ok(self.store.get(USER_ROLE_KEY).await?.map(Role::from))
    }

    /// Stores a refreshed access token and, if the backend rotated it, the new refresh token.
    ///
    /// # Errors
    /// Returns `StorageError` if a write fails.
    pub async fn update_tokens(&self, access: &str, refresh: Option<&str>) -> Result<(), StorageError> {
        self.store.set(ACCESS_TOKEN_KEY, access).await?;
        self.store.remove(LEGACY_TOKEN_KEY).await?;
        if let Some(refresh) = refresh {
            self.store.set(REFRESH_TOKEN_KEY, refresh).await?;
        }
        Ok(())
    }

    /// Removes every session key.
    ///
    /// # Errors
    /// Returns `StorageError` if a removal fails.
    #[tracing::instrument(err, skip_all)]
    pub async fn clear(&self) -> Result<(), StorageError> {
        for key in SESSION_KEYS {
            self.store.remove(key).await?;
        }
        Ok(())
    }

    async fn set_or_remove(&self, key: &str, value: Option<&str>) -> Result<(), StorageError> {
        match value {
            Some(value) => self.store.set(key, value).await,
            None => self.store.remove(key).await,
        }
    }
}
