use crate::client::TaskSaathiClient;
use crate::client::endpoints::{LOGIN_PATH, LOGIN_REFRESH_PATH, LOGOUT_PATH, REGISTER_PATH};
use crate::client::response::{read_empty, read_json};
use crate::domain::auth::{Credentials, LoginData, RefreshRequest, Registration, RegistrationOutcome, TokenPair};
use crate::domain::session::Role;
use crate::domain::user::UserProfile;
use crate::error::{ClientError, Result};
use serde_json::Value;

impl TaskSaathiClient {
    /// Signs in and replaces the stored session with the one the backend issued.
    ///
    /// # Errors
    /// `ClientError::Http` with the backend's message (or "Login failed"),
    /// `ClientError::Network` when the backend is unreachable.
    #[tracing::instrument(skip_all, fields(user_id = tracing::field::Empty), err(level = "warn"))]
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginData> {
        let url = self.endpoint(LOGIN_PATH)?;
        let request = self.http.post(url).json(&Credentials { email, password });
        let data: LoginData = read_json(self.send(request).await?, "Login failed").await?;

        let session = data.to_session();
        if let Some(user_id) = &session.user_id {
            tracing::Span::current().record("user_id", tracing::field::display(user_id));
        }
        if session.user.is_none() {
            tracing::warn!("login response carried no user profile");
        }

        self.sessions.save(&session).await?;
        tracing::info!(role = ?session.role, "signed in");
        Ok(data)
    }

    /// Creates an account. Under the legacy profile a login with the same
    /// credentials follows; a rejected follow-up still counts as a successful
    /// registration.
    ///
    /// # Errors
    /// `ClientError::Http` with the backend's message (or "Registration failed"),
    /// `ClientError::Network` when the backend is unreachable.
    #[tracing::instrument(skip_all, err(level = "warn"))]
    pub async fn register(&self, registration: &Registration) -> Result<RegistrationOutcome> {
        let url = self.endpoint(REGISTER_PATH)?;
        let request = self.http.post(url).json(registration);
        let created: Value = read_json(self.send(request).await?, "Registration failed").await?;
        tracing::info!(role = %registration.user_role, "registered");

        if !self.profile.signs_in_after_registration() {
            return Ok(RegistrationOutcome::Registered(created));
        }

        match self.login(&registration.email, &registration.password).await {
            Ok(data) => Ok(RegistrationOutcome::SignedIn(data)),
            Err(e @ ClientError::Storage(_)) => Err(e),
            Err(e) => {
                tracing::warn!(error = %e, "sign-in after registration failed");
                Ok(RegistrationOutcome::PendingLogin(created))
            }
        }
    }

    /// Clears the stored session. A stored refresh token is first revoked on
    /// the backend; failing to revoke it does not keep the session alive.
    ///
    /// # Errors
    /// Returns `ClientError::Storage` if the session cannot be removed.
    #[tracing::instrument(skip_all, err(level = "warn"))]
    pub async fn logout(&self) -> Result<()> {
        if let Some(refresh) = self.sessions.refresh_token().await?
            && let Err(e) = self.revoke(&refresh).await
        {
            tracing::warn!(error = %e, "refresh token revocation failed");
        }

        self.sessions.clear().await?;
        tracing::info!("signed out");
        Ok(())
    }

    async fn revoke(&self, refresh: &str) -> Result<()> {
        let url = self.endpoint(LOGOUT_PATH)?;
        let mut request = self.http.post(url).json(&RefreshRequest { refresh });
        if let Some(token) = self.sessions.access_token().await? {
            request = request.bearer_auth(token);
        }
        read_empty(self.send(request).await?, "Logout failed").await
    }

    /// Exchanges the stored refresh token for a new access token.
    ///
    /// # Errors
    /// `ClientError::NotAuthenticated` when no refresh token is stored,
    /// `ClientError::Http` when the backend rejects it.
    #[tracing::instrument(skip_all, err(level = "warn"))]
    pub async fn refresh(&self) -> Result<TokenPair> {
        let refresh = self.sessions.refresh_token().await?.ok_or(ClientError::NotAuthenticated)?;

        let url = self.endpoint(LOGIN_REFRESH_PATH)?;
        let request = self.http.post(url).json(&RefreshRequest { refresh: &refresh });
        let tokens: TokenPair = read_json(self.send(request).await?, "Session refresh failed").await?;

        self.sessions.update_tokens(&tokens.access, tokens.refresh.as_deref()).await?;
        tracing::debug!(rotated = tokens.refresh.is_some(), "access token refreshed");
        Ok(tokens)
    }

    /// True when an access token is stored and the session is flagged as signed in.
    ///
    /// # Errors
    /// Returns `ClientError::Storage` if the store cannot be read.
    pub async fn is_authenticated(&self) -> Result<bool> {
        Ok(self.sessions.is_authenticated().await?)
    }

    /// # Errors
    /// Returns `ClientError::Storage` if the store cannot be read.
    pub async fn get_auth_token(&self) -> Result<Option<String>> {
        Ok(self.sessions.access_token().await?)
    }

    /// The stored user profile, exactly as the backend sent it.
    ///
    /// # Errors
    /// Returns `ClientError::Storage` if the store cannot be read or holds invalid JSON.
    pub async fn get_user_data(&self) -> Result<Option<UserProfile>> {
        Ok(self.sessions.user().await?)
    }

    /// # Errors
    /// Returns `ClientError::Storage` if the store cannot be read.
    pub async fn get_user_role(&self) -> Result<Option<Role>> {
        Ok(self.sessions.role().await?)
    }
}
