use crate::config::{ApiConfig, ApiProfile};
use crate::error::{ClientError, Result};
use crate::storage::{KeyValueStore, SessionRepository};
use reqwest::{Method, RequestBuilder, Response, Url};
use std::sync::Arc;
use std::time::Duration;

pub mod auth;
pub mod companies;
pub mod endpoints;
pub mod response;
pub mod tasks;

pub use response::extract_error_message;

/// Client for the TaskSaathi REST API.
///
/// The session lives in the injected store and is re-read on every call, so
/// several clients sharing one store observe each other's logins and logouts.
#[derive(Debug, Clone)]
pub struct TaskSaathiClient {
    http: reqwest::Client,
    base_url: String,
    profile: ApiProfile,
    sessions: SessionRepository,
}

impl TaskSaathiClient {
    /// Builds a client against `config.server_url` backed by `store`.
    ///
    /// # Errors
    /// Returns `ClientError::InvalidUrl` for an unparsable server URL and
    /// `ClientError::Network` if the HTTP stack cannot be initialised.
    pub fn new(config: &ApiConfig, store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let base_url = config.server_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

        let mut builder = reqwest::Client::builder();
        if config.request_timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.request_timeout_secs));
        }
        let http = builder.build().map_err(ClientError::Network)?;

        Ok(Self { http, base_url, profile: config.profile, sessions: SessionRepository::new(store) })
    }

    #[must_use]
    pub const fn sessions(&self) -> &SessionRepository {
        &self.sessions
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Url::parse(&format!("{}{path}", self.base_url)).map_err(|e| ClientError::InvalidUrl(e.to_string()))
    }

    /// Starts a request carrying the stored bearer token.
    async fn authorized(&self, method: Method, url: Url) -> Result<RequestBuilder> {
        let token = self.sessions.access_token().await?.filter(|token| !token.is_empty()).ok_or_else(|| {
            tracing::debug!("no stored access token");
            ClientError::NotAuthenticated
        })?;
        Ok(self.http.request(method, url).bearer_auth(token))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        request.send().await.map_err(|e| {
            tracing::warn!(error = %e, "request failed");
            ClientError::Network(e)
        })
    }
}
