use crate::error::ClientError;
use serde::{Deserialize, Serialize};

/// The `{success, data|error}` shape every operation maps onto.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    #[must_use]
    pub const fn success(data: T) -> Self {
        Self { success: true, data: Some(data), error: None, message: None }
    }

    /// A success that carries nothing, as for a deletion.
    #[must_use]
    pub const fn done() -> Self {
        Self { success: true, data: None, error: None, message: None }
    }

    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self { success: false, data: None, error: Some(error.into()), message: None }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T> From<Result<T, ClientError>> for Envelope<T> {
    fn from(result: Result<T, ClientError>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(e) => Self::failure(e.to_string()),
        }
    }
}
