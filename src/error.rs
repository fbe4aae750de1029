use thiserror::Error;

/// Failures surfaced by every client operation.
///
/// The `Display` text of each variant is the user-facing message carried in
/// the `error` field of an [`Envelope`](crate::domain::envelope::Envelope).
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Network error")]
    Network(#[source] reqwest::Error),
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error("Unexpected response from server")]
    Decode(#[source] serde_json::Error),
    #[error("Not authenticated")]
    NotAuthenticated,
    #[error("No company found")]
    NoCompany,
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),
    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ClientError {
    /// HTTP status of a rejected request, if the backend answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Corrupt session data: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ClientError>;
