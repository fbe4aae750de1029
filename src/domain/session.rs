use crate::domain::user::UserProfile;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classifies a user for display and routing. The backend, not the client, enforces access.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Employer,
    Employee,
    Other(String),
}

impl Role {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Employer => "EMPLOYER",
            Self::Employee => "EMPLOYEE",
            Self::Other(raw) => raw,
        }
    }
}

impl From<&str> for Role {
    fn from(raw: &str) -> Self {
        match raw {
            "EMPLOYER" => Self::Employer,
            "EMPLOYEE" => Self::Employee,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The persisted session record.
///
/// Written wholesale on sign-in, read fresh by every authenticated call and
/// removed wholesale on logout. Nothing tracks token expiry; an expired token
/// surfaces as a rejected request.
#[derive(Clone, PartialEq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub logged_in: bool,
    pub user_id: Option<String>,
    pub role: Option<Role>,
    pub user: Option<UserProfile>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .field("logged_in", &self.logged_in)
            .field("user_id", &self.user_id)
            .field("role", &self.role)
            .field("user", &self.user)
            .finish()
    }
}
