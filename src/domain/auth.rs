use crate::domain::session::{Role, Session};
use crate::domain::user::UserProfile;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Serialize)]
pub(crate) struct Credentials<'a> {
    pub(crate) email: &'a str,
    pub(crate) password: &'a str,
}

#[derive(Serialize)]
pub(crate) struct RefreshRequest<'a> {
    pub(crate) refresh: &'a str,
}

/// Sign-up payload for `POST /register/`. Employers may pass company details.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub user_role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_document: Option<String>,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("user_role", &self.user_role)
            .field("company_name", &self.company_name)
            .finish_non_exhaustive()
    }
}

/// Body of a successful `POST /login/`.
///
/// Newer backends send the full `user`; older ones only a `user_id`.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginData {
    pub access: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Value>,
}

impl LoginData {
    /// The session record a successful login produces.
    #[must_use]
    pub fn to_session(&self) -> Session {
        let user_id = self.user.as_ref().and_then(UserProfile::id).or_else(|| match &self.user_id {
            Some(Value::String(id)) => Some(id.clone()),
            Some(Value::Number(id)) => Some(id.to_string()),
            _ => None,
        });

        Session {
            access_token: self.access.clone(),
            refresh_token: self.refresh.clone(),
            logged_in: true,
            user_id,
            role: self.user.as_ref().and_then(UserProfile::role),
            user: self.user.clone(),
        }
    }
}

impl fmt::Debug for LoginData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginData")
            .field("access", &"<redacted>")
            .field("refresh", &self.refresh.as_ref().map(|_| "<redacted>"))
            .field("user", &self.user)
            .field("user_id", &self.user_id)
            .finish()
    }
}

/// Body of a successful `POST /login/refresh/`. The refresh token is only
/// present when the backend rotates it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh: Option<String>,
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair").field("rotated", &self.refresh.is_some()).finish_non_exhaustive()
    }
}

/// What `register` produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RegistrationOutcome {
    /// The account exists; the caller still has to sign in.
    Registered(Value),
    /// The account exists and the follow-up login stored a session.
    SignedIn(LoginData),
    /// The account exists but the follow-up login was rejected.
    PendingLogin(Value),
}

impl RegistrationOutcome {
    #[must_use]
    pub const fn message(&self) -> Option<&'static str> {
        match self {
            Self::PendingLogin(_) => Some("Registration successful. Please log in."),
            Self::Registered(_) | Self::SignedIn(_) => None,
        }
    }
}
