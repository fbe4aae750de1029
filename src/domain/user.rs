use crate::domain::session::Role;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A user record as the backend returned it.
///
/// The backend gives no schema guarantee, so the object is kept verbatim and
/// the fields the client relies on are read through accessors.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserProfile {
    fields: Map<String, Value>,
}

impl UserProfile {
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }

    /// The user id rendered as a string; numeric ids are accepted too.
    #[must_use]
    pub fn id(&self) -> Option<String> {
        match self.fields.get("id")? {
            Value::String(id) => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.str_field("email")
    }

    #[must_use]
    pub fn first_name(&self) -> Option<&str> {
        self.str_field("firstName")
    }

    #[must_use]
    pub fn last_name(&self) -> Option<&str> {
        self.str_field("lastName")
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.str_field("userRole").map(Role::from)
    }

    /// Whether the record carries a usable `company` entry.
    #[must_use]
    pub fn has_company(&self) -> bool {
        match self.fields.get("company") {
            None | Some(Value::Null | Value::Bool(false)) => false,
            Some(Value::String(s)) => !s.is_empty(),
            Some(_) => true,
        }
    }

    #[must_use]
    pub fn company(&self) -> Option<CompanySummary> {
        let company = self.fields.get("company")?;
        serde_json::from_value(company.clone()).ok()
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }
}

/// The company embedded in an employer's login profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySummary {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_verified: Option<bool>,
}
