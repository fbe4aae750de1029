use crate::config::ApiProfile;
use uuid::Uuid;

pub const LOGIN_PATH: &str = "/login/";
pub const LOGIN_REFRESH_PATH: &str = "/login/refresh/";
pub const LOGOUT_PATH: &str = "/logout/";
pub const REGISTER_PATH: &str = "/register/";
pub const USERS_PATH: &str = "/users/";

impl ApiProfile {
    const fn resource_prefix(self) -> &'static str {
        match self {
            Self::Current => "/api",
            Self::Legacy => "",
        }
    }

    #[must_use]
    pub fn tasks_path(self) -> String {
        format!("{}/tasks/", self.resource_prefix())
    }

    #[must_use]
    pub fn my_tasks_path(self) -> String {
        format!("{}/tasks/my-tasks/", self.resource_prefix())
    }

    #[must_use]
    pub fn company_tasks_path(self) -> String {
        format!("{}/tasks/company-tasks/", self.resource_prefix())
    }

    #[must_use]
    pub fn task_path(self, id: Uuid) -> String {
        format!("{}/tasks/{id}/", self.resource_prefix())
    }

    #[must_use]
    pub fn task_status_path(self, id: Uuid) -> String {
        format!("{}/tasks/{id}/update-status/", self.resource_prefix())
    }

    #[must_use]
    pub const fn my_company_path(self) -> &'static str {
        match self {
            Self::Current => "/api/companies/my-company/",
            Self::Legacy => "/companies/my_company/",
        }
    }

    /// Whether `register` follows up with a login using the same credentials.
    #[must_use]
    pub const fn signs_in_after_registration(self) -> bool {
        matches!(self, Self::Legacy)
    }
}
