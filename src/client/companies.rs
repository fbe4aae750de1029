use crate::client::TaskSaathiClient;
use crate::client::endpoints::USERS_PATH;
use crate::client::response::read_json;
use crate::domain::company::Company;
use crate::domain::listing::Listing;
use crate::domain::user::UserProfile;
use crate::error::{ClientError, Result};
use reqwest::Method;

impl TaskSaathiClient {
    /// The company owned by the signed-in user.
    ///
    /// # Errors
    /// `ClientError::NotAuthenticated`, `ClientError::Http` ("Failed to fetch company details"),
    /// `ClientError::Network`.
    #[tracing::instrument(skip(self), err(level = "warn"))]
    pub async fn get_company_details(&self) -> Result<Company> {
        let url = self.endpoint(self.profile.my_company_path())?;
        let request = self.authorized(Method::GET, url).await?;
        read_json(self.send(request).await?, "Failed to fetch company details").await
    }

    /// Employees visible to the signed-in user. Requires a stored profile with
    /// a company; without one nothing is sent.
    ///
    /// # Errors
    /// `ClientError::NoCompany`, `ClientError::NotAuthenticated`,
    /// `ClientError::Http` ("Failed to fetch employees"), `ClientError::Network`.
    #[tracing::instrument(skip(self), err(level = "warn"))]
    pub async fn get_company_employees(&self) -> Result<Vec<UserProfile>> {
        if !self.sessions.user().await?.is_some_and(|user| user.has_company()) {
            return Err(ClientError::NoCompany);
        }

        let mut url = self.endpoint(USERS_PATH)?;
        url.query_pairs_mut().append_pair("userRole", "EMPLOYEE");

        let request = self.authorized(Method::GET, url).await?;
        let listing: Listing<UserProfile> = read_json(self.send(request).await?, "Failed to fetch employees").await?;
        Ok(listing.into_items())
    }
}
