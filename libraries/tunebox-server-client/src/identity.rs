//! Current-user lookup for a Tunebox server.

use crate::catalog::endpoint;
use crate::client::{error_for_response, send_error};
use crate::error::{Result, ServerClientError};
use crate::types::ServerUser;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

/// Identity client.
pub struct IdentityClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    access_token: Option<&'a str>,
}

impl<'a> IdentityClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, access_token: Option<&'a str>) -> Self {
        Self {
            http,
            base_url,
            access_token,
        }
    }

    /// Get the signed-in user.
    ///
    /// Returns `None` without a token, or when the server rejects the token.
    pub async fn me(&self) -> Result<Option<ServerUser>> {
        let Some(token) = self.access_token else {
            debug!("No access token, browsing anonymously");
            return Ok(None);
        };

        let url = endpoint(self.base_url, &["api", "users", "me"])?;
        debug!(url = %url, "Fetching current user");

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(send_error)?;

        let status = response.status();

        if status.is_success() {
            let user: ServerUser = response.json().await.map_err(|e| {
                ServerClientError::ParseError(format!("Failed to parse user response: {}", e))
            })?;

            debug!(user_id = %user.id, role = ?user.role, "Fetched current user");
            Ok(Some(user))
        } else if status == StatusCode::UNAUTHORIZED {
            warn!("Access token rejected, continuing anonymously");
            Ok(None)
        } else {
            Err(error_for_response(response).await)
        }
    }
}
