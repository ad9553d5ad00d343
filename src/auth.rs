//! Session login for the prediction service. The predict routes reject
//! requests without a session cookie, so a client logs in first.

use crate::{Error, Result, client::HttpPredictionClient};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

impl HttpPredictionClient {
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        debug!("Logging in as {}", email);

        let response = self.post_auth("/login", &request).await?;
        info!("Logged in as {}", email);
        Ok(response)
    }

    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Result<AuthResponse> {
        let request = SignupRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        debug!("Creating account for {}", email);

        let response = self.post_auth("/signup", &request).await?;
        info!("Account created for {}", email);
        Ok(response)
    }

    /// Ends the server session. The page the server redirects to is discarded.
    pub async fn logout(&self) -> Result<()> {
        let response = self.http().get(self.url("/logout")).send().await?;
        debug!("Logout returned {}", response.status());
        Ok(())
    }

    async fn post_auth<T: Serialize>(&self, path: &str, request: &T) -> Result<AuthResponse> {
        let response = self.http().post(self.url(path)).json(request).send().await?;
        let status = response.status();

        let body = response.bytes().await?;
        let auth: AuthResponse =
            serde_json::from_slice(&body).map_err(|e| Error::invalid_json(e.to_string()))?;

        if !auth.success {
            warn!("{} rejected ({}): {}", path, status, auth.message);
            return Err(Error::auth(auth.message));
        }

        Ok(auth)
    }
}
