use async_trait::async_trait;
use managersol_application::AuthGateway;
use managersol_core::{AppError, AppResult, Principal};
use serde::Serialize;
use tracing::debug;

/// HTTP adapter for the backend login endpoint.
pub struct HttpAuthGateway {
    http_client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

impl HttpAuthGateway {
    /// Creates an auth gateway bound to a backend.
    #[must_use]
    pub fn new(http_client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn login(&self, email: &str, password: &str) -> AppResult<Principal> {
        let response = self
            .http_client
            .post(format!("{}/auth/login", self.base_url))
            .json(&LoginRequest { email, password })
            .send()
            .await
            .map_err(|error| AppError::Transport(format!("login request failed: {error}")))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AppError::Unauthorized("invalid credentials".to_owned()));
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<response body unavailable>".to_owned());
            return Err(AppError::Transport(format!(
                "login failed with status {status}: {body}"
            )));
        }

        let principal: Principal = response.json().await.map_err(|error| {
            AppError::Transport(format!("login returned a malformed principal: {error}"))
        })?;
        debug!(principal_id = %principal.id(), role = principal.role().as_str(), "login succeeded");
        Ok(principal)
    }
}
