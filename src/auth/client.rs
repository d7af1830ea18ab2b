//! Auth endpoint client: login, token refresh, logout, password recovery.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::config::Config;
use crate::error::AuthError;
use crate::session::PortalUser;

/// Auth endpoint paths. These must succeed unauthenticated and are exempt
/// from bearer attachment and the 401 refresh flow.
pub const LOGIN_PATH: &str = "/auth/login";
pub const REFRESH_PATH: &str = "/auth/refresh-token";
pub const LOGOUT_PATH: &str = "/auth/logout";
pub const FORGOT_PASSWORD_PATH: &str = "/auth/forgot-password";
pub const RESET_PASSWORD_PATH: &str = "/auth/reset-password";

/// HTTP request timeout.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);
/// HTTP connection timeout.
const HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Login form payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub user_name: String,
    pub password: String,
}

/// Token pair issued by login and refresh.
///
/// Refresh responses may omit the rotated refresh token and the user
/// record; callers keep the previous values then.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub user: Option<PortalUser>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

#[derive(Serialize)]
struct ForgotPasswordRequest<'a> {
    email: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResetPasswordRequest<'a> {
    token: &'a str,
    new_password: &'a str,
}

/// Client for the unauthenticated auth endpoints.
pub struct AuthClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl AuthClient {
    /// Create a new auth client from configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .connect_timeout(HTTP_CONNECT_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            base_url: config.api_base().to_string(),
            http_client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Exchange credentials for a token pair.
    pub async fn login(&self, credentials: &Credentials) -> Result<TokenPair, AuthError> {
        let response = self
            .http_client
            .post(self.endpoint(LOGIN_PATH))
            .json(credentials)
            .send()
            .await
            .map_err(|e| AuthError::LoginRejected(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Login failed: HTTP {} - {}", status, body);
            let message =
                error_message(&body).unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            return Err(AuthError::LoginRejected(message));
        }

        response
            .json()
            .await
            .map_err(|e| AuthError::LoginRejected(e.to_string()))
    }

    /// Exchange a refresh token for a new token pair.
    ///
    /// `RefreshRejected` means the refresh credential itself is dead
    /// (HTTP 400/401, or an invalid/expired message in the body) and the
    /// session must be torn down. Any other failure is transient: the
    /// caller keeps the session.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let response = self
            .http_client
            .post(self.endpoint(REFRESH_PATH))
            .json(&RefreshRequest { refresh_token })
            .send()
            .await
            .map_err(|e| AuthError::RefreshFailed(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| AuthError::RefreshFailed(e.to_string()));
        }

        let body = response.text().await.unwrap_or_default();
        error!("Token refresh failed: HTTP {} - {}", status, body);

        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
            return Err(AuthError::RefreshRejected);
        }
        if error_message(&body)
            .map(|m| is_rejection_message(&m))
            .unwrap_or(false)
        {
            return Err(AuthError::RefreshRejected);
        }

        Err(AuthError::RefreshFailed(format!("HTTP {}", status.as_u16())))
    }

    /// Best-effort server-side session invalidation. Local sign-out does
    /// not depend on the outcome.
    pub async fn logout(&self, access_token: &str) {
        let result = self
            .http_client
            .post(self.endpoint(LOGOUT_PATH))
            .bearer_auth(access_token)
            .send()
            .await;

        match result {
            Ok(r) if r.status().is_success() => debug!("Server-side logout acknowledged"),
            Ok(r) => debug!("Server-side logout returned HTTP {}", r.status()),
            Err(e) => debug!("Server-side logout failed: {}", e),
        }
    }

    /// Request a password-recovery mail.
    pub async fn forgot_password(&self, email: &str) -> Result<(), AuthError> {
        let response = self
            .http_client
            .post(self.endpoint(FORGOT_PASSWORD_PATH))
            .json(&ForgotPasswordRequest { email })
            .send()
            .await
            .map_err(|e| AuthError::PasswordRecoveryFailed(e.to_string()))?;

        check_recovery_status(response).await
    }

    /// Redeem a recovery token for a new password.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), AuthError> {
        let response = self
            .http_client
            .post(self.endpoint(RESET_PASSWORD_PATH))
            .json(&ResetPasswordRequest {
                token,
                new_password,
            })
            .send()
            .await
            .map_err(|e| AuthError::PasswordRecoveryFailed(e.to_string()))?;

        check_recovery_status(response).await
    }
}

async fn check_recovery_status(response: reqwest::Response) -> Result<(), AuthError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }

    let body = response.text().await.unwrap_or_default();
    error!("Password recovery failed: HTTP {} - {}", status, body);
    let message = error_message(&body).unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
    Err(AuthError::PasswordRecoveryFailed(message))
}

/// Pull a human-readable message out of an error body.
///
/// The backend is inconsistent here: some endpoints answer
/// `{"message": ...}`, others `{"error": ...}`.
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .or_else(|| value.get("error"))
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

/// Whether a refresh error message indicates a dead refresh credential.
fn is_rejection_message(message: &str) -> bool {
    let message = message.to_lowercase();
    message.contains("invalid") || message.contains("expired")
}
