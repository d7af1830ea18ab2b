//! Error types for the policyport client.
//!
//! Uses `thiserror` for library-style errors with automatic `Display` and `Error` implementations.

use thiserror::Error;

/// Top-level client error type.
#[derive(Error, Debug)]
pub enum PortalError {
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Session storage error: {0}")]
    Session(#[from] SessionError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Authentication-related errors.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Login rejected: {0}")]
    LoginRejected(String),

    #[error("Token refresh failed: {0}")]
    RefreshFailed(String),

    #[error("Refresh token invalid or expired")]
    RefreshRejected,

    #[error("No refresh token in session")]
    MissingRefreshToken,

    #[error("Password recovery failed: {0}")]
    PasswordRecoveryFailed(String),
}

/// Session storage errors.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Failed to persist session: {0}")]
    StoreFailed(String),

    #[error("Failed to read session: {0}")]
    ReadFailed(String),

    #[error("Failed to clear session: {0}")]
    ClearFailed(String),
}

/// API-related errors.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse API response: {0}")]
    ParseFailed(String),

    #[error("Unauthorized (401): Session expired")]
    Unauthorized,

    #[error("Forbidden (403): Insufficient permissions")]
    Forbidden,

    #[error("Not found (404)")]
    NotFound,

    #[error("Rate limited (429): Too many requests")]
    RateLimited,
}

impl PortalError {
    /// Returns a user-friendly message for display in the UI.
    pub fn user_message(&self) -> &str {
        match self {
            Self::Auth(AuthError::LoginRejected(_)) => "Sign-in failed. Check your credentials.",
            Self::Auth(AuthError::RefreshRejected) | Self::Auth(AuthError::MissingRefreshToken) => {
                "Session expired. Please sign in again."
            }
            Self::Auth(AuthError::RefreshFailed(_)) => {
                "Could not renew your session. Please try again."
            }
            Self::Auth(AuthError::PasswordRecoveryFailed(_)) => {
                "Password recovery failed. Please try again."
            }
            Self::Session(_) => "Failed to save your session.",
            Self::Api(ApiError::Unauthorized) => "Session expired. Please sign in again.",
            Self::Api(ApiError::Forbidden) => "Insufficient permissions for this operation.",
            Self::Api(ApiError::NotFound) => "The requested record was not found.",
            Self::Api(ApiError::RateLimited) => "Too many requests. Please wait a moment.",
            Self::Network(_) => "Network error. Check your connection.",
            Self::Config(_) => "Configuration error. Please check settings.",
            _ => "An error occurred. Please try again.",
        }
    }

    /// Returns true if this error should force a sign-out.
    ///
    /// A plain 403 never qualifies: forbidden is an authorization outcome,
    /// not an authentication one, and must leave the session alone.
    pub fn requires_sign_out(&self) -> bool {
        matches!(
            self,
            Self::Auth(AuthError::RefreshRejected)
                | Self::Auth(AuthError::MissingRefreshToken)
                | Self::Api(ApiError::Unauthorized)
        )
    }
}
