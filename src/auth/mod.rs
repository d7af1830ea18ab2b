//! Authentication endpoints.
//!
//! The auth client talks to the backend with its own plain HTTP client,
//! outside the intercepted pipeline, so a refresh can never recurse
//! through the 401 handler.

pub mod client;

pub use client::{
    AuthClient, Credentials, TokenPair, FORGOT_PASSWORD_PATH, LOGIN_PATH, LOGOUT_PATH,
    REFRESH_PATH, RESET_PASSWORD_PATH,
};
