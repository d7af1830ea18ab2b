//! Per-request context threaded through the pipeline.

use reqwest::Method;
use uuid::Uuid;

use crate::auth::{FORGOT_PASSWORD_PATH, LOGIN_PATH, REFRESH_PATH, RESET_PASSWORD_PATH};

/// Endpoints that must succeed unauthenticated. Requests to them never get
/// a bearer attached and never enter the 401 refresh flow.
const AUTH_EXEMPT: [&str; 4] = [
    LOGIN_PATH,
    REFRESH_PATH,
    FORGOT_PASSWORD_PATH,
    RESET_PASSWORD_PATH,
];

/// Transient state for one outgoing call.
#[derive(Debug)]
pub struct RequestContext {
    /// Correlation id for log lines.
    pub id: Uuid,
    pub method: Method,
    /// Path relative to the API base, query string included.
    pub path: String,
    /// Bearer token attached to the most recent attempt, if any.
    pub bearer: Option<String>,
    retried: bool,
}

impl RequestContext {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            method,
            path: path.into(),
            bearer: None,
            retried: false,
        }
    }

    /// Whether this request has already been resubmitted after a refresh.
    pub fn retried(&self) -> bool {
        self.retried
    }

    /// Mark the request as resubmitted. One-way: there is no reset, which
    /// is what bounds the pipeline to a single refresh per request.
    pub fn mark_retried(&mut self) {
        self.retried = true;
    }

    /// Whether the target endpoint is exempt from authentication.
    pub fn is_auth_exempt(&self) -> bool {
        let path = self.path.split('?').next().unwrap_or(&self.path);
        AUTH_EXEMPT.contains(&path)
    }
}
