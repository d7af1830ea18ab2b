//! Authenticated request pipeline.
//!
//! Every API call runs through three steps threaded over a
//! [`RequestContext`]: attach-auth (bearer from the session store, unless
//! the endpoint is auth-exempt), handle-401 (one token refresh, one
//! resubmit), and status mapping (403 and friends onto the error
//! taxonomy). Refreshes for concurrent 401s are coalesced behind a lock;
//! a request that waited for another request's refresh reuses the rotated
//! token instead of spending a second refresh call.

pub mod context;

pub use context::RequestContext;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::auth::{AuthClient, Credentials};
use crate::config::Config;
use crate::error::{ApiError, AuthError, PortalError};
use crate::locale::Locale;
use crate::routes;
use crate::session::{PortalUser, Session, SessionStore};

/// Redirect seam. The embedding runtime decides what navigation means:
/// a browser shim rewrites `window.location`, tests record the target.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Navigator that drops redirects, for headless embedders.
#[derive(Debug, Default)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn navigate(&self, _path: &str) {}
}

/// Authenticated API client.
///
/// Holds the intercepted HTTP client, the session store, and the plain
/// [`AuthClient`] used for refresh calls so those never re-enter the
/// pipeline.
pub struct PortalClient {
    http_client: reqwest::Client,
    base_url: String,
    auth: AuthClient,
    store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    locale: Locale,
    /// Serializes refresh attempts across concurrent 401s.
    refresh_lock: Mutex<()>,
}

impl PortalClient {
    /// Create a new client from configuration.
    pub fn new(
        config: &Config,
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.api.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.api.connect_timeout_seconds))
            .build()?;

        Ok(Self {
            http_client,
            base_url: config.api_base().to_string(),
            auth: AuthClient::new(config)?,
            store,
            navigator,
            locale: config.portal.default_locale,
            refresh_lock: Mutex::new(()),
        })
    }

    /// Set the locale used for redirect targets.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// The underlying auth client, for password recovery flows that do
    /// not need the pipeline.
    pub fn auth(&self) -> &AuthClient {
        &self.auth
    }

    /// The current session, if any.
    pub fn session(&self) -> Result<Option<Session>, PortalError> {
        Ok(self.store.get()?)
    }

    /// Authenticate and persist the resulting session.
    pub async fn login(&self, credentials: &Credentials) -> Result<PortalUser, PortalError> {
        let pair = self.auth.login(credentials).await?;
        let user = pair
            .user
            .ok_or_else(|| AuthError::LoginRejected("login response missing user".into()))?;

        let session = Session::new(pair.access_token, pair.refresh_token, user.clone());
        self.store.set(&session)?;

        info!(user = %user.user_name, "signed in");
        Ok(user)
    }

    /// Best-effort server-side logout, then clear the local session.
    pub async fn logout(&self) -> Result<(), PortalError> {
        if let Some(session) = self.store.get()? {
            self.auth.logout(&session.access_token).await;
        }
        self.store.clear()?;
        info!("signed out");
        Ok(())
    }

    /// Run one request through the full pipeline.
    pub async fn execute(
        &self,
        mut ctx: RequestContext,
        body: Option<serde_json::Value>,
    ) -> Result<Response, PortalError> {
        self.attach_auth(&mut ctx)?;

        debug!(request_id = %ctx.id, method = %ctx.method, path = %ctx.path, "dispatching request");
        let response = self.send_once(&ctx, body.as_ref()).await?;

        if response.status() == StatusCode::UNAUTHORIZED
            && !ctx.is_auth_exempt()
            && !ctx.retried()
        {
            ctx.mark_retried();
            debug!(request_id = %ctx.id, path = %ctx.path, "401 received, attempting token refresh");

            let access_token = self.refresh_session(&ctx).await?;
            ctx.bearer = Some(access_token);

            debug!(request_id = %ctx.id, "resubmitting request with refreshed token");
            let retry = self.send_once(&ctx, body.as_ref()).await?;
            return into_result(retry).await;
        }

        into_result(response).await
    }

    /// Attach-auth step: bearer from the store, unless the endpoint is
    /// exempt. No side effects beyond the context.
    fn attach_auth(&self, ctx: &mut RequestContext) -> Result<(), PortalError> {
        if ctx.is_auth_exempt() {
            return Ok(());
        }
        if let Some(session) = self.store.get()? {
            ctx.bearer = Some(session.access_token.clone());
        }
        Ok(())
    }

    /// One transport attempt for the context's current state.
    async fn send_once(
        &self,
        ctx: &RequestContext,
        body: Option<&serde_json::Value>,
    ) -> Result<Response, PortalError> {
        let url = format!("{}{}", self.base_url, ctx.path);
        let mut request = self.http_client.request(ctx.method.clone(), &url);

        if let Some(bearer) = &ctx.bearer {
            request = request.bearer_auth(bearer);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        Ok(request.send().await?)
    }

    /// Handle-401 step: refresh the session and return the access token to
    /// retry with.
    ///
    /// On a dead refresh credential (or no credential at all) the session
    /// is cleared, the navigator is pointed at the login route, and the
    /// original 401 is surfaced. On a transient refresh failure the
    /// session is left intact and the original 401 is surfaced.
    async fn refresh_session(&self, ctx: &RequestContext) -> Result<String, PortalError> {
        let _guard = self.refresh_lock.lock().await;

        let session = match self.store.get()? {
            Some(session) => session,
            None => {
                warn!(request_id = %ctx.id, "401 with no session, forcing login");
                self.force_login()?;
                return Err(ApiError::Unauthorized.into());
            }
        };

        // Another request may have rotated the tokens while this one
        // waited on the lock.
        if let Some(bearer) = &ctx.bearer {
            if session.access_token != *bearer {
                debug!(request_id = %ctx.id, "token already rotated by a concurrent refresh");
                return Ok(session.access_token.clone());
            }
        }

        let refresh_token = match &session.refresh_token {
            Some(token) => token.clone(),
            None => {
                warn!(request_id = %ctx.id, "no refresh token in session, forcing login");
                self.force_login()?;
                return Err(ApiError::Unauthorized.into());
            }
        };

        match self.auth.refresh(&refresh_token).await {
            Ok(pair) => {
                let mut updated = session.clone();
                updated.rotate(pair.access_token, pair.refresh_token, pair.user);
                self.store.set(&updated)?;
                info!(request_id = %ctx.id, "access token refreshed");
                Ok(updated.access_token.clone())
            }
            Err(AuthError::RefreshRejected) => {
                warn!(request_id = %ctx.id, "refresh token rejected, forcing login");
                self.force_login()?;
                Err(ApiError::Unauthorized.into())
            }
            Err(e) => {
                warn!(request_id = %ctx.id, error = %e, "token refresh failed, session left intact");
                Err(ApiError::Unauthorized.into())
            }
        }
    }

    /// Clear the session and send the user to the locale-qualified login
    /// route.
    fn force_login(&self) -> Result<(), PortalError> {
        self.store.clear()?;
        self.navigator.navigate(&routes::login_path(self.locale));
        Ok(())
    }

    /// GET a JSON resource.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, PortalError> {
        let ctx = RequestContext::new(Method::GET, path);
        let response = self.execute(ctx, None).await?;
        parse_json(response).await
    }

    /// POST a JSON body, expecting a JSON response.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, PortalError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let ctx = RequestContext::new(Method::POST, path);
        let body = to_body(body)?;
        let response = self.execute(ctx, Some(body)).await?;
        parse_json(response).await
    }

    /// POST without a body, expecting a JSON response.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, PortalError> {
        let ctx = RequestContext::new(Method::POST, path);
        let response = self.execute(ctx, None).await?;
        parse_json(response).await
    }

    /// PUT a JSON body, expecting a JSON response.
    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, PortalError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let ctx = RequestContext::new(Method::PUT, path);
        let body = to_body(body)?;
        let response = self.execute(ctx, Some(body)).await?;
        parse_json(response).await
    }

    /// DELETE a resource, ignoring any response body.
    pub async fn delete(&self, path: &str) -> Result<(), PortalError> {
        let ctx = RequestContext::new(Method::DELETE, path);
        self.execute(ctx, None).await?;
        Ok(())
    }
}

fn to_body<B: Serialize + ?Sized>(body: &B) -> Result<serde_json::Value, PortalError> {
    serde_json::to_value(body).map_err(|e| ApiError::RequestFailed(e.to_string()).into())
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, PortalError> {
    response
        .json()
        .await
        .map_err(|e| ApiError::ParseFailed(e.to_string()).into())
}

/// Map error statuses onto the API error taxonomy. 2xx passes through.
async fn into_result(response: Response) -> Result<Response, PortalError> {
    let status = response.status();
    match status.as_u16() {
        200..=299 => Ok(response),
        401 => Err(ApiError::Unauthorized.into()),
        403 => Err(ApiError::Forbidden.into()),
        404 => Err(ApiError::NotFound.into()),
        429 => Err(ApiError::RateLimited.into()),
        _ => {
            let body = response.text().await.unwrap_or_default();
            error!("API request failed: HTTP {} - {}", status, body);
            Err(ApiError::RequestFailed(format!("HTTP {}", status.as_u16())).into())
        }
    }
}
