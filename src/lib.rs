//! policyport - API client and session layer for the insurance-policy portal.
//!
//! The crate owns everything beneath the portal's rendering layer: the
//! authenticated request pipeline with single-shot token refresh, the
//! injectable session store, and typed clients for the portal's REST
//! resources. Rendering, forms, and widgets live in the embedding UI.

#![deny(clippy::all)]

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod locale;
pub mod routes;
pub mod session;

pub use auth::{AuthClient, Credentials};
pub use config::Config;
pub use error::{ApiError, AuthError, PortalError, SessionError};
pub use http::{Navigator, NoopNavigator, PortalClient, RequestContext};
pub use locale::Locale;
pub use session::{FileStore, MemoryStore, PortalUser, Role, Session, SessionStore};
