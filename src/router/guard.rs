//! Navigation guards.
//!
//! A guard runs before a route activates and either lets the navigation
//! through or redirects it. Every protected route uses [`RequireAuth`].

use std::sync::Arc;

use async_trait::async_trait;

use super::RouteMatch;
use crate::net::api::BlogApi;
use crate::session::{AUTH_TOKEN_KEY, SessionStorage, auth_token};

/// Where unauthenticated navigations are sent.
pub const LOGIN_PATH: &str = "/loginsignup";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    Proceed,
    Redirect(String),
}

#[async_trait]
pub trait Guard: Send + Sync {
    /// Decide whether navigation from `from` to `to` may continue.
    async fn check(&self, to: &RouteMatch, from: Option<&RouteMatch>) -> GuardOutcome;
}

/// Requires a session token the server still accepts.
///
/// No token: redirect without touching the network. Token present: one
/// verification request. Any failure evicts the token and redirects. Results
/// are not cached between navigations and failures are not retried.
pub struct RequireAuth {
    session: Arc<dyn SessionStorage>,
    api: Arc<dyn BlogApi>,
}

impl RequireAuth {
    #[must_use]
    pub fn new(session: Arc<dyn SessionStorage>, api: Arc<dyn BlogApi>) -> Self {
        Self { session, api }
    }
}

#[async_trait]
impl Guard for RequireAuth {
    async fn check(&self, to: &RouteMatch, _from: Option<&RouteMatch>) -> GuardOutcome {
        let Some(token) = auth_token(self.session.as_ref()) else {
            tracing::debug!(route = %to.name, "no session token");
            return GuardOutcome::Redirect(LOGIN_PATH.to_owned());
        };

        match self.api.verify_token(&token).await {
            Ok(()) => GuardOutcome::Proceed,
            Err(e) => {
                tracing::warn!(route = %to.name, error = %e, "session token rejected");
                self.session.remove_item(AUTH_TOKEN_KEY);
                GuardOutcome::Redirect(LOGIN_PATH.to_owned())
            }
        }
    }
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
