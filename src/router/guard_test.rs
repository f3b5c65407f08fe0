use super::*;

use crate::router::test_helpers::{MockApi, Verdict};
use crate::router::{RouteName, RouteParams};
use crate::session::MemorySession;

fn home() -> RouteMatch {
    RouteMatch { name: RouteName::Home, path: "/home".into(), params: RouteParams::new() }
}

fn guard(token: Option<&str>, verdict: Verdict) -> (RequireAuth, Arc<MemorySession>, Arc<MockApi>) {
    let session = Arc::new(token.map_or_else(MemorySession::new, MemorySession::with_token));
    let api = Arc::new(MockApi::new(verdict));
    (RequireAuth::new(session.clone(), api.clone()), session, api)
}

fn login_redirect() -> GuardOutcome {
    GuardOutcome::Redirect(LOGIN_PATH.to_owned())
}

// =============================================================================
// No token
// =============================================================================

#[tokio::test]
async fn missing_token_redirects_without_network() {
    let (guard, _session, api) = guard(None, Verdict::Accept);
    assert_eq!(guard.check(&home(), None).await, login_redirect());
    assert_eq!(api.verify_calls(), 0);
}

#[tokio::test]
async fn empty_token_counts_as_missing() {
    let (guard, _session, api) = guard(Some(""), Verdict::Accept);
    assert_eq!(guard.check(&home(), None).await, login_redirect());
    assert_eq!(api.verify_calls(), 0);
}

// =============================================================================
// Token present
// =============================================================================

#[tokio::test]
async fn accepted_token_proceeds_and_is_kept() {
    let (guard, session, api) = guard(Some("tok-1"), Verdict::Accept);
    assert_eq!(guard.check(&home(), None).await, GuardOutcome::Proceed);
    assert_eq!(api.tokens(), vec!["tok-1".to_owned()]);
    assert_eq!(session.get_item(AUTH_TOKEN_KEY).as_deref(), Some("tok-1"));
}

#[tokio::test]
async fn rejected_token_is_evicted_and_redirects() {
    let (guard, session, api) = guard(Some("tok-1"), Verdict::Reject);
    assert_eq!(guard.check(&home(), None).await, login_redirect());
    assert_eq!(api.verify_calls(), 1);
    assert!(session.get_item(AUTH_TOKEN_KEY).is_none());
}

#[tokio::test]
async fn network_failure_is_treated_as_rejection() {
    let (guard, session, api) = guard(Some("tok-1"), Verdict::Unreachable);
    assert_eq!(guard.check(&home(), None).await, login_redirect());
    assert_eq!(api.verify_calls(), 1);
    assert!(session.get_item(AUTH_TOKEN_KEY).is_none());
}

#[tokio::test]
async fn verification_is_not_cached_between_checks() {
    let (guard, _session, api) = guard(Some("tok-1"), Verdict::Accept);
    let to = home();
    guard.check(&to, None).await;
    guard.check(&to, Some(&to)).await;
    assert_eq!(api.verify_calls(), 2);
}

#[tokio::test]
async fn concurrent_rejections_both_redirect() {
    let (guard, session, api) = guard(Some("tok-1"), Verdict::Reject);
    let to = home();
    let (a, b) = tokio::join!(guard.check(&to, None), guard.check(&to, None));
    assert_eq!(a, login_redirect());
    assert_eq!(b, login_redirect());
    // The second check may or may not still see the token.
    assert!((1..=2).contains(&api.verify_calls()));
    assert!(session.get_item(AUTH_TOKEN_KEY).is_none());
}
