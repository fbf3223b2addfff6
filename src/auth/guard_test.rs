use super::*;

use crate::auth::role::RoleName;
use crate::net::types::Identity;

// =============================================================================
// TEST HELPERS
// =============================================================================

fn identity(id: &str, role: &str) -> Identity {
    Identity {
        id: id.to_owned(),
        name: "Alice".to_owned(),
        email: None,
        username: None,
        role: Some(RoleName::normalize(role)),
    }
}

fn snapshot(identity_token: Option<(Identity, &str)>, is_initialising: bool) -> SessionSnapshot {
    let (identity, token) = match identity_token {
        Some((identity, token)) => (Some(identity), Some(token.to_owned())),
        None => (None, None),
    };
    SessionSnapshot { identity, token, is_loading: false, is_initialising, error: None }
}

fn authed() -> SessionSnapshot {
    snapshot(Some((identity("1", "ADMIN"), "abc")), false)
}

fn anonymous() -> SessionSnapshot {
    snapshot(None, false)
}

// =============================================================================
// Decision table
// =============================================================================

#[test]
fn authenticated_route_renders_with_session() {
    assert_eq!(evaluate(RoutePolicy::Authenticated, &authed()), GuardOutcome::Render);
}

#[test]
fn authenticated_route_redirects_without_session() {
    assert_eq!(evaluate(RoutePolicy::Authenticated, &anonymous()), GuardOutcome::RedirectToLogin);
}

#[test]
fn public_only_route_renders_without_session() {
    assert_eq!(evaluate(RoutePolicy::PublicOnly, &anonymous()), GuardOutcome::Render);
}

#[test]
fn public_only_route_redirects_home_with_session() {
    assert_eq!(evaluate(RoutePolicy::PublicOnly, &authed()), GuardOutcome::RedirectToHome);
}

#[test]
fn public_route_always_renders() {
    assert_eq!(evaluate(RoutePolicy::Public, &authed()), GuardOutcome::Render);
    assert_eq!(evaluate(RoutePolicy::Public, &anonymous()), GuardOutcome::Render);
}

// =============================================================================
// Suspension while initialising
// =============================================================================

#[test]
fn guarded_routes_suspend_while_initialising() {
    let initialising = snapshot(None, true);
    assert_eq!(evaluate(RoutePolicy::Authenticated, &initialising), GuardOutcome::Suspend);
    assert_eq!(evaluate(RoutePolicy::PublicOnly, &initialising), GuardOutcome::Suspend);
}

#[test]
fn guard_never_redirects_while_initialising() {
    // All policies, with and without a (possibly stale) in-memory session:
    // no outcome may be a redirect before bootstrap completes.
    let sessions = [snapshot(None, true), snapshot(Some((identity("1", "ADMIN"), "abc")), true)];
    let policies = [RoutePolicy::Public, RoutePolicy::PublicOnly, RoutePolicy::Authenticated];
    for session in &sessions {
        for policy in policies {
            let outcome = evaluate(policy, session);
            assert_ne!(outcome, GuardOutcome::RedirectToLogin, "{policy:?} redirected to login");
            assert_ne!(outcome, GuardOutcome::RedirectToHome, "{policy:?} redirected home");
        }
    }
}

#[test]
fn stale_session_still_renders_after_bootstrap() {
    // Once done, the same stale-looking snapshot resolves normally.
    assert_eq!(evaluate(RoutePolicy::Authenticated, &authed()), GuardOutcome::Render);
}

// =============================================================================
// Route table
// =============================================================================

#[test]
fn login_and_signup_are_public_only() {
    assert_eq!(policy_for("/login"), RoutePolicy::PublicOnly);
    assert_eq!(policy_for("/signup"), RoutePolicy::PublicOnly);
}

#[test]
fn guarded_subtrees_require_authentication() {
    assert_eq!(policy_for("/admin"), RoutePolicy::Authenticated);
    assert_eq!(policy_for("/admin/users"), RoutePolicy::Authenticated);
    assert_eq!(policy_for("/admin/reports"), RoutePolicy::Authenticated);
    assert_eq!(policy_for("/user"), RoutePolicy::Authenticated);
    assert_eq!(policy_for("/viewer"), RoutePolicy::Authenticated);
}

#[test]
fn root_requires_authentication() {
    assert_eq!(policy_for("/"), RoutePolicy::Authenticated);
}

#[test]
fn trailing_slashes_resolve_identically() {
    assert_eq!(policy_for("/admin/"), RoutePolicy::Authenticated);
    assert_eq!(policy_for("/login/"), RoutePolicy::PublicOnly);
}

#[test]
fn prefix_matching_respects_segment_boundaries() {
    // "/administrator" is not under "/admin".
    assert_eq!(policy_for("/administrator"), RoutePolicy::Public);
}

#[test]
fn unknown_routes_are_public() {
    assert_eq!(policy_for("/about"), RoutePolicy::Public);
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn cold_start_with_stored_session_renders_admin() {
    // Bootstrap restored {id:"1", role:"ADMIN"} / "abc"; /admin renders.
    let session = snapshot(Some((identity("1", "ADMIN"), "abc")), false);
    assert_eq!(evaluate(policy_for("/admin"), &session), GuardOutcome::Render);
}

#[test]
fn cold_start_without_session_bounces_to_login() {
    let session = anonymous();
    assert_eq!(evaluate(policy_for("/admin"), &session), GuardOutcome::RedirectToLogin);
    assert_eq!(evaluate(policy_for(LOGIN_ROUTE), &session), GuardOutcome::Render);
}

#[test]
fn authenticated_visit_to_login_redirects_home() {
    assert_eq!(evaluate(policy_for(LOGIN_ROUTE), &authed()), GuardOutcome::RedirectToHome);
    assert_eq!(HOME_ROUTE, "/admin");
}
