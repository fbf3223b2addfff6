//! Route guard — per-navigation access decisions.
//!
//! DESIGN
//! ======
//! A pure function over (policy, session snapshot). The suspend state while
//! the session is still initialising is the load-bearing part: without it, a
//! hard reload briefly has an empty in-memory session and would bounce an
//! authenticated user to the login page before the stored record is read.
//!
//! Routes gate on authentication only; role differentiation happens in menu
//! construction, not here.

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;

use crate::auth::session::SessionSnapshot;

/// Where unauthenticated access to a guarded route is sent.
pub const LOGIN_ROUTE: &str = "/login";

/// Default authenticated landing, used when a logged-in user hits a
/// public-only route.
pub const HOME_ROUTE: &str = "/admin";

// =============================================================================
// POLICY
// =============================================================================

/// Access condition attached to a route pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoutePolicy {
    /// Always render.
    Public,
    /// Render only without a session; else redirect to [`HOME_ROUTE`].
    PublicOnly,
    /// Render only with a session; else redirect to [`LOGIN_ROUTE`].
    Authenticated,
}

/// Decision produced for one navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Render the route's content.
    Render,
    /// Redirect to [`LOGIN_ROUTE`].
    RedirectToLogin,
    /// Redirect to [`HOME_ROUTE`].
    RedirectToHome,
    /// Render nothing until bootstrap completes.
    Suspend,
}

/// Evaluate a route's policy against the current session snapshot.
#[must_use]
pub fn evaluate(policy: RoutePolicy, session: &SessionSnapshot) -> GuardOutcome {
    match policy {
        RoutePolicy::Public => GuardOutcome::Render,
        // Never redirect off a possibly-stale empty session.
        _ if session.is_initialising => GuardOutcome::Suspend,
        RoutePolicy::Authenticated => {
            if session.is_authenticated() {
                GuardOutcome::Render
            } else {
                GuardOutcome::RedirectToLogin
            }
        }
        RoutePolicy::PublicOnly => {
            if session.is_authenticated() {
                GuardOutcome::RedirectToHome
            } else {
                GuardOutcome::Render
            }
        }
    }
}

// =============================================================================
// ROUTE TABLE
// =============================================================================

const PUBLIC_ONLY_ROUTES: &[&str] = &["/login", "/signup"];
const AUTHENTICATED_PREFIXES: &[&str] = &["/admin", "/user", "/viewer"];

/// Look up the access policy for a path.
///
/// `/admin`, `/user`, and `/viewer` subtrees require authentication, as does
/// the root landing; the login and signup forms are public-only; everything
/// else is public.
#[must_use]
pub fn policy_for(path: &str) -> RoutePolicy {
    let path = normalize(path);

    if path == "/" {
        return RoutePolicy::Authenticated;
    }
    if PUBLIC_ONLY_ROUTES.contains(&path) {
        return RoutePolicy::PublicOnly;
    }
    let guarded = AUTHENTICATED_PREFIXES.iter().any(|prefix| {
        path.strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    });
    if guarded {
        RoutePolicy::Authenticated
    } else {
        RoutePolicy::Public
    }
}

/// Strip trailing slashes so `/admin/` and `/admin` resolve identically.
fn normalize(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}
