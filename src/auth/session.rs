//! Auth session — the in-memory identity and its lifecycle.
//!
//! ARCHITECTURE
//! ============
//! `AuthSession` is constructed once at the application root and is the sole
//! writer of both the in-memory session record and the credential store.
//! Consumers get read-only [`SessionSnapshot`] projections; the route guard
//! bases every decision on one snapshot.
//!
//! LIFECYCLE
//! =========
//! 1. Construct → empty record, initialising
//! 2. `bootstrap()` → install persisted record if well-formed, flip the flag
//! 3. `login()` / `set_auth_data()` → populate record + store
//! 4. `logout()` → clear record + store
//!
//! The bootstrap flag flips to done exactly once per session lifetime, on
//! every code path, so a bad store read can never leave the application
//! stuck in "initialising".

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::auth::store::{CredentialStore, StoredAuth};
use crate::net::types::Identity;
use crate::net::{ApiError, AuthApi};

// =============================================================================
// STATE
// =============================================================================

/// One-shot bootstrap progression. Never moves backwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Bootstrap {
    NotStarted,
    InProgress,
    Done,
}

struct SessionInner {
    identity: Option<Identity>,
    token: Option<String>,
    is_loading: bool,
    bootstrap: Bootstrap,
    error: Option<String>,
}

/// Read-only projection of the session state at one instant.
#[derive(Clone, Debug)]
pub struct SessionSnapshot {
    /// Current identity, `None` when logged out.
    pub identity: Option<Identity>,
    /// Current bearer token. Present exactly when `identity` is present.
    pub token: Option<String>,
    /// True only while a login attempt is in flight (not during bootstrap).
    pub is_loading: bool,
    /// True until the one-time persisted-state read has completed.
    pub is_initialising: bool,
    /// Last login failure message, cleared on the next attempt.
    pub error: Option<String>,
}

impl SessionSnapshot {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }
}

// =============================================================================
// SESSION
// =============================================================================

/// Owner of the session record and the only writer of the credential store.
pub struct AuthSession {
    store: CredentialStore,
    api: Arc<dyn AuthApi>,
    inner: Mutex<SessionInner>,
}

impl AuthSession {
    #[must_use]
    pub fn new(store: CredentialStore, api: Arc<dyn AuthApi>) -> Self {
        Self {
            store,
            api,
            inner: Mutex::new(SessionInner {
                identity: None,
                token: None,
                is_loading: false,
                bootstrap: Bootstrap::NotStarted,
                error: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// One-time startup read of the credential store.
    ///
    /// Installs a well-formed `{identity, token}` pair when present;
    /// anything else leaves the empty state. The flag flips to done on every
    /// path, and repeat calls are no-ops.
    pub fn bootstrap(&self) {
        {
            let mut inner = self.lock();
            if inner.bootstrap != Bootstrap::NotStarted {
                return;
            }
            inner.bootstrap = Bootstrap::InProgress;
        }

        // Read outside the lock; the store cannot fail, only return absent.
        let loaded = self.store.read();

        let mut inner = self.lock();
        if let Some(StoredAuth { user, token: Some(token) }) = loaded {
            tracing::info!(user_id = %user.id, "session restored from stored credentials");
            inner.identity = Some(user);
            inner.token = Some(token);
        }
        inner.bootstrap = Bootstrap::Done;
    }

    /// Install `{identity, token}` after a successful external login call.
    ///
    /// Memory and store update together; a snapshot taken after this returns
    /// observes both halves.
    pub fn set_auth_data(&self, identity: Identity, token: String) {
        {
            let mut inner = self.lock();
            inner.identity = Some(identity.clone());
            inner.token = Some(token.clone());
        }
        self.store.write(&identity, &token);
    }

    /// Clear the session and the store. Idempotent, and safe to call from
    /// any error-handling path.
    pub fn logout(&self) {
        {
            let mut inner = self.lock();
            inner.identity = None;
            inner.token = None;
        }
        self.store.clear();
    }

    /// Attempt a credential login against the injected API.
    ///
    /// A failed attempt sets the user-displayable `error` and leaves any
    /// existing session untouched.
    ///
    /// # Errors
    ///
    /// Returns the transport/server error when the attempt fails.
    pub async fn login(&self, email: &str, password: &str) -> Result<Identity, ApiError> {
        {
            let mut inner = self.lock();
            inner.is_loading = true;
            inner.error = None;
        }

        match self.api.login(email, password).await {
            Ok(payload) => {
                self.set_auth_data(payload.user.clone(), payload.token);
                self.lock().is_loading = false;
                Ok(payload.user)
            }
            Err(e) => {
                tracing::warn!(error = %e, "login attempt failed");
                let mut inner = self.lock();
                inner.is_loading = false;
                inner.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Read-only view of the current state.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let inner = self.lock();
        SessionSnapshot {
            identity: inner.identity.clone(),
            token: inner.token.clone(),
            is_loading: inner.is_loading,
            is_initialising: inner.bootstrap != Bootstrap::Done,
            error: inner.error.clone(),
        }
    }
}
