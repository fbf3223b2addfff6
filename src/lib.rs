//! fyp-panel — learning-management admin panel client core and static host.
//!
//! The library owns the panel's session machinery and API plumbing: the
//! persisted credential record, the auth session lifecycle, route guarding,
//! role normalization, the GraphQL transports (HTTP + websocket
//! subscriptions), feed state, and role-gated menu construction. The binary
//! serves the panel's build output with SPA fallback routing.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use fyp_panel::auth::guard;
//! use fyp_panel::auth::session::AuthSession;
//! use fyp_panel::auth::store::CredentialStore;
//! use fyp_panel::net::graphql::{GraphQlClient, GraphQlConfig};
//!
//! # fn main() {
//! let store = CredentialStore::new("/var/lib/fyp-panel");
//! let config = GraphQlConfig::from_env().expect("GRAPHQL_HTTP_URL and GRAPHQL_WS_URL required");
//! let api = Arc::new(GraphQlClient::new(config, store.clone()));
//!
//! let session = AuthSession::new(store, api);
//! session.bootstrap();
//!
//! let outcome = guard::evaluate(guard::policy_for("/admin"), &session.snapshot());
//! println!("{outcome:?}");
//! # }
//! ```

pub mod auth;
pub mod menu;
pub mod net;
pub mod routes;
pub mod state;
