//! HTTP GraphQL client and credential binding.
//!
//! DESIGN
//! ======
//! Every outgoing call reads the credential store — not the in-memory
//! session — and attaches the bearer token. Reading the store tolerates the
//! cold-start race where the transport fires before the session provider
//! has bootstrapped in-memory state. A store read failure degrades to an
//! unauthenticated call; credential attachment can never fail a request.

#[cfg(test)]
#[path = "graphql_test.rs"]
mod tests;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::auth::store::CredentialStore;
use crate::net::types::{Activity, Identity, LoginPayload, Notification};
use crate::net::{ApiError, AuthApi, operations};

// =============================================================================
// CONFIG
// =============================================================================

/// GraphQL endpoint configuration.
#[derive(Clone, Debug)]
pub struct GraphQlConfig {
    /// Query/mutation endpoint, e.g. `https://api.example.com/graphql`.
    pub http_url: String,
    /// Subscription endpoint, e.g. `wss://api.example.com/graphql`.
    pub ws_url: String,
}

impl GraphQlConfig {
    /// Load from `GRAPHQL_HTTP_URL` and `GRAPHQL_WS_URL`.
    /// Returns `None` if either is missing (API access disabled).
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let http_url = std::env::var("GRAPHQL_HTTP_URL").ok()?;
        let ws_url = std::env::var("GRAPHQL_WS_URL").ok()?;
        Some(Self { http_url, ws_url })
    }
}

// =============================================================================
// ENVELOPE
// =============================================================================

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<serde_json::Value>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

// =============================================================================
// CLIENT
// =============================================================================

/// Bearer header value for the current stored credentials. Empty when no
/// token is stored or the store is unreadable.
pub(crate) fn bearer_value(store: &CredentialStore) -> String {
    store
        .read()
        .and_then(|record| record.token)
        .map(|token| format!("Bearer {token}"))
        .unwrap_or_default()
}

/// GraphQL query/mutation client over HTTP.
pub struct GraphQlClient {
    http: reqwest::Client,
    config: GraphQlConfig,
    store: CredentialStore,
}

impl GraphQlClient {
    #[must_use]
    pub fn new(config: GraphQlConfig, store: CredentialStore) -> Self {
        Self { http: reqwest::Client::new(), config, store }
    }

    /// Execute one operation and return the `data` object.
    ///
    /// # Errors
    ///
    /// `Transport` when the request never completes, `Server` for non-2xx
    /// statuses or GraphQL `errors`, `Decode` for an unreadable envelope.
    pub async fn execute(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<serde_json::Value, ApiError> {
        let resp = self
            .http
            .post(&self.config.http_url)
            .header(reqwest::header::AUTHORIZATION, bearer_value(&self.store))
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Server(format!("{status}: {body}")));
        }

        let envelope: Envelope = resp.json().await.map_err(|e| ApiError::Decode(e.to_string()))?;
        if let Some(first) = envelope.errors.into_iter().next() {
            return Err(ApiError::Server(first.message));
        }
        envelope.data.ok_or_else(|| ApiError::Decode("response carried no data".to_owned()))
    }

    /// Execute and decode one named field out of `data`.
    async fn data_field<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
        field: &str,
    ) -> Result<T, ApiError> {
        let data = self.execute(query, variables).await?;
        let value = data
            .get(field)
            .cloned()
            .ok_or_else(|| ApiError::Decode(format!("missing field `{field}`")))?;
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Subscription client for the configured websocket endpoint, bound to
    /// the same credential store.
    #[must_use]
    pub fn subscriptions(&self) -> crate::net::subscription::SubscriptionClient {
        crate::net::subscription::SubscriptionClient::new(
            self.config.ws_url.clone(),
            self.store.clone(),
        )
    }

    /// Fetch the current authenticated user.
    ///
    /// # Errors
    ///
    /// See [`GraphQlClient::execute`].
    pub async fn me(&self) -> Result<Identity, ApiError> {
        self.data_field(operations::ME, json!({}), "me").await
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// See [`GraphQlClient::execute`].
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<LoginPayload, ApiError> {
        self.data_field(
            operations::REGISTER,
            json!({ "input": { "name": name, "email": email, "password": password } }),
            "register",
        )
        .await
    }

    /// Fetch the notification list.
    ///
    /// # Errors
    ///
    /// See [`GraphQlClient::execute`].
    pub async fn notifications(&self) -> Result<Vec<Notification>, ApiError> {
        self.data_field(operations::NOTIFICATIONS, json!({}), "notifications").await
    }

    /// Mark one notification as read. Returns the server's acknowledgement.
    ///
    /// # Errors
    ///
    /// See [`GraphQlClient::execute`].
    pub async fn mark_notification_as_read(&self, id: &str) -> Result<bool, ApiError> {
        self.data_field(
            operations::MARK_NOTIFICATION_AS_READ,
            json!({ "id": id }),
            "markNotificationAsRead",
        )
        .await
    }

    /// Fetch activities, optionally filtered by user and capped.
    ///
    /// # Errors
    ///
    /// See [`GraphQlClient::execute`].
    pub async fn activities(
        &self,
        user_id: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Vec<Activity>, ApiError> {
        self.data_field(
            operations::ACTIVITIES,
            json!({ "userId": user_id, "status": null, "limit": limit }),
            "activities",
        )
        .await
    }
}

#[async_trait::async_trait]
impl AuthApi for GraphQlClient {
    async fn login(&self, email: &str, password: &str) -> Result<LoginPayload, ApiError> {
        self.data_field(
            operations::LOGIN,
            json!({ "input": { "email": email, "password": password } }),
            "login",
        )
        .await
    }
}
