//! Remote GraphQL API plumbing.
//!
//! SYSTEM CONTEXT
//! ==============
//! The GraphQL server, its schema, and its resolvers live elsewhere. This
//! module owns the two transports to it — HTTP for queries/mutations and a
//! websocket for subscriptions — and the credential binding applied to both.

pub mod graphql;
pub mod operations;
pub mod subscription;
pub mod types;

use self::types::LoginPayload;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by API transport operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a usable HTTP/WS response.
    #[error("request failed: {0}")]
    Transport(String),

    /// The server answered with an error (HTTP status or GraphQL `errors`).
    /// The message is the user-displayable text.
    #[error("{0}")]
    Server(String),

    /// The response arrived but could not be decoded.
    #[error("malformed response: {0}")]
    Decode(String),
}

// =============================================================================
// AUTH API SEAM
// =============================================================================

/// Outbound authentication boundary used by the session.
///
/// [`graphql::GraphQlClient`] is the production implementation; tests inject
/// stubs.
#[async_trait::async_trait]
pub trait AuthApi: Send + Sync {
    /// Attempt a credential login against the remote API.
    ///
    /// # Errors
    ///
    /// Returns the transport or server rejection; the message on
    /// [`ApiError::Server`] is user-displayable.
    async fn login(&self, email: &str, password: &str) -> Result<LoginPayload, ApiError>;
}
