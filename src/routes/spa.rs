//! SPA fallback, favicon, and cache policy for the static host.
//!
//! SYSTEM CONTEXT
//! ==============
//! Client-side route guarding depends on every deep link resolving to the
//! same bootstrap document: any extension-less, non-API GET path must be
//! answered with the root `index.html`. Paths that look like assets 404
//! when absent instead of falling back.

#[cfg(test)]
#[path = "spa_test.rs"]
mod tests;

use std::path::PathBuf;

use axum::extract::{Request, State};
use axum::http::{StatusCode, Uri, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

/// API prefix excluded from SPA fallback.
const API_PREFIX: &str = "/graphql";

const CACHE_NONE: &str = "public, max-age=0, must-revalidate";
const CACHE_IMMUTABLE: &str = "public, max-age=31536000, immutable";
const CACHE_DEFAULT: &str = "public, max-age=3600";

// =============================================================================
// CONFIG
// =============================================================================

/// Static site configuration injected into handlers.
#[derive(Clone, Debug)]
pub struct SiteConfig {
    /// Build output directory served as the site root.
    pub dist: PathBuf,
}

impl SiteConfig {
    /// Load from `DIST_DIR`, defaulting to `./dist`.
    #[must_use]
    pub fn from_env() -> Self {
        let dist = std::env::var("DIST_DIR").map(PathBuf::from).unwrap_or_else(|_| PathBuf::from("dist"));
        Self { dist }
    }
}

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// Whether the final path segment carries a file extension. A bare leading
/// dot (`.env`) does not count, matching the original host's behavior.
pub(crate) fn has_extension(path: &str) -> bool {
    path.rsplit('/')
        .next()
        .and_then(|segment| segment.rsplit_once('.'))
        .is_some_and(|(stem, ext)| !stem.is_empty() && !ext.is_empty())
}

/// Whether a missed path should be answered with the bootstrap document.
#[must_use]
pub fn wants_spa_fallback(path: &str) -> bool {
    if path.starts_with(API_PREFIX) {
        return false;
    }
    !has_extension(path)
}

/// Cache policy for a request path: HTML and route paths are revalidated,
/// hashed assets are immutable, everything else gets an hour.
#[must_use]
pub fn cache_policy(path: &str) -> &'static str {
    if path.ends_with(".html") || !has_extension(path) {
        CACHE_NONE
    } else if path.starts_with("/assets/") {
        CACHE_IMMUTABLE
    } else {
        CACHE_DEFAULT
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// Not-found fallback behind `ServeDir`: deep links get `index.html`, asset
/// misses stay 404.
pub async fn spa_fallback(State(site): State<SiteConfig>, uri: Uri) -> Response {
    if !wants_spa_fallback(uri.path()) {
        return StatusCode::NOT_FOUND.into_response();
    }

    match tokio::fs::read(site.dist.join("index.html")).await {
        Ok(bytes) => {
            ([(header::CONTENT_TYPE, "text/html; charset=utf-8")], bytes).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to serve index.html");
            (StatusCode::INTERNAL_SERVER_ERROR, "Application error").into_response()
        }
    }
}

/// `GET /favicon.ico` — serve the vite icon, or 204 so missing favicons
/// never show up as 404 noise.
pub async fn favicon(State(site): State<SiteConfig>) -> Response {
    match tokio::fs::read(site.dist.join("vite.svg")).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, "image/svg+xml")], bytes).into_response(),
        Err(_) => StatusCode::NO_CONTENT.into_response(),
    }
}

/// Middleware stamping the cache policy on successful responses.
pub async fn cache_policy_middleware(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let mut response = next.run(request).await;
    if response.status().is_success() {
        response
            .headers_mut()
            .insert(header::CACHE_CONTROL, header::HeaderValue::from_static(cache_policy(&path)));
    }
    response
}
