//! Router assembly for the static host.
//!
//! SYSTEM CONTEXT
//! ==============
//! This process serves the panel's build output and nothing else — the
//! GraphQL API is a separate deployment the browser talks to directly.
//! Static files are served from the dist directory; every extension-less
//! miss falls back to `index.html` so client-side routing owns deep links.

pub mod spa;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use self::spa::SiteConfig;

/// Build the static host router.
pub fn app(site: SiteConfig) -> Router {
    let fallback = get(spa::spa_fallback).with_state(site.clone());
    let serve_dist = ServeDir::new(&site.dist)
        .append_index_html_on_directories(true)
        .not_found_service(fallback);

    Router::new()
        .route("/healthz", get(healthz))
        .route("/favicon.ico", get(spa::favicon))
        .fallback_service(serve_dist)
        .layer(axum::middleware::from_fn(spa::cache_policy_middleware))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(site)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
