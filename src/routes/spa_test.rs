use super::*;
use uuid::Uuid;

// =============================================================================
// Path classification
// =============================================================================

#[test]
fn extension_detection() {
    assert!(has_extension("/assets/app.js"));
    assert!(has_extension("/index.html"));
    assert!(!has_extension("/admin/users"));
    assert!(!has_extension("/"));
    // A bare leading dot is a hidden file, not an extension.
    assert!(!has_extension("/.env"));
}

#[test]
fn deep_links_fall_back() {
    assert!(wants_spa_fallback("/admin"));
    assert!(wants_spa_fallback("/admin/users"));
    assert!(wants_spa_fallback("/login"));
}

#[test]
fn asset_misses_do_not_fall_back() {
    assert!(!wants_spa_fallback("/assets/missing.js"));
    assert!(!wants_spa_fallback("/logo.png"));
}

#[test]
fn api_prefixed_paths_do_not_fall_back() {
    assert!(!wants_spa_fallback("/graphql"));
    assert!(!wants_spa_fallback("/graphql/stream"));
}

// =============================================================================
// Cache policy
// =============================================================================

#[test]
fn html_is_revalidated() {
    assert_eq!(cache_policy("/index.html"), CACHE_NONE);
}

#[test]
fn route_paths_are_revalidated() {
    assert_eq!(cache_policy("/"), CACHE_NONE);
    assert_eq!(cache_policy("/admin/users"), CACHE_NONE);
}

#[test]
fn hashed_assets_are_immutable() {
    assert_eq!(cache_policy("/assets/app-4f2a.js"), CACHE_IMMUTABLE);
}

#[test]
fn other_files_get_an_hour() {
    assert_eq!(cache_policy("/vite.svg"), CACHE_DEFAULT);
}

// =============================================================================
// Served behavior
// =============================================================================

const INDEX_MARKER: &str = "<!doctype html><title>fyp-panel</title>";

fn temp_dist(with_favicon: bool) -> PathBuf {
    let dist = std::env::temp_dir().join(format!("fyp-panel-dist-{}", Uuid::new_v4()));
    std::fs::create_dir_all(dist.join("assets")).unwrap();
    std::fs::write(dist.join("index.html"), INDEX_MARKER).unwrap();
    std::fs::write(dist.join("assets/app.js"), "console.log('app')").unwrap();
    if with_favicon {
        std::fs::write(dist.join("vite.svg"), "<svg/>").unwrap();
    }
    dist
}

async fn spawn_site(dist: PathBuf) -> String {
    let app = crate::routes::app(SiteConfig { dist });
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn deep_link_serves_bootstrap_document() {
    let dist = temp_dist(false);
    let base = spawn_site(dist.clone()).await;

    let resp = reqwest::get(format!("{base}/admin/users")).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()["cache-control"], CACHE_NONE);
    assert_eq!(resp.text().await.unwrap(), INDEX_MARKER);
    let _ = std::fs::remove_dir_all(dist);
}

#[tokio::test]
async fn root_serves_bootstrap_document() {
    let dist = temp_dist(false);
    let base = spawn_site(dist.clone()).await;

    let resp = reqwest::get(format!("{base}/")).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), INDEX_MARKER);
    let _ = std::fs::remove_dir_all(dist);
}

#[tokio::test]
async fn assets_are_served_as_is() {
    let dist = temp_dist(false);
    let base = spawn_site(dist.clone()).await;

    let resp = reqwest::get(format!("{base}/assets/app.js")).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()["cache-control"], CACHE_IMMUTABLE);
    assert_eq!(resp.text().await.unwrap(), "console.log('app')");
    let _ = std::fs::remove_dir_all(dist);
}

#[tokio::test]
async fn missing_asset_is_404_not_fallback() {
    let dist = temp_dist(false);
    let base = spawn_site(dist.clone()).await;

    let resp = reqwest::get(format!("{base}/missing.js")).await.unwrap();
    assert_eq!(resp.status(), 404);
    let _ = std::fs::remove_dir_all(dist);
}

#[tokio::test]
async fn api_prefixed_miss_is_404() {
    let dist = temp_dist(false);
    let base = spawn_site(dist.clone()).await;

    let resp = reqwest::get(format!("{base}/graphql")).await.unwrap();
    assert_eq!(resp.status(), 404);
    let _ = std::fs::remove_dir_all(dist);
}

#[tokio::test]
async fn favicon_served_when_present() {
    let dist = temp_dist(true);
    let base = spawn_site(dist.clone()).await;

    let resp = reqwest::get(format!("{base}/favicon.ico")).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()["content-type"], "image/svg+xml");
    let _ = std::fs::remove_dir_all(dist);
}

#[tokio::test]
async fn favicon_missing_is_204_not_404() {
    let dist = temp_dist(false);
    let base = spawn_site(dist.clone()).await;

    let resp = reqwest::get(format!("{base}/favicon.ico")).await.unwrap();
    assert_eq!(resp.status(), 204);
    let _ = std::fs::remove_dir_all(dist);
}

#[tokio::test]
async fn healthz_is_ok() {
    let dist = temp_dist(false);
    let base = spawn_site(dist.clone()).await;

    let resp = reqwest::get(format!("{base}/healthz")).await.unwrap();
    assert_eq!(resp.status(), 200);
    let _ = std::fs::remove_dir_all(dist);
}
