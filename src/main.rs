use fyp_panel::routes;
use fyp_panel::routes::spa::SiteConfig;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "8080".into())
        .parse()
        .expect("invalid PORT");

    let site = SiteConfig::from_env();
    if !site.dist.is_dir() {
        tracing::warn!(dist = %site.dist.display(), "dist directory missing — serving will 404");
    }

    let app = routes::app(site.clone());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, dist = %site.dist.display(), "fyp-panel static host listening");
    axum::serve(listener, app).await.expect("server failed");
}
