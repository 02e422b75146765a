use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};

mod aggregators;
mod config;
mod date_range;
mod fallback;
mod gateway;
mod handlers;
mod middleware;
mod normalize;

use config::Config;
use gateway::ReportingGateway;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub gateway: Option<Arc<ReportingGateway>>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_max_level(Level::INFO)
        .init();

    info!("Starting presslytics server...");

    let config = Config::load()?;
    let gateway = ReportingGateway::from_config(&config).map(Arc::new);
    let state = AppState {
        config: Arc::new(config),
        gateway,
    };

    // Analytics endpoints sit behind the dashboard's basic-auth gate; the
    // health check stays open for probes.
    let admin_routes = Router::new()
        .route("/api/analytics/overview", get(handlers::get_overview))
        .route("/api/analytics/pages", get(handlers::get_pages))
        .route("/api/analytics/top-articles", get(handlers::get_top_articles))
        .route(
            "/api/analytics/top-articles/export",
            get(handlers::export_top_articles),
        )
        .route("/api/analytics/categories", get(handlers::get_categories))
        .route("/api/analytics/social", get(handlers::get_social))
        .route(
            "/api/analytics/test-connection",
            get(handlers::test_connection),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::basic_auth,
        ));

    let app = Router::new()
        .route("/health", get(handlers::health_check))
        .merge(admin_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
