use axum::{Router, http::header, routing::get};
use splitshot::api::{handlers::api_routes, openapi::ApiDoc};
use splitshot::config::CONFIG;
use splitshot::core::services::ExpenseService;
use splitshot::infrastructure::{report::html::HtmlReportRenderer, storage::file::FileStore};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt().with_env_filter(CONFIG.log_level.as_str()).init();

    let roster = CONFIG.roster()?;
    info!(
        "Roster: {}",
        roster.iter().map(|u| u.name.as_str()).collect::<Vec<_>>().join(", ")
    );

    let storage = FileStore::new(&CONFIG.data_dir);
    let renderer = HtmlReportRenderer::new(CONFIG.report_title.clone());
    let service = Arc::new(ExpenseService::new(roster, storage, renderer)?);
    service.load().await;

    let app = Router::new()
        // add / route with a simple health check
        .route("/", get(|| async { "OK" }))
        .nest("/api", api_routes(service))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CompressionLayer::new()) // Gzip compression
        .layer(TimeoutLayer::new(Duration::from_secs(30))) // 30-second timeout
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([http::Method::GET, http::Method::POST])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http()); // Request tracing

    // Start server
    let addr = SocketAddr::from(([127, 0, 0, 1], CONFIG.port));
    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
