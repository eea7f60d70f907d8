// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, path::PathBuf, sync::Arc, time::Duration};

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::application::benchmark::BenchmarkService;
use crate::application::chart_service::ChartDataService;
use crate::application::config_store::ConfigStore;
use crate::infrastructure::config::load_server_config;
use crate::infrastructure::headless_render::HeadlessEngineFactory;
use crate::infrastructure::http_dataset::HttpDatasetClient;
use crate::infrastructure::storage::JsonFileStorage;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{chart_data, health_check, run_benchmark};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let server_config = load_server_config()?;

    // Dataset source (infrastructure layer)
    let source = Arc::new(HttpDatasetClient::new(server_config.data_api_url.clone()));

    // Services (application layer)
    let chart_data_service = ChartDataService::new(source.clone());
    let benchmark_service = BenchmarkService::new(
        source,
        Arc::new(HeadlessEngineFactory),
        Duration::from_millis(server_config.settle_delay_ms),
    );
    let config_store = ConfigStore::new(Arc::new(JsonFileStorage::new(PathBuf::from(
        &server_config.storage_path,
    ))));

    // Application state
    let state = Arc::new(AppState {
        chart_data_service,
        benchmark_service,
        config_store,
    });

    // Router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/api/chart-data", get(chart_data))
        .route("/api/benchmark", get(run_benchmark))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = server_config.listen_addr.parse()?;
    println!("Starting chart-bench service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
