// HTTP request handlers
use crate::domain::chart::SeriesKind;
use crate::domain::config::UserConfiguration;
use crate::domain::options::{Axis, ChartOptions, Series};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

const CACHE_TTL_SECONDS: u64 = 60 * 60;

#[derive(Deserialize)]
pub struct ChartDataQuery {
    #[serde(rename = "type")]
    pub chart_type: Option<String>,
    pub count: Option<String>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Thin passthrough: fetch the named dataset and reshape it into chart
/// options. Missing or invalid parameters fall back to defaults; an upstream
/// failure yields a 500 with a minimal empty-series body.
pub async fn chart_data(
    Query(query): Query<ChartDataQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let kind = SeriesKind::parse_or_line(query.chart_type.as_deref().unwrap_or("line"));
    let point_count = query
        .count
        .as_deref()
        .and_then(|raw| raw.parse::<u64>().ok())
        .unwrap_or(1_000_000);

    match state
        .chart_data_service
        .get_chart_options(kind, point_count)
        .await
    {
        Ok(options) => (
            StatusCode::OK,
            [(
                header::CACHE_CONTROL,
                format!("public, max-age={CACHE_TTL_SECONDS}"),
            )],
            Json(options),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(kind = kind.as_str(), point_count, error = %e, "chart data proxy failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(error_fallback_options(kind)),
            )
                .into_response()
        }
    }
}

/// Runs the full pipeline for the requested configuration and reports the
/// "all charts rendered" timing. Query parameters are reconciled against the
/// persisted configuration; invalid values are silently replaced.
pub async fn run_benchmark(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let config = state
        .config_store
        .resolve(&params, &UserConfiguration::default());
    let report = state.benchmark_service.run(&config).await;
    Json(report)
}

fn error_fallback_options(kind: SeriesKind) -> ChartOptions {
    ChartOptions {
        title: None,
        x_axis: Axis::time(),
        y_axis: Axis::value(),
        series: vec![Series::new(kind, "Error".to_string(), Vec::new())],
        animation: None,
        progressive: None,
        progressive_threshold: None,
    }
}
