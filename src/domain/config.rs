// User-facing benchmark configuration and query-parameter validation
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Point counts the dataset selector offers; anything else is rejected.
pub const VALID_DATA_POINTS: [u64; 5] = [1_000, 10_000, 100_000, 500_000, 1_000_000];

pub const MIN_CHARTS: u32 = 1;
pub const MAX_CHARTS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererMode {
    Canvas,
    Svg,
}

impl RendererMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RendererMode::Canvas => "canvas",
            RendererMode::Svg => "svg",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "canvas" => Some(RendererMode::Canvas),
            "svg" => Some(RendererMode::Svg),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserConfiguration {
    pub charts_count: u32,
    pub data_points: u64,
    pub renderer: RendererMode,
}

impl Default for UserConfiguration {
    fn default() -> Self {
        Self {
            charts_count: 3,
            data_points: 1_000_000,
            renderer: RendererMode::Canvas,
        }
    }
}

impl UserConfiguration {
    /// Overlays page query parameters onto this configuration. Invalid or
    /// out-of-range values are silently ignored, never rejected.
    pub fn apply_params(&self, params: &HashMap<String, String>) -> Self {
        let mut config = *self;

        let charts_param = params.get("charts").or_else(|| params.get("chartsCount"));
        if let Some(raw) = charts_param {
            if let Some(count) = parse_charts_count(raw) {
                config.charts_count = count;
            }
        }

        if let Some(raw) = params.get("dataPoints") {
            if let Some(points) = parse_data_points(raw) {
                config.data_points = points;
            }
        }

        if let Some(raw) = params.get("renderer") {
            if let Some(renderer) = RendererMode::parse(raw) {
                config.renderer = renderer;
            }
        }

        config
    }
}

pub fn parse_charts_count(raw: &str) -> Option<u32> {
    raw.parse::<u32>()
        .ok()
        .filter(|n| (MIN_CHARTS..=MAX_CHARTS).contains(n))
}

pub fn parse_data_points(raw: &str) -> Option<u64> {
    raw.parse::<u64>()
        .ok()
        .filter(|n| VALID_DATA_POINTS.contains(n))
}
