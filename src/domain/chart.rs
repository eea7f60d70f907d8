// Chart domain models
use super::options::ChartOptions;
use serde::{Deserialize, Serialize};

/// One sample: timestamp in milliseconds and a value. Serializes as `[t, v]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint(pub i64, pub f64);

impl DataPoint {
    pub fn time_ms(&self) -> i64 {
        self.0
    }

    pub fn value(&self) -> f64 {
        self.1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Line,
    Bar,
    Scatter,
}

/// Cycling order used when a page lays out N charts.
pub const CHART_TYPES: [SeriesKind; 3] = [SeriesKind::Line, SeriesKind::Bar, SeriesKind::Scatter];

impl SeriesKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeriesKind::Line => "line",
            SeriesKind::Bar => "bar",
            SeriesKind::Scatter => "scatter",
        }
    }

    /// Parses a chart-type string, falling back to line for anything unknown.
    pub fn parse_or_line(s: &str) -> Self {
        match s {
            "bar" => SeriesKind::Bar,
            "scatter" => SeriesKind::Scatter,
            _ => SeriesKind::Line,
        }
    }
}

/// Identity and presentation of one chart slot. Immutable for the lifetime of
/// the chart instance; `id` determines render-engine reuse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartDescriptor {
    pub id: String,
    pub title: String,
    pub kind: SeriesKind,
}

impl ChartDescriptor {
    pub fn new(id: String, title: String, kind: SeriesKind) -> Self {
        Self { id, title, kind }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Idle,
    Loading,
    Success(ChartOptions),
    Error(String),
}

impl LoadState {
    pub fn phase(&self) -> LoadPhase {
        match self {
            LoadState::Idle => LoadPhase::Idle,
            LoadState::Loading => LoadPhase::Loading,
            LoadState::Success(_) => LoadPhase::Success,
            LoadState::Error(_) => LoadPhase::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadPhase {
    Idle,
    Loading,
    Success,
    Error,
}
