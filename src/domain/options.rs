// Declarative option structures consumed by the rendering engine
use super::chart::{DataPoint, SeriesKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisType {
    Time,
    Value,
    Category,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    #[serde(rename = "type")]
    pub axis_type: AxisType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<bool>,
}

impl Axis {
    pub fn time() -> Self {
        Self {
            axis_type: AxisType::Time,
            min: None,
            max: None,
            scale: None,
        }
    }

    pub fn value() -> Self {
        Self {
            axis_type: AxisType::Value,
            min: None,
            max: None,
            scale: Some(true),
        }
    }
}

/// Downsampling hint for dense series. `lttb` keeps visual extremes while
/// reducing drawn point density; the source data array is untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sampling {
    Lttb,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    #[serde(rename = "type")]
    pub kind: SeriesKind,
    pub name: String,
    pub data: Vec<DataPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sampling: Option<Sampling>,
    #[serde(rename = "showSymbol", skip_serializing_if = "Option::is_none")]
    pub show_symbol: Option<bool>,
    #[serde(rename = "symbolSize", skip_serializing_if = "Option::is_none")]
    pub symbol_size: Option<u32>,
}

impl Series {
    pub fn new(kind: SeriesKind, name: String, data: Vec<DataPoint>) -> Self {
        Self {
            kind,
            name,
            data,
            sampling: None,
            show_symbol: None,
            symbol_size: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub text: String,
}

/// Full option set handed to the rendering engine. Applied wholesale, never
/// patched, because series count and type can change between loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub series: Vec<Series>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progressive: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progressive_threshold: Option<u32>,
}
