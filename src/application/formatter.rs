// Chart data formatting and option merging
use crate::domain::chart::{DataPoint, SeriesKind};
use crate::domain::options::{Axis, ChartOptions, Sampling, Series, Title};

/// Which series the chart should draw. The explicit form of the
/// "isolate one series on click" toggle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SeriesView {
    #[default]
    ShowAll,
    ShowOnly(String),
}

/// Per-instance option overrides, applied last in the merge.
#[derive(Debug, Clone, Default)]
pub struct ChartOverrides {
    pub title: Option<String>,
    pub view: SeriesView,
}

/// Formats raw points into render options. Pure: the input slice is never
/// mutated and identical input yields identical output.
///
/// Axis bounds come from the first and last point, assuming ascending time
/// order; unsorted input gets wrong bounds, not a sort. Empty input yields a
/// well-formed option set with a single empty series so the render adapter
/// always has something to apply.
pub fn format(points: &[DataPoint], kind: SeriesKind) -> ChartOptions {
    let mut x_axis = Axis::time();
    if let (Some(first), Some(last)) = (points.first(), points.last()) {
        x_axis.min = Some(first.time_ms() as f64);
        x_axis.max = Some(last.time_ms() as f64);
    }

    let mut series = Series::new(kind, "Value".to_string(), points.to_vec());
    match kind {
        SeriesKind::Line => {
            series.sampling = Some(Sampling::Lttb);
            series.show_symbol = Some(false);
        }
        SeriesKind::Scatter => {
            series.symbol_size = Some(5);
        }
        SeriesKind::Bar => {}
    }

    ChartOptions {
        title: None,
        x_axis,
        y_axis: Axis::value(),
        series: vec![series],
        animation: None,
        progressive: None,
        progressive_threshold: None,
    }
}

/// Static presentation layer shared by every chart: animations off and
/// progressive rendering enabled for large series.
pub fn presentation_defaults(title: &str) -> ChartOptions {
    ChartOptions {
        title: Some(Title {
            text: title.to_string(),
        }),
        x_axis: Axis::time(),
        y_axis: Axis::value(),
        series: Vec::new(),
        animation: Some(false),
        progressive: Some(500),
        progressive_threshold: Some(3000),
    }
}

/// Merges option layers with precedence defaults < fetched < overrides and
/// returns a new value. Series are taken wholesale from the fetched layer;
/// axis fields merge field-wise; the override layer sets the title and
/// filters series through the view.
pub fn merge_options(
    defaults: &ChartOptions,
    fetched: &ChartOptions,
    overrides: &ChartOverrides,
) -> ChartOptions {
    let title = match &overrides.title {
        Some(text) => Some(Title { text: text.clone() }),
        None => defaults.title.clone(),
    };

    let series = match &overrides.view {
        SeriesView::ShowAll => fetched.series.clone(),
        SeriesView::ShowOnly(name) => fetched
            .series
            .iter()
            .filter(|s| &s.name == name)
            .cloned()
            .collect(),
    };

    ChartOptions {
        title,
        x_axis: merge_axis(&defaults.x_axis, &fetched.x_axis),
        y_axis: merge_axis(&defaults.y_axis, &fetched.y_axis),
        series,
        animation: fetched.animation.or(defaults.animation),
        progressive: fetched.progressive.or(defaults.progressive),
        progressive_threshold: fetched.progressive_threshold.or(defaults.progressive_threshold),
    }
}

fn merge_axis(default: &Axis, fetched: &Axis) -> Axis {
    Axis {
        axis_type: fetched.axis_type,
        min: fetched.min.or(default.min),
        max: fetched.max.or(default.max),
        scale: fetched.scale.or(default.scale),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::options::AxisType;

    fn sample_points() -> Vec<DataPoint> {
        vec![
            DataPoint(1_000, 1.0),
            DataPoint(2_000, 2.5),
            DataPoint(3_000, 1.5),
        ]
    }

    #[test]
    fn test_format_is_pure_and_deterministic() {
        let points = sample_points();
        let before = points.clone();

        let first = format(&points, SeriesKind::Line);
        let second = format(&points, SeriesKind::Line);

        assert_eq!(first, second);
        assert_eq!(points, before);
    }

    #[test]
    fn test_format_axis_bounds_from_first_and_last() {
        let options = format(&sample_points(), SeriesKind::Bar);
        assert_eq!(options.x_axis.axis_type, AxisType::Time);
        assert_eq!(options.x_axis.min, Some(1_000.0));
        assert_eq!(options.x_axis.max, Some(3_000.0));
        assert_eq!(options.y_axis.scale, Some(true));
    }

    #[test]
    fn test_format_series_hints_per_kind() {
        let line = format(&sample_points(), SeriesKind::Line);
        assert_eq!(line.series[0].sampling, Some(Sampling::Lttb));
        assert_eq!(line.series[0].show_symbol, Some(false));

        let bar = format(&sample_points(), SeriesKind::Bar);
        assert_eq!(bar.series[0].sampling, None);

        let scatter = format(&sample_points(), SeriesKind::Scatter);
        assert_eq!(scatter.series[0].symbol_size, Some(5));
    }

    #[test]
    fn test_format_empty_input_is_well_formed() {
        for kind in [SeriesKind::Line, SeriesKind::Bar, SeriesKind::Scatter] {
            let options = format(&[], kind);
            assert_eq!(options.series.len(), 1);
            assert!(options.series[0].data.is_empty());
            assert_eq!(options.series[0].kind, kind);
            assert_eq!(options.x_axis.min, None);
            assert_eq!(options.x_axis.max, None);
        }
    }

    #[test]
    fn test_merge_precedence() {
        let defaults = presentation_defaults("Chart A");
        let fetched = format(&sample_points(), SeriesKind::Line);

        let merged = merge_options(&defaults, &fetched, &ChartOverrides::default());
        assert_eq!(merged.title.as_ref().unwrap().text, "Chart A");
        assert_eq!(merged.animation, Some(false));
        assert_eq!(merged.x_axis.min, Some(1_000.0));
        assert_eq!(merged.series.len(), 1);

        let overrides = ChartOverrides {
            title: Some("Renamed".to_string()),
            view: SeriesView::ShowAll,
        };
        let merged = merge_options(&defaults, &fetched, &overrides);
        assert_eq!(merged.title.as_ref().unwrap().text, "Renamed");
    }

    #[test]
    fn test_merge_show_only_filters_series() {
        let defaults = presentation_defaults("Chart A");
        let mut fetched = format(&sample_points(), SeriesKind::Line);
        fetched
            .series
            .push(Series::new(SeriesKind::Line, "Other".to_string(), vec![]));

        let overrides = ChartOverrides {
            title: None,
            view: SeriesView::ShowOnly("Other".to_string()),
        };
        let merged = merge_options(&defaults, &fetched, &overrides);
        assert_eq!(merged.series.len(), 1);
        assert_eq!(merged.series[0].name, "Other");
    }

    #[test]
    fn test_merge_does_not_mutate_inputs() {
        let defaults = presentation_defaults("Chart A");
        let fetched = format(&sample_points(), SeriesKind::Line);
        let defaults_before = defaults.clone();
        let fetched_before = fetched.clone();

        let _ = merge_options(&defaults, &fetched, &ChartOverrides::default());
        assert_eq!(defaults, defaults_before);
        assert_eq!(fetched, fetched_before);
    }
}
