// Chart data use case backing the proxy route
use crate::application::dataset::{DatasetError, DatasetSource};
use crate::application::formatter;
use crate::domain::chart::SeriesKind;
use crate::domain::options::ChartOptions;
use std::sync::Arc;

#[derive(Clone)]
pub struct ChartDataService {
    source: Arc<dyn DatasetSource>,
}

impl ChartDataService {
    pub fn new(source: Arc<dyn DatasetSource>) -> Self {
        Self { source }
    }

    /// Fetches raw points and reshapes them into render options. Upstream
    /// failures propagate; an empty 2xx dataset is a valid empty chart.
    pub async fn get_chart_options(
        &self,
        kind: SeriesKind,
        point_count: u64,
    ) -> Result<ChartOptions, DatasetError> {
        let points = self.source.fetch(kind, point_count).await?;
        Ok(formatter::format(&points, kind))
    }
}
