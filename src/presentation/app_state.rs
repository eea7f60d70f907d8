// Application state for HTTP handlers
use crate::application::benchmark::BenchmarkService;
use crate::application::chart_service::ChartDataService;
use crate::application::config_store::ConfigStore;

pub struct AppState {
    pub chart_data_service: ChartDataService,
    pub benchmark_service: BenchmarkService,
    pub config_store: ConfigStore,
}
