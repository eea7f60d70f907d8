// Headless rendering engine: records applied options instead of drawing
use crate::application::render::{RenderEngine, RenderEngineFactory, Viewport};
use crate::domain::config::RendererMode;
use crate::domain::options::ChartOptions;

/// Stand-in for the real charting engine so the full pipeline can run
/// server-side. Keeps the last applied option set and viewport.
pub struct HeadlessEngine {
    chart_id: String,
    mode: RendererMode,
    last_options: Option<ChartOptions>,
    viewport: Option<Viewport>,
    disposed: bool,
}

impl HeadlessEngine {
    pub fn new(chart_id: String, mode: RendererMode) -> Self {
        Self {
            chart_id,
            mode,
            last_options: None,
            viewport: None,
            disposed: false,
        }
    }

    pub fn last_options(&self) -> Option<&ChartOptions> {
        self.last_options.as_ref()
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl RenderEngine for HeadlessEngine {
    fn apply_options(&mut self, options: &ChartOptions) {
        let points: usize = options.series.iter().map(|s| s.data.len()).sum();
        tracing::debug!(
            chart_id = %self.chart_id,
            mode = self.mode.as_str(),
            series = options.series.len(),
            points,
            "applying chart options"
        );
        self.last_options = Some(options.clone());
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
    }

    fn dispose(&mut self) {
        tracing::debug!(chart_id = %self.chart_id, "disposing render engine");
        self.last_options = None;
        self.disposed = true;
    }
}

pub struct HeadlessEngineFactory;

impl RenderEngineFactory for HeadlessEngineFactory {
    fn create(&self, chart_id: &str, mode: RendererMode) -> Box<dyn RenderEngine> {
        Box::new(HeadlessEngine::new(chart_id.to_string(), mode))
    }
}
