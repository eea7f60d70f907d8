// Benchmark orchestration: N uncoordinated chart loads, one timing result
use crate::application::completion::CompletionAggregator;
use crate::application::dataset::DatasetSource;
use crate::application::formatter::ChartOverrides;
use crate::application::load_controller::{ChartEvent, LoadController, LoadRequest};
use crate::application::render::{watch_viewport, RenderAdapter, RenderEngineFactory, ViewportHub};
use crate::domain::chart::{ChartDescriptor, LoadPhase, SeriesKind, CHART_TYPES};
use crate::domain::config::{RendererMode, UserConfiguration};
use futures::future::join_all;
use serde::Serialize;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartReport {
    pub id: String,
    pub title: String,
    pub kind: SeriesKind,
    pub phase: LoadPhase,
    pub progress: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkReport {
    /// Time until every chart reported ready; None when any chart failed.
    pub elapsed_ms: Option<f64>,
    pub charts_count: u32,
    pub data_points: u64,
    pub renderer: RendererMode,
    pub charts: Vec<ChartReport>,
}

/// The page controller of the pipeline: builds descriptors, runs one load
/// controller per chart with no shared queue or concurrency cap, and consumes
/// ready events into a completion aggregator.
pub struct BenchmarkService {
    source: Arc<dyn DatasetSource>,
    engines: Arc<dyn RenderEngineFactory>,
    settle_delay: Duration,
}

impl BenchmarkService {
    pub fn new(
        source: Arc<dyn DatasetSource>,
        engines: Arc<dyn RenderEngineFactory>,
        settle_delay: Duration,
    ) -> Self {
        Self {
            source,
            engines,
            settle_delay,
        }
    }

    /// Chart slots for a configuration: stable ids, kinds cycling through the
    /// chart types, titles carrying the point count.
    pub fn descriptors(config: &UserConfiguration) -> Vec<ChartDescriptor> {
        (0..config.charts_count)
            .map(|i| {
                let kind = CHART_TYPES[i as usize % CHART_TYPES.len()];
                ChartDescriptor::new(
                    format!("chart-{i}"),
                    format!(
                        "{} Chart - {}K Datapoints",
                        kind.as_str(),
                        config.data_points / 1000
                    ),
                    kind,
                )
            })
            .collect()
    }

    pub async fn run(&self, config: &UserConfiguration) -> BenchmarkReport {
        let descriptors = Self::descriptors(config);
        tracing::info!(
            charts = descriptors.len(),
            points = config.data_points,
            renderer = config.renderer.as_str(),
            "starting benchmark run"
        );

        let (events_tx, mut events_rx) = mpsc::unbounded_channel();
        let viewport_hub = ViewportHub::new();

        let mut controllers = Vec::with_capacity(descriptors.len());
        let mut watchers = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            let adapter = Arc::new(Mutex::new(RenderAdapter::new(self.engines.clone())));
            watchers.push(watch_viewport(adapter.clone(), viewport_hub.subscribe()));
            controllers.push(Arc::new(LoadController::new(
                descriptor,
                config.renderer,
                ChartOverrides::default(),
                self.source.clone(),
                adapter,
                events_tx.clone(),
                self.settle_delay,
            )));
        }
        drop(events_tx);

        // The aggregator is driven here, never by the charts themselves.
        let aggregator = Arc::new(Mutex::new(CompletionAggregator::new(controllers.len())));
        let consumer = tokio::spawn({
            let aggregator = aggregator.clone();
            async move {
                while let Some(ChartEvent::Ready { chart_id }) = events_rx.recv().await {
                    aggregator.lock().unwrap().mark_ready(&chart_id);
                }
            }
        });

        let request = LoadRequest::new(config.data_points);
        join_all(controllers.iter().map(|c| c.load(request))).await;

        let charts: Vec<ChartReport> = controllers
            .iter()
            .map(|controller| {
                let snapshot = controller.snapshot();
                let descriptor = controller.descriptor();
                ChartReport {
                    id: descriptor.id.clone(),
                    title: descriptor.title.clone(),
                    kind: descriptor.kind,
                    phase: snapshot.phase,
                    progress: snapshot.progress,
                    error: snapshot.error,
                }
            })
            .collect();

        for controller in &controllers {
            controller.unmount();
        }
        for watcher in watchers {
            watcher.abort();
        }

        // Dropping the controllers closes the event channel and ends the
        // consumer once the remaining events are drained.
        drop(controllers);
        let _ = consumer.await;

        let elapsed_ms = aggregator.lock().unwrap().elapsed_millis();
        tracing::info!(?elapsed_ms, "benchmark run finished");

        BenchmarkReport {
            elapsed_ms,
            charts_count: config.charts_count,
            data_points: config.data_points,
            renderer: config.renderer,
            charts,
        }
    }
}
