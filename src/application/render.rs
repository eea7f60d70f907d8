// Render adapter owning one engine instance per chart identity
use crate::domain::config::RendererMode;
use crate::domain::options::ChartOptions;
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// Opaque rendering engine. Options are applied wholesale; `dispose` releases
/// the drawing surface and must be called exactly once.
pub trait RenderEngine: Send {
    fn apply_options(&mut self, options: &ChartOptions);
    fn resize(&mut self, viewport: Viewport);
    fn dispose(&mut self);
}

pub trait RenderEngineFactory: Send + Sync {
    fn create(&self, chart_id: &str, mode: RendererMode) -> Box<dyn RenderEngine>;
}

/// Owns at most one engine, keyed on (chart id, renderer mode). Data updates
/// reuse the existing instance; a key change disposes and recreates, since
/// renderer mode cannot be hot-swapped on a live engine.
pub struct RenderAdapter {
    factory: Arc<dyn RenderEngineFactory>,
    engine: Option<Box<dyn RenderEngine>>,
    key: Option<(String, RendererMode)>,
}

impl RenderAdapter {
    pub fn new(factory: Arc<dyn RenderEngineFactory>) -> Self {
        Self {
            factory,
            engine: None,
            key: None,
        }
    }

    /// Applies the merged option set, creating the engine on first use and
    /// recreating it only when the identity key changes.
    pub fn apply(&mut self, chart_id: &str, mode: RendererMode, options: &ChartOptions) {
        let key = (chart_id.to_string(), mode);
        if self.key.as_ref() != Some(&key) {
            self.dispose();
            tracing::debug!(chart_id, mode = mode.as_str(), "creating render engine");
            self.engine = Some(self.factory.create(chart_id, mode));
            self.key = Some(key);
        }

        if let Some(engine) = self.engine.as_mut() {
            engine.apply_options(options);
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        if let Some(engine) = self.engine.as_mut() {
            engine.resize(viewport);
        }
    }

    /// Idempotent teardown; also runs on drop.
    pub fn dispose(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            engine.dispose();
        }
        self.key = None;
    }
}

impl Drop for RenderAdapter {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Broadcast channel for viewport size changes. Adapters subscribe through
/// forwarder tasks and unsubscribe by aborting them.
pub struct ViewportHub {
    tx: broadcast::Sender<Viewport>,
}

impl Default for ViewportHub {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewportHub {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(16);
        Self { tx }
    }

    pub fn publish(&self, viewport: Viewport) {
        // No subscribers is fine; the send result is irrelevant.
        let _ = self.tx.send(viewport);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Viewport> {
        self.tx.subscribe()
    }
}

/// Forwards viewport changes to the adapter until the returned handle is
/// aborted or the hub is dropped.
pub fn watch_viewport(
    adapter: Arc<Mutex<RenderAdapter>>,
    mut rx: broadcast::Receiver<Viewport>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(viewport) => {
                    if let Ok(mut adapter) = adapter.lock() {
                        adapter.resize(viewport);
                    }
                }
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}


#[cfg(test)]
mod tests {
    use super::test_support::CountingFactory;
    use super::*;
    use crate::domain::chart::SeriesKind;
    use crate::application::formatter::format;
    use std::sync::atomic::Ordering;

    #[test]
    fn test_one_engine_per_identity_across_updates() {
        let (factory, counters) = CountingFactory::new();
        let mut adapter = RenderAdapter::new(factory);
        let options = format(&[], SeriesKind::Line);

        adapter.apply("chart-0", RendererMode::Canvas, &options);
        adapter.apply("chart-0", RendererMode::Canvas, &options);
        adapter.apply("chart-0", RendererMode::Canvas, &options);

        assert_eq!(counters.created.load(Ordering::SeqCst), 1);
        assert_eq!(counters.applied.load(Ordering::SeqCst), 3);

        adapter.dispose();
        adapter.dispose();
        assert_eq!(counters.disposed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_renderer_mode_change_recreates_engine() {
        let (factory, counters) = CountingFactory::new();
        let mut adapter = RenderAdapter::new(factory);
        let options = format(&[], SeriesKind::Line);

        adapter.apply("chart-0", RendererMode::Canvas, &options);
        adapter.apply("chart-0", RendererMode::Svg, &options);

        assert_eq!(counters.created.load(Ordering::SeqCst), 2);
        assert_eq!(counters.disposed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_disposes_engine_once() {
        let (factory, counters) = CountingFactory::new();
        {
            let mut adapter = RenderAdapter::new(factory);
            adapter.apply("chart-0", RendererMode::Canvas, &format(&[], SeriesKind::Bar));
        }
        assert_eq!(counters.disposed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_resize_is_noop_without_engine() {
        let (factory, counters) = CountingFactory::new();
        let mut adapter = RenderAdapter::new(factory);
        adapter.resize(Viewport {
            width: 800,
            height: 400,
        });
        assert_eq!(counters.resized.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_viewport_hub_forwards_resize() {
        let (factory, counters) = CountingFactory::new();
        let adapter = Arc::new(Mutex::new(RenderAdapter::new(factory)));
        adapter
            .lock()
            .unwrap()
            .apply("chart-0", RendererMode::Canvas, &format(&[], SeriesKind::Line));

        let hub = ViewportHub::new();
        let handle = watch_viewport(adapter.clone(), hub.subscribe());

        hub.publish(Viewport {
            width: 1280,
            height: 400,
        });
        tokio::task::yield_now().await;
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;

        handle.abort();
        assert_eq!(counters.resized.load(Ordering::SeqCst), 1);
    }
}
