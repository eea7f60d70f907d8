// Per-chart load lifecycle: fetch orchestration, stale-request discard,
// one-shot ready signaling
use crate::application::dataset::DatasetSource;
use crate::application::formatter::{self, ChartOverrides};
use crate::application::render::RenderAdapter;
use crate::domain::chart::{ChartDescriptor, LoadPhase, LoadState};
use crate::domain::config::RendererMode;
use crate::domain::options::ChartOptions;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::mpsc;

/// Synthetic progress milestones. Not byte-level progress; the ordering
/// issue -> parse -> complete is the contract.
pub const PROGRESS_REQUEST_ISSUED: u8 = 20;
pub const PROGRESS_RESPONSE_PARSED: u8 = 80;
pub const PROGRESS_COMPLETE: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadRequest {
    pub point_count: u64,
    /// Explicit reload: treat as a new configuration even when the point
    /// count is unchanged.
    pub force: bool,
}

impl LoadRequest {
    pub fn new(point_count: u64) -> Self {
        Self {
            point_count,
            force: false,
        }
    }

    pub fn forced(point_count: u64) -> Self {
        Self {
            point_count,
            force: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartEvent {
    Ready { chart_id: String },
}

/// Read-only view of the instance state for reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSnapshot {
    pub phase: LoadPhase,
    pub progress: u8,
    pub error: Option<String>,
}

/// Per-instance mutable record. Created with the controller on mount and
/// dead after unmount; never shared between charts.
struct InstanceState {
    state: LoadState,
    progress: u8,
    seq: u64,
    mounted: bool,
    notified: bool,
    last_point_count: Option<u64>,
}

/// Orchestrates the fetch lifecycle of one chart. Only the most recently
/// issued request is ever applied: each transition into Loading increments a
/// sequence counter and completions compare their captured number against it.
/// Cancellation is advisory; a superseded transport call runs to completion
/// and its result is dropped silently.
pub struct LoadController {
    descriptor: ChartDescriptor,
    renderer: RendererMode,
    overrides: ChartOverrides,
    source: Arc<dyn DatasetSource>,
    adapter: Arc<Mutex<RenderAdapter>>,
    events: mpsc::UnboundedSender<ChartEvent>,
    settle_delay: Duration,
    inner: Mutex<InstanceState>,
}

impl LoadController {
    pub fn new(
        descriptor: ChartDescriptor,
        renderer: RendererMode,
        overrides: ChartOverrides,
        source: Arc<dyn DatasetSource>,
        adapter: Arc<Mutex<RenderAdapter>>,
        events: mpsc::UnboundedSender<ChartEvent>,
        settle_delay: Duration,
    ) -> Self {
        Self {
            descriptor,
            renderer,
            overrides,
            source,
            adapter,
            events,
            settle_delay,
            inner: Mutex::new(InstanceState {
                state: LoadState::Idle,
                progress: 0,
                seq: 0,
                mounted: true,
                notified: false,
                last_point_count: None,
            }),
        }
    }

    pub fn descriptor(&self) -> &ChartDescriptor {
        &self.descriptor
    }

    /// Runs one load cycle. A request with an unchanged configuration that
    /// already notified is a no-op (the re-run guard); anything else resets
    /// progress, clears previous errors and enters Loading immediately.
    pub async fn load(&self, request: LoadRequest) {
        let seq = {
            let mut inner = self.inner.lock().unwrap();
            if !inner.mounted {
                return;
            }
            let new_configuration =
                request.force || inner.last_point_count != Some(request.point_count);
            if !new_configuration && inner.notified {
                return;
            }
            if new_configuration {
                inner.notified = false;
            }
            inner.last_point_count = Some(request.point_count);
            inner.seq += 1;
            inner.state = LoadState::Loading;
            inner.progress = PROGRESS_REQUEST_ISSUED;
            inner.seq
        };

        tracing::debug!(
            chart_id = %self.descriptor.id,
            seq,
            points = request.point_count,
            "issuing dataset fetch"
        );
        let result = self
            .source
            .fetch(self.descriptor.kind, request.point_count)
            .await;

        let points = {
            let mut inner = self.inner.lock().unwrap();
            if !Self::is_current(&inner, seq) {
                self.log_discard(seq, &inner);
                return;
            }
            match result {
                Ok(points) => {
                    inner.progress = PROGRESS_RESPONSE_PARSED;
                    points
                }
                Err(e) => {
                    tracing::warn!(chart_id = %self.descriptor.id, error = %e, "chart load failed");
                    inner.state = LoadState::Error(e.to_string());
                    return;
                }
            }
        };

        let fetched = formatter::format(&points, self.descriptor.kind);
        let defaults = formatter::presentation_defaults(&self.descriptor.title);
        let merged = formatter::merge_options(&defaults, &fetched, &self.overrides);

        // Lets the progress indicator visually settle before completing.
        if !self.settle_delay.is_zero() {
            tokio::time::sleep(self.settle_delay).await;
        }

        let mut inner = self.inner.lock().unwrap();
        if !Self::is_current(&inner, seq) {
            self.log_discard(seq, &inner);
            return;
        }

        self.adapter
            .lock()
            .unwrap()
            .apply(&self.descriptor.id, self.renderer, &merged);

        inner.state = LoadState::Success(merged);
        inner.progress = PROGRESS_COMPLETE;
        if !inner.notified {
            inner.notified = true;
            let _ = self.events.send(ChartEvent::Ready {
                chart_id: self.descriptor.id.clone(),
            });
        }
    }

    /// Clears the liveness flag and releases the rendering surface. Any
    /// in-flight completion becomes a no-op regardless of sequence number.
    pub fn unmount(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.mounted = false;
        self.adapter.lock().unwrap().dispose();
    }

    pub fn snapshot(&self) -> LoadSnapshot {
        let inner = self.inner.lock().unwrap();
        let error = match &inner.state {
            LoadState::Error(message) => Some(message.clone()),
            _ => None,
        };
        LoadSnapshot {
            phase: inner.state.phase(),
            progress: inner.progress,
            error,
        }
    }

    /// Options applied by the most recent successful load, if any.
    pub fn applied_options(&self) -> Option<ChartOptions> {
        let inner = self.inner.lock().unwrap();
        match &inner.state {
            LoadState::Success(options) => Some(options.clone()),
            _ => None,
        }
    }

    fn is_current(inner: &MutexGuard<'_, InstanceState>, seq: u64) -> bool {
        inner.mounted && inner.seq == seq
    }

    fn log_discard(&self, seq: u64, inner: &MutexGuard<'_, InstanceState>) {
        tracing::debug!(
            chart_id = %self.descriptor.id,
            stale_seq = seq,
            current_seq = inner.seq,
            mounted = inner.mounted,
            "discarding superseded fetch result"
        );
    }
}
