// Completion aggregator for "all charts rendered" timing
use std::collections::HashSet;
use std::time::Instant;

/// Tracks which charts have reported ready and freezes the elapsed time the
/// moment the expected count is first reached. Further ready signals grow the
/// set idempotently but never move the frozen timing.
#[derive(Debug)]
pub struct CompletionAggregator {
    expected: usize,
    ready: HashSet<String>,
    started_at: Instant,
    elapsed_ms: Option<f64>,
}

impl CompletionAggregator {
    pub fn new(expected: usize) -> Self {
        Self {
            expected,
            ready: HashSet::new(),
            started_at: Instant::now(),
            elapsed_ms: None,
        }
    }

    /// Clears the ready set and restarts the clock for a new configuration.
    pub fn reset(&mut self, expected: usize) {
        self.expected = expected;
        self.ready.clear();
        self.started_at = Instant::now();
        self.elapsed_ms = None;
    }

    pub fn mark_ready(&mut self, chart_id: &str) {
        self.ready.insert(chart_id.to_string());
        if self.elapsed_ms.is_none() && self.ready.len() >= self.expected {
            self.elapsed_ms = Some(self.started_at.elapsed().as_secs_f64() * 1000.0);
        }
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed_ms.is_some()
    }

    /// None until `expected` distinct charts have reported; frozen afterwards.
    pub fn elapsed_millis(&self) -> Option<f64> {
        self.elapsed_ms
    }
}
