//! Per-category metric reducers
//!
//! Turns entry streams into the scalar snapshot values. Each reducer is a
//! small, order-tolerant state machine: TTFB and FCP set once, CLS only
//! grows, INP is last-qualifying-wins. Malformed or irrelevant entries are
//! skipped silently; no reducer ever errors.

use crate::entry::{
    InputEntry, LayoutShiftEntry, NavigationEntry, PaintEntry, FIRST_CONTENTFUL_PAINT,
};
use crate::snapshot::MetricSnapshot;

/// Stateful reducers feeding the metric snapshot
#[derive(Debug)]
pub struct MetricAccumulator {
    snapshot: MetricSnapshot,
    /// Entries with a shorter host-reported duration than this never surface
    /// as INP, matching the upstream event-timing filter contract
    inp_duration_threshold_ms: f64,
}

impl MetricAccumulator {
    pub fn new(inp_duration_threshold_ms: f64) -> Self {
        Self {
            snapshot: MetricSnapshot::default(),
            inp_duration_threshold_ms,
        }
    }

    /// TTFB is the navigation entry's response-start offset, set once
    pub fn on_navigation(&mut self, entry: &NavigationEntry) {
        if self.snapshot.ttfb_ms.is_none() {
            self.snapshot.ttfb_ms = Some(entry.response_start);
        }
    }

    /// FCP comes from the first paint entry named `first-contentful-paint`;
    /// later same-name entries cannot occur per page and are ignored
    pub fn on_paint(&mut self, entry: &PaintEntry) {
        if entry.name == FIRST_CONTENTFUL_PAINT && self.snapshot.fcp_ms.is_none() {
            self.snapshot.fcp_ms = Some(entry.start_time);
        }
    }

    /// CLS sums shift scores, excluding shifts within the recent-input
    /// grace window; the sum only grows for the life of the page view
    pub fn on_layout_shift(&mut self, entry: &LayoutShiftEntry) {
        if !entry.had_recent_input {
            self.snapshot.cls += entry.value;
        }
    }

    /// INP surfaces the latest qualifying interaction's processing latency.
    /// Last-write-wins rather than worst-of-session; see `DESIGN.md`.
    pub fn on_input(&mut self, entry: &InputEntry) {
        if entry.duration > self.inp_duration_threshold_ms {
            self.snapshot.inp_ms = Some(entry.processing_end - entry.start_time);
        }
    }

    /// Record the current LCP value (the decomposer's clamped render time,
    /// or the raw candidate timestamp when decomposition is unavailable)
    pub fn set_lcp(&mut self, lcp_ms: f64) {
        self.snapshot.lcp_ms = Some(lcp_ms);
    }

    /// Record resource totals computed at settle
    pub fn set_resource_totals(&mut self, request_count: usize, transfer_bytes: u64) {
        self.snapshot.request_count = request_count;
        self.snapshot.transfer_bytes = transfer_bytes;
    }

    /// The snapshot-so-far
    pub fn current(&self) -> &MetricSnapshot {
        &self.snapshot
    }

    /// Consume the accumulator, yielding the final snapshot
    pub fn into_snapshot(self) -> MetricSnapshot {
        self.snapshot
    }
}
