//! Engine lifecycle and update plumbing
//!
//! One `VitalsEngine` instance per page view, owned by the embedder: create
//! at observation start, feed entry batches as the host reports them, call
//! `settle` once after the load milestone plus the settle delay, tear down
//! on navigation away. Single-threaded and push-based throughout; every
//! batch recomputes derived values and pushes a snapshot to the sink.

use crate::accumulator::MetricAccumulator;
use crate::attribution::{decompose, LcpPhaseBreakdown};
use crate::entry::{LcpEntry, NavigationEntry, PerformanceEntry, ResourceEntry};
use crate::report::LoadReport;
use crate::resources::{self, ResourceSummary};
use crate::snapshot::MetricSnapshot;
use std::time::Duration;
use tracing::debug;

/// Engine construction parameters
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// How long after load-complete the host should wait before calling
    /// `settle`, letting late resource entries land
    pub settle_delay: Duration,
    /// Input entries with a host duration at or below this never surface
    /// as INP
    pub inp_duration_threshold_ms: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(600),
            inp_duration_threshold_ms: 40.0,
        }
    }
}

/// Presentation seam: receives a snapshot push on every engine update
///
/// The sink maps classifications to visual treatment; it is never consulted
/// for decomposition logic.
pub trait SnapshotSink {
    fn on_snapshot(&mut self, snapshot: &MetricSnapshot, breakdown: Option<&LcpPhaseBreakdown>);
}

/// Metric-decomposition engine for one page view
pub struct VitalsEngine {
    config: EngineConfig,
    accumulator: MetricAccumulator,
    /// Full resource list is retained: late LCP candidates need matching and
    /// settle-time aggregation recomputes from it
    observed_resources: Vec<ResourceEntry>,
    navigation: Option<NavigationEntry>,
    /// Latest LCP candidate; superseded by later, larger candidates
    lcp_candidate: Option<LcpEntry>,
    breakdown: Option<LcpPhaseBreakdown>,
    sink: Option<Box<dyn SnapshotSink>>,
}

impl VitalsEngine {
    pub fn new(config: EngineConfig) -> Self {
        let inp_threshold = config.inp_duration_threshold_ms;
        Self {
            config,
            accumulator: MetricAccumulator::new(inp_threshold),
            observed_resources: Vec::new(),
            navigation: None,
            lcp_candidate: None,
            breakdown: None,
            sink: None,
        }
    }

    /// Attach the presentation adapter
    pub fn with_sink(mut self, sink: Box<dyn SnapshotSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Ingest one batch of entries and push the refreshed snapshot
    ///
    /// Batches may mix categories; within one category the host supplies
    /// chronological order, across categories nothing is assumed. The LCP
    /// breakdown is recomputed from currently-known values on every batch,
    /// so a navigation or resource entry arriving after the LCP candidate
    /// still completes the attribution.
    pub fn ingest<I>(&mut self, batch: I)
    where
        I: IntoIterator<Item = PerformanceEntry>,
    {
        let mut count = 0usize;
        for entry in batch {
            self.apply(entry);
            count += 1;
        }
        if count == 0 {
            return;
        }
        debug!(entries = count, "batch ingested");

        self.recompute_lcp();
        self.push_snapshot();
    }

    fn apply(&mut self, entry: PerformanceEntry) {
        match entry {
            PerformanceEntry::Navigation(nav) => {
                self.accumulator.on_navigation(&nav);
                if self.navigation.is_none() {
                    self.navigation = Some(nav);
                }
            }
            PerformanceEntry::Resource(res) => {
                self.observed_resources.push(res);
            }
            PerformanceEntry::Paint(paint) => {
                self.accumulator.on_paint(&paint);
            }
            PerformanceEntry::LayoutShift(shift) => {
                self.accumulator.on_layout_shift(&shift);
            }
            PerformanceEntry::Input(input) => {
                self.accumulator.on_input(&input);
            }
            PerformanceEntry::Lcp(candidate) => {
                // Candidates are cumulative; keep the latest one
                let supersedes = self
                    .lcp_candidate
                    .as_ref()
                    .map(|current| candidate.start_time >= current.start_time)
                    .unwrap_or(true);
                if supersedes {
                    self.lcp_candidate = Some(candidate);
                }
            }
        }
    }

    /// Rebuild the breakdown and reported LCP value from known entries
    fn recompute_lcp(&mut self) {
        let Some(candidate) = &self.lcp_candidate else {
            return;
        };

        self.breakdown = decompose(
            self.navigation.as_ref(),
            &self.observed_resources,
            candidate,
        );

        // The clamped render time is the reported value when decomposition
        // is available; the raw candidate timestamp otherwise
        let lcp_ms = self
            .breakdown
            .map(|b| b.render_time)
            .unwrap_or(candidate.start_time);
        self.accumulator.set_lcp(lcp_ms);
    }

    fn push_snapshot(&mut self) {
        if let Some(sink) = self.sink.as_mut() {
            sink.on_snapshot(self.accumulator.current(), self.breakdown.as_ref());
        }
    }

    /// The snapshot-so-far
    pub fn snapshot(&self) -> &MetricSnapshot {
        self.accumulator.current()
    }

    /// The current LCP phase breakdown, when one is attributable
    pub fn breakdown(&self) -> Option<&LcpPhaseBreakdown> {
        self.breakdown.as_ref()
    }

    /// Aggregate resources and emit the structured load report
    ///
    /// The host calls this once, after the load-complete milestone plus
    /// `config.settle_delay`. Calling it again is harmless: aggregation
    /// recomputes from the full current resource list.
    pub fn settle(&mut self) -> LoadReport {
        let summary: ResourceSummary = resources::aggregate(&self.observed_resources);
        self.accumulator
            .set_resource_totals(summary.count, summary.transfer_bytes);

        let (lcp_element, lcp_url) = match &self.lcp_candidate {
            Some(candidate) => (
                candidate.element.clone(),
                candidate.resource_url().map(str::to_string),
            ),
            None => (None, None),
        };

        let report = LoadReport::new(
            self.accumulator.current(),
            &summary,
            self.navigation.as_ref().map(|n| n.dom_content_loaded),
            self.navigation.as_ref().map(|n| n.load_event_end),
            lcp_element,
            lcp_url,
        );
        report.emit();

        self.push_snapshot();
        report
    }

    /// End observation, discarding all per-page state
    ///
    /// Consumes the engine: the returned snapshot is the final reading for
    /// the page view, nothing persists.
    pub fn teardown(self) -> MetricSnapshot {
        debug!("engine torn down");
        self.accumulator.into_snapshot()
    }
}

impl Default for VitalsEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{LayoutShiftEntry, PaintEntry, FIRST_CONTENTFUL_PAINT};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn lcp_entry(start_time: f64, url: Option<&str>) -> PerformanceEntry {
        PerformanceEntry::Lcp(LcpEntry {
            start_time,
            url: url.map(str::to_string),
            ..Default::default()
        })
    }

    struct Capture(Rc<RefCell<Vec<MetricSnapshot>>>);

    impl SnapshotSink for Capture {
        fn on_snapshot(&mut self, snapshot: &MetricSnapshot, _: Option<&LcpPhaseBreakdown>) {
            self.0.borrow_mut().push(snapshot.clone());
        }
    }

    #[test]
    fn test_empty_batch_is_a_no_op() {
        let pushes = Rc::new(RefCell::new(Vec::new()));
        let mut engine = VitalsEngine::default().with_sink(Box::new(Capture(Rc::clone(&pushes))));
        engine.ingest(Vec::new());
        assert_eq!(engine.snapshot(), &MetricSnapshot::default());
        assert!(pushes.borrow().is_empty(), "empty batch must not push");
    }

    #[test]
    fn test_breakdown_completes_when_entries_arrive_in_any_order() {
        let hero = "https://example.com/hero.webp";

        // LCP first, then the resource, then navigation
        let mut engine = VitalsEngine::default();
        engine.ingest([lcp_entry(1200.0, Some(hero))]);
        assert!(engine.breakdown().is_some());
        assert_eq!(engine.breakdown().unwrap().ttfb, 0.0);

        engine.ingest([PerformanceEntry::Resource(ResourceEntry {
            name: hero.to_string(),
            request_start: 150.0,
            response_end: 900.0,
            ..Default::default()
        })]);
        engine.ingest([PerformanceEntry::Navigation(NavigationEntry {
            response_start: 120.0,
            ..Default::default()
        })]);

        let breakdown = engine.breakdown().unwrap();
        assert_eq!(breakdown.ttfb, 120.0);
        assert_eq!(breakdown.resource_load_delay, 30.0);
        assert_eq!(breakdown.resource_load_time, 750.0);
        assert_eq!(breakdown.element_render_delay, 300.0);
        assert_eq!(engine.snapshot().lcp_ms, Some(1200.0));
    }

    #[test]
    fn test_larger_candidate_supersedes() {
        let mut engine = VitalsEngine::default();
        engine.ingest([lcp_entry(600.0, None)]);
        assert_eq!(engine.snapshot().lcp_ms, Some(600.0));

        engine.ingest([lcp_entry(1400.0, None)]);
        assert_eq!(engine.snapshot().lcp_ms, Some(1400.0));
    }

    #[test]
    fn test_no_url_candidate_reports_value_without_breakdown() {
        let mut engine = VitalsEngine::default();
        engine.ingest([lcp_entry(1200.0, None)]);
        assert!(engine.breakdown().is_none());
        assert_eq!(engine.snapshot().lcp_ms, Some(1200.0));
    }

    #[test]
    fn test_settle_aggregates_and_reports() {
        let mut engine = VitalsEngine::default();
        engine.ingest([
            PerformanceEntry::Navigation(NavigationEntry {
                response_start: 120.0,
                dom_content_loaded: 650.0,
                load_event_end: 1500.0,
            }),
            PerformanceEntry::Resource(ResourceEntry {
                name: "https://example.com/app.js".to_string(),
                transfer_size: 0,
                encoded_body_size: 5000,
                ..Default::default()
            }),
            PerformanceEntry::Resource(ResourceEntry {
                name: "https://example.com/app.css".to_string(),
                transfer_size: 2048,
                encoded_body_size: 6000,
                ..Default::default()
            }),
        ]);

        let report = engine.settle();
        assert_eq!(report.request_count, 2);
        assert_eq!(report.transfer_bytes, 7048);
        assert_eq!(report.encoded_bytes, 11_000);
        assert_eq!(report.dom_ready_ms, Some(650.0));
        assert_eq!(report.load_complete_ms, Some(1500.0));
        assert_eq!(engine.snapshot().request_count, 2);

        // Idempotent: late resources simply join the recomputation
        let again = engine.settle();
        assert_eq!(again.request_count, 2);
        assert_eq!(again.transfer_bytes, 7048);
    }

    #[test]
    fn test_snapshot_pushed_per_batch() {
        let pushes = Rc::new(RefCell::new(Vec::new()));
        let mut engine = VitalsEngine::default().with_sink(Box::new(Capture(Rc::clone(&pushes))));
        engine.ingest([PerformanceEntry::Paint(PaintEntry {
            name: FIRST_CONTENTFUL_PAINT.to_string(),
            start_time: 812.0,
        })]);
        engine.ingest([PerformanceEntry::LayoutShift(LayoutShiftEntry {
            value: 0.02,
            had_recent_input: false,
            start_time: 900.0,
        })]);

        let pushes = pushes.borrow();
        assert_eq!(pushes.len(), 2);
        assert_eq!(pushes[0].fcp_ms, Some(812.0));
        assert_eq!(pushes[1].cls, 0.02);
        assert_eq!(engine.snapshot().fcp_ms, Some(812.0));
    }

    #[test]
    fn test_teardown_returns_final_snapshot() {
        let mut engine = VitalsEngine::default();
        engine.ingest([lcp_entry(1000.0, None)]);
        let final_snapshot = engine.teardown();
        assert_eq!(final_snapshot.lcp_ms, Some(1000.0));
    }
}
