//! Engine output snapshot
//!
//! The snapshot is the single mutable state record the engine owns. It is
//! rebuilt on every relevant update and pushed to the presentation adapter;
//! time metrics stay `None` until their entry arrives so "unknown" is never
//! confused with an excellent zero.

use crate::classify::{classify, Metric, Rating};
use serde::Serialize;

/// Latest known value for each surfaced metric, plus resource totals
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricSnapshot {
    /// Time to first byte, ms; None until the navigation entry arrives
    pub ttfb_ms: Option<f64>,
    /// First contentful paint, ms
    pub fcp_ms: Option<f64>,
    /// Largest contentful paint, ms (clamped render time of the current
    /// candidate)
    pub lcp_ms: Option<f64>,
    /// Running layout-shift sum; 0.0 is a real score, not "unknown"
    pub cls: f64,
    /// Interaction to next paint, ms; None until a qualifying interaction
    pub inp_ms: Option<f64>,
    /// Resource request count (populated at settle)
    pub request_count: usize,
    /// Total transfer weight in bytes, with the encoded-size fallback
    /// applied (populated at settle)
    pub transfer_bytes: u64,
}

impl MetricSnapshot {
    /// The stored value for a metric, None when still unknown
    pub fn value_of(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Ttfb => self.ttfb_ms,
            Metric::Fcp => self.fcp_ms,
            Metric::Lcp => self.lcp_ms,
            Metric::Cls => Some(self.cls),
            Metric::Inp => self.inp_ms,
        }
    }

    /// Rating for a metric, None when the value is still unknown
    pub fn rating_of(&self, metric: Metric) -> Option<Rating> {
        self.value_of(metric).map(|v| classify(metric, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_snapshot_is_all_unknown() {
        let snapshot = MetricSnapshot::default();
        assert_eq!(snapshot.ttfb_ms, None);
        assert_eq!(snapshot.fcp_ms, None);
        assert_eq!(snapshot.lcp_ms, None);
        assert_eq!(snapshot.inp_ms, None);
        assert_eq!(snapshot.cls, 0.0);
        assert_eq!(snapshot.request_count, 0);
    }

    #[test]
    fn test_rating_of_unknown_metric_is_none() {
        let snapshot = MetricSnapshot::default();
        assert_eq!(snapshot.rating_of(Metric::Ttfb), None);
        assert_eq!(snapshot.rating_of(Metric::Lcp), None);
        // CLS always has a value: zero shift is a perfect score
        assert_eq!(snapshot.rating_of(Metric::Cls), Some(Rating::Good));
    }

    #[test]
    fn test_rating_of_known_metric() {
        let snapshot = MetricSnapshot {
            lcp_ms: Some(4200.0),
            ttfb_ms: Some(150.0),
            ..Default::default()
        };
        assert_eq!(snapshot.rating_of(Metric::Lcp), Some(Rating::Poor));
        assert_eq!(snapshot.rating_of(Metric::Ttfb), Some(Rating::Good));
    }

    #[test]
    fn test_snapshot_serializes_unknowns_as_null() {
        let snapshot = MetricSnapshot {
            fcp_ms: Some(812.0),
            ..Default::default()
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["fcp_ms"], 812.0);
        assert!(json["lcp_ms"].is_null());
    }
}
