//! Structured end-of-load report
//!
//! Emitted once after the settle delay, carrying the milestone values and
//! resource totals a log sink wants in one record. JSON-serializable for
//! machine sinks, `tracing`-emitted for the default sink.

use crate::resources::ResourceSummary;
use crate::snapshot::MetricSnapshot;
use serde::Serialize;

/// Marker logged in place of a URL when the LCP element is inline text or a
/// CSS background image with no resolvable resource
pub const INLINE_OR_BACKGROUND: &str = "inline-or-background";

/// One structured record describing the finished page load
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadReport {
    /// Time to first byte, ms
    pub ttfb_ms: Option<f64>,
    /// DOMContentLoaded milestone, ms
    pub dom_ready_ms: Option<f64>,
    /// Load-event-end milestone, ms
    pub load_complete_ms: Option<f64>,
    /// Reported LCP value, ms
    pub lcp_ms: Option<f64>,
    /// Host reference to the LCP element, when known
    pub lcp_element: Option<String>,
    /// LCP resource URL, or the explicit inline/background marker
    pub lcp_url: String,
    /// Resource request count
    pub request_count: usize,
    /// Raw encoded payload total, bytes
    pub encoded_bytes: u64,
    /// Transfer total with the cross-origin fallback applied, bytes
    pub transfer_bytes: u64,
}

impl LoadReport {
    /// Assemble the report from the settled snapshot and resource summary
    pub fn new(
        snapshot: &MetricSnapshot,
        summary: &ResourceSummary,
        dom_ready_ms: Option<f64>,
        load_complete_ms: Option<f64>,
        lcp_element: Option<String>,
        lcp_url: Option<String>,
    ) -> Self {
        Self {
            ttfb_ms: snapshot.ttfb_ms,
            dom_ready_ms,
            load_complete_ms,
            lcp_ms: snapshot.lcp_ms,
            lcp_element,
            lcp_url: lcp_url.unwrap_or_else(|| INLINE_OR_BACKGROUND.to_string()),
            request_count: summary.count,
            encoded_bytes: summary.encoded_bytes,
            transfer_bytes: summary.transfer_bytes,
        }
    }

    /// Emit the report through the default log sink
    pub fn emit(&self) {
        tracing::info!(
            ttfb_ms = self.ttfb_ms,
            dom_ready_ms = self.dom_ready_ms,
            load_complete_ms = self.load_complete_ms,
            lcp_ms = self.lcp_ms,
            lcp_element = self.lcp_element.as_deref(),
            lcp_url = %self.lcp_url,
            request_count = self.request_count,
            encoded_kb = %format_kb(self.encoded_bytes),
            transfer_kb = %format_kb(self.transfer_bytes),
            "page load settled"
        );
    }

    /// JSON rendition for machine sinks
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Render a millisecond value for display; unknown renders as an ellipsis
pub fn format_ms(value: Option<f64>) -> String {
    match value {
        Some(ms) => format!("{ms:.0} ms"),
        None => "…".to_string(),
    }
}

/// Render a byte count as kilobytes with one decimal
pub fn format_kb(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}
