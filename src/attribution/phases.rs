// LCP phase decomposition
//
// Splits the LCP render timestamp into four sequential, non-overlapping
// phases. The clamping chain encodes the causal ordering guarantee:
// ttfb <= request_start <= response_end <= render_time, so no phase can go
// negative even when cross-origin timing restrictions report zeros.

use crate::entry::{LcpEntry, NavigationEntry, ResourceEntry};
use serde::Serialize;
use std::fmt;

/// Four ordered, non-negative phase durations summing to the LCP value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LcpPhaseBreakdown {
    /// Navigation start to first response byte of the document
    pub ttfb: f64,
    /// First document byte to the LCP resource request being dispatched
    pub resource_load_delay: f64,
    /// Request dispatch to last response byte of the LCP resource
    pub resource_load_time: f64,
    /// Resource fully loaded to the element actually painting
    pub element_render_delay: f64,
    /// Clamped render timestamp; this is the externally reported LCP value
    pub render_time: f64,
}

impl LcpPhaseBreakdown {
    /// Sum of the four phases; reconstructs `render_time`
    pub fn total(&self) -> f64 {
        self.ttfb + self.resource_load_delay + self.resource_load_time + self.element_render_delay
    }
}

impl fmt::Display for LcpPhaseBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LCP {:.0}ms = ttfb {:.0} + load_delay {:.0} + load_time {:.0} + render_delay {:.0}",
            self.render_time,
            self.ttfb,
            self.resource_load_delay,
            self.resource_load_time,
            self.element_render_delay
        )
    }
}

/// Decompose an LCP candidate into its four causal phases
///
/// Recomputed from currently-known values on every trigger: the navigation
/// entry, the matched resource entry, and the LCP candidate may arrive in
/// any relative order, and each may legitimately be absent.
///
/// Returns `None` when the candidate has no resolvable resource URL (inline
/// text or background-image LCP cannot be attributed to a network phase in
/// this model); the raw LCP value is still reported through the snapshot.
///
/// # Example
/// ```
/// use vitalscope::attribution::decompose;
/// use vitalscope::entry::{LcpEntry, NavigationEntry, ResourceEntry};
///
/// let nav = NavigationEntry { response_start: 120.0, ..Default::default() };
/// let hero = ResourceEntry {
///     name: "https://example.com/hero.webp".to_string(),
///     request_start: 150.0,
///     response_end: 900.0,
///     ..Default::default()
/// };
/// let lcp = LcpEntry {
///     start_time: 1200.0,
///     url: Some("https://example.com/hero.webp".to_string()),
///     ..Default::default()
/// };
///
/// let phases = decompose(Some(&nav), &[hero], &lcp).unwrap();
/// assert_eq!(phases.resource_load_delay, 30.0);
/// assert_eq!(phases.total(), phases.render_time);
/// ```
pub fn decompose(
    navigation: Option<&NavigationEntry>,
    resources: &[ResourceEntry],
    lcp: &LcpEntry,
) -> Option<LcpPhaseBreakdown> {
    let url = lcp.resource_url()?;

    let ttfb = navigation.map(|nav| nav.response_start).unwrap_or(0.0);

    // First resource whose name matches the candidate URL; absence is valid
    // (the element may be served from a non-observed source)
    let matched = resources.iter().find(|r| r.name == url);

    let request_start = ttfb.max(matched.map(|r| r.request_start).unwrap_or(0.0));
    let response_end = request_start.max(matched.map(|r| r.response_end).unwrap_or(0.0));
    let render_time = response_end.max(lcp.start_time);

    Some(LcpPhaseBreakdown {
        ttfb,
        resource_load_delay: request_start - ttfb,
        resource_load_time: response_end - request_start,
        element_render_delay: render_time - response_end,
        render_time,
    })
}
