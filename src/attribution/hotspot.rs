// Dominant-phase identification for LCP breakdowns
//
// Ranks the four phases by their share of the render time and points at the
// one that actually needs fixing.

use crate::attribution::phases::LcpPhaseBreakdown;
use serde::Serialize;
use std::fmt;

/// One of the four LCP phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PhaseKind {
    Ttfb,
    ResourceLoadDelay,
    ResourceLoadTime,
    ElementRenderDelay,
}

impl PhaseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseKind::Ttfb => "ttfb",
            PhaseKind::ResourceLoadDelay => "resource-load-delay",
            PhaseKind::ResourceLoadTime => "resource-load-time",
            PhaseKind::ElementRenderDelay => "element-render-delay",
        }
    }

    /// Actionable explanation for a dominant phase
    fn explain(&self) -> &'static str {
        match self {
            PhaseKind::Ttfb => "Server response dominates. Look at origin latency, caching, CDN.",
            PhaseKind::ResourceLoadDelay => {
                "The LCP resource was discovered late. Preload it or inline the reference."
            }
            PhaseKind::ResourceLoadTime => {
                "The LCP resource downloads slowly. Compress, resize, or serve closer to the user."
            }
            PhaseKind::ElementRenderDelay => {
                "The resource arrived but painting waited. Check render-blocking scripts and styles."
            }
        }
    }
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A phase's share of the total LCP time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseShare {
    pub phase: PhaseKind,
    /// Phase duration in ms
    pub duration_ms: f64,
    /// Percentage of the render time
    pub percentage: f64,
    /// Human-readable explanation
    pub explanation: String,
}

impl PhaseShare {
    pub fn to_report_string(&self) -> String {
        format!(
            "{} ({:.1}%, {:.0}ms)\n   {}",
            self.phase, self.percentage, self.duration_ms, self.explanation
        )
    }
}

/// Break a decomposition into per-phase shares, sorted by duration
/// (descending). Empty when the render time is zero.
pub fn phase_shares(breakdown: &LcpPhaseBreakdown) -> Vec<PhaseShare> {
    if breakdown.render_time <= 0.0 {
        return Vec::new();
    }

    let mut shares: Vec<PhaseShare> = [
        (PhaseKind::Ttfb, breakdown.ttfb),
        (PhaseKind::ResourceLoadDelay, breakdown.resource_load_delay),
        (PhaseKind::ResourceLoadTime, breakdown.resource_load_time),
        (
            PhaseKind::ElementRenderDelay,
            breakdown.element_render_delay,
        ),
    ]
    .into_iter()
    .map(|(phase, duration_ms)| PhaseShare {
        phase,
        duration_ms,
        percentage: duration_ms / breakdown.render_time * 100.0,
        explanation: phase.explain().to_string(),
    })
    .collect();

    shares.sort_by(|a, b| {
        b.duration_ms
            .partial_cmp(&a.duration_ms)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    shares
}

/// The single phase consuming the largest share of the LCP, if any
pub fn dominant_phase(breakdown: &LcpPhaseBreakdown) -> Option<PhaseShare> {
    phase_shares(breakdown).into_iter().next()
}
