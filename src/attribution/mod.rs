// Causal Phase Attribution for Largest Contentful Paint
//
// Objective: Attribute the LCP render timestamp to the phase that actually
// spent the time, not just report the headline number.
//
// Key Insight: A 3s LCP caused by a late-discovered hero image and a 3s LCP
// caused by a slow origin need opposite fixes. The four-phase split (TTFB,
// resource load delay, resource load time, element render delay) makes the
// bottleneck visible.

mod hotspot;
mod phases;

pub use hotspot::{dominant_phase, phase_shares, PhaseKind, PhaseShare};
pub use phases::{decompose, LcpPhaseBreakdown};
