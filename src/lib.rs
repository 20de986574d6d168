//! Vitalscope - web performance vitals engine with causal LCP phase attribution
//!
//! This library consumes a page's raw timestamped performance events and
//! derives the Core Web Vitals (TTFB, FCP, LCP, CLS, INP), a four-phase
//! causal breakdown of the Largest Contentful Paint, per-metric threshold
//! ratings, and a resource-weight summary. Presentation stays external: the
//! engine pushes snapshots through a sink trait and emits one structured
//! load report after settle.

pub mod accumulator;
pub mod attribution;
pub mod classify;
pub mod engine;
pub mod entry;
pub mod report;
pub mod resources;
pub mod snapshot;
pub mod source;

use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
pub fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}
