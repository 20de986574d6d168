//! Resource stream aggregation
//!
//! Reduces the resource-entry list to a request count and byte totals.
//! Per entry, transfer weight falls back to the encoded body size when the
//! transfer size is zero: opaque cross-origin entries report zero transfer
//! bytes, and skipping them would silently under-report page weight. The
//! fallback is an approximation, not an error.

use crate::entry::ResourceEntry;
use serde::Serialize;

/// Request count and byte-weight totals for the observed resource stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResourceSummary {
    /// Number of resource entries observed
    pub count: usize,
    /// Transfer weight in bytes, with the encoded-size fallback applied
    pub transfer_bytes: u64,
    /// Raw encoded payload total in bytes
    pub encoded_bytes: u64,
}

/// Aggregate the full current resource-entry list
///
/// Idempotent: re-running simply recomputes from whatever entries are
/// currently known. Sums use Trueno SIMD reductions.
pub fn aggregate(resources: &[ResourceEntry]) -> ResourceSummary {
    if resources.is_empty() {
        return ResourceSummary::default();
    }

    let weights: Vec<f32> = resources.iter().map(|r| effective_weight(r) as f32).collect();
    let encoded: Vec<f32> = resources.iter().map(|r| r.encoded_body_size as f32).collect();

    let transfer_bytes = trueno::Vector::from_slice(&weights).sum().unwrap_or(0.0) as u64;
    let encoded_bytes = trueno::Vector::from_slice(&encoded).sum().unwrap_or(0.0) as u64;

    ResourceSummary {
        count: resources.len(),
        transfer_bytes,
        encoded_bytes,
    }
}

/// Per-entry weight with the cross-origin fallback
fn effective_weight(resource: &ResourceEntry) -> u64 {
    if resource.transfer_size == 0 {
        resource.encoded_body_size
    } else {
        resource.transfer_size
    }
}
