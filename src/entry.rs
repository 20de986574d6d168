//! Typed performance-entry model
//!
//! Entries arrive from the host's entry-reporting mechanism as batches of one
//! category each. Timestamps are `f64` milliseconds relative to navigation
//! start (DOMHighResTimeStamp semantics). Within a category batches are
//! chronological; across categories no ordering is guaranteed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Entry name that marks the first-contentful-paint event in the paint stream
pub const FIRST_CONTENTFUL_PAINT: &str = "first-contentful-paint";

/// Logical entry categories, one per subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryCategory {
    /// Navigation timing (one entry per page view)
    Navigation,
    /// Resource timing (one entry per fetched resource)
    Resource,
    /// Paint timing (first-paint, first-contentful-paint)
    Paint,
    /// Layout-shift scoring events
    LayoutShift,
    /// Input responsiveness events (event timing)
    InputEvent,
    /// Largest-contentful-paint candidates
    LargestContentfulPaint,
}

impl EntryCategory {
    /// All categories, in the order batches are pumped each cycle
    pub const ALL: [EntryCategory; 6] = [
        EntryCategory::Navigation,
        EntryCategory::Resource,
        EntryCategory::Paint,
        EntryCategory::LayoutShift,
        EntryCategory::InputEvent,
        EntryCategory::LargestContentfulPaint,
    ];

    /// Wire name matching the host observer type
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryCategory::Navigation => "navigation",
            EntryCategory::Resource => "resource",
            EntryCategory::Paint => "paint",
            EntryCategory::LayoutShift => "layout-shift",
            EntryCategory::InputEvent => "event",
            EntryCategory::LargestContentfulPaint => "largest-contentful-paint",
        }
    }

    /// Dense index for per-category storage
    pub fn index(&self) -> usize {
        match self {
            EntryCategory::Navigation => 0,
            EntryCategory::Resource => 1,
            EntryCategory::Paint => 2,
            EntryCategory::LayoutShift => 3,
            EntryCategory::InputEvent => 4,
            EntryCategory::LargestContentfulPaint => 5,
        }
    }
}

impl fmt::Display for EntryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Navigation timing entry (milestones of the document fetch itself)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavigationEntry {
    /// First response byte offset (TTFB)
    pub response_start: f64,
    /// DOMContentLoaded milestone
    pub dom_content_loaded: f64,
    /// Load-event-end milestone (drives the settle trigger)
    pub load_event_end: f64,
}

/// Resource timing entry for one fetched subresource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceEntry {
    /// Resource URL (matches an LCP entry's `url` when the LCP element is a
    /// loaded resource)
    pub name: String,
    /// Request dispatch offset; cross-origin entries without
    /// Timing-Allow-Origin report 0.0 here
    pub request_start: f64,
    /// Last response byte offset
    pub response_end: f64,
    /// Bytes moved over the network; 0 for opaque cross-origin entries
    pub transfer_size: u64,
    /// Encoded payload size, reported even when transfer size is opaque
    pub encoded_body_size: u64,
}

/// Paint timing entry (`first-paint`, `first-contentful-paint`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaintEntry {
    pub name: String,
    pub start_time: f64,
}

/// One layout-shift scoring event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutShiftEntry {
    pub start_time: f64,
    /// Unitless shift score contribution
    pub value: f64,
    /// Shifts within the input grace window do not count against CLS
    pub had_recent_input: bool,
}

/// One input-responsiveness event from the event-timing stream
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputEntry {
    pub start_time: f64,
    /// End of event-handler processing; `processing_end - start_time` is the
    /// surfaced INP value
    pub processing_end: f64,
    /// Host-reported total event duration, checked against the
    /// responsiveness threshold
    pub duration: f64,
}

/// One largest-contentful-paint candidate
///
/// Candidates are cumulative: later, larger candidates supersede earlier
/// ones until the page reaches an interactive or hidden state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LcpEntry {
    /// Candidate render timestamp (pre-clamping LCP value)
    pub start_time: f64,
    /// Resource URL when the element is a loaded resource; absent for
    /// inline text or background-image candidates
    pub url: Option<String>,
    /// Host reference to the painted element (tag or selector string)
    pub element: Option<String>,
    /// Painted area in px², used by the host to rank candidates
    pub size: u64,
}

impl LcpEntry {
    /// The candidate's resource URL, treating empty strings as absent
    pub fn resource_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.is_empty())
    }
}

/// A single entry of any category, as delivered in subscription batches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PerformanceEntry {
    Navigation(NavigationEntry),
    Resource(ResourceEntry),
    Paint(PaintEntry),
    LayoutShift(LayoutShiftEntry),
    Input(InputEntry),
    Lcp(LcpEntry),
}

impl PerformanceEntry {
    /// The category this entry belongs to
    pub fn category(&self) -> EntryCategory {
        match self {
            PerformanceEntry::Navigation(_) => EntryCategory::Navigation,
            PerformanceEntry::Resource(_) => EntryCategory::Resource,
            PerformanceEntry::Paint(_) => EntryCategory::Paint,
            PerformanceEntry::LayoutShift(_) => EntryCategory::LayoutShift,
            PerformanceEntry::Input(_) => EntryCategory::InputEvent,
            PerformanceEntry::Lcp(_) => EntryCategory::LargestContentfulPaint,
        }
    }
}
