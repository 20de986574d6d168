//! Entry subscriptions with buffered replay
//!
//! The engine consumes batches; the host produces single entries from
//! callback context. `ReplayBuffer` bridges the two with one lock-free queue
//! per category: the host pushes on its hot path, the embedder drains
//! batches into the engine. A category subscribed with `buffered` delivery
//! replays the entries queued before subscription as its first batch;
//! unbuffered subscription discards that backlog.

use crate::engine::VitalsEngine;
use crate::entry::{EntryCategory, PerformanceEntry};
use crossbeam::queue::SegQueue;
use thiserror::Error;
use tracing::trace;

/// Subscription misuse errors; entry ingestion itself never fails
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SourceError {
    #[error("category {0} already has an active subscription")]
    AlreadySubscribed(EntryCategory),
    #[error("category {0} has no active subscription")]
    NotSubscribed(EntryCategory),
}

/// A source of per-category entry batches
///
/// Batches are lazy and non-restartable: each poll yields whatever has
/// arrived since the previous poll, and an exhausted moment simply yields an
/// empty batch rather than ending the stream.
pub trait EntrySource {
    /// Take the next batch for a category; empty when nothing is pending
    fn poll_batch(&mut self, category: EntryCategory) -> Result<Vec<PerformanceEntry>, SourceError>;
}

/// In-memory entry source backed by per-category lock-free queues
pub struct ReplayBuffer {
    queues: [SegQueue<PerformanceEntry>; EntryCategory::ALL.len()],
    subscribed: [bool; EntryCategory::ALL.len()],
}

impl ReplayBuffer {
    pub fn new() -> Self {
        Self {
            queues: Default::default(),
            subscribed: [false; EntryCategory::ALL.len()],
        }
    }

    /// Host hot path: queue one entry under its own category
    pub fn push(&self, entry: PerformanceEntry) {
        self.queues[entry.category().index()].push(entry);
    }

    /// Activate a category subscription
    ///
    /// With `buffered` delivery the entries already queued stay pending and
    /// come out in the first poll; otherwise the backlog is discarded so
    /// only post-subscription entries are delivered.
    pub fn subscribe(&mut self, category: EntryCategory, buffered: bool) -> Result<(), SourceError> {
        let idx = category.index();
        if self.subscribed[idx] {
            return Err(SourceError::AlreadySubscribed(category));
        }
        if !buffered {
            while self.queues[idx].pop().is_some() {}
        }
        self.subscribed[idx] = true;
        trace!(category = %category, buffered, "subscription activated");
        Ok(())
    }

    /// Whether a category subscription is active
    pub fn is_subscribed(&self, category: EntryCategory) -> bool {
        self.subscribed[category.index()]
    }
}

impl Default for ReplayBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl EntrySource for ReplayBuffer {
    fn poll_batch(&mut self, category: EntryCategory) -> Result<Vec<PerformanceEntry>, SourceError> {
        let idx = category.index();
        if !self.subscribed[idx] {
            return Err(SourceError::NotSubscribed(category));
        }
        let mut batch = Vec::new();
        while let Some(entry) = self.queues[idx].pop() {
            batch.push(entry);
        }
        Ok(batch)
    }
}

/// Drain every subscribed category into the engine, one batch each
///
/// Categories are pumped in a fixed order; cross-category ordering is not
/// meaningful anyway, and the engine recomputes from known values on every
/// batch. Unsubscribed categories are skipped.
pub fn pump<S: EntrySource>(source: &mut S, engine: &mut VitalsEngine) {
    for category in EntryCategory::ALL {
        match source.poll_batch(category) {
            Ok(batch) if !batch.is_empty() => engine.ingest(batch),
            Ok(_) => {}
            Err(SourceError::NotSubscribed(_)) => {}
            Err(err) => trace!(error = %err, "poll failed"),
        }
    }
}
