//! Crawl frontier
//!
//! FIFO queue of URLs awaiting fetch, paired with their discovery depth.
//! A side set of queued URL strings gives O(1) membership checks so the
//! same candidate is never enqueued twice while it is waiting.

use std::collections::{HashSet, VecDeque};
use url::Url;

/// A URL awaiting fetch, with the depth at which it was discovered
///
/// Depth is non-decreasing along enqueue order, so FIFO dequeue preserves
/// earliest-discovered, shallowest-first order.
#[derive(Debug, Clone)]
pub struct FrontierEntry {
    pub url: Url,
    pub depth: u32,
}

/// FIFO frontier with duplicate suppression
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<FrontierEntry>,
    queued: HashSet<String>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues a URL unless it is already waiting in the frontier
    ///
    /// # Returns
    ///
    /// * `true` - The entry was enqueued
    /// * `false` - The URL was already queued
    pub fn push(&mut self, url: Url, depth: u32) -> bool {
        if !self.queued.insert(url.to_string()) {
            return false;
        }
        self.queue.push_back(FrontierEntry { url, depth });
        true
    }

    /// Dequeues the head entry (earliest discovered)
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        let entry = self.queue.pop_front()?;
        self.queued.remove(entry.url.as_str());
        Some(entry)
    }

    /// Number of entries currently waiting
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
