//! Bounded breadth-first crawl module
//!
//! The engine owns the frontier and visited set for one run and aggregates
//! per-page extraction results under depth and page-count bounds.

mod engine;
mod frontier;

pub use engine::{CrawlEngine, CrawlResult};
pub use frontier::{Frontier, FrontierEntry};
