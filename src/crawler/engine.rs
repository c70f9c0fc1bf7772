//! Crawl engine - main crawl orchestration logic
//!
//! One [`CrawlEngine::run`] call is one crawl: it owns the frontier and the
//! visited set for the duration of the run, drives the robots gate, the
//! fetcher, and the extractor, and aggregates per-page results and media
//! into a [`CrawlResult`]. A single page failure never aborts the crawl; the
//! only termination conditions are an exhausted frontier and the page cap.

use crate::config::CrawlOptions;
use crate::crawler::frontier::Frontier;
use crate::extract::{extract, utc_timestamp, MediaCategory, PageRecord};
use crate::fetcher::fetch;
use crate::robots::build_gate;
use reqwest::Client;
use scraper::{Html, Selector};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use url::Url;

/// Cap on aggregated media URLs per category
const MAX_MEDIA_PER_CATEGORY: usize = 100;

/// Aggregated outcome of one crawl run
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlResult {
    /// The start URL as given
    pub start: String,

    /// Number of pages successfully fetched and extracted
    pub pages_crawled: usize,

    /// Per-page records, in fetch order
    pub results: Vec<PageRecord>,

    /// Media URLs per category, deduplicated across the whole crawl,
    /// first-discovered order, at most 100 each
    pub media: BTreeMap<MediaCategory, Vec<String>>,

    /// Completion time, ISO-8601 UTC
    pub timestamp: String,
}

/// Crawl-wide media aggregation with first-discovered ordering
#[derive(Debug, Default)]
struct MediaAggregate {
    ordered: BTreeMap<MediaCategory, Vec<String>>,
    seen: HashSet<(MediaCategory, String)>,
}

impl MediaAggregate {
    fn new() -> Self {
        let mut ordered = BTreeMap::new();
        for category in MediaCategory::ALL {
            ordered.insert(category, Vec::new());
        }
        Self {
            ordered,
            seen: HashSet::new(),
        }
    }

    /// Merges one page's media into the aggregate
    fn merge(&mut self, record: &PageRecord) {
        for (category, urls) in &record.media {
            for url in urls {
                if self.seen.insert((*category, url.clone())) {
                    self.ordered.entry(*category).or_default().push(url.clone());
                }
            }
        }
    }

    /// Consumes the aggregate, truncating each category to the cap
    fn into_capped(mut self) -> BTreeMap<MediaCategory, Vec<String>> {
        for urls in self.ordered.values_mut() {
            urls.truncate(MAX_MEDIA_PER_CATEGORY);
        }
        self.ordered
    }
}

/// Mutable crawl state, owned exclusively by the engine for one run
struct CrawlState {
    frontier: Frontier,
    visited: HashSet<String>,
    results: Vec<PageRecord>,
    media: MediaAggregate,
}

impl CrawlState {
    fn seeded(start: &Url) -> Self {
        let mut frontier = Frontier::new();
        frontier.push(start.clone(), 0);
        Self {
            frontier,
            visited: HashSet::new(),
            results: Vec::new(),
            media: MediaAggregate::new(),
        }
    }
}

/// The bounded breadth-first crawl engine
pub struct CrawlEngine {
    client: Client,
    user_agent: String,
    options: CrawlOptions,
}

impl CrawlEngine {
    /// Creates a new engine
    ///
    /// # Arguments
    ///
    /// * `client` - The HTTP client (carries timeout and TLS policy)
    /// * `user_agent` - Identity used for robots checks; must match the
    ///   client's User-Agent header
    /// * `options` - Depth/page bounds and the ignore-robots switch
    pub fn new(client: Client, user_agent: String, options: CrawlOptions) -> Self {
        Self {
            client,
            user_agent,
            options,
        }
    }

    /// Runs one crawl from the given start URL
    ///
    /// Always returns a [`CrawlResult`]; per-page failures (robots denial,
    /// fetch errors) mark the URL visited and move on.
    pub async fn run(&self, start: &Url) -> CrawlResult {
        let CrawlOptions {
            max_depth,
            max_pages,
            ignore_robots,
        } = self.options;

        tracing::info!(
            "starting crawl of {} (max_depth={}, max_pages={}, ignore_robots={})",
            start,
            max_depth,
            max_pages,
            ignore_robots
        );

        let gate = build_gate(&self.client, start, ignore_robots).await;
        let mut state = CrawlState::seeded(start);

        while state.visited.len() < max_pages {
            let Some(entry) = state.frontier.pop() else {
                break;
            };
            let url_str = entry.url.to_string();

            // Skip silently: no state change, no visited mark
            if state.visited.contains(&url_str) || entry.depth > max_depth {
                continue;
            }

            // Robots denial consumes the URL but produces no record
            if !gate.allows(&url_str, &self.user_agent) {
                tracing::debug!("robots disallows {}", url_str);
                state.visited.insert(url_str);
                continue;
            }

            tracing::debug!("fetching {} at depth {}", url_str, entry.depth);
            let html = match fetch(&self.client, &url_str).await {
                Ok(html) => html,
                Err(e) => {
                    tracing::debug!("skipping page: {}", e);
                    state.visited.insert(url_str);
                    continue;
                }
            };

            let record = extract(&entry.url, &html);
            state.media.merge(&record);
            state.results.push(record);
            state.visited.insert(url_str);

            self.enqueue_children(&mut state, start, &entry.url, entry.depth, &html);
        }

        tracing::info!(
            "crawl of {} complete: {} pages, {} visited",
            start,
            state.results.len(),
            state.visited.len()
        );

        CrawlResult {
            start: start.to_string(),
            pages_crawled: state.results.len(),
            results: state.results,
            media: state.media.into_capped(),
            timestamp: utc_timestamp(),
        }
    }

    /// Discovers outbound links on a fetched page and grows the frontier
    ///
    /// Traversal filtering is independent of the links stored in the page
    /// record: candidates are resolved to absolute URLs, confined to the
    /// start host, and deduplicated against the visited set and the
    /// frontier. Enqueuing stops once visited + queued reaches the page cap
    /// (a soft cap: entries already queued stay queued).
    fn enqueue_children(
        &self,
        state: &mut CrawlState,
        start: &Url,
        page_url: &Url,
        depth: u32,
        html: &str,
    ) {
        if state.visited.len() + state.frontier.len() >= self.options.max_pages {
            return;
        }

        for candidate in discover_links(html, page_url) {
            if !same_host(&candidate, start) {
                continue;
            }
            if state.visited.contains(candidate.as_str()) {
                continue;
            }
            state.frontier.push(candidate, depth + 1);
            if state.visited.len() + state.frontier.len() >= self.options.max_pages {
                break;
            }
        }
    }
}

/// Parses a page's anchors into resolved traversal candidates
///
/// Pure-fragment hrefs (starting with `#`) are never candidates; anything
/// that fails to resolve against the page URL is dropped.
fn discover_links(html: &str, page_url: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| {
            let href = element.value().attr("href")?;
            if href.starts_with('#') {
                return None;
            }
            page_url.join(href).ok()
        })
        .collect()
}

/// Compares network hosts the way the traversal confines itself: same host
/// name and same effective port
fn same_host(a: &Url, b: &Url) -> bool {
    a.host_str() == b.host_str() && a.port_or_known_default() == b.port_or_known_default()
}
