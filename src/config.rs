//! Runtime configuration for Page-Harvest
//!
//! Two small structs cover everything the engine needs: how to identify
//! itself on the wire ([`FetcherConfig`]) and how far a crawl may range
//! ([`CrawlOptions`]). The TLS-insecure toggle lives here as explicit
//! per-instance configuration so it is testable without touching process
//! environment from inside the crawl logic; `main` materializes it once per
//! process from the CLI flag or the `PAGE_HARVEST_INSECURE` variable.

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 12;

/// Default identity string sent as the User-Agent header
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/122.0.0.0 Safari/537.36";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Identity string used for the User-Agent header and robots.txt checks
    pub user_agent: String,

    /// Total request timeout in seconds
    pub timeout_secs: u64,

    /// Disable TLS certificate verification (deployment-time toggle)
    pub danger_accept_invalid_certs: bool,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            danger_accept_invalid_certs: false,
        }
    }
}

impl FetcherConfig {
    /// Returns a config with TLS verification disabled
    pub fn insecure() -> Self {
        Self {
            danger_accept_invalid_certs: true,
            ..Self::default()
        }
    }
}

/// Bounds and policy switches for one crawl run
#[derive(Debug, Clone, Copy)]
pub struct CrawlOptions {
    /// Maximum link depth from the start URL (depth 0 is the start page)
    pub max_depth: u32,

    /// Maximum number of URLs dequeued and counted as visited
    pub max_pages: usize,

    /// Skip robots.txt entirely and allow every URL
    pub ignore_robots: bool,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            max_depth: 2,
            max_pages: 50,
            ignore_robots: false,
        }
    }
}
