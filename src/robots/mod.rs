//! Robots.txt handling module
//!
//! Fetches and parses one robots.txt per crawl and answers "may this
//! identity fetch this URL" queries. Unavailability is an explicit,
//! recoverable signal ([`PolicyUnavailable`]) that the caller interprets as
//! allow-all; robots trouble must never abort a crawl.

mod parser;

pub use parser::ParsedRobots;

use reqwest::Client;
use thiserror::Error;
use url::Url;

/// The robots policy could not be retrieved
///
/// Carries the reason for the log line; callers treat any value of this
/// error as "allow everything".
#[derive(Debug, Error)]
#[error("robots.txt unavailable: {reason}")]
pub struct PolicyUnavailable {
    pub reason: String,
}

/// The per-crawl robots gate
///
/// Built once before the crawl loop and immutable afterwards. `AllowAll`
/// covers both the explicit ignore-robots switch and an unavailable policy.
#[derive(Debug, Clone)]
pub enum RobotsGate {
    AllowAll,
    Policy(ParsedRobots),
}

impl RobotsGate {
    /// Checks whether the given URL may be fetched by the given identity
    pub fn allows(&self, url: &str, user_agent: &str) -> bool {
        match self {
            RobotsGate::AllowAll => true,
            RobotsGate::Policy(robots) => robots.is_allowed(url, user_agent),
        }
    }
}

/// Derives the robots.txt URL from a start URL's scheme and host
///
/// # Returns
///
/// * `Some(Url)` - `scheme://host[:port]/robots.txt`
/// * `None` - The start URL has no host
pub fn robots_url(start: &Url) -> Option<Url> {
    let host = start.host_str()?;
    let mut base = format!("{}://{}", start.scheme(), host);
    if let Some(port) = start.port() {
        base.push_str(&format!(":{}", port));
    }
    base.push_str("/robots.txt");
    Url::parse(&base).ok()
}

/// Fetches and parses robots.txt for the start URL's host
///
/// One attempt only. Any failure - network error, timeout, non-success
/// status, hostless URL - yields [`PolicyUnavailable`].
///
/// # Arguments
///
/// * `client` - The HTTP client to use (shares the crawl's timeout policy)
/// * `start` - The crawl's start URL
pub async fn fetch_robots(client: &Client, start: &Url) -> Result<ParsedRobots, PolicyUnavailable> {
    let robots_url = robots_url(start).ok_or_else(|| PolicyUnavailable {
        reason: format!("no host in {}", start),
    })?;

    let response = client
        .get(robots_url.as_str())
        .send()
        .await
        .map_err(|e| PolicyUnavailable {
            reason: e.to_string(),
        })?;

    if !response.status().is_success() {
        return Err(PolicyUnavailable {
            reason: format!("HTTP {}", response.status().as_u16()),
        });
    }

    let content = response.text().await.map_err(|e| PolicyUnavailable {
        reason: e.to_string(),
    })?;

    Ok(ParsedRobots::from_content(&content))
}

/// Builds the robots gate for one crawl
///
/// `ignore_robots` skips the fetch entirely; an unavailable policy degrades
/// to allow-all with a debug log line.
pub async fn build_gate(client: &Client, start: &Url, ignore_robots: bool) -> RobotsGate {
    if ignore_robots {
        return RobotsGate::AllowAll;
    }

    match fetch_robots(client, start).await {
        Ok(robots) => RobotsGate::Policy(robots),
        Err(e) => {
            tracing::debug!("{}; crawling without a robots policy", e);
            RobotsGate::AllowAll
        }
    }
}
