//! Robots.txt parser implementation
//!
//! Thin wrapper around the robotstxt crate, providing a simplified
//! interface for checking whether URLs are allowed.

use robotstxt::DefaultMatcher;

/// Parsed robots.txt data
///
/// Holds the raw robots.txt content and answers per-URL allow queries.
/// Matching happens on demand; the matcher itself is stateless between
/// queries, so this type stays cheap to clone and immutable after
/// construction.
#[derive(Debug, Clone)]
pub struct ParsedRobots {
    /// Raw robots.txt content (empty string means allow all)
    content: String,
}

impl ParsedRobots {
    /// Creates a new ParsedRobots from raw robots.txt content
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
        }
    }

    /// Checks if a URL is allowed for the given user agent
    ///
    /// # Arguments
    ///
    /// * `url` - The full URL to check (e.g., "https://example.com/page")
    /// * `user_agent` - The user agent string
    ///
    /// # Returns
    ///
    /// * `true` - If the URL is allowed (or the content is empty)
    /// * `false` - If the URL is disallowed
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        if self.content.is_empty() {
            return true;
        }

        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, user_agent, url)
    }
}
