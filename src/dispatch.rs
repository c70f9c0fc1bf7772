//! Request dispatch - the thin boundary between invocation payloads and the
//! crawl core
//!
//! An invocation payload is one JSON object with a `mode` plus parameters.
//! It is validated here into a tagged [`Request`] so the engine and the
//! extractor only ever see strongly-typed parameter structs; everything that
//! can go wrong at the boundary comes back as a structured error envelope,
//! never a crash.

use crate::config::{CrawlOptions, FetcherConfig};
use crate::crawler::CrawlEngine;
use crate::extract::{extract, PageRecord};
use crate::fetcher::{build_http_client, fetch};
use crate::{HarvestError, Result};
use reqwest::Client;
use serde_json::{json, Value};
use url::Url;

/// Parameters for a single-page scrape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeParams {
    pub url: String,
}

/// Parameters for a bounded site crawl
#[derive(Debug, Clone)]
pub struct CrawlParams {
    pub url: String,
    pub options: CrawlOptions,
}

/// A validated invocation
#[derive(Debug, Clone)]
pub enum Request {
    Scrape(ScrapeParams),
    Crawl(CrawlParams),
}

impl Request {
    /// Validates a raw payload into a request
    ///
    /// A missing `mode` defaults to scrape. Integer and boolean parameters
    /// also accept their string forms, because the command-line `key=value`
    /// fallback produces strings (`maxDepth=3`, `ignoreRobots=yes`).
    pub fn from_payload(payload: &Value) -> Result<Request> {
        let mode = match payload.get("mode") {
            None | Some(Value::Null) => "scrape",
            Some(Value::String(s)) => s.as_str(),
            Some(other) => return Err(HarvestError::UnknownMode(other.to_string())),
        };

        let url = payload
            .get("url")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or(HarvestError::MissingUrl);

        match mode {
            "scrape" => Ok(Request::Scrape(ScrapeParams {
                url: url?.to_string(),
            })),
            "crawl" => {
                let defaults = CrawlOptions::default();
                let options = CrawlOptions {
                    max_depth: payload
                        .get("maxDepth")
                        .and_then(integer_field)
                        .unwrap_or(defaults.max_depth as u64) as u32,
                    max_pages: payload
                        .get("maxPages")
                        .and_then(integer_field)
                        .unwrap_or(defaults.max_pages as u64)
                        as usize,
                    ignore_robots: payload
                        .get("ignoreRobots")
                        .map(truthy)
                        .unwrap_or(defaults.ignore_robots),
                };
                Ok(Request::Crawl(CrawlParams {
                    url: url?.to_string(),
                    options,
                }))
            }
            other => Err(HarvestError::UnknownMode(other.to_string())),
        }
    }
}

/// Reads an integer parameter given as a JSON number or a numeric string
fn integer_field(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Interprets a flag parameter: JSON true, 1, or the strings 1/true/yes
fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_u64() == Some(1),
        Value::String(s) => matches!(s.trim().to_lowercase().as_str(), "1" | "true" | "yes"),
        _ => false,
    }
}

/// Builds the `{"error": ...}` envelope
fn error_envelope(message: impl std::fmt::Display) -> Value {
    json!({ "error": message.to_string() })
}

/// Fetches and extracts one page
async fn scrape(client: &Client, url: &str) -> Result<PageRecord> {
    let url = Url::parse(url)?;
    let html = fetch(client, url.as_str()).await?;
    Ok(extract(&url, &html))
}

/// Runs a validated request
///
/// Scrape surfaces the first fetch/parse error. Crawl never fails once its
/// start URL parses: per-page failures are absorbed by the engine.
async fn dispatch(config: &FetcherConfig, request: Request) -> Result<Value> {
    let client = build_http_client(config)?;

    match request {
        Request::Scrape(params) => {
            let record = scrape(&client, &params.url).await?;
            Ok(serde_json::to_value(record)?)
        }
        Request::Crawl(params) => {
            let start = Url::parse(&params.url)?;
            let engine = CrawlEngine::new(client, config.user_agent.clone(), params.options);
            let result = engine.run(&start).await;
            Ok(serde_json::to_value(result)?)
        }
    }
}

/// Validates and runs a raw payload, always producing a JSON envelope
///
/// Failures become `{"error": <message>}` objects; the caller never sees a
/// raw error.
pub async fn handle(config: &FetcherConfig, payload: &Value) -> Value {
    let outcome = match Request::from_payload(payload) {
        Ok(request) => dispatch(config, request).await,
        Err(e) => Err(e),
    };

    outcome.unwrap_or_else(|e| error_envelope(e))
}
