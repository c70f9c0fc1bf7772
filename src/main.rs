//! Page-Harvest main entry point
//!
//! Reads one invocation payload - JSON on stdin, or `key=value` tokens on
//! the command line - and prints one JSON envelope on stdout. Logs go to
//! stderr so the envelope stays machine-readable.

use clap::Parser;
use page_harvest::config::FetcherConfig;
use page_harvest::dispatch::handle;
use serde_json::Value;
use std::io::{IsTerminal, Read};
use tracing_subscriber::EnvFilter;

/// Page-Harvest: a polite page scraper and site crawler
///
/// Scrapes structured content from a single page (`mode=scrape`) or from a
/// bounded same-host breadth-first crawl (`mode=crawl`). The payload is
/// read as JSON from stdin when piped; otherwise it is assembled from the
/// `key=value` tokens given on the command line.
#[derive(Parser, Debug)]
#[command(name = "page-harvest")]
#[command(version = "1.0.0")]
#[command(about = "Scrape a page or crawl a site into structured JSON", long_about = None)]
struct Cli {
    /// Payload fields as key=value tokens (e.g. mode=crawl url=https://... maxDepth=3)
    #[arg(value_name = "KEY=VALUE")]
    fields: Vec<String>,

    /// Disable TLS certificate verification (deployment toggle; also
    /// honored via the PAGE_HARVEST_INSECURE environment variable)
    #[arg(long)]
    insecure: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = if cli.insecure || insecure_from_env() {
        tracing::debug!("TLS certificate verification disabled");
        FetcherConfig::insecure()
    } else {
        FetcherConfig::default()
    };

    let payload = read_payload(&cli.fields);
    let envelope = handle(&config, &payload).await;

    // Errors are data: the envelope carries them, the process still exits 0
    println!("{}", envelope);
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("page_harvest=warn"),
            1 => EnvFilter::new("page_harvest=info"),
            2 => EnvFilter::new("page_harvest=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Reads the deployment-time insecure toggle from the environment
fn insecure_from_env() -> bool {
    std::env::var("PAGE_HARVEST_INSECURE")
        .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Assembles the invocation payload
///
/// Piped stdin wins: non-blank stdin text is parsed as JSON, and
/// unparseable text degrades to an empty payload rather than an I/O error.
/// Without piped input the payload is built from `key=value` tokens, all
/// values as strings (the dispatcher coerces them).
fn read_payload(fields: &[String]) -> Value {
    if !std::io::stdin().is_terminal() {
        let mut raw = String::new();
        if std::io::stdin().read_to_string(&mut raw).is_ok() && !raw.trim().is_empty() {
            return serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!("stdin was not valid JSON ({}), ignoring it", e);
                Value::Object(Default::default())
            });
        }
    }

    payload_from_fields(fields)
}

/// Builds a payload object from `key=value` command-line tokens
fn payload_from_fields(fields: &[String]) -> Value {
    let mut object = serde_json::Map::new();
    for field in fields {
        if let Some((key, value)) = field.split_once('=') {
            object.insert(key.to_string(), Value::String(value.to_string()));
        } else {
            tracing::warn!("ignoring token without '=': {}", field);
        }
    }
    Value::Object(object)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_from_fields() {
        let fields = vec![
            "mode=crawl".to_string(),
            "url=https://example.com".to_string(),
            "maxDepth=3".to_string(),
        ];
        let payload = payload_from_fields(&fields);
        assert_eq!(payload["mode"], "crawl");
        assert_eq!(payload["url"], "https://example.com");
        assert_eq!(payload["maxDepth"], "3");
    }

    #[test]
    fn test_payload_value_may_contain_equals() {
        let fields = vec!["url=https://example.com/?a=1".to_string()];
        let payload = payload_from_fields(&fields);
        assert_eq!(payload["url"], "https://example.com/?a=1");
    }

    #[test]
    fn test_tokens_without_equals_ignored() {
        let fields = vec!["garbage".to_string()];
        let payload = payload_from_fields(&fields);
        assert!(payload.as_object().unwrap().is_empty());
    }
}
