//! HTTP fetcher implementation
//!
//! This module handles the primary page request:
//! - Building the HTTP client with the configured user agent and budgets
//! - GET of the target page, following a bounded number of redirects
//! - Classification of the outcome (analyzable page vs. fatal failure)

use crate::config::Config;
use crate::FetchError;
use reqwest::{redirect::Policy, Client, StatusCode};
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Instant;
use url::Url;

/// Result of a successful page fetch
///
/// Any status below 500 counts as a fetched page; 4xx pages are still
/// analyzed.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchOutcome {
    /// Decoded response body
    #[serde(skip)]
    pub html: String,

    /// HTTP status code
    pub status_code: u16,

    /// Wall-clock time from request start until the body was read
    pub response_time_ms: u64,

    /// URL after redirects
    pub final_url: String,

    /// Response headers, lowercase names
    pub headers: BTreeMap<String, String>,
}

impl FetchOutcome {
    /// Size of the markup in bytes
    pub fn byte_len(&self) -> usize {
        self.html.len()
    }

    /// Looks up a response header by (lowercase) name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

/// Builds an HTTP client with proper configuration
///
/// The same client serves the page fetch and the probes; probes override the
/// timeout per request.
///
/// # Example
///
/// ```no_run
/// use sumi_lens::config::Config;
/// use sumi_lens::fetcher::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.header_value())
        .timeout(config.fetch.timeout())
        .connect_timeout(config.fetch.connect_timeout())
        .redirect(Policy::limited(config.fetch.max_redirects))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches the page to analyze
///
/// # Outcome Classification
///
/// | Condition | Result |
/// |-----------|--------|
/// | Status < 500 | `Ok(FetchOutcome)` |
/// | Status >= 500 | `FetchError::ServerError` |
/// | Timeout | `FetchError::Timeout` |
/// | DNS / refused / TLS | `FetchError::Connect` |
/// | Redirect budget exceeded | `FetchError::Redirect` |
/// | Body read failure | `FetchError::Body` |
///
/// There is no retry; callers may re-invoke.
pub async fn fetch_page(client: &Client, url: &Url) -> Result<FetchOutcome, FetchError> {
    let started = Instant::now();

    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(classify_error)?;

    let status = response.status();
    if is_fatal_status(status) {
        return Err(FetchError::ServerError {
            status: status.as_u16(),
        });
    }

    let final_url = response.url().to_string();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_ascii_lowercase(), v.to_string()))
        })
        .collect();

    let html = response.text().await.map_err(|e| {
        if e.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Body(e.to_string())
        }
    })?;

    let response_time_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    tracing::debug!(
        status = status.as_u16(),
        bytes = html.len(),
        elapsed_ms = response_time_ms,
        "Fetched {}",
        final_url
    );

    Ok(FetchOutcome {
        html,
        status_code: status.as_u16(),
        response_time_ms,
        final_url,
        headers,
    })
}

/// Any status of 500 or above, including non-standard codes past 599
fn is_fatal_status(status: StatusCode) -> bool {
    status.as_u16() >= 500
}

/// Maps a transport error onto the fetch taxonomy
fn classify_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_redirect() {
        FetchError::Redirect(error.to_string())
    } else if error.is_connect() {
        FetchError::Connect(error.to_string())
    } else {
        FetchError::Transport(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&Config::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_fatal_status_threshold() {
        let fatal = |code: u16| is_fatal_status(StatusCode::from_u16(code).unwrap());

        assert!(!fatal(200));
        assert!(!fatal(404));
        assert!(!fatal(499));
        assert!(fatal(500));
        assert!(fatal(503));
        assert!(fatal(600));
        assert!(fatal(999));
    }

    #[test]
    fn test_header_lookup() {
        let mut outcome = FetchOutcome::default();
        outcome
            .headers
            .insert("cache-control".to_string(), "max-age=60".to_string());
        assert_eq!(outcome.header("cache-control"), Some("max-age=60"));
        assert_eq!(outcome.header("expires"), None);
    }

    #[test]
    fn test_byte_len_counts_utf8_bytes() {
        let outcome = FetchOutcome {
            html: "héllo".to_string(),
            ..Default::default()
        };
        assert_eq!(outcome.byte_len(), 6);
    }

    // Network behavior is covered with wiremock in tests/analyze_tests.rs
}
