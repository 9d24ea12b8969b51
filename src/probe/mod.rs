//! Best-effort robots.txt and sitemap probes
//!
//! Probes are HEAD requests against the page origin. They never fail an
//! analysis: timeouts, error statuses and network failures all mean
//! "not found" and are only logged.

mod sitemap;

pub use sitemap::find_sitemap;

use crate::config::ProbeConfig;
use crate::url::page_origin;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

/// Path of the robots exclusion file
pub const ROBOTS_PATH: &str = "/robots.txt";

/// Outcome of the auxiliary probes for one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeReport {
    pub has_robots_txt: bool,
    pub has_sitemap: bool,
    /// The sitemap candidate that answered first
    pub sitemap_url: Option<String>,
}

/// Runs the robots.txt probe and the sitemap race concurrently
///
/// # Arguments
///
/// * `client` - Shared HTTP client
/// * `page_url` - The analyzed page; only its origin is used
/// * `config` - Probe timeout and sitemap candidates
pub async fn run_probes(client: &Client, page_url: &Url, config: &ProbeConfig) -> ProbeReport {
    let origin = page_origin(page_url);
    let timeout = config.timeout();

    let (has_robots_txt, sitemap) = tokio::join!(
        probe_robots(client, &origin, timeout),
        find_sitemap(client, &origin, &config.sitemap_candidates, timeout),
    );

    tracing::debug!(
        robots = has_robots_txt,
        sitemap = sitemap.is_some(),
        "Probes finished for {}",
        origin
    );

    ProbeReport {
        has_robots_txt,
        has_sitemap: sitemap.is_some(),
        sitemap_url: sitemap.map(|url| url.to_string()),
    }
}

/// Checks for `/robots.txt` at the origin
pub async fn probe_robots(client: &Client, origin: &Url, timeout: Duration) -> bool {
    match origin.join(ROBOTS_PATH) {
        Ok(url) => head_ok(client, &url, timeout).await,
        Err(e) => {
            tracing::debug!("Cannot build robots.txt URL from {}: {}", origin, e);
            false
        }
    }
}

/// Sends a HEAD request; true only for a 200 answer within `timeout`
pub(crate) async fn head_ok(client: &Client, url: &Url, timeout: Duration) -> bool {
    match client.head(url.clone()).timeout(timeout).send().await {
        Ok(response) if response.status() == StatusCode::OK => true,
        Ok(response) => {
            tracing::debug!(status = response.status().as_u16(), "Probe {} not found", url);
            false
        }
        Err(e) => {
            tracing::debug!("Probe {} failed: {}", url, e);
            false
        }
    }
}
