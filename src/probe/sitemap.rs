//! Sitemap discovery as a short-circuiting race

use super::head_ok;
use reqwest::Client;
use std::time::Duration;
use tokio::task::JoinSet;
use url::Url;

/// Probes every sitemap candidate concurrently and returns the first hit
///
/// Each candidate runs under its own `timeout`. The first 200 answer wins and
/// the remaining probes are aborted. Returns `None` when no candidate answers.
pub async fn find_sitemap(
    client: &Client,
    origin: &Url,
    candidates: &[String],
    timeout: Duration,
) -> Option<Url> {
    let mut probes = JoinSet::new();

    for candidate in candidates {
        let url = match origin.join(candidate) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!("Skipping sitemap candidate {}: {}", candidate, e);
                continue;
            }
        };

        let client = client.clone();
        probes.spawn(async move {
            let found = head_ok(&client, &url, timeout).await;
            (url, found)
        });
    }

    while let Some(joined) = probes.join_next().await {
        match joined {
            Ok((url, true)) => {
                probes.abort_all();
                return Some(url);
            }
            Ok((_, false)) => {}
            Err(e) => tracing::debug!("Sitemap probe task failed: {}", e),
        }
    }

    None
}
