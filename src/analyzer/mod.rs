//! Analysis pipeline
//!
//! This module runs one analysis end to end:
//! - Validating the request URL before any network activity
//! - Fetching the page (the only fatal network step)
//! - Parsing the markup on a blocking thread
//! - Running the extractors and the probes concurrently
//! - Scoring, finding generation and result assembly
//!
//! The optional overall budget wraps the whole run; exceeding it fails the
//! analysis instead of returning partial results.

use crate::config::Config;
use crate::document::{parse_document, Document};
use crate::extract::{
    extract_accessibility, extract_content, extract_images, extract_links, extract_outline,
    extract_performance, extract_social, extract_technical, link_base, FeatureSet,
};
use crate::fetcher::{build_http_client, fetch_page, FetchOutcome};
use crate::findings::{generate_findings, generate_recommendations, FindingBuckets};
use crate::probe::run_probes;
use crate::scoring::{compute_scores, ScoreSet};
use crate::url::{extract_domain, validate_request_url};
use crate::{LensError, Result};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use url::Url;

/// The complete analysis of one page
///
/// Serializes with the camelCase keys of the report schema; the feature
/// records are flattened to the top level.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// The requested URL
    pub url: String,
    pub domain: String,
    /// URL after redirects
    pub final_url: String,
    pub analyzed_at: DateTime<Utc>,
    #[serde(flatten)]
    pub features: FeatureSet,
    pub scores: ScoreSet,
    pub detailed_findings: FindingBuckets,
    pub recommendations: Vec<String>,
}

/// Analyzes a single page
///
/// Builds a fresh HTTP client from `config` and delegates to
/// [`analyze_with_client`].
///
/// # Errors
///
/// * `LensError::Validation` - the URL is not absolute http(s) with a host
/// * `LensError::Fetch` - the page could not be retrieved
/// * `LensError::Timeout` - the overall budget ran out
///
/// # Example
///
/// ```no_run
/// use sumi_lens::{analyze, Config};
///
/// # async fn run() -> sumi_lens::Result<()> {
/// let result = analyze("https://example.com", &Config::default()).await?;
/// println!("Overall score: {}", result.scores.overall);
/// # Ok(())
/// # }
/// ```
pub async fn analyze(url: &str, config: &Config) -> Result<AnalysisResult> {
    let page_url = validate_request_url(url)?;
    let client = build_http_client(config)?;
    analyze_with_client(&client, &page_url, config).await
}

/// Analyzes a page with a caller-provided client
///
/// The client is shared by the page fetch and the probes.
pub async fn analyze_with_client(
    client: &Client,
    page_url: &Url,
    config: &Config,
) -> Result<AnalysisResult> {
    let Some(budget) = config.analysis.overall_timeout() else {
        return run_pipeline(client, page_url, config).await;
    };

    match tokio::time::timeout(budget, run_pipeline(client, page_url, config)).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!("Analysis of {} exceeded {:?}", page_url, budget);
            Err(LensError::Timeout {
                url: page_url.to_string(),
                budget_secs: budget.as_secs(),
            })
        }
    }
}

async fn run_pipeline(client: &Client, page_url: &Url, config: &Config) -> Result<AnalysisResult> {
    tracing::info!("Analyzing {}", page_url);

    let fetch = fetch_page(client, page_url).await.map_err(|source| {
        tracing::warn!("Failed to fetch {}: {}", page_url, source);
        LensError::Fetch {
            url: page_url.to_string(),
            source,
        }
    })?;
    let fetch = Arc::new(fetch);

    let markup = Arc::clone(&fetch);
    let doc = Arc::new(blocking(move || parse_document(&markup.html)).await?);
    tracing::debug!(elements = doc.len(), "Parsed {}", fetch.final_url);

    let (probes, features) = tokio::join!(
        run_probes(client, page_url, &config.probe),
        extract_concurrently(
            Arc::clone(&doc),
            Arc::clone(&fetch),
            page_url.clone(),
            config.analysis.keyword_limit,
        ),
    );
    let mut features = features?;
    features.technical.apply_probes(&probes);

    let scores = compute_scores(&features);
    let detailed_findings = generate_findings(&features);
    let recommendations = generate_recommendations(&features);

    tracing::info!(
        overall = scores.overall,
        critical = detailed_findings.critical_issues.len(),
        warnings = detailed_findings.warnings.len(),
        "Finished analyzing {}",
        page_url
    );

    Ok(AnalysisResult {
        url: page_url.to_string(),
        domain: extract_domain(page_url).unwrap_or_default(),
        final_url: fetch.final_url.clone(),
        analyzed_at: Utc::now(),
        features,
        scores,
        detailed_findings,
        recommendations,
    })
}

/// Runs every extractor on its own blocking task and joins them
async fn extract_concurrently(
    doc: Arc<Document>,
    fetch: Arc<FetchOutcome>,
    page_url: Url,
    keyword_limit: usize,
) -> Result<FeatureSet> {
    let base = link_base(&fetch, &page_url);

    let ((outline, content), technical, images, links, performance, social_meta, accessibility) = tokio::try_join!(
        blocking({
            let doc = Arc::clone(&doc);
            move || (extract_outline(&doc), extract_content(&doc, keyword_limit))
        }),
        blocking({
            let doc = Arc::clone(&doc);
            let fetch = Arc::clone(&fetch);
            move || extract_technical(&doc, &fetch, &page_url)
        }),
        blocking({
            let doc = Arc::clone(&doc);
            move || extract_images(&doc)
        }),
        blocking({
            let doc = Arc::clone(&doc);
            move || extract_links(&doc, &base)
        }),
        blocking({
            let doc = Arc::clone(&doc);
            let fetch = Arc::clone(&fetch);
            move || extract_performance(&doc, &fetch)
        }),
        blocking({
            let doc = Arc::clone(&doc);
            move || extract_social(&doc)
        }),
        blocking({
            let doc = Arc::clone(&doc);
            move || extract_accessibility(&doc)
        }),
    )?;

    tracing::debug!(
        words = content.word_count,
        images = images.total,
        links = links.internal + links.external,
        "Extracted features"
    );

    Ok(FeatureSet {
        outline,
        content,
        technical,
        images,
        links,
        performance,
        social_meta,
        accessibility,
    })
}

async fn blocking<T, F>(task: F) -> Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| LensError::Task(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UrlError;

    #[tokio::test]
    async fn test_invalid_url_is_rejected_before_fetching() {
        let result = analyze("ftp://example.com/file", &Config::default()).await;
        assert!(matches!(
            result,
            Err(LensError::Validation(UrlError::InvalidScheme(_)))
        ));

        let result = analyze("not a url", &Config::default()).await;
        assert!(matches!(result, Err(LensError::Validation(_))));
    }

    #[tokio::test]
    async fn test_concurrent_extraction_matches_sequential() {
        let html = r#"<!DOCTYPE html><html lang="en"><head>
            <title>Concurrent extraction check</title>
            <meta name="description" content="Same result either way">
            <meta property="og:title" content="OG">
        </head><body>
            <h1>Heading</h1>
            <p>Some words to count in this paragraph.</p>
            <a href="/inner">in</a><a href="https://other.org/">out</a>
            <img src="/a-1920.jpg">
        </body></html>"#;
        let fetch = FetchOutcome {
            html: html.to_string(),
            status_code: 200,
            response_time_ms: 80,
            final_url: "https://example.com/".to_string(),
            ..Default::default()
        };
        let page_url = Url::parse("https://example.com/").unwrap();
        let doc = parse_document(html);

        let sequential = crate::extract::extract_features(&doc, &fetch, &page_url, 10);
        let concurrent = extract_concurrently(Arc::new(doc), Arc::new(fetch), page_url, 10)
            .await
            .unwrap();

        assert_eq!(sequential, concurrent);
    }

    #[test]
    fn test_result_serializes_with_report_keys() {
        let result = AnalysisResult {
            url: "https://example.com/".to_string(),
            domain: "example.com".to_string(),
            final_url: "https://example.com/".to_string(),
            analyzed_at: Utc::now(),
            features: FeatureSet::default(),
            scores: ScoreSet::default(),
            detailed_findings: FindingBuckets::default(),
            recommendations: vec![],
        };
        let json = serde_json::to_value(&result).unwrap();

        for key in [
            "url",
            "domain",
            "finalUrl",
            "analyzedAt",
            "title",
            "metaDescription",
            "h1Tags",
            "pageContent",
            "technicalSeo",
            "images",
            "links",
            "performance",
            "socialMeta",
            "accessibility",
            "scores",
            "detailedFindings",
            "recommendations",
        ] {
            assert!(json.get(key).is_some(), "missing key {}", key);
        }
    }
}
