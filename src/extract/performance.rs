//! Performance heuristics
//!
//! Everything here is estimated from the markup and the primary response; no
//! sub-resource is requested.

use crate::document::Document;
use crate::fetcher::FetchOutcome;
use serde::{Deserialize, Serialize};

/// Substring marking a minified script
pub const MINIFIED_JS_HINT: &str = ".min.js";

/// Substring marking a minified stylesheet
pub const MINIFIED_CSS_HINT: &str = ".min.css";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceFeatures {
    #[serde(rename = "loadTime")]
    pub load_time_ms: u64,
    /// Markup size in KiB, rounded
    #[serde(rename = "pageSize")]
    pub page_size_kb: u64,
    /// 1 (document) + external scripts + stylesheets + image tags
    pub requests: usize,
    #[serde(rename = "minifiedCSS")]
    pub minified_css: bool,
    #[serde(rename = "minifiedJS")]
    pub minified_js: bool,
    /// `cache-control` or `expires` present on the response
    pub cache_headers: bool,
}

pub fn extract_performance(doc: &Document, fetch: &FetchOutcome) -> PerformanceFeatures {
    let scripts: Vec<&str> = doc
        .select_all("script")
        .filter_map(|el| el.attr("src"))
        .collect();
    let stylesheets: Vec<&str> = doc
        .select_where("link", |el| el.attr_has_token("rel", "stylesheet"))
        .map(|el| el.attr("href").unwrap_or_default())
        .collect();
    let images = doc.count("img");

    PerformanceFeatures {
        load_time_ms: fetch.response_time_ms,
        page_size_kb: (fetch.byte_len() as f64 / 1024.0).round() as u64,
        requests: 1 + scripts.len() + stylesheets.len() + images,
        minified_css: stylesheets.iter().any(|href| href.contains(MINIFIED_CSS_HINT)),
        minified_js: scripts.iter().any(|src| src.contains(MINIFIED_JS_HINT)),
        cache_headers: fetch.header("cache-control").is_some() || fetch.header("expires").is_some(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse_document;

    #[test]
    fn test_request_estimate_and_minification() {
        let html = r#"<html><head>
            <link rel="stylesheet" href="/css/app.min.css">
            <link rel="stylesheet" href="/css/theme.css">
            <link rel="icon" href="/favicon.ico">
            <script src="/js/vendor.js"></script>
            <script>inline()</script>
        </head><body><img src="/a.png"><img data-src="/b.png" loading="lazy"></body></html>"#;
        let fetch = FetchOutcome {
            html: html.to_string(),
            response_time_ms: 250,
            ..Default::default()
        };
        let performance = extract_performance(&parse_document(html), &fetch);

        // document + 1 script + 2 stylesheets + 2 images
        assert_eq!(performance.requests, 6);
        assert!(performance.minified_css);
        assert!(!performance.minified_js);
        assert_eq!(performance.load_time_ms, 250);
        assert!(!performance.cache_headers);
    }

    #[test]
    fn test_lazy_images_count_as_requests() {
        let html = r#"<body><img data-src="/a.webp"><img data-src="/b.webp"></body>"#;
        let performance = extract_performance(&parse_document(html), &FetchOutcome::default());
        assert_eq!(performance.requests, 3);
    }

    #[test]
    fn test_page_size_rounds_to_kib() {
        let fetch = FetchOutcome {
            html: "x".repeat(1536),
            ..Default::default()
        };
        assert_eq!(extract_performance(&Document::empty(), &fetch).page_size_kb, 2);

        let fetch = FetchOutcome {
            html: "x".repeat(1000),
            ..Default::default()
        };
        assert_eq!(extract_performance(&Document::empty(), &fetch).page_size_kb, 1);
    }

    #[test]
    fn test_cache_headers_from_response() {
        let mut fetch = FetchOutcome::default();
        fetch
            .headers
            .insert("expires".to_string(), "Thu, 01 Dec 2026 16:00:00 GMT".to_string());
        assert!(extract_performance(&Document::empty(), &fetch).cache_headers);
    }

    #[test]
    fn test_empty_page_is_one_request() {
        let performance = extract_performance(&Document::empty(), &FetchOutcome::default());
        assert_eq!(performance.requests, 1);
        assert_eq!(performance.page_size_kb, 0);
    }
}
