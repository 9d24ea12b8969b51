//! Technical / crawlability extractor

use crate::document::Document;
use crate::fetcher::FetchOutcome;
use crate::probe::ProbeReport;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

/// Crawlability and markup-hygiene signals
///
/// `has_robots_txt`, `has_sitemap` and `sitemap_url` come from the probes and
/// stay `false`/`None` until [`TechnicalFeatures::apply_probes`] runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalFeatures {
    pub has_robots_txt: bool,
    pub has_sitemap: bool,
    pub sitemap_url: Option<String>,
    #[serde(rename = "hasSSL")]
    pub has_ssl: bool,
    #[serde(rename = "responseTime")]
    pub response_time_ms: u64,
    pub status_code: u16,
    pub is_responsive: bool,
    pub has_valid_structured_data: bool,
    pub canonical_tag: String,
    pub meta_viewport: String,
    pub charset: String,
    pub doctype: String,
    pub lang: String,
    pub hreflang: Vec<String>,
    pub http_headers: BTreeMap<String, String>,
}

impl TechnicalFeatures {
    /// Merges the probe results into the record
    pub fn apply_probes(&mut self, report: &ProbeReport) {
        self.has_robots_txt = report.has_robots_txt;
        self.has_sitemap = report.has_sitemap;
        self.sitemap_url = report.sitemap_url.clone();
    }
}

/// Extracts the markup- and response-derived technical signals
///
/// `page_url` is the requested URL; SSL is judged on its scheme.
pub fn extract_technical(doc: &Document, fetch: &FetchOutcome, page_url: &Url) -> TechnicalFeatures {
    let viewport = doc.first_where("meta", |el| el.attr_is("name", "viewport"));

    let canonical_tag = doc
        .first_where("link", |el| el.attr_has_token("rel", "canonical"))
        .and_then(|el| el.attr("href"))
        .unwrap_or_default()
        .to_string();

    let charset = doc
        .first_where("meta", |el| el.has_attr("charset"))
        .and_then(|el| el.attr("charset"))
        .or_else(|| {
            doc.first_where("meta", |el| el.attr_is("http-equiv", "content-type"))
                .and_then(|el| el.attr("content"))
        })
        .unwrap_or_default()
        .to_string();

    let lang = doc
        .root()
        .and_then(|root| root.attr("lang"))
        .unwrap_or_default()
        .trim()
        .to_string();

    let hreflang = doc
        .select_where("link", |el| el.attr_has_token("rel", "alternate"))
        .filter_map(|el| el.attr("hreflang"))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect();

    TechnicalFeatures {
        has_robots_txt: false,
        has_sitemap: false,
        sitemap_url: None,
        has_ssl: page_url.scheme() == "https",
        response_time_ms: fetch.response_time_ms,
        status_code: fetch.status_code,
        is_responsive: viewport.is_some(),
        has_valid_structured_data: has_structured_data(doc),
        canonical_tag,
        meta_viewport: viewport
            .and_then(|el| el.attr("content"))
            .unwrap_or_default()
            .to_string(),
        charset,
        doctype: if doc.has_doctype() {
            "<!DOCTYPE html>".to_string()
        } else {
            String::new()
        },
        lang,
        hreflang,
        http_headers: fetch.headers.clone(),
    }
}

/// Any one of JSON-LD, microdata or Open Graph markup counts
fn has_structured_data(doc: &Document) -> bool {
    doc.first_where("script", |el| el.attr_is("type", "application/ld+json"))
        .is_some()
        || doc.first_where("*", |el| el.has_attr("itemscope")).is_some()
        || doc
            .first_where("meta", |el| el.attr_starts_with("property", "og:"))
            .is_some()
}
