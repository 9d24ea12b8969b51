//! Feature extractors
//!
//! Each extractor is an infallible function over a parsed [`Document`] and,
//! where needed, the fetch metadata. They share nothing, so the pipeline runs
//! them concurrently; [`extract_features`] is the sequential equivalent.

pub mod accessibility;
pub mod content;
pub mod images;
pub mod links;
pub mod performance;
pub mod social;
pub mod technical;

use crate::document::Document;
use crate::fetcher::FetchOutcome;
use serde::{Deserialize, Serialize};
use url::Url;

pub use accessibility::{extract_accessibility, AccessibilityFeatures};
pub use content::{extract_content, extract_outline, ContentFeatures, PageOutline};
pub use images::{extract_images, ImageFeatures};
pub use links::{extract_links, LinkFeatures};
pub use performance::{extract_performance, PerformanceFeatures};
pub use social::{extract_social, SocialMetaFeatures};
pub use technical::{extract_technical, TechnicalFeatures};

/// Every signal extracted from one page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureSet {
    #[serde(flatten)]
    pub outline: PageOutline,
    #[serde(rename = "pageContent")]
    pub content: ContentFeatures,
    #[serde(rename = "technicalSeo")]
    pub technical: TechnicalFeatures,
    pub images: ImageFeatures,
    pub links: LinkFeatures,
    pub performance: PerformanceFeatures,
    pub social_meta: SocialMetaFeatures,
    pub accessibility: AccessibilityFeatures,
}

/// Runs every extractor in turn
///
/// `page_url` is the requested URL; links resolve against the fetch's final
/// URL when it parses. Probe results are not included; merge them with
/// [`TechnicalFeatures::apply_probes`].
pub fn extract_features(
    doc: &Document,
    fetch: &FetchOutcome,
    page_url: &Url,
    keyword_limit: usize,
) -> FeatureSet {
    FeatureSet {
        outline: extract_outline(doc),
        content: extract_content(doc, keyword_limit),
        technical: extract_technical(doc, fetch, page_url),
        images: extract_images(doc),
        links: extract_links(doc, &link_base(fetch, page_url)),
        performance: extract_performance(doc, fetch),
        social_meta: extract_social(doc),
        accessibility: extract_accessibility(doc),
    }
}

/// Base URL for link resolution: the post-redirect URL, else the request URL
pub fn link_base(fetch: &FetchOutcome, page_url: &Url) -> Url {
    Url::parse(&fetch.final_url).unwrap_or_else(|_| page_url.clone())
}
