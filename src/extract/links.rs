//! Link extractor

use crate::document::Document;
use crate::url::{classify_link, LinkKind};
use serde::{Deserialize, Serialize};
use url::Url;

/// Anchor statistics of a page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkFeatures {
    pub internal: usize,
    pub external: usize,
    /// Hrefs that could not be parsed as URLs
    pub broken: usize,
    pub nofollow: usize,
    pub dofollow: usize,
}

/// Classifies every `a[href]` relative to `base`
///
/// Skipped hrefs (anchors, `mailto:`, `tel:`, `javascript:`) count nowhere.
/// Follow counting happens before resolution, so broken links still land in
/// `nofollow` or `dofollow`.
pub fn extract_links(doc: &Document, base: &Url) -> LinkFeatures {
    let mut features = LinkFeatures::default();

    for anchor in doc.select_all("a") {
        let Some(href) = anchor.attr("href") else {
            continue;
        };

        let kind = classify_link(href, base);
        if !kind.is_counted() {
            continue;
        }

        if anchor.attr_has_token("rel", "nofollow") {
            features.nofollow += 1;
        } else {
            features.dofollow += 1;
        }

        match kind {
            LinkKind::Internal => features.internal += 1,
            LinkKind::External => features.external += 1,
            LinkKind::Broken => features.broken += 1,
            LinkKind::Skipped => {}
        }
    }

    features
}
