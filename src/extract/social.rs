//! Social meta extractor (Open Graph, Twitter Cards, Facebook)

use crate::document::{Document, Element};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialMetaFeatures {
    pub has_open_graph: bool,
    pub has_twitter_cards: bool,
    pub has_facebook_meta: bool,
    pub open_graph_data: BTreeMap<String, String>,
    pub twitter_card_data: BTreeMap<String, String>,
    pub facebook_data: BTreeMap<String, String>,
}

pub fn extract_social(doc: &Document) -> SocialMetaFeatures {
    let open_graph_data = collect(doc, &["property"], "og:");
    // twitter tags are specified with `name`, but `property` is common in the wild
    let twitter_card_data = collect(doc, &["name", "property"], "twitter:");
    let facebook_data = collect(doc, &["property"], "fb:");

    SocialMetaFeatures {
        has_open_graph: !open_graph_data.is_empty(),
        has_twitter_cards: !twitter_card_data.is_empty(),
        has_facebook_meta: !facebook_data.is_empty(),
        open_graph_data,
        twitter_card_data,
        facebook_data,
    }
}

/// Collects `meta` key/content pairs whose key attribute starts with `prefix`
///
/// The first occurrence of a key wins. A tag without `content` still marks the
/// family as present and maps to an empty value.
fn collect(doc: &Document, key_attrs: &[&str], prefix: &str) -> BTreeMap<String, String> {
    let mut data = BTreeMap::new();

    for meta in doc.select_all("meta") {
        let Some(key) = meta_key(meta, key_attrs, prefix) else {
            continue;
        };
        let content = meta.attr("content").unwrap_or_default().trim().to_string();
        data.entry(key).or_insert(content);
    }

    data
}

fn meta_key(meta: &Element, key_attrs: &[&str], prefix: &str) -> Option<String> {
    key_attrs
        .iter()
        .find(|attr| meta.attr_starts_with(attr, prefix))
        .and_then(|attr| meta.attr(attr))
        .map(|key| key.trim().to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse_document;

    #[test]
    fn test_all_families_present() {
        let doc = parse_document(
            r#"<head>
                <meta property="og:title" content="Example">
                <meta property="og:image" content="https://example.com/og.png">
                <meta property="og:title" content="Duplicate">
                <meta name="twitter:card" content="summary_large_image">
                <meta property="fb:app_id" content="12345">
            </head>"#,
        );
        let social = extract_social(&doc);

        assert!(social.has_open_graph);
        assert!(social.has_twitter_cards);
        assert!(social.has_facebook_meta);
        assert_eq!(social.open_graph_data.len(), 2);
        assert_eq!(social.open_graph_data.get("og:title").map(String::as_str), Some("Example"));
        assert_eq!(
            social.twitter_card_data.get("twitter:card").map(String::as_str),
            Some("summary_large_image")
        );
        assert_eq!(social.facebook_data.get("fb:app_id").map(String::as_str), Some("12345"));
    }

    #[test]
    fn test_twitter_via_property() {
        let doc = parse_document(r#"<meta property="twitter:site" content="@example">"#);
        let social = extract_social(&doc);
        assert!(social.has_twitter_cards);
        assert!(!social.has_open_graph);
    }

    #[test]
    fn test_og_must_be_a_property() {
        let doc = parse_document(r#"<meta name="og:title" content="Wrong attribute">"#);
        assert!(!extract_social(&doc).has_open_graph);
    }

    #[test]
    fn test_no_social_meta() {
        let doc = parse_document(r#"<meta name="description" content="plain">"#);
        assert_eq!(extract_social(&doc), SocialMetaFeatures::default());
    }
}
