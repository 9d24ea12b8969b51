//! Image extractor

use crate::document::{Document, Element};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Source substrings hinting at a very large image
///
/// A naming heuristic, not a measurement: no image is downloaded.
pub const OVERSIZE_HINTS: &[&str] = &["2048", "1920", "4k"];

/// Image statistics of a page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageFeatures {
    pub total: usize,
    /// Images with a non-blank `alt`
    pub with_alt: usize,
    pub missing_alt: usize,
    pub oversized: usize,
    pub lazy_loaded: usize,
    /// Count per lowercase file extension
    pub formats: BTreeMap<String, usize>,
}

pub fn extract_images(doc: &Document) -> ImageFeatures {
    let mut features = ImageFeatures::default();

    for img in doc.select_all("img") {
        features.total += 1;

        if img.attr("alt").is_some_and(|alt| !alt.trim().is_empty()) {
            features.with_alt += 1;
        }

        if img.attr_is("loading", "lazy") || img.has_attr("data-src") {
            features.lazy_loaded += 1;
        }

        let Some(src) = image_source(img) else {
            continue;
        };

        if let Some(extension) = image_extension(src) {
            *features.formats.entry(extension).or_insert(0) += 1;
        }

        if is_oversize_hint(src) {
            features.oversized += 1;
        }
    }

    features.missing_alt = features.total - features.with_alt;
    features
}

/// `src`, falling back to the deferred `data-src`
fn image_source(img: &Element) -> Option<&str> {
    img.attr("src")
        .map(str::trim)
        .filter(|src| !src.is_empty())
        .or_else(|| {
            img.attr("data-src")
                .map(str::trim)
                .filter(|src| !src.is_empty())
        })
}

/// Lowercase file extension of an image source, ignoring query and fragment
///
/// ```
/// use sumi_lens::extract::images::image_extension;
///
/// assert_eq!(image_extension("/img/Photo.JPG?v=2").as_deref(), Some("jpg"));
/// assert_eq!(image_extension("https://cdn.example.com/image"), None);
/// ```
pub fn image_extension(src: &str) -> Option<String> {
    let path = src.split(['?', '#']).next().unwrap_or_default();
    let file = path.rsplit('/').next().unwrap_or_default();
    let (_, extension) = file.rsplit_once('.')?;

    if extension.is_empty() || !extension.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }

    Some(extension.to_ascii_lowercase())
}

/// True when the source path contains one of [`OVERSIZE_HINTS`]
pub fn is_oversize_hint(src: &str) -> bool {
    let src = src.to_ascii_lowercase();
    OVERSIZE_HINTS.iter().any(|hint| src.contains(hint))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse_document;

    #[test]
    fn test_alt_counting() {
        let doc = parse_document(
            r#"<body>
                <img src="a.png" alt="A">
                <img src="b.png" alt="B">
                <img src="c.jpg" alt="C">
                <img src="d.jpg">
                <img src="e.webp" alt="   ">
            </body>"#,
        );
        let images = extract_images(&doc);

        assert_eq!(images.total, 5);
        assert_eq!(images.with_alt, 3);
        assert_eq!(images.missing_alt, 2);
        assert_eq!(images.formats.get("png"), Some(&2));
        assert_eq!(images.formats.get("jpg"), Some(&2));
        assert_eq!(images.formats.get("webp"), Some(&1));
    }

    #[test]
    fn test_lazy_loading() {
        let doc = parse_document(
            r#"<img src="a.png" loading="lazy"><img data-src="b.png"><img src="c.png" loading="eager">"#,
        );
        let images = extract_images(&doc);
        assert_eq!(images.lazy_loaded, 2);
        assert_eq!(images.formats.len(), 1);
        assert_eq!(images.formats.get("png"), Some(&3));
    }

    #[test]
    fn test_oversize_hints() {
        assert!(is_oversize_hint("/uploads/hero-1920x1080.jpg"));
        assert!(is_oversize_hint("/img/banner_2048.png"));
        assert!(is_oversize_hint("/img/wallpaper-4K.jpg"));
        assert!(!is_oversize_hint("/img/thumb-320.jpg"));

        let doc = parse_document(r#"<img src="/a-1920.jpg"><img src="/b.jpg">"#);
        assert_eq!(extract_images(&doc).oversized, 1);
    }

    #[test]
    fn test_extension_parsing() {
        assert_eq!(image_extension("logo.svg").as_deref(), Some("svg"));
        assert_eq!(image_extension("/a.b/c.PNG#frag").as_deref(), Some("png"));
        assert_eq!(image_extension("/dir.with.dots/noext"), None);
        assert_eq!(image_extension("data:image/png;base64,iVBOR"), None);
        assert_eq!(image_extension("trailing."), None);
    }

    #[test]
    fn test_no_images() {
        assert_eq!(extract_images(&Document::empty()), ImageFeatures::default());
    }
}
