//! URL handling module for Sumi-Lens
//!
//! This module provides request validation, origin/domain extraction and
//! link classification relative to the analyzed page.

mod request;

pub use request::{extract_domain, page_origin, validate_request_url};

use url::Url;

/// Href prefixes that never count as links
///
/// In-page anchors and non-navigational schemes contribute to no counter.
const SKIPPED_PREFIXES: &[&str] = &["#", "mailto:", "tel:", "javascript:"];

/// Link classification relative to the analyzed page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    /// Same host as the page
    Internal,
    /// Different host
    External,
    /// Anchor-only or non-navigational href
    Skipped,
    /// Href that cannot be resolved to a URL
    Broken,
}

impl LinkKind {
    /// Returns true if the link participates in follow/nofollow counting
    pub fn is_counted(&self) -> bool {
        !matches!(self, Self::Skipped)
    }
}

/// Classifies an anchor href against the page URL
///
/// Hrefs starting with `http` are parsed as absolute URLs, everything else is
/// resolved against `base`. Broken means "malformed", no request is made.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sumi_lens::url::{classify_link, LinkKind};
///
/// let base = Url::parse("https://example.com").unwrap();
/// assert_eq!(classify_link("/about", &base), LinkKind::Internal);
/// assert_eq!(classify_link("https://other.com/y", &base), LinkKind::External);
/// assert_eq!(classify_link("#top", &base), LinkKind::Skipped);
/// ```
pub fn classify_link(href: &str, base: &Url) -> LinkKind {
    let href = href.trim();

    if href.is_empty() {
        return LinkKind::Skipped;
    }

    let lowered = href.to_ascii_lowercase();
    if SKIPPED_PREFIXES.iter().any(|p| lowered.starts_with(p)) {
        return LinkKind::Skipped;
    }

    let resolved = if lowered.starts_with("http") {
        Url::parse(href)
    } else {
        base.join(href)
    };

    match resolved {
        Ok(link) if link.host_str().is_some() && link.host_str() == base.host_str() => {
            LinkKind::Internal
        }
        Ok(_) => LinkKind::External,
        Err(_) => LinkKind::Broken,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.com/blog/post").unwrap()
    }

    #[test]
    fn test_relative_links_are_internal() {
        assert_eq!(classify_link("/about", &base_url()), LinkKind::Internal);
        assert_eq!(classify_link("other-post", &base_url()), LinkKind::Internal);
        assert_eq!(classify_link("../up", &base_url()), LinkKind::Internal);
        assert_eq!(classify_link("?page=2", &base_url()), LinkKind::Internal);
    }

    #[test]
    fn test_absolute_same_host_is_internal() {
        assert_eq!(
            classify_link("https://example.com/x", &base_url()),
            LinkKind::Internal
        );
        assert_eq!(
            classify_link("http://EXAMPLE.com/x", &base_url()),
            LinkKind::Internal
        );
    }

    #[test]
    fn test_subdomain_is_external() {
        assert_eq!(
            classify_link("https://blog.example.com/", &base_url()),
            LinkKind::External
        );
        assert_eq!(
            classify_link("//cdn.other.com/lib.js", &base_url()),
            LinkKind::External
        );
    }

    #[test]
    fn test_skipped_hrefs() {
        for href in ["#top", "mailto:a@b.com", "tel:+123", "javascript:void(0)", "  ", "MAILTO:x@y.z"] {
            assert_eq!(classify_link(href, &base_url()), LinkKind::Skipped, "{}", href);
        }
    }

    #[test]
    fn test_malformed_absolute_is_broken() {
        assert_eq!(classify_link("http://", &base_url()), LinkKind::Broken);
        assert_eq!(classify_link("https://exa mple.com/", &base_url()), LinkKind::Broken);
        assert_eq!(classify_link("http-docs/page", &base_url()), LinkKind::Broken);
    }

    #[test]
    fn test_is_counted() {
        assert!(LinkKind::Internal.is_counted());
        assert!(LinkKind::Broken.is_counted());
        assert!(!LinkKind::Skipped.is_counted());
    }
}
