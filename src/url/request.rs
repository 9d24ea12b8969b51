use crate::UrlError;
use url::Url;

/// Validates an analysis request URL
///
/// The URL must be absolute, use the `http` or `https` scheme and carry a host.
/// This runs before any network activity.
///
/// # Examples
///
/// ```
/// use sumi_lens::url::validate_request_url;
///
/// let url = validate_request_url(" https://Example.com/page ").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/page");
///
/// assert!(validate_request_url("ftp://example.com/").is_err());
/// assert!(validate_request_url("/relative/path").is_err());
/// ```
pub fn validate_request_url(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlError::MissingDomain),
    }
}

/// Extracts the lowercase host of a URL
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns the origin (scheme, host and explicit port) of a URL
///
/// Probes for `/robots.txt` and sitemaps are resolved against this value.
pub fn page_origin(url: &Url) -> Url {
    let mut origin = url.clone();
    origin.set_path("/");
    origin.set_query(None);
    origin.set_fragment(None);
    // Credentials never belong to a probe request
    let _ = origin.set_username("");
    let _ = origin.set_password(None);
    origin
}
