//! Sumi-Lens: a single-page web signal analyzer
//!
//! This crate fetches one page, parses its markup, extracts technical, content,
//! social and accessibility signals, scores them and produces categorized
//! findings with remediation guidance.

pub mod analyzer;
pub mod config;
pub mod document;
pub mod extract;
pub mod fetcher;
pub mod findings;
pub mod output;
pub mod probe;
pub mod scoring;
pub mod url;

use thiserror::Error;

/// Main error type for Sumi-Lens operations
///
/// Only `Validation`, `Fetch` and `Timeout` terminate an analysis run. Probe
/// failures and missing markup never surface here.
#[derive(Debug, Error)]
pub enum LensError {
    #[error("Invalid request URL: {0}")]
    Validation(#[from] UrlError),

    #[error("Failed to fetch website {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("Analysis of {url} exceeded the {budget_secs}s budget")]
    Timeout { url: String, budget_secs: u64 },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Analysis task failed: {0}")]
    Task(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Failure of the primary page fetch
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("too many redirects: {0}")]
    Redirect(String),

    #[error("server responded with status {status}")]
    ServerError { status: u16 },

    #[error("failed to read response body: {0}")]
    Body(String),

    #[error("{0}")]
    Transport(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for Sumi-Lens operations
pub type Result<T> = std::result::Result<T, LensError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use analyzer::{analyze, analyze_with_client, AnalysisResult};
pub use config::Config;
pub use document::{parse_document, Document, Element, HtmlParser};
pub use extract::FeatureSet;
pub use findings::{Finding, FindingBuckets, Impact};
pub use scoring::{compute_scores, ScoreSet};
pub use url::validate_request_url;
