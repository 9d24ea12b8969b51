use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Sumi-Lens
///
/// Every section is optional; a missing file or section means defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default, rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub probe: ProbeConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Primary page fetch configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Hard timeout for the page request, in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Timeout for establishing the connection, in seconds
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    /// Maximum number of redirects followed before giving up
    #[serde(rename = "max-redirects")]
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 10,
            max_redirects: 5,
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the analyzer
    pub name: String,

    /// Version of the analyzer
    pub version: String,

    /// URL with information about the analyzer
    #[serde(rename = "contact-url")]
    pub contact_url: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            name: "SumiLens".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
        }
    }
}

impl UserAgentConfig {
    /// Formats the user agent header value
    ///
    /// Format: `Mozilla/5.0 (compatible; Name/Version; +ContactURL)`
    pub fn header_value(&self) -> String {
        match &self.contact_url {
            Some(contact) => format!(
                "Mozilla/5.0 (compatible; {}/{}; +{})",
                self.name, self.version, contact
            ),
            None => format!("Mozilla/5.0 (compatible; {}/{})", self.name, self.version),
        }
    }
}

/// Auxiliary robots.txt / sitemap probe configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Timeout for each individual probe, in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Sitemap paths checked against the page origin
    #[serde(rename = "sitemap-candidates")]
    pub sitemap_candidates: Vec<String>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 5,
            sitemap_candidates: vec![
                "/sitemap.xml".to_string(),
                "/sitemap_index.xml".to_string(),
                "/wp-sitemap.xml".to_string(),
            ],
        }
    }
}

impl ProbeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Analysis behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Wall-clock budget for the whole run, in seconds (unbounded when absent)
    #[serde(rename = "overall-timeout-secs")]
    pub overall_timeout_secs: Option<u64>,

    /// Number of keywords reported in the density table
    #[serde(rename = "keyword-limit")]
    pub keyword_limit: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            overall_timeout_secs: None,
            keyword_limit: 10,
        }
    }
}

impl AnalysisConfig {
    pub fn overall_timeout(&self) -> Option<Duration> {
        self.overall_timeout_secs.map(Duration::from_secs)
    }
}
