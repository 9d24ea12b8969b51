use crate::config::types::{AnalysisConfig, Config, FetchConfig, ProbeConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetch_config(&config.fetch)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_probe_config(&config.probe)?;
    validate_analysis_config(&config.analysis)?;
    Ok(())
}

/// Validates fetch configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 || config.timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "fetch timeout-secs must be between 1 and 300, got {}",
            config.timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 || config.connect_timeout_secs > config.timeout_secs {
        return Err(ConfigError::Validation(format!(
            "fetch connect-timeout-secs must be between 1 and timeout-secs ({}), got {}",
            config.timeout_secs, config.connect_timeout_secs
        )));
    }

    if config.max_redirects > 20 {
        return Err(ConfigError::Validation(format!(
            "fetch max-redirects must be <= 20, got {}",
            config.max_redirects
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Name: non-empty, alphanumeric + hyphens only
    if config.name.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent name cannot be empty".to_string(),
        ));
    }

    if !config.name.chars().all(|c| c.is_alphanumeric() || c == '-') {
        return Err(ConfigError::Validation(format!(
            "user-agent name must contain only alphanumeric characters and hyphens, got '{}'",
            config.name
        )));
    }

    if config.version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent version cannot be empty".to_string(),
        ));
    }

    if let Some(contact) = &config.contact_url {
        Url::parse(contact)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact-url: {}", e)))?;
    }

    Ok(())
}

/// Validates probe configuration
fn validate_probe_config(config: &ProbeConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 || config.timeout_secs > 60 {
        return Err(ConfigError::Validation(format!(
            "probe timeout-secs must be between 1 and 60, got {}",
            config.timeout_secs
        )));
    }

    if config.sitemap_candidates.is_empty() {
        return Err(ConfigError::Validation(
            "probe sitemap-candidates must list at least one path".to_string(),
        ));
    }

    for candidate in &config.sitemap_candidates {
        if !candidate.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "sitemap candidate '{}' must be an absolute path starting with '/'",
                candidate
            )));
        }
    }

    Ok(())
}

/// Validates analysis configuration
fn validate_analysis_config(config: &AnalysisConfig) -> Result<(), ConfigError> {
    if config.keyword_limit < 1 || config.keyword_limit > 100 {
        return Err(ConfigError::Validation(format!(
            "analysis keyword-limit must be between 1 and 100, got {}",
            config.keyword_limit
        )));
    }

    if config.overall_timeout_secs == Some(0) {
        return Err(ConfigError::Validation(
            "analysis overall-timeout-secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}
