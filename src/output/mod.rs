//! Report rendering
//!
//! This module handles:
//! - Serializing an analysis as JSON
//! - Generating a Markdown report
//! - Generating a plain-text summary for the terminal
//! - Writing the rendered report to a file or stdout

mod markdown;
mod text;

pub use markdown::format_markdown_report;
pub use text::format_text_summary;

use crate::analyzer::AnalysisResult;
use crate::Result;
use std::fmt;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

/// Output format of a report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Markdown,
    #[default]
    Text,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            "text" | "txt" => Ok(ReportFormat::Text),
            other => Err(format!(
                "unknown format '{}' (expected json, markdown or text)",
                other
            )),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportFormat::Json => "json",
            ReportFormat::Markdown => "markdown",
            ReportFormat::Text => "text",
        };
        f.write_str(name)
    }
}

/// Renders a report in the requested format
///
/// `pretty` only affects JSON.
pub fn render(result: &AnalysisResult, format: ReportFormat, pretty: bool) -> Result<String> {
    let rendered = match format {
        ReportFormat::Json if pretty => serde_json::to_string_pretty(result)?,
        ReportFormat::Json => serde_json::to_string(result)?,
        ReportFormat::Markdown => format_markdown_report(result),
        ReportFormat::Text => format_text_summary(result),
    };
    Ok(rendered)
}

/// Renders a report and writes it to `path`, or to stdout when `None`
pub fn write_report(
    result: &AnalysisResult,
    format: ReportFormat,
    pretty: bool,
    path: Option<&Path>,
) -> Result<()> {
    let mut rendered = render(result, format, pretty)?;
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }

    match path {
        Some(path) => {
            std::fs::write(path, rendered.as_bytes())?;
            tracing::info!("Wrote {} report to {}", format, path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::analyzer::AnalysisResult;
    use crate::extract::FeatureSet;
    use crate::findings::generate_findings;
    use crate::findings::generate_recommendations;
    use crate::scoring::compute_scores;
    use chrono::{TimeZone, Utc};

    /// A small but fully populated result
    pub fn sample_result() -> AnalysisResult {
        let mut features = FeatureSet::default();
        features.outline.title = "Example Domain".to_string();
        features.outline.h1_tags = vec!["Example Domain".to_string()];
        features.content.word_count = 42;
        features.content.readability_score = 55;
        features.technical.has_ssl = true;
        features.technical.status_code = 200;
        features.technical.response_time_ms = 180;
        features.images.total = 3;
        features.images.with_alt = 1;
        features.images.missing_alt = 2;
        features.links.internal = 4;
        features.links.external = 1;
        features.performance.page_size_kb = 12;
        features.performance.requests = 6;
        features.accessibility.issues = vec!["Missing language declaration in HTML tag".to_string()];
        features.accessibility.score = 90;

        AnalysisResult {
            url: "https://example.com/".to_string(),
            domain: "example.com".to_string(),
            final_url: "https://example.com/".to_string(),
            analyzed_at: Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap(),
            scores: compute_scores(&features),
            detailed_findings: generate_findings(&features),
            recommendations: generate_recommendations(&features),
            features,
        }
    }
}
