//! Plain-text terminal summary

use crate::analyzer::AnalysisResult;
use crate::findings::Finding;

/// Formats a compact summary for terminal output
pub fn format_text_summary(result: &AnalysisResult) -> String {
    let scores = &result.scores;
    let features = &result.features;
    let mut out = String::new();

    out.push_str(&format!("=== SEO Analysis: {} ===\n\n", result.url));

    out.push_str("Scores:\n");
    out.push_str(&format!("  Overall:       {:>3}/100\n", scores.overall));
    out.push_str(&format!("  Technical:     {:>3}/100\n", scores.technical));
    out.push_str(&format!("  Content:       {:>3}/100\n", scores.content));
    out.push_str(&format!("  Performance:   {:>3}/100\n", scores.performance));
    out.push_str(&format!("  Accessibility: {:>3}/100\n", scores.accessibility));
    out.push_str(&format!("  Social:        {:>3}/100\n", scores.social));
    out.push('\n');

    out.push_str("Page:\n");
    out.push_str(&format!("  Status: {}\n", features.technical.status_code));
    out.push_str(&format!(
        "  Response time: {}ms\n",
        features.technical.response_time_ms
    ));
    out.push_str(&format!(
        "  Words: {}, readability: {}\n",
        features.content.word_count, features.content.readability_score
    ));
    out.push_str(&format!(
        "  Links: {} internal, {} external\n",
        features.links.internal, features.links.external
    ));
    out.push_str(&format!(
        "  Images: {} ({} missing alt)\n",
        features.images.total, features.images.missing_alt
    ));
    out.push('\n');

    let findings = &result.detailed_findings;
    push_titles(&mut out, "Critical Issues", &findings.critical_issues);
    push_titles(&mut out, "Warnings", &findings.warnings);
    push_titles(&mut out, "Recommendations", &findings.recommendations);
    push_titles(&mut out, "Positive", &findings.positive_findings);

    if !result.recommendations.is_empty() {
        out.push_str("Next Steps:\n");
        for (i, item) in result.recommendations.iter().enumerate() {
            out.push_str(&format!("  {:>2}. {}\n", i + 1, item));
        }
    }

    out
}

fn push_titles(out: &mut String, heading: &str, findings: &[Finding]) {
    if findings.is_empty() {
        return;
    }

    out.push_str(&format!("{} ({}):\n", heading, findings.len()));
    for finding in findings {
        out.push_str(&format!("  - {}\n", finding.title));
    }
    out.push('\n');
}
