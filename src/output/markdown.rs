//! Markdown report generation
//!
//! This module generates a human-readable Markdown report of one analysis,
//! including scores, page signals, findings and recommendations.

use crate::analyzer::AnalysisResult;
use crate::findings::Finding;

/// Formats an analysis as Markdown
///
/// # Arguments
///
/// * `result` - The analysis to render
///
/// # Returns
///
/// A formatted markdown string
pub fn format_markdown_report(result: &AnalysisResult) -> String {
    let features = &result.features;
    let mut md = String::new();

    // Title
    md.push_str("# SEO Analysis Report\n\n");

    md.push_str(&format!("- **URL**: {}\n", result.url));
    if result.final_url != result.url {
        md.push_str(&format!("- **Final URL**: {}\n", result.final_url));
    }
    md.push_str(&format!("- **Domain**: {}\n", result.domain));
    md.push_str(&format!(
        "- **Analyzed**: {}\n\n",
        result.analyzed_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    // Scores
    md.push_str("## Scores\n\n");
    md.push_str("| Category | Score |\n");
    md.push_str("|----------|-------|\n");
    md.push_str(&format!("| **Overall** | **{}** |\n", result.scores.overall));
    md.push_str(&format!("| Technical | {} |\n", result.scores.technical));
    md.push_str(&format!("| Content | {} |\n", result.scores.content));
    md.push_str(&format!("| Performance | {} |\n", result.scores.performance));
    md.push_str(&format!("| Accessibility | {} |\n", result.scores.accessibility));
    md.push_str(&format!("| Social | {} |\n\n", result.scores.social));

    // Page overview
    md.push_str("## Page Overview\n\n");
    md.push_str(&format!("- **Title**: {}\n", or_none(&features.outline.title)));
    md.push_str(&format!(
        "- **Meta Description**: {}\n",
        or_none(&features.outline.meta_description)
    ));
    md.push_str(&format!(
        "- **Headings**: {} H1, {} H2, {} H3\n",
        features.outline.h1_tags.len(),
        features.outline.h2_tags.len(),
        features.outline.h3_tags.len()
    ));
    md.push_str(&format!(
        "- **Words**: {} ({} sentences, {} paragraphs)\n",
        features.content.word_count, features.content.sentences, features.content.paragraphs
    ));
    md.push_str(&format!(
        "- **Readability**: {}\n\n",
        features.content.readability_score
    ));

    if !features.content.keyword_density.is_empty() {
        md.push_str("### Top Keywords\n\n");
        md.push_str("| Keyword | Density |\n");
        md.push_str("|---------|---------|\n");

        let mut keywords: Vec<(&String, &f64)> =
            features.content.keyword_density.iter().collect();
        keywords.sort_by(|a, b| b.1.total_cmp(a.1).then(a.0.cmp(b.0)));
        for (word, density) in keywords {
            md.push_str(&format!("| {} | {:.1}% |\n", word, density));
        }
        md.push('\n');
    }

    // Technical
    let technical = &features.technical;
    md.push_str("## Technical\n\n");
    md.push_str("| Check | Result |\n");
    md.push_str("|-------|--------|\n");
    md.push_str(&format!("| Status Code | {} |\n", technical.status_code));
    md.push_str(&format!("| Response Time | {} ms |\n", technical.response_time_ms));
    md.push_str(&format!("| HTTPS | {} |\n", yes_no(technical.has_ssl)));
    md.push_str(&format!("| robots.txt | {} |\n", yes_no(technical.has_robots_txt)));
    md.push_str(&format!(
        "| Sitemap | {} |\n",
        technical.sitemap_url.as_deref().unwrap_or("no")
    ));
    md.push_str(&format!("| Viewport | {} |\n", yes_no(technical.is_responsive)));
    md.push_str(&format!(
        "| Structured Data | {} |\n",
        yes_no(technical.has_valid_structured_data)
    ));
    md.push_str(&format!("| Canonical | {} |\n", or_none(&technical.canonical_tag)));
    md.push_str(&format!("| Language | {} |\n\n", or_none(&technical.lang)));

    // Links and images
    md.push_str("## Links & Images\n\n");
    md.push_str(&format!(
        "- **Links**: {} internal, {} external, {} broken ({} nofollow)\n",
        features.links.internal,
        features.links.external,
        features.links.broken,
        features.links.nofollow
    ));
    md.push_str(&format!(
        "- **Images**: {} total, {} missing alt, {} oversized, {} lazy-loaded\n",
        features.images.total,
        features.images.missing_alt,
        features.images.oversized,
        features.images.lazy_loaded
    ));
    md.push_str(&format!(
        "- **Page Weight**: {} KB over ~{} requests\n\n",
        features.performance.page_size_kb, features.performance.requests
    ));

    // Findings
    let findings = &result.detailed_findings;
    push_findings(&mut md, "Critical Issues", &findings.critical_issues);
    push_findings(&mut md, "Warnings", &findings.warnings);
    push_findings(&mut md, "Recommendations", &findings.recommendations);
    push_findings(&mut md, "What's Working", &findings.positive_findings);

    // Action list
    if !result.recommendations.is_empty() {
        md.push_str("## Action Items\n\n");
        for (i, item) in result.recommendations.iter().enumerate() {
            md.push_str(&format!("{}. {}\n", i + 1, item));
        }
        md.push('\n');
    }

    md
}

fn push_findings(md: &mut String, heading: &str, findings: &[Finding]) {
    if findings.is_empty() {
        return;
    }

    md.push_str(&format!("## {} ({})\n\n", heading, findings.len()));
    for finding in findings {
        md.push_str(&format!(
            "### {} _[{}, {}]_\n\n",
            finding.title,
            finding.category,
            finding.impact.as_str()
        ));
        md.push_str(&format!("{}\n\n", finding.description));
        if let Some(details) = &finding.technical_details {
            md.push_str(&format!("- **Details**: {}\n", details));
        }
        if let Some(how_to_fix) = &finding.how_to_fix {
            md.push_str(&format!("- **How to fix**: {}\n", how_to_fix));
        }
        for resource in &finding.resources {
            md.push_str(&format!("- <{}>\n", resource));
        }
        md.push('\n');
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

fn or_none(value: &str) -> &str {
    if value.is_empty() {
        "_none_"
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::fixtures::sample_result;

    #[test]
    fn test_format_markdown_report() {
        let markdown = format_markdown_report(&sample_result());

        assert!(markdown.contains("# SEO Analysis Report"));
        assert!(markdown.contains("- **URL**: https://example.com/"));
        assert!(markdown.contains("- **Analyzed**: 2026-01-15 12:00:00 UTC"));
        assert!(markdown.contains("## Scores"));
        // final URL equals the request URL
        assert!(!markdown.contains("Final URL"));
    }

    #[test]
    fn test_markdown_contains_findings() {
        let result = sample_result();
        let markdown = format_markdown_report(&result);

        assert!(markdown.contains("### Images Missing Alt Text _[Accessibility, medium]_"));
        assert!(markdown.contains("### SSL Certificate Active"));
        assert!(!markdown.contains("SSL Certificate Missing"));
        assert!(markdown.contains(&format!(
            "## Warnings ({})",
            result.detailed_findings.warnings.len()
        )));
    }

    #[test]
    fn test_markdown_action_items_are_numbered() {
        let result = sample_result();
        let markdown = format_markdown_report(&result);

        assert!(markdown.contains("## Action Items"));
        assert!(markdown.contains(&format!("1. {}", result.recommendations[0])));
    }

    #[test]
    fn test_markdown_marks_missing_values() {
        let markdown = format_markdown_report(&sample_result());
        assert!(markdown.contains("- **Meta Description**: _none_"));
        assert!(markdown.contains("| Sitemap | no |"));
    }

    #[test]
    fn test_keywords_listed_by_density() {
        let mut result = sample_result();
        let keywords = &mut result.features.content.keyword_density;
        keywords.insert("alpha".to_string(), 5.0);
        keywords.insert("zeta".to_string(), 12.5);

        let markdown = format_markdown_report(&result);
        let zeta = markdown.find("| zeta | 12.5% |").unwrap();
        let alpha = markdown.find("| alpha | 5.0% |").unwrap();
        assert!(zeta < alpha);
    }
}
