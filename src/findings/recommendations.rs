//! Short, prioritized action list

use crate::extract::FeatureSet;

/// Upper bound on the recommendation list
pub const MAX_RECOMMENDATIONS: usize = 12;

/// Builds up to [`MAX_RECOMMENDATIONS`] one-line actions, most important first
///
/// Technical fixes come first, then title and description, headings, content
/// quality, images, performance, social tags, accessibility issues, and
/// structured data.
pub fn generate_recommendations(features: &FeatureSet) -> Vec<String> {
    let technical = &features.technical;
    let outline = &features.outline;
    let mut out: Vec<String> = Vec::new();

    if !technical.has_ssl {
        out.push("Install SSL certificate to secure your website and improve search rankings".into());
    }
    if !technical.has_robots_txt {
        out.push("Create a robots.txt file to guide search engine crawlers".into());
    }
    if !technical.has_sitemap {
        out.push("Generate and submit an XML sitemap to search engines".into());
    }
    if !technical.is_responsive {
        out.push("Add mobile viewport meta tag for responsive design".into());
    }

    let title_len = outline.title.chars().count();
    if outline.title.is_empty() {
        out.push("Add a descriptive title tag to your page".into());
    } else if !(30..=60).contains(&title_len) {
        out.push("Optimize title tag length (30-60 characters recommended)".into());
    }
    if outline.meta_description.is_empty() {
        out.push("Add a compelling meta description (150-160 characters)".into());
    }
    match outline.h1_tags.len() {
        0 => out.push("Add H1 heading tag for better content structure".into()),
        1 => {}
        _ => out.push("Use only one H1 tag per page for optimal SEO".into()),
    }

    if features.content.word_count < 300 {
        out.push("Increase content length - aim for at least 300 words".into());
    }
    if features.content.readability_score < 60 {
        out.push("Improve content readability with shorter sentences and simpler words".into());
    }

    if features.images.missing_alt > 0 {
        out.push(format!(
            "Add alt text to {} images for accessibility and SEO",
            features.images.missing_alt
        ));
    }
    if features.images.oversized > 0 {
        out.push(format!(
            "Optimize {} oversized images for better performance",
            features.images.oversized
        ));
    }

    if technical.response_time_ms > 3000 {
        out.push("Improve server response time - currently over 3 seconds".into());
    }
    if features.performance.page_size_kb > 2000 {
        out.push("Reduce page size - consider compressing resources".into());
    }
    if features.performance.requests > 100 {
        out.push("Reduce HTTP requests by combining CSS/JS files".into());
    }

    if !features.social_meta.has_open_graph {
        out.push("Add Open Graph meta tags for better social media sharing".into());
    }
    if !features.social_meta.has_twitter_cards {
        out.push("Add Twitter Card meta tags for enhanced Twitter sharing".into());
    }

    out.extend(features.accessibility.issues.iter().cloned());

    if !technical.has_valid_structured_data {
        out.push("Add structured data markup (Schema.org) for rich snippets".into());
    }

    out.truncate(MAX_RECOMMENDATIONS);
    out
}
