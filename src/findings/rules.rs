//! The static finding rule table

use super::{Bucket, Finding, Impact};
use crate::extract::FeatureSet;

/// Optimal title length in characters, inclusive
const TITLE_LENGTH: std::ops::RangeInclusive<usize> = 30..=60;
const MIN_WORDS: usize = 300;
const FAST_RESPONSE_MS: u64 = 2000;
const TITLE_EXCERPT_CHARS: usize = 100;

pub(crate) struct Rule {
    pub bucket: Bucket,
    pub applies: fn(&FeatureSet) -> bool,
    pub build: fn(&FeatureSet) -> Finding,
}

pub(crate) static RULES: &[Rule] = &[
    // critical
    Rule {
        bucket: Bucket::Critical,
        applies: |f| !f.technical.has_ssl,
        build: |_| {
            Finding::new(
                "Security",
                "SSL Certificate Missing",
                "Your website is not using HTTPS, which poses security risks and negatively impacts SEO rankings.",
                Impact::Critical,
            )
            .details("Website accessed via HTTP instead of HTTPS protocol")
            .recommend("Install and configure an SSL certificate immediately")
            .fix("Contact your hosting provider to install an SSL certificate, or use services like Let's Encrypt for free SSL")
            .resources(&[
                "https://letsencrypt.org/",
                "https://developers.google.com/web/fundamentals/security/encrypt-in-transit/why-https",
            ])
        },
    },
    Rule {
        bucket: Bucket::Critical,
        applies: |f| f.outline.title.is_empty(),
        build: |_| {
            Finding::new(
                "On-Page SEO",
                "Missing Title Tag",
                "No title tag found on this page, which is essential for SEO and user experience.",
                Impact::Critical,
            )
            .details("HTML <title> element is missing from document head")
            .recommend("Add a descriptive, keyword-rich title tag")
            .fix("Add <title>Your Page Title</title> within the <head> section of your HTML")
            .resources(&["https://developers.google.com/search/docs/appearance/title-link"])
        },
    },
    Rule {
        bucket: Bucket::Critical,
        applies: |f| f.outline.h1_tags.is_empty(),
        build: |_| {
            Finding::new(
                "Content Structure",
                "Missing H1 Heading",
                "No H1 heading found. H1 tags are crucial for content hierarchy and SEO.",
                Impact::Critical,
            )
            .details("No <h1> elements detected in page content")
            .recommend("Add one H1 heading that describes the main topic of the page")
            .fix("Add <h1>Main Page Heading</h1> to describe your page's primary topic")
            .resources(&["https://developer.mozilla.org/en-US/docs/Web/HTML/Element/Heading_Elements"])
        },
    },
    // warnings
    Rule {
        bucket: Bucket::Warning,
        applies: |f| f.outline.meta_description.is_empty(),
        build: |_| {
            Finding::new(
                "On-Page SEO",
                "Missing Meta Description",
                "No meta description found. This affects how your page appears in search results.",
                Impact::High,
            )
            .details("HTML meta description tag is missing")
            .recommend("Add a compelling meta description (150-160 characters)")
            .fix(r#"Add <meta name="description" content="Your page description"> in the head section"#)
            .resources(&["https://developers.google.com/search/docs/appearance/snippet"])
        },
    },
    Rule {
        bucket: Bucket::Warning,
        applies: |f| !f.outline.title.is_empty() && !TITLE_LENGTH.contains(&title_len(f)),
        build: |f| {
            Finding::new(
                "On-Page SEO",
                "Title Tag Length Issues",
                format!(
                    "Title tag is {} characters. Optimal length is 30-60 characters.",
                    title_len(f)
                ),
                Impact::Medium,
            )
            .details(format!("Current title: \"{}...\"", title_excerpt(f)))
            .recommend("Optimize title length to 30-60 characters for better display in search results")
            .fix("Rewrite your title to be concise yet descriptive within the recommended length")
            .resources(&["https://moz.com/learn/seo/title-tag"])
        },
    },
    Rule {
        bucket: Bucket::Warning,
        applies: |f| f.images.missing_alt > 0,
        build: |f| {
            Finding::new(
                "Accessibility",
                "Images Missing Alt Text",
                format!(
                    "{} images are missing alt attributes, affecting accessibility and SEO.",
                    f.images.missing_alt
                ),
                Impact::Medium,
            )
            .details(format!(
                "{} out of {} images lack alt attributes",
                f.images.missing_alt, f.images.total
            ))
            .recommend("Add descriptive alt text to all images")
            .fix(r#"Add alt="descriptive text" attribute to each img tag"#)
            .resources(&[
                "https://www.w3.org/WAI/tutorials/images/",
                "https://developers.google.com/search/docs/appearance/google-images",
            ])
        },
    },
    Rule {
        bucket: Bucket::Warning,
        applies: |f| !f.technical.has_robots_txt,
        build: |_| {
            Finding::new(
                "Technical SEO",
                "Missing Robots.txt File",
                "No robots.txt file found to guide search engine crawlers.",
                Impact::Medium,
            )
            .details("HEAD request to /robots.txt did not return 200")
            .recommend("Create a robots.txt file to guide search engines")
            .fix("Create a robots.txt file in your website root directory")
            .resources(&["https://developers.google.com/search/docs/crawling-indexing/robots/intro"])
        },
    },
    Rule {
        bucket: Bucket::Warning,
        applies: |f| !f.technical.has_sitemap,
        build: |_| {
            Finding::new(
                "Technical SEO",
                "XML Sitemap Not Found",
                "No XML sitemap detected, which helps search engines discover your content.",
                Impact::Medium,
            )
            .details("None of the common sitemap locations returned 200")
            .recommend("Generate and submit an XML sitemap")
            .fix("Create an XML sitemap and submit it to Google Search Console")
            .resources(&["https://developers.google.com/search/docs/crawling-indexing/sitemaps/overview"])
        },
    },
    // recommendations
    Rule {
        bucket: Bucket::Recommendation,
        applies: |f| !f.technical.is_responsive,
        build: |_| {
            Finding::new(
                "Mobile Optimization",
                "Add Mobile Viewport Meta Tag",
                "No viewport meta tag found, which may affect mobile user experience.",
                Impact::Medium,
            )
            .details(r#"Missing <meta name="viewport"> tag in document head"#)
            .recommend("Add viewport meta tag for responsive design")
            .fix(r#"Add <meta name="viewport" content="width=device-width, initial-scale=1"> to head section"#)
            .resources(&["https://developers.google.com/web/fundamentals/design-and-ux/responsive/"])
        },
    },
    Rule {
        bucket: Bucket::Recommendation,
        applies: |f| !f.social_meta.has_open_graph,
        build: |_| {
            Finding::new(
                "Social Media",
                "Add Open Graph Meta Tags",
                "No Open Graph tags found, limiting social media sharing optimization.",
                Impact::Low,
            )
            .details("No og: prefixed meta property tags detected")
            .recommend("Add Open Graph tags for better social sharing")
            .fix("Add og:title, og:description, og:image, and og:url meta tags")
            .resources(&[
                "https://ogp.me/",
                "https://developers.facebook.com/docs/sharing/webmasters/",
            ])
        },
    },
    Rule {
        bucket: Bucket::Recommendation,
        applies: |f| !f.social_meta.has_twitter_cards,
        build: |_| {
            Finding::new(
                "Social Media",
                "Add Twitter Card Meta Tags",
                "No Twitter Card tags found, missing enhanced Twitter sharing.",
                Impact::Low,
            )
            .details("No twitter: prefixed meta name tags detected")
            .recommend("Add Twitter Card meta tags")
            .fix("Add twitter:card, twitter:title, twitter:description meta tags")
            .resources(&["https://developer.twitter.com/en/docs/twitter-for-websites/cards/overview/abouts-cards"])
        },
    },
    Rule {
        bucket: Bucket::Recommendation,
        applies: |f| f.content.word_count < MIN_WORDS,
        build: |f| {
            Finding::new(
                "Content Quality",
                "Increase Content Length",
                format!(
                    "Page has only {} words. More content may improve SEO.",
                    f.content.word_count
                ),
                Impact::Medium,
            )
            .details(format!("Current word count: {} words", f.content.word_count))
            .recommend("Aim for at least 300 words of quality content")
            .fix("Add more relevant, valuable content that serves your users' needs")
            .resources(&[
                "https://backlinko.com/content-study",
                "https://blog.hubspot.com/marketing/how-long-should-blog-posts-be",
            ])
        },
    },
    // positive
    Rule {
        bucket: Bucket::Positive,
        applies: |f| f.technical.has_ssl,
        build: |_| {
            Finding::new(
                "Security",
                "SSL Certificate Active",
                "Website properly uses HTTPS encryption for secure communication.",
                Impact::High,
            )
            .details("Page requested over HTTPS")
            .recommend("Maintain SSL certificate and monitor expiration dates")
        },
    },
    Rule {
        bucket: Bucket::Positive,
        applies: |f| !f.outline.title.is_empty() && TITLE_LENGTH.contains(&title_len(f)),
        build: |f| {
            Finding::new(
                "On-Page SEO",
                "Optimal Title Tag Length",
                format!(
                    "Title tag length ({} characters) is within optimal range.",
                    title_len(f)
                ),
                Impact::Medium,
            )
            .details(format!("Title: \"{}\"", f.outline.title))
            .recommend("Continue using well-optimized title tags")
        },
    },
    Rule {
        bucket: Bucket::Positive,
        applies: |f| f.outline.h1_tags.len() == 1,
        build: |f| {
            Finding::new(
                "Content Structure",
                "Proper H1 Usage",
                "Page has exactly one H1 heading, following SEO best practices.",
                Impact::Medium,
            )
            .details(format!(
                "H1 heading: \"{}\"",
                f.outline.h1_tags.first().map(String::as_str).unwrap_or_default()
            ))
            .recommend("Maintain proper heading hierarchy with one H1 per page")
        },
    },
    Rule {
        bucket: Bucket::Positive,
        applies: |f| f.images.total > 0 && f.images.missing_alt == 0,
        build: |f| {
            Finding::new(
                "Accessibility",
                "All Images Have Alt Text",
                "All images include alt attributes for better accessibility and SEO.",
                Impact::Medium,
            )
            .details(format!("{} images all have alt attributes", f.images.total))
            .recommend("Continue providing descriptive alt text for new images")
        },
    },
    Rule {
        bucket: Bucket::Positive,
        applies: |f| f.technical.response_time_ms < FAST_RESPONSE_MS,
        build: |f| {
            Finding::new(
                "Performance",
                "Fast Server Response",
                format!(
                    "Server responds quickly ({}ms), providing good user experience.",
                    f.technical.response_time_ms
                ),
                Impact::Medium,
            )
            .details(format!("Response time: {}ms", f.technical.response_time_ms))
            .recommend("Monitor and maintain fast response times")
        },
    },
];

fn title_len(features: &FeatureSet) -> usize {
    features.outline.title.chars().count()
}

fn title_excerpt(features: &FeatureSet) -> String {
    features
        .outline
        .title
        .chars()
        .take(TITLE_EXCERPT_CHARS)
        .collect()
}

impl Finding {
    fn new(
        category: &str,
        title: &str,
        description: impl Into<String>,
        impact: Impact,
    ) -> Self {
        Self {
            category: category.to_string(),
            title: title.to_string(),
            description: description.into(),
            impact,
            technical_details: None,
            recommendation: None,
            how_to_fix: None,
            resources: Vec::new(),
        }
    }

    fn details(mut self, details: impl Into<String>) -> Self {
        self.technical_details = Some(details.into());
        self
    }

    fn recommend(mut self, recommendation: &str) -> Self {
        self.recommendation = Some(recommendation.to_string());
        self
    }

    fn fix(mut self, how_to_fix: &str) -> Self {
        self.how_to_fix = Some(how_to_fix.to_string());
        self
    }

    fn resources(mut self, resources: &[&str]) -> Self {
        self.resources = resources.iter().map(|r| r.to_string()).collect();
        self
    }
}
