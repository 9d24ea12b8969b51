//! Category and overall scores
//!
//! Scores are a pure function of a [`FeatureSet`]. Each category accumulates
//! fractional points; rounding happens once at the end, and every value is
//! clamped to `0..=100`.

use crate::extract::FeatureSet;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSet {
    pub overall: u32,
    pub technical: u32,
    pub content: u32,
    pub performance: u32,
    pub accessibility: u32,
    pub social: u32,
}

/// Computes all category scores and their flat mean
///
/// # Example
///
/// ```
/// use sumi_lens::{compute_scores, FeatureSet};
///
/// let scores = compute_scores(&FeatureSet::default());
/// assert!(scores.overall <= 100);
/// assert_eq!(scores.social, 0);
/// ```
pub fn compute_scores(features: &FeatureSet) -> ScoreSet {
    let technical = technical_points(features);
    let content = content_points(features);
    let performance = performance_points(features);
    let accessibility = f64::from(features.accessibility.score);
    let social = social_points(features);

    let overall = (technical + content + performance + accessibility + social) / 5.0;

    ScoreSet {
        overall: to_score(overall),
        technical: to_score(technical),
        content: to_score(content),
        performance: to_score(performance),
        accessibility: to_score(accessibility),
        social: to_score(social),
    }
}

fn technical_points(features: &FeatureSet) -> f64 {
    let technical = &features.technical;
    [
        (technical.has_ssl, 20.0),
        (technical.has_robots_txt, 15.0),
        (technical.has_sitemap, 15.0),
        (technical.is_responsive, 15.0),
        (technical.has_valid_structured_data, 15.0),
        (technical.status_code == 200, 20.0),
    ]
    .iter()
    .filter(|(passed, _)| *passed)
    .map(|(_, points)| points)
    .sum()
}

fn content_points(features: &FeatureSet) -> f64 {
    let mut points = 0.0;

    if !features.outline.title.is_empty() {
        points += 20.0;
    }
    if !features.outline.meta_description.is_empty() {
        points += 20.0;
    }
    if !features.outline.h1_tags.is_empty() {
        points += 15.0;
    }

    let words = features.content.word_count;
    points += if words > 300 { 20.0 } else { words as f64 / 15.0 };

    let readability = features.content.readability_score;
    points += if readability > 60 {
        15.0
    } else {
        f64::from(readability) / 4.0
    };

    let missing_alt = features.images.missing_alt;
    points += if missing_alt == 0 {
        10.0
    } else {
        (10.0 - missing_alt as f64).max(0.0)
    };

    points
}

fn performance_points(features: &FeatureSet) -> f64 {
    let response_time = features.technical.response_time_ms as f64;
    let page_size = features.performance.page_size_kb as f64;
    let requests = features.performance.requests as f64;
    let oversized = features.images.oversized as f64;

    let mut points = 0.0;
    points += if response_time < 1000.0 {
        30.0
    } else {
        (30.0 - (response_time - 1000.0) / 100.0).max(0.0)
    };
    points += if page_size < 1000.0 {
        25.0
    } else {
        (25.0 - (page_size - 1000.0) / 100.0).max(0.0)
    };
    points += if requests < 50.0 {
        20.0
    } else {
        (20.0 - (requests - 50.0)).max(0.0)
    };
    points += (25.0 - oversized * 5.0).max(0.0);

    points
}

fn social_points(features: &FeatureSet) -> f64 {
    let social = &features.social_meta;
    let mut points = 0.0;
    if social.has_open_graph {
        points += 40.0;
    }
    if social.has_twitter_cards {
        points += 30.0;
    }
    if social.has_facebook_meta {
        points += 30.0;
    }
    points
}

fn to_score(points: f64) -> u32 {
    points.round().clamp(0.0, 100.0) as u32
}
