//! Accessibility extractor
//!
//! Scores start at 100 and each failed check deducts a fixed penalty. Every
//! deduction also appends a human-readable issue, in check order.

use crate::document::{Document, Element, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Inline-style fragments treated as low contrast, compared without whitespace
pub const LOW_CONTRAST_PATTERNS: &[&str] = &["color:#ccc", "color:lightgray"];

const ALT_PENALTY: u32 = 3;
const ALT_PENALTY_CAP: u32 = 30;
const LABEL_PENALTY: u32 = 5;
const LABEL_PENALTY_CAP: u32 = 20;
const LANG_PENALTY: u32 = 10;
const HEADING_PENALTY: u32 = 15;
const CONTRAST_PENALTY: u32 = 15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityFeatures {
    pub score: u32,
    pub issues: Vec<String>,
    /// Elements carrying a low-contrast inline style
    pub contrast_issues: usize,
    pub missing_labels: usize,
    pub missing_headings: bool,
    pub skip_links: bool,
    /// Images with no `alt` attribute at all
    pub images_without_alt: usize,
}

impl Default for AccessibilityFeatures {
    fn default() -> Self {
        Self {
            score: 100,
            issues: Vec::new(),
            contrast_issues: 0,
            missing_labels: 0,
            missing_headings: false,
            skip_links: false,
            images_without_alt: 0,
        }
    }
}

pub fn extract_accessibility(doc: &Document) -> AccessibilityFeatures {
    let mut features = AccessibilityFeatures::default();
    let mut penalty = 0;

    features.images_without_alt = doc.select_where("img", |el| !el.has_attr("alt")).count();
    if features.images_without_alt > 0 {
        features.issues.push(format!(
            "{} images missing alt attributes",
            features.images_without_alt
        ));
        penalty += capped(features.images_without_alt, ALT_PENALTY, ALT_PENALTY_CAP);
    }

    features.missing_labels = unlabelled_inputs(doc);
    if features.missing_labels > 0 {
        features.issues.push(format!(
            "{} form inputs without proper labels",
            features.missing_labels
        ));
        penalty += capped(features.missing_labels, LABEL_PENALTY, LABEL_PENALTY_CAP);
    }

    if !doc.root().is_some_and(|root| root.has_attr("lang")) {
        features
            .issues
            .push("Missing language declaration in HTML tag".to_string());
        penalty += LANG_PENALTY;
    }

    features.missing_headings = doc.count("h1") == 0;
    if features.missing_headings {
        features
            .issues
            .push("Missing H1 heading for proper document structure".to_string());
        penalty += HEADING_PENALTY;
    }

    features.contrast_issues = doc
        .select_where("*", |el| el.attr("style").is_some_and(is_low_contrast))
        .count();
    if features.contrast_issues > 0 {
        features
            .issues
            .push("Potential low contrast text detected".to_string());
        penalty += CONTRAST_PENALTY;
    }

    features.skip_links = doc
        .select_where("a", |el| el.attr_starts_with("href", "#"))
        .any(|anchor| doc.text(anchor).to_lowercase().contains("skip"));

    features.score = 100u32.saturating_sub(penalty);
    features
}

fn capped(count: usize, each: u32, cap: u32) -> u32 {
    u32::try_from(count)
        .unwrap_or(u32::MAX)
        .saturating_mul(each)
        .min(cap)
}

/// Inputs other than `type=hidden` with no accessible name
///
/// An input counts as labelled through `aria-label`, `aria-labelledby`, a
/// `<label for>` pointing at its `id`, or by sitting inside a `<label>`.
fn unlabelled_inputs(doc: &Document) -> usize {
    let labels = Labels::collect(doc);

    doc.select_where("input", |el| !el.attr_is("type", "hidden"))
        .filter(|input| !labels.covers(input))
        .count()
}

struct Labels<'a> {
    targets: HashSet<&'a str>,
    wrapped: HashSet<NodeId>,
}

impl<'a> Labels<'a> {
    fn collect(doc: &'a Document) -> Self {
        let mut targets = HashSet::new();
        let mut wrapped = HashSet::new();

        for label in doc.select_all("label") {
            if let Some(target) = label.attr("for").map(str::trim) {
                if !target.is_empty() {
                    targets.insert(target);
                }
            }
            wrapped.extend(doc.descendants(label).map(Element::id));
        }

        Self { targets, wrapped }
    }

    fn covers(&self, input: &Element) -> bool {
        input.has_attr("aria-label")
            || input.has_attr("aria-labelledby")
            || self.wrapped.contains(&input.id())
            || input
                .attr("id")
                .is_some_and(|id| self.targets.contains(id.trim()))
    }
}

fn is_low_contrast(style: &str) -> bool {
    let compact: String = style
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();
    LOW_CONTRAST_PATTERNS
        .iter()
        .any(|pattern| compact.contains(pattern))
}
