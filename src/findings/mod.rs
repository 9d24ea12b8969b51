//! Finding generation
//!
//! Findings come from a fixed rule table evaluated in order against a
//! [`FeatureSet`]. Each rule is independent; every rule whose predicate holds
//! contributes one [`Finding`] to its bucket, so ordering within a bucket is
//! the table order.

mod recommendations;
mod rules;

pub use recommendations::{generate_recommendations, MAX_RECOMMENDATIONS};

use crate::extract::FeatureSet;
use serde::{Deserialize, Serialize};

/// Severity of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Critical,
    High,
    Medium,
    Low,
}

impl Impact {
    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::Critical => "critical",
            Impact::High => "high",
            Impact::Medium => "medium",
            Impact::Low => "low",
        }
    }
}

/// A categorized observation with remediation guidance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub category: String,
    pub title: String,
    pub description: String,
    pub impact: Impact,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technical_details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub how_to_fix: Option<String>,
    #[serde(default)]
    pub resources: Vec<String>,
}

/// Findings grouped by severity bucket
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindingBuckets {
    pub critical_issues: Vec<Finding>,
    pub warnings: Vec<Finding>,
    pub recommendations: Vec<Finding>,
    pub positive_findings: Vec<Finding>,
}

impl FindingBuckets {
    /// Total number of findings across all buckets
    pub fn len(&self) -> usize {
        self.critical_issues.len()
            + self.warnings.len()
            + self.recommendations.len()
            + self.positive_findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn bucket_mut(&mut self, bucket: Bucket) -> &mut Vec<Finding> {
        match bucket {
            Bucket::Critical => &mut self.critical_issues,
            Bucket::Warning => &mut self.warnings,
            Bucket::Recommendation => &mut self.recommendations,
            Bucket::Positive => &mut self.positive_findings,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Bucket {
    Critical,
    Warning,
    Recommendation,
    Positive,
}

/// Evaluates the rule table against a feature set
pub fn generate_findings(features: &FeatureSet) -> FindingBuckets {
    let mut buckets = FindingBuckets::default();

    for rule in rules::RULES {
        if (rule.applies)(features) {
            buckets.bucket_mut(rule.bucket).push((rule.build)(features));
        }
    }

    buckets
}
