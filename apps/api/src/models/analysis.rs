use serde::{Deserialize, Serialize};

use crate::analyzers::Findings;
use crate::sections::SectionReport;

/// Per-category points. Also used for the category budgets themselves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub ats_compatibility: f64,
    pub content_quality: f64,
    pub keyword_optimization: f64,
    pub structure: f64,
    pub language_quality: f64,
}

impl CategoryScores {
    pub fn total(&self) -> f64 {
        self.ats_compatibility
            + self.content_quality
            + self.keyword_optimization
            + self.structure
            + self.language_quality
    }

    /// Each category rounded to two decimals, for display.
    pub fn rounded(&self) -> Self {
        let r = |v: f64| (v * 100.0).round() / 100.0;
        Self {
            ats_compatibility: r(self.ats_compatibility),
            content_quality: r(self.content_quality),
            keyword_optimization: r(self.keyword_optimization),
            structure: r(self.structure),
            language_quality: r(self.language_quality),
        }
    }
}

/// Display grouping for a criterion grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CriterionGroup {
    #[serde(rename = "Needs Work")]
    NeedsWork,
    #[serde(rename = "Good Progress")]
    GoodProgress,
    #[serde(rename = "Excellent")]
    Excellent,
}

impl CriterionGroup {
    pub fn for_grade(score: u8) -> Self {
        match score {
            0..=1 => CriterionGroup::NeedsWork,
            2..=3 => CriterionGroup::GoodProgress,
            _ => CriterionGroup::Excellent,
        }
    }
}

/// A 0–5 graded check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub name: String,
    pub score: u8,
    pub description: String,
    pub group: CriterionGroup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: String,
    pub priority: Priority,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceTier {
    pub label: String,
    pub color: String,
    pub advice: String,
}

/// Everything one analysis produces. Fully determined by the inputs and the engine config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub score: u8,
    pub breakdown: CategoryScores,
    pub breakdown_max: CategoryScores,
    pub critical_failure: bool,
    pub missing_critical_sections: Vec<String>,
    pub sections: SectionReport,
    pub criteria: Vec<Criterion>,
    pub recommendations: Vec<Recommendation>,
    pub performance_tier: PerformanceTier,
    /// Detailed analyzer output. All defaults when the gate failed.
    pub findings: Findings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounded_keeps_two_decimals() {
        let scores = CategoryScores {
            ats_compatibility: 12.3456,
            content_quality: 0.005,
            ..Default::default()
        };
        let r = scores.rounded();
        assert_eq!(r.ats_compatibility, 12.35);
        assert_eq!(r.content_quality, 0.01);
    }

    #[test]
    fn test_priority_orders_critical_first() {
        let mut p = vec![Priority::Low, Priority::Critical, Priority::Medium, Priority::High];
        p.sort();
        assert_eq!(
            p,
            vec![Priority::Critical, Priority::High, Priority::Medium, Priority::Low]
        );
    }

    #[test]
    fn test_priority_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Priority::Critical).unwrap(), "\"critical\"");
    }

    #[test]
    fn test_criterion_groups() {
        assert_eq!(CriterionGroup::for_grade(0), CriterionGroup::NeedsWork);
        assert_eq!(CriterionGroup::for_grade(1), CriterionGroup::NeedsWork);
        assert_eq!(CriterionGroup::for_grade(3), CriterionGroup::GoodProgress);
        assert_eq!(CriterionGroup::for_grade(4), CriterionGroup::Excellent);
        assert_eq!(
            serde_json::to_string(&CriterionGroup::GoodProgress).unwrap(),
            "\"Good Progress\""
        );
    }
}
