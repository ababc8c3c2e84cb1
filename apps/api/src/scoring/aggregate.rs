//! Weighted category scores, the final 0–100 score and the performance tier.

use crate::analyzers::Findings;
use crate::lexicon::{
    CategoryWeights, Component, LanguageQualityRule, ScoringConfig, TierSpec, WeightedComponent,
};
use crate::models::analysis::{CategoryScores, PerformanceTier};

pub struct ScoreAggregator {
    budgets: CategoryScores,
    weights: CategoryWeights,
    language: LanguageQualityRule,
    tiers: Vec<TierSpec>,
}

impl ScoreAggregator {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            budgets: config.budgets,
            weights: config.weights.clone(),
            language: config.language_quality.clone(),
            tiers: config.tiers.clone(),
        }
    }

    pub fn budgets(&self) -> CategoryScores {
        self.budgets
    }

    /// Category points for a resume that passed the gate. Unrounded.
    pub fn categories(&self, findings: &Findings) -> CategoryScores {
        let b = &self.budgets;
        let w = &self.weights;
        CategoryScores {
            ats_compatibility: weighted(b.ats_compatibility, &w.ats_compatibility, findings),
            content_quality: weighted(b.content_quality, &w.content_quality, findings),
            keyword_optimization: weighted(
                b.keyword_optimization,
                &w.keyword_optimization,
                findings,
            ),
            structure: weighted(b.structure, &w.structure, findings),
            language_quality: self.language_quality(findings.writing_quality.issue_count),
        }
    }

    /// Bounded below by the rule's floor no matter how many issues are found.
    pub fn language_quality(&self, issues: usize) -> f64 {
        let rule = &self.language;
        let penalty = (issues as f64 * rule.per_issue).min(rule.max_penalty);
        (rule.base - penalty).max(rule.floor)
    }

    pub fn score(&self, categories: &CategoryScores) -> u8 {
        categories.total().round().clamp(0.0, 100.0) as u8
    }

    /// The last tier whose lower bound the score reaches.
    pub fn tier(&self, score: u8) -> PerformanceTier {
        self.tiers
            .iter()
            .rev()
            .find(|t| t.min_score <= score)
            .or_else(|| self.tiers.first())
            .map(|t| PerformanceTier {
                label: t.label.clone(),
                color: t.color.clone(),
                advice: t.advice.clone(),
            })
            .unwrap_or_else(|| PerformanceTier {
                label: String::new(),
                color: String::new(),
                advice: String::new(),
            })
    }
}

/// `budget × Σ wᵢcᵢ / (100 Σ wᵢ)` over the components that have a value.
fn weighted(budget: f64, components: &[WeightedComponent], findings: &Findings) -> f64 {
    let (sum, weights) = components
        .iter()
        .filter_map(|c| component_value(c.component, findings).map(|v| (v * c.weight, c.weight)))
        .fold((0.0, 0.0), |(s, w), (v, cw)| (s + v, w + cw));
    if weights <= 0.0 {
        return 0.0;
    }
    (budget * sum / (100.0 * weights)).clamp(0.0, budget)
}

/// A component on the 0–100 scale, or `None` when it does not apply to this run.
pub fn component_value(component: Component, f: &Findings) -> Option<f64> {
    let value = match component {
        Component::Formatting => f.formatting.formatting_score,
        Component::Readability => f.readability.flesch_reading_ease,
        Component::BuzzwordDensity => 100.0 - 10.0 * f.buzzwords.total_buzzwords as f64,
        Component::RequiredSections => 100.0 - 25.0 * f.structure.missing_required.len() as f64,
        Component::Quantification => 2.0 * f.quantification.quantified_percentage,
        Component::ActionVerbs => f.action_verbs.action_verb_score,
        Component::ImpactDiversity => f.impact_metrics.impact_score,
        Component::Summary => f.summary.summary_score,
        Component::BuzzwordScore => f.buzzwords.buzzword_score,
        Component::Skills => f.skills.skills_score,
        Component::KeywordCoverage => f.keywords.keyword_score,
        Component::JobMatch => f.keywords.match_percentage?,
        Component::StructureScore => f.structure.structure_score,
        Component::Dates => f.date_consistency.consistency_score,
        Component::Chronology => f.chronology.chronology_score,
        Component::Modernization => f.unnecessary_sections.modernization_score,
    };
    Some(value.clamp(0.0, 100.0))
}
