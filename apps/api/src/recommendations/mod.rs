//! Ranked, deduplicated advice built from the criterion grades and the analyzers' own messages.

use std::collections::{HashMap, HashSet};

use crate::analyzers::Findings;
use crate::lexicon::{DisplayLimits, SectionConfig};
use crate::models::analysis::{Criterion, Priority, Recommendation};
use crate::scoring::CriterionKind;

pub const GENERAL_CATEGORY: &str = "General";

pub struct RecommendationEngine {
    max_per_criterion: usize,
}

impl RecommendationEngine {
    pub fn new(limits: &DisplayLimits) -> Self {
        Self {
            max_per_criterion: limits.max_per_criterion,
        }
    }

    /// One critical item per missing section, then a general summary.
    pub fn gated(&self, missing: &[String], sections: &SectionConfig) -> Vec<Recommendation> {
        let mut out: Vec<Recommendation> = missing
            .iter()
            .map(|name| Recommendation {
                category: sections.display_name(name).to_string(),
                priority: Priority::Critical,
                message: sections
                    .spec(name)
                    .map(|s| s.missing_advice.clone())
                    .unwrap_or_else(|| format!("Add a {name} section")),
            })
            .collect();

        let names: Vec<&str> = missing.iter().map(|n| sections.display_name(n)).collect();
        out.push(Recommendation {
            category: GENERAL_CATEGORY.to_string(),
            priority: Priority::High,
            message: format!(
                "Your resume is missing critical sections ({}). Add them to receive a full evaluation",
                names.join(", ")
            ),
        });
        out
    }

    /// `criteria` must be the grader's output, in display order.
    pub fn compile(&self, criteria: &[Criterion], findings: &Findings) -> Vec<Recommendation> {
        let mut ranked: Vec<(Priority, CriterionKind, &str)> = Vec::new();
        for (&kind, criterion) in CriterionKind::ALL.iter().zip(criteria) {
            let priority = priority_for(criterion.score);
            ranked.extend(findings.messages(kind).map(|m| (priority, kind, m)));
        }
        // Stable: input order survives within a criterion.
        ranked.sort_by_key(|(priority, kind, _)| (*priority, *kind));

        let mut seen = HashSet::new();
        let mut per_criterion: HashMap<CriterionKind, usize> = HashMap::new();
        let mut out = Vec::new();
        for (priority, kind, message) in ranked {
            let count = per_criterion.entry(kind).or_default();
            // A message capped out of one criterion stays available to the next.
            if *count >= self.max_per_criterion || !seen.insert(message) {
                continue;
            }
            *count += 1;
            out.push(Recommendation {
                category: kind.name().to_string(),
                priority,
                message: message.to_string(),
            });
        }
        out
    }
}

fn priority_for(grade: u8) -> Priority {
    match grade {
        0..=1 => Priority::High,
        2..=3 => Priority::Medium,
        _ => Priority::Low,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::EngineConfig;
    use crate::scoring::CriteriaGrader;

    fn engine() -> RecommendationEngine {
        RecommendationEngine::new(&EngineConfig::default().display)
    }

    fn criteria_with(grades: &[(CriterionKind, u8)]) -> Vec<Criterion> {
        let mut criteria = CriteriaGrader::new(&EngineConfig::default().scoring.bands)
            .not_evaluated();
        for (kind, grade) in grades {
            let idx = CriterionKind::ALL.iter().position(|k| k == kind).unwrap();
            criteria[idx].score = *grade;
        }
        criteria
    }

    #[test]
    fn test_gated_lists_each_missing_section() {
        let config = EngineConfig::default();
        let missing = vec!["experience".to_string(), "contact".to_string()];
        let recs = engine().gated(&missing, &config.sections);
        assert_eq!(recs.len(), 3);
        assert!(recs[..2].iter().all(|r| r.priority == Priority::Critical));
        assert_eq!(recs[0].category, config.sections.display_name("experience"));
        assert_eq!(recs[2].category, GENERAL_CATEGORY);
        assert_eq!(recs[2].priority, Priority::High);
    }

    #[test]
    fn test_priority_follows_grade() {
        assert_eq!(priority_for(0), Priority::High);
        assert_eq!(priority_for(1), Priority::High);
        assert_eq!(priority_for(2), Priority::Medium);
        assert_eq!(priority_for(3), Priority::Medium);
        assert_eq!(priority_for(4), Priority::Low);
    }

    #[test]
    fn test_ordering_priority_then_display_order() {
        let mut f = Findings::default();
        f.formatting.recommendations = vec!["fix bullets".to_string()];
        f.quantification.recommendations = vec!["add numbers".to_string()];
        f.summary.recommendations = vec!["write a summary".to_string()];
        let criteria = criteria_with(&[
            (CriterionKind::QuantifyImpact, 5),
            (CriterionKind::Summary, 3),
            (CriterionKind::Formatting, 1),
        ]);

        let recs = engine().compile(&criteria, &f);
        let messages: Vec<&str> = recs.iter().map(|r| r.message.as_str()).collect();
        assert_eq!(messages, ["fix bullets", "write a summary", "add numbers"]);
        assert_eq!(recs[0].category, "Formatting");
        assert_eq!(recs[2].priority, Priority::Low);
    }

    #[test]
    fn test_duplicates_dropped_and_criterion_capped() {
        let mut f = Findings::default();
        f.structure.recommendations = (0..6).map(|i| format!("structure {i}")).collect();
        f.readability.recommendations = vec!["structure 0".to_string(), "shorter".to_string()];
        let criteria = criteria_with(&[]);

        let recs = engine().compile(&criteria, &f);
        let structure = recs.iter().filter(|r| r.category == "Structure").count();
        assert_eq!(structure, 4, "capped at max_per_criterion");
        assert_eq!(recs.iter().filter(|r| r.message == "structure 0").count(), 1);
        assert!(recs.iter().any(|r| r.message == "shorter"));
    }

    #[test]
    fn test_message_capped_in_one_criterion_survives_in_another() {
        let mut f = Findings::default();
        f.structure.recommendations = (0..4)
            .map(|i| format!("structure {i}"))
            .chain(["shared advice".to_string()])
            .collect();
        f.readability.recommendations = vec!["shared advice".to_string()];
        let criteria = criteria_with(&[]);

        let recs = engine().compile(&criteria, &f);
        let shared: Vec<&Recommendation> =
            recs.iter().filter(|r| r.message == "shared advice").collect();
        assert_eq!(shared.len(), 1);
        assert_eq!(shared[0].category, "Readability");
    }

    #[test]
    fn test_tone_advice_files_under_writing_quality() {
        let mut f = Findings::default();
        f.writing_quality.recommendations = vec!["drop pronouns".to_string()];
        f.tone.recommendations = vec!["calmer wording".to_string()];
        let criteria = criteria_with(&[]);

        let recs = engine().compile(&criteria, &f);
        let messages: Vec<&str> = recs
            .iter()
            .filter(|r| r.category == "Writing Quality")
            .map(|r| r.message.as_str())
            .collect();
        assert_eq!(messages, ["drop pronouns", "calmer wording"]);
    }
}
