use serde::{Deserialize, Serialize};

use super::{AnalysisInput, ContentAnalyzer};
use crate::lexicon::{ConfigError, IssueSeverity, Lexicons, OutdatedSection, PhraseMatcher};
use crate::sections::normalize_header;

const MAX_HEADER_WORDS: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlaggedSection {
    pub kind: String,
    pub patterns_found: Vec<String>,
    pub description: String,
    pub severity: IssueSeverity,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassedCheck {
    pub kind: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnnecessarySectionsFinding {
    pub sections_found: Vec<FlaggedSection>,
    /// One entry per outdated kind that was not found.
    pub passed_checks: Vec<PassedCheck>,
    pub total_issues: usize,
    pub modernization_score: f64,
    pub has_outdated_sections: bool,
    pub summary: String,
    pub recommendations: Vec<String>,
}

struct CompiledKind {
    spec: OutdatedSection,
    headers: Vec<String>,
    phrases: Option<PhraseMatcher>,
}

pub struct UnnecessarySectionsAnalyzer {
    kinds: Vec<CompiledKind>,
}

impl UnnecessarySectionsAnalyzer {
    pub fn new(lexicons: &Lexicons) -> Result<Self, ConfigError> {
        let kinds = lexicons
            .outdated_sections
            .iter()
            .map(|spec| {
                let phrases = if spec.phrases.is_empty() {
                    None
                } else {
                    Some(PhraseMatcher::new(&spec.phrases, "outdated_sections.phrases")?)
                };
                Ok(CompiledKind {
                    spec: spec.clone(),
                    headers: spec.headers.iter().map(|h| normalize_header(h)).collect(),
                    phrases,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;
        Ok(Self { kinds })
    }
}

impl CompiledKind {
    fn detect(&self, lines: &[String], text: &str) -> Vec<String> {
        let mut found: Vec<String> = Vec::new();
        for line in lines {
            let head = line.split(':').next().unwrap_or(line);
            if head.split_whitespace().count() > MAX_HEADER_WORDS {
                continue;
            }
            let norm = normalize_header(head);
            if self.headers.contains(&norm) && !found.contains(&norm) {
                found.push(norm);
            }
        }
        if let Some(phrases) = &self.phrases {
            for phrase in phrases.found_in(text) {
                if !found.contains(&phrase) {
                    found.push(phrase);
                }
            }
        }
        found
    }
}

impl ContentAnalyzer for UnnecessarySectionsAnalyzer {
    type Finding = UnnecessarySectionsFinding;

    fn analyze(&self, input: &AnalysisInput<'_>) -> UnnecessarySectionsFinding {
        let lines = input.text.lines();
        let text = input.text.raw();
        let mut sections_found = Vec::new();
        let mut passed_checks = Vec::new();

        for kind in &self.kinds {
            let patterns_found = kind.detect(lines, text);
            if patterns_found.is_empty() {
                passed_checks.push(PassedCheck {
                    kind: kind.spec.kind.clone(),
                    description: format!(
                        "No {} section found; this follows modern resume standards",
                        kind.spec.label
                    ),
                });
            } else {
                sections_found.push(FlaggedSection {
                    kind: kind.spec.kind.clone(),
                    patterns_found,
                    description: kind.spec.description.clone(),
                    severity: kind.spec.severity,
                    recommendation: kind.spec.recommendation.clone(),
                });
            }
        }

        let weight: u32 = sections_found.iter().map(|s| s.severity.weight()).sum();
        let score = (100.0 - 10.0 * weight as f64).max(0.0);
        let total = sections_found.len();

        let summary = match total {
            0 => "Your resume follows modern standards with no outdated sections".to_string(),
            1 => "One outdated section found; removing it frees space for achievements".to_string(),
            n => format!("{n} outdated sections found; removing them modernizes your resume"),
        };

        let mut recommendations: Vec<String> = sections_found
            .iter()
            .filter(|s| s.severity == IssueSeverity::High)
            .chain(sections_found.iter().filter(|s| s.severity != IssueSeverity::High))
            .map(|s| s.recommendation.clone())
            .collect();
        if total > 0 {
            recommendations.push(
                "Use the freed space for quantified achievements or relevant skills".to_string(),
            );
        }

        UnnecessarySectionsFinding {
            has_outdated_sections: total > 0,
            total_issues: total,
            sections_found,
            passed_checks,
            modernization_score: score,
            summary,
            recommendations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::test_support::run;
    use crate::lexicon::EngineConfig;

    fn analyzer() -> UnnecessarySectionsAnalyzer {
        UnnecessarySectionsAnalyzer::new(&EngineConfig::default().lexicons).unwrap()
    }

    #[test]
    fn test_references_flagged_objective_passed() {
        let f = run(
            &analyzer(),
            "Experience\n- Built X\nReferences\nAvailable upon request",
        );
        assert_eq!(f.total_issues, 1);
        assert_eq!(f.sections_found[0].kind, "references");
        assert!(f.passed_checks.iter().any(|c| c.kind == "objective"));
        assert_eq!(f.passed_checks.len(), 4);
        assert_eq!(f.modernization_score, 80.0);
    }

    #[test]
    fn test_clean_resume_passes_every_check() {
        let f = run(&analyzer(), "Experience\n- Built X\nSkills: Rust");
        assert!(!f.has_outdated_sections);
        assert_eq!(f.passed_checks.len(), 5);
        assert_eq!(f.modernization_score, 100.0);
    }

    #[test]
    fn test_personal_info_by_field_phrase() {
        let f = run(&analyzer(), "Jane Doe\nDate of birth: 1990-01-01\nMarital status: single");
        assert_eq!(f.sections_found[0].kind, "personal_info");
        assert_eq!(f.sections_found[0].severity, IssueSeverity::High);
        assert_eq!(f.modernization_score, 70.0);
    }

    #[test]
    fn test_severity_weights_accumulate() {
        // personal info (3) + salary (3) + hobbies (1) + objective (2) + references (2) = 11
        let text = "Objective\nAge: 30\nSalary expectations\nHobbies\nReferences";
        let f = run(&analyzer(), text);
        assert_eq!(f.total_issues, 5);
        assert_eq!(f.modernization_score, 0.0);
        assert!(f.recommendations[0].contains("personal information"));
    }

    #[test]
    fn test_word_in_sentence_is_not_a_header() {
        let f = run(&analyzer(), "- Mentored interns on their career interests and goals");
        assert!(!f.has_outdated_sections);
    }
}
