use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{AnalysisInput, ContentAnalyzer};
use crate::lexicon::{ConfigError, DisplayLimits, Lexicons, PhraseMatcher};

static EXPERIENCE_YEARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})\+?\s*(?:years?|yrs?)\b").expect("static regex")
});

/// Below this many recognised keywords the resume reads as thin to an ATS.
const MIN_KEYWORDS: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordFinding {
    pub resume_keywords: Vec<String>,
    pub total_keywords: usize,
    pub experience_years: Option<u32>,
    pub education_levels: Vec<String>,
    pub job_keywords: Vec<String>,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    /// `None` without a job description, or when it names no known keywords.
    pub match_percentage: Option<f64>,
    pub keyword_score: f64,
    pub recommendations: Vec<String>,
}

pub struct KeywordAnalyzer {
    technical: PhraseMatcher,
    soft: PhraseMatcher,
    degrees: PhraseMatcher,
    limits: DisplayLimits,
}

impl KeywordAnalyzer {
    pub fn new(lexicons: &Lexicons, limits: &DisplayLimits) -> Result<Self, ConfigError> {
        Ok(Self {
            technical: PhraseMatcher::new(&lexicons.all_technical_skills(), "technical_skills")?,
            soft: PhraseMatcher::new(&lexicons.soft_skills, "soft_skills")?,
            degrees: PhraseMatcher::new(&lexicons.degree_terms, "degree_terms")?,
            limits: limits.clone(),
        })
    }

    fn keywords(&self, text: &str) -> BTreeSet<String> {
        self.technical
            .found_in(text)
            .into_iter()
            .chain(self.soft.found_in(text))
            .collect()
    }
}

impl ContentAnalyzer for KeywordAnalyzer {
    type Finding = KeywordFinding;

    fn analyze(&self, input: &AnalysisInput<'_>) -> KeywordFinding {
        let raw = input.text.raw();
        let resume = self.keywords(raw);
        let experience_years = EXPERIENCE_YEARS
            .captures_iter(raw)
            .filter_map(|c| c[1].parse::<u32>().ok())
            .max();

        let mut finding = KeywordFinding {
            total_keywords: resume.len(),
            experience_years,
            education_levels: self.degrees.found_in(raw),
            keyword_score: (5.0 * resume.len() as f64).min(100.0),
            ..Default::default()
        };

        if let Some(jd) = input.job_description {
            let job = self.keywords(jd);
            finding.matched_keywords = job.intersection(&resume).cloned().collect();
            finding.missing_keywords = job.difference(&resume).cloned().collect();
            finding.match_percentage = (!job.is_empty())
                .then(|| finding.matched_keywords.len() as f64 / job.len() as f64 * 100.0);
            finding.job_keywords = job.into_iter().collect();

            if !finding.missing_keywords.is_empty() {
                let shown: Vec<&str> = finding
                    .missing_keywords
                    .iter()
                    .take(self.limits.max_examples)
                    .map(String::as_str)
                    .collect();
                finding.recommendations.push(format!(
                    "Add job-description keywords you can back up: {}",
                    shown.join(", ")
                ));
            }
            if finding.match_percentage.is_some_and(|p| p < 50.0) {
                finding.recommendations.push(
                    "Mirror the job description's wording for skills you already have".to_string(),
                );
            }
        }
        if resume.len() < MIN_KEYWORDS {
            finding
                .recommendations
                .push("Include more relevant technical skills and keywords".to_string());
        }
        finding.resume_keywords = resume.into_iter().collect();
        finding
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::test_support::{run, run_with_job};
    use crate::lexicon::EngineConfig;

    fn analyzer() -> KeywordAnalyzer {
        let config = EngineConfig::default();
        KeywordAnalyzer::new(&config.lexicons, &config.display).unwrap()
    }

    #[test]
    fn test_without_job_description() {
        let f = run(&analyzer(), "Rust and Python developer, 7+ years. Leadership. Master's in CS.");
        assert_eq!(f.resume_keywords, ["leadership", "python", "rust"]);
        assert_eq!(f.experience_years, Some(7));
        assert_eq!(f.education_levels, ["master's"]);
        assert!(f.job_keywords.is_empty() && f.matched_keywords.is_empty());
        assert_eq!(f.match_percentage, None);
        assert_eq!(f.keyword_score, 15.0);
    }

    #[test]
    fn test_job_description_match() {
        let f = run_with_job(
            &analyzer(),
            "Built services in Rust and Python on AWS",
            "We need Rust, Kubernetes and AWS experience",
        );
        assert_eq!(f.matched_keywords, ["aws", "rust"]);
        assert_eq!(f.missing_keywords, ["kubernetes"]);
        let pct = f.match_percentage.unwrap();
        assert!((pct - 200.0 / 3.0).abs() < 1e-9);
        assert!(f.recommendations[0].contains("kubernetes"));
    }

    #[test]
    fn test_job_description_without_known_terms() {
        let f = run_with_job(&analyzer(), "Rust", "Friendly office, great coffee");
        assert_eq!(f.match_percentage, None);
        assert!(f.job_keywords.is_empty());
    }
}
