use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{AnalysisInput, ContentAnalyzer};
use crate::lexicon::{ConfigError, Lexicons, PhraseMatcher};

static PASSIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:was|were|been|being|is|are)\s+\w+ed\b").expect("static regex")
});

static PRONOUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:i|me|my|mine|myself|we|our|us)\b").expect("static regex")
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WritingFinding {
    pub informal_words: Vec<String>,
    pub vague_phrases: Vec<String>,
    pub passive_voice_count: usize,
    pub personal_pronoun_count: usize,
    pub professionalism_score: f64,
    /// Feeds the language-quality category.
    pub issue_count: usize,
    pub recommendations: Vec<String>,
}

pub struct WritingQualityAnalyzer {
    informal: PhraseMatcher,
    vague: PhraseMatcher,
}

impl WritingQualityAnalyzer {
    pub fn new(lexicons: &Lexicons) -> Result<Self, ConfigError> {
        Ok(Self {
            informal: PhraseMatcher::new(&lexicons.informal_words, "informal_words")?,
            vague: PhraseMatcher::new(&lexicons.vague_phrases, "vague_phrases")?,
        })
    }
}

impl ContentAnalyzer for WritingQualityAnalyzer {
    type Finding = WritingFinding;

    fn analyze(&self, input: &AnalysisInput<'_>) -> WritingFinding {
        let raw = input.text.raw();
        let informal_words = self.informal.found_in(raw);
        let vague_phrases = self.vague.found_in(raw);
        let passive = PASSIVE.find_iter(raw).count();
        let pronouns = PRONOUN.find_iter(raw).count();

        let deduction = 5.0 * informal_words.len() as f64
            + 3.0 * vague_phrases.len() as f64
            + (2.0 * passive as f64).min(20.0)
            + (pronouns as f64).min(15.0);

        let mut recommendations = Vec::new();
        if !informal_words.is_empty() {
            recommendations.push(format!(
                "Replace informal words with professional language: {}",
                informal_words.join(", ")
            ));
        }
        if !vague_phrases.is_empty() {
            recommendations.push(format!(
                "Replace vague phrases ({}) with direct action verbs",
                vague_phrases.join(", ")
            ));
        }
        if passive > 3 {
            recommendations.push(format!(
                "Rewrite {passive} passive-voice phrases in the active voice"
            ));
        }
        if pronouns > 0 {
            recommendations.push(
                "Drop personal pronouns (I, my, we); resumes read in implied first person"
                    .to_string(),
            );
        }

        WritingFinding {
            issue_count: informal_words.len() + vague_phrases.len() + passive + pronouns,
            informal_words,
            vague_phrases,
            passive_voice_count: passive,
            personal_pronoun_count: pronouns,
            professionalism_score: (100.0 - deduction).max(0.0),
            recommendations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::test_support::run;
    use crate::lexicon::EngineConfig;

    fn analyzer() -> WritingQualityAnalyzer {
        WritingQualityAnalyzer::new(&EngineConfig::default().lexicons).unwrap()
    }

    #[test]
    fn test_clean_text_scores_full() {
        let f = run(&analyzer(), "Led migration of billing to Rust.\nCut latency 40%.");
        assert_eq!(f.professionalism_score, 100.0);
        assert_eq!(f.issue_count, 0);
        assert!(f.recommendations.is_empty());
    }

    #[test]
    fn test_deductions_add_up() {
        // informal: awesome, stuff (-10); vague: worked on (-3); pronouns: I, my (-2)
        let f = run(&analyzer(), "I worked on awesome stuff with my team.");
        assert_eq!(f.informal_words, ["awesome", "stuff"]);
        assert_eq!(f.vague_phrases, ["worked on"]);
        assert_eq!(f.personal_pronoun_count, 2);
        assert_eq!(f.professionalism_score, 85.0);
        assert_eq!(f.issue_count, 5);
    }

    #[test]
    fn test_passive_penalty_is_capped() {
        let text = "was created. was tested. was shipped. was reviewed. was merged. \
                    was deployed. was monitored. was patched. was rolled. was planned. was staffed.";
        let f = run(&analyzer(), text);
        assert_eq!(f.passive_voice_count, 11);
        assert_eq!(f.professionalism_score, 80.0, "passive deduction caps at 20");
    }
}
