use serde::{Deserialize, Serialize};

use super::{AnalysisInput, ContentAnalyzer};
use crate::lexicon::{ConfigError, Lexicons, PhraseMatcher};

const BASE_SCORE: f64 = 50.0;
const CONFIDENCE_POINTS: f64 = 5.0;
const EMOTIONAL_PENALTY: f64 = 10.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToneFinding {
    pub emotional_language: Vec<String>,
    pub confidence_indicators: Vec<String>,
    /// Informational; never part of a category score.
    pub tone_score: f64,
    pub recommendations: Vec<String>,
}

pub struct ToneAnalyzer {
    emotional: PhraseMatcher,
    confidence: PhraseMatcher,
}

impl ToneAnalyzer {
    pub fn new(lexicons: &Lexicons) -> Result<Self, ConfigError> {
        Ok(Self {
            emotional: PhraseMatcher::new(&lexicons.emotional_words, "emotional_words")?,
            confidence: PhraseMatcher::new(&lexicons.confidence_words, "confidence_words")?,
        })
    }
}

fn tone_score(emotional: usize, confidence: usize) -> f64 {
    (BASE_SCORE + CONFIDENCE_POINTS * confidence as f64 - EMOTIONAL_PENALTY * emotional as f64)
        .clamp(0.0, 100.0)
}

impl ContentAnalyzer for ToneAnalyzer {
    type Finding = ToneFinding;

    fn analyze(&self, input: &AnalysisInput<'_>) -> ToneFinding {
        let raw = input.text.raw();
        let emotional_language = self.emotional.found_in(raw);
        let confidence_indicators = self.confidence.found_in(raw);

        let mut recommendations = Vec::new();
        if !emotional_language.is_empty() {
            recommendations.push(format!(
                "Swap emotional language ({}) for measured, factual wording",
                emotional_language.join(", ")
            ));
        }
        if confidence_indicators.is_empty() {
            recommendations.push(
                "Show confidence with outcome words such as achieved, delivered or exceeded"
                    .to_string(),
            );
        }

        ToneFinding {
            tone_score: tone_score(emotional_language.len(), confidence_indicators.len()),
            emotional_language,
            confidence_indicators,
            recommendations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::test_support::run;
    use crate::lexicon::EngineConfig;

    fn analyzer() -> ToneAnalyzer {
        ToneAnalyzer::new(&EngineConfig::default().lexicons).unwrap()
    }

    #[test]
    fn test_confidence_words_raise_the_score() {
        let f = run(
            &analyzer(),
            "- Delivered the migration early\n- Exceeded the quarterly target by 20%",
        );
        assert_eq!(f.confidence_indicators, ["delivered", "exceeded"]);
        assert!(f.emotional_language.is_empty());
        assert_eq!(f.tone_score, 60.0);
        assert!(f.recommendations.is_empty());
    }

    #[test]
    fn test_emotional_words_lower_the_score() {
        let f = run(&analyzer(), "I love building amazing products with fantastic people");
        assert_eq!(f.emotional_language, ["amazing", "fantastic", "love"]);
        assert_eq!(f.tone_score, 20.0);
        assert_eq!(f.recommendations.len(), 2);
        assert!(f.recommendations[0].contains("amazing, fantastic, love"));
    }

    #[test]
    fn test_whole_words_only() {
        let f = run(&analyzer(), "Designed gloves for lovebirds");
        assert!(f.emotional_language.is_empty());
        assert_eq!(f.tone_score, 50.0);
    }

    #[test]
    fn test_score_is_clamped() {
        assert_eq!(tone_score(9, 0), 0.0);
        assert_eq!(tone_score(0, 20), 100.0);
        assert_eq!(tone_score(1, 3), 55.0);
    }
}
