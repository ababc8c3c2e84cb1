use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{AnalysisInput, ContentAnalyzer};
use crate::lexicon::{
    compile_pattern, BuzzwordPenalties, BuzzwordSeverity, ConfigError, Lexicons, PhraseMatcher,
};

const DEFAULT_SUGGESTION: &str = "Replace with specific achievements and metrics";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuzzwordHit {
    pub word: String,
    pub count: usize,
    pub severity: BuzzwordSeverity,
    pub penalty: f64,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuzzwordDensity {
    #[default]
    Excellent,
    Good,
    Moderate,
    High,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuzzwordFinding {
    /// Hits in order of first appearance.
    pub buzzwords_found: Vec<BuzzwordHit>,
    pub total_buzzwords: usize,
    pub total_penalty: f64,
    pub buzzword_score: f64,
    pub density: BuzzwordDensity,
    pub recommendations: Vec<String>,
}

struct PhraseEntry {
    matcher: PhraseMatcher,
    severity: BuzzwordSeverity,
    suggestions: Vec<String>,
}

pub struct BuzzwordAnalyzer {
    /// Longest phrase first, so "highly motivated" claims its span before "motivated".
    phrases: Vec<PhraseEntry>,
    patterns: Vec<Regex>,
    penalties: BuzzwordPenalties,
}

impl BuzzwordAnalyzer {
    pub fn new(lexicons: &Lexicons, penalties: &BuzzwordPenalties) -> Result<Self, ConfigError> {
        let mut sorted: Vec<_> = lexicons.buzzwords.iter().collect();
        sorted.sort_by_key(|b| std::cmp::Reverse(b.phrase.chars().count()));
        let phrases = sorted
            .into_iter()
            .map(|b| {
                Ok(PhraseEntry {
                    matcher: PhraseMatcher::new(std::slice::from_ref(&b.phrase), "buzzwords")?,
                    severity: b.severity,
                    suggestions: b.suggestions.clone(),
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;
        let patterns = lexicons
            .buzzword_patterns
            .iter()
            .map(|p| compile_pattern(p, "buzzword_patterns"))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            phrases,
            patterns,
            penalties: penalties.clone(),
        })
    }
}

impl ContentAnalyzer for BuzzwordAnalyzer {
    type Finding = BuzzwordFinding;

    fn analyze(&self, input: &AnalysisInput<'_>) -> BuzzwordFinding {
        let text = input.text.raw();
        let mut claimed: Vec<(usize, usize)> = Vec::new();
        // (first offset, hit)
        let mut hits: Vec<(usize, BuzzwordHit)> = Vec::new();
        let free = |claimed: &[(usize, usize)], s: usize, e: usize| {
            !claimed.iter().any(|&(cs, ce)| s < ce && cs < e)
        };

        for entry in &self.phrases {
            let mut count = 0;
            let mut first = None;
            let mut word = String::new();
            for (phrase, s, e) in entry.matcher.occurrences(text) {
                if free(&claimed, s, e) {
                    claimed.push((s, e));
                    count += 1;
                    first.get_or_insert(s);
                    word = phrase.to_string();
                }
            }
            if let Some(first) = first {
                let suggestions = if entry.suggestions.is_empty() {
                    vec![DEFAULT_SUGGESTION.to_string()]
                } else {
                    entry.suggestions.clone()
                };
                hits.push((
                    first,
                    BuzzwordHit {
                        word,
                        count,
                        severity: entry.severity,
                        penalty: self.penalties.for_severity(entry.severity) * count as f64,
                        suggestions,
                    },
                ));
            }
        }

        for pattern in &self.patterns {
            for m in pattern.find_iter(text) {
                if !free(&claimed, m.start(), m.end()) {
                    continue;
                }
                claimed.push((m.start(), m.end()));
                hits.push((
                    m.start(),
                    BuzzwordHit {
                        word: m.as_str().to_lowercase(),
                        count: 1,
                        severity: BuzzwordSeverity::Pattern,
                        penalty: self.penalties.pattern,
                        suggestions: vec![DEFAULT_SUGGESTION.to_string()],
                    },
                ));
            }
        }

        hits.sort_by_key(|(offset, _)| *offset);
        let buzzwords_found: Vec<BuzzwordHit> = hits.into_iter().map(|(_, h)| h).collect();
        let total: usize = buzzwords_found.iter().map(|h| h.count).sum();
        let penalty: f64 = buzzwords_found.iter().map(|h| h.penalty).sum();

        let density = match total {
            0 => BuzzwordDensity::Excellent,
            1..=2 => BuzzwordDensity::Good,
            3..=5 => BuzzwordDensity::Moderate,
            _ => BuzzwordDensity::High,
        };

        let mut recommendations = Vec::new();
        let critical: Vec<&str> = buzzwords_found
            .iter()
            .filter(|h| h.severity == BuzzwordSeverity::Critical)
            .map(|h| h.word.as_str())
            .collect();
        if !critical.is_empty() {
            recommendations.push(format!(
                "Remove self-labels like {}; show the skill through results instead",
                critical.join(", ")
            ));
        }
        let high: Vec<&str> = buzzwords_found
            .iter()
            .filter(|h| h.severity == BuzzwordSeverity::High)
            .map(|h| h.word.as_str())
            .collect();
        if !high.is_empty() {
            recommendations.push(format!(
                "Replace overused traits ({}) with achievements that demonstrate them",
                high.join(", ")
            ));
        }
        if total > 5 {
            recommendations.push(format!(
                "Cut buzzwords: {total} found. Aim for no more than 2"
            ));
        }

        BuzzwordFinding {
            buzzwords_found,
            total_buzzwords: total,
            total_penalty: penalty,
            buzzword_score: (100.0 - penalty).max(0.0),
            density,
            recommendations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::test_support::run;
    use crate::lexicon::EngineConfig;

    fn analyzer() -> BuzzwordAnalyzer {
        let config = EngineConfig::default();
        BuzzwordAnalyzer::new(&config.lexicons, &config.scoring.buzzword_penalties).unwrap()
    }

    #[test]
    fn test_clean_text_scores_full() {
        let f = run(&analyzer(), "Cut p99 latency from 900ms to 120ms.");
        assert_eq!(f.total_buzzwords, 0);
        assert_eq!(f.buzzword_score, 100.0);
        assert_eq!(f.density, BuzzwordDensity::Excellent);
    }

    #[test]
    fn test_severity_penalties() {
        // ninja (15) + team player (10) + passionate (6) + synergy (3)
        let f = run(&analyzer(), "Ninja and team player, passionate about synergy.");
        assert_eq!(f.total_buzzwords, 4);
        assert_eq!(f.total_penalty, 34.0);
        assert_eq!(f.buzzword_score, 66.0);
        let words: Vec<&str> = f.buzzwords_found.iter().map(|h| h.word.as_str()).collect();
        assert_eq!(words, ["ninja", "team player", "passionate", "synergy"]);
    }

    #[test]
    fn test_longer_phrase_claims_span() {
        let f = run(&analyzer(), "Highly motivated engineer.");
        assert_eq!(f.total_buzzwords, 1);
        assert_eq!(f.buzzwords_found[0].word, "highly motivated");
    }

    #[test]
    fn test_pattern_hit_costs_eight() {
        let f = run(&analyzer(), "Proven track record in sales.");
        assert_eq!(f.buzzwords_found.len(), 1);
        assert_eq!(f.buzzwords_found[0].severity, BuzzwordSeverity::Pattern);
        assert_eq!(f.buzzword_score, 92.0);
    }

    #[test]
    fn test_word_boundaries() {
        // "masterpiece" and "dynamics" must not trip "master" or "dynamic"
        let f = run(&analyzer(), "Shipped a masterpiece of fluid dynamics.");
        assert_eq!(f.total_buzzwords, 0);
    }

    #[test]
    fn test_score_floors_at_zero() {
        let text = "guru ninja rockstar wizard visionary disruptor revolutionary";
        let f = run(&analyzer(), text);
        assert_eq!(f.buzzword_score, 0.0);
        assert_eq!(f.density, BuzzwordDensity::High);
    }
}
