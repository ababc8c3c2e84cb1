use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{AnalysisInput, ContentAnalyzer};
use crate::lexicon::{ConfigError, DisplayLimits, Lexicons};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrongBullet {
    pub text: String,
    pub verb: String,
    pub category: String,
    /// 0–100 impact estimate for the bullet.
    pub impact_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeakBullet {
    pub text: String,
    pub verb: String,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryUsage {
    pub category: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionVerbFinding {
    pub total_bullets: usize,
    pub strong_bullets: Vec<StrongBullet>,
    pub weak_bullets: Vec<WeakBullet>,
    pub no_verb_bullets: Vec<String>,
    pub strong_verb_percentage: f64,
    pub weak_verb_percentage: f64,
    pub categories_used: Vec<CategoryUsage>,
    pub verb_diversity_score: f64,
    pub action_verb_score: f64,
    pub recommendations: Vec<String>,
}

pub struct ActionVerbAnalyzer {
    /// verb -> category index
    strong: HashMap<String, usize>,
    categories: Vec<String>,
    /// Longest phrases first so "responsible for" wins over "responsible".
    weak: Vec<(Vec<String>, Vec<String>)>,
    limits: DisplayLimits,
}

impl ActionVerbAnalyzer {
    pub fn new(lexicons: &Lexicons, limits: &DisplayLimits) -> Result<Self, ConfigError> {
        let mut strong = HashMap::new();
        for (idx, group) in lexicons.strong_verbs.iter().enumerate() {
            for verb in &group.verbs {
                strong.entry(verb.to_lowercase()).or_insert(idx);
            }
        }
        let mut weak: Vec<(Vec<String>, Vec<String>)> = lexicons
            .weak_verbs
            .iter()
            .map(|w| {
                let words: Vec<String> = w.verb.split_whitespace().map(str::to_lowercase).collect();
                (words, w.suggestions.clone())
            })
            .filter(|(words, _)| !words.is_empty())
            .collect();
        if weak.is_empty() {
            return Err(ConfigError::EmptyLexicon("weak_verbs"));
        }
        weak.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        Ok(Self {
            strong,
            categories: lexicons
                .strong_verbs
                .iter()
                .map(|c| c.category.clone())
                .collect(),
            weak,
            limits: limits.clone(),
        })
    }

    fn weak_opener(&self, words: &[String]) -> Option<(String, &[String])> {
        self.weak.iter().find_map(|(phrase, suggestions)| {
            let matches = words.len() >= phrase.len() && words[..phrase.len()] == phrase[..];
            matches.then(|| (phrase.join(" "), suggestions.as_slice()))
        })
    }
}

/// Lowercased words with surrounding punctuation removed.
fn opening_words(bullet: &str) -> Vec<String> {
    bullet
        .split_whitespace()
        .take(3)
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
        .collect()
}

/// Stronger categories and quantified bullets score higher.
fn verb_impact(category: &str, bullet: &str) -> f64 {
    let base: f64 = match category {
        "leadership" | "achievement" => 80.0,
        "improvement" => 75.0,
        "development" => 70.0,
        _ => 65.0,
    };
    let quantified = bullet
        .chars()
        .any(|c| c.is_ascii_digit() || matches!(c, '%' | '$' | '€' | '£'));
    if quantified {
        (base + 20.0).min(100.0)
    } else {
        base
    }
}

impl ContentAnalyzer for ActionVerbAnalyzer {
    type Finding = ActionVerbFinding;

    fn analyze(&self, input: &AnalysisInput<'_>) -> ActionVerbFinding {
        let bullets = input.bullets();
        let total = bullets.len();
        if total == 0 {
            return ActionVerbFinding {
                recommendations: vec![
                    "Use bullet points that start with strong action verbs to describe your experience"
                        .to_string(),
                ],
                categories_used: self
                    .categories
                    .iter()
                    .map(|c| CategoryUsage {
                        category: c.clone(),
                        count: 0,
                    })
                    .collect(),
                ..Default::default()
            };
        }

        let mut counts = vec![0usize; self.categories.len()];
        let mut strong_bullets = Vec::new();
        let mut weak_bullets = Vec::new();
        let mut no_verb_bullets = Vec::new();

        for bullet in bullets {
            let words = opening_words(&bullet.text);
            if let Some(&idx) = words.first().and_then(|w| self.strong.get(w)) {
                counts[idx] += 1;
                let category = &self.categories[idx];
                strong_bullets.push(StrongBullet {
                    text: bullet.text.clone(),
                    verb: words[0].clone(),
                    category: category.clone(),
                    impact_score: verb_impact(category, &bullet.text),
                });
            } else if let Some((verb, suggestions)) = self.weak_opener(&words) {
                weak_bullets.push(WeakBullet {
                    text: bullet.text.clone(),
                    verb,
                    suggestions: suggestions.iter().take(3).cloned().collect(),
                });
            } else {
                no_verb_bullets.push(bullet.text.clone());
            }
        }

        let pct = |n: usize| n as f64 / total as f64 * 100.0;
        let strong_pct = pct(strong_bullets.len());
        let weak_pct = pct(weak_bullets.len());
        let used = counts.iter().filter(|c| **c > 0).count();
        let diversity = used as f64 / self.categories.len() as f64 * 100.0;
        let volume = (total as f64 / 8.0).min(1.0);
        let score = (0.8 * strong_pct + 0.15 * diversity + 5.0 * volume - 0.3 * weak_pct)
            .clamp(0.0, 100.0);

        let mut recommendations = Vec::new();
        if strong_pct < 70.0 {
            recommendations.push(format!(
                "Start more bullets with strong action verbs: {:.0}% do today, aim for 70%+",
                strong_pct
            ));
        }
        for weak in weak_bullets.iter().take(self.limits.max_examples) {
            recommendations.push(format!(
                "Replace '{}' with {}",
                weak.verb,
                weak.suggestions.join(", ")
            ));
        }
        if used < 3 {
            recommendations.push(
                "Vary your verbs across leadership, achievement and improvement to show range"
                    .to_string(),
            );
        }

        ActionVerbFinding {
            total_bullets: total,
            strong_verb_percentage: strong_pct,
            weak_verb_percentage: weak_pct,
            categories_used: self
                .categories
                .iter()
                .zip(counts)
                .map(|(category, count)| CategoryUsage {
                    category: category.clone(),
                    count,
                })
                .collect(),
            verb_diversity_score: diversity,
            action_verb_score: score,
            strong_bullets,
            weak_bullets,
            no_verb_bullets,
            recommendations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::test_support::run;
    use crate::lexicon::EngineConfig;

    fn analyzer() -> ActionVerbAnalyzer {
        let config = EngineConfig::default();
        ActionVerbAnalyzer::new(&config.lexicons, &config.display).unwrap()
    }

    #[test]
    fn test_no_bullets_scores_zero() {
        let f = run(&analyzer(), "Plain paragraph without any bullets.");
        assert_eq!(f.total_bullets, 0);
        assert_eq!(f.action_verb_score, 0.0);
        assert_eq!(f.recommendations.len(), 1);
    }

    #[test]
    fn test_classifies_strong_weak_and_none() {
        let f = run(
            &analyzer(),
            "- Led a team of 6\n- Responsible for deployments\n- Kubernetes upgrades",
        );
        assert_eq!(f.total_bullets, 3);
        assert_eq!(f.strong_bullets[0].verb, "led");
        assert_eq!(f.strong_bullets[0].category, "leadership");
        assert_eq!(f.strong_bullets[0].impact_score, 100.0);
        assert_eq!(f.weak_bullets[0].verb, "responsible for");
        assert_eq!(f.no_verb_bullets, ["Kubernetes upgrades"]);
    }

    #[test]
    fn test_score_formula() {
        // 2 bullets, both strong, two categories of five:
        // 0.8*100 + 0.15*40 + 5*(2/8) - 0 = 87.25
        let f = run(&analyzer(), "- Built the API\n- Led the rollout");
        assert!((f.action_verb_score - 87.25).abs() < 1e-9, "got {}", f.action_verb_score);
        assert_eq!(f.verb_diversity_score, 40.0);
    }

    #[test]
    fn test_all_weak_bullets_floor_at_zero() {
        let f = run(&analyzer(), "- Helped with stuff\n- Worked on things");
        assert_eq!(f.weak_verb_percentage, 100.0);
        assert_eq!(f.action_verb_score, 0.0);
    }
}
