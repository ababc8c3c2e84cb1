use serde::{Deserialize, Serialize};

use super::{AnalysisInput, ContentAnalyzer};
use crate::lexicon::{ConfigError, DisplayLimits, Lexicons, PhraseMatcher};

/// An unquantified bullet and how to fix it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VagueBullet {
    pub text: String,
    pub reason: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuantificationFinding {
    pub total_bullets: usize,
    pub quantified_bullets: usize,
    pub quantified_percentage: f64,
    pub meets_threshold: bool,
    pub quantified_examples: Vec<String>,
    pub vague_bullets: Vec<VagueBullet>,
    pub recommendations: Vec<String>,
}

pub struct QuantificationAnalyzer {
    task_indicators: PhraseMatcher,
    scale_words: PhraseMatcher,
    threshold: f64,
    limits: DisplayLimits,
}

/// A bullet counts as quantified when it carries any number, percent or currency sign.
/// Multipliers ("3x") contain a digit and are covered by the first check.
pub fn is_quantified(text: &str) -> bool {
    text.chars()
        .any(|c| c.is_ascii_digit() || matches!(c, '%' | '$' | '€' | '£' | '¥'))
}

impl QuantificationAnalyzer {
    pub fn new(
        lexicons: &Lexicons,
        threshold: f64,
        limits: &DisplayLimits,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            task_indicators: PhraseMatcher::new(&lexicons.task_indicators, "task_indicators")?,
            scale_words: PhraseMatcher::new(&lexicons.vague_scale_words, "vague_scale_words")?,
            threshold,
            limits: limits.clone(),
        })
    }

    fn diagnose(&self, text: &str) -> VagueBullet {
        if let Some(task) = self.task_indicators.found_in(text).into_iter().next() {
            return VagueBullet {
                text: text.to_string(),
                reason: format!("Describes a duty ('{task}') rather than a result"),
                suggestion: "Lead with the outcome: what changed, by how much, and for whom"
                    .to_string(),
            };
        }
        if let Some(word) = self.scale_words.found_in(text).into_iter().next() {
            return VagueBullet {
                text: text.to_string(),
                reason: format!("Uses vague scale word '{word}' without a number"),
                suggestion: format!(
                    "Replace '{word}' with a specific number: e.g. '5x', '40%', '3 weeks'"
                ),
            };
        }
        VagueBullet {
            text: text.to_string(),
            reason: "No quantified outcome found".to_string(),
            suggestion: "Add a metric: a number, percentage, amount or time saved".to_string(),
        }
    }
}

impl ContentAnalyzer for QuantificationAnalyzer {
    type Finding = QuantificationFinding;

    fn analyze(&self, input: &AnalysisInput<'_>) -> QuantificationFinding {
        let bullets = input.bullets();
        let total = bullets.len();
        let (quantified, vague): (Vec<_>, Vec<_>) =
            bullets.iter().partition(|b| is_quantified(&b.text));

        let pct = if total == 0 {
            0.0
        } else {
            quantified.len() as f64 / total as f64 * 100.0
        };
        let meets_threshold = pct >= self.threshold;

        let mut recommendations = Vec::new();
        if total == 0 {
            recommendations.push(
                "Describe your experience in bullet points so achievements can be measured"
                    .to_string(),
            );
        } else if !meets_threshold {
            recommendations.push(format!(
                "Add measurable results to more bullets (currently {:.0}%, target {:.0}%+)",
                pct, self.threshold
            ));
            recommendations.push(
                "Use numbers, percentages, amounts or time frames to show scale".to_string(),
            );
        } else if pct < 50.0 {
            recommendations.push(format!(
                "Good start: {:.0}% of bullets are quantified. Push toward 50%",
                pct
            ));
        }

        QuantificationFinding {
            total_bullets: total,
            quantified_bullets: quantified.len(),
            quantified_percentage: pct,
            meets_threshold,
            quantified_examples: quantified
                .iter()
                .take(self.limits.max_examples)
                .map(|b| b.text.clone())
                .collect(),
            vague_bullets: vague
                .iter()
                .take(self.limits.max_examples)
                .map(|b| self.diagnose(&b.text))
                .collect(),
            recommendations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::test_support::run;
    use crate::lexicon::EngineConfig;

    fn analyzer() -> QuantificationAnalyzer {
        let config = EngineConfig::default();
        QuantificationAnalyzer::new(&config.lexicons, 30.0, &config.display).unwrap()
    }

    #[test]
    fn test_quantified_markers() {
        assert!(is_quantified("Reduced latency by 40%"));
        assert!(is_quantified("Saved $50,000 annually"));
        assert!(is_quantified("Generated €200k in revenue"));
        assert!(is_quantified("Made builds 3x faster"));
        assert!(!is_quantified("Improved the user experience"));
    }

    #[test]
    fn test_no_digits_means_zero_percent() {
        let f = run(&analyzer(), "- Built the API\n- Led the rollout");
        assert_eq!(f.quantified_bullets, 0);
        assert_eq!(f.quantified_percentage, 0.0);
        assert!(!f.meets_threshold);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        // 3 of 10 quantified is exactly 30%
        let text = "- Cut costs 10%\n- Hired 4 engineers\n- Served 2 regions\n\
                    - Built A\n- Built B\n- Built C\n- Built D\n- Built E\n- Built F\n- Built G";
        let f = run(&analyzer(), text);
        assert_eq!(f.total_bullets, 10);
        assert!((f.quantified_percentage - 30.0).abs() < 1e-9);
        assert!(f.meets_threshold);
    }

    #[test]
    fn test_vague_bullet_reasons() {
        let f = run(
            &analyzer(),
            "- Responsible for deployments\n- Achieved significant gains\n- Wrote docs",
        );
        assert!(f.vague_bullets[0].reason.contains("duty"));
        assert!(f.vague_bullets[1].reason.contains("vague scale word"));
        assert_eq!(f.vague_bullets[2].reason, "No quantified outcome found");
    }
}
