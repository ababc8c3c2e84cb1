use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{AnalysisInput, ContentAnalyzer};
use crate::lexicon::{compile_pattern, ConfigError, DisplayLimits, Lexicons, MetricType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricExamples {
    pub metric: MetricType,
    /// Bullets showing this metric type.
    pub count: usize,
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpactFinding {
    /// One entry per metric type, in taxonomy order.
    pub metrics: Vec<MetricExamples>,
    pub diversity_score: usize,
    pub impact_score: f64,
    pub strongest_metric: Option<MetricType>,
    pub recommendations: Vec<String>,
}

pub struct ImpactAnalyzer {
    patterns: Vec<(MetricType, Regex)>,
    limits: DisplayLimits,
}

impl ImpactAnalyzer {
    pub fn new(lexicons: &Lexicons, limits: &DisplayLimits) -> Result<Self, ConfigError> {
        let patterns = lexicons
            .impact_patterns
            .iter()
            .map(|p| Ok((p.metric, compile_pattern(&p.pattern, "impact_patterns")?)))
            .collect::<Result<Vec<_>, ConfigError>>()?;
        Ok(Self {
            patterns,
            limits: limits.clone(),
        })
    }
}

impl ContentAnalyzer for ImpactAnalyzer {
    type Finding = ImpactFinding;

    fn analyze(&self, input: &AnalysisInput<'_>) -> ImpactFinding {
        let mut metrics: Vec<MetricExamples> = MetricType::ALL
            .iter()
            .map(|&metric| MetricExamples {
                metric,
                count: 0,
                examples: Vec::new(),
            })
            .collect();

        for bullet in input.bullets() {
            for entry in metrics.iter_mut() {
                let hit = self
                    .patterns
                    .iter()
                    .filter(|(metric, _)| *metric == entry.metric)
                    .find_map(|(_, re)| re.find(&bullet.text));
                if let Some(hit) = hit {
                    entry.count += 1;
                    if entry.examples.len() < self.limits.max_examples {
                        entry.examples.push(hit.as_str().trim().to_string());
                    }
                }
            }
        }

        let diversity = metrics.iter().filter(|m| m.count > 0).count();
        // Ties resolve to the earlier taxonomy entry.
        let strongest = metrics
            .iter()
            .filter(|m| m.count > 0)
            .fold(None::<&MetricExamples>, |best, m| match best {
                Some(b) if b.count >= m.count => Some(b),
                _ => Some(m),
            })
            .map(|m| m.metric);

        let mut recommendations = Vec::new();
        if diversity == 0 {
            recommendations.push(
                "Add measurable outcomes: percentages, amounts, team sizes or time saved"
                    .to_string(),
            );
        } else if diversity < 3 {
            let missing: Vec<&str> = metrics
                .iter()
                .filter(|m| m.count == 0)
                .take(3)
                .map(|m| m.metric.label())
                .collect();
            recommendations.push(format!(
                "Broaden the kinds of impact you show; consider {}",
                missing.join(", ")
            ));
        }

        ImpactFinding {
            metrics,
            diversity_score: diversity,
            impact_score: (20.0 * diversity as f64).min(100.0),
            strongest_metric: strongest,
            recommendations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::test_support::run;
    use crate::lexicon::EngineConfig;

    fn analyzer() -> ImpactAnalyzer {
        let config = EngineConfig::default();
        ImpactAnalyzer::new(&config.lexicons, &config.display).unwrap()
    }

    fn count(f: &ImpactFinding, metric: MetricType) -> usize {
        f.metrics.iter().find(|m| m.metric == metric).map_or(0, |m| m.count)
    }

    #[test]
    fn test_detects_each_metric_type() {
        let f = run(
            &analyzer(),
            "- Grew revenue 25%\n- Saved $40,000 a year\n- Led 8 engineers\n\
             - Reduced onboarding by 3 weeks\n- Served 200 customers\n- Processed 1.5M events",
        );
        for metric in MetricType::ALL {
            assert!(count(&f, metric) >= 1, "{metric:?} not detected");
        }
        assert_eq!(f.diversity_score, 6);
        assert_eq!(f.impact_score, 100.0);
    }

    #[test]
    fn test_no_metrics_scores_zero() {
        let f = run(&analyzer(), "- Built the API\n- Wrote documentation");
        assert_eq!(f.diversity_score, 0);
        assert_eq!(f.impact_score, 0.0);
        assert_eq!(f.strongest_metric, None);
        assert_eq!(f.metrics.len(), 6, "every type is always reported");
    }

    #[test]
    fn test_strongest_prefers_earlier_type_on_ties() {
        let f = run(&analyzer(), "- Cut churn 5%\n- Signed 12 clients");
        assert_eq!(f.diversity_score, 2);
        assert_eq!(f.impact_score, 40.0);
        assert_eq!(f.strongest_metric, Some(MetricType::Percentage));
    }
}
