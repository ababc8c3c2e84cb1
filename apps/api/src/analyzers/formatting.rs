use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::dates::{DateConsistencyAnalyzer, DateConsistencyFinding};
use super::{AnalysisInput, ContentAnalyzer};
use crate::text::BulletMarker;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormattingFinding {
    pub bullet_styles: Vec<String>,
    pub bullet_consistency: bool,
    /// At most one date format family. A resume without dates passes.
    pub date_consistency: bool,
    pub formatting_score: f64,
    pub recommendations: Vec<String>,
}

pub struct FormattingAnalyzer {
    dates: DateConsistencyAnalyzer,
}

impl FormattingAnalyzer {
    pub fn new(dates: DateConsistencyAnalyzer) -> Self {
        Self { dates }
    }

    /// Grades formatting against an already computed date-consistency result.
    pub fn check(
        &self,
        input: &AnalysisInput<'_>,
        dates: &DateConsistencyFinding,
    ) -> FormattingFinding {
        let styles: BTreeSet<String> = input
            .bullets()
            .iter()
            .filter_map(|b| match b.marker? {
                BulletMarker::Glyph(c) => Some(c.to_string()),
                BulletMarker::Numbered => Some("1.".to_string()),
            })
            .collect();

        let bullet_consistency = styles.len() <= 1;
        let date_consistency = dates.formats_found.len() <= 1;
        let failures = [bullet_consistency, date_consistency]
            .iter()
            .filter(|ok| !**ok)
            .count();

        let mut recommendations = Vec::new();
        if !bullet_consistency {
            let list: Vec<&str> = styles.iter().map(String::as_str).collect();
            recommendations.push(format!(
                "Use a single bullet style throughout (found: {})",
                list.join(" ")
            ));
        }
        if !date_consistency {
            recommendations.push("Format every date the same way".to_string());
        }

        FormattingFinding {
            bullet_styles: styles.into_iter().collect(),
            bullet_consistency,
            date_consistency,
            formatting_score: 100.0 - 25.0 * failures as f64,
            recommendations,
        }
    }
}

impl ContentAnalyzer for FormattingAnalyzer {
    type Finding = FormattingFinding;

    fn analyze(&self, input: &AnalysisInput<'_>) -> FormattingFinding {
        let dates = self.dates.analyze(input);
        self.check(input, &dates)
    }
}
