use serde::{Deserialize, Serialize};

use super::quantification::is_quantified;
use super::{AnalysisInput, ContentAnalyzer};
use crate::lexicon::{ConfigError, Lexicons, PhraseMatcher, WordBand};
use crate::sections::has_contact_details;

const SUMMARY_SECTION: &str = "summary";
const MAX_BODY_LINES: usize = 6;
const MAX_HEADER_WORDS: usize = 5;
/// Word band for a summary block inferred from the top of the resume.
const INFERRED_WORDS: std::ops::RangeInclusive<usize> = 15..=80;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryLocation {
    #[default]
    Missing,
    Header,
    Inferred,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryFinding {
    pub has_summary: bool,
    pub located_by: SummaryLocation,
    pub summary_text: String,
    pub word_count: usize,
    pub generic_phrases: Vec<String>,
    pub has_specific_skills: bool,
    pub has_metrics: bool,
    pub issues: Vec<String>,
    pub summary_score: f64,
    pub recommendations: Vec<String>,
}

pub struct SummaryAnalyzer {
    generic: PhraseMatcher,
    specific: PhraseMatcher,
    words: WordBand,
}

impl SummaryAnalyzer {
    pub fn new(lexicons: &Lexicons, words: &WordBand) -> Result<Self, ConfigError> {
        let mut specific: Vec<&str> = lexicons.all_technical_skills();
        specific.extend(lexicons.summary_focus_terms.iter().map(String::as_str));
        Ok(Self {
            generic: PhraseMatcher::new(&lexicons.generic_summary_phrases, "generic_summary_phrases")?,
            specific: PhraseMatcher::new(&specific, "summary_focus_terms")?,
            words: words.clone(),
        })
    }
}

fn locate(input: &AnalysisInput<'_>) -> Option<(SummaryLocation, String)> {
    let lines = input.text.lines();
    let sections = input.sections;

    let header = sections.headers.iter().enumerate().find(|(_, h)| {
        h.section == SUMMARY_SECTION
            && lines[h.line].split(':').next().map_or(0, |s| s.split_whitespace().count())
                <= MAX_HEADER_WORDS
    });
    if let Some((idx, header)) = header {
        let end = sections
            .body_end(idx, lines.len())
            .min(header.line + 1 + MAX_BODY_LINES);
        let mut parts: Vec<&str> = Vec::new();
        if !header.inline.is_empty() {
            parts.push(&header.inline);
        }
        parts.extend(lines[(header.line + 1).min(end)..end].iter().map(String::as_str));
        let text = parts.join(" ");
        return (!text.trim().is_empty()).then_some((SummaryLocation::Header, text));
    }

    // No header: a prose block between the name line and the first section.
    let first_header = sections.headers.first().map_or(lines.len(), |h| h.line);
    let block: Vec<&str> = lines
        .iter()
        .take(first_header)
        .skip(1)
        .map(String::as_str)
        .filter(|l| !has_contact_details(l) && !l.starts_with(['-', '•', '*']))
        .take(3)
        .collect();
    let text = block.join(" ");
    INFERRED_WORDS
        .contains(&text.split_whitespace().count())
        .then_some((SummaryLocation::Inferred, text))
}

impl ContentAnalyzer for SummaryAnalyzer {
    type Finding = SummaryFinding;

    fn analyze(&self, input: &AnalysisInput<'_>) -> SummaryFinding {
        let Some((located_by, text)) = locate(input) else {
            return SummaryFinding {
                issues: vec!["No professional summary found".to_string()],
                recommendations: vec![
                    "Add a 2-3 sentence professional summary naming your focus area, key skills and a headline achievement"
                        .to_string(),
                ],
                ..Default::default()
            };
        };

        let word_count = text.split_whitespace().count();
        let generic_phrases = self.generic.found_in(&text);
        let has_specific_skills = self.specific.matches(&text);
        let has_metrics = is_quantified(&text);

        let mut score: f64 = 100.0;
        let mut issues = Vec::new();
        let mut recommendations = Vec::new();
        if word_count < self.words.min {
            score -= 20.0;
            issues.push(format!("Summary is short ({word_count} words)"));
            recommendations.push(format!(
                "Expand your summary to {}-{} words",
                self.words.min, self.words.max
            ));
        } else if word_count > self.words.max {
            score -= 15.0;
            issues.push(format!("Summary is long ({word_count} words)"));
            recommendations.push(format!(
                "Tighten your summary to {}-{} words",
                self.words.min, self.words.max
            ));
        }
        if !generic_phrases.is_empty() {
            score -= 10.0 * generic_phrases.len() as f64;
            issues.push(format!("Generic phrases: {}", generic_phrases.join(", ")));
            recommendations.push(
                "Replace generic phrases with your specialty and a concrete accomplishment"
                    .to_string(),
            );
        }
        if !has_specific_skills {
            score -= 15.0;
            issues.push("No specific skills or domain named".to_string());
            recommendations.push("Name your core skills or domain in the summary".to_string());
        }
        if !has_metrics {
            score -= 10.0;
            issues.push("No quantified achievement".to_string());
            recommendations
                .push("Add one headline metric, e.g. years of experience or impact".to_string());
        }

        SummaryFinding {
            has_summary: true,
            located_by,
            summary_text: text,
            word_count,
            generic_phrases,
            has_specific_skills,
            has_metrics,
            issues,
            summary_score: score.max(0.0),
            recommendations,
        }
    }
}
