use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::dates::{contains_date, extract_ranges, DateRange};
use super::{AnalysisInput, ContentAnalyzer};
use crate::lexicon::{ConfigError, DisplayLimits, Lexicons, PhraseMatcher};

/// Gaps longer than this are reported. They never cost points.
const GAP_MONTHS: i32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChronologyIssueKind {
    OutOfOrder,
    Overlap,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChronologyIssue {
    pub kind: ChronologyIssueKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentGap {
    pub after: String,
    pub before: String,
    pub months: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChronologyFinding {
    pub has_dates: bool,
    pub total_date_ranges: usize,
    pub ranges: Vec<DateRange>,
    /// The first `max_chronology_issues` issues found.
    pub issues: Vec<ChronologyIssue>,
    pub out_of_order_count: usize,
    pub overlap_count: usize,
    pub total_issues: usize,
    pub gaps: Vec<EmploymentGap>,
    /// Role lines with no date on or right after them.
    pub entries_missing_dates: Vec<String>,
    pub chronology_score: f64,
    pub recommendations: Vec<String>,
}

pub struct ChronologyAnalyzer {
    concurrent: PhraseMatcher,
    job_titles: PhraseMatcher,
    limits: DisplayLimits,
}

impl ChronologyAnalyzer {
    pub fn new(lexicons: &Lexicons, limits: &DisplayLimits) -> Result<Self, ConfigError> {
        Ok(Self {
            concurrent: PhraseMatcher::new(&lexicons.concurrent_markers, "concurrent_markers")?,
            job_titles: PhraseMatcher::new(&lexicons.job_title_indicators, "job_title_indicators")?,
            limits: limits.clone(),
        })
    }

    fn undated_roles(&self, lines: &[String]) -> Vec<String> {
        lines
            .iter()
            .enumerate()
            .filter(|(i, line)| {
                let short = line.split_whitespace().count() <= 8;
                let is_bullet = line
                    .chars()
                    .next()
                    .is_some_and(|c| matches!(c, '•' | '·' | '▪' | '-' | '*' | '–' | '➤' | '►'));
                let dated = contains_date(line)
                    || lines.get(i + 1).is_some_and(|next| contains_date(next));
                short && !is_bullet && !dated && self.job_titles.matches(line)
            })
            .map(|(_, line)| line.clone())
            .take(self.limits.max_examples)
            .collect()
    }
}

fn months_between(from: NaiveDate, to: NaiveDate) -> i32 {
    (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32
}

/// The raw-text line containing byte `offset`.
fn line_at(text: &str, offset: usize) -> &str {
    let start = text[..offset].rfind('\n').map_or(0, |i| i + 1);
    let end = text[offset..].find('\n').map_or(text.len(), |i| offset + i);
    &text[start..end]
}

fn end_or_max(range: &DateRange) -> NaiveDate {
    range.end.unwrap_or(NaiveDate::MAX)
}

impl ContentAnalyzer for ChronologyAnalyzer {
    type Finding = ChronologyFinding;

    fn analyze(&self, input: &AnalysisInput<'_>) -> ChronologyFinding {
        let raw = input.text.raw();
        let ranges = extract_ranges(raw);
        let concurrent: Vec<bool> = ranges
            .iter()
            .map(|r| self.concurrent.matches(line_at(raw, r.offset)))
            .collect();

        let cap = self.limits.max_chronology_issues;
        let mut issues = Vec::new();
        let mut out_of_order_count = 0;
        for i in 1..ranges.len() {
            let (prev, cur) = (&ranges[i - 1], &ranges[i]);
            if cur.start > prev.start && !concurrent[i] && !concurrent[i - 1] {
                out_of_order_count += 1;
                if issues.len() < cap {
                    issues.push(ChronologyIssue {
                        kind: ChronologyIssueKind::OutOfOrder,
                        message: format!(
                            "'{}' is listed after '{}' but starts later",
                            cur.text, prev.text
                        ),
                    });
                }
            }
        }
        let mut overlap_count = 0;
        let mut first_overlap = None;
        for i in 0..ranges.len() {
            for j in (i + 1)..ranges.len() {
                let (a, b) = (&ranges[i], &ranges[j]);
                let overlapping = a.start < end_or_max(b) && b.start < end_or_max(a);
                if !overlapping || concurrent[i] || concurrent[j] {
                    continue;
                }
                overlap_count += 1;
                if first_overlap.is_none() {
                    first_overlap = Some(format!("'{}' overlaps '{}'", a.text, b.text));
                }
                if issues.len() < cap {
                    issues.push(ChronologyIssue {
                        kind: ChronologyIssueKind::Overlap,
                        message: format!("'{}' overlaps '{}'", a.text, b.text),
                    });
                }
            }
        }
        let total_issues = out_of_order_count + overlap_count;

        let mut by_start: Vec<&DateRange> = ranges.iter().collect();
        by_start.sort_by_key(|r| r.start);
        let mut gaps = Vec::new();
        let mut latest: Option<&DateRange> = None;
        for range in by_start {
            if let Some(prev) = latest {
                let Some(prev_end) = prev.end else {
                    break;
                };
                let months = months_between(prev_end, range.start);
                if months > GAP_MONTHS {
                    gaps.push(EmploymentGap {
                        after: prev.text.clone(),
                        before: range.text.clone(),
                        months,
                    });
                }
            }
            if latest.map_or(true, |l| end_or_max(range) > end_or_max(l)) {
                latest = Some(range);
            }
        }

        let entries_missing_dates = self.undated_roles(input.text.lines());
        let score = (100.0 - 15.0 * total_issues as f64).max(0.0);

        let mut recommendations = Vec::new();
        if ranges.is_empty() {
            recommendations.push("Add start and end dates to each role".to_string());
        }
        if out_of_order_count > 0 {
            recommendations
                .push("List roles in reverse chronological order, most recent first".to_string());
        }
        if let Some(overlap) = first_overlap {
            recommendations.push(format!(
                "Clarify overlapping dates ({overlap}); mark concurrent roles as part-time or concurrent"
            ));
        }
        for gap in gaps.iter().take(self.limits.max_examples) {
            recommendations.push(format!(
                "Consider briefly explaining the {}-month gap between '{}' and '{}'",
                gap.months, gap.after, gap.before
            ));
        }
        if !entries_missing_dates.is_empty() {
            recommendations.push(format!(
                "Add dates to: {}",
                entries_missing_dates.join("; ")
            ));
        }

        ChronologyFinding {
            has_dates: contains_date(raw),
            total_date_ranges: ranges.len(),
            ranges,
            issues,
            out_of_order_count,
            overlap_count,
            total_issues,
            gaps,
            entries_missing_dates,
            chronology_score: score,
            recommendations,
        }
    }
}
