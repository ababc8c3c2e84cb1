//! Date extraction shared by the consistency and chronology checks.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use super::{AnalysisInput, ContentAnalyzer};
use crate::lexicon::DisplayLimits;

static MONTH_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?\s+((?:19|20)\d{2})\b",
    )
    .expect("static regex")
});

static NUMERIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(0?[1-9]|1[0-2])\s*[/-]\s*((?:19|20)\d{2})\b").expect("static regex")
});

static SEASON_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(spring|summer|fall|autumn|winter)\s+((?:19|20)\d{2})\b")
        .expect("static regex")
});

static YEAR_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b((?:19|20)\d{2})\s*(?:-|–|—|to)\s*((?:19|20)\d{2}|present|current|now)\b",
    )
    .expect("static regex")
});

static RANGE_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:-|–|—|to|until)\s*$").expect("static regex")
});

static OPEN_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:-|–|—|to)\s*(?:present|current|now)\b").expect("static regex")
});

/// Date format families. Declaration order is the reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFormat {
    MonthYear,
    Numeric,
    YearRange,
    SeasonYear,
}

impl DateFormat {
    pub fn label(self) -> &'static str {
        match self {
            DateFormat::MonthYear => "Month YYYY",
            DateFormat::Numeric => "MM/YYYY",
            DateFormat::YearRange => "YYYY - YYYY",
            DateFormat::SeasonYear => "Season YYYY",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RangeEnd {
    Date(NaiveDate),
    Present,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DateToken {
    pub format: DateFormat,
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub date: NaiveDate,
    /// Only set for `YearRange` tokens.
    pub range_end: Option<RangeEnd>,
}

/// A start/end span. `end == None` means open-ended ("Present").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub text: String,
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
    /// Byte offset of the range in the raw text.
    #[serde(skip)]
    pub offset: usize,
}

fn month_number(name: &str) -> Option<u32> {
    const MONTHS: [&str; 12] = [
        "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
    ];
    let prefix: String = name.to_lowercase().chars().take(3).collect();
    MONTHS
        .iter()
        .position(|m| *m == prefix)
        .map(|i| i as u32 + 1)
}

fn season_month(name: &str) -> u32 {
    match name.to_lowercase().as_str() {
        "spring" => 3,
        "summer" => 6,
        "fall" | "autumn" => 9,
        _ => 12,
    }
}

fn year(caps: &Captures<'_>, group: usize) -> Option<i32> {
    caps.get(group)?.as_str().parse().ok()
}

/// Month defaults to January when only a year is known.
fn ym(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// All date tokens in document order. Earlier families claim their span first,
/// so "Jan 2020 - 2021" never also reports a bare year range.
pub(crate) fn extract_tokens(text: &str) -> Vec<DateToken> {
    let mut tokens: Vec<DateToken> = Vec::new();
    let overlaps = |tokens: &[DateToken], start: usize, end: usize| {
        tokens.iter().any(|t| start < t.end && t.start < end)
    };

    for caps in MONTH_YEAR.captures_iter(text) {
        let (Some(m), Some(y)) = (caps.get(1).and_then(|m| month_number(m.as_str())), year(&caps, 2)) else {
            continue;
        };
        if let (Some(whole), Some(date)) = (caps.get(0), ym(y, m)) {
            tokens.push(DateToken {
                format: DateFormat::MonthYear,
                text: whole.as_str().to_string(),
                start: whole.start(),
                end: whole.end(),
                date,
                range_end: None,
            });
        }
    }

    for caps in NUMERIC.captures_iter(text) {
        let month = caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok());
        let (Some(whole), Some(m), Some(y)) = (caps.get(0), month, year(&caps, 2)) else {
            continue;
        };
        if overlaps(&tokens, whole.start(), whole.end()) {
            continue;
        }
        if let Some(date) = ym(y, m) {
            tokens.push(DateToken {
                format: DateFormat::Numeric,
                text: whole.as_str().to_string(),
                start: whole.start(),
                end: whole.end(),
                date,
                range_end: None,
            });
        }
    }

    for caps in YEAR_RANGE.captures_iter(text) {
        let (Some(whole), Some(y)) = (caps.get(0), year(&caps, 1)) else {
            continue;
        };
        if overlaps(&tokens, whole.start(), whole.end()) {
            continue;
        }
        let range_end = match year(&caps, 2) {
            Some(end_year) => ym(end_year, 1).map(RangeEnd::Date),
            None => Some(RangeEnd::Present),
        };
        if let Some(date) = ym(y, 1) {
            tokens.push(DateToken {
                format: DateFormat::YearRange,
                text: whole.as_str().to_string(),
                start: whole.start(),
                end: whole.end(),
                date,
                range_end,
            });
        }
    }

    for caps in SEASON_YEAR.captures_iter(text) {
        let (Some(whole), Some(season), Some(y)) = (caps.get(0), caps.get(1), year(&caps, 2)) else {
            continue;
        };
        if overlaps(&tokens, whole.start(), whole.end()) {
            continue;
        }
        if let Some(date) = ym(y, season_month(season.as_str())) {
            tokens.push(DateToken {
                format: DateFormat::SeasonYear,
                text: whole.as_str().to_string(),
                start: whole.start(),
                end: whole.end(),
                date,
                range_end: None,
            });
        }
    }

    tokens.sort_by_key(|t| t.start);
    tokens
}

/// Date ranges in document order: year ranges, "A - B" token pairs, and "A - Present".
pub(crate) fn extract_ranges(text: &str) -> Vec<DateRange> {
    let tokens = extract_tokens(text);
    let mut ranges = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token.format == DateFormat::YearRange {
            ranges.push(DateRange {
                text: token.text.clone(),
                start: token.date,
                end: match token.range_end {
                    Some(RangeEnd::Date(d)) => Some(d),
                    _ => None,
                },
                offset: token.start,
            });
            i += 1;
            continue;
        }

        let paired = tokens.get(i + 1).filter(|next| {
            next.format != DateFormat::YearRange
                && RANGE_SEPARATOR.is_match(&text[token.end..next.start])
        });
        if let Some(next) = paired {
            ranges.push(DateRange {
                text: text[token.start..next.end].to_string(),
                start: token.date,
                end: Some(next.date),
                offset: token.start,
            });
            i += 2;
            continue;
        }

        if let Some(open) = OPEN_END.find(&text[token.end..]) {
            ranges.push(DateRange {
                text: text[token.start..token.end + open.end()].to_string(),
                start: token.date,
                end: None,
                offset: token.start,
            });
        }
        i += 1;
    }
    ranges
}

pub(crate) fn contains_date(text: &str) -> bool {
    MONTH_YEAR.is_match(text)
        || NUMERIC.is_match(text)
        || YEAR_RANGE.is_match(text)
        || SEASON_YEAR.is_match(text)
}

// ────────────────────────────────────────────────────────────────────────────
// Consistency
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateConsistencyFinding {
    pub formats_found: Vec<DateFormat>,
    pub date_examples: Vec<String>,
    pub total_dates: usize,
    /// Exactly one format family in use. False when the resume has no dates.
    pub is_consistent: bool,
    pub consistency_score: f64,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct DateConsistencyAnalyzer {
    max_examples: usize,
}

impl DateConsistencyAnalyzer {
    pub fn new(limits: &DisplayLimits) -> Self {
        Self {
            max_examples: limits.max_date_examples,
        }
    }
}

impl ContentAnalyzer for DateConsistencyAnalyzer {
    type Finding = DateConsistencyFinding;

    fn analyze(&self, input: &AnalysisInput<'_>) -> DateConsistencyFinding {
        let tokens = extract_tokens(input.text.raw());
        let formats: BTreeSet<DateFormat> = tokens.iter().map(|t| t.format).collect();
        let n = formats.len();
        let score = if n <= 1 {
            100.0
        } else {
            (100.0 - 20.0 * n as f64).max(50.0)
        };

        let mut recommendations = Vec::new();
        if n == 0 {
            recommendations.push("Add dates to your experience and education entries".to_string());
        } else if n > 1 {
            let labels: Vec<&str> = formats.iter().map(|f| f.label()).collect();
            recommendations.push(format!(
                "Use one date format throughout (found: {})",
                labels.join(", ")
            ));
            recommendations.push("'Month YYYY' (e.g. Jan 2020) reads best to recruiters and ATS".to_string());
        }

        DateConsistencyFinding {
            formats_found: formats.into_iter().collect(),
            date_examples: tokens
                .iter()
                .take(self.max_examples)
                .map(|t| t.text.clone())
                .collect(),
            total_dates: tokens.len(),
            is_consistent: n == 1,
            consistency_score: score,
            recommendations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::test_support::run;

    fn analyzer() -> DateConsistencyAnalyzer {
        DateConsistencyAnalyzer::new(&crate::lexicon::EngineConfig::default().display)
    }

    fn d(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    #[test]
    fn test_mixed_formats_are_inconsistent() {
        let f = run(&analyzer(), "Acme Jan 2020 - Dec 2021\nGlobex 01/2018-12/2019");
        assert_eq!(f.formats_found, [DateFormat::MonthYear, DateFormat::Numeric]);
        assert!(!f.is_consistent);
        assert_eq!(f.consistency_score, 60.0);
    }

    #[test]
    fn test_single_format_is_consistent() {
        let f = run(&analyzer(), "Acme March 2020 - Present\nGlobex Jan 2018 - Feb 2020");
        assert_eq!(f.formats_found, [DateFormat::MonthYear]);
        assert!(f.is_consistent);
        assert_eq!(f.consistency_score, 100.0);
    }

    #[test]
    fn test_no_dates_scores_full_but_not_consistent() {
        let f = run(&analyzer(), "No dates here at all");
        assert!(f.formats_found.is_empty());
        assert!(!f.is_consistent);
        assert_eq!(f.consistency_score, 100.0);
    }

    #[test]
    fn test_score_floor_at_50() {
        let f = run(&analyzer(), "Jan 2020\n03/2019\n2015 - 2017\nSummer 2014");
        assert_eq!(f.formats_found.len(), 4);
        assert_eq!(f.consistency_score, 50.0);
    }

    #[test]
    fn test_examples_capped_at_five() {
        let text = "Jan 2020 Feb 2020 Mar 2020 Apr 2020 May 2020 Jun 2020 Jul 2020";
        let f = run(&analyzer(), text);
        assert_eq!(f.total_dates, 7);
        assert_eq!(f.date_examples.len(), 5);
    }

    #[test]
    fn test_month_year_masks_year_range() {
        let tokens = extract_tokens("Jan 2020 - 2021");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].format, DateFormat::MonthYear);
    }

    #[test]
    fn test_ranges_pair_and_open_end() {
        let ranges = extract_ranges("Acme Jan 2020 - Present\nGlobex 03/2017 to 12/2019\nUni 2013-2017");
        assert_eq!(ranges.len(), 3);
        assert_eq!((ranges[0].start, ranges[0].end), (d(2020, 1), None));
        assert_eq!(ranges[0].text, "Jan 2020 - Present");
        assert_eq!((ranges[1].start, ranges[1].end), (d(2017, 3), Some(d(2019, 12))));
        assert_eq!((ranges[2].start, ranges[2].end), (d(2013, 1), Some(d(2017, 1))));
    }

    #[test]
    fn test_full_month_names_parse() {
        assert_eq!(month_number("September"), Some(9));
        assert_eq!(month_number("Sept"), Some(9));
        assert_eq!(month_number("xyz"), None);
    }
}
