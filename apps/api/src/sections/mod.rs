//! Section detection and the critical-section gate inputs.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::lexicon::{compile_pattern, ConfigError, SectionConfig};
use crate::text::ResumeText;

/// Section satisfied by structural contact details as well as by its patterns.
pub const CONTACT: &str = "contact";

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("static regex")
});

/// Phone shapes: a leading country code, a parenthesised area code, 3-3-4 groups, 3-4 groups
/// joined by `.` or `-`, or one unbroken run of 10+ digits.
static PHONE: LazyLock<[Regex; 5]> = LazyLock::new(|| {
    [
        r"\+\d{1,3}[\s.-]?(?:\(\d{1,4}\)|\d{1,4})(?:[\s.-]?\d{2,4}){1,4}",
        r"\(\d{2,4}\)[\s.-]?\d{3,4}[\s.-]?\d{3,4}",
        r"\b\d{3}[\s.-]\d{3}[\s.-]\d{4}\b",
        r"\b\d{3}[.-]\d{4}\b",
        r"\b\d{10,15}\b",
    ]
    .map(|p| Regex::new(p).expect("static regex"))
});

/// A line recognised as a section header. `line` indexes `ResumeText::lines()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionHeader {
    pub section: String,
    pub line: usize,
    /// Whether lines under this header count as bullets without a marker.
    pub experience_like: bool,
    /// Text after a colon on the header line ("Skills: Python, SQL").
    pub inline: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionReport {
    pub found: BTreeSet<String>,
    pub missing: BTreeSet<String>,
    /// Missing critical sections, in configured order.
    pub critical_missing: Vec<String>,
    pub has_all_critical: bool,
    /// Header lines in document order.
    pub headers: Vec<SectionHeader>,
}

impl SectionReport {
    pub fn has(&self, section: &str) -> bool {
        self.found.contains(section)
    }

    /// First header line for `section`, if one was recognised.
    pub fn header(&self, section: &str) -> Option<&SectionHeader> {
        self.headers.iter().find(|h| h.section == section)
    }

    /// Index just past the body of the header at position `idx` in `headers`.
    pub fn body_end(&self, idx: usize, line_count: usize) -> usize {
        self.headers
            .get(idx + 1)
            .map(|next| next.line)
            .unwrap_or(line_count)
            .min(line_count)
    }
}

struct CompiledSection {
    name: String,
    patterns: Vec<Regex>,
    headers: Vec<String>,
    experience_like: bool,
}

pub struct SectionDetector {
    sections: Vec<CompiledSection>,
    critical: Vec<String>,
}

impl SectionDetector {
    pub fn new(config: &SectionConfig) -> Result<Self, ConfigError> {
        let mut sections = Vec::with_capacity(config.known.len());
        for spec in &config.known {
            let context = format!("sections.{}.patterns", spec.name);
            let patterns = spec
                .patterns
                .iter()
                .map(|p| compile_pattern(p, &context))
                .collect::<Result<Vec<_>, _>>()?;
            sections.push(CompiledSection {
                name: spec.name.clone(),
                patterns,
                headers: spec.headers.iter().map(|h| normalize_header(h)).collect(),
                experience_like: config.experience_like.contains(&spec.name),
            });
        }
        Ok(Self {
            sections,
            critical: config.critical.clone(),
        })
    }

    pub fn detect(&self, text: &ResumeText) -> SectionReport {
        if text.is_unusable() {
            return self.unusable_report();
        }

        let raw = text.raw();
        let mut found: BTreeSet<String> = self
            .sections
            .iter()
            .filter(|s| s.patterns.iter().any(|re| re.is_match(raw)))
            .map(|s| s.name.clone())
            .collect();

        if self.sections.iter().any(|s| s.name == CONTACT) && has_contact_details(raw) {
            found.insert(CONTACT.to_string());
        }

        let headers: Vec<SectionHeader> = text
            .lines()
            .iter()
            .enumerate()
            .filter_map(|(line, content)| {
                let (idx, inline) = self.match_header(content)?;
                let section = &self.sections[idx];
                Some(SectionHeader {
                    section: section.name.clone(),
                    line,
                    experience_like: section.experience_like,
                    inline,
                })
            })
            .collect();
        found.extend(headers.iter().map(|h| h.section.clone()));

        let missing = self
            .sections
            .iter()
            .filter(|s| !found.contains(&s.name))
            .map(|s| s.name.clone())
            .collect();
        let critical_missing: Vec<String> = self
            .critical
            .iter()
            .filter(|c| !found.contains(*c))
            .cloned()
            .collect();

        SectionReport {
            has_all_critical: critical_missing.is_empty(),
            found,
            missing,
            critical_missing,
            headers,
        }
    }

    /// Section index and inline remainder when `line` reads as a header.
    pub fn match_header(&self, line: &str) -> Option<(usize, String)> {
        let (head, inline) = match line.split_once(':') {
            Some((head, rest)) => (head, rest.trim().to_string()),
            None => (line, String::new()),
        };
        let norm = normalize_header(head);
        if norm.is_empty() || norm.split_whitespace().count() > 4 {
            return None;
        }

        let exact = self
            .sections
            .iter()
            .position(|s| s.headers.iter().any(|h| *h == norm));
        let combined = || {
            self.sections.iter().position(|s| {
                s.headers.iter().any(|h| {
                    norm.strip_prefix(h.as_str()).is_some_and(|rest| {
                        rest.starts_with(" & ") || rest.starts_with(" and ") || rest.starts_with(" / ")
                    })
                })
            })
        };
        exact.or_else(combined).map(|idx| (idx, inline))
    }

    fn unusable_report(&self) -> SectionReport {
        SectionReport {
            found: BTreeSet::new(),
            missing: self.sections.iter().map(|s| s.name.clone()).collect(),
            critical_missing: self.critical.clone(),
            has_all_critical: self.critical.is_empty(),
            headers: Vec::new(),
        }
    }
}

/// Lowercase, outer punctuation stripped, whitespace collapsed.
pub fn normalize_header(line: &str) -> String {
    line.trim_matches(|c: char| !c.is_alphanumeric())
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// An email address, or a phone number of 7–15 digits.
pub fn has_contact_details(text: &str) -> bool {
    if EMAIL.is_match(text) {
        return true;
    }
    PHONE.iter().any(|re| {
        re.find_iter(text).any(|m| {
            let digits = m.as_str().chars().filter(char::is_ascii_digit).count();
            (7..=15).contains(&digits)
        })
    })
}
