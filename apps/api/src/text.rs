//! Normalized views of one resume's text, computed lazily and cached.

use std::collections::HashSet;
use std::sync::{LazyLock, OnceLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::sections::SectionReport;

static BULLET_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?P<glyph>[•·▪▫‣⁃➤►▶])\s*|(?P<dash>[-*–])\s+|\d{1,2}[.)]\s+)(?P<body>\S.*)$",
    )
    .expect("static regex")
});

/// Dates on a line mark it as a role/heading line, not an achievement statement.
static DATE_HINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)
        \b(?:19|20)\d{2}\s*(?:-|–|—|to)\s*(?:(?:19|20)\d{2}|present|current|now)\b
        | \b(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+(?:19|20)\d{2}\b
        | \b\d{1,2}/(?:19|20)\d{2}\b
        | \bpresent\b",
    )
    .expect("static regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulletMarker {
    Glyph(char),
    Numbered,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bullet {
    pub text: String,
    /// `None` for declarative lines picked up under an experience-like header.
    pub marker: Option<BulletMarker>,
}

/// One resume. Views are derived on first use; the raw text is never modified.
#[derive(Debug)]
pub struct ResumeText {
    raw: String,
    lower: OnceLock<String>,
    lines: OnceLock<Vec<String>>,
    bullets: OnceLock<Vec<Bullet>>,
}

impl ResumeText {
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            lower: OnceLock::new(),
            lines: OnceLock::new(),
            bullets: OnceLock::new(),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn lower(&self) -> &str {
        self.lower.get_or_init(|| self.raw.to_lowercase())
    }

    /// Trimmed, non-empty lines in document order.
    pub fn lines(&self) -> &[String] {
        self.lines.get_or_init(|| {
            self.raw
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect()
        })
    }

    pub fn word_count(&self) -> usize {
        self.raw.split_whitespace().count()
    }

    /// Empty, NUL-bearing, or mostly control characters.
    pub fn is_unusable(&self) -> bool {
        if self.raw.trim().is_empty() || self.raw.contains('\0') {
            return true;
        }
        let total = self.raw.chars().count();
        let control = self
            .raw
            .chars()
            .filter(|c| c.is_control() && !matches!(c, '\n' | '\r' | '\t'))
            .count();
        control * 10 > total
    }

    /// Bullet statements: marker lines anywhere, plus declarative lines under the
    /// experience-like headers in `sections`. Deduplicated, first occurrence wins.
    ///
    /// Cached on first call; pass the report produced for this same text.
    pub fn bullets(&self, sections: &SectionReport) -> &[Bullet] {
        self.bullets.get_or_init(|| extract_bullets(self.lines(), sections))
    }
}

fn extract_bullets(lines: &[String], sections: &SectionReport) -> Vec<Bullet> {
    let mut in_scope = vec![false; lines.len()];
    let mut header_lines = HashSet::new();
    for (i, header) in sections.headers.iter().enumerate() {
        header_lines.insert(header.line);
        if !header.experience_like {
            continue;
        }
        let end = sections
            .headers
            .get(i + 1)
            .map(|next| next.line)
            .unwrap_or(lines.len())
            .min(lines.len());
        let start = (header.line + 1).min(end);
        in_scope[start..end].iter_mut().for_each(|s| *s = true);
    }

    let mut seen = HashSet::new();
    let mut bullets = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        if header_lines.contains(&i) {
            continue;
        }
        let bullet = if let Some(caps) = BULLET_MARKER.captures(line) {
            let marker = if let Some(g) = caps.name("glyph").or_else(|| caps.name("dash")) {
                g.as_str().chars().next().map(BulletMarker::Glyph)
            } else {
                Some(BulletMarker::Numbered)
            };
            Bullet {
                text: caps["body"].trim().to_string(),
                marker,
            }
        } else if in_scope[i] && is_declarative(line) {
            Bullet {
                text: line.clone(),
                marker: None,
            }
        } else {
            continue;
        };
        if seen.insert(bullet.text.to_lowercase()) {
            bullets.push(bullet);
        }
    }
    bullets
}

fn is_declarative(line: &str) -> bool {
    let words: Vec<&str> = line.split_whitespace().collect();
    if !(2..=40).contains(&words.len()) {
        return false;
    }
    let first = words[0].trim_end_matches([',', ';', ':']);
    let starts_capitalised = first.chars().next().is_some_and(char::is_uppercase);
    starts_capitalised
        && first.chars().all(char::is_alphabetic)
        && !line.ends_with(':')
        && !line.contains('@')
        && !line.contains('|')
        && !DATE_HINT.is_match(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::SectionHeader;

    fn report(headers: Vec<(usize, &str, bool)>) -> SectionReport {
        SectionReport {
            headers: headers
                .into_iter()
                .map(|(line, section, experience_like)| SectionHeader {
                    section: section.to_string(),
                    line,
                    experience_like,
                    inline: String::new(),
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_lines_are_trimmed_and_non_empty() {
        let text = ResumeText::new("  Jane Doe  \n\n\tEngineer\n");
        assert_eq!(text.lines(), ["Jane Doe", "Engineer"]);
    }

    #[test]
    fn test_marker_bullets_detected() {
        let text = ResumeText::new("• Led a team of 5\n- Built a parser\n1. Shipped v2\nPlain line");
        let bullets = text.bullets(&SectionReport::default());
        let texts: Vec<&str> = bullets.iter().map(|b| b.text.as_str()).collect();
        assert_eq!(texts, ["Led a team of 5", "Built a parser", "Shipped v2"]);
        assert_eq!(bullets[0].marker, Some(BulletMarker::Glyph('•')));
        assert_eq!(bullets[2].marker, Some(BulletMarker::Numbered));
    }

    #[test]
    fn test_declarative_lines_under_experience() {
        let text = ResumeText::new(
            "Experience\nAcme Corp Jan 2020 - Present\nBuilt the billing pipeline\nSkills\nPython and Rust",
        );
        let sections = report(vec![(0, "experience", true), (3, "skills", false)]);
        let texts: Vec<&str> = text
            .bullets(&sections)
            .iter()
            .map(|b| b.text.as_str())
            .collect();
        assert_eq!(texts, ["Built the billing pipeline"], "dated line and skills body excluded");
    }

    #[test]
    fn test_duplicate_bullets_collapse() {
        let text = ResumeText::new("- Built X\n- Built X\n- Built Y");
        assert_eq!(text.bullets(&SectionReport::default()).len(), 2);
    }

    #[test]
    fn test_unusable_inputs() {
        assert!(ResumeText::new("").is_unusable());
        assert!(ResumeText::new("   \n ").is_unusable());
        assert!(ResumeText::new("abc\0def").is_unusable());
        assert!(ResumeText::new("\u{1}\u{2}\u{3}ab").is_unusable());
        assert!(!ResumeText::new("Experience\nBuilt X").is_unusable());
    }
}
