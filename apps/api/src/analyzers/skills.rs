use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{dedup_in_order, AnalysisInput, ContentAnalyzer};
use crate::lexicon::{ConfigError, Lexicons, PhraseMatcher};

/// Separators between skills in a skills section.
static SKILL_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[,;|•·▪/\n:]|\band\b").expect("static regex"));

/// Body lines read after a skills header.
const MAX_SKILL_LINES: usize = 15;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillBalance {
    #[default]
    NoSkills,
    NoTechnical,
    NoSoft,
    TechHeavy,
    SoftHeavy,
    Balanced,
}

impl SkillBalance {
    fn classify(technical: usize, soft: usize) -> Self {
        match (technical, soft) {
            (0, 0) => SkillBalance::NoSkills,
            (0, _) => SkillBalance::NoTechnical,
            (_, 0) => SkillBalance::NoSoft,
            _ => {
                let ratio = technical as f64 / (technical + soft) as f64;
                if ratio > 0.85 {
                    SkillBalance::TechHeavy
                } else if ratio < 0.3 {
                    SkillBalance::SoftHeavy
                } else {
                    SkillBalance::Balanced
                }
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillsFinding {
    pub has_dedicated_section: bool,
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    /// Section tokens matching neither lexicon.
    pub other_skills: Vec<String>,
    pub skills_by_category: BTreeMap<String, Vec<String>>,
    pub total_skills: usize,
    pub technical_ratio: f64,
    pub balance: SkillBalance,
    pub has_categories: bool,
    pub well_formatted: bool,
    pub outdated_skills: Vec<String>,
    pub skills_score: f64,
    pub recommendations: Vec<String>,
}

pub struct SkillsAnalyzer {
    /// (category, matcher) per technical group.
    technical: Vec<(String, PhraseMatcher)>,
    soft: PhraseMatcher,
    outdated: PhraseMatcher,
    category_labels: PhraseMatcher,
}

impl SkillsAnalyzer {
    pub fn new(lexicons: &Lexicons) -> Result<Self, ConfigError> {
        let technical = lexicons
            .technical_skills
            .iter()
            .map(|g| Ok((g.category.clone(), PhraseMatcher::new(&g.skills, "technical_skills")?)))
            .collect::<Result<Vec<_>, ConfigError>>()?;
        Ok(Self {
            technical,
            soft: PhraseMatcher::new(&lexicons.soft_skills, "soft_skills")?,
            outdated: PhraseMatcher::new(&lexicons.outdated_skills, "outdated_skills")?,
            category_labels: PhraseMatcher::new(
                &lexicons.skill_category_labels,
                "skill_category_labels",
            )?,
        })
    }

    fn technical_category(&self, token: &str) -> Option<&str> {
        self.technical
            .iter()
            .find(|(_, m)| m.matches(token))
            .map(|(category, _)| category.as_str())
    }
}

/// Header inline text plus the body lines up to the next header.
fn skills_section_text(input: &AnalysisInput<'_>) -> Option<String> {
    let sections = input.sections;
    let idx = sections.headers.iter().position(|h| h.section == "skills")?;
    let header = &sections.headers[idx];
    let lines = input.text.lines();
    let end = sections
        .body_end(idx, lines.len())
        .min(header.line + 1 + MAX_SKILL_LINES);
    let mut body = vec![header.inline.as_str()];
    body.extend(lines[(header.line + 1).min(end)..end].iter().map(String::as_str));
    Some(body.join("\n"))
}

impl ContentAnalyzer for SkillsAnalyzer {
    type Finding = SkillsFinding;

    fn analyze(&self, input: &AnalysisInput<'_>) -> SkillsFinding {
        let section = skills_section_text(input);
        let mut finding = SkillsFinding {
            has_dedicated_section: section.is_some(),
            ..Default::default()
        };

        match &section {
            Some(body) => {
                for token in SKILL_SPLIT.split(body) {
                    let token = token
                        .trim_matches(|c: char| !c.is_alphanumeric() && c != '+' && c != '#')
                        .to_lowercase();
                    if token.is_empty() || token.split_whitespace().count() > 4 {
                        continue;
                    }
                    if let Some(category) = self.technical_category(&token) {
                        finding
                            .skills_by_category
                            .entry(category.to_string())
                            .or_default()
                            .push(token.clone());
                        finding.technical_skills.push(token);
                    } else if self.soft.matches(&token) {
                        finding.soft_skills.push(token);
                    } else if !self.category_labels.matches(&token) {
                        finding.other_skills.push(token);
                    }
                }
                finding.has_categories = self.category_labels.matches(body);
                finding.well_formatted = body.contains(',')
                    || body.contains('|')
                    || body.contains('•')
                    || body.lines().filter(|l| !l.trim().is_empty()).count() > 1;
                finding.outdated_skills = self.outdated.found_in(body);
            }
            None => {
                let raw = input.text.raw();
                for (category, matcher) in &self.technical {
                    let found = matcher.found_in(raw);
                    if !found.is_empty() {
                        finding.technical_skills.extend(found.iter().cloned());
                        finding.skills_by_category.insert(category.clone(), found);
                    }
                }
                finding.soft_skills = self.soft.found_in(raw);
                finding.outdated_skills = self.outdated.found_in(raw);
            }
        }
        dedup_in_order(&mut finding.technical_skills);
        dedup_in_order(&mut finding.soft_skills);

        let technical = finding.technical_skills.len();
        let soft = finding.soft_skills.len();
        let total = technical + soft;
        finding.total_skills = total;
        finding.technical_ratio = if total == 0 {
            0.0
        } else {
            technical as f64 / total as f64
        };
        finding.balance = SkillBalance::classify(technical, soft);
        finding.skills_score = (6.0 * total as f64).min(100.0);
        finding.recommendations = recommendations(&finding);
        finding
    }
}

fn recommendations(f: &SkillsFinding) -> Vec<String> {
    let mut out = Vec::new();
    if !f.has_dedicated_section {
        out.push("Add a dedicated Skills section so ATS parsers can find your skills".to_string());
    }
    match f.balance {
        SkillBalance::NoSkills => {
            out.push("List the technical and soft skills relevant to your target role".to_string())
        }
        SkillBalance::NoTechnical => {
            out.push("Add technical skills: languages, tools and platforms you use".to_string())
        }
        SkillBalance::NoSoft => out.push(
            "Add a few soft skills such as leadership or communication, backed by examples"
                .to_string(),
        ),
        SkillBalance::TechHeavy => out.push(
            "Balance your technical list with soft skills like collaboration or mentoring"
                .to_string(),
        ),
        SkillBalance::SoftHeavy => {
            out.push("Add more technical skills; the list leans heavily on soft skills".to_string())
        }
        SkillBalance::Balanced => {}
    }
    if f.has_dedicated_section && !f.has_categories && f.total_skills > 8 {
        out.push("Group skills into categories (Languages, Frameworks, Tools)".to_string());
    }
    if f.has_dedicated_section && !f.well_formatted {
        out.push("Separate skills with commas or bullets for easier scanning".to_string());
    }
    if !f.outdated_skills.is_empty() {
        out.push(format!(
            "Remove outdated skills: {}",
            f.outdated_skills.join(", ")
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::test_support::run;
    use crate::lexicon::EngineConfig;

    fn analyzer() -> SkillsAnalyzer {
        SkillsAnalyzer::new(&EngineConfig::default().lexicons).unwrap()
    }

    #[test]
    fn test_reads_skills_section_tokens() {
        let f = run(
            &analyzer(),
            "Experience\n- Built X\nSkills\nProgramming: Python, Rust, SQL\nLeadership | Communication",
        );
        assert!(f.has_dedicated_section);
        assert_eq!(f.technical_skills, ["python", "rust", "sql"]);
        assert_eq!(f.soft_skills, ["leadership", "communication"]);
        assert_eq!(f.skills_by_category["programming"], ["python", "rust"]);
        assert_eq!(f.skills_by_category["databases"], ["sql"]);
        assert!(f.has_categories);
        assert_eq!(f.total_skills, 5);
        assert_eq!(f.skills_score, 30.0);
        assert_eq!(f.balance, SkillBalance::Balanced);
    }

    #[test]
    fn test_inline_skills_header() {
        let f = run(&analyzer(), "Skills: Python");
        assert_eq!(f.technical_skills, ["python"]);
        assert_eq!(f.balance, SkillBalance::NoSoft);
    }

    #[test]
    fn test_falls_back_to_full_text_scan() {
        let f = run(&analyzer(), "Built services in Java with Docker; strong leadership.");
        assert!(!f.has_dedicated_section);
        assert_eq!(f.technical_skills, ["java", "docker"]);
        assert_eq!(f.soft_skills, ["leadership"]);
        assert!(f
            .recommendations
            .iter()
            .any(|r| r.contains("dedicated Skills section")));
    }

    #[test]
    fn test_balance_bands() {
        assert_eq!(SkillBalance::classify(0, 0), SkillBalance::NoSkills);
        assert_eq!(SkillBalance::classify(0, 3), SkillBalance::NoTechnical);
        assert_eq!(SkillBalance::classify(6, 1), SkillBalance::TechHeavy);
        assert_eq!(SkillBalance::classify(1, 4), SkillBalance::SoftHeavy);
        assert_eq!(SkillBalance::classify(3, 2), SkillBalance::Balanced);
    }

    #[test]
    fn test_flags_outdated_skills() {
        let f = run(&analyzer(), "Skills: Flash, Silverlight, Python");
        assert_eq!(f.outdated_skills, ["flash", "silverlight"]);
        assert!(f.recommendations.iter().any(|r| r.starts_with("Remove outdated")));
    }

    #[test]
    fn test_score_caps_at_100() {
        let f = run(
            &analyzer(),
            "Skills: python, java, rust, sql, aws, docker, git, react, html, css, redis, \
             kubernetes, terraform, figma, jira, leadership, teamwork",
        );
        assert_eq!(f.total_skills, 17);
        assert_eq!(f.skills_score, 100.0);
    }
}
