use crate::analyzers::skills::SkillBalance;
use crate::analyzers::Findings;
use crate::lexicon::GradeBands;
use crate::models::analysis::{Criterion, CriterionGroup};

/// The display criteria. Declaration order is the fixed display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CriterionKind {
    QuantifyImpact,
    ImpactMetrics,
    Dates,
    Summary,
    ActionVerbs,
    Buzzwords,
    SkillsSection,
    ExperienceProjects,
    Structure,
    AtsCompatibility,
    WritingQuality,
    Readability,
    Formatting,
    Chronology,
    UnnecessarySections,
}

impl CriterionKind {
    pub const ALL: [CriterionKind; 15] = [
        CriterionKind::QuantifyImpact,
        CriterionKind::ImpactMetrics,
        CriterionKind::Dates,
        CriterionKind::Summary,
        CriterionKind::ActionVerbs,
        CriterionKind::Buzzwords,
        CriterionKind::SkillsSection,
        CriterionKind::ExperienceProjects,
        CriterionKind::Structure,
        CriterionKind::AtsCompatibility,
        CriterionKind::WritingQuality,
        CriterionKind::Readability,
        CriterionKind::Formatting,
        CriterionKind::Chronology,
        CriterionKind::UnnecessarySections,
    ];

    /// Public name; consumers key their display on it.
    pub fn name(self) -> &'static str {
        match self {
            CriterionKind::QuantifyImpact => "Quantify Impact",
            CriterionKind::ImpactMetrics => "Impact Metrics",
            CriterionKind::Dates => "Dates",
            CriterionKind::Summary => "Summary",
            CriterionKind::ActionVerbs => "Action Verbs",
            CriterionKind::Buzzwords => "Buzzwords",
            CriterionKind::SkillsSection => "Skills Section",
            CriterionKind::ExperienceProjects => "Experience & Projects",
            CriterionKind::Structure => "Structure",
            CriterionKind::AtsCompatibility => "ATS Compatibility",
            CriterionKind::WritingQuality => "Writing Quality",
            CriterionKind::Readability => "Readability",
            CriterionKind::Formatting => "Formatting",
            CriterionKind::Chronology => "Chronology",
            CriterionKind::UnnecessarySections => "Unnecessary Sections",
        }
    }
}

impl Findings {
    /// The analyzer advice that belongs to one criterion. Tone advice rides with Writing Quality.
    pub fn messages(&self, kind: CriterionKind) -> impl Iterator<Item = &str> {
        let extra: &[String] = match kind {
            CriterionKind::WritingQuality => &self.tone.recommendations,
            _ => &[],
        };
        self.own_messages(kind).iter().chain(extra).map(String::as_str)
    }

    fn own_messages(&self, kind: CriterionKind) -> &[String] {
        match kind {
            CriterionKind::QuantifyImpact => &self.quantification.recommendations,
            CriterionKind::ImpactMetrics => &self.impact_metrics.recommendations,
            CriterionKind::Dates => &self.date_consistency.recommendations,
            CriterionKind::Summary => &self.summary.recommendations,
            CriterionKind::ActionVerbs => &self.action_verbs.recommendations,
            CriterionKind::Buzzwords => &self.buzzwords.recommendations,
            CriterionKind::SkillsSection => &self.skills.recommendations,
            CriterionKind::ExperienceProjects => &self.structure.experience_recommendations,
            CriterionKind::Structure => &self.structure.recommendations,
            CriterionKind::AtsCompatibility => &self.keywords.recommendations,
            CriterionKind::WritingQuality => &self.writing_quality.recommendations,
            CriterionKind::Readability => &self.readability.recommendations,
            CriterionKind::Formatting => &self.formatting.recommendations,
            CriterionKind::Chronology => &self.chronology.recommendations,
            CriterionKind::UnnecessarySections => &self.unnecessary_sections.recommendations,
        }
    }
}

/// Number of ascending thresholds `value` reaches, at most 5.
pub fn band(value: f64, table: &[f64]) -> u8 {
    let met = table.iter().filter(|t| value >= **t).count();
    met.min(5) as u8
}

/// Maps 0–5 onto a fixed display set. Purely presentational; the 100-point score does not read it.
pub struct CriteriaGrader {
    bands: GradeBands,
}

impl CriteriaGrader {
    pub fn new(bands: &GradeBands) -> Self {
        Self {
            bands: bands.clone(),
        }
    }

    /// Every criterion, in display order.
    pub fn grade(&self, findings: &Findings) -> Vec<Criterion> {
        CriterionKind::ALL
            .iter()
            .map(|&kind| {
                let (score, description) = self.grade_one(kind, findings);
                criterion(kind, score, description)
            })
            .collect()
    }

    /// The full set at zero, for a resume that failed the gate.
    pub fn not_evaluated(&self) -> Vec<Criterion> {
        CriterionKind::ALL
            .iter()
            .map(|&kind| {
                criterion(
                    kind,
                    0,
                    "Not evaluated: add the missing critical sections first".to_string(),
                )
            })
            .collect()
    }

    fn percent(&self, value: f64) -> u8 {
        band(value, &self.bands.percent)
    }

    fn grade_one(&self, kind: CriterionKind, f: &Findings) -> (u8, String) {
        match kind {
            CriterionKind::QuantifyImpact => {
                let q = &f.quantification;
                (
                    band(q.quantified_percentage, &self.bands.quantification),
                    format!(
                        "{} of {} bullets ({:.0}%) include measurable results",
                        q.quantified_bullets, q.total_bullets, q.quantified_percentage
                    ),
                )
            }
            CriterionKind::ImpactMetrics => {
                let i = &f.impact_metrics;
                (
                    band(i.diversity_score as f64, &self.bands.impact_types),
                    format!("{} distinct kinds of impact metric", i.diversity_score),
                )
            }
            CriterionKind::Dates => dates_grade(f),
            CriterionKind::Summary => {
                let s = &f.summary;
                let description = if s.has_summary {
                    format!("Summary of {} words", s.word_count)
                } else {
                    "No professional summary found".to_string()
                };
                (self.percent(s.summary_score), description)
            }
            CriterionKind::ActionVerbs => {
                let a = &f.action_verbs;
                (
                    self.percent(a.action_verb_score),
                    format!("{:.0}% of bullets open with a strong verb", a.strong_verb_percentage),
                )
            }
            CriterionKind::Buzzwords => {
                let b = &f.buzzwords;
                let description = match b.total_buzzwords {
                    0 => "No buzzwords or cliches found".to_string(),
                    n => format!("{n} buzzword(s) found"),
                };
                (self.percent(b.buzzword_score), description)
            }
            CriterionKind::SkillsSection => skills_grade(f),
            CriterionKind::ExperienceProjects => {
                let s = &f.structure;
                match (s.has_experience, s.has_projects) {
                    (true, true) => (5, "Work experience and projects are both present".to_string()),
                    (true, false) => (4, "Work experience present, no projects".to_string()),
                    (false, true) => (3, "Projects present, no work experience".to_string()),
                    (false, false) => (0, "No experience or projects section".to_string()),
                }
            }
            CriterionKind::Structure => {
                let s = &f.structure;
                let description = if s.missing_required.is_empty() {
                    "All required sections present".to_string()
                } else {
                    format!("Missing: {}", s.missing_required.join(", "))
                };
                (self.percent(s.structure_score), description)
            }
            CriterionKind::AtsCompatibility => ats_grade(f),
            CriterionKind::WritingQuality => {
                let w = &f.writing_quality;
                (
                    self.percent(w.professionalism_score),
                    format!("{} writing issue(s) found", w.issue_count),
                )
            }
            CriterionKind::Readability => {
                let r = &f.readability;
                (
                    self.percent(r.flesch_reading_ease).max(1),
                    format!(
                        "Reading ease {:.0} (grade {})",
                        r.flesch_reading_ease, r.letter_grade
                    ),
                )
            }
            CriterionKind::Formatting => {
                let m = &f.formatting;
                let description = if m.bullet_consistency && m.date_consistency {
                    "Consistent bullets and dates".to_string()
                } else {
                    "Inconsistent formatting found".to_string()
                };
                (self.percent(m.formatting_score), description)
            }
            CriterionKind::Chronology => {
                let c = &f.chronology;
                let description = if c.has_dates {
                    format!("{} timeline issue(s)", c.total_issues)
                } else {
                    "No date ranges found".to_string()
                };
                (self.percent(c.chronology_score).max(1), description)
            }
            CriterionKind::UnnecessarySections => {
                let u = &f.unnecessary_sections;
                (self.percent(u.modernization_score), u.summary.clone())
            }
        }
    }
}

fn criterion(kind: CriterionKind, score: u8, description: String) -> Criterion {
    Criterion {
        name: kind.name().to_string(),
        score,
        description,
        group: CriterionGroup::for_grade(score),
    }
}

fn dates_grade(f: &Findings) -> (u8, String) {
    let d = &f.date_consistency;
    let ordered = f.chronology.out_of_order_count == 0;
    if d.total_dates == 0 {
        (0, "No dates found".to_string())
    } else if d.is_consistent && ordered {
        (5, "One date format, in reverse-chronological order".to_string())
    } else if d.is_consistent {
        (3, "One date format, but entries are out of order".to_string())
    } else {
        (2, format!("{} different date formats in use", d.formats_found.len()))
    }
}

fn skills_grade(f: &Findings) -> (u8, String) {
    let s = &f.skills;
    match s.total_skills {
        0 => (0, "No skills listed".to_string()),
        n if n < 5 => (2, format!("Only {n} skill(s) listed")),
        n if s.balance == SkillBalance::Balanced => {
            (5, format!("{n} skills with a good technical/soft balance"))
        }
        n => (3, format!("{n} skills, unevenly balanced")),
    }
}

/// Mean of four 2–5 factors an applicant tracking system is sensitive to.
fn ats_grade(f: &Findings) -> (u8, String) {
    let formatting = match f.formatting.formatting_score {
        s if s >= 100.0 => 5,
        s if s >= 75.0 => 4,
        s if s >= 50.0 => 3,
        _ => 2,
    };
    let readability = match f.readability.flesch_reading_ease {
        s if s >= 60.0 => 5,
        s if s >= 50.0 => 4,
        s if s >= 30.0 => 3,
        _ => 2,
    };
    let buzzwords = match f.buzzwords.total_buzzwords {
        0 => 5,
        1..=2 => 4,
        3..=5 => 3,
        _ => 2,
    };
    let missing = f.structure.missing_required.len();
    let sections = match missing {
        0 => 5,
        1 => 4,
        2 => 3,
        _ => 2,
    };
    let mean = f64::from(formatting + readability + buzzwords + sections) / 4.0;
    let description = if missing == 0 {
        "Parses cleanly with all required sections".to_string()
    } else {
        format!("{missing} required section(s) missing")
    };
    (mean.round() as u8, description)
}
