//! Content analyzers: independent heuristic passes over one resume.
//!
//! Every analyzer is a pure function of the text, the section report and (for keywords) the
//! optional job description. None reads another's output except formatting, which is handed the
//! date-consistency result it would otherwise recompute.

pub mod action_verbs;
pub mod buzzwords;
pub mod chronology;
pub mod dates;
pub mod formatting;
pub mod impact;
pub mod keywords;
pub mod quantification;
pub mod readability;
pub mod skills;
pub mod structure;
pub mod summary;
pub mod tone;
pub mod unnecessary;
pub mod writing;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::lexicon::{ConfigError, EngineConfig};
use crate::sections::SectionReport;
use crate::text::{Bullet, ResumeText};

use action_verbs::{ActionVerbAnalyzer, ActionVerbFinding};
use buzzwords::{BuzzwordAnalyzer, BuzzwordFinding};
use chronology::{ChronologyAnalyzer, ChronologyFinding};
use dates::{DateConsistencyAnalyzer, DateConsistencyFinding};
use formatting::{FormattingAnalyzer, FormattingFinding};
use impact::{ImpactAnalyzer, ImpactFinding};
use keywords::{KeywordAnalyzer, KeywordFinding};
use quantification::{QuantificationAnalyzer, QuantificationFinding};
use readability::{ReadabilityAnalyzer, ReadabilityFinding};
use skills::{SkillsAnalyzer, SkillsFinding};
use structure::{StructureAnalyzer, StructureFinding};
use summary::{SummaryAnalyzer, SummaryFinding};
use tone::{ToneAnalyzer, ToneFinding};
use unnecessary::{UnnecessarySectionsAnalyzer, UnnecessarySectionsFinding};
use writing::{WritingFinding, WritingQualityAnalyzer};

// ────────────────────────────────────────────────────────────────────────────
// Analyzer seam
// ────────────────────────────────────────────────────────────────────────────

/// What every analyzer gets to look at.
#[derive(Clone, Copy)]
pub struct AnalysisInput<'a> {
    pub text: &'a ResumeText,
    pub sections: &'a SectionReport,
    pub job_description: Option<&'a str>,
}

impl AnalysisInput<'_> {
    pub fn bullets(&self) -> &[Bullet] {
        self.text.bullets(self.sections)
    }
}

/// A single heuristic pass. Infallible: odd input degrades to a low or zero finding.
pub trait ContentAnalyzer: Send + Sync {
    type Finding: Default;

    fn analyze(&self, input: &AnalysisInput<'_>) -> Self::Finding;
}

// ────────────────────────────────────────────────────────────────────────────
// Findings
// ────────────────────────────────────────────────────────────────────────────

/// Output of every analyzer for one run. Always the full schema; a gated run carries defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Findings {
    pub structure: StructureFinding,
    pub writing_quality: WritingFinding,
    pub tone: ToneFinding,
    pub action_verbs: ActionVerbFinding,
    pub quantification: QuantificationFinding,
    pub impact_metrics: ImpactFinding,
    pub skills: SkillsFinding,
    pub chronology: ChronologyFinding,
    pub date_consistency: DateConsistencyFinding,
    pub buzzwords: BuzzwordFinding,
    pub summary: SummaryFinding,
    pub unnecessary_sections: UnnecessarySectionsFinding,
    pub formatting: FormattingFinding,
    pub readability: ReadabilityFinding,
    pub keywords: KeywordFinding,
}

// ────────────────────────────────────────────────────────────────────────────
// Analyzer set
// ────────────────────────────────────────────────────────────────────────────

/// Every analyzer, built once from the engine config and shared across requests.
pub struct AnalyzerSet {
    structure: StructureAnalyzer,
    writing: WritingQualityAnalyzer,
    tone: ToneAnalyzer,
    action_verbs: ActionVerbAnalyzer,
    quantification: QuantificationAnalyzer,
    impact: ImpactAnalyzer,
    skills: SkillsAnalyzer,
    chronology: ChronologyAnalyzer,
    dates: DateConsistencyAnalyzer,
    buzzwords: BuzzwordAnalyzer,
    summary: SummaryAnalyzer,
    unnecessary: UnnecessarySectionsAnalyzer,
    formatting: FormattingAnalyzer,
    readability: ReadabilityAnalyzer,
    keywords: KeywordAnalyzer,
}

impl AnalyzerSet {
    pub fn new(config: &EngineConfig) -> Result<Self, ConfigError> {
        let lexicons = &config.lexicons;
        let limits = &config.display;
        let scoring = &config.scoring;
        let dates = DateConsistencyAnalyzer::new(limits);

        Ok(Self {
            structure: StructureAnalyzer::new(&config.sections),
            writing: WritingQualityAnalyzer::new(lexicons)?,
            tone: ToneAnalyzer::new(lexicons)?,
            action_verbs: ActionVerbAnalyzer::new(lexicons, limits)?,
            quantification: QuantificationAnalyzer::new(
                lexicons,
                scoring.quantification_threshold,
                limits,
            )?,
            impact: ImpactAnalyzer::new(lexicons, limits)?,
            skills: SkillsAnalyzer::new(lexicons)?,
            chronology: ChronologyAnalyzer::new(lexicons, limits)?,
            formatting: FormattingAnalyzer::new(dates.clone()),
            dates,
            buzzwords: BuzzwordAnalyzer::new(lexicons, &scoring.buzzword_penalties)?,
            summary: SummaryAnalyzer::new(lexicons, &scoring.summary_words)?,
            unnecessary: UnnecessarySectionsAnalyzer::new(lexicons)?,
            readability: ReadabilityAnalyzer,
            keywords: KeywordAnalyzer::new(lexicons, limits)?,
        })
    }

    /// Runs every analyzer. Order does not matter; each call is independent.
    pub fn run(&self, input: &AnalysisInput<'_>) -> Findings {
        let date_consistency = self.dates.analyze(input);
        let formatting = self.formatting.check(input, &date_consistency);

        Findings {
            structure: self.structure.analyze(input),
            writing_quality: self.writing.analyze(input),
            tone: self.tone.analyze(input),
            action_verbs: self.action_verbs.analyze(input),
            quantification: self.quantification.analyze(input),
            impact_metrics: self.impact.analyze(input),
            skills: self.skills.analyze(input),
            chronology: self.chronology.analyze(input),
            date_consistency,
            buzzwords: self.buzzwords.analyze(input),
            summary: self.summary.analyze(input),
            unnecessary_sections: self.unnecessary.analyze(input),
            formatting,
            readability: self.readability.analyze(input),
            keywords: self.keywords.analyze(input),
        }
    }
}

/// Drops repeated entries, keeping the first occurrence of each.
pub(crate) fn dedup_in_order(items: &mut Vec<String>) {
    let mut seen = HashSet::new();
    items.retain(|item| seen.insert(item.clone()));
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::{AnalysisInput, ContentAnalyzer};
    use crate::lexicon::EngineConfig;
    use crate::sections::SectionDetector;
    use crate::text::ResumeText;

    pub fn run<A: ContentAnalyzer>(analyzer: &A, text: &str) -> A::Finding {
        analyze(analyzer, text, None)
    }

    pub fn run_with_job<A: ContentAnalyzer>(analyzer: &A, text: &str, job: &str) -> A::Finding {
        analyze(analyzer, text, Some(job))
    }

    fn analyze<A: ContentAnalyzer>(analyzer: &A, text: &str, job: Option<&str>) -> A::Finding {
        let config = EngineConfig::default();
        let detector = SectionDetector::new(&config.sections).unwrap();
        let text = ResumeText::new(text);
        let sections = detector.detect(&text);
        analyzer.analyze(&AnalysisInput {
            text: &text,
            sections: &sections,
            job_description: job,
        })
    }
}
