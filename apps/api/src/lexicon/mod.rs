//! Engine configuration: every lexicon, threshold table and point budget the pipeline reads.
//!
//! All of it is plain data: `EngineConfig::default()` carries the built-in tables and a JSON file
//! with the same shape can replace them at startup. `validate()` runs before an engine is built,
//! so a broken table fails fast instead of producing plausible-looking scores.

mod defaults;
mod matcher;

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::analysis::CategoryScores;

pub use matcher::PhraseMatcher;
pub(crate) use matcher::compile_pattern;

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

/// Configuration errors. Only raised while building an engine, never per request.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read engine config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed engine config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Lexicon '{0}' is empty")]
    EmptyLexicon(&'static str),

    #[error("Invalid pattern in {context}: {source}")]
    InvalidPattern {
        context: String,
        #[source]
        source: regex::Error,
    },

    #[error("Unknown section '{name}' referenced by {list}")]
    UnknownSection { name: String, list: &'static str },

    #[error("Duplicate section '{0}'")]
    DuplicateSection(String),

    #[error("Category budgets must sum to 100, got {0}")]
    BudgetSum(f64),

    #[error("Invalid band table '{0}': expected five ascending thresholds")]
    InvalidBands(&'static str),

    #[error("Invalid tier table: {0}")]
    InvalidTiers(String),

    #[error("Invalid scoring rule: {0}")]
    InvalidRule(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Top-level config
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub sections: SectionConfig,
    pub lexicons: Lexicons,
    pub scoring: ScoringConfig,
    pub display: DisplayLimits,
}

impl Default for EngineConfig {
    fn default() -> Self {
        defaults::engine_config()
    }
}

impl EngineConfig {
    /// Loads a complete config from a JSON file. Every field is required.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Structural checks that do not need compiled patterns.
    /// Pattern syntax is checked when the analyzers compile them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sections.validate()?;
        self.lexicons.validate()?;
        self.scoring.validate()?;
        let display = &self.display;
        if display.max_examples == 0
            || display.max_per_criterion == 0
            || display.max_chronology_issues == 0
        {
            return Err(ConfigError::InvalidRule(
                "display limits must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

/// A known resume section: detection patterns plus exact header aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionSpec {
    pub name: String,
    pub display_name: String,
    /// Regex alternatives; a match anywhere in the text marks the section found.
    pub patterns: Vec<String>,
    /// Lowercase header aliases, matched against whole (short) lines.
    pub headers: Vec<String>,
    /// Shown when the section is critical and missing.
    pub missing_advice: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionConfig {
    pub known: Vec<SectionSpec>,
    pub critical: Vec<String>,
    pub required: Vec<String>,
    pub optional: Vec<String>,
    pub logical_order: Vec<String>,
    /// Sections whose body lines count as bullets even without a marker.
    pub experience_like: Vec<String>,
}

impl SectionConfig {
    pub fn spec(&self, name: &str) -> Option<&SectionSpec> {
        self.known.iter().find(|s| s.name == name)
    }

    pub fn display_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.spec(name).map(|s| s.display_name.as_str()).unwrap_or(name)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.known.is_empty() {
            return Err(ConfigError::EmptyLexicon("sections.known"));
        }
        if self.critical.is_empty() {
            return Err(ConfigError::EmptyLexicon("sections.critical"));
        }
        let mut names = BTreeSet::new();
        for spec in &self.known {
            if !names.insert(spec.name.as_str()) {
                return Err(ConfigError::DuplicateSection(spec.name.clone()));
            }
            if spec.patterns.is_empty() {
                return Err(ConfigError::EmptyLexicon("sections.known[].patterns"));
            }
        }
        let lists: [(&'static str, &Vec<String>); 5] = [
            ("sections.critical", &self.critical),
            ("sections.required", &self.required),
            ("sections.optional", &self.optional),
            ("sections.logical_order", &self.logical_order),
            ("sections.experience_like", &self.experience_like),
        ];
        for (list, members) in lists {
            if let Some(name) = members.iter().find(|n| !names.contains(n.as_str())) {
                return Err(ConfigError::UnknownSection {
                    name: name.clone(),
                    list,
                });
            }
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Lexicons
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerbCategory {
    pub category: String,
    pub verbs: Vec<String>,
}

/// A weak opener ("responsible for", "helped") and the verbs to use instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeakVerb {
    pub verb: String,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuzzwordSeverity {
    Critical,
    High,
    Medium,
    Low,
    /// Pattern-based hit (e.g. "proven track record").
    Pattern,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Buzzword {
    pub phrase: String,
    pub severity: BuzzwordSeverity,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub category: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    High,
    Medium,
    Low,
}

impl IssueSeverity {
    pub fn weight(self) -> u32 {
        match self {
            IssueSeverity::High => 3,
            IssueSeverity::Medium => 2,
            IssueSeverity::Low => 1,
        }
    }
}

/// An outdated section kind: matched by header alias or by a phrase anywhere in the text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutdatedSection {
    pub kind: String,
    pub label: String,
    pub headers: Vec<String>,
    pub phrases: Vec<String>,
    pub severity: IssueSeverity,
    pub description: String,
    pub recommendation: String,
}

/// The impact-metric taxonomy. Order is the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricType {
    Percentage,
    Currency,
    Headcount,
    Time,
    Count,
    Scale,
}

impl MetricType {
    pub const ALL: [MetricType; 6] = [
        MetricType::Percentage,
        MetricType::Currency,
        MetricType::Headcount,
        MetricType::Time,
        MetricType::Count,
        MetricType::Scale,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MetricType::Percentage => "percentages",
            MetricType::Currency => "dollar amounts",
            MetricType::Headcount => "team sizes",
            MetricType::Time => "time saved",
            MetricType::Count => "customer or project counts",
            MetricType::Scale => "scale figures",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactPattern {
    pub metric: MetricType,
    pub pattern: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lexicons {
    pub strong_verbs: Vec<VerbCategory>,
    pub weak_verbs: Vec<WeakVerb>,
    pub informal_words: Vec<String>,
    pub vague_phrases: Vec<String>,
    pub emotional_words: Vec<String>,
    /// Outcome words that read as confident ("achieved", "delivered").
    pub confidence_words: Vec<String>,
    /// Task-focused openers that signal a bullet describes duties, not results.
    pub task_indicators: Vec<String>,
    /// Scale words that promise a number without giving one ("significant", "many").
    pub vague_scale_words: Vec<String>,
    pub buzzwords: Vec<Buzzword>,
    pub buzzword_patterns: Vec<String>,
    pub generic_summary_phrases: Vec<String>,
    /// Domain words that count as "specific" in a summary besides technical skills.
    pub summary_focus_terms: Vec<String>,
    pub technical_skills: Vec<SkillGroup>,
    pub soft_skills: Vec<String>,
    pub outdated_skills: Vec<String>,
    pub skill_category_labels: Vec<String>,
    pub outdated_sections: Vec<OutdatedSection>,
    pub impact_patterns: Vec<ImpactPattern>,
    /// Markers that excuse an overlapping date range ("concurrent", "part-time").
    pub concurrent_markers: Vec<String>,
    pub job_title_indicators: Vec<String>,
    pub degree_terms: Vec<String>,
}

impl Lexicons {
    pub fn all_technical_skills(&self) -> Vec<&str> {
        self.technical_skills
            .iter()
            .flat_map(|g| g.skills.iter().map(String::as_str))
            .collect()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let lists: [(&'static str, bool); 21] = [
            ("strong_verbs", self.strong_verbs.is_empty()),
            ("weak_verbs", self.weak_verbs.is_empty()),
            ("informal_words", self.informal_words.is_empty()),
            ("vague_phrases", self.vague_phrases.is_empty()),
            ("emotional_words", self.emotional_words.is_empty()),
            ("confidence_words", self.confidence_words.is_empty()),
            ("task_indicators", self.task_indicators.is_empty()),
            ("vague_scale_words", self.vague_scale_words.is_empty()),
            ("buzzwords", self.buzzwords.is_empty()),
            ("buzzword_patterns", self.buzzword_patterns.is_empty()),
            ("generic_summary_phrases", self.generic_summary_phrases.is_empty()),
            ("summary_focus_terms", self.summary_focus_terms.is_empty()),
            ("technical_skills", self.technical_skills.is_empty()),
            ("soft_skills", self.soft_skills.is_empty()),
            ("outdated_skills", self.outdated_skills.is_empty()),
            ("skill_category_labels", self.skill_category_labels.is_empty()),
            ("outdated_sections", self.outdated_sections.is_empty()),
            ("impact_patterns", self.impact_patterns.is_empty()),
            ("concurrent_markers", self.concurrent_markers.is_empty()),
            ("job_title_indicators", self.job_title_indicators.is_empty()),
            ("degree_terms", self.degree_terms.is_empty()),
        ];
        if let Some((name, _)) = lists.iter().find(|(_, empty)| *empty) {
            return Err(ConfigError::EmptyLexicon(name));
        }
        if self.strong_verbs.iter().any(|c| c.verbs.is_empty()) {
            return Err(ConfigError::EmptyLexicon("strong_verbs[].verbs"));
        }
        if self.technical_skills.iter().any(|g| g.skills.is_empty()) {
            return Err(ConfigError::EmptyLexicon("technical_skills[].skills"));
        }
        if self
            .buzzwords
            .iter()
            .any(|b| b.severity == BuzzwordSeverity::Pattern)
        {
            return Err(ConfigError::InvalidRule(
                "lexicon buzzwords cannot use the 'pattern' severity".to_string(),
            ));
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Scoring
// ────────────────────────────────────────────────────────────────────────────

/// A 0–100 input to a category score, read from the findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    Formatting,
    Readability,
    BuzzwordDensity,
    RequiredSections,
    Quantification,
    ActionVerbs,
    ImpactDiversity,
    Summary,
    BuzzwordScore,
    Skills,
    KeywordCoverage,
    /// Only present when a job description was supplied.
    JobMatch,
    StructureScore,
    Dates,
    Chronology,
    Modernization,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedComponent {
    pub component: Component,
    pub weight: f64,
}

/// Component weights for the four weighted categories. Language quality uses its own rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryWeights {
    pub ats_compatibility: Vec<WeightedComponent>,
    pub content_quality: Vec<WeightedComponent>,
    pub keyword_optimization: Vec<WeightedComponent>,
    pub structure: Vec<WeightedComponent>,
}

/// `max(floor, base − min(max_penalty, issues × per_issue))`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageQualityRule {
    pub base: f64,
    pub per_issue: f64,
    pub max_penalty: f64,
    pub floor: f64,
}

/// Five ascending thresholds; a grade is the number of thresholds met.
pub type BandTable = Vec<f64>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeBands {
    pub quantification: BandTable,
    pub percent: BandTable,
    pub impact_types: BandTable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierSpec {
    /// Inclusive lower bound.
    pub min_score: u8,
    pub label: String,
    pub color: String,
    pub advice: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuzzwordPenalties {
    pub critical: f64,
    pub high: f64,
    pub medium: f64,
    pub low: f64,
    pub pattern: f64,
}

impl BuzzwordPenalties {
    pub fn for_severity(&self, severity: BuzzwordSeverity) -> f64 {
        match severity {
            BuzzwordSeverity::Critical => self.critical,
            BuzzwordSeverity::High => self.high,
            BuzzwordSeverity::Medium => self.medium,
            BuzzwordSeverity::Low => self.low,
            BuzzwordSeverity::Pattern => self.pattern,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordBand {
    pub min: usize,
    pub max: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub budgets: CategoryScores,
    pub weights: CategoryWeights,
    pub language_quality: LanguageQualityRule,
    pub bands: GradeBands,
    pub tiers: Vec<TierSpec>,
    pub buzzword_penalties: BuzzwordPenalties,
    /// Quantified-bullet percentage that `meets_threshold`.
    pub quantification_threshold: f64,
    pub summary_words: WordBand,
}

impl ScoringConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let budgets = &self.budgets;
        let all = [
            budgets.ats_compatibility,
            budgets.content_quality,
            budgets.keyword_optimization,
            budgets.structure,
            budgets.language_quality,
        ];
        let sum = budgets.total();
        if all.iter().any(|b| *b < 0.0) || (sum - 100.0).abs() > 1e-9 {
            return Err(ConfigError::BudgetSum(sum));
        }

        let weighted = [
            ("ats_compatibility", &self.weights.ats_compatibility),
            ("content_quality", &self.weights.content_quality),
            ("keyword_optimization", &self.weights.keyword_optimization),
            ("structure", &self.weights.structure),
        ];
        for (name, components) in weighted {
            let positive = components.iter().any(|c| c.weight > 0.0);
            if !positive || components.iter().any(|c| c.weight < 0.0) {
                return Err(ConfigError::InvalidRule(format!(
                    "category '{name}' needs non-negative weights with a positive total"
                )));
            }
        }

        let rule = &self.language_quality;
        if rule.base > budgets.language_quality
            || rule.floor > rule.base
            || rule.floor < 0.0
            || rule.per_issue < 0.0
            || rule.max_penalty < 0.0
        {
            return Err(ConfigError::InvalidRule(
                "language quality rule must satisfy 0 <= floor <= base <= budget".to_string(),
            ));
        }

        check_bands("quantification", &self.bands.quantification)?;
        check_bands("percent", &self.bands.percent)?;
        check_bands("impact_types", &self.bands.impact_types)?;

        match self.tiers.first() {
            None => return Err(ConfigError::InvalidTiers("no tiers".to_string())),
            Some(first) if first.min_score != 0 => {
                return Err(ConfigError::InvalidTiers(
                    "the first tier must start at 0".to_string(),
                ))
            }
            _ => {}
        }
        if self.tiers.windows(2).any(|w| w[0].min_score >= w[1].min_score) {
            return Err(ConfigError::InvalidTiers(
                "tier lower bounds must be strictly ascending".to_string(),
            ));
        }
        if self.tiers.iter().any(|t| t.min_score > 100) {
            return Err(ConfigError::InvalidTiers(
                "tier lower bounds must be within 0..=100".to_string(),
            ));
        }

        if !(0.0..=100.0).contains(&self.quantification_threshold) {
            return Err(ConfigError::InvalidRule(
                "quantification_threshold must be a percentage".to_string(),
            ));
        }
        if self.summary_words.min > self.summary_words.max {
            return Err(ConfigError::InvalidRule(
                "summary_words.min must not exceed summary_words.max".to_string(),
            ));
        }
        Ok(())
    }
}

fn check_bands(name: &'static str, table: &[f64]) -> Result<(), ConfigError> {
    let ascending = table.windows(2).all(|w| w[0] < w[1]);
    if table.len() != 5 || !ascending || table.iter().any(|t| !t.is_finite()) {
        return Err(ConfigError::InvalidBands(name));
    }
    Ok(())
}

/// Display economy: how many examples and messages survive truncation (first-N).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayLimits {
    pub max_examples: usize,
    pub max_date_examples: usize,
    pub max_per_criterion: usize,
    /// Chronology issues listed in the result. Every issue still counts toward the score.
    pub max_chronology_issues: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        EngineConfig::default()
            .validate()
            .expect("built-in tables must validate");
    }

    #[test]
    fn test_default_budgets_sum_to_100() {
        let config = EngineConfig::default();
        assert!((config.scoring.budgets.total() - 100.0).abs() < f64::EPSILON);
        assert_eq!(config.scoring.budgets.content_quality, 35.0);
        assert_eq!(config.scoring.budgets.language_quality, 5.0);
    }

    #[test]
    fn test_default_config_survives_json() {
        let config = EngineConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let loaded = EngineConfig::from_json_str(&json).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_lexicon_is_a_parse_error() {
        let mut value = serde_json::to_value(EngineConfig::default()).unwrap();
        value["lexicons"]
            .as_object_mut()
            .unwrap()
            .remove("buzzwords");
        let err = EngineConfig::from_json_str(&value.to_string()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "got {err:?}");
    }

    #[test]
    fn test_writing_quality_is_not_a_weighted_component() {
        let mut value = serde_json::to_value(EngineConfig::default()).unwrap();
        value["scoring"]["weights"]["structure"]
            .as_array_mut()
            .unwrap()
            .push(serde_json::json!({ "component": "writing_quality", "weight": 1.0 }));
        let err = EngineConfig::from_json_str(&value.to_string()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "got {err:?}");
    }

    #[test]
    fn test_empty_lexicon_rejected() {
        let mut config = EngineConfig::default();
        config.lexicons.soft_skills.clear();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::EmptyLexicon("soft_skills")));
    }

    #[test]
    fn test_budgets_must_sum_to_100() {
        let mut config = EngineConfig::default();
        config.scoring.budgets.structure = 20.0;
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::BudgetSum(_)
        ));
    }

    #[test]
    fn test_unknown_critical_section_rejected() {
        let mut config = EngineConfig::default();
        config.sections.critical.push("hobbies".to_string());
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::UnknownSection { .. }
        ));
    }

    #[test]
    fn test_descending_bands_rejected() {
        let mut config = EngineConfig::default();
        config.scoring.bands.percent = vec![80.0, 60.0, 40.0, 20.0, 0.0];
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::InvalidBands("percent")
        ));
    }

    #[test]
    fn test_tiers_must_start_at_zero() {
        let mut config = EngineConfig::default();
        config.scoring.tiers.remove(0);
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::InvalidTiers(_)
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = EngineConfig::from_json_file("/nonexistent/engine.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
