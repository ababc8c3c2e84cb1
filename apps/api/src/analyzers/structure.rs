use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::{AnalysisInput, ContentAnalyzer};
use crate::lexicon::SectionConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructureFinding {
    pub missing_required: Vec<String>,
    pub present_optional: Vec<String>,
    pub duplicated_sections: Vec<String>,
    pub is_logical_order: bool,
    pub has_experience: bool,
    pub has_projects: bool,
    pub structure_score: f64,
    pub recommendations: Vec<String>,
    /// Advice on the experience/projects pairing specifically.
    pub experience_recommendations: Vec<String>,
}

pub struct StructureAnalyzer {
    required: Vec<String>,
    optional: Vec<String>,
    order: HashMap<String, usize>,
    display: HashMap<String, String>,
}

impl StructureAnalyzer {
    pub fn new(config: &SectionConfig) -> Self {
        Self {
            required: config.required.clone(),
            optional: config.optional.clone(),
            order: config
                .logical_order
                .iter()
                .enumerate()
                .map(|(i, s)| (s.clone(), i))
                .collect(),
            display: config
                .known
                .iter()
                .map(|s| (s.name.clone(), s.display_name.clone()))
                .collect(),
        }
    }

    fn display<'a>(&'a self, name: &'a str) -> &'a str {
        self.display.get(name).map_or(name, String::as_str)
    }
}

impl ContentAnalyzer for StructureAnalyzer {
    type Finding = StructureFinding;

    fn analyze(&self, input: &AnalysisInput<'_>) -> StructureFinding {
        let report = input.sections;
        let missing_required: Vec<String> = self
            .required
            .iter()
            .filter(|s| !report.has(s))
            .cloned()
            .collect();
        let present_optional: Vec<String> = self
            .optional
            .iter()
            .filter(|s| report.has(s))
            .cloned()
            .collect();

        let mut header_counts: BTreeMap<&str, usize> = BTreeMap::new();
        for header in &report.headers {
            *header_counts.entry(header.section.as_str()).or_default() += 1;
        }
        let duplicated_sections: Vec<String> = header_counts
            .iter()
            .filter(|(_, n)| **n > 1)
            .map(|(s, _)| s.to_string())
            .collect();

        // Positions of each section's first header, in document order.
        let mut seen = Vec::new();
        for header in &report.headers {
            if !seen.contains(&header.section.as_str()) {
                seen.push(header.section.as_str());
            }
        }
        let ranks: Vec<usize> = seen.iter().filter_map(|s| self.order.get(*s).copied()).collect();
        let is_logical_order = ranks.windows(2).all(|w| w[0] <= w[1]);

        let has_experience = report.has("experience");
        let has_projects = report.has("projects");

        let score = 100.0
            - 20.0 * missing_required.len() as f64
            - 10.0 * duplicated_sections.len() as f64
            - if is_logical_order { 0.0 } else { 15.0 };

        let mut recommendations = Vec::new();
        if !missing_required.is_empty() {
            let names: Vec<&str> = missing_required.iter().map(|s| self.display(s)).collect();
            recommendations.push(format!("Add missing sections: {}", names.join(", ")));
        }
        for dup in &duplicated_sections {
            recommendations.push(format!(
                "Merge the repeated {} headers into one section",
                self.display(dup)
            ));
        }
        if !is_logical_order {
            recommendations.push(
                "Order sections conventionally: contact, summary, experience, education, skills"
                    .to_string(),
            );
        }

        let experience_recommendations = match (has_experience, has_projects) {
            (false, false) => vec![
                "Add a Work Experience or Projects section that shows what you have done"
                    .to_string(),
            ],
            (false, true) => vec![
                "Add work experience; internships, freelance and volunteer roles count".to_string(),
            ],
            (true, false) => vec![
                "Add a Projects section to show hands-on work beyond your job duties".to_string(),
            ],
            (true, true) => Vec::new(),
        };

        StructureFinding {
            missing_required,
            present_optional,
            duplicated_sections,
            is_logical_order,
            has_experience,
            has_projects,
            structure_score: score.max(0.0),
            recommendations,
            experience_recommendations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::test_support::run;
    use crate::lexicon::EngineConfig;

    fn analyzer() -> StructureAnalyzer {
        StructureAnalyzer::new(&EngineConfig::default().sections)
    }

    #[test]
    fn test_complete_ordered_resume() {
        let f = run(
            &analyzer(),
            "Contact: a@b.com\nExperience\n- Built X\nEducation\nBSc\nSkills: Rust\nProjects\n- Y",
        );
        assert!(f.missing_required.is_empty());
        assert_eq!(f.present_optional, ["projects"]);
        assert!(f.is_logical_order);
        assert!(f.experience_recommendations.is_empty());
        assert_eq!(f.structure_score, 100.0);
    }

    #[test]
    fn test_penalties_combine() {
        // missing education (-20), skills twice (-10), skills before experience (-15)
        let f = run(&analyzer(), "a@b.com\nSkills: Rust\nExperience\n- Built X\nSkills: Go");
        assert_eq!(f.missing_required, ["education"]);
        assert_eq!(f.duplicated_sections, ["skills"]);
        assert!(!f.is_logical_order);
        assert_eq!(f.structure_score, 55.0);
    }

    #[test]
    fn test_experience_without_projects() {
        let f = run(&analyzer(), "Experience\n- Built X");
        assert!(f.has_experience && !f.has_projects);
        assert_eq!(f.experience_recommendations.len(), 1);
    }
}
