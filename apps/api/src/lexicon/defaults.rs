//! Built-in tables behind `EngineConfig::default()`.

use crate::models::analysis::CategoryScores;

use super::{
    Buzzword, BuzzwordPenalties, BuzzwordSeverity, CategoryWeights, Component, DisplayLimits,
    EngineConfig, GradeBands, ImpactPattern, IssueSeverity, LanguageQualityRule, Lexicons,
    MetricType, OutdatedSection, ScoringConfig, SectionConfig, SectionSpec, SkillGroup, TierSpec,
    VerbCategory, WeakVerb, WeightedComponent, WordBand,
};

fn list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub(super) fn engine_config() -> EngineConfig {
    EngineConfig {
        sections: sections(),
        lexicons: lexicons(),
        scoring: scoring(),
        display: DisplayLimits {
            max_examples: 3,
            max_date_examples: 5,
            max_per_criterion: 4,
            max_chronology_issues: 10,
        },
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

fn section(
    name: &str,
    display_name: &str,
    patterns: &[&str],
    headers: &[&str],
    missing_advice: &str,
) -> SectionSpec {
    SectionSpec {
        name: name.to_string(),
        display_name: display_name.to_string(),
        patterns: list(patterns),
        headers: list(headers),
        missing_advice: missing_advice.to_string(),
    }
}

fn sections() -> SectionConfig {
    SectionConfig {
        known: vec![
            section(
                "contact",
                "Contact Information",
                &[
                    r"\bcontact\b",
                    r"\bpersonal information\b",
                    r"\b(?:email|e-mail|phone|tel|mobile|address)\s*:",
                    r"\b(?:linkedin|github)\.com\b",
                ],
                &["contact", "contact information", "contact details", "personal information"],
                "Add contact information at the top: at minimum a professional email address and a phone number.",
            ),
            section(
                "summary",
                "Professional Summary",
                &[r"\bsummary\b", r"\bobjective\b", r"\bprofile\b", r"\babout me\b", r"\boverview\b"],
                &[
                    "summary",
                    "professional summary",
                    "career summary",
                    "objective",
                    "career objective",
                    "professional objective",
                    "profile",
                    "professional profile",
                    "about me",
                    "overview",
                ],
                "Add a short professional summary that names your focus area and strongest skills.",
            ),
            section(
                "experience",
                "Work Experience",
                &[
                    r"\bexperience\b",
                    r"\bemployment\b",
                    r"\bwork history\b",
                    r"\bcareer history\b",
                ],
                &[
                    "experience",
                    "work experience",
                    "professional experience",
                    "relevant experience",
                    "employment",
                    "employment history",
                    "work history",
                    "career history",
                ],
                "Add a Work Experience section listing your roles with dates and achievement-focused bullet points.",
            ),
            section(
                "education",
                "Education",
                &[
                    r"\beducation\b",
                    r"\bacademic\b",
                    r"\bqualifications\b",
                    r"\b(?:university|college|institute)\b",
                    r"\b(?:bachelor|master)'?s?\s+(?:of|degree|in)\b",
                    r"\b(?:b\.?sc|m\.?sc|ph\.?d|mba|diploma)\b",
                    r"\bgraduated\b",
                ],
                &[
                    "education",
                    "academic background",
                    "academic qualifications",
                    "education and training",
                ],
                "Add an Education section with your degree, institution and graduation year.",
            ),
            section(
                "skills",
                "Skills",
                &[
                    r"\bskills?\b",
                    r"\bcompetencies\b",
                    r"\btechnologies\b",
                    r"\bprogramming languages?\b",
                    r"\btech stack\b",
                ],
                &[
                    "skills",
                    "technical skills",
                    "core competencies",
                    "competencies",
                    "key skills",
                    "skills summary",
                    "technologies",
                    "tech stack",
                ],
                "Add a Skills section listing the technical and soft skills that match your target role.",
            ),
            section(
                "projects",
                "Projects",
                &[r"\bprojects\b", r"\bportfolio\b"],
                &["projects", "personal projects", "selected projects", "portfolio", "project"],
                "Add a Projects section that shows what you built and the result.",
            ),
            section(
                "certifications",
                "Certifications",
                &[r"\bcertifications?\b", r"\bcertificates?\b", r"\bcredentials\b", r"\blicenses\b"],
                &["certifications", "certificates", "credentials", "licenses", "licenses and certifications"],
                "List relevant certifications with the issuing body and year.",
            ),
            section(
                "languages",
                "Languages",
                &[r"\blanguages\b", r"\blanguage skills\b"],
                &["languages", "language skills", "spoken languages"],
                "List the languages you speak and your proficiency level.",
            ),
            section(
                "awards",
                "Awards",
                &[r"\bawards?\b", r"\bhonors\b", r"\bachievements\b", r"\brecognition\b"],
                &["awards", "honors", "honors and awards", "achievements", "recognition"],
                "List awards with the year and what they recognized.",
            ),
        ],
        critical: list(&["experience", "skills", "contact"]),
        required: list(&["contact", "experience", "education", "skills"]),
        optional: list(&["projects", "certifications", "languages", "awards"]),
        logical_order: list(&[
            "contact",
            "summary",
            "experience",
            "education",
            "skills",
            "projects",
            "certifications",
            "languages",
            "awards",
        ]),
        experience_like: list(&["experience", "projects"]),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Lexicons
// ────────────────────────────────────────────────────────────────────────────

fn verbs(category: &str, items: &[&str]) -> VerbCategory {
    VerbCategory {
        category: category.to_string(),
        verbs: list(items),
    }
}

fn weak(verb: &str, suggestions: &[&str]) -> WeakVerb {
    WeakVerb {
        verb: verb.to_string(),
        suggestions: list(suggestions),
    }
}

fn buzz(severity: BuzzwordSeverity, phrases: &[&str]) -> Vec<Buzzword> {
    let suggestions: &[&str] = match severity {
        BuzzwordSeverity::Critical => &[
            "Replace with a specific technical skill or certification",
            "Describe the result you delivered instead",
        ],
        BuzzwordSeverity::High => &[
            "Show the trait through an achievement with a number",
            "Replace with the outcome that proves it",
        ],
        _ => &["Replace with a concrete example or metric"],
    };
    phrases
        .iter()
        .map(|p| Buzzword {
            phrase: p.to_string(),
            severity,
            suggestions: list(suggestions),
        })
        .collect()
}

fn skills(category: &str, items: &[&str]) -> SkillGroup {
    SkillGroup {
        category: category.to_string(),
        skills: list(items),
    }
}

fn impact(metric: MetricType, pattern: &str) -> ImpactPattern {
    ImpactPattern {
        metric,
        pattern: pattern.to_string(),
    }
}

fn lexicons() -> Lexicons {
    let mut buzzwords = buzz(
        BuzzwordSeverity::Critical,
        &[
            "guru",
            "ninja",
            "rockstar",
            "rock star",
            "superhero",
            "wizard",
            "thought leader",
            "visionary",
            "game-changer",
            "disruptor",
            "revolutionary",
            "cutting-edge",
            "bleeding-edge",
            "world-class",
            "best-in-class",
            "top-notch",
        ],
    );
    buzzwords.extend(buzz(
        BuzzwordSeverity::High,
        &[
            "highly motivated",
            "self-motivated",
            "self motivated",
            "motivated",
            "results-driven",
            "results driven",
            "results oriented",
            "goal-oriented",
            "goal oriented",
            "detail-oriented",
            "detail oriented",
            "self-starter",
            "go-getter",
            "team player",
            "team-oriented",
            "people person",
            "hard worker",
            "fast learner",
            "quick learner",
            "proactive",
            "dynamic",
        ],
    ));
    buzzwords.extend(buzz(
        BuzzwordSeverity::Medium,
        &[
            "innovative",
            "creative",
            "passionate",
            "dedicated",
            "reliable",
            "flexible",
            "adaptable",
            "versatile",
            "hands-on",
            "customer-focused",
            "client-focused",
            "solution-oriented",
            "problem solver",
            "multitasker",
            "excellent communication",
            "strong communication",
            "great communication",
        ],
    ));
    buzzwords.extend(buzz(
        BuzzwordSeverity::Low,
        &[
            "synergy",
            "leverage",
            "utilize",
            "seamlessly",
            "holistic",
            "value-added",
            "turnkey",
            "paradigm shift",
            "think outside the box",
            "low-hanging fruit",
            "move the needle",
        ],
    ));

    Lexicons {
        strong_verbs: vec![
            verbs(
                "leadership",
                &[
                    "led", "managed", "directed", "supervised", "coordinated", "oversaw", "guided",
                    "mentored", "headed", "chaired", "orchestrated", "facilitated", "delegated",
                    "coached",
                ],
            ),
            verbs(
                "achievement",
                &[
                    "achieved", "accomplished", "exceeded", "delivered", "completed", "attained",
                    "surpassed", "earned", "secured", "won",
                ],
            ),
            verbs(
                "development",
                &[
                    "developed", "created", "built", "designed", "implemented", "engineered",
                    "constructed", "launched", "deployed", "prototyped", "pioneered", "established",
                    "architected",
                ],
            ),
            verbs(
                "improvement",
                &[
                    "improved", "enhanced", "optimized", "streamlined", "increased", "reduced",
                    "minimized", "boosted", "accelerated", "upgraded", "refined", "simplified",
                    "automated",
                ],
            ),
            verbs(
                "analysis",
                &[
                    "analyzed", "evaluated", "assessed", "researched", "investigated", "examined",
                    "studied", "audited", "diagnosed", "modeled", "forecasted",
                ],
            ),
        ],
        weak_verbs: vec![
            weak("responsible for", &["Led", "Managed", "Owned", "Directed"]),
            weak("responsible", &["Led", "Managed", "Owned"]),
            weak("worked on", &["Developed", "Built", "Delivered"]),
            weak("worked", &["Developed", "Executed", "Delivered"]),
            weak("helped", &["Enabled", "Supported", "Drove"]),
            weak("assisted", &["Supported", "Contributed to", "Partnered on"]),
            weak("participated", &["Contributed to", "Collaborated on", "Drove"]),
            weak("involved", &["Contributed to", "Spearheaded", "Executed"]),
            weak("handled", &["Managed", "Resolved", "Processed"]),
            weak("dealt", &["Resolved", "Negotiated", "Addressed"]),
            weak("did", &["Executed", "Completed", "Performed"]),
            weak("made", &["Built", "Created", "Produced"]),
            weak("tried", &["Tested", "Piloted", "Evaluated"]),
        ],
        informal_words: list(&[
            "awesome", "cool", "stuff", "things", "lots", "tons", "loads", "super", "really",
            "very", "gonna", "kinda",
        ]),
        vague_phrases: list(&[
            "responsible for",
            "worked on",
            "dealt with",
            "helped with",
            "involved in",
            "participated in",
            "duties included",
            "in charge of",
        ]),
        emotional_words: list(&[
            "amazing",
            "incredible",
            "fantastic",
            "terrible",
            "awful",
            "hate",
            "love",
        ]),
        confidence_words: list(&[
            "achieved",
            "accomplished",
            "delivered",
            "exceeded",
            "successful",
            "successfully",
        ]),
        task_indicators: list(&[
            "responsible for",
            "duties included",
            "tasked with",
            "worked on",
            "helped with",
            "involved in",
            "participated in",
            "assisted with",
            "in charge of",
        ]),
        vague_scale_words: list(&[
            "significant",
            "major",
            "large",
            "huge",
            "massive",
            "substantial",
            "considerable",
            "many",
            "numerous",
            "various",
            "several",
        ]),
        buzzwords,
        buzzword_patterns: list(&[
            r"\b(?:highly|extremely|very)\s+(?:skilled|experienced|qualified)\b",
            r"\b(?:excellent|outstanding|exceptional|superior)\s+(?:communication|leadership|problem.solving)\s+skills?\b",
            r"\b(?:proven|demonstrated)\s+(?:track record|ability|experience|background)\b",
            r"\bstrong\s+(?:track record|background)\b",
        ]),
        generic_summary_phrases: list(&[
            "seeking opportunities",
            "seeking a position",
            "looking for",
            "hard worker",
            "team player",
            "results driven",
            "detail oriented",
            "fast learner",
            "motivated individual",
            "excellent communication skills",
            "problem solver",
            "self starter",
        ]),
        summary_focus_terms: list(&[
            "engineering",
            "development",
            "marketing",
            "sales",
            "finance",
            "design",
            "operations",
            "product",
            "data",
            "security",
            "analytics",
            "infrastructure",
            "machine learning",
            "backend",
            "frontend",
            "full-stack",
        ]),
        technical_skills: vec![
            skills(
                "programming",
                &[
                    "python", "java", "javascript", "typescript", "c++", "c#", "php", "ruby",
                    "golang", "rust", "swift", "kotlin", "scala",
                ],
            ),
            skills(
                "web_technologies",
                &[
                    "html", "css", "react", "angular", "vue", "node.js", "express", "django",
                    "flask", "graphql",
                ],
            ),
            skills(
                "databases",
                &["sql", "mysql", "postgresql", "mongodb", "redis", "oracle", "sqlite"],
            ),
            skills(
                "cloud_platforms",
                &["aws", "azure", "gcp", "docker", "kubernetes", "terraform"],
            ),
            skills(
                "tools",
                &["git", "jenkins", "jira", "confluence", "figma", "photoshop", "excel", "tableau"],
            ),
        ],
        soft_skills: list(&[
            "leadership",
            "communication",
            "teamwork",
            "problem solving",
            "analytical thinking",
            "project management",
            "time management",
            "adaptability",
            "creativity",
            "negotiation",
            "collaboration",
            "mentoring",
        ]),
        outdated_skills: list(&[
            "internet explorer",
            "flash",
            "silverlight",
            "windows 95",
            "windows xp",
            "ms-dos",
            "frontpage",
        ]),
        skill_category_labels: list(&[
            "programming",
            "languages",
            "frameworks",
            "tools",
            "databases",
            "cloud",
            "technical",
            "soft skills",
        ]),
        outdated_sections: vec![
            OutdatedSection {
                kind: "references".to_string(),
                label: "references".to_string(),
                headers: list(&["references", "professional references", "referees"]),
                phrases: list(&[
                    "references available upon request",
                    "available upon request",
                    "provided upon request",
                    "furnished upon request",
                ]),
                severity: IssueSeverity::Medium,
                description: "References section is outdated; employers ask for references directly when needed.".to_string(),
                recommendation: "Remove the references section. Employers request references during the interview process.".to_string(),
            },
            OutdatedSection {
                kind: "objective".to_string(),
                label: "objective".to_string(),
                headers: list(&["objective", "career objective", "professional objective"]),
                phrases: list(&["my objective is", "seeking a position"]),
                severity: IssueSeverity::Medium,
                description: "Objective sections are considered outdated.".to_string(),
                recommendation: "Replace the objective with a professional summary that highlights your skills and experience.".to_string(),
            },
            OutdatedSection {
                kind: "personal_info".to_string(),
                label: "personal information".to_string(),
                headers: list(&["personal details", "personal data"]),
                phrases: list(&[
                    "date of birth",
                    "age:",
                    "marital status",
                    "religion:",
                    "nationality:",
                    "gender:",
                ]),
                severity: IssueSeverity::High,
                description: "Personal information is unnecessary and can invite bias.".to_string(),
                recommendation: "Remove personal information such as age, marital status, religion or photos.".to_string(),
            },
            OutdatedSection {
                kind: "hobbies_interests".to_string(),
                label: "hobbies or interests".to_string(),
                headers: list(&["hobbies", "interests", "personal interests", "hobbies and interests"]),
                phrases: list(&["my hobbies include", "in my free time"]),
                severity: IssueSeverity::Low,
                description: "Hobbies and interests sections are rarely relevant to the role.".to_string(),
                recommendation: "Remove hobbies and interests unless they relate to the job or show leadership.".to_string(),
            },
            OutdatedSection {
                kind: "salary_expectations".to_string(),
                label: "salary".to_string(),
                headers: list(&["salary", "salary expectations", "compensation", "expected salary"]),
                phrases: list(&["expected salary", "salary expectations", "salary range", "desired salary"]),
                severity: IssueSeverity::High,
                description: "Salary information does not belong on a resume.".to_string(),
                recommendation: "Remove salary information and discuss compensation during interviews.".to_string(),
            },
        ],
        impact_patterns: vec![
            impact(MetricType::Percentage, r"\d+(?:\.\d+)?\s?%"),
            impact(MetricType::Currency, r"[$€£]\s?\d[\d,]*(?:\.\d+)?\s?[kmb]?\b"),
            impact(
                MetricType::Headcount,
                r"\b(?:team|group|staff) of \d+|\b(?:led|managed|mentored|supervised|hired) \d+",
            ),
            impact(
                MetricType::Time,
                r"\b(?:saved|reduced|decreased|cut)\b.*?\d+\s*(?:hours?|days?|weeks?|months?|minutes?)\b",
            ),
            impact(
                MetricType::Count,
                r"\b\d+\+?\s*(?:customers?|clients?|users?|projects?|accounts?|campaigns?|initiatives?)\b",
            ),
            impact(MetricType::Scale, r"\b\d+(?:\.\d+)?[kmb]\b|\b\d{1,3}(?:,\d{3})+\b"),
        ],
        concurrent_markers: list(&[
            "concurrent",
            "concurrently",
            "part-time",
            "part time",
            "freelance",
            "volunteer",
            "contract",
            "simultaneously",
        ]),
        job_title_indicators: list(&[
            "engineer",
            "developer",
            "manager",
            "analyst",
            "designer",
            "consultant",
            "specialist",
            "coordinator",
            "director",
            "intern",
        ]),
        degree_terms: list(&[
            "phd",
            "doctorate",
            "master's",
            "masters",
            "mba",
            "bachelor's",
            "bachelors",
            "associate",
            "diploma",
        ]),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Scoring
// ────────────────────────────────────────────────────────────────────────────

fn weighted(items: &[(Component, f64)]) -> Vec<WeightedComponent> {
    items
        .iter()
        .map(|&(component, weight)| WeightedComponent { component, weight })
        .collect()
}

fn tier(min_score: u8, label: &str, color: &str, advice: &str) -> TierSpec {
    TierSpec {
        min_score,
        label: label.to_string(),
        color: color.to_string(),
        advice: advice.to_string(),
    }
}

fn scoring() -> ScoringConfig {
    ScoringConfig {
        budgets: CategoryScores {
            ats_compatibility: 25.0,
            content_quality: 35.0,
            keyword_optimization: 20.0,
            structure: 15.0,
            language_quality: 5.0,
        },
        weights: CategoryWeights {
            ats_compatibility: weighted(&[
                (Component::Formatting, 1.0),
                (Component::Readability, 1.0),
                (Component::BuzzwordDensity, 1.0),
                (Component::RequiredSections, 1.0),
            ]),
            content_quality: weighted(&[
                (Component::Quantification, 0.30),
                (Component::ActionVerbs, 0.25),
                (Component::ImpactDiversity, 0.15),
                (Component::Summary, 0.15),
                (Component::BuzzwordScore, 0.15),
            ]),
            keyword_optimization: weighted(&[
                (Component::Skills, 0.5),
                (Component::KeywordCoverage, 0.5),
                (Component::JobMatch, 0.5),
            ]),
            structure: weighted(&[
                (Component::StructureScore, 0.4),
                (Component::Dates, 0.2),
                (Component::Chronology, 0.2),
                (Component::Modernization, 0.2),
            ]),
        },
        language_quality: LanguageQualityRule {
            base: 5.0,
            per_issue: 0.2,
            max_penalty: 2.0,
            floor: 3.0,
        },
        bands: GradeBands {
            quantification: vec![f64::EPSILON, 15.0, 30.0, 50.0, 70.0],
            percent: vec![20.0, 40.0, 60.0, 80.0, 100.0],
            impact_types: vec![1.0, 2.0, 3.0, 4.0, 5.0],
        },
        tiers: vec![
            tier(
                0,
                "Incomplete Resume",
                "gray",
                "Critical sections are missing. Add them before anything else.",
            ),
            tier(
                1,
                "Needs Improvement",
                "red",
                "Focus on quantified achievements, strong action verbs and a complete skills section.",
            ),
            tier(
                40,
                "Fair",
                "orange",
                "A solid base. Add metrics to more bullets and tighten the wording.",
            ),
            tier(
                60,
                "Good",
                "blue",
                "Well structured. Tailor keywords to each job and sharpen your impact statements.",
            ),
            tier(
                80,
                "Excellent",
                "green",
                "Strong resume. Keep it current and tailor it for each application.",
            ),
        ],
        buzzword_penalties: BuzzwordPenalties {
            critical: 15.0,
            high: 10.0,
            medium: 6.0,
            low: 3.0,
            pattern: 8.0,
        },
        quantification_threshold: 30.0,
        summary_words: WordBand { min: 30, max: 60 },
    }
}
