use regex::{Regex, RegexBuilder};

use super::ConfigError;

/// Compiles a case-insensitive pattern, tagging failures with where the pattern came from.
pub(crate) fn compile_pattern(pattern: &str, context: &str) -> Result<Regex, ConfigError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| ConfigError::InvalidPattern {
            context: context.to_string(),
            source,
        })
}

/// Word-bounded regex for a literal phrase. A boundary is only required on a side
/// that ends in a word character, so "c++" and "age:" still match.
fn phrase_pattern(phrase: &str) -> String {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let mut pattern = String::new();
    if phrase.chars().next().is_some_and(is_word) {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&regex::escape(phrase));
    if phrase.chars().last().is_some_and(is_word) {
        pattern.push_str(r"\b");
    }
    pattern
}

/// A lexicon compiled to one word-bounded, case-insensitive regex per phrase.
#[derive(Debug, Clone)]
pub struct PhraseMatcher {
    entries: Vec<(String, Regex)>,
}

impl PhraseMatcher {
    pub fn new<S: AsRef<str>>(phrases: &[S], context: &str) -> Result<Self, ConfigError> {
        let mut entries = Vec::with_capacity(phrases.len());
        for phrase in phrases {
            let phrase = phrase.as_ref().trim().to_lowercase();
            if phrase.is_empty() {
                continue;
            }
            let regex = compile_pattern(&phrase_pattern(&phrase), context)?;
            entries.push((phrase, regex));
        }
        if entries.is_empty() {
            return Err(ConfigError::InvalidRule(format!(
                "{context} has no usable phrases"
            )));
        }
        Ok(Self { entries })
    }

    /// Phrases present in `text`, in lexicon order, each reported once.
    pub fn found_in(&self, text: &str) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, re)| re.is_match(text))
            .map(|(phrase, _)| phrase.clone())
            .collect()
    }

    pub fn matches(&self, text: &str) -> bool {
        self.entries.iter().any(|(_, re)| re.is_match(text))
    }

    /// Every occurrence of every phrase, as `(phrase, start, end)`.
    pub fn occurrences<'a>(&'a self, text: &'a str) -> impl Iterator<Item = (&'a str, usize, usize)> + 'a {
        self.entries.iter().flat_map(move |(phrase, re)| {
            re.find_iter(text)
                .map(move |m| (phrase.as_str(), m.start(), m.end()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_boundaries_respected() {
        let m = PhraseMatcher::new(&["java"], "test").unwrap();
        assert!(m.matches("Java and SQL"));
        assert!(!m.matches("javascript"), "substring must not match");
    }

    #[test]
    fn test_symbol_terminated_phrases() {
        let m = PhraseMatcher::new(&["c++", "age:"], "test").unwrap();
        assert_eq!(m.found_in("Skills: C++ | Age: 32"), vec!["c++", "age:"]);
    }

    #[test]
    fn test_found_in_keeps_lexicon_order() {
        let m = PhraseMatcher::new(&["rust", "python"], "test").unwrap();
        assert_eq!(m.found_in("python then rust"), vec!["rust", "python"]);
    }

    #[test]
    fn test_occurrences_counts_repeats() {
        let m = PhraseMatcher::new(&["synergy"], "test").unwrap();
        assert_eq!(m.occurrences("Synergy, more synergy").count(), 2);
    }

    #[test]
    fn test_bad_pattern_reports_context() {
        let err = compile_pattern("(unclosed", "buzzword_patterns").unwrap_err();
        assert!(err.to_string().contains("buzzword_patterns"));
    }
}
