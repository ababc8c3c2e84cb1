use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{AnalysisInput, ContentAnalyzer};

static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+(?:\s|$)|\n").expect("static regex"));

const LONG_SENTENCE_WORDS: usize = 25;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingEase {
    VeryEasy,
    Easy,
    FairlyEasy,
    #[default]
    Standard,
    FairlyDifficult,
    Difficult,
    VeryDifficult,
}

impl ReadingEase {
    fn from_flesch(score: f64) -> Self {
        match score {
            s if s >= 90.0 => ReadingEase::VeryEasy,
            s if s >= 80.0 => ReadingEase::Easy,
            s if s >= 70.0 => ReadingEase::FairlyEasy,
            s if s >= 60.0 => ReadingEase::Standard,
            s if s >= 50.0 => ReadingEase::FairlyDifficult,
            s if s >= 30.0 => ReadingEase::Difficult,
            _ => ReadingEase::VeryDifficult,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadabilityFinding {
    pub flesch_reading_ease: f64,
    pub flesch_kincaid_grade: f64,
    pub reading_ease: ReadingEase,
    pub letter_grade: String,
    pub sentence_count: usize,
    pub word_count: usize,
    pub avg_sentence_length: f64,
    pub long_sentences: usize,
    pub avg_bullet_length: f64,
    pub recommendations: Vec<String>,
}

/// Vowel groups, minus a silent trailing "e", at least one.
pub fn syllables(word: &str) -> usize {
    let letters: Vec<char> = word
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect();
    if letters.is_empty() {
        return 0;
    }
    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
    let mut count = 0;
    let mut prev_vowel = false;
    for &c in &letters {
        let vowel = is_vowel(c);
        if vowel && !prev_vowel {
            count += 1;
        }
        prev_vowel = vowel;
    }
    let n = letters.len();
    let silent_e = n > 2 && letters[n - 1] == 'e' && letters[n - 2] != 'l' && !is_vowel(letters[n - 2]);
    if silent_e && count > 1 {
        count -= 1;
    }
    count.max(1)
}

fn letter_grade(flesch: f64) -> &'static str {
    match flesch {
        s if s >= 90.0 => "A",
        s if s >= 80.0 => "B",
        s if s >= 70.0 => "C",
        s if s >= 60.0 => "D",
        _ => "F",
    }
}

pub struct ReadabilityAnalyzer;

impl ContentAnalyzer for ReadabilityAnalyzer {
    type Finding = ReadabilityFinding;

    fn analyze(&self, input: &AnalysisInput<'_>) -> ReadabilityFinding {
        let sentences: Vec<Vec<&str>> = SENTENCE_BREAK
            .split(input.text.raw())
            .map(|s| {
                s.split_whitespace()
                    .filter(|w| w.chars().any(char::is_alphabetic))
                    .collect::<Vec<_>>()
            })
            .filter(|words| !words.is_empty())
            .collect();

        let sentence_count = sentences.len();
        let word_count: usize = sentences.iter().map(Vec::len).sum();
        let syllable_count: usize = sentences.iter().flatten().map(|w| syllables(w)).sum();
        let long_sentences = sentences
            .iter()
            .filter(|s| s.len() > LONG_SENTENCE_WORDS)
            .count();

        let (flesch, grade, avg_sentence) = if word_count == 0 {
            (50.0, 0.0, 0.0)
        } else {
            let wps = word_count as f64 / sentence_count as f64;
            let spw = syllable_count as f64 / word_count as f64;
            (
                (206.835 - 1.015 * wps - 84.6 * spw).clamp(0.0, 100.0),
                (0.39 * wps + 11.8 * spw - 15.59).max(0.0),
                wps,
            )
        };

        let bullets = input.bullets();
        let avg_bullet_length = if bullets.is_empty() {
            0.0
        } else {
            bullets
                .iter()
                .map(|b| b.text.split_whitespace().count())
                .sum::<usize>() as f64
                / bullets.len() as f64
        };

        let mut recommendations = Vec::new();
        if flesch < 30.0 {
            recommendations.push(
                "Simplify wording: use shorter sentences and plainer words where you can"
                    .to_string(),
            );
        }
        if avg_sentence > 20.0 {
            recommendations.push(format!(
                "Shorten sentences: they average {avg_sentence:.0} words, aim for under 20"
            ));
        }
        if long_sentences > 0 {
            recommendations.push(format!(
                "Split {long_sentences} sentence(s) longer than {LONG_SENTENCE_WORDS} words"
            ));
        }
        if avg_bullet_length > 30.0 {
            recommendations.push("Keep bullet points to one or two lines".to_string());
        }

        ReadabilityFinding {
            flesch_reading_ease: flesch,
            flesch_kincaid_grade: grade,
            reading_ease: ReadingEase::from_flesch(flesch),
            letter_grade: letter_grade(flesch).to_string(),
            sentence_count,
            word_count,
            avg_sentence_length: avg_sentence,
            long_sentences,
            avg_bullet_length,
            recommendations,
        }
    }
}
