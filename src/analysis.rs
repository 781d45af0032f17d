//! Pattern-driven input analysis for skill routing.
//!
//! Pure, single-pass helpers. The executor never calls these itself; step
//! bodies use them to decide what a piece of user input asks for.

use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Rough complexity of a piece of input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Complexity {
    /// Short, plain prose.
    Simple,
    /// Longer or lightly structured input.
    Moderate,
    /// Long input with lists or code.
    Complex,
}

/// Returns the label of the first intent whose patterns match `input`.
///
/// Intents are tried in the order supplied, and within an intent the
/// patterns are tried in order; the first hit wins. Returns `None` when
/// nothing matches.
///
/// # Examples
///
/// ```
/// use kumiko::analysis::detect_intent;
/// use regex::Regex;
///
/// let intents = vec![
///     ("summarize", vec![Regex::new(r"(?i)\bsummar").unwrap()]),
///     ("translate", vec![Regex::new(r"(?i)\btranslate\b").unwrap()]),
/// ];
///
/// assert_eq!(detect_intent("Summarize this report", &intents), Some(&"summarize"));
/// assert_eq!(detect_intent("delete everything", &intents), None);
/// ```
pub fn detect_intent<'a, L>(input: &str, intents: &'a [(L, Vec<Regex>)]) -> Option<&'a L> {
    for (label, patterns) in intents {
        if patterns.iter().any(|pattern| pattern.is_match(input)) {
            return Some(label);
        }
    }
    None
}

/// Extracts entities from `input`, one pattern per entity type.
///
/// For each pattern, every match is collected; a pattern with a capture
/// group contributes group 1, otherwise the whole match. Entity types with
/// no matches are omitted from the result.
pub fn extract_entities<L: Clone + Eq + Hash>(
    input: &str,
    patterns: &[(L, Regex)],
) -> HashMap<L, Vec<String>> {
    let mut entities = HashMap::new();
    for (label, pattern) in patterns {
        let matches: Vec<String> = pattern
            .captures_iter(input)
            .filter_map(|caps| caps.get(1).or_else(|| caps.get(0)))
            .map(|m| m.as_str().to_string())
            .collect();
        if !matches.is_empty() {
            entities.insert(label.clone(), matches);
        }
    }
    entities
}

/// Scores `input` into a [`Complexity`] bucket.
///
/// One point each for: more than 50 words, more than 200 words, more than
/// 5 sentences, list markers, code fences or inline code. 0-1 points is
/// simple, 2-3 moderate, 4+ complex.
///
/// List detection is deliberately conservative: only line-leading `- `
/// bullets, `*`/`•` markers, and `1.`-style numbering count, so hyphens
/// inside prose ("well-known") do not inflate the score.
pub fn assess_complexity(input: &str) -> Complexity {
    let word_count = input.split_whitespace().count();
    let sentence_count = input
        .split(['.', '!', '?'])
        .filter(|part| !part.trim().is_empty())
        .count();
    let has_lists = input.contains(['*', '\u{2022}'])
        || input.lines().any(|line| line.trim_start().starts_with("- "))
        || input
            .as_bytes()
            .windows(2)
            .any(|pair| pair[0].is_ascii_digit() && pair[1] == b'.');
    let has_code = input.contains("```") || input.matches('`').count() >= 2;

    let mut score = 0;
    if word_count > 50 {
        score += 1;
    }
    if word_count > 200 {
        score += 1;
    }
    if sentence_count > 5 {
        score += 1;
    }
    if has_lists {
        score += 1;
    }
    if has_code {
        score += 1;
    }

    match score {
        0..=1 => Complexity::Simple,
        2..=3 => Complexity::Moderate,
        _ => Complexity::Complex,
    }
}

/// Returns the lowercased unique words of `input`, in first-seen order.
///
/// A word is a run of alphanumeric characters or underscores.
pub fn extract_keywords(input: &str) -> Vec<String> {
    let lowered = input.to_lowercase();
    let mut seen = HashSet::new();
    let mut keywords = Vec::new();
    for word in lowered.split(|c: char| !c.is_alphanumeric() && c != '_') {
        if !word.is_empty() && seen.insert(word.to_string()) {
            keywords.push(word.to_string());
        }
    }
    keywords
}

/// Returns `true` if any pattern matches `input`.
pub fn match_any(input: &str, patterns: &[Regex]) -> bool {
    patterns.iter().any(|pattern| pattern.is_match(input))
}

/// Scores how strongly `pattern` matches `input`, from 0.0 to 1.0.
///
/// One tenth per non-overlapping match, capped at 1.0.
pub fn match_confidence(input: &str, pattern: &Regex) -> f64 {
    (pattern.find_iter(input).count() as f64 / 10.0).min(1.0)
}
