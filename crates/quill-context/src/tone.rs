//! Tone classification by keyword-lexicon scoring.
//!
//! Five fixed lexicons, one per [`Tone`]. Each occurrence scores ×2 for the
//! academic and formal lexicons, ×1 for the rest. Long average sentence
//! length (> 20 words) adds +2 academic, +1 formal. Highest total wins with
//! a fixed tie-break order; all-zero defaults to [`Tone::Formal`].

use quill_core::Tone;
use quill_core::constants::LONG_SENTENCE_WORDS;

const ACADEMIC_TERMS: &[&str] = &[
    "hypothesis",
    "methodology",
    "analysis",
    "empirical",
    "literature",
    "furthermore",
    "moreover",
    "thus",
    "correlation",
    "variable",
    "findings",
    "study",
    "research",
    "theoretical",
    "dataset",
];

const FORMAL_TERMS: &[&str] = &[
    "regarding",
    "therefore",
    "accordingly",
    "pursuant",
    "hereby",
    "request",
    "sincerely",
    "respectfully",
    "notwithstanding",
    "shall",
    "concerning",
    "kindly",
];

const PERSUASIVE_TERMS: &[&str] = &[
    "should",
    "must",
    "clearly",
    "crucial",
    "essential",
    "imperative",
    "urge",
    "believe",
    "argue",
    "undoubtedly",
    "compelling",
];

const CASUAL_TERMS: &[&str] = &[
    "gonna",
    "kinda",
    "sorta",
    "stuff",
    "really",
    "pretty",
    "cool",
    "awesome",
    "honestly",
    "basically",
    "btw",
    "yeah",
];

const NARRATIVE_TERMS: &[&str] = &[
    "suddenly",
    "whispered",
    "glanced",
    "remembered",
    "morning",
    "night",
    "walked",
    "stared",
    "felt",
    "moment",
    "silence",
    "breath",
];

/// Tie-break order: earlier entries win equal scores.
const TONE_ORDER: [Tone; 5] = [
    Tone::Academic,
    Tone::Formal,
    Tone::Persuasive,
    Tone::Casual,
    Tone::Narrative,
];

/// Classify the stylistic register of `text`.
#[must_use]
pub fn classify(text: &str) -> Tone {
    let lower = text.to_lowercase();

    let mut academic = 2 * lexicon_hits(&lower, ACADEMIC_TERMS);
    let mut formal = 2 * lexicon_hits(&lower, FORMAL_TERMS);
    let persuasive = lexicon_hits(&lower, PERSUASIVE_TERMS);
    let casual = lexicon_hits(&lower, CASUAL_TERMS);
    let narrative = lexicon_hits(&lower, NARRATIVE_TERMS);

    if average_sentence_words(text) > LONG_SENTENCE_WORDS as f64 {
        academic += 2;
        formal += 1;
    }

    let scores = [academic, formal, persuasive, casual, narrative];
    if scores.iter().all(|&s| s == 0) {
        return Tone::Formal;
    }

    let mut best = TONE_ORDER[0];
    let mut best_score = scores[0];
    for (tone, score) in TONE_ORDER.into_iter().zip(scores).skip(1) {
        if score > best_score {
            best = tone;
            best_score = score;
        }
    }
    best
}

/// Total occurrences of lexicon terms in `haystack` (already lowercased).
///
/// Matches are bounded by non-alphanumeric characters so "unlikely" does not
/// count as "like".
fn lexicon_hits(haystack: &str, terms: &[&str]) -> u32 {
    terms
        .iter()
        .map(|term| count_word_occurrences(haystack, term))
        .sum()
}

fn count_word_occurrences(haystack: &str, needle: &str) -> u32 {
    let mut count = 0;
    let mut search_from = 0;
    while let Some(pos) = haystack[search_from..].find(needle) {
        let start = search_from + pos;
        let end = start + needle.len();
        let left_ok = start == 0
            || !haystack[..start]
                .chars()
                .next_back()
                .is_some_and(char::is_alphanumeric);
        let right_ok = end == haystack.len()
            || !haystack[end..].chars().next().is_some_and(char::is_alphanumeric);
        if left_ok && right_ok {
            count += 1;
        }
        search_from = end;
    }
    count
}

/// Average words per sentence, splitting on sentence-terminal punctuation.
fn average_sentence_words(text: &str) -> f64 {
    let sentences: Vec<&str> = text
        .split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if sentences.is_empty() {
        return 0.0;
    }
    let total_words: usize = sentences
        .iter()
        .map(|s| s.split_whitespace().count())
        .sum();
    total_words as f64 / sentences.len() as f64
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
