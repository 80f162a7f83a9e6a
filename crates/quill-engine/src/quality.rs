//! Heuristic quality gate for candidate completions.
//!
//! Pure and deterministic: the same candidate and context always produce the
//! same verdict. Hard rejections are checked in a fixed order (first match
//! wins); survivors get a 0–100 score built from weighted penalties and
//! bonuses, with 40 as the acceptance floor.

use std::sync::LazyLock;

use regex::Regex;

use quill_core::constants::{QUALITY_MIN_SCORE, REPETITION_MAX_FRACTION, REPETITION_WINDOW};
use quill_core::text::word_count;
use quill_core::{QualityVerdict, RejectReason, WritingContext};

/// Openers that mark boilerplate rather than a continuation.
static BANNED_OPENERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(in conclusion|overall,|it is worth noting|in summary|to summarize|as we can see|needless to say)",
    )
    .expect("banned opener regex")
});

/// Phrases that read as generated filler; each matched pattern costs 15.
static AI_PHRASES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\bcertainly\b",
        r"(?i)\babsolutely\b",
        r"(?i)\bof course\b",
        r"(?i)\bindeed\b",
        r"(?i)\bfascinating\b",
        r"(?i)\bsignificant(ly)?\b",
        r"(?i)\bcomplex issue\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("ai phrase regex"))
    .collect()
});

/// Cliché fillers; each matched pattern costs 25.
static GENERIC_FILLERS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\bplays a crucial role\b",
        r"(?i)\bin today's world\b",
        r"(?i)\bit is important to note\b",
        r"(?i)\bat the end of the day\b",
        r"(?i)\bwhen it comes to\b",
        r"(?i)\ba testament to\b",
        r"(?i)\bdelve into\b",
        r"(?i)\brich tapestry\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("filler regex"))
    .collect()
});

/// Leading punctuation that signals a mid-sentence continuation.
const CONTINUATION_PUNCT: &[char] = &[',', ';', ':', ')', '-', '—', '…'];

/// Validate a candidate completion against the writing context.
///
/// The ladder: empty → too short → banned opener → repetition → scored.
#[must_use]
pub fn validate(candidate: &str, context: &WritingContext) -> QualityVerdict {
    let candidate = candidate.trim();
    if candidate.is_empty() {
        return QualityVerdict::rejected(RejectReason::Empty, 0);
    }

    let words = word_count(candidate);
    if words < 4 {
        return QualityVerdict::rejected(RejectReason::TooShort, 10);
    }

    if BANNED_OPENERS.is_match(candidate) {
        return QualityVerdict::rejected(RejectReason::BannedPhrase, 15);
    }

    if repetition_fraction(candidate, &context.full_context) > REPETITION_MAX_FRACTION {
        return QualityVerdict::rejected(RejectReason::Repetition, 20);
    }

    let score = heuristic_score(candidate, words, context);
    if score < QUALITY_MIN_SCORE {
        QualityVerdict::rejected(RejectReason::LowScore, score)
    } else {
        QualityVerdict::accepted(score)
    }
}

/// Fraction of the candidate's 4-word windows already present in the
/// lowercased document text. Candidates shorter than one window score 0.
fn repetition_fraction(candidate: &str, full_context: &str) -> f64 {
    let lowered = candidate.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    if words.len() < REPETITION_WINDOW {
        return 0.0;
    }
    let haystack = full_context.to_lowercase();
    let windows: Vec<String> = words
        .windows(REPETITION_WINDOW)
        .map(|w| w.join(" "))
        .collect();
    let overlapping = windows.iter().filter(|w| haystack.contains(w.as_str())).count();
    overlapping as f64 / windows.len() as f64
}

/// Weighted 0–100 score for candidates that survived the hard rejections.
fn heuristic_score(candidate: &str, words: usize, context: &WritingContext) -> u8 {
    let mut score: i32 = 100;

    for pattern in AI_PHRASES.iter() {
        if pattern.is_match(candidate) {
            score -= 15;
        }
    }

    // Mid-sentence context: an uppercase start signals a sentence restart
    // rather than a continuation; a lowercase or punctuation start is the
    // shape we want.
    let first = candidate.chars().next().unwrap_or(' ');
    let mid_sentence = !context.active_sentence.is_empty()
        && !context.active_sentence.ends_with(char::is_whitespace);
    if first.is_uppercase() && mid_sentence {
        score -= 20;
    }
    if first.is_lowercase() || CONTINUATION_PUNCT.contains(&first) {
        score += 10;
    }

    if words < 8 {
        score -= 10;
    }
    if words > 50 {
        score -= 25;
    }

    for pattern in GENERIC_FILLERS.iter() {
        if pattern.is_match(candidate) {
            score -= 25;
        }
    }

    score.clamp(0, 100) as u8
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
