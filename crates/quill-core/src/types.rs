//! Shared vocabulary types for the suggestion engine.
//!
//! These types cross crate boundaries: the context extractor produces a
//! [`WritingContext`], the prompt builder and quality filter consume it, and
//! the pipeline threads [`QualityVerdict`]s through its retry decision.

use serde::{Deserialize, Serialize};

/// Coarse stylistic register detected from the text around the caret.
///
/// Used to pick tone guidance in the system prompt. Classification is a
/// keyword heuristic, so this is a steering signal, not ground truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Scholarly prose: hedged claims, citations, methodology talk.
    Academic,
    /// Business or official register. The default when nothing else wins.
    Formal,
    /// Argumentative writing pushing the reader toward a position.
    Persuasive,
    /// Conversational, contraction-heavy prose.
    Casual,
    /// Storytelling: scene, sensory detail, sequence of events.
    Narrative,
}

impl Tone {
    /// Stable lowercase name, matching the serialized form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Academic => "academic",
            Self::Formal => "formal",
            Self::Persuasive => "persuasive",
            Self::Casual => "casual",
            Self::Narrative => "narrative",
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured writing context extracted once per trigger cycle.
///
/// Immutable after extraction; discarded when the cycle ends. Invariants
/// upheld by the extractor:
///
/// - `active_sentence` is non-empty and is a suffix-derived substring of
///   `full_context`
/// - `recent_paragraphs` holds up to 3 non-empty paragraphs ending at (and
///   including) the caret's paragraph
/// - `document_summary` is at most 200 chars
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WritingContext {
    /// The incomplete sentence fragment ending exactly at the caret.
    pub active_sentence: String,
    /// Up to 3 paragraphs ending at the caret's paragraph, oldest first.
    pub recent_paragraphs: Vec<String>,
    /// Topic signal: the first 1–2 substantive paragraphs, ≤ 200 chars.
    pub document_summary: String,
    /// Detected stylistic register.
    pub detected_tone: Tone,
    /// All text consumed up to the caret. Used only for repetition checks.
    pub full_context: String,
}

impl WritingContext {
    /// Recent paragraphs excluding the caret's own (the last entry).
    ///
    /// The prompt builder sends these as history; the active paragraph is
    /// already represented by `active_sentence`.
    #[must_use]
    pub fn history_paragraphs(&self) -> &[String] {
        match self.recent_paragraphs.split_last() {
            Some((_, rest)) => rest,
            None => &[],
        }
    }
}

/// Why a candidate was rejected, or [`RejectReason::Ok`] when it passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Candidate passed the quality gate.
    Ok,
    /// Blank or whitespace-only candidate.
    Empty,
    /// Fewer than 4 words.
    TooShort,
    /// Opens with a banned phrase ("in conclusion", …).
    BannedPhrase,
    /// Too many 4-gram windows already present in the document.
    Repetition,
    /// Survived the hard rejections but scored below the acceptance floor.
    LowScore,
}

impl RejectReason {
    /// Stable snake_case name, used for metrics labels and logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Empty => "empty",
            Self::TooShort => "too_short",
            Self::BannedPhrase => "banned_phrase",
            Self::Repetition => "repetition",
            Self::LowScore => "low_score",
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of scoring one candidate completion against its context.
///
/// Computed per candidate, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityVerdict {
    /// Whether the candidate may be shown to the user.
    pub valid: bool,
    /// Heuristic quality score in `0..=100`.
    pub score: u8,
    /// First matching rung of the rejection ladder, or `Ok`.
    pub reason: RejectReason,
}

impl QualityVerdict {
    /// A rejection with the fixed score assigned to its ladder rung.
    #[must_use]
    pub fn rejected(reason: RejectReason, score: u8) -> Self {
        Self {
            valid: false,
            score,
            reason,
        }
    }

    /// An accepted candidate with its computed score.
    #[must_use]
    pub fn accepted(score: u8) -> Self {
        Self {
            valid: true,
            score,
            reason: RejectReason::Ok,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
