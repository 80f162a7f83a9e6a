//! Tuning constants for extraction, scoring, and scheduling.
//!
//! These are the compiled defaults; the debounce delay, acceptance floor,
//! and overlay timings can be overridden through `quill-settings`.

/// Quiet period after the last surface change before a cycle starts.
pub const DEBOUNCE_DELAY_MS: u64 = 500;

/// Minimum chars of text before the caret for extraction to succeed.
pub const MIN_CONTEXT_CHARS: usize = 10;

/// Minimum length of the active sentence for a cycle to proceed.
pub const MIN_ACTIVE_SENTENCE_CHARS: usize = 10;

/// Vertical tolerance when matching the caret to a paragraph's band.
pub const CARET_BAND_TOLERANCE_PX: f64 = 4.0;

/// Paragraphs of full text gathered before the caret's paragraph.
pub const PRECEDING_PARAGRAPHS: usize = 4;

/// Paragraphs retained in `WritingContext::recent_paragraphs`.
pub const RECENT_PARAGRAPHS: usize = 3;

/// Minimum paragraph length to count toward the document summary.
pub const SUMMARY_MIN_PARAGRAPH_CHARS: usize = 30;

/// Maximum length of the document summary, ellipsis included.
pub const SUMMARY_MAX_CHARS: usize = 200;

/// Fallback length of the active sentence when no boundary is found.
pub const SENTENCE_FALLBACK_CHARS: usize = 200;

/// Average words per sentence above which prose reads as academic.
pub const LONG_SENTENCE_WORDS: usize = 20;

/// Window size for the repetition n-gram check.
pub const REPETITION_WINDOW: usize = 4;

/// Fraction of overlapping windows above which a candidate is repetition.
pub const REPETITION_MAX_FRACTION: f64 = 0.4;

/// Minimum score for a candidate to be shown.
pub const QUALITY_MIN_SCORE: u8 = 40;

/// Retries after a quality rejection of the first attempt.
pub const MAX_RETRIES: u32 = 1;

/// Bound on waiting for the fade-out completion signal before the hide is
/// finalized anyway.
pub const FADE_FALLBACK_MS: u64 = 250;

/// Interval of the overlay position-tracking loop (~60 fps).
pub const FRAME_INTERVAL_MS: u64 = 16;
