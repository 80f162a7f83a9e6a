//! Geometry-based writing-context extraction.
//!
//! Walks the snapshot's layout tree to find the caret's paragraph and line,
//! reconstructs the text consumed up to the caret, and isolates the active
//! sentence fragment. The caret-to-character mapping on the straddled span
//! is a pixel-ratio approximation, accurate to about one character.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use quill_core::constants::{
    CARET_BAND_TOLERANCE_PX, MIN_CONTEXT_CHARS, PRECEDING_PARAGRAPHS, RECENT_PARAGRAPHS,
    SENTENCE_FALLBACK_CHARS, SUMMARY_MAX_CHARS, SUMMARY_MIN_PARAGRAPH_CHARS,
};
use quill_core::text::{cap_with_ellipsis, tail_chars, truncate_chars};
use quill_core::WritingContext;
use quill_surface::geometry::Rect;
use quill_surface::snapshot::{join_wrapped, LineLayout, ParagraphLayout, SurfaceSnapshot};

use crate::tone;

/// `.`/`!`/`?` followed by whitespace, or a hard newline.
static SENTENCE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s|\n").expect("sentence boundary regex"));

/// Extract a [`WritingContext`] from the snapshot.
///
/// Returns `None` when the caret is not locatable, the surface has no
/// paragraph text, the text before the caret is shorter than 10 chars, or
/// the caret sits immediately after a sentence boundary (no active
/// fragment).
#[must_use]
pub fn extract(snapshot: &SurfaceSnapshot) -> Option<WritingContext> {
    let caret = snapshot.caret?;
    if snapshot.paragraphs.is_empty() {
        return None;
    }

    let caret_index = caret_paragraph_index(snapshot, &caret);

    // Full text of up to 4 preceding paragraphs, then the caret paragraph
    // up to the caret itself.
    let window_start = caret_index.saturating_sub(PRECEDING_PARAGRAPHS);
    let mut pieces: Vec<String> = snapshot.paragraphs[window_start..caret_index]
        .iter()
        .map(ParagraphLayout::text)
        .filter(|text| !text.is_empty())
        .collect();
    let partial = partial_paragraph_text(&snapshot.paragraphs[caret_index], &caret);
    if !partial.is_empty() {
        pieces.push(partial);
    }

    let full_context = pieces.join("\n\n");
    if full_context.chars().count() < MIN_CONTEXT_CHARS {
        trace!(
            chars = full_context.chars().count(),
            "context before caret too short, skipping extraction"
        );
        return None;
    }

    let active_sentence = isolate_active_sentence(&full_context)?;
    let recent_start = pieces.len().saturating_sub(RECENT_PARAGRAPHS);
    let recent_paragraphs = pieces[recent_start..].to_vec();
    let document_summary = summarize(&snapshot.paragraphs);
    let detected_tone = tone::classify(&full_context);

    Some(WritingContext {
        active_sentence,
        recent_paragraphs,
        document_summary,
        detected_tone,
        full_context,
    })
}

/// Index of the paragraph whose vertical band contains the caret, within
/// tolerance; the last paragraph when the caret is below all content.
fn caret_paragraph_index(snapshot: &SurfaceSnapshot, caret: &Rect) -> usize {
    let caret_y = caret.mid_y();
    snapshot
        .paragraphs
        .iter()
        .position(|p| p.rect.contains_y(caret_y, CARET_BAND_TOLERANCE_PX))
        .unwrap_or(snapshot.paragraphs.len() - 1)
}

/// Text of the caret's paragraph up to the caret position.
///
/// Lines entirely above the caret's line are taken in full; the caret's own
/// line is cut at the caret's horizontal position.
fn partial_paragraph_text(paragraph: &ParagraphLayout, caret: &Rect) -> String {
    let caret_y = caret.mid_y();
    let caret_line = paragraph
        .lines
        .iter()
        .position(|l| l.rect.contains_y(caret_y, CARET_BAND_TOLERANCE_PX));

    let mut fragments = Vec::new();
    match caret_line {
        Some(line_index) => {
            for line in &paragraph.lines[..line_index] {
                fragments.push(line.text());
            }
            fragments.push(caret_line_text(&paragraph.lines[line_index], caret.x));
        }
        None => {
            // Caret below this paragraph (fallback selection): whole lines
            // above the caret count.
            for line in &paragraph.lines {
                if line.rect.bottom() <= caret_y + CARET_BAND_TOLERANCE_PX {
                    fragments.push(line.text());
                }
            }
        }
    }
    join_wrapped(fragments)
}

/// Sub-spans of the caret line, walked left to right.
///
/// Spans ending at or before the caret are taken whole; the span straddling
/// the caret is truncated by the fractional pixel ratio, rounded to the
/// nearest character; everything after is dropped.
fn caret_line_text(line: &LineLayout, caret_x: f64) -> String {
    let mut out = String::new();
    for span in &line.spans {
        if span.rect.right() <= caret_x {
            out.push_str(&span.text);
            continue;
        }
        if span.rect.x < caret_x {
            let ratio = if span.rect.width > 0.0 {
                ((caret_x - span.rect.x) / span.rect.width).clamp(0.0, 1.0)
            } else {
                1.0
            };
            let keep = (ratio * span.text.chars().count() as f64).round() as usize;
            out.push_str(truncate_chars(&span.text, keep));
        }
        break;
    }
    out
}

/// The incomplete sentence ending at the caret.
///
/// Text after the last sentence-terminal boundary; when the document has no
/// boundary at all, the trailing 200 chars. `None` when the caret sits
/// directly on a boundary (empty fragment).
fn isolate_active_sentence(full_context: &str) -> Option<String> {
    let fragment = match SENTENCE_BOUNDARY
        .find_iter(full_context)
        .last()
        .map(|m| m.end())
    {
        Some(boundary_end) => &full_context[boundary_end..],
        None => tail_chars(full_context, SENTENCE_FALLBACK_CHARS),
    };
    let fragment = fragment.trim_start();
    if fragment.is_empty() {
        None
    } else {
        Some(fragment.to_owned())
    }
}

/// Topic signal: the first two paragraphs longer than 30 chars, capped at
/// 200 chars with an ellipsis when truncated.
fn summarize(paragraphs: &[ParagraphLayout]) -> String {
    let substantive: Vec<String> = paragraphs
        .iter()
        .map(ParagraphLayout::text)
        .filter(|text| text.chars().count() > SUMMARY_MIN_PARAGRAPH_CHARS)
        .take(2)
        .collect();
    cap_with_ellipsis(&substantive.join(" "), SUMMARY_MAX_CHARS)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
