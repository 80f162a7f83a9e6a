//! Prompt construction for the completion service.
//!
//! The system prompt carries the fixed continuation rules plus tone
//! guidance; the user prompt assembles the extracted writing context. Both
//! are plain strings — the wire format belongs to the service behind the
//! [`quill_llm::CompletionService`] trait.

use quill_core::{QualityVerdict, Tone, WritingContext};

/// Summary shorter than this carries no topic signal and is omitted.
const SUMMARY_SIGNAL_MIN_CHARS: usize = 20;

const CORE_INSTRUCTIONS: &str = "\
You are an inline writing assistant. Continue the writer's text from exactly \
where it stops. Respond with the continuation only: no preamble, no quotation \
marks, no commentary, no restating of the writer's words. Keep it short — a \
clause or at most one sentence.";

const ANTI_PATTERNS: &str = "\
Never open with stock phrases such as: \"In conclusion\", \"Overall\", \
\"It is worth noting\", \"In summary\", \"To summarize\", \"As we can see\", \
\"Needless to say\". Avoid hedging filler, generic transitions, and \
enthusiastic adjectives that add no content.";

const EMPTY_ALLOWED: &str = "\
If no natural continuation exists, respond with an empty string instead of \
forcing one.";

/// Canned guidance for each tone.
#[must_use]
pub fn tone_guidance(tone: Tone) -> &'static str {
    match tone {
        Tone::Academic => {
            "Match an academic register: precise terminology, measured claims, no rhetorical flourish."
        }
        Tone::Formal => {
            "Match a formal register: complete clauses, neutral vocabulary, no contractions."
        }
        Tone::Persuasive => {
            "Match a persuasive register: concrete reasons and direct assertions, without hollow emphasis."
        }
        Tone::Casual => {
            "Match a casual register: relaxed phrasing and contractions are fine, stay natural."
        }
        Tone::Narrative => {
            "Match a narrative register: stay in scene, concrete detail over summary."
        }
    }
}

/// Build the system prompt for the given tone.
#[must_use]
pub fn system_prompt(tone: Tone) -> String {
    format!(
        "{CORE_INSTRUCTIONS}\n\n{}\n\n{ANTI_PATTERNS}\n\n{EMPTY_ALLOWED}",
        tone_guidance(tone)
    )
}

/// Build the user prompt from the extracted context.
///
/// Blocks in order: document topic (when the summary carries signal), recent
/// paragraphs excluding the caret's own, and the active fragment framed as
/// continue-do-not-repeat.
#[must_use]
pub fn user_prompt(context: &WritingContext) -> String {
    let mut blocks = Vec::new();

    if context.document_summary.chars().count() > SUMMARY_SIGNAL_MIN_CHARS {
        blocks.push(format!(
            "The document is about:\n{}",
            context.document_summary
        ));
    }

    let history = context.history_paragraphs();
    if !history.is_empty() {
        blocks.push(format!("Recent paragraphs:\n{}", history.join("\n\n")));
    }

    blocks.push(format!(
        "Continue this text from exactly where it stops. Do not repeat any of it:\n{}",
        context.active_sentence
    ));

    blocks.join("\n\n")
}

/// Build the amended user prompt for the single retry after a quality
/// rejection.
#[must_use]
pub fn retry_user_prompt(context: &WritingContext, verdict: QualityVerdict) -> String {
    format!(
        "{}\n\nYour previous attempt was rejected ({}). Write a different \
         continuation: be specific, avoid stock phrasing, and do not restart \
         the sentence.",
        user_prompt(context),
        verdict.reason
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::RejectReason;

    fn context() -> WritingContext {
        WritingContext {
            active_sentence: "The regression analysis".to_string(),
            recent_paragraphs: vec![
                "The data was gathered over six months.".to_string(),
                "Cleaning removed obvious outliers.".to_string(),
                "The regression analysis".to_string(),
            ],
            document_summary: "A study of measurement error in longitudinal field data."
                .to_string(),
            detected_tone: Tone::Academic,
            full_context: String::new(),
        }
    }

    #[test]
    fn system_prompt_contains_all_blocks() {
        let prompt = system_prompt(Tone::Academic);
        assert!(prompt.contains("inline writing assistant"));
        assert!(prompt.contains("academic register"));
        assert!(prompt.contains("In conclusion"));
        assert!(prompt.contains("empty string"));
    }

    #[test]
    fn system_prompt_varies_by_tone() {
        let academic = system_prompt(Tone::Academic);
        let casual = system_prompt(Tone::Casual);
        assert_ne!(academic, casual);
        assert!(casual.contains("casual register"));
    }

    #[test]
    fn tone_guidance_is_stable() {
        insta::assert_snapshot!(
            tone_guidance(Tone::Narrative),
            @"Match a narrative register: stay in scene, concrete detail over summary."
        );
    }

    #[test]
    fn user_prompt_orders_blocks() {
        let prompt = user_prompt(&context());
        let doc = prompt.find("The document is about:").unwrap();
        let recent = prompt.find("Recent paragraphs:").unwrap();
        let fragment = prompt.find("Continue this text").unwrap();
        assert!(doc < recent && recent < fragment);
    }

    #[test]
    fn user_prompt_excludes_active_paragraph_from_history() {
        let prompt = user_prompt(&context());
        let history_block = &prompt[prompt.find("Recent paragraphs:").unwrap()..];
        let fragment_start = history_block.find("Continue this text").unwrap();
        assert!(!history_block[..fragment_start].contains("The regression analysis"));
    }

    #[test]
    fn user_prompt_ends_with_active_sentence() {
        let prompt = user_prompt(&context());
        assert!(prompt.ends_with("The regression analysis"));
    }

    #[test]
    fn short_summary_is_omitted() {
        let mut ctx = context();
        ctx.document_summary = "too short".to_string();
        let prompt = user_prompt(&ctx);
        assert!(!prompt.contains("The document is about:"));
    }

    #[test]
    fn no_history_when_single_paragraph() {
        let mut ctx = context();
        ctx.recent_paragraphs = vec!["The regression analysis".to_string()];
        let prompt = user_prompt(&ctx);
        assert!(!prompt.contains("Recent paragraphs:"));
    }

    #[test]
    fn retry_prompt_names_the_rejection() {
        let verdict = QualityVerdict::rejected(RejectReason::Repetition, 20);
        let prompt = retry_user_prompt(&context(), verdict);
        assert!(prompt.contains("rejected (repetition)"));
        assert!(prompt.contains("do not restart"));
    }
}
