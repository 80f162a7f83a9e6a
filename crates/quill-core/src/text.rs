//! Char-counted string helpers.
//!
//! The extraction rules are specified in characters (a 200-char summary cap,
//! a 200-char sentence fallback), not bytes. `&str[..n]` panics inside a
//! multi-byte character, so these helpers index by `char` throughout.

/// Truncate a string to at most `max_chars` characters.
///
/// Returns the longest prefix of `s` containing at most `max_chars` chars.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &s[..byte_idx],
        None => s,
    }
}

/// The trailing `max_chars` characters of `s`.
pub fn tail_chars(s: &str, max_chars: usize) -> &str {
    let char_count = s.chars().count();
    if char_count <= max_chars {
        return s;
    }
    match s.char_indices().nth(char_count - max_chars) {
        Some((byte_idx, _)) => &s[byte_idx..],
        None => s,
    }
}

/// Cap `s` at `max_chars` characters, appending `…` when truncated.
///
/// The result is at most `max_chars` chars long including the ellipsis. If
/// the string fits, it is returned as-is.
pub fn cap_with_ellipsis(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_owned();
    }
    let body = truncate_chars(s, max_chars.saturating_sub(1));
    format!("{body}…")
}

/// Number of whitespace-separated words in `s`.
pub fn word_count(s: &str) -> usize {
    s.split_whitespace().count()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── truncate_chars ───────────────────────────────────────────────────

    #[test]
    fn ascii_within_limit() {
        assert_eq!(truncate_chars("hello", 10), "hello");
    }

    #[test]
    fn ascii_exact_limit() {
        assert_eq!(truncate_chars("hello", 5), "hello");
    }

    #[test]
    fn ascii_truncated() {
        assert_eq!(truncate_chars("hello world", 5), "hello");
    }

    #[test]
    fn empty_string() {
        assert_eq!(truncate_chars("", 5), "");
    }

    #[test]
    fn zero_max() {
        assert_eq!(truncate_chars("hello", 0), "");
    }

    #[test]
    fn multibyte_counts_chars_not_bytes() {
        // '—' is 3 bytes but one char
        assert_eq!(truncate_chars("ab—cd", 3), "ab—");
        assert_eq!(truncate_chars("ab—cd", 4), "ab—c");
    }

    #[test]
    fn emoji_counts_as_one() {
        assert_eq!(truncate_chars("hi🦀bye", 3), "hi🦀");
    }

    // ── tail_chars ───────────────────────────────────────────────────────

    #[test]
    fn tail_within_limit() {
        assert_eq!(tail_chars("hello", 10), "hello");
    }

    #[test]
    fn tail_truncates_front() {
        assert_eq!(tail_chars("hello world", 5), "world");
    }

    #[test]
    fn tail_zero() {
        assert_eq!(tail_chars("hello", 0), "");
    }

    #[test]
    fn tail_multibyte() {
        assert_eq!(tail_chars("ab—cd", 3), "—cd");
    }

    // ── cap_with_ellipsis ────────────────────────────────────────────────

    #[test]
    fn cap_fits_unchanged() {
        assert_eq!(cap_with_ellipsis("hello", 10), "hello");
    }

    #[test]
    fn cap_exact_fit() {
        assert_eq!(cap_with_ellipsis("hello", 5), "hello");
    }

    #[test]
    fn cap_truncates_with_marker() {
        assert_eq!(cap_with_ellipsis("hello world", 6), "hello…");
    }

    #[test]
    fn capped_length_includes_marker() {
        let capped = cap_with_ellipsis("a long sentence that keeps going", 10);
        assert_eq!(capped.chars().count(), 10);
        assert!(capped.ends_with('…'));
    }

    // ── word_count ───────────────────────────────────────────────────────

    #[test]
    fn counts_whitespace_separated_words() {
        assert_eq!(word_count("the quick  brown\tfox"), 4);
        assert_eq!(word_count("   "), 0);
        assert_eq!(word_count(""), 0);
    }
}
