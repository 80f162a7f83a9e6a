//! Insertion of accepted suggestions into the document.

/// Inserts accepted text at the caret.
///
/// The pipeline hands an accepted candidate to exactly one `insert` call and
/// forgets it; undo granularity and caret placement are the injector's
/// business.
pub trait TextInjector: Send + Sync {
    /// Insert `text` at the current caret position.
    fn insert(&self, text: &str);
}
