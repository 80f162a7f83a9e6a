//! Test doubles for the engine's outward-facing traits.

use parking_lot::Mutex;

use quill_surface::Rect;
use quill_surface::snapshot::FontSpec;

use crate::injector::TextInjector;
use crate::overlay::OverlayHost;

/// One recorded [`OverlayHost`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    /// `show_loading` was invoked.
    ShowLoading,
    /// `show_text` was invoked with this text.
    ShowText(String),
    /// `set_position` was invoked with this rect.
    SetPosition(Rect),
    /// `apply_font` was invoked.
    ApplyFont,
    /// `begin_fade_out` was invoked.
    BeginFadeOut,
    /// `clear` was invoked.
    Clear,
}

/// [`OverlayHost`] that records every call for assertion.
#[derive(Default)]
pub struct RecordingHost {
    calls: Mutex<Vec<HostCall>>,
}

impl RecordingHost {
    /// An empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls received so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().clone()
    }

    /// Number of `set_position` calls.
    #[must_use]
    pub fn position_count(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| matches!(c, HostCall::SetPosition(_)))
            .count()
    }

    /// The most recent `set_position` rect.
    #[must_use]
    pub fn last_position(&self) -> Option<Rect> {
        self.calls
            .lock()
            .iter()
            .rev()
            .find_map(|c| match c {
                HostCall::SetPosition(rect) => Some(*rect),
                _ => None,
            })
    }

    /// Number of `clear` calls.
    #[must_use]
    pub fn clear_count(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| matches!(c, HostCall::Clear))
            .count()
    }

    /// Texts passed to `show_text`, in order.
    #[must_use]
    pub fn shown_texts(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|c| match c {
                HostCall::ShowText(text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: HostCall) {
        self.calls.lock().push(call);
    }
}

impl OverlayHost for RecordingHost {
    fn show_loading(&self) {
        self.record(HostCall::ShowLoading);
    }

    fn show_text(&self, text: &str) {
        self.record(HostCall::ShowText(text.to_owned()));
    }

    fn set_position(&self, rect: Rect) {
        self.record(HostCall::SetPosition(rect));
    }

    fn apply_font(&self, _font: &FontSpec) {
        self.record(HostCall::ApplyFont);
    }

    fn begin_fade_out(&self) {
        self.record(HostCall::BeginFadeOut);
    }

    fn clear(&self) {
        self.record(HostCall::Clear);
    }
}

/// [`TextInjector`] that collects inserted strings.
#[derive(Default)]
pub struct RecordingInjector {
    inserted: Mutex<Vec<String>>,
}

impl RecordingInjector {
    /// An empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All inserted strings so far, in order.
    #[must_use]
    pub fn inserted(&self) -> Vec<String> {
        self.inserted.lock().clone()
    }
}

impl TextInjector for RecordingInjector {
    fn insert(&self, text: &str) {
        self.inserted.lock().push(text.to_owned());
    }
}
