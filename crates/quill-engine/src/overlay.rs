//! Ghost-suggestion overlay — the presentation state machine.
//!
//! States: `Hidden → Loading → Visible → Accepting → Hidden`, where
//! `Loading` and `Visible` may drop straight back to `Hidden`. The overlay
//! owns its state exclusively; collaborators read it only through
//! [`SuggestionOverlay::is_visible`] and [`SuggestionOverlay::text`].
//!
//! Hiding is a two-step handshake. `hide()` flips a pending-hide flag and
//! starts the host's fade-out; [`SuggestionOverlay::notify_fade_complete`]
//! is the single point that finalizes the visual transition (clearing the
//! node). A bounded fallback timer finalizes anyway when the completion
//! signal never fires — dropped frames and unattached nodes must not leave
//! a stuck overlay.
//!
//! While not hidden, a frame-interval task re-reads the caret box and moves
//! the node; each `show_loading`/`show` replaces the previous task instead
//! of stacking another. Font matching runs once per show, not per frame.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use quill_surface::snapshot::FontSpec;
use quill_surface::{Rect, TextSurface};

/// Presentation effects the overlay drives on its host node.
///
/// Implementations own no state and make no decisions; every call is a
/// direct visual effect. The host must call
/// [`SuggestionOverlay::notify_fade_complete`] when the fade-out animation
/// it started in [`OverlayHost::begin_fade_out`] finishes.
pub trait OverlayHost: Send + Sync {
    /// Show the node in its loading (indeterminate) form.
    fn show_loading(&self);
    /// Show the node with ghost text.
    fn show_text(&self, text: &str);
    /// Move the node to track the caret.
    fn set_position(&self, rect: Rect);
    /// Match the surface's font metrics.
    fn apply_font(&self, font: &FontSpec);
    /// Start the fade-out animation.
    fn begin_fade_out(&self);
    /// Clear the node's text and remove it from view.
    fn clear(&self);
}

/// Overlay presentation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayState {
    /// Nothing shown.
    Hidden,
    /// Loading indicator while a request is in flight.
    Loading,
    /// A candidate is displayed and may be accepted.
    Visible,
    /// A candidate was accepted this cycle; transitions to hidden.
    Accepting,
}

struct OverlayInner {
    state: OverlayState,
    text: String,
    /// A fade-out is in flight; the next finalization clears the node.
    hide_pending: bool,
    /// Bumped by every show/hide so stale fallback timers become no-ops.
    epoch: u64,
    /// Cancels the position-tracking task.
    tracking: Option<CancellationToken>,
}

/// The ghost overlay state machine.
pub struct SuggestionOverlay {
    host: Arc<dyn OverlayHost>,
    inner: Mutex<OverlayInner>,
    fade_fallback: Duration,
    frame_interval: Duration,
}

impl SuggestionOverlay {
    /// Create a hidden overlay over the given host.
    #[must_use]
    pub fn new(host: Arc<dyn OverlayHost>, fade_fallback: Duration, frame_interval: Duration) -> Self {
        Self {
            host,
            inner: Mutex::new(OverlayInner {
                state: OverlayState::Hidden,
                text: String::new(),
                hide_pending: false,
                epoch: 0,
                tracking: None,
            }),
            fade_fallback,
            frame_interval,
        }
    }

    /// Current state (for collaborators that need more than `is_visible`,
    /// i.e. tests).
    #[must_use]
    pub fn state(&self) -> OverlayState {
        self.inner.lock().state
    }

    /// True only while a candidate is displayed.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.inner.lock().state == OverlayState::Visible
    }

    /// The displayed candidate, or empty when nothing is shown.
    #[must_use]
    pub fn text(&self) -> String {
        self.inner.lock().text.clone()
    }

    /// Show the loading indicator at the caret.
    ///
    /// Applies font metrics from the snapshot (once per show) and starts
    /// position tracking.
    pub fn show_loading(self: &Arc<Self>, surface: &Arc<dyn TextSurface>) {
        {
            let mut inner = self.inner.lock();
            inner.state = OverlayState::Loading;
            inner.text.clear();
            inner.hide_pending = false;
            inner.epoch += 1;
        }
        let snapshot = surface.snapshot();
        self.host.apply_font(&snapshot.caret_font);
        if let Some(caret) = snapshot.caret {
            self.host.set_position(caret);
        }
        self.host.show_loading();
        self.restart_tracking(Arc::clone(surface));
    }

    /// Show a candidate.
    ///
    /// Valid from `Loading` (the normal path) and from `Hidden` (a direct
    /// show); tracking is (re)started either way.
    pub fn show(self: &Arc<Self>, text: &str, surface: &Arc<dyn TextSurface>) {
        let was_hidden = {
            let mut inner = self.inner.lock();
            let was_hidden = inner.state == OverlayState::Hidden;
            inner.state = OverlayState::Visible;
            inner.text = text.to_owned();
            inner.hide_pending = false;
            inner.epoch += 1;
            was_hidden
        };
        if was_hidden {
            // Font was not matched by a preceding show_loading.
            self.host.apply_font(&surface.snapshot().caret_font);
        }
        if let Some(caret) = surface.snapshot().caret {
            self.host.set_position(caret);
        }
        self.host.show_text(text);
        self.restart_tracking(Arc::clone(surface));
        trace!(chars = text.chars().count(), "suggestion shown");
    }

    /// Mark the displayed candidate as accepted and return it.
    ///
    /// Returns `None` unless a candidate is visible. The caller follows up
    /// with [`SuggestionOverlay::hide`] once the text is handed off.
    #[must_use]
    pub fn accept(&self) -> Option<String> {
        let mut inner = self.inner.lock();
        if inner.state != OverlayState::Visible || inner.text.is_empty() {
            return None;
        }
        inner.state = OverlayState::Accepting;
        Some(inner.text.clone())
    }

    /// Begin hiding the overlay.
    ///
    /// Logical state drops to `Hidden` immediately (so `is_visible` and
    /// `text` stop answering); the visual node fades out and is cleared by
    /// the finalization handshake. Idempotent: a second `hide` while the
    /// fade is in flight does nothing.
    pub fn hide(self: &Arc<Self>) {
        let epoch = {
            let mut inner = self.inner.lock();
            if inner.state == OverlayState::Hidden && !inner.hide_pending {
                return;
            }
            if inner.hide_pending {
                // A fade is already in flight; the first finalization wins.
                return;
            }
            inner.state = OverlayState::Hidden;
            inner.text.clear();
            inner.hide_pending = true;
            inner.epoch += 1;
            if let Some(tracking) = inner.tracking.take() {
                tracking.cancel();
            }
            inner.epoch
        };

        self.host.begin_fade_out();

        // Fallback: finalize even when the animation-complete signal never
        // arrives (dropped frames, node detached mid-fade).
        let overlay = Arc::clone(self);
        let fallback = self.fade_fallback;
        drop(tokio::spawn(async move {
            tokio::time::sleep(fallback).await;
            if overlay.finalize_hide_if_current(epoch) {
                debug!("fade-out completion signal missed; fallback timer finalized hide");
            }
        }));
    }

    /// Animation-completion signal from the host.
    ///
    /// The single finalization point for a pending hide; a no-op when no
    /// hide is pending (e.g. a show interrupted the fade).
    pub fn notify_fade_complete(&self) {
        let finalize = {
            let mut inner = self.inner.lock();
            if inner.hide_pending {
                inner.hide_pending = false;
                true
            } else {
                false
            }
        };
        if finalize {
            self.host.clear();
        }
    }

    /// Finalize a pending hide if `epoch` is still current. Returns whether
    /// this call performed the finalization.
    fn finalize_hide_if_current(&self, epoch: u64) -> bool {
        let finalize = {
            let mut inner = self.inner.lock();
            if inner.hide_pending && inner.epoch == epoch {
                inner.hide_pending = false;
                true
            } else {
                false
            }
        };
        if finalize {
            self.host.clear();
        }
        finalize
    }

    /// Replace the position-tracking task.
    ///
    /// The task re-reads the caret box every frame interval and moves the
    /// host node; it exits as soon as its token is cancelled, which happens
    /// on hide and on every later show.
    fn restart_tracking(self: &Arc<Self>, surface: Arc<dyn TextSurface>) {
        let token = CancellationToken::new();
        {
            let mut inner = self.inner.lock();
            if let Some(old) = inner.tracking.replace(token.clone()) {
                old.cancel();
            }
        }
        let host = Arc::clone(&self.host);
        let interval = self.frame_interval;
        drop(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    () = token.cancelled() => break,
                    _ = ticker.tick() => {
                        if let Some(caret) = surface.snapshot().caret {
                            host.set_position(caret);
                        }
                    }
                }
            }
        }));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
