//! Orchestration of the suggestion lifecycle.
//!
//! One pipeline observes one text surface. Every surface change hides the
//! overlay, bumps the generation counter, and re-arms the debounce timer;
//! when the timer survives the quiet period a cycle runs: extract context,
//! build prompts, call the completion service, gate the candidate through
//! the quality filter (with a single retry on rejection), and drive the
//! overlay.
//!
//! **Generation guard.** The counter is private to the pipeline and bumped
//! on surface change, accept, dismiss, and stop. A cycle captures the value
//! it started under and re-checks it before every shared-state mutation; a
//! mismatch means the work is stale and is dropped without touching the
//! overlay. Collaborators never see the counter — they get `dismiss`,
//! `accept`, and `stop`.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use metrics::counter;
use parking_lot::Mutex;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, trace, warn};

use quill_core::constants::MIN_ACTIVE_SENTENCE_CHARS;
use quill_core::{QualityVerdict, RejectReason, WritingContext};
use quill_llm::{CompletionError, CompletionRequest, CompletionService};
use quill_surface::TextSurface;

use crate::config::EngineConfig;
use crate::injector::TextInjector;
use crate::overlay::SuggestionOverlay;
use crate::prompt::{retry_user_prompt, system_prompt, user_prompt};
use crate::quality;

/// Where the pipeline is in its request lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelinePhase {
    /// Nothing armed, nothing in flight.
    Idle,
    /// Debounce timer armed.
    Pending,
    /// First completion request in flight.
    AwaitingFirst,
    /// Retry request in flight after a quality rejection.
    AwaitingRetry,
    /// Cycle finished (suggestion shown or finally rejected).
    Settled,
}

/// Single-token debounce.
///
/// Arming replaces the previous token, so at most one armed future exists;
/// cancelling an already-fired or never-armed debounce is a no-op.
pub(crate) struct Debounce {
    current: Mutex<Option<CancellationToken>>,
}

impl Debounce {
    pub(crate) fn new() -> Self {
        Self {
            current: Mutex::new(None),
        }
    }

    /// Arm the timer: run `work` after `delay` unless superseded or
    /// cancelled first.
    pub(crate) fn arm<F>(&self, delay: Duration, work: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let token = CancellationToken::new();
        if let Some(old) = self.current.lock().replace(token.clone()) {
            old.cancel();
        }
        drop(tokio::spawn(async move {
            tokio::select! {
                () = token.cancelled() => {}
                () = tokio::time::sleep(delay) => work.await,
            }
        }));
    }

    /// Cancel the armed timer, if any.
    pub(crate) fn cancel(&self) {
        if let Some(token) = self.current.lock().take() {
            token.cancel();
        }
    }
}

/// The suggestion pipeline.
///
/// Constructed once per surface; all methods are infallible — failures
/// inside a cycle degrade to "no suggestion" rather than surfacing to the
/// caller.
pub struct SuggestionPipeline {
    service: Arc<dyn CompletionService>,
    overlay: Arc<SuggestionOverlay>,
    injector: Arc<dyn TextInjector>,
    config: EngineConfig,
    generation: AtomicU64,
    phase: Mutex<PipelinePhase>,
    debounce: Debounce,
    watcher: Mutex<Option<CancellationToken>>,
    surface: Mutex<Option<Arc<dyn TextSurface>>>,
}

impl SuggestionPipeline {
    /// Wire a pipeline to its collaborators.
    #[must_use]
    pub fn new(
        service: Arc<dyn CompletionService>,
        overlay: Arc<SuggestionOverlay>,
        injector: Arc<dyn TextInjector>,
        config: EngineConfig,
    ) -> Self {
        Self {
            service,
            overlay,
            injector,
            config,
            generation: AtomicU64::new(0),
            phase: Mutex::new(PipelinePhase::Idle),
            debounce: Debounce::new(),
            watcher: Mutex::new(None),
            surface: Mutex::new(None),
        }
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> PipelinePhase {
        *self.phase.lock()
    }

    /// Begin observing `surface`.
    ///
    /// A disabled pipeline attaches nothing. Starting again replaces the
    /// previous observation.
    pub fn start(self: &Arc<Self>, surface: Arc<dyn TextSurface>) {
        if !self.config.enabled {
            debug!("suggestions disabled; surface not observed");
            return;
        }
        *self.surface.lock() = Some(Arc::clone(&surface));

        let token = CancellationToken::new();
        if let Some(old) = self.watcher.lock().replace(token.clone()) {
            old.cancel();
        }

        let mut changes = surface.changes();
        let pipeline = Arc::clone(self);
        drop(tokio::spawn(async move {
            loop {
                tokio::select! {
                    () = token.cancelled() => break,
                    change = changes.recv() => match change {
                        // A lagged receiver still means "something changed",
                        // which is all the trigger needs.
                        Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => {
                            pipeline.on_surface_change();
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    },
                }
            }
        }));
    }

    /// Accept the displayed suggestion, if one is visible.
    ///
    /// Returns whether text was handed to the injector.
    pub fn accept(self: &Arc<Self>) -> bool {
        let Some(text) = self.overlay.accept() else {
            return false;
        };
        self.debounce.cancel();
        let _ = self.generation.fetch_add(1, Ordering::SeqCst);
        self.overlay.hide();
        self.injector.insert(&text);
        self.set_phase(PipelinePhase::Idle);
        counter!("quill_suggestions_accepted_total").increment(1);
        debug!(chars = text.chars().count(), "suggestion accepted");
        true
    }

    /// Dismiss any pending or displayed suggestion.
    pub fn dismiss(self: &Arc<Self>) {
        let _ = self.generation.fetch_add(1, Ordering::SeqCst);
        self.debounce.cancel();
        self.overlay.hide();
        self.set_phase(PipelinePhase::Idle);
    }

    /// Stop observing the surface and drop all pending work.
    pub fn stop(self: &Arc<Self>) {
        let _ = self.generation.fetch_add(1, Ordering::SeqCst);
        self.debounce.cancel();
        if let Some(watcher) = self.watcher.lock().take() {
            watcher.cancel();
        }
        *self.surface.lock() = None;
        self.overlay.hide();
        self.set_phase(PipelinePhase::Idle);
    }

    fn on_surface_change(self: &Arc<Self>) {
        self.overlay.hide();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.set_phase(PipelinePhase::Pending);

        let pipeline = Arc::clone(self);
        self.debounce.arm(self.config.debounce_delay, async move {
            pipeline.run_cycle(generation).await;
        });
    }

    #[instrument(skip(self))]
    async fn run_cycle(self: Arc<Self>, generation: u64) {
        let Some(surface) = self.surface.lock().clone() else {
            return;
        };

        let snapshot = surface.snapshot();
        let Some(context) = quill_context::extract(&snapshot) else {
            self.set_phase(PipelinePhase::Idle);
            return;
        };
        if context.active_sentence.chars().count() < MIN_ACTIVE_SENTENCE_CHARS {
            trace!("active sentence too short; cycle skipped");
            self.set_phase(PipelinePhase::Idle);
            return;
        }
        if !self.is_current(generation) {
            return;
        }

        counter!("quill_cycles_started_total").increment(1);
        self.overlay.show_loading(&surface);
        self.set_phase(PipelinePhase::AwaitingFirst);

        let request = CompletionRequest::new(
            system_prompt(context.detected_tone),
            user_prompt(&context),
        );
        let first = match self.service.complete(&request).await {
            Ok(candidate) => candidate,
            Err(error) => {
                self.handle_error(generation, &error);
                return;
            }
        };
        if !self.is_current(generation) {
            counter!("quill_stale_responses_total").increment(1);
            return;
        }

        let verdict = self.assess(&first, &context);
        if verdict.valid {
            self.show(generation, first.trim(), &surface, &verdict);
            return;
        }
        if self.config.max_retries == 0 {
            debug!(
                reason = verdict.reason.as_str(),
                score = verdict.score,
                "candidate rejected; retries disabled"
            );
            counter!("quill_suggestions_rejected_total", "reason" => verdict.reason.as_str())
                .increment(1);
            self.overlay.hide();
            self.set_phase(PipelinePhase::Settled);
            return;
        }

        debug!(
            reason = verdict.reason.as_str(),
            score = verdict.score,
            "first candidate rejected; retrying"
        );
        self.set_phase(PipelinePhase::AwaitingRetry);
        let retry = CompletionRequest::new(
            system_prompt(context.detected_tone),
            retry_user_prompt(&context, verdict),
        );
        let second = match self.service.complete(&retry).await {
            Ok(candidate) => candidate,
            Err(error) => {
                self.handle_error(generation, &error);
                return;
            }
        };
        if !self.is_current(generation) {
            counter!("quill_stale_responses_total").increment(1);
            return;
        }

        let verdict = self.assess(&second, &context);
        if verdict.valid {
            self.show(generation, second.trim(), &surface, &verdict);
        } else {
            debug!(
                reason = verdict.reason.as_str(),
                score = verdict.score,
                "retry candidate rejected; no suggestion"
            );
            counter!("quill_suggestions_rejected_total", "reason" => verdict.reason.as_str())
                .increment(1);
            self.overlay.hide();
            self.set_phase(PipelinePhase::Settled);
        }
    }

    /// Quality-gate a candidate, honoring the configured score floor.
    fn assess(&self, candidate: &str, context: &WritingContext) -> QualityVerdict {
        let verdict = quality::validate(candidate, context);
        if verdict.valid && verdict.score < self.config.min_score {
            QualityVerdict::rejected(RejectReason::LowScore, verdict.score)
        } else {
            verdict
        }
    }

    fn show(
        self: &Arc<Self>,
        generation: u64,
        text: &str,
        surface: &Arc<dyn TextSurface>,
        verdict: &QualityVerdict,
    ) {
        if !self.is_current(generation) {
            counter!("quill_stale_responses_total").increment(1);
            return;
        }
        self.overlay.show(text, surface);
        self.set_phase(PipelinePhase::Settled);
        counter!("quill_suggestions_shown_total").increment(1);
        debug!(score = verdict.score, "suggestion shown");
    }

    fn handle_error(self: &Arc<Self>, generation: u64, error: &CompletionError) {
        if error.is_disabled() {
            // User-configured suppression, not a fault: stay quiet.
            if self.is_current(generation) {
                self.overlay.hide();
                self.set_phase(PipelinePhase::Idle);
            }
            return;
        }
        warn!(%error, "completion request failed");
        counter!("quill_completion_errors_total").increment(1);
        if self.is_current(generation) {
            self.overlay.hide();
            self.set_phase(PipelinePhase::Idle);
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    fn set_phase(&self, phase: PipelinePhase) {
        *self.phase.lock() = phase;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    use crate::overlay::{OverlayHost, OverlayState};
    use crate::testutil::{RecordingHost, RecordingInjector};
    use quill_llm::testutil::ScriptedCompletions;
    use quill_surface::testutil::{MonoLayout, ScriptedSurface};

    struct Fixture {
        pipeline: Arc<SuggestionPipeline>,
        overlay: Arc<SuggestionOverlay>,
        host: Arc<RecordingHost>,
        injector: Arc<RecordingInjector>,
        completions: Arc<ScriptedCompletions>,
        surface: Arc<ScriptedSurface>,
        layout: MonoLayout,
    }

    fn fixture_with(config: EngineConfig, completions: ScriptedCompletions) -> Fixture {
        let host = Arc::new(RecordingHost::new());
        let overlay = Arc::new(SuggestionOverlay::new(
            Arc::clone(&host) as Arc<dyn OverlayHost>,
            config.fade_fallback,
            config.frame_interval,
        ));
        let injector = Arc::new(RecordingInjector::new());
        let completions = Arc::new(completions);

        let mut layout = MonoLayout::new();
        let _ = layout.paragraph(&["The regression analysis"]);
        let caret = layout.caret_at(0, 0, 23.0);
        let surface = Arc::new(ScriptedSurface::with_snapshot(
            layout.snapshot(Some(caret)),
        ));

        let pipeline = Arc::new(SuggestionPipeline::new(
            Arc::clone(&completions) as Arc<dyn CompletionService>,
            Arc::clone(&overlay),
            Arc::clone(&injector) as Arc<dyn TextInjector>,
            config,
        ));
        Fixture {
            pipeline,
            overlay,
            host,
            injector,
            completions,
            surface,
            layout,
        }
    }

    fn fixture(completions: ScriptedCompletions) -> Fixture {
        fixture_with(EngineConfig::default(), completions)
    }

    async fn settle() {
        // Let the watcher task arm the debounce timer before moving the clock
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
        // Debounce delay plus slack for the spawned cycle to finish
        tokio::time::advance(Duration::from_millis(600)).await;
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    // --- triggering ---

    #[tokio::test(start_paused = true)]
    async fn change_then_quiet_period_produces_a_suggestion() {
        let fx = fixture(ScriptedCompletions::replying([
            "shows a consistent effect across every subgroup we measured.",
        ]));
        fx.pipeline.start(fx.surface.clone());
        tokio::task::yield_now().await;

        fx.surface.touch();
        settle().await;

        assert!(fx.overlay.is_visible());
        assert_eq!(
            fx.overlay.text(),
            "shows a consistent effect across every subgroup we measured."
        );
        assert_eq!(fx.pipeline.phase(), PipelinePhase::Settled);
        assert_eq!(fx.completions.request_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_changes_collapse_into_one_request() {
        let fx = fixture(ScriptedCompletions::replying([
            "shows a consistent effect across every subgroup we measured.",
        ]));
        fx.pipeline.start(fx.surface.clone());
        tokio::task::yield_now().await;

        for _ in 0..5 {
            fx.surface.touch();
            tokio::time::advance(Duration::from_millis(100)).await;
            tokio::task::yield_now().await;
        }
        settle().await;

        assert_eq!(fx.completions.request_count(), 1);
        assert!(fx.overlay.is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn short_fragment_skips_the_cycle_silently() {
        let fx = fixture(ScriptedCompletions::new());
        let mut layout = MonoLayout::new();
        let _ = layout.paragraph(&["Hi"]);
        fx.surface
            .set_snapshot(layout.snapshot(Some(layout.caret_at(0, 0, 2.0))));
        fx.pipeline.start(fx.surface.clone());
        tokio::task::yield_now().await;

        fx.surface.touch();
        settle().await;

        assert_eq!(fx.completions.request_count(), 0);
        assert_eq!(fx.pipeline.phase(), PipelinePhase::Idle);
        assert_eq!(fx.overlay.state(), OverlayState::Hidden);
    }

    #[tokio::test(start_paused = true)]
    async fn missing_caret_skips_the_cycle() {
        let fx = fixture(ScriptedCompletions::new());
        fx.surface.set_snapshot(fx.layout.snapshot(None));
        fx.pipeline.start(fx.surface.clone());
        tokio::task::yield_now().await;

        fx.surface.touch();
        settle().await;

        assert_eq!(fx.completions.request_count(), 0);
        assert_eq!(fx.pipeline.phase(), PipelinePhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn disabled_pipeline_never_observes() {
        let config = EngineConfig {
            enabled: false,
            ..EngineConfig::default()
        };
        let fx = fixture_with(config, ScriptedCompletions::new());
        fx.pipeline.start(fx.surface.clone());
        tokio::task::yield_now().await;

        fx.surface.touch();
        settle().await;

        assert_eq!(fx.completions.request_count(), 0);
        assert_eq!(fx.pipeline.phase(), PipelinePhase::Idle);
    }

    // --- quality gate and retry ---

    #[tokio::test(start_paused = true)]
    async fn low_quality_first_answer_triggers_one_retry() {
        let fx = fixture(ScriptedCompletions::replying([
            // Generic fillers sink this below the floor
            "It is important to note that this plays a crucial role at the end of the day.",
            "reveals a statistically significant interaction between the two variables at p < 0.05.",
        ]));
        fx.pipeline.start(fx.surface.clone());
        tokio::task::yield_now().await;

        fx.surface.touch();
        settle().await;

        assert_eq!(fx.completions.request_count(), 2);
        assert!(fx.overlay.is_visible());
        assert_eq!(
            fx.overlay.text(),
            "reveals a statistically significant interaction between the two variables at p < 0.05."
        );
        let retry = &fx.completions.requests()[1];
        assert!(retry.user.contains("previous attempt was rejected"));
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_retry_hides_and_settles() {
        let fx = fixture(ScriptedCompletions::replying([
            "In conclusion, everything works.",
            "In summary, everything still works.",
        ]));
        fx.pipeline.start(fx.surface.clone());
        tokio::task::yield_now().await;

        fx.surface.touch();
        settle().await;

        assert_eq!(fx.completions.request_count(), 2);
        assert!(!fx.overlay.is_visible());
        assert_eq!(fx.pipeline.phase(), PipelinePhase::Settled);
    }

    #[tokio::test(start_paused = true)]
    async fn configured_floor_tightens_the_gate() {
        let config = EngineConfig {
            min_score: 95,
            ..EngineConfig::default()
        };
        // Scores 90: valid by the built-in floor, rejected by the configured one
        let fx = fixture_with(
            config,
            ScriptedCompletions::replying([
                "Results hold for both groups in every tested case",
                "Results hold for both groups in every tested case",
            ]),
        );
        fx.pipeline.start(fx.surface.clone());
        tokio::task::yield_now().await;

        fx.surface.touch();
        settle().await;

        assert_eq!(fx.completions.request_count(), 2);
        assert!(!fx.overlay.is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn zero_retries_rejects_on_the_first_failure() {
        let config = EngineConfig {
            max_retries: 0,
            ..EngineConfig::default()
        };
        let fx = fixture_with(
            config,
            ScriptedCompletions::replying(["In conclusion, everything works."]),
        );
        fx.pipeline.start(fx.surface.clone());
        tokio::task::yield_now().await;

        fx.surface.touch();
        settle().await;

        assert_eq!(fx.completions.request_count(), 1);
        assert!(!fx.overlay.is_visible());
        assert_eq!(fx.pipeline.phase(), PipelinePhase::Settled);
    }

    // --- staleness ---

    #[tokio::test(start_paused = true)]
    async fn response_landing_after_a_new_change_is_dropped() {
        let completions = ScriptedCompletions::replying([
            "shows a consistent effect across every subgroup we measured.",
        ])
        .with_delay(Duration::from_millis(200));
        let fx = fixture(completions);
        fx.pipeline.start(fx.surface.clone());
        tokio::task::yield_now().await;

        fx.surface.touch();
        // Let the watcher arm the debounce timer before moving the clock
        tokio::task::yield_now().await;
        // Debounce elapses, request goes out and is now sleeping
        tokio::time::advance(Duration::from_millis(550)).await;
        tokio::task::yield_now().await;
        assert_eq!(fx.completions.request_count(), 1);

        // A new keystroke supersedes the in-flight response
        fx.surface.touch();
        tokio::task::yield_now().await;
        tokio::time::advance(Duration::from_millis(200)).await;
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }

        // The delayed response must not have been shown
        assert!(!fx.overlay.is_visible());
        assert!(fx.host.shown_texts().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn dismiss_invalidates_in_flight_work() {
        let completions = ScriptedCompletions::replying([
            "shows a consistent effect across every subgroup we measured.",
        ])
        .with_delay(Duration::from_millis(200));
        let fx = fixture(completions);
        fx.pipeline.start(fx.surface.clone());
        tokio::task::yield_now().await;

        fx.surface.touch();
        tokio::time::advance(Duration::from_millis(550)).await;
        tokio::task::yield_now().await;

        fx.pipeline.dismiss();
        tokio::time::advance(Duration::from_millis(200)).await;
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }

        assert!(!fx.overlay.is_visible());
        assert!(fx.host.shown_texts().is_empty());
        assert_eq!(fx.pipeline.phase(), PipelinePhase::Idle);
    }

    // --- accept ---

    #[tokio::test(start_paused = true)]
    async fn accept_hands_text_to_the_injector() {
        let fx = fixture(ScriptedCompletions::replying([
            "shows a consistent effect across every subgroup we measured.",
        ]));
        fx.pipeline.start(fx.surface.clone());
        tokio::task::yield_now().await;

        fx.surface.touch();
        settle().await;
        assert!(fx.overlay.is_visible());

        assert!(fx.pipeline.accept());
        assert_eq!(
            fx.injector.inserted(),
            vec!["shows a consistent effect across every subgroup we measured.".to_string()]
        );
        assert_eq!(fx.pipeline.phase(), PipelinePhase::Idle);
        assert!(!fx.overlay.is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn accept_with_nothing_visible_is_a_no_op() {
        let fx = fixture(ScriptedCompletions::new());
        assert!(!fx.pipeline.accept());
        assert!(fx.injector.inserted().is_empty());
    }

    // --- errors ---

    #[tokio::test(start_paused = true)]
    async fn disabled_error_is_suppressed() {
        let completions = ScriptedCompletions::new();
        completions.push_err(CompletionError::from_message("disabled"));
        let fx = fixture(completions);
        fx.pipeline.start(fx.surface.clone());
        tokio::task::yield_now().await;

        fx.surface.touch();
        settle().await;

        assert!(!fx.overlay.is_visible());
        assert_eq!(fx.pipeline.phase(), PipelinePhase::Idle);
        assert!(fx.host.shown_texts().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn service_error_hides_without_retry() {
        let completions = ScriptedCompletions::new();
        completions.push_err(CompletionError::Service("provider unreachable".into()));
        let fx = fixture(completions);
        fx.pipeline.start(fx.surface.clone());
        tokio::task::yield_now().await;

        fx.surface.touch();
        settle().await;

        assert_eq!(fx.completions.request_count(), 1);
        assert!(!fx.overlay.is_visible());
        assert_eq!(fx.pipeline.phase(), PipelinePhase::Idle);
    }

    // --- stop ---

    #[tokio::test(start_paused = true)]
    async fn stop_detaches_the_watcher() {
        let fx = fixture(ScriptedCompletions::replying([
            "shows a consistent effect across every subgroup we measured.",
        ]));
        fx.pipeline.start(fx.surface.clone());
        tokio::task::yield_now().await;

        fx.pipeline.stop();
        tokio::task::yield_now().await;

        fx.surface.touch();
        settle().await;

        assert_eq!(fx.completions.request_count(), 0);
        assert_eq!(fx.pipeline.phase(), PipelinePhase::Idle);
    }

    // --- generation monotonicity (internal) ---

    #[tokio::test(start_paused = true)]
    async fn generation_never_decreases() {
        let fx = fixture(ScriptedCompletions::new());
        fx.pipeline.start(fx.surface.clone());
        tokio::task::yield_now().await;

        let mut last = fx.pipeline.generation.load(Ordering::SeqCst);
        fx.surface.touch();
        tokio::task::yield_now().await;
        for action in 0..6 {
            match action % 3 {
                0 => fx.pipeline.dismiss(),
                1 => {
                    let _ = fx.pipeline.accept();
                    // accept without a visible suggestion does not bump
                }
                _ => {
                    fx.surface.touch();
                    tokio::task::yield_now().await;
                }
            }
            let now = fx.pipeline.generation.load(Ordering::SeqCst);
            assert!(now >= last);
            last = now;
        }
    }

    // --- debounce primitive ---

    #[tokio::test(start_paused = true)]
    async fn debounce_runs_only_the_latest_arm() {
        let debounce = Debounce::new();
        let fired = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let fired = Arc::clone(&fired);
            debounce.arm(Duration::from_millis(100), async move {
                let _ = fired.fetch_add(1, Ordering::SeqCst);
            });
            tokio::time::advance(Duration::from_millis(10)).await;
            tokio::task::yield_now().await;
        }
        tokio::time::advance(Duration::from_millis(200)).await;
        tokio::task::yield_now().await;

        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn debounce_cancel_is_idempotent() {
        let debounce = Debounce::new();
        let fired = Arc::new(AtomicUsize::new(0));
        {
            let fired = Arc::clone(&fired);
            debounce.arm(Duration::from_millis(100), async move {
                let _ = fired.fetch_add(1, Ordering::SeqCst);
            });
        }
        debounce.cancel();
        debounce.cancel();
        tokio::time::advance(Duration::from_millis(200)).await;
        tokio::task::yield_now().await;

        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
