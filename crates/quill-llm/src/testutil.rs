//! Shared test double for the completion service.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::{CompletionError, CompletionRequest, CompletionService};

/// Queue-backed [`CompletionService`] fake.
///
/// Responses are served in push order; an exhausted script answers with a
/// `Service` error so a miscounted test fails loudly instead of hanging.
/// An optional per-call delay (driven by tokio's clock, so paused-time tests
/// can interleave work before a response lands) simulates slow providers.
pub struct ScriptedCompletions {
    script: Mutex<VecDeque<Result<String, CompletionError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
    delay: Option<Duration>,
}

impl Default for ScriptedCompletions {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedCompletions {
    /// An empty script.
    #[must_use]
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    /// A script of successful responses.
    #[must_use]
    pub fn replying<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fake = Self::new();
        for response in responses {
            fake.push_ok(response);
        }
        fake
    }

    /// Builder: delay every response by `delay` of tokio time.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Enqueue a successful response.
    pub fn push_ok(&self, text: impl Into<String>) {
        self.script.lock().push_back(Ok(text.into()));
    }

    /// Enqueue an error response.
    pub fn push_err(&self, error: CompletionError) {
        self.script.lock().push_back(Err(error));
    }

    /// Requests received so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().clone()
    }

    /// Number of requests received so far.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl CompletionService for ScriptedCompletions {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        self.requests.lock().push(request.clone());
        let response = self
            .script
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(CompletionError::Service("scripted responses exhausted".into())));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        response
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
