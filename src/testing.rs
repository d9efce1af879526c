//! In-memory completion providers for tests and offline runs.

use crate::error::LlmError;
use crate::llm::{CompletionProvider, CompletionRequest};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replays a fixed queue of responses, one per call, and records each request.
pub struct ScriptedProvider {
    responses: Mutex<VecDeque<Result<String, LlmError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedProvider {
    pub fn new(responses: Vec<Result<String, LlmError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
        self.responses
            .lock()
            .ok()
            .and_then(|mut queue| queue.pop_front())
            .unwrap_or(Err(LlmError::EmptyResponse))
    }

    fn model_id(&self) -> &str {
        "scripted"
    }
}

/// Answers every request through a closure, so concurrent callers get stable replies.
pub struct FnProvider<F> {
    respond: F,
}

impl<F> FnProvider<F>
where
    F: Fn(&CompletionRequest) -> Result<String, LlmError> + Send + Sync,
{
    pub fn new(respond: F) -> Self {
        Self { respond }
    }
}

#[async_trait::async_trait]
impl<F> CompletionProvider for FnProvider<F>
where
    F: Fn(&CompletionRequest) -> Result<String, LlmError> + Send + Sync,
{
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        (self.respond)(&request)
    }

    fn model_id(&self) -> &str {
        "stub"
    }
}
