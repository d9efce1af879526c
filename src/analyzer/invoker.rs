use crate::analyzer::chunker::chunk_data;
use crate::analyzer::merger::merge_responses;
use crate::analyzer::schema::AnalysisKind;
use crate::error::{AnalysisError, LlmError};
use crate::llm::{CompletionProvider, CompletionRequest, RetryPolicy};
use crate::model::{Chunk, PreprocessedData};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info};

/// Sends every chunk of the data to the LLM for one analysis kind and merges the answers.
pub struct StructuredInvoker {
    provider: Arc<dyn CompletionProvider>,
    retry: RetryPolicy,
    temperature: f32,
    max_items: usize,
}

impl StructuredInvoker {
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        retry: RetryPolicy,
        temperature: f32,
        max_items: usize,
    ) -> Self {
        Self {
            provider,
            retry,
            temperature,
            max_items,
        }
    }

    pub fn model_id(&self) -> &str {
        self.provider.model_id()
    }

    /// Runs the whole chunked invocation under the retry policy.
    /// A run that never succeeds is fatal for this analysis kind.
    pub async fn analyze(
        &self,
        kind: AnalysisKind,
        data: &PreprocessedData,
    ) -> Result<Map<String, Value>, AnalysisError> {
        self.retry
            .run(|| self.invoke_chunks(kind, data))
            .await
            .map_err(|exhausted| AnalysisError::RetriesExhausted {
                kind,
                attempts: exhausted.attempts,
                source: Box::new(exhausted.last_error),
            })
    }

    async fn invoke_chunks(
        &self,
        kind: AnalysisKind,
        data: &PreprocessedData,
    ) -> Result<Map<String, Value>, AnalysisError> {
        let chunks = chunk_data(data, self.max_items);
        info!(analysis = %kind, chunks = chunks.len(), "Running structured analysis");

        let mut responses = Vec::with_capacity(chunks.len());
        for (index, chunk) in chunks.iter().enumerate() {
            let text = self.provider.complete(self.build_request(kind, chunk)).await?;
            let value: Value = serde_json::from_str(&text).map_err(LlmError::InvalidJson)?;
            responses.push(kind.validate(value)?);
            debug!(analysis = %kind, chunk = index, "Chunk analyzed");
        }

        Ok(merge_responses(responses))
    }

    fn build_request(&self, kind: AnalysisKind, chunk: &Chunk) -> CompletionRequest {
        CompletionRequest::new(format!(
            "{}\n\nRelevant data:\n{}",
            kind.task_prompt(),
            chunk.to_prompt_text()
        ))
        .with_system(kind.system_prompt())
        .with_temperature(self.temperature)
        .json()
    }
}
