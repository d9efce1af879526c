use crate::analyzer::findings::FindingSink;
use crate::analyzer::invoker::StructuredInvoker;
use crate::analyzer::postprocess::Postprocessor;
use crate::analyzer::schema::AnalysisKind;
use crate::config::AppConfig;
use crate::error::AnalysisError;
use crate::llm::{CompletionProvider, RetryPolicy};
use crate::model::{AnalysisDocument, PreprocessedData, RawMarketData};
use crate::normalizer::preprocess;
use futures::future::try_join3;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::info;

/// Runs trend, competitor and SWOT analyses over collected data and postprocesses the result.
pub struct AnalysisEngine {
    invoker: StructuredInvoker,
    postprocessor: Postprocessor,
}

impl AnalysisEngine {
    pub fn new(invoker: StructuredInvoker, postprocessor: Postprocessor) -> Self {
        Self {
            invoker,
            postprocessor,
        }
    }

    pub fn from_config(provider: Arc<dyn CompletionProvider>, config: &AppConfig) -> Self {
        let model_version = provider.model_id().to_string();
        let invoker = StructuredInvoker::new(
            provider,
            RetryPolicy::from(&config.retry),
            config.llm.analysis_temperature,
            config.chunking.max_items,
        );
        let postprocessor = Postprocessor::new(model_version, config.data_sources.clone());
        Self::new(invoker, postprocessor)
    }

    /// Full pipeline: preprocess, analyze, postprocess. Any analysis kind failing fails the run.
    pub async fn analyze_market(
        &self,
        raw: &RawMarketData,
        sink: &dyn FindingSink,
    ) -> Result<AnalysisDocument, AnalysisError> {
        let data = preprocess(raw);
        info!(
            news = data.news.len(),
            model = self.invoker.model_id(),
            "Preprocessed market data"
        );
        let analysis = self.run_analyses(&data).await?;
        Ok(self.postprocessor.process(analysis, sink))
    }

    /// The three kinds share no state, so they run concurrently.
    pub async fn run_analyses(&self, data: &PreprocessedData) -> Result<AnalysisDocument, AnalysisError> {
        let (trends, competitors, swot) = try_join3(
            self.invoker.analyze(AnalysisKind::Trends, data),
            self.invoker.analyze(AnalysisKind::Competitors, data),
            self.invoker.analyze(AnalysisKind::Swot, data),
        )
        .await?;
        Ok(assemble(trends, competitors, swot))
    }
}

/// Builds the top-level analysis: the trend list, its summary, and the two merged mappings.
pub fn assemble(
    mut trends: Map<String, Value>,
    competitors: Map<String, Value>,
    swot: Map<String, Value>,
) -> AnalysisDocument {
    let mut analysis = Map::new();
    analysis.insert(
        AnalysisKind::Trends.key().into(),
        trends.remove("trends").unwrap_or_else(|| Value::Array(Vec::new())),
    );
    if let Some(summary) = trends.remove("summary") {
        analysis.insert("summary".into(), summary);
    }
    analysis.insert(AnalysisKind::Competitors.key().into(), Value::Object(competitors));
    analysis.insert(AnalysisKind::Swot.key().into(), Value::Object(swot));
    analysis
}
