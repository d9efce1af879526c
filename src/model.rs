// Core structs: market data as collected, as preprocessed, and the final analysis
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A news article as delivered by the news source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub description: Option<String>,
}

/// One organic web search hit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub snippet: String,
}

/// Everything the collector gathered for a query. Failed sources are empty, never absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawMarketData {
    pub news_articles: Vec<NewsArticle>,
    pub search_results: Vec<SearchResult>,
}

/// Plain-text fields ready to be placed in a prompt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreprocessedData {
    /// `"title: description"` per article that has a description.
    pub news: Vec<String>,
    /// Newline-joined `"title: snippet"` lines.
    pub search_results: String,
}

/// A bounded fragment of preprocessed data sent in a single LLM request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Chunk {
    News(Vec<String>),
    SearchResults(Vec<String>),
}

impl Chunk {
    pub fn len(&self) -> usize {
        match self {
            Chunk::News(items) | Chunk::SearchResults(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Serialized form embedded after the task instruction.
    pub fn to_prompt_text(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Parameters extracted from the free-text research query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryParams {
    pub market: String,
    #[serde(default)]
    pub companies: Vec<String>,
    #[serde(default = "default_timeframe")]
    pub timeframe: String,
    #[serde(default = "default_geography")]
    pub geography: String,
}

fn default_timeframe() -> String {
    "5 years".into()
}

fn default_geography() -> String {
    "global".into()
}

/// The untyped analysis object the postprocessor walks and mutates.
pub type AnalysisDocument = Map<String, Value>;

/// Metadata attached as the last postprocessing stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    pub processing_date: DateTime<Utc>,
    pub data_sources: Vec<String>,
    pub model_version: String,
    pub quality_score: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CompetitorView {
    pub name: String,
    pub market_share: Value,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CompetitorsView {
    pub top_competitors: Vec<CompetitorView>,
    pub competitive_landscape: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SwotCategoryView {
    pub description: String,
    pub evidence: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SwotView {
    pub strengths: SwotCategoryView,
    pub weaknesses: SwotCategoryView,
    pub opportunities: SwotCategoryView,
    pub threats: SwotCategoryView,
}

/// Typed view of a finished analysis, as consumed by the report renderer.
#[derive(Debug, Clone, Deserialize)]
pub struct FinalAnalysis {
    #[serde(default)]
    pub trends: Vec<Value>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub competitors: CompetitorsView,
    #[serde(default)]
    pub swot: SwotView,
    pub metadata: AnalysisMetadata,
}

impl FinalAnalysis {
    pub fn from_document(doc: &AnalysisDocument) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(doc.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn chunk_serializes_with_kind_tag() {
        let chunk = Chunk::News(vec!["A: b".into()]);
        assert_eq!(chunk.to_prompt_text(), r#"{"news":["A: b"]}"#);
        let chunk = Chunk::SearchResults(vec!["x".into(), "y".into()]);
        assert_eq!(chunk.to_prompt_text(), r#"{"search_results":["x","y"]}"#);
        assert_eq!(chunk.len(), 2);
    }

    #[test]
    fn query_params_fill_defaults() {
        let params: QueryParams = serde_json::from_str(r#"{"market": "EV"}"#).unwrap();
        assert_eq!(params.timeframe, "5 years");
        assert_eq!(params.geography, "global");
        assert!(params.companies.is_empty());
    }

    #[test]
    fn final_analysis_tolerates_sparse_sections() {
        let doc = json!({
            "trends": [{"name": "Charging"}],
            "competitors": {"top_competitors": [{"name": "Tesla", "market_share": "n/a"}]},
            "swot": {"strengths": {"description": "Subsidies"}},
            "metadata": {
                "processing_date": "2024-05-01T10:00:00+00:00",
                "data_sources": ["web_search"],
                "model_version": "m",
                "quality_score": 0.4
            }
        });
        let analysis = FinalAnalysis::from_document(doc.as_object().unwrap()).unwrap();
        assert_eq!(analysis.competitors.top_competitors[0].name, "Tesla");
        assert_eq!(analysis.swot.strengths.description, "Subsidies");
        assert!(analysis.swot.threats.evidence.is_empty());
    }

    #[test]
    fn final_analysis_requires_metadata() {
        let doc = json!({ "trends": [] });
        assert!(FinalAnalysis::from_document(doc.as_object().unwrap()).is_err());
    }
}
