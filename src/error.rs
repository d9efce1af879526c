// Error types for every stage of the report pipeline
use crate::analyzer::schema::AnalysisKind;

/// Errors from the LLM text-completion capability.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("request failed: {message}")]
    Request { message: String },

    #[error("provider responded [{status}]: {body}")]
    Http { status: u16, body: String },

    #[error("rate limited by provider")]
    RateLimited,

    #[error("authentication rejected by provider")]
    AuthFailed,

    #[error("provider returned no completion content")]
    EmptyResponse,

    #[error("completion is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("API key missing: set {env_var}")]
    MissingApiKey { env_var: String },
}

/// Errors raised while producing a structured analysis.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("{kind} response does not match its schema: {source}")]
    Schema {
        kind: AnalysisKind,
        #[source]
        source: serde_json::Error,
    },

    #[error("{kind} response is not a JSON object")]
    NotAnObject { kind: AnalysisKind },

    #[error("{kind} analysis failed after {attempts} attempts: {source}")]
    RetriesExhausted {
        kind: AnalysisKind,
        attempts: u32,
        #[source]
        source: Box<AnalysisError>,
    },
}

/// Errors from the upstream search/news sources. These never leave the collector.
#[derive(Debug, thiserror::Error)]
pub enum CollectorError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API key missing: set {env_var}")]
    MissingApiKey { env_var: String },

    #[error("could not decode payload: {0}")]
    Decode(String),
}

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("query parameters missing field: {0}")]
    InvalidParams(#[source] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("analysis is missing data required for the report: {0}")]
    IncompleteAnalysis(#[source] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Top-level error for the binary front-end.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("query parsing failed: {0}")]
    Query(#[from] QueryError),

    #[error("analysis failed: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("report generation failed: {0}")]
    Report(#[from] ReportError),

    #[error("LLM client error: {0}")]
    Llm(#[from] LlmError),
}
