// Analyzer module: aggregates the stages of the structured analysis pipeline.

pub mod chunker;
pub mod engine;
pub mod findings;
pub mod invoker;
pub mod merger;
pub mod postprocess;
pub mod schema;

// Re-export the main entry points for ease of use.
pub use engine::AnalysisEngine;
pub use findings::{Finding, FindingSink, RecordingSink, TracingSink};
pub use schema::AnalysisKind;
