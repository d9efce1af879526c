//! Market research pipeline: collect web and news data for a query, extract
//! structured trend, competitor and SWOT analysis with an LLM, and render an
//! executive report.

pub mod analyzer;
pub mod collector;
pub mod config;
pub mod error;
pub mod llm;
pub mod model;
pub mod normalizer;
pub mod parser;
pub mod report;
pub mod testing;
pub mod utils;
