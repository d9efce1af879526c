use crate::analyzer::findings::{Finding, FindingSink};
use crate::model::{AnalysisDocument, AnalysisMetadata};
use crate::utils::capitalize_first;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tracing::{info, warn};

const TEXT_FIELDS: [&str; 3] = ["trends", "competitive_landscape", "summary"];
const DEDUP_FIELDS: [&str; 3] = ["trends", "strengths", "weaknesses"];
const REQUIRED_COMPETITOR_FIELDS: [&str; 2] = ["name", "market_share"];

const MIN_COMPETITORS: usize = 2;
const MIN_TRENDS: usize = 2;
const MAX_WEAKNESSES: usize = 5;

const BASE_CONFIDENCE: f64 = 0.3;
const PER_TREND_CONFIDENCE: f64 = 0.1;
const MAX_TREND_CONFIDENCE: f64 = 0.3;

/// Cleans, checks and stamps an assembled analysis.
pub struct Postprocessor {
    model_version: String,
    data_sources: Vec<String>,
}

impl Postprocessor {
    pub fn new(model_version: impl Into<String>, data_sources: Vec<String>) -> Self {
        Self {
            model_version: model_version.into(),
            data_sources,
        }
    }

    pub fn process(&self, analysis: AnalysisDocument, sink: &dyn FindingSink) -> AnalysisDocument {
        self.process_at(analysis, sink, Utc::now())
    }

    /// Runs every stage in order with an explicit processing time.
    pub fn process_at(
        &self,
        analysis: AnalysisDocument,
        sink: &dyn FindingSink,
        now: DateTime<Utc>,
    ) -> AnalysisDocument {
        let analysis = normalize_texts(analysis);
        let analysis = remove_duplicates(analysis);
        validate_data_structure(&analysis, sink);
        let analysis = strategic_sorting(analysis);
        validate_analysis_quality(&analysis, sink);
        let metadata = AnalysisMetadata {
            processing_date: now,
            data_sources: self.data_sources.clone(),
            model_version: self.model_version.clone(),
            quality_score: quality_score(&analysis),
        };
        add_metadata(analysis, &metadata)
    }
}

/// Trims and capitalizes strings under the top-level text fields, recursively.
pub fn normalize_texts(mut analysis: AnalysisDocument) -> AnalysisDocument {
    for field in TEXT_FIELDS {
        if let Some(value) = analysis.get_mut(field) {
            normalize_value(value);
        }
    }
    analysis
}

fn normalize_value(value: &mut Value) {
    match value {
        Value::String(text) => *text = capitalize_first(text.trim()),
        Value::Array(items) => items.iter_mut().for_each(normalize_value),
        Value::Object(fields) => fields.values_mut().for_each(normalize_value),
        _ => {}
    }
}

#[derive(PartialEq)]
enum DedupKey<'a> {
    Object(&'a Map<String, Value>),
    Text(String),
}

fn dedup_key(value: &Value) -> DedupKey<'_> {
    match value {
        Value::Object(fields) => DedupKey::Object(fields),
        Value::String(text) => DedupKey::Text(text.clone()),
        other => DedupKey::Text(other.to_string()),
    }
}

/// Drops repeated entries from top-level list fields, keeping first occurrences.
pub fn remove_duplicates(mut analysis: AnalysisDocument) -> AnalysisDocument {
    for field in DEDUP_FIELDS {
        let Some(Value::Array(items)) = analysis.get(field) else {
            continue;
        };
        let unique = unique_items(items);
        let removed = items.len() - unique.len();
        if removed > 0 {
            info!(field, removed, "Removed duplicate entries");
        }
        analysis.insert(field.to_string(), Value::Array(unique));
    }
    analysis
}

fn unique_items(items: &[Value]) -> Vec<Value> {
    let mut seen: Vec<DedupKey<'_>> = Vec::with_capacity(items.len());
    let mut unique = Vec::with_capacity(items.len());
    for item in items {
        let key = dedup_key(item);
        if !seen.contains(&key) {
            seen.push(key);
            unique.push(item.clone());
        }
    }
    unique
}

fn top_competitors(analysis: &AnalysisDocument) -> &[Value] {
    analysis
        .get("competitors")
        .and_then(|c| c.get("top_competitors"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Reports competitors lacking required fields or carrying a non-numeric share.
/// Booleans count as numeric shares.
pub fn validate_data_structure(analysis: &AnalysisDocument, sink: &dyn FindingSink) {
    for competitor in top_competitors(analysis) {
        let name = competitor.get("name").and_then(Value::as_str).map(str::to_owned);
        let missing: Vec<String> = REQUIRED_COMPETITOR_FIELDS
            .iter()
            .filter(|field| competitor.get(**field).is_none())
            .map(|field| field.to_string())
            .collect();
        if !missing.is_empty() {
            sink.record(Finding::MissingCompetitorFields {
                competitor: name.clone(),
                missing,
            });
        }
        if competitor
            .get("market_share")
            .is_some_and(|share| !(share.is_number() || share.is_boolean()))
        {
            sink.record(Finding::InvalidMarketShare { competitor: name });
        }
    }
}

fn impact_score(trend: &Value) -> f64 {
    let score = match trend.get("impact_score") {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        Some(Value::Bool(b)) => f64::from(u8::from(*b)),
        _ => 0.0,
    };
    if score.is_nan() { 0.0 } else { score }
}

/// Orders scored trends by descending impact; unscored entries follow in original order.
pub fn strategic_sorting(mut analysis: AnalysisDocument) -> AnalysisDocument {
    let Some(Value::Array(trends)) = analysis.get_mut("trends") else {
        return analysis;
    };
    let (mut scored, unscored): (Vec<Value>, Vec<Value>) = std::mem::take(trends)
        .into_iter()
        .partition(|t| t.as_object().is_some_and(|o| o.contains_key("impact_score")));
    scored.sort_by(|a, b| impact_score(b).total_cmp(&impact_score(a)));
    scored.extend(unscored);
    *trends = scored;
    analysis
}

fn list_len(value: Option<&Value>) -> usize {
    value.and_then(Value::as_array).map_or(0, Vec::len)
}

/// Flags thin or lopsided analyses. Never changes the analysis.
pub fn validate_analysis_quality(analysis: &AnalysisDocument, sink: &dyn FindingSink) {
    let competitors = top_competitors(analysis).len();
    if competitors < MIN_COMPETITORS {
        sink.record(Finding::TooFewCompetitors {
            count: competitors,
            min: MIN_COMPETITORS,
        });
    }

    let trends = list_len(analysis.get("trends"));
    if trends < MIN_TRENDS {
        sink.record(Finding::TooFewTrends {
            count: trends,
            min: MIN_TRENDS,
        });
    }

    let weaknesses = list_len(
        analysis
            .get("swot")
            .and_then(|s| s.get("weaknesses"))
            .and_then(|w| w.get("evidence")),
    );
    if weaknesses > MAX_WEAKNESSES {
        sink.record(Finding::TooManyWeaknesses {
            count: weaknesses,
            max: MAX_WEAKNESSES,
        });
    }
}

/// Heuristic confidence: a base plus a capped bonus per trend, within [0, 1].
pub fn quality_score(analysis: &AnalysisDocument) -> f64 {
    let trends = list_len(analysis.get("trends")) as f64;
    let score = BASE_CONFIDENCE + (trends * PER_TREND_CONFIDENCE).min(MAX_TREND_CONFIDENCE);
    score.clamp(0.0, 1.0)
}

pub fn add_metadata(mut analysis: AnalysisDocument, metadata: &AnalysisMetadata) -> AnalysisDocument {
    match serde_json::to_value(metadata) {
        Ok(value) => {
            analysis.insert("metadata".into(), value);
        }
        Err(e) => warn!("Failed to serialize analysis metadata: {}", e),
    }
    analysis
}
