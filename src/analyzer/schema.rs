// Typed response schemas and prompts for each analysis kind
use crate::error::AnalysisError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisKind {
    Trends,
    Competitors,
    Swot,
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Trend {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub evidence: Vec<String>,
    pub impact_score: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrendAnalysis {
    pub trends: Vec<Trend>,
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Competitor {
    pub name: String,
    pub market_share: f64,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub recent_activity: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompetitorAnalysis {
    pub top_competitors: Vec<Competitor>,
    #[serde(default)]
    pub competitive_landscape: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SwotCategory {
    pub description: String,
    #[serde(default)]
    pub evidence: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SwotAnalysis {
    pub strengths: SwotCategory,
    pub weaknesses: SwotCategory,
    pub opportunities: SwotCategory,
    pub threats: SwotCategory,
}

const TRENDS_SYSTEM: &str = r#"Generates a trend analysis in JSON format:
{
    "trends": [{
        "name": str,
        "description": str,
        "evidence": [str],
        "impact_score": float
    }],
    "summary": str
}"#;

const COMPETITORS_SYSTEM: &str = r#"You are a senior strategic analyst. Return JSON with:
{
    "top_competitors": [{
        "name": str,
        "market_share": float,
        "strengths": [str],
        "weaknesses": [str],
        "recent_activity": [str]
    }],
    "competitive_landscape": str
}"#;

const SWOT_SYSTEM: &str = r#"Returns SWOT in JSON format:
{
    "strengths": { "description": str, "evidence": [str] },
    "weaknesses": { "description": str, "evidence": [str] },
    "opportunities": { "description": str, "evidence": [str] },
    "threats": { "description": str, "evidence": [str] }
}"#;

const TRENDS_TASK: &str =
    "Identify key market trends supported by quantitative and qualitative data";

const COMPETITORS_TASK: &str = "Analyze key competitors considering:
- Market share
- Competitive advantages
- Recent strategic moves
- Key financials";

const SWOT_TASK: &str = "Conduct a detailed SWOT analysis considering:
1. Target market strengths
2. Current weaknesses
3. Emerging opportunities
4. Competitive threats";

impl AnalysisKind {
    /// Key under which the result is stored in the assembled analysis.
    pub fn key(self) -> &'static str {
        match self {
            Self::Trends => "trends",
            Self::Competitors => "competitors",
            Self::Swot => "swot",
        }
    }

    /// System instruction describing the exact JSON shape expected back.
    pub fn system_prompt(self) -> &'static str {
        match self {
            Self::Trends => TRENDS_SYSTEM,
            Self::Competitors => COMPETITORS_SYSTEM,
            Self::Swot => SWOT_SYSTEM,
        }
    }

    pub fn task_prompt(self) -> &'static str {
        match self {
            Self::Trends => TRENDS_TASK,
            Self::Competitors => COMPETITORS_TASK,
            Self::Swot => SWOT_TASK,
        }
    }

    /// Checks one chunk response against this kind's schema.
    ///
    /// The response is returned as sent: optional fields the model left out stay
    /// absent, so merging a later chunk never clears keys an earlier one carried.
    pub fn validate(self, value: Value) -> Result<Map<String, Value>, AnalysisError> {
        match self {
            Self::Trends => self.check::<TrendAnalysis>(&value)?,
            Self::Competitors => self.check::<CompetitorAnalysis>(&value)?,
            Self::Swot => self.check::<SwotAnalysis>(&value)?,
        }
        match value {
            Value::Object(map) => Ok(map),
            _ => Err(AnalysisError::NotAnObject { kind: self }),
        }
    }

    fn check<T: DeserializeOwned>(self, value: &Value) -> Result<(), AnalysisError> {
        if !value.is_object() {
            return Err(AnalysisError::NotAnObject { kind: self });
        }
        T::deserialize(value)
            .map(drop)
            .map_err(|source| AnalysisError::Schema { kind: self, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn optional_fields_stay_absent() {
        let map = AnalysisKind::Trends
            .validate(json!({"trends": [{"name": "Solid-state", "impact_score": 0.7}]}))
            .unwrap();
        assert!(!map.contains_key("summary"));
        assert_eq!(map["trends"][0], json!({"name": "Solid-state", "impact_score": 0.7}));
    }

    #[test]
    fn swot_category_without_evidence_is_accepted_as_sent() {
        let map = AnalysisKind::Swot
            .validate(json!({
                "strengths": {"description": "s"},
                "weaknesses": {"description": "w"},
                "opportunities": {"description": "o", "evidence": ["x"]},
                "threats": {"description": "t"}
            }))
            .unwrap();
        assert_eq!(map["strengths"], json!({"description": "s"}));
        assert_eq!(map["opportunities"]["evidence"], json!(["x"]));
    }

    #[test]
    fn competitor_without_share_is_schema_error() {
        let err = AnalysisKind::Competitors
            .validate(json!({"top_competitors": [{"name": "Tesla"}]}))
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Schema { kind: AnalysisKind::Competitors, .. }));
    }

    #[test]
    fn swot_requires_all_categories() {
        let err = AnalysisKind::Swot
            .validate(json!({"strengths": {"description": "x", "evidence": []}}))
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Schema { .. }));
    }

    #[test]
    fn non_object_is_rejected() {
        let err = AnalysisKind::Trends.validate(json!([1, 2])).unwrap_err();
        assert!(matches!(err, AnalysisError::NotAnObject { kind: AnalysisKind::Trends }));
    }

    #[test]
    fn prompts_name_every_schema_field() {
        assert!(AnalysisKind::Trends.system_prompt().contains("impact_score"));
        assert!(AnalysisKind::Competitors.system_prompt().contains("market_share"));
        for field in ["strengths", "weaknesses", "opportunities", "threats"] {
            assert!(AnalysisKind::Swot.system_prompt().contains(field));
        }
    }
}
