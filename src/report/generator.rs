// Executive Markdown report rendered from a finished analysis
use crate::config::LlmConfig;
use crate::error::ReportError;
use crate::llm::{CompletionProvider, CompletionRequest};
use crate::model::{AnalysisDocument, CompetitorView, FinalAnalysis, SwotCategoryView};
use crate::utils::{capitalize_first, format_day};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

const TABLE_ROWS: usize = 5;
const CELL_ITEMS: usize = 2;

pub struct ReportGenerator {
    provider: Arc<dyn CompletionProvider>,
    temperature: f32,
    top_p: f32,
}

impl ReportGenerator {
    pub fn new(provider: Arc<dyn CompletionProvider>, config: &LlmConfig) -> Self {
        Self {
            provider,
            temperature: config.report_temperature,
            top_p: config.report_top_p,
        }
    }

    pub async fn create_report(&self, analysis: &AnalysisDocument) -> Result<String, ReportError> {
        let analysis =
            FinalAnalysis::from_document(analysis).map_err(ReportError::IncompleteAnalysis)?;
        let request = CompletionRequest::new(build_prompt(&analysis))
            .with_temperature(self.temperature)
            .with_top_p(self.top_p);
        let report = self.provider.complete(request).await?;
        info!(chars = report.len(), "Report generated");
        Ok(report)
    }
}

pub fn build_prompt(data: &FinalAnalysis) -> String {
    format!(
        r#"
As a senior strategic director, analyze this market data and generate an executive report in Markdown:

# Required Structure:
## 🎯 Executive Summary (1 paragraph)
- Key market dynamics
- Main strategic opportunities
- Critical risks to mitigate

## 📊 Trend Analysis
- Top 3 disruptive trends
- Sector growth projection
- Relevant emerging technologies

## 🥇 Competitive Landscape
### Comparison Table (Top 5)
{table}

### Strategic Map
- Positioning by market segment
- Key competitive advantages

## 🚀 Strategic Recommendations
- Investment priorities (short/medium term)
- Recommended strategic alliances
- Technological innovations to be developed

## ✅ Action Plan
- Key initiatives for the next 90 days
- Success metrics (KPIs)
- Recommended resource allocation

# Input Data:
{input}

# Formatting Instructions:
1. Use executive but concise language
2. Highlight key figures in bold
3. Include a condensed SWOT analysis
4. Prioritize actionable insights
"#,
        table = format_competitors_table(&data.competitors.top_competitors),
        input = format_input_data(data),
    )
}

pub fn format_competitors_table(competitors: &[CompetitorView]) -> String {
    let mut table = String::from("| Company | Participation | Key Strengths | Critical Weaknesses |\n");
    table.push_str("|---------|---------------|------------------|----------------------|\n");
    for comp in competitors.iter().take(TABLE_ROWS) {
        table.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            comp.name,
            format_market_share(&comp.market_share),
            first_items(&comp.strengths),
            first_items(&comp.weaknesses),
        ));
    }
    table
}

pub fn format_market_share(value: &Value) -> String {
    match value {
        Value::Number(n) => format!("{}%", n),
        _ => "N/A".into(),
    }
}

fn first_items(items: &[String]) -> String {
    items.iter().take(CELL_ITEMS).cloned().collect::<Vec<_>>().join(", ")
}

fn format_input_data(data: &FinalAnalysis) -> String {
    let mut out = format!(
        "\n### Market Context\n- Analysis Date: {}\n- Data Sources: {}\n- Analysis Quality: {}/1.0\n",
        format_day(&data.metadata.processing_date),
        data.metadata.data_sources.join(", "),
        data.metadata.quality_score,
    );
    if let Some(summary) = data.summary.as_deref().filter(|s| !s.is_empty()) {
        out.push_str(&format!("\n### Trend Summary\n{}\n", summary));
    }
    out.push_str(&format!("\n### Trends\n{}\n", format_trends(&data.trends)));
    out.push_str(&format!("\n### SWOT Analysis\n{}\n", format_swot(data)));
    out
}

fn format_trends(trends: &[Value]) -> String {
    let lines: Vec<String> = trends
        .iter()
        .filter_map(|t| match t {
            Value::String(text) => Some(format!("- {}", text)),
            Value::Object(fields) => fields
                .get("name")
                .and_then(Value::as_str)
                .map(|name| match fields.get("impact_score").and_then(Value::as_f64) {
                    Some(score) => format!("- {} (impact {:.2})", name, score),
                    None => format!("- {}", name),
                }),
            _ => None,
        })
        .collect();
    if lines.is_empty() {
        "- No clear trends were detected".into()
    } else {
        lines.join("\n")
    }
}

fn format_swot(data: &FinalAnalysis) -> String {
    let categories: [(&str, &SwotCategoryView); 4] = [
        ("strengths", &data.swot.strengths),
        ("weaknesses", &data.swot.weaknesses),
        ("opportunities", &data.swot.opportunities),
        ("threats", &data.swot.threats),
    ];
    categories
        .iter()
        .map(|(name, category)| {
            format!(
                "**{}:** {}\nEvidence: {}\n",
                capitalize_first(name),
                category.description,
                first_items(&category.evidence)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
