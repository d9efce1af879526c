// Free-text research query to structured parameters
use crate::error::{LlmError, QueryError};
use crate::llm::{CompletionProvider, CompletionRequest};
use crate::model::QueryParams;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

const SYSTEM_PROMPT: &str = "Get principal entities in JSON format:
- market (str): Principal market
- companies (list): Principal companies
- timeframe (str): Time horizon
- geography (str): Location";

pub struct QueryParser {
    provider: Arc<dyn CompletionProvider>,
}

impl QueryParser {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    pub async fn parse_query(&self, query: &str) -> Result<QueryParams, QueryError> {
        let request = CompletionRequest::new(query).with_system(SYSTEM_PROMPT).json();
        let text = self.provider.complete(request).await?;
        let params = parse_params(&text)?;
        info!(
            market = %params.market,
            timeframe = %params.timeframe,
            geography = %params.geography,
            "Parsed research query"
        );
        Ok(params)
    }
}

fn parse_params(text: &str) -> Result<QueryParams, QueryError> {
    let value: Value = serde_json::from_str(text).map_err(LlmError::InvalidJson)?;
    serde_json::from_value(value).map_err(QueryError::InvalidParams)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedProvider;

    #[tokio::test]
    async fn parses_full_response() {
        let provider = Arc::new(ScriptedProvider::new(vec![Ok(r#"{
            "market": "EV",
            "companies": ["Tesla", "SEAT"],
            "timeframe": "2024",
            "geography": "Spain"
        }"#
        .into())]));
        let params = QueryParser::new(provider.clone())
            .parse_query("EV market in Spain in 2024")
            .await
            .unwrap();

        assert_eq!(params.market, "EV");
        assert_eq!(params.companies, vec!["Tesla".to_string(), "SEAT".to_string()]);
        assert_eq!(params.geography, "Spain");

        let request = &provider.requests()[0];
        assert!(request.json_mode);
        assert_eq!(request.user, "EV market in Spain in 2024");
        assert_eq!(request.temperature, None);
    }

    #[test]
    fn missing_market_is_rejected() {
        let err = parse_params(r#"{"companies": []}"#).unwrap_err();
        assert!(matches!(err, QueryError::InvalidParams(_)));
    }

    #[test]
    fn non_json_is_an_llm_error() {
        let err = parse_params("market: EV").unwrap_err();
        assert!(matches!(err, QueryError::Llm(LlmError::InvalidJson(_))));
    }
}
