use crate::collector::traits::MarketDataSource;
use crate::config::{CollectorConfig, Credentials};
use crate::error::CollectorError;
use crate::model::{NewsArticle, QueryParams, RawMarketData, SearchResult};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{info, warn};

/// Collects Google results through SerpAPI and articles through NewsAPI.
pub struct WebCollector {
    client: Client,
    config: CollectorConfig,
    serpapi_key: Option<String>,
    newsapi_key: Option<String>,
}

impl WebCollector {
    pub fn new(config: &CollectorConfig, credentials: &Credentials) -> Result<Self, CollectorError> {
        let client = Client::builder()
            .user_agent("market-intel/0.1")
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| CollectorError::Http(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
            serpapi_key: credentials.serpapi_api_key.clone(),
            newsapi_key: credentials.newsapi_api_key.clone(),
        })
    }

    fn search_query(params: &QueryParams) -> String {
        format!("{} market trends {}", params.market, params.timeframe)
    }

    pub async fn google_search(&self, params: &QueryParams) -> Result<Vec<SearchResult>, CollectorError> {
        let key = self.serpapi_key.as_deref().ok_or_else(|| CollectorError::MissingApiKey {
            env_var: self.config.serpapi_key_env.clone(),
        })?;
        let query = Self::search_query(params);
        let payload = self
            .get_json(
                &self.config.serpapi_url,
                &[("engine", "google"), ("q", query.as_str()), ("api_key", key)],
            )
            .await?;
        Ok(parse_search_results(&payload))
    }

    pub async fn get_news(&self, params: &QueryParams) -> Result<Vec<NewsArticle>, CollectorError> {
        let key = self.newsapi_key.as_deref().ok_or_else(|| CollectorError::MissingApiKey {
            env_var: self.config.newsapi_key_env.clone(),
        })?;
        let payload = self
            .get_json(
                &self.config.newsapi_url,
                &[("q", params.market.as_str()), ("apiKey", key), ("sortBy", "relevancy")],
            )
            .await?;
        Ok(parse_news_articles(&payload))
    }

    async fn get_json(&self, url: &str, query: &[(&str, &str)]) -> Result<Value, CollectorError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| CollectorError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "unknown".into());
            return Err(CollectorError::Http(format!("[{}] {}", status, body)));
        }
        response
            .json::<Value>()
            .await
            .map_err(|e| CollectorError::Decode(e.to_string()))
    }
}

#[async_trait::async_trait]
impl MarketDataSource for WebCollector {
    async fn research_market(&self, params: &QueryParams) -> RawMarketData {
        let (news, search) = tokio::join!(self.get_news(params), self.google_search(params));

        let news_articles = news.unwrap_or_else(|e| {
            warn!("News collection failed: {}", e);
            Vec::new()
        });
        let search_results = search.unwrap_or_else(|e| {
            warn!("Web search failed: {}", e);
            Vec::new()
        });
        info!(
            articles = news_articles.len(),
            results = search_results.len(),
            "Collected market data"
        );

        RawMarketData {
            news_articles,
            search_results,
        }
    }
}

fn text_field(entry: &Value, key: &str) -> Option<String> {
    entry.get(key).and_then(Value::as_str).map(str::to_owned)
}

/// Maps a SerpAPI payload's `organic_results` into search results.
pub fn parse_search_results(payload: &Value) -> Vec<SearchResult> {
    payload
        .get("organic_results")
        .and_then(Value::as_array)
        .map(|results| {
            results
                .iter()
                .map(|r| SearchResult {
                    title: text_field(r, "title").unwrap_or_default(),
                    snippet: text_field(r, "snippet").unwrap_or_default(),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Maps a NewsAPI payload's `articles` into news articles.
pub fn parse_news_articles(payload: &Value) -> Vec<NewsArticle> {
    payload
        .get("articles")
        .and_then(Value::as_array)
        .map(|articles| {
            articles
                .iter()
                .map(|a| NewsArticle {
                    title: text_field(a, "title").unwrap_or_default(),
                    description: text_field(a, "description"),
                })
                .collect()
        })
        .unwrap_or_default()
}
