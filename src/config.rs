use crate::error::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    pub api_key_env: String,
    /// Sampling temperature for structured analysis calls.
    pub analysis_temperature: f32,
    pub report_temperature: f32,
    pub report_top_p: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".into(),
            model: "gpt-4-1106-preview".into(),
            api_key_env: "OPENAI_API_KEY".into(),
            analysis_temperature: 0.3,
            report_temperature: 0.3,
            report_top_p: 0.95,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Delay before the first retry, before clamping.
    pub base_backoff_ms: u64,
    pub min_backoff_ms: u64,
    pub max_backoff_ms: u64,
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_backoff_ms: 1_000,
            min_backoff_ms: 4_000,
            max_backoff_ms: 10_000,
            backoff_multiplier: 2.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChunkConfig {
    pub max_items: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self { max_items: 5 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    pub serpapi_url: String,
    pub newsapi_url: String,
    pub serpapi_key_env: String,
    pub newsapi_key_env: String,
    pub request_timeout_secs: u64,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            serpapi_url: "https://serpapi.com/search".into(),
            newsapi_url: "https://newsapi.org/v2/everything".into(),
            serpapi_key_env: "SERPAPI_API_KEY".into(),
            newsapi_key_env: "NEWSAPI_API_KEY".into(),
            request_timeout_secs: 20,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub llm: LlmConfig,
    pub retry: RetryConfig,
    pub chunking: ChunkConfig,
    pub collector: CollectorConfig,
    /// Labels recorded in the analysis metadata.
    pub data_sources: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            retry: RetryConfig::default(),
            chunking: ChunkConfig::default(),
            collector: CollectorConfig::default(),
            data_sources: vec!["web_search".into()],
        }
    }
}

impl RetryConfig {
    pub fn base_backoff(&self) -> Duration {
        Duration::from_millis(self.base_backoff_ms)
    }

    pub fn min_backoff(&self) -> Duration {
        Duration::from_millis(self.min_backoff_ms)
    }

    pub fn max_backoff(&self) -> Duration {
        Duration::from_millis(self.max_backoff_ms)
    }
}

/// API keys resolved once at startup and handed to each client explicitly.
#[derive(Clone, Default)]
pub struct Credentials {
    pub openai_api_key: Option<String>,
    pub serpapi_api_key: Option<String>,
    pub newsapi_api_key: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mask = |k: &Option<String>| if k.is_some() { "<set>" } else { "<unset>" };
        f.debug_struct("Credentials")
            .field("openai_api_key", &mask(&self.openai_api_key))
            .field("serpapi_api_key", &mask(&self.serpapi_api_key))
            .field("newsapi_api_key", &mask(&self.newsapi_api_key))
            .finish()
    }
}

impl Credentials {
    /// Reads the keys named in `config` from the process environment.
    pub fn from_env(config: &AppConfig) -> Self {
        let read = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self {
            openai_api_key: read(&config.llm.api_key_env),
            serpapi_api_key: read(&config.collector.serpapi_key_env),
            newsapi_api_key: read(&config.collector.newsapi_key_env),
        }
    }
}

/// Loads the configuration file; a missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "llm": { "model": "gpt-4o" }, "chunking": { "max_items": 3 } }"#)
                .unwrap();
        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.llm.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.chunking.max_items, 3);
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.data_sources, vec!["web_search".to_string()]);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = load_config(Path::new("does/not/exist.json")).unwrap();
        assert_eq!(config.chunking.max_items, 5);
        assert_eq!(config.retry.base_backoff(), Duration::from_secs(1));
        assert_eq!(config.retry.min_backoff(), Duration::from_secs(4));
        assert_eq!(config.retry.max_backoff(), Duration::from_secs(10));
    }

    #[test]
    fn credentials_debug_hides_keys() {
        let creds = Credentials {
            openai_api_key: Some("sk-secret".into()),
            ..Default::default()
        };
        let printed = format!("{:?}", creds);
        assert!(!printed.contains("sk-secret"));
        assert!(printed.contains("<set>"));
    }
}
