use clap::Parser;
use market_intel::analyzer::{AnalysisEngine, TracingSink};
use market_intel::collector::{MarketDataSource, WebCollector};
use market_intel::config::{AppConfig, Credentials, load_config};
use market_intel::error::AppError;
use market_intel::llm::{CompletionProvider, OpenAiClient};
use market_intel::parser::QueryParser;
use market_intel::report::ReportGenerator;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Generate an executive market-intelligence report from a research query.
#[derive(Debug, Parser)]
#[command(name = "market-intel", version)]
struct Cli {
    /// Research query, e.g. "EV market in Spain in 2024"
    #[arg(required = true)]
    query: Vec<String>,

    /// Path to the JSON configuration file
    #[arg(long, default_value = "config.json")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Panic occurred: {:?}", panic_info);
    }));

    if let Err(e) = dotenvy::dotenv() {
        info!("No .env file loaded: {}", e);
    }

    let cli = Cli::parse();
    let query = cli.query.join(" ");

    match run(&query, &cli.config).await {
        Ok(report) => {
            println!("{}", report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Error in processing: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(query: &str, config_path: &std::path::Path) -> Result<String, AppError> {
    let config: AppConfig = load_config(config_path)?;
    let credentials = Credentials::from_env(&config);
    info!(?credentials, model = %config.llm.model, "Configuration loaded");

    let provider: Arc<dyn CompletionProvider> =
        Arc::new(OpenAiClient::new(&config.llm, credentials.openai_api_key.clone())?);

    info!("Parsing query...");
    let params = QueryParser::new(provider.clone()).parse_query(query).await?;

    info!("Collecting data...");
    let market_data = match WebCollector::new(&config.collector, &credentials) {
        Ok(collector) => collector.research_market(&params).await,
        Err(e) => {
            error!("Collector unavailable, continuing without data: {}", e);
            Default::default()
        }
    };

    info!("Analyzing trends...");
    let engine = AnalysisEngine::from_config(provider.clone(), &config);
    let analysis = engine.analyze_market(&market_data, &TracingSink).await?;

    info!("Generating report...");
    let report = ReportGenerator::new(provider, &config.llm)
        .create_report(&analysis)
        .await?;

    info!("Complete!");
    Ok(report)
}
