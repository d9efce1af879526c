use crate::model::{QueryParams, RawMarketData};

/// Gathers raw web and news data for a query. Failed sources come back empty.
#[async_trait::async_trait]
pub trait MarketDataSource: Send + Sync {
    async fn research_market(&self, params: &QueryParams) -> RawMarketData;
}
