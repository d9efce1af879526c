pub mod fetcher;
pub mod traits;

pub use fetcher::WebCollector;
pub use traits::MarketDataSource;
