use async_trait::async_trait;

use crate::error::ProviderError;

use super::types::{Bar, ProviderInfo, ProviderNews};

pub type ProviderResult<T> = Result<T, ProviderError>;

/// The raw upstream seam. Implementations do a single round trip per call
/// and keep no data between calls.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch_info(&self, symbol: &str) -> ProviderResult<ProviderInfo>;

    /// News in provider order; at most `count` items are requested but the
    /// provider may return more.
    async fn fetch_news(&self, symbol: &str, count: usize) -> ProviderResult<Vec<ProviderNews>>;

    /// Price history, oldest first. An empty vector is a valid answer.
    async fn fetch_history(&self, symbol: &str, period: &str, interval: &str) -> ProviderResult<Vec<Bar>>;
}
