use chrono::{DateTime, Local};
use std::sync::Arc;
use tracing::{info, warn};

use crate::constants::{formats::NEWS_TIME_FORMAT, indices, tools};
use crate::error::MarketDataError;

use super::stats;
use super::traits::MarketDataProvider;
use super::types::{
    ComparisonEntry, DataResult, HistoricalSummary, IndexSnapshot, NewsItem, QuoteSnapshot, Slot,
};

/// The five market data operations handed to the Researcher.
///
/// Stateless: every call goes straight to the provider, and every failure is
/// returned as a value attributed to the symbol that caused it.
#[derive(Clone)]
pub struct MarketDataClient {
    provider: Arc<dyn MarketDataProvider>,
}

impl MarketDataClient {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    pub async fn fetch_quote_snapshot(&self, symbol: &str) -> DataResult<QuoteSnapshot> {
        info!("📊 [DATA] Quote snapshot for {}", symbol);
        let info = self
            .provider
            .fetch_info(symbol)
            .await
            .map_err(|e| MarketDataError::from_provider("data", symbol, e))?;

        if info.is_empty() {
            return Err(MarketDataError::UnknownOrDelistedSymbol {
                what: "data",
                symbol: symbol.to_string(),
            });
        }

        Ok(QuoteSnapshot::from_info(symbol, info))
    }

    pub async fn fetch_news(&self, symbol: &str, max_items: usize) -> DataResult<Vec<NewsItem>> {
        info!("📊 [DATA] News for {} (max {})", symbol, max_items);
        if max_items == 0 {
            return Ok(Vec::new());
        }

        let raw = self
            .provider
            .fetch_news(symbol, max_items)
            .await
            .map_err(|e| MarketDataError::from_provider("news", symbol, e))?;

        Ok(raw
            .into_iter()
            .take(max_items)
            .map(|n| NewsItem {
                title: n.title,
                publisher: n.publisher,
                link: n.link,
                publish_time: n.publish_time.filter(|t| *t > 0).and_then(format_publish_time),
                kind: n.kind,
            })
            .collect())
    }

    pub async fn fetch_historical_summary(
        &self,
        symbol: &str,
        period: &str,
        interval: &str,
    ) -> DataResult<HistoricalSummary> {
        info!("📊 [DATA] History for {} (period={}, interval={})", symbol, period, interval);
        let bars = self
            .provider
            .fetch_history(symbol, period, interval)
            .await
            .map_err(|e| MarketDataError::from_provider("historical data", symbol, e))?;

        stats::summarize(symbol, period, interval, &bars)
    }

    /// One slot per tracked index, in a fixed order, whatever fails.
    pub async fn fetch_index_snapshots(&self) -> Vec<Slot<IndexSnapshot>> {
        info!("📊 [DATA] Market index snapshots");
        let mut slots = Vec::with_capacity(indices::TRACKED.len());

        for (symbol, name) in indices::TRACKED {
            let result = self
                .provider
                .fetch_history(symbol, indices::SNAPSHOT_PERIOD, indices::SNAPSHOT_INTERVAL)
                .await
                .map_err(|e| MarketDataError::from_provider("data", symbol, e))
                .and_then(|bars| stats::two_session_change(symbol, &bars));

            if let Err(e) = &result {
                warn!("⚠️ [DATA] Index {} unavailable: {}", name, e);
            }
            slots.push((name.to_string(), result));
        }

        slots
    }

    /// One slot per requested symbol, in request order. Duplicates are kept.
    pub async fn compare_symbols(&self, symbols: &[String]) -> Vec<Slot<ComparisonEntry>> {
        info!("📊 [DATA] Comparing {} symbols", symbols.len());
        let mut slots = Vec::with_capacity(symbols.len());

        for symbol in symbols {
            let result = self.compare_one(symbol).await;
            if let Err(e) = &result {
                warn!("⚠️ [DATA] Comparison slot for {} failed: {}", symbol, e);
            }
            slots.push((symbol.clone(), result));
        }

        slots
    }

    async fn compare_one(&self, symbol: &str) -> DataResult<ComparisonEntry> {
        let info = self
            .provider
            .fetch_info(symbol)
            .await
            .map_err(|e| MarketDataError::from_provider("data", symbol, e))?;

        let bars = self
            .provider
            .fetch_history(symbol, tools::COMPARISON_PERIOD, tools::COMPARISON_INTERVAL)
            .await
            .map_err(|e| MarketDataError::from_provider("data", symbol, e))?;

        if bars.is_empty() {
            return Err(MarketDataError::EmptySeries {
                symbol: symbol.to_string(),
            });
        }

        Ok(ComparisonEntry {
            current_price: info.price(),
            company_name: info.long_name,
            market_cap: info.market_cap,
            pe_ratio: info.trailing_pe,
            three_month_performance: stats::performance_pct(&bars),
            volatility: stats::volatility_pct(&bars),
            sector: info.sector,
        })
    }
}

fn format_publish_time(epoch_secs: i64) -> Option<String> {
    DateTime::from_timestamp(epoch_secs, 0).map(|utc| {
        utc.with_timezone(&Local)
            .format(NEWS_TIME_FORMAT)
            .to_string()
    })
}
