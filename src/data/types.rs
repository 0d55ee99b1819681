use chrono::NaiveDate;
use serde::Serialize;

use crate::error::MarketDataError;

pub type DataResult<T> = Result<T, MarketDataError>;

/// One requested key (symbol or index name) paired with its outcome.
pub type Slot<T> = (String, DataResult<T>);

/// Descriptive fields as reported by the provider. Every field is optional;
/// the provider fills in whatever it has.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProviderInfo {
    pub long_name: Option<String>,
    pub current_price: Option<f64>,
    pub regular_market_price: Option<f64>,
    pub previous_close: Option<f64>,
    pub market_cap: Option<f64>,
    pub trailing_pe: Option<f64>,
    pub forward_pe: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub fifty_two_week_high: Option<f64>,
    pub fifty_two_week_low: Option<f64>,
    pub volume: Option<u64>,
    pub average_volume: Option<u64>,
    pub sector: Option<String>,
    pub industry: Option<String>,
}

impl ProviderInfo {
    /// Current price, falling back to the regular-market price.
    pub fn price(&self) -> Option<f64> {
        self.current_price.or(self.regular_market_price)
    }

    /// A payload with no name and no price of any kind describes nothing.
    pub fn is_empty(&self) -> bool {
        self.long_name.is_none() && self.price().is_none() && self.previous_close.is_none()
    }
}

/// A news article as reported by the provider.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProviderNews {
    pub title: Option<String>,
    pub publisher: Option<String>,
    pub link: Option<String>,
    /// Unix seconds
    pub publish_time: Option<i64>,
    pub kind: Option<String>,
}

/// One OHLCV row of a price history, dated in the exchange's time zone.
#[derive(Clone, Debug, PartialEq)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct QuoteSnapshot {
    pub ticker: String,
    pub company_name: Option<String>,
    pub current_price: Option<f64>,
    pub previous_close: Option<f64>,
    pub market_cap: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub forward_pe: Option<f64>,
    pub dividend_yield: Option<f64>,
    #[serde(rename = "52_week_high")]
    pub fifty_two_week_high: Option<f64>,
    #[serde(rename = "52_week_low")]
    pub fifty_two_week_low: Option<f64>,
    pub volume: Option<u64>,
    pub avg_volume: Option<u64>,
    pub sector: Option<String>,
    pub industry: Option<String>,
}

impl QuoteSnapshot {
    pub fn from_info(ticker: &str, info: ProviderInfo) -> Self {
        Self {
            ticker: ticker.to_string(),
            current_price: info.price(),
            company_name: info.long_name,
            previous_close: info.previous_close,
            market_cap: info.market_cap,
            pe_ratio: info.trailing_pe,
            forward_pe: info.forward_pe,
            dividend_yield: info.dividend_yield,
            fifty_two_week_high: info.fifty_two_week_high,
            fifty_two_week_low: info.fifty_two_week_low,
            volume: info.volume,
            avg_volume: info.average_volume,
            sector: info.sector,
            industry: info.industry,
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewsItem {
    pub title: Option<String>,
    pub publisher: Option<String>,
    pub link: Option<String>,
    /// Local time, `%Y-%m-%d %H:%M:%S`
    pub publish_time: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct HistoricalSummary {
    pub ticker: String,
    pub period: String,
    pub interval: String,
    pub data_points: usize,
    pub latest_close: f64,
    pub period_high: f64,
    pub period_low: f64,
    pub period_avg_volume: f64,
    pub price_change: f64,
    pub price_change_percent: Option<f64>,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct IndexSnapshot {
    pub ticker: String,
    pub current_price: f64,
    pub previous_close: Option<f64>,
    pub change: Option<f64>,
    pub change_percent: Option<f64>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ComparisonEntry {
    pub company_name: Option<String>,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub pe_ratio: Option<f64>,
    #[serde(rename = "3mo_performance")]
    pub three_month_performance: Option<f64>,
    /// Standard deviation of daily returns, in percent
    pub volatility: Option<f64>,
    pub sector: Option<String>,
}
