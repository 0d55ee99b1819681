//! The market data operations exposed as LLM-callable tools.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::constants::tools::{DEFAULT_INTERVAL, DEFAULT_MAX_NEWS, DEFAULT_PERIOD};
use crate::data::types::{DataResult, Slot};
use crate::data::MarketDataClient;
use crate::llm::ToolSpec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarketTool {
    StockInfo,
    StockNews,
    HistoricalData,
    MarketIndices,
    CompareStocks,
}

#[derive(Deserialize)]
struct TickerArgs {
    ticker: String,
}

#[derive(Deserialize)]
struct NewsArgs {
    ticker: String,
    #[serde(default = "default_max_news")]
    max_news: usize,
}

#[derive(Deserialize)]
struct HistoryArgs {
    ticker: String,
    #[serde(default = "default_period")]
    period: String,
    #[serde(default = "default_interval")]
    interval: String,
}

#[derive(Deserialize)]
struct CompareArgs {
    tickers: Vec<String>,
}

fn default_max_news() -> usize {
    DEFAULT_MAX_NEWS
}

fn default_period() -> String {
    DEFAULT_PERIOD.to_string()
}

fn default_interval() -> String {
    DEFAULT_INTERVAL.to_string()
}

impl MarketTool {
    pub const ALL: [MarketTool; 5] = [
        MarketTool::StockInfo,
        MarketTool::StockNews,
        MarketTool::HistoricalData,
        MarketTool::MarketIndices,
        MarketTool::CompareStocks,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MarketTool::StockInfo => "get_stock_info",
            MarketTool::StockNews => "get_stock_news",
            MarketTool::HistoricalData => "get_historical_data",
            MarketTool::MarketIndices => "get_market_indices",
            MarketTool::CompareStocks => "compare_stocks",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    pub fn description(self) -> &'static str {
        match self {
            MarketTool::StockInfo => "Get comprehensive stock information for a ticker: current price, market cap, PE ratio, dividend yield, 52-week high/low, volume, sector and industry.",
            MarketTool::StockNews => "Get the latest news articles for a ticker with title, publisher, link and publish time.",
            MarketTool::HistoricalData => "Get summary statistics of historical prices for a ticker: latest close, period high/low, average volume and price change over the period.",
            MarketTool::MarketIndices => "Get the latest close and daily change for major market indices (S&P 500, Dow Jones, NASDAQ, Russell 2000, VIX).",
            MarketTool::CompareStocks => "Compare multiple tickers side by side: price, market cap, PE ratio, sector, 3-month performance and volatility.",
        }
    }

    /// JSON schema of the tool arguments.
    pub fn parameters(self) -> Value {
        match self {
            MarketTool::StockInfo => json!({
                "type": "object",
                "properties": {
                    "ticker": { "type": "string", "description": "Stock ticker symbol (e.g. 'AAPL', 'GOOGL')" }
                },
                "required": ["ticker"]
            }),
            MarketTool::StockNews => json!({
                "type": "object",
                "properties": {
                    "ticker": { "type": "string", "description": "Stock ticker symbol (e.g. 'AAPL', 'GOOGL')" },
                    "max_news": { "type": "integer", "minimum": 0, "description": "Maximum number of articles to return (default 10)" }
                },
                "required": ["ticker"]
            }),
            MarketTool::HistoricalData => json!({
                "type": "object",
                "properties": {
                    "ticker": { "type": "string", "description": "Stock ticker symbol (e.g. 'AAPL', 'GOOGL')" },
                    "period": { "type": "string", "description": "Time period: 1d, 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y, max (default 1mo)" },
                    "interval": { "type": "string", "description": "Data interval: 1m, 5m, 15m, 1h, 1d, 1wk, 1mo (default 1d)" }
                },
                "required": ["ticker"]
            }),
            MarketTool::MarketIndices => json!({
                "type": "object",
                "properties": {}
            }),
            MarketTool::CompareStocks => json!({
                "type": "object",
                "properties": {
                    "tickers": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Ticker symbols to compare"
                    }
                },
                "required": ["tickers"]
            }),
        }
    }

    pub fn spec(self) -> ToolSpec {
        ToolSpec {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters(),
        }
    }

    /// Run the tool against `client`. Never fails: bad arguments and data
    /// errors both come back as `{"error": ...}` markers.
    pub async fn invoke(self, client: &MarketDataClient, arguments: &str) -> Value {
        match self {
            MarketTool::StockInfo => match self.parse_args::<TickerArgs>(arguments) {
                Ok(args) => result_json(&client.fetch_quote_snapshot(&args.ticker).await),
                Err(e) => e,
            },
            MarketTool::StockNews => match self.parse_args::<NewsArgs>(arguments) {
                Ok(args) => match client.fetch_news(&args.ticker, args.max_news).await {
                    Ok(items) => to_json(&items),
                    Err(e) => json!([{ "error": e.to_string() }]),
                },
                Err(e) => json!([e]),
            },
            MarketTool::HistoricalData => match self.parse_args::<HistoryArgs>(arguments) {
                Ok(args) => result_json(
                    &client
                        .fetch_historical_summary(&args.ticker, &args.period, &args.interval)
                        .await,
                ),
                Err(e) => e,
            },
            MarketTool::MarketIndices => slots_json(&client.fetch_index_snapshots().await),
            MarketTool::CompareStocks => match self.parse_args::<CompareArgs>(arguments) {
                Ok(args) => slots_json(&client.compare_symbols(&args.tickers).await),
                Err(e) => e,
            },
        }
    }

    fn parse_args<T: DeserializeOwned>(self, arguments: &str) -> Result<T, Value> {
        let arguments = if arguments.trim().is_empty() { "{}" } else { arguments };
        serde_json::from_str(arguments).map_err(|e| {
            json!({ "error": format!("Invalid arguments for {}: {}", self.name(), e) })
        })
    }
}

fn to_json<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_else(|e| json!({ "error": e.to_string() }))
}

pub fn result_json<T: Serialize>(result: &DataResult<T>) -> Value {
    match result {
        Ok(value) => to_json(value),
        Err(e) => json!({ "error": e.to_string() }),
    }
}

/// Render slots as a JSON object keyed by symbol or index name.
pub fn slots_json<T: Serialize>(slots: &[Slot<T>]) -> Value {
    let mut map = Map::with_capacity(slots.len());
    for (key, result) in slots {
        map.insert(key.clone(), result_json(result));
    }
    Value::Object(map)
}
