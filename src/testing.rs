//! In-memory stand-ins for the market data provider and the chat model.

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

use crate::data::traits::{MarketDataProvider, ProviderResult};
use crate::data::types::{Bar, ProviderInfo, ProviderNews};
use crate::error::{AgentError, ProviderError};
use crate::llm::{ChatModel, ChatReply, ChatRequest, ToolCall};

#[derive(Default)]
pub struct MockProvider {
    pub info: HashMap<String, ProviderInfo>,
    pub news: HashMap<String, Vec<ProviderNews>>,
    pub history: HashMap<String, Vec<Bar>>,
    /// Symbols whose every request fails with HTTP 503
    pub unavailable: HashSet<String>,
    pub calls: Mutex<Vec<String>>,
}

impl MockProvider {
    pub fn with_info(mut self, symbol: &str, info: ProviderInfo) -> Self {
        self.info.insert(symbol.to_string(), info);
        self
    }

    pub fn with_news(mut self, symbol: &str, news: Vec<ProviderNews>) -> Self {
        self.news.insert(symbol.to_string(), news);
        self
    }

    pub fn with_history(mut self, symbol: &str, bars: Vec<Bar>) -> Self {
        self.history.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_unavailable(mut self, symbol: &str) -> Self {
        self.unavailable.insert(symbol.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(&self, symbol: &str) -> ProviderResult<()> {
        if self.unavailable.contains(symbol) {
            return Err(ProviderError::Http {
                status: 503,
                body: "service unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl MarketDataProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn fetch_info(&self, symbol: &str) -> ProviderResult<ProviderInfo> {
        self.record(format!("info:{}", symbol));
        self.check(symbol)?;
        self.info
            .get(symbol)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(symbol.to_string()))
    }

    async fn fetch_news(&self, symbol: &str, _count: usize) -> ProviderResult<Vec<ProviderNews>> {
        self.record(format!("news:{}", symbol));
        self.check(symbol)?;
        self.news
            .get(symbol)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(symbol.to_string()))
    }

    async fn fetch_history(&self, symbol: &str, period: &str, interval: &str) -> ProviderResult<Vec<Bar>> {
        self.record(format!("history:{}:{}:{}", symbol, period, interval));
        self.check(symbol)?;
        self.history
            .get(symbol)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(symbol.to_string()))
    }
}

/// Daily bars starting 2025-01-02, one per close.
pub fn bars_from_closes(closes: &[f64]) -> Vec<Bar> {
    let start = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, close)| Bar {
            date: start + Duration::days(i as i64),
            open: *close,
            high: close + 1.0,
            low: close - 1.0,
            close: *close,
            volume: 1_000 * (i as u64 + 1),
        })
        .collect()
}

pub fn company(name: &str, price: f64) -> ProviderInfo {
    ProviderInfo {
        long_name: Some(name.to_string()),
        current_price: Some(price),
        previous_close: Some(price - 1.0),
        market_cap: Some(1.0e12),
        trailing_pe: Some(30.0),
        sector: Some("Technology".to_string()),
        industry: Some("Software".to_string()),
        ..ProviderInfo::default()
    }
}

/// Replays canned replies in order and records every request.
#[derive(Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<ChatReply>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedModel {
    pub fn new(replies: Vec<ChatReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    async fn complete(&self, request: ChatRequest) -> Result<ChatReply, AgentError> {
        self.requests.lock().unwrap().push(request);
        Ok(self.replies.lock().unwrap().pop_front().unwrap_or_default())
    }
}

pub fn text(content: &str) -> ChatReply {
    ChatReply {
        content: Some(content.to_string()),
        tool_calls: Vec::new(),
    }
}

pub fn tool_calls(calls: &[(&str, &str, &str)]) -> ChatReply {
    ChatReply {
        content: None,
        tool_calls: calls
            .iter()
            .map(|(id, name, arguments)| ToolCall {
                id: id.to_string(),
                name: name.to_string(),
                arguments: arguments.to_string(),
            })
            .collect(),
    }
}
