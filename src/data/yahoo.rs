use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Offset, Utc};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use url::Url;

use crate::config::MarketDataConfig;
use crate::constants::provider::QUOTE_SUMMARY_MODULES;
use crate::error::{ConfigError, ProviderError};

use super::traits::{MarketDataProvider, ProviderResult};
use super::types::{Bar, ProviderInfo, ProviderNews};

/// Longest error body kept in an error message
const MAX_ERROR_BODY: usize = 200;

/// Yahoo Finance over plain HTTP.
///
/// The quote-summary endpoint needs a session cookie plus a matching crumb;
/// both are obtained lazily on first use and reused until Yahoo rejects them.
pub struct YahooProvider {
    client: Client,
    base_url: Url,
    cookie_url: Url,
    crumb: Mutex<Option<String>>,
}

impl YahooProvider {
    pub fn new(config: &MarketDataConfig) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .cookie_store(true)
            .build()
            .map_err(|e| ConfigError::Invalid {
                field: "market_data",
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url()?,
            cookie_url: config.cookie_url()?,
            crumb: Mutex::new(None),
        })
    }

    pub(crate) fn endpoint(&self, segments: &[&str]) -> ProviderResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ProviderError::Malformed(format!("{} cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, symbol: &str) -> ProviderResult<T> {
        debug!("📡 [YAHOO] GET {}", url);
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(ProviderError::NotFound(symbol.to_string()));
        }
        if !status.is_success() {
            return Err(ProviderError::Http {
                status: status.as_u16(),
                body: truncate(body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    async fn crumb(&self) -> ProviderResult<String> {
        let mut guard = self.crumb.lock().await;
        if let Some(crumb) = guard.as_ref() {
            return Ok(crumb.clone());
        }

        // The consent host answers with an error status but still sets the cookie.
        let _ = self.client.get(self.cookie_url.clone()).send().await?;

        let url = self.endpoint(&["v1", "test", "getcrumb"])?;
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        let crumb = resp.text().await?.trim().to_string();

        if !status.is_success() || crumb.is_empty() || crumb.contains('<') {
            return Err(ProviderError::Http {
                status: status.as_u16(),
                body: "crumb handshake rejected".to_string(),
            });
        }

        debug!("📡 [YAHOO] Obtained session crumb");
        *guard = Some(crumb.clone());
        Ok(crumb)
    }
}

#[async_trait]
impl MarketDataProvider for YahooProvider {
    fn name(&self) -> &'static str {
        "yahoo"
    }

    async fn fetch_info(&self, symbol: &str) -> ProviderResult<ProviderInfo> {
        let crumb = self.crumb().await?;
        let mut url = self.endpoint(&["v10", "finance", "quoteSummary", symbol])?;
        url.query_pairs_mut()
            .append_pair("modules", QUOTE_SUMMARY_MODULES)
            .append_pair("crumb", &crumb);

        match self.get_json::<QuoteSummaryEnvelope>(url, symbol).await {
            Ok(envelope) => parse_quote_summary(symbol, envelope),
            Err(ProviderError::Http { status: 401, body }) => {
                warn!("⚠️ [YAHOO] Crumb rejected, next call will re-authenticate");
                *self.crumb.lock().await = None;
                Err(ProviderError::Http { status: 401, body })
            }
            Err(e) => Err(e),
        }
    }

    async fn fetch_news(&self, symbol: &str, count: usize) -> ProviderResult<Vec<ProviderNews>> {
        let mut url = self.endpoint(&["v1", "finance", "search"])?;
        url.query_pairs_mut()
            .append_pair("q", symbol)
            .append_pair("quotesCount", "0")
            .append_pair("newsCount", &count.to_string());

        let response: SearchResponse = self.get_json(url, symbol).await?;
        Ok(parse_news(response))
    }

    async fn fetch_history(&self, symbol: &str, period: &str, interval: &str) -> ProviderResult<Vec<Bar>> {
        let mut url = self.endpoint(&["v8", "finance", "chart", symbol])?;
        url.query_pairs_mut()
            .append_pair("range", period)
            .append_pair("interval", interval)
            .append_pair("includePrePost", "false");

        let envelope: ChartEnvelope = self.get_json(url, symbol).await?;
        parse_chart(symbol, envelope)
    }
}

fn truncate(mut body: String) -> String {
    if body.len() > MAX_ERROR_BODY {
        let mut cut = MAX_ERROR_BODY;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
        body.push_str("...");
    }
    body
}

// ============= Wire formats =============

#[derive(Deserialize, Debug)]
pub(crate) struct ApiError {
    code: Option<String>,
    description: Option<String>,
}

fn api_error(symbol: &str, err: ApiError) -> ProviderError {
    let code = err.code.unwrap_or_default();
    if code.eq_ignore_ascii_case("not found") {
        return ProviderError::NotFound(symbol.to_string());
    }
    ProviderError::Malformed(format!(
        "{}: {}",
        code,
        err.description.unwrap_or_default()
    ))
}

/// Yahoo numbers arrive either bare or wrapped as `{"raw": .., "fmt": ..}`,
/// and missing values as `{}`.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub(crate) enum YahooNumber {
    Plain(f64),
    Wrapped { raw: Option<f64> },
    Other(#[allow(dead_code)] serde::de::IgnoredAny),
}

impl YahooNumber {
    fn value(&self) -> Option<f64> {
        match self {
            YahooNumber::Plain(v) => Some(*v),
            YahooNumber::Wrapped { raw } => *raw,
            YahooNumber::Other(_) => None,
        }
        .filter(|v| v.is_finite())
    }
}

fn number(field: &Option<YahooNumber>) -> Option<f64> {
    field.as_ref().and_then(YahooNumber::value)
}

fn count(field: &Option<YahooNumber>) -> Option<u64> {
    number(field).filter(|v| *v >= 0.0).map(|v| v as u64)
}

#[derive(Deserialize, Debug)]
pub(crate) struct QuoteSummaryEnvelope {
    #[serde(rename = "quoteSummary")]
    quote_summary: QuoteSummaryBody,
}

#[derive(Deserialize, Debug)]
struct QuoteSummaryBody {
    result: Option<Vec<QuoteSummaryResult>>,
    error: Option<ApiError>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct QuoteSummaryResult {
    #[serde(default)]
    price: Option<PriceModule>,
    #[serde(default)]
    summary_detail: Option<SummaryDetail>,
    #[serde(default)]
    financial_data: Option<FinancialData>,
    #[serde(default)]
    asset_profile: Option<AssetProfile>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct PriceModule {
    long_name: Option<String>,
    short_name: Option<String>,
    regular_market_price: Option<YahooNumber>,
    regular_market_previous_close: Option<YahooNumber>,
    regular_market_volume: Option<YahooNumber>,
    market_cap: Option<YahooNumber>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct SummaryDetail {
    previous_close: Option<YahooNumber>,
    #[serde(rename = "trailingPE")]
    trailing_pe: Option<YahooNumber>,
    #[serde(rename = "forwardPE")]
    forward_pe: Option<YahooNumber>,
    dividend_yield: Option<YahooNumber>,
    fifty_two_week_high: Option<YahooNumber>,
    fifty_two_week_low: Option<YahooNumber>,
    volume: Option<YahooNumber>,
    average_volume: Option<YahooNumber>,
    market_cap: Option<YahooNumber>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct FinancialData {
    current_price: Option<YahooNumber>,
}

#[derive(Deserialize, Debug, Default)]
struct AssetProfile {
    sector: Option<String>,
    industry: Option<String>,
}

pub(crate) fn parse_quote_summary(symbol: &str, envelope: QuoteSummaryEnvelope) -> ProviderResult<ProviderInfo> {
    let body = envelope.quote_summary;
    if let Some(err) = body.error {
        return Err(api_error(symbol, err));
    }

    let result = body
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| ProviderError::NotFound(symbol.to_string()))?;

    let price = result.price.unwrap_or_default();
    let detail = result.summary_detail.unwrap_or_default();
    let financial = result.financial_data.unwrap_or_default();
    let profile = result.asset_profile.unwrap_or_default();

    Ok(ProviderInfo {
        long_name: price.long_name.or(price.short_name),
        current_price: number(&financial.current_price),
        regular_market_price: number(&price.regular_market_price),
        previous_close: number(&detail.previous_close).or(number(&price.regular_market_previous_close)),
        market_cap: number(&detail.market_cap).or(number(&price.market_cap)),
        trailing_pe: number(&detail.trailing_pe),
        forward_pe: number(&detail.forward_pe),
        dividend_yield: number(&detail.dividend_yield),
        fifty_two_week_high: number(&detail.fifty_two_week_high),
        fifty_two_week_low: number(&detail.fifty_two_week_low),
        volume: count(&detail.volume).or(count(&price.regular_market_volume)),
        average_volume: count(&detail.average_volume),
        sector: profile.sector,
        industry: profile.industry,
    })
}

#[derive(Deserialize, Debug)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    news: Vec<SearchNews>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct SearchNews {
    title: Option<String>,
    publisher: Option<String>,
    link: Option<String>,
    provider_publish_time: Option<i64>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

pub(crate) fn parse_news(response: SearchResponse) -> Vec<ProviderNews> {
    response
        .news
        .into_iter()
        .map(|n| ProviderNews {
            title: n.title,
            publisher: n.publisher,
            link: n.link,
            publish_time: n.provider_publish_time,
            kind: n.kind,
        })
        .collect()
}

#[derive(Deserialize, Debug)]
pub(crate) struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Deserialize, Debug)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    error: Option<ApiError>,
}

#[derive(Deserialize, Debug)]
struct ChartResult {
    meta: Option<ChartMeta>,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Option<Indicators>,
}

#[derive(Deserialize, Debug)]
struct ChartMeta {
    gmtoffset: Option<i32>,
}

#[derive(Deserialize, Debug)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteSeries>,
}

#[derive(Deserialize, Debug, Default)]
struct QuoteSeries {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

fn value_at(series: &[Option<f64>], i: usize) -> Option<f64> {
    series.get(i).copied().flatten().filter(|v| v.is_finite())
}

/// Rows with a missing price are dropped; a missing volume counts as zero.
pub(crate) fn parse_chart(symbol: &str, envelope: ChartEnvelope) -> ProviderResult<Vec<Bar>> {
    if let Some(err) = envelope.chart.error {
        return Err(api_error(symbol, err));
    }

    let result = envelope
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| ProviderError::NotFound(symbol.to_string()))?;

    if result.timestamp.is_empty() {
        return Ok(Vec::new());
    }

    let offset: FixedOffset = result
        .meta
        .and_then(|m| m.gmtoffset)
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| Utc.fix());

    let series = result
        .indicators
        .and_then(|i| i.quote.into_iter().next())
        .ok_or_else(|| ProviderError::Malformed("chart has timestamps but no quote indicators".to_string()))?;

    let mut bars = Vec::with_capacity(result.timestamp.len());
    for (i, ts) in result.timestamp.iter().enumerate() {
        let (Some(open), Some(high), Some(low), Some(close)) = (
            value_at(&series.open, i),
            value_at(&series.high, i),
            value_at(&series.low, i),
            value_at(&series.close, i),
        ) else {
            continue;
        };

        let date = DateTime::<Utc>::from_timestamp(*ts, 0)
            .ok_or_else(|| ProviderError::Malformed(format!("timestamp {} out of range", ts)))?
            .with_timezone(&offset)
            .date_naive();

        let volume = value_at(&series.volume, i)
            .filter(|v| *v >= 0.0)
            .map(|v| v as u64)
            .unwrap_or(0);

        bars.push(Bar {
            date,
            open,
            high,
            low,
            close,
            volume,
        });
    }

    Ok(bars)
}
