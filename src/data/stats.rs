//! Derived statistics over price histories.
//!
//! Every function here is total: empty or degenerate input yields `None` (or
//! an `EmptySeries` error for the summary), never NaN or infinity.

use crate::constants::formats::SERIES_DATE_FORMAT;
use crate::error::MarketDataError;

use super::types::{Bar, HistoricalSummary, IndexSnapshot};

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// `(latest - previous) / previous * 100`, or `None` when `previous` is
/// missing or zero.
pub fn percent_change(latest: f64, previous: Option<f64>) -> Option<f64> {
    let previous = previous?;
    if previous == 0.0 {
        return None;
    }
    finite((latest - previous) / previous * 100.0)
}

/// Percentage move from the first to the last close.
pub fn performance_pct(bars: &[Bar]) -> Option<f64> {
    let first = bars.first()?;
    let last = bars.last()?;
    percent_change(last.close, Some(first.close))
}

/// Sample standard deviation (n - 1) of close-to-close returns, in percent.
/// Needs at least two returns.
pub fn volatility_pct(bars: &[Bar]) -> Option<f64> {
    let returns: Vec<f64> = bars
        .windows(2)
        .filter(|w| w[0].close != 0.0)
        .map(|w| w[1].close / w[0].close - 1.0)
        .collect();

    if returns.len() < 2 {
        return None;
    }

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);
    finite(variance.sqrt() * 100.0)
}

pub fn summarize(
    symbol: &str,
    period: &str,
    interval: &str,
    bars: &[Bar],
) -> Result<HistoricalSummary, MarketDataError> {
    let (first, last) = match (bars.first(), bars.last()) {
        (Some(f), Some(l)) => (f, l),
        _ => {
            return Err(MarketDataError::EmptySeries {
                symbol: symbol.to_string(),
            })
        }
    };

    let period_high = bars.iter().map(|b| b.high).fold(f64::MIN, f64::max);
    let period_low = bars.iter().map(|b| b.low).fold(f64::MAX, f64::min);
    let period_avg_volume = bars.iter().map(|b| b.volume as f64).sum::<f64>() / bars.len() as f64;

    Ok(HistoricalSummary {
        ticker: symbol.to_string(),
        period: period.to_string(),
        interval: interval.to_string(),
        data_points: bars.len(),
        latest_close: last.close,
        period_high,
        period_low,
        period_avg_volume,
        price_change: last.close - first.close,
        price_change_percent: percent_change(last.close, Some(first.close)),
        start_date: first.date.format(SERIES_DATE_FORMAT).to_string(),
        end_date: last.date.format(SERIES_DATE_FORMAT).to_string(),
    })
}

/// Compare the two most recent sessions. With a single session only the
/// current price is known.
pub fn two_session_change(symbol: &str, bars: &[Bar]) -> Result<IndexSnapshot, MarketDataError> {
    let latest = bars.last().ok_or_else(|| MarketDataError::EmptySeries {
        symbol: symbol.to_string(),
    })?;

    let previous_close = bars.len().checked_sub(2).map(|i| bars[i].close);
    let change = previous_close.map(|prev| latest.close - prev);

    Ok(IndexSnapshot {
        ticker: symbol.to_string(),
        current_price: latest.close,
        previous_close,
        change,
        change_percent: percent_change(latest.close, previous_close),
    })
}
