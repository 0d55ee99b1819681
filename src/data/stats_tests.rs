//! Unit tests for the derived price statistics.

#[cfg(test)]
mod stats_tests {
    use crate::data::stats::*;
    use crate::error::MarketDataError;
    use crate::testing::bars_from_closes;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    // ============= percent_change Tests =============

    #[test]
    fn test_percent_change_basic() {
        assert!(approx(percent_change(110.0, Some(100.0)).unwrap(), 10.0));
        assert!(approx(percent_change(90.0, Some(100.0)).unwrap(), -10.0));
    }

    #[test]
    fn test_percent_change_missing_previous() {
        assert_eq!(percent_change(110.0, None), None);
    }

    #[test]
    fn test_percent_change_zero_previous() {
        assert_eq!(percent_change(110.0, Some(0.0)), None);
    }

    // ============= performance / volatility Tests =============

    #[test]
    fn test_performance_first_to_last() {
        let bars = bars_from_closes(&[100.0, 120.0, 150.0]);
        assert!(approx(performance_pct(&bars).unwrap(), 50.0));
    }

    #[test]
    fn test_performance_empty() {
        assert_eq!(performance_pct(&[]), None);
    }

    #[test]
    fn test_volatility_sample_std() {
        // returns +10% and -10%: mean 0, sample variance 0.02
        let bars = bars_from_closes(&[100.0, 110.0, 99.0]);
        let vol = volatility_pct(&bars).unwrap();
        assert!((vol - 0.02_f64.sqrt() * 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_volatility_flat_series_is_zero() {
        let bars = bars_from_closes(&[50.0, 50.0, 50.0, 50.0]);
        assert!(approx(volatility_pct(&bars).unwrap(), 0.0));
    }

    #[test]
    fn test_volatility_needs_two_returns() {
        assert_eq!(volatility_pct(&bars_from_closes(&[100.0, 101.0])), None);
        assert_eq!(volatility_pct(&bars_from_closes(&[100.0])), None);
        assert_eq!(volatility_pct(&[]), None);
    }

    // ============= summarize Tests =============

    #[test]
    fn test_summarize_statistics() {
        let bars = bars_from_closes(&[100.0, 105.0, 95.0, 110.0]);
        let summary = summarize("AAPL", "1mo", "1d", &bars).unwrap();

        assert_eq!(summary.ticker, "AAPL");
        assert_eq!(summary.period, "1mo");
        assert_eq!(summary.interval, "1d");
        assert_eq!(summary.data_points, 4);
        assert!(approx(summary.latest_close, 110.0));
        assert!(approx(summary.period_high, 111.0));
        assert!(approx(summary.period_low, 94.0));
        assert!(approx(summary.period_avg_volume, 2_500.0));
        assert!(approx(summary.price_change, 10.0));
        assert!(approx(summary.price_change_percent.unwrap(), 10.0));
        assert_eq!(summary.start_date, "2025-01-02");
        assert_eq!(summary.end_date, "2025-01-05");
    }

    #[test]
    fn test_summarize_single_bar() {
        let summary = summarize("X", "1d", "1d", &bars_from_closes(&[42.0])).unwrap();
        assert_eq!(summary.data_points, 1);
        assert!(approx(summary.price_change, 0.0));
        assert!(approx(summary.price_change_percent.unwrap(), 0.0));
        assert_eq!(summary.start_date, summary.end_date);
    }

    #[test]
    fn test_summarize_empty_is_error() {
        let err = summarize("DELISTED", "1mo", "1d", &[]).unwrap_err();
        assert_eq!(
            err,
            MarketDataError::EmptySeries {
                symbol: "DELISTED".to_string()
            }
        );
        assert_eq!(err.to_string(), "No historical data available for DELISTED");
    }

    #[test]
    fn test_summarize_zero_first_close() {
        let summary = summarize("X", "1mo", "1d", &bars_from_closes(&[0.0, 5.0])).unwrap();
        assert_eq!(summary.price_change_percent, None);
        assert!(approx(summary.price_change, 5.0));
    }

    // ============= two_session_change Tests =============

    #[test]
    fn test_two_session_change_uses_last_two() {
        let bars = bars_from_closes(&[4000.0, 4100.0, 4182.0]);
        let snap = two_session_change("^GSPC", &bars).unwrap();

        assert_eq!(snap.ticker, "^GSPC");
        assert!(approx(snap.current_price, 4182.0));
        assert_eq!(snap.previous_close, Some(4100.0));
        assert!(approx(snap.change.unwrap(), 82.0));
        assert!(approx(snap.change_percent.unwrap(), 2.0));
    }

    #[test]
    fn test_two_session_change_single_session() {
        let snap = two_session_change("^VIX", &bars_from_closes(&[15.0])).unwrap();
        assert!(approx(snap.current_price, 15.0));
        assert_eq!(snap.previous_close, None);
        assert_eq!(snap.change, None);
        assert_eq!(snap.change_percent, None);
    }

    #[test]
    fn test_two_session_change_empty() {
        let err = two_session_change("^RUT", &[]).unwrap_err();
        assert!(matches!(err, MarketDataError::EmptySeries { .. }));
    }
}
