//! Unit tests for the Yahoo Finance payload parsers.
//!
//! Fixtures are trimmed copies of real responses.

#[cfg(test)]
mod yahoo_tests {
    use chrono::NaiveDate;

    use crate::config::MarketDataConfig;
    use crate::data::yahoo::*;
    use crate::data::YahooProvider;
    use crate::error::ProviderError;

    fn quote_summary(json: &str) -> QuoteSummaryEnvelope {
        serde_json::from_str(json).unwrap()
    }

    fn chart(json: &str) -> ChartEnvelope {
        serde_json::from_str(json).unwrap()
    }

    // ============= Quote Summary Tests =============

    #[test]
    fn test_parse_quote_summary_full() {
        let envelope = quote_summary(
            r#"{
                "quoteSummary": {
                    "result": [{
                        "price": {
                            "longName": "Apple Inc.",
                            "shortName": "Apple",
                            "regularMarketPrice": {"raw": 189.84, "fmt": "189.84"},
                            "regularMarketPreviousClose": {"raw": 188.0, "fmt": "188.00"},
                            "marketCap": {"raw": 2950000000000, "fmt": "2.95T"}
                        },
                        "summaryDetail": {
                            "previousClose": {"raw": 188.5, "fmt": "188.50"},
                            "trailingPE": {"raw": 31.2, "fmt": "31.20"},
                            "forwardPE": {"raw": 28.4, "fmt": "28.40"},
                            "dividendYield": {"raw": 0.0051, "fmt": "0.51%"},
                            "fiftyTwoWeekHigh": {"raw": 199.62, "fmt": "199.62"},
                            "fiftyTwoWeekLow": {"raw": 164.08, "fmt": "164.08"},
                            "volume": {"raw": 52000000, "fmt": "52M"},
                            "averageVolume": {"raw": 58000000, "fmt": "58M"}
                        },
                        "financialData": {
                            "currentPrice": {"raw": 190.1, "fmt": "190.10"}
                        },
                        "assetProfile": {
                            "sector": "Technology",
                            "industry": "Consumer Electronics"
                        }
                    }],
                    "error": null
                }
            }"#,
        );

        let info = parse_quote_summary("AAPL", envelope).unwrap();
        assert_eq!(info.long_name.as_deref(), Some("Apple Inc."));
        assert_eq!(info.current_price, Some(190.1));
        assert_eq!(info.regular_market_price, Some(189.84));
        assert_eq!(info.previous_close, Some(188.5));
        assert_eq!(info.market_cap, Some(2.95e12));
        assert_eq!(info.trailing_pe, Some(31.2));
        assert_eq!(info.forward_pe, Some(28.4));
        assert_eq!(info.dividend_yield, Some(0.0051));
        assert_eq!(info.fifty_two_week_high, Some(199.62));
        assert_eq!(info.fifty_two_week_low, Some(164.08));
        assert_eq!(info.volume, Some(52_000_000));
        assert_eq!(info.average_volume, Some(58_000_000));
        assert_eq!(info.sector.as_deref(), Some("Technology"));
        assert_eq!(info.industry.as_deref(), Some("Consumer Electronics"));
    }

    #[test]
    fn test_parse_quote_summary_sparse_fields() {
        // Index-like payload: empty objects for missing values, no profile
        let envelope = quote_summary(
            r#"{
                "quoteSummary": {
                    "result": [{
                        "price": {
                            "shortName": "S&P 500",
                            "regularMarketPrice": 4182.5,
                            "regularMarketPreviousClose": {"raw": 4100.0}
                        },
                        "summaryDetail": {
                            "trailingPE": {},
                            "dividendYield": {}
                        }
                    }]
                }
            }"#,
        );

        let info = parse_quote_summary("^GSPC", envelope).unwrap();
        assert_eq!(info.long_name.as_deref(), Some("S&P 500"));
        assert_eq!(info.current_price, None);
        assert_eq!(info.regular_market_price, Some(4182.5));
        assert_eq!(info.price(), Some(4182.5));
        assert_eq!(info.previous_close, Some(4100.0));
        assert_eq!(info.trailing_pe, None);
        assert_eq!(info.dividend_yield, None);
        assert_eq!(info.sector, None);
    }

    #[test]
    fn test_parse_quote_summary_not_found() {
        let envelope = quote_summary(
            r#"{
                "quoteSummary": {
                    "result": null,
                    "error": {"code": "Not Found", "description": "Quote not found for ticker symbol: INVALID123"}
                }
            }"#,
        );

        let err = parse_quote_summary("INVALID123", envelope).unwrap_err();
        assert!(matches!(err, ProviderError::NotFound(s) if s == "INVALID123"));
    }

    #[test]
    fn test_parse_quote_summary_other_error_is_malformed() {
        let envelope = quote_summary(
            r#"{"quoteSummary": {"result": null, "error": {"code": "Bad Request", "description": "Invalid Crumb"}}}"#,
        );

        let err = parse_quote_summary("AAPL", envelope).unwrap_err();
        assert!(matches!(err, ProviderError::Malformed(msg) if msg.contains("Invalid Crumb")));
    }

    #[test]
    fn test_parse_quote_summary_empty_result() {
        let envelope = quote_summary(r#"{"quoteSummary": {"result": []}}"#);
        assert!(matches!(
            parse_quote_summary("GONE", envelope),
            Err(ProviderError::NotFound(_))
        ));
    }

    // ============= News Tests =============

    #[test]
    fn test_parse_news() {
        let response: SearchResponse = serde_json::from_str(
            r#"{
                "count": 2,
                "quotes": [],
                "news": [
                    {
                        "uuid": "a1",
                        "title": "Apple unveils new chips",
                        "publisher": "Reuters",
                        "link": "https://finance.yahoo.com/news/apple-chips",
                        "providerPublishTime": 1700000000,
                        "type": "STORY"
                    },
                    {
                        "uuid": "b2",
                        "title": "Market wrap"
                    }
                ]
            }"#,
        )
        .unwrap();

        let news = parse_news(response);
        assert_eq!(news.len(), 2);
        assert_eq!(news[0].title.as_deref(), Some("Apple unveils new chips"));
        assert_eq!(news[0].publisher.as_deref(), Some("Reuters"));
        assert_eq!(news[0].publish_time, Some(1_700_000_000));
        assert_eq!(news[0].kind.as_deref(), Some("STORY"));
        assert_eq!(news[1].publisher, None);
        assert_eq!(news[1].publish_time, None);
    }

    #[test]
    fn test_parse_news_missing_array() {
        let response: SearchResponse = serde_json::from_str(r#"{"count": 0}"#).unwrap();
        assert!(parse_news(response).is_empty());
    }

    // ============= Chart Tests =============

    #[test]
    fn test_parse_chart_rows() {
        // 14:30 UTC opens, New York offset -18000
        let envelope = chart(
            r#"{
                "chart": {
                    "result": [{
                        "meta": {"symbol": "AAPL", "gmtoffset": -18000},
                        "timestamp": [1704205800, 1704292200, 1704378600],
                        "indicators": {
                            "quote": [{
                                "open":   [187.15, null, 182.15],
                                "high":   [188.44, 185.88, 183.09],
                                "low":    [183.89, 183.43, 180.88],
                                "close":  [185.64, 184.25, 181.91],
                                "volume": [82488700, 58414500, null]
                            }]
                        }
                    }],
                    "error": null
                }
            }"#,
        );

        let bars = parse_chart("AAPL", envelope).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(bars[0].close, 185.64);
        assert_eq!(bars[0].volume, 82_488_700);
        assert_eq!(bars[1].date, NaiveDate::from_ymd_opt(2024, 1, 4).unwrap());
        assert_eq!(bars[1].volume, 0);
    }

    #[test]
    fn test_parse_chart_uses_exchange_offset_for_dates() {
        // 2024-01-03 03:00 UTC is still 2024-01-02 in New York
        let envelope = chart(
            r#"{"chart": {"result": [{
                "meta": {"gmtoffset": -18000},
                "timestamp": [1704250800],
                "indicators": {"quote": [{"open": [1.0], "high": [1.0], "low": [1.0], "close": [1.0], "volume": [1]}]}
            }]}}"#,
        );

        let bars = parse_chart("X", envelope).unwrap();
        assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }

    #[test]
    fn test_parse_chart_no_timestamps_is_empty() {
        let envelope = chart(
            r#"{"chart": {"result": [{"meta": {"gmtoffset": 0}, "indicators": {"quote": [{}]}}], "error": null}}"#,
        );
        assert!(parse_chart("DELISTED", envelope).unwrap().is_empty());
    }

    #[test]
    fn test_parse_chart_not_found() {
        let envelope = chart(
            r#"{"chart": {"result": null, "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}}}"#,
        );
        assert!(matches!(
            parse_chart("ZZZZ", envelope),
            Err(ProviderError::NotFound(s)) if s == "ZZZZ"
        ));
    }

    #[test]
    fn test_parse_chart_missing_indicators() {
        let envelope = chart(r#"{"chart": {"result": [{"timestamp": [1704205800]}]}}"#);
        assert!(matches!(parse_chart("X", envelope), Err(ProviderError::Malformed(_))));
    }

    // ============= Endpoint Tests =============

    #[test]
    fn test_endpoint_encodes_symbol_segment() {
        let provider = YahooProvider::new(&MarketDataConfig::default()).unwrap();

        let url = provider.endpoint(&["v8", "finance", "chart", "BRK/B"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://query1.finance.yahoo.com/v8/finance/chart/BRK%2FB"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let config = MarketDataConfig {
            base_url: "http://localhost:8080/yahoo/".to_string(),
            ..MarketDataConfig::default()
        };
        let provider = YahooProvider::new(&config).unwrap();

        let url = provider.endpoint(&["v1", "finance", "search"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/yahoo/v1/finance/search");
    }

    #[test]
    fn test_new_rejects_bad_base_url() {
        let config = MarketDataConfig {
            base_url: "not a url".to_string(),
            ..MarketDataConfig::default()
        };
        assert!(YahooProvider::new(&config).is_err());
    }
}
