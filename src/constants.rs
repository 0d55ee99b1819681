//! Application-wide constants
//!
//! This module centralizes hardcoded values: provider endpoints, the fixed
//! index set, output formats and tool defaults.

/// Market data provider constants
pub mod provider {
    pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

    /// Visited once per session to obtain the consent cookie the crumb is bound to
    pub const DEFAULT_COOKIE_URL: &str = "https://fc.yahoo.com";

    /// Yahoo rejects requests without a browser-like agent
    pub const DEFAULT_USER_AGENT: &str =
        "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

    pub const QUOTE_SUMMARY_MODULES: &str = "price,summaryDetail,financialData,assetProfile";
}

/// Market index constants
pub mod indices {
    /// (symbol, display name), in reporting order
    pub const TRACKED: [(&str, &str); 5] = [
        ("^GSPC", "S&P 500"),
        ("^DJI", "Dow Jones"),
        ("^IXIC", "NASDAQ"),
        ("^RUT", "Russell 2000"),
        ("^VIX", "VIX (Volatility Index)"),
    ];

    /// History window used for the two-session comparison
    pub const SNAPSHOT_PERIOD: &str = "5d";
    pub const SNAPSHOT_INTERVAL: &str = "1d";
}

/// Tool defaults
pub mod tools {
    pub const DEFAULT_MAX_NEWS: usize = 10;
    pub const DEFAULT_PERIOD: &str = "1mo";
    pub const DEFAULT_INTERVAL: &str = "1d";

    /// Window used by the multi-symbol comparison
    pub const COMPARISON_PERIOD: &str = "3mo";
    pub const COMPARISON_INTERVAL: &str = "1d";
}

/// Output formats
pub mod formats {
    pub const NEWS_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
    pub const SERIES_DATE_FORMAT: &str = "%Y-%m-%d";
}

/// LLM and team constants
pub mod llm {
    pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";
    pub const ANTHROPIC_API_KEY_VAR: &str = "ANTHROPIC_API_KEY";

    /// Anthropic's OpenAI-compatible chat completions endpoint
    pub const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com/v1";

    pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4";
    pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-sonnet-4-5";

    pub const DEFAULT_MAX_TOOL_ROUNDS: usize = 8;

    pub const DEFAULT_TEAM_NAME: &str = "AI Investment Analysis Team";

    pub const DEFAULT_QUERY: &str =
        "Analyze the current market outlook and provide recommendations for AAPL, MSFT, and NVDA";
}
