//! Custom error types for the investment team
//!
//! Provides structured, typed errors instead of generic Box<dyn Error>

use thiserror::Error;

/// Startup configuration errors. Always fatal.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{var} not found in environment variables or config file. Set it in a .env file or export {var}='your-api-key-here'")]
    MissingCredential { var: &'static str },

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid URL for {field}: {source}")]
    InvalidUrl {
        field: &'static str,
        #[source]
        source: url::ParseError,
    },

    #[error("Invalid setting {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Raw failures from the upstream market data provider, before they are
/// attributed to a symbol.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("provider unreachable: {0}")]
    Unavailable(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("symbol not found: {0}")]
    NotFound(String),

    #[error("unexpected payload: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Malformed(err.to_string())
    }
}

/// Per-call market data failures. These never escape a tool: they are
/// rendered into an `{"error": ...}` marker in the slot of the failed symbol.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    #[error("Failed to fetch {what} for {symbol}: provider unavailable ({reason})")]
    ProviderUnavailable {
        what: &'static str,
        symbol: String,
        reason: String,
    },

    #[error("Failed to fetch {what} for {symbol}: unknown or delisted symbol")]
    UnknownOrDelistedSymbol { what: &'static str, symbol: String },

    #[error("No historical data available for {symbol}")]
    EmptySeries { symbol: String },

    #[error("Failed to fetch {what} for {symbol}: malformed field ({reason})")]
    MalformedField {
        what: &'static str,
        symbol: String,
        reason: String,
    },
}

impl MarketDataError {
    /// Attribute a provider failure to `symbol`.
    pub fn from_provider(what: &'static str, symbol: &str, err: ProviderError) -> Self {
        let symbol = symbol.to_string();
        match err {
            ProviderError::Unavailable(e) => MarketDataError::ProviderUnavailable {
                what,
                symbol,
                reason: e.to_string(),
            },
            ProviderError::Http { status, body } => MarketDataError::ProviderUnavailable {
                what,
                symbol,
                reason: format!("HTTP {}: {}", status, body),
            },
            ProviderError::NotFound(_) => MarketDataError::UnknownOrDelistedSymbol { what, symbol },
            ProviderError::Malformed(reason) => MarketDataError::MalformedField {
                what,
                symbol,
                reason,
            },
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            MarketDataError::ProviderUnavailable { symbol, .. }
            | MarketDataError::UnknownOrDelistedSymbol { symbol, .. }
            | MarketDataError::EmptySeries { symbol }
            | MarketDataError::MalformedField { symbol, .. } => symbol,
        }
    }
}

/// Agent and orchestration failures.
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("LLM request failed: {0}")]
    Llm(#[from] async_openai::error::OpenAIError),

    #[error("{agent} returned an empty response")]
    EmptyResponse { agent: String },

    #[error("{agent} failed: {source}")]
    Step {
        agent: String,
        #[source]
        source: Box<AgentError>,
    },
}
