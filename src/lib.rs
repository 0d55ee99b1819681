//! Investment team - a four-agent market research pipeline
//!
//! This library provides the market data tools (Yahoo Finance), the agent
//! descriptors and the coordinator that runs a query through the team.

pub mod agents;
pub mod config;
pub mod constants;
pub mod data;
pub mod error;
pub mod llm;
pub mod team;

// Re-export commonly used types
pub use agents::{AgentDescriptor, AgentRole};
pub use config::AppConfig;
pub use data::{MarketDataClient, MarketDataProvider, YahooProvider};
pub use error::{AgentError, ConfigError, MarketDataError, ProviderError};
pub use team::TeamCoordinator;

#[cfg(test)]
pub(crate) mod testing;
