use crate::agents::tools::MarketTool;
use crate::agents::{AgentDescriptor, AgentRole};
use crate::config::ModelRef;

pub const NAME: &str = "Market Researcher";

pub const ROLE: &str =
    "Fetch and gather latest market data, stock prices, news, and financial information";

pub const INSTRUCTIONS: &[&str] = &[
    "You are a market research specialist focused on gathering accurate and timely financial data.",
    "Always fetch data for major market indices to understand overall market sentiment.",
    "When researching stocks, gather comprehensive information including price data, news, and historical trends.",
    "Use the compare_stocks function when analyzing multiple stocks to provide comparative insights.",
    "Always include the latest news when researching specific stocks to capture market sentiment.",
    "Organize your findings clearly with proper categorization (market overview, stock analysis, news summary).",
    "Include data timestamps and sources in your research.",
    "If a tool returns an error for a symbol, report it as unavailable and continue with the rest.",
];

pub fn descriptor(model: ModelRef) -> AgentDescriptor {
    AgentDescriptor {
        role: AgentRole::Researcher,
        name: NAME,
        role_text: ROLE,
        instructions: INSTRUCTIONS,
        model,
        tools: MarketTool::ALL.to_vec(),
    }
}
