//! The investment team: four agents run in a fixed order, each one seeing
//! the query and everything the previous members produced.

use chrono::Local;
use std::sync::Arc;
use tracing::info;

use crate::agents::{build_members, AgentDescriptor, AgentRunner};
use crate::config::{AppConfig, ModelProvider, TeamConfig};
use crate::data::{MarketDataClient, YahooProvider};
use crate::error::{AgentError, ConfigError};
use crate::llm::{ChatModel, LLMClient};

pub const TEAM_INSTRUCTIONS: &[&str] = &[
    "The team provides comprehensive market analysis and recommendations.",
    "",
    "Team workflow:",
    "1. The Market Researcher gathers all relevant market data, stock information, and news",
    "2. The Market Analyst interprets the data and identifies trends, patterns, and insights",
    "3. The Investment Advisor formulates specific recommendations based on the analysis",
    "4. The Investment Reporter compiles everything into a comprehensive report",
    "",
    "Ensure thorough coverage of:",
    "- Current market conditions and sentiment",
    "- Specific stocks or sectors mentioned in the query",
    "- Relevant news and developments",
    "- Technical and fundamental analysis",
    "- Risk assessment",
    "- Actionable recommendations",
    "",
    "The final output should be a well-structured report with:",
    "- Executive Summary",
    "- Market Outlook",
    "- Key Assets Analysis",
    "- Investment Recommendations",
];

pub struct TeamCoordinator {
    settings: TeamConfig,
    members: Vec<AgentDescriptor>,
    openai: Arc<dyn ChatModel>,
    anthropic: Arc<dyn ChatModel>,
    data: MarketDataClient,
}

impl TeamCoordinator {
    /// Wire the team to the real providers described by `config`.
    pub fn new(config: &AppConfig) -> Result<Self, ConfigError> {
        let llm = &config.settings.llm;
        let openai = LLMClient::new(
            config.credentials.for_provider(ModelProvider::OpenAi).to_string(),
            llm.base_url(ModelProvider::OpenAi),
            ModelProvider::OpenAi.to_string(),
        );
        let anthropic = LLMClient::new(
            config.credentials.for_provider(ModelProvider::Anthropic).to_string(),
            llm.base_url(ModelProvider::Anthropic),
            ModelProvider::Anthropic.to_string(),
        );
        let data = MarketDataClient::new(Arc::new(YahooProvider::new(&config.settings.market_data)?));
        info!("📊 [TEAM] Market data provider: {}", data.provider_name());

        Ok(Self::with_components(
            config.settings.team.clone(),
            build_members(&config.settings.models),
            Arc::new(openai),
            Arc::new(anthropic),
            data,
        ))
    }

    pub fn with_components(
        settings: TeamConfig,
        members: Vec<AgentDescriptor>,
        openai: Arc<dyn ChatModel>,
        anthropic: Arc<dyn ChatModel>,
        data: MarketDataClient,
    ) -> Self {
        Self {
            settings,
            members,
            openai,
            anthropic,
            data,
        }
    }

    pub fn name(&self) -> &str {
        &self.settings.name
    }

    pub fn members(&self) -> &[AgentDescriptor] {
        &self.members
    }

    fn model_for(&self, provider: ModelProvider) -> &dyn ChatModel {
        match provider {
            ModelProvider::OpenAi => self.openai.as_ref(),
            ModelProvider::Anthropic => self.anthropic.as_ref(),
        }
    }

    /// Run the query through every member and return the last member's text.
    pub async fn submit_query(&self, query: &str) -> Result<String, AgentError> {
        info!("👥 [TEAM] {} received query: {}", self.settings.name, query);
        let mut findings: Vec<(&'static str, String)> = Vec::with_capacity(self.members.len());

        for member in &self.members {
            let runner = AgentRunner {
                model: self.model_for(member.model.provider),
                data: &self.data,
                max_tool_rounds: self.settings.max_tool_rounds,
                show_tool_calls: self.settings.show_tool_calls,
            };

            let prompt = member.system_prompt(&self.settings, TEAM_INSTRUCTIONS, Local::now());
            let input = compose_input(query, member, &findings);

            let output = runner
                .run(member, prompt, input)
                .await
                .map_err(|e| AgentError::Step {
                    agent: member.name.to_string(),
                    source: Box::new(e),
                })?;

            findings.push((member.name, output));
        }

        info!("👥 [TEAM] Report complete");
        findings
            .pop()
            .map(|(_, report)| report)
            .ok_or_else(|| AgentError::EmptyResponse {
                agent: self.settings.name.clone(),
            })
    }
}

/// The user message for one member: the query, its task, then every earlier
/// member's output under its own heading.
pub fn compose_input(query: &str, member: &AgentDescriptor, findings: &[(&str, String)]) -> String {
    let mut input = format!("User query: {}\n\nYour task: {}\n", query, member.role.task());
    for (name, output) in findings {
        input.push_str(&format!("\n## Findings from the {}\n\n{}\n", name, output));
    }
    input
}
