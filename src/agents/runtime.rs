use serde_json::json;
use tracing::{info, warn};

use crate::agents::tools::MarketTool;
use crate::agents::AgentDescriptor;
use crate::data::MarketDataClient;
use crate::error::AgentError;
use crate::llm::{ChatMessage, ChatModel, ChatRequest, ToolCall};

/// Drives one agent through its tool-calling loop.
pub struct AgentRunner<'a> {
    pub model: &'a dyn ChatModel,
    pub data: &'a MarketDataClient,
    pub max_tool_rounds: usize,
    pub show_tool_calls: bool,
}

impl AgentRunner<'_> {
    pub async fn run(
        &self,
        agent: &AgentDescriptor,
        system_prompt: String,
        input: String,
    ) -> Result<String, AgentError> {
        info!("🤖 [AGENT] Sending request to {} ({})...", agent.name, agent.model.id);

        let tools: Vec<_> = agent.tools.iter().map(|t| t.spec()).collect();
        let mut messages = vec![ChatMessage::System(system_prompt), ChatMessage::User(input)];

        for round in 0..self.max_tool_rounds {
            let reply = self
                .model
                .complete(ChatRequest {
                    model: agent.model.id.clone(),
                    messages: messages.clone(),
                    tools: tools.clone(),
                    allow_tool_calls: true,
                })
                .await?;

            if reply.tool_calls.is_empty() {
                return Self::finish(agent, reply.content);
            }

            info!(
                "🔧 [AGENT] {} requested {} tool call(s) (round {})",
                agent.name,
                reply.tool_calls.len(),
                round + 1
            );

            messages.push(ChatMessage::Assistant {
                content: reply.content,
                tool_calls: reply.tool_calls.clone(),
            });

            for call in reply.tool_calls {
                let output = self.execute(agent, &call).await;
                messages.push(ChatMessage::Tool {
                    call_id: call.id,
                    content: output,
                });
            }
        }

        warn!(
            "⚠️ [AGENT] {} used all {} tool rounds, asking for a final answer",
            agent.name, self.max_tool_rounds
        );

        let reply = self
            .model
            .complete(ChatRequest {
                model: agent.model.id.clone(),
                messages,
                tools,
                allow_tool_calls: false,
            })
            .await?;

        Self::finish(agent, reply.content)
    }

    async fn execute(&self, agent: &AgentDescriptor, call: &ToolCall) -> String {
        if self.show_tool_calls {
            info!("🔧 [TOOL] {} -> {}({})", agent.name, call.name, call.arguments);
        }

        let output = match MarketTool::from_name(&call.name).filter(|t| agent.tools.contains(t)) {
            Some(tool) => tool.invoke(self.data, &call.arguments).await,
            None => {
                warn!("⚠️ [TOOL] {} called unknown tool {}", agent.name, call.name);
                json!({ "error": format!("Unknown tool: {}", call.name) })
            }
        };

        output.to_string()
    }

    fn finish(agent: &AgentDescriptor, content: Option<String>) -> Result<String, AgentError> {
        match content.map(|c| c.trim().to_string()).filter(|c| !c.is_empty()) {
            Some(text) => {
                info!("🤖 [AGENT] Response from {} ({} chars)", agent.name, text.len());
                Ok(text)
            }
            None => Err(AgentError::EmptyResponse {
                agent: agent.name.to_string(),
            }),
        }
    }
}
