use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionMessageToolCall, ChatCompletionRequestAssistantMessageArgs,
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestToolMessageArgs, ChatCompletionRequestUserMessageArgs,
        ChatCompletionTool, ChatCompletionToolArgs, ChatCompletionToolChoiceOption, ChatCompletionToolType,
        CreateChatCompletionRequestArgs, FunctionCall, FunctionObjectArgs,
    },
    Client,
};
use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use crate::error::AgentError;

/// A tool the model may call, described by a JSON schema.
#[derive(Clone, Debug, PartialEq)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    /// Raw JSON arguments as produced by the model
    pub arguments: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ChatMessage {
    System(String),
    User(String),
    Assistant {
        content: Option<String>,
        tool_calls: Vec<ToolCall>,
    },
    Tool {
        call_id: String,
        content: String,
    },
}

#[derive(Clone, Debug)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub tools: Vec<ToolSpec>,
    /// When false the tools stay visible but the model must answer in text
    pub allow_tool_calls: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChatReply {
    pub content: Option<String>,
    pub tool_calls: Vec<ToolCall>,
}

/// One chat-completion round trip.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, request: ChatRequest) -> Result<ChatReply, AgentError>;
}

/// Chat completions over the OpenAI protocol. Also used for Anthropic through
/// its OpenAI-compatible endpoint.
#[derive(Clone)]
pub struct LLMClient {
    pub client: Client<OpenAIConfig>,
    pub label: String,
}

impl LLMClient {
    pub fn new(api_key: String, base_url: Option<String>, label: impl Into<String>) -> Self {
        let mut config = OpenAIConfig::new().with_api_key(api_key);
        if let Some(url) = base_url {
            config = config.with_api_base(url);
        }
        let client = Client::with_config(config);
        Self {
            client,
            label: label.into(),
        }
    }
}

fn to_openai_message(message: ChatMessage) -> Result<ChatCompletionRequestMessage, AgentError> {
    let message = match message {
        ChatMessage::System(content) => ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        ChatMessage::User(content) => ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        ChatMessage::Assistant {
            content,
            tool_calls,
        } => {
            let mut args = ChatCompletionRequestAssistantMessageArgs::default();
            if let Some(content) = content {
                args.content(content);
            }
            if !tool_calls.is_empty() {
                args.tool_calls(
                    tool_calls
                        .into_iter()
                        .map(|call| ChatCompletionMessageToolCall {
                            id: call.id,
                            r#type: ChatCompletionToolType::Function,
                            function: FunctionCall {
                                name: call.name,
                                arguments: call.arguments,
                            },
                        })
                        .collect::<Vec<_>>(),
                );
            }
            args.build()?.into()
        }
        ChatMessage::Tool { call_id, content } => ChatCompletionRequestToolMessageArgs::default()
            .tool_call_id(call_id)
            .content(content)
            .build()?
            .into(),
    };
    Ok(message)
}

fn to_openai_tool(spec: ToolSpec) -> Result<ChatCompletionTool, AgentError> {
    let function = FunctionObjectArgs::default()
        .name(spec.name)
        .description(spec.description)
        .parameters(spec.parameters)
        .build()?;

    Ok(ChatCompletionToolArgs::default()
        .r#type(ChatCompletionToolType::Function)
        .function(function)
        .build()?)
}

#[async_trait]
impl ChatModel for LLMClient {
    async fn complete(&self, request: ChatRequest) -> Result<ChatReply, AgentError> {
        info!("🤖 Sending request to LLM ({} / {})...", self.label, request.model);

        let messages = request
            .messages
            .into_iter()
            .map(to_openai_message)
            .collect::<Result<Vec<_>, _>>()?;

        let mut builder = CreateChatCompletionRequestArgs::default();
        builder.model(&request.model).messages(messages);
        if !request.tools.is_empty() {
            let tools = request
                .tools
                .into_iter()
                .map(to_openai_tool)
                .collect::<Result<Vec<_>, _>>()?;
            builder.tools(tools);
            if !request.allow_tool_calls {
                builder.tool_choice(ChatCompletionToolChoiceOption::None);
            }
        }

        let response = self.client.chat().create(builder.build()?).await?;

        info!("🤖 LLM Response received.");

        let Some(choice) = response.choices.into_iter().next() else {
            return Ok(ChatReply::default());
        };

        let tool_calls = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|call| ToolCall {
                id: call.id,
                name: call.function.name,
                arguments: call.function.arguments,
            })
            .collect();

        Ok(ChatReply {
            content: choice.message.content,
            tool_calls,
        })
    }
}
