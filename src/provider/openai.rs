//! OpenAI Chat Completions API provider.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::FitcastConfig;
use crate::error::{CompletionError, FitError};
use crate::types::*;

use super::http::{bearer_headers, shared_client, status_to_completion_error};
use super::{ModelProvider, ProviderRequest};

pub struct OpenAiProvider {
    model: String,
    api_key: String,
    base_url: String,
}

impl OpenAiProvider {
    pub fn new(
        model: impl Into<String>,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            model: model.into(),
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Build a provider for the configured chat model. Requires an API key.
    pub fn from_config(config: &FitcastConfig) -> Result<Self, FitError> {
        Ok(Self::new(
            config.chat_model(),
            config.api_key()?,
            config.openai_base_url(),
        ))
    }

    pub(crate) fn build_request_body(&self, request: &ProviderRequest) -> Value {
        let messages = request
            .conversation
            .turns()
            .iter()
            .map(turn_to_openai)
            .collect::<Vec<_>>();

        let mut body = serde_json::Map::new();
        body.insert("model".into(), self.model.clone().into());
        body.insert("messages".into(), messages.into());

        if let Some(max) = request.settings.max_tokens {
            body.insert("max_tokens".into(), max.into());
        }
        if let Some(temp) = request.settings.temperature {
            body.insert("temperature".into(), temp.into());
        }

        if let Some(ref tools) = request.tools {
            if !tools.is_empty() {
                let tool_defs: Vec<Value> = tools
                    .iter()
                    .map(|t| {
                        json!({
                            "type": "function",
                            "function": {
                                "name": t.name,
                                "description": t.description,
                                "parameters": t.parameters.schema,
                            }
                        })
                    })
                    .collect();
                body.insert("tools".into(), tool_defs.into());
            }
        }

        Value::Object(body)
    }
}

#[async_trait]
impl ModelProvider for OpenAiProvider {
    fn provider_name(&self) -> &str {
        "openai"
    }

    fn model_id(&self) -> &str {
        &self.model
    }

    async fn complete(
        &self,
        request: &ProviderRequest,
    ) -> Result<AssistantMessage, CompletionError> {
        let body = self.build_request_body(request);
        let url = format!("{}/chat/completions", self.base_url);

        debug!(
            model = %self.model,
            turns = request.conversation.len(),
            tools = request.tools.as_ref().map_or(0, Vec::len),
            "OpenAI complete"
        );

        let resp = shared_client()
            .post(&url)
            .headers(bearer_headers(&self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        let body_text = resp.text().await?;
        if !(200..300).contains(&status) {
            return Err(status_to_completion_error(status, &body_text));
        }

        let data: OpenAiChatResponse = serde_json::from_str(&body_text)?;
        let choice = data
            .choices
            .into_iter()
            .next()
            .ok_or(CompletionError::NoChoices)?;

        let tool_calls = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|tc| ToolInvocationRequest {
                id: tc.id,
                name: tc.function.name,
                arguments: tc.function.arguments,
            })
            .collect::<Vec<_>>();

        // Empty content beside tool calls is a placeholder, not an answer.
        let text = match choice.message.content {
            Some(content) if content.is_empty() && !tool_calls.is_empty() => None,
            content => content,
        };

        Ok(AssistantMessage {
            text,
            tool_calls,
            finish_reason: choice.finish_reason.as_deref().and_then(parse_finish_reason),
            usage: data
                .usage
                .map(|u| Usage {
                    input_tokens: u.prompt_tokens,
                    output_tokens: u.completion_tokens,
                    total_tokens: u.total_tokens,
                })
                .unwrap_or_default(),
        })
    }
}

fn parse_finish_reason(s: &str) -> Option<FinishReason> {
    s.parse().ok()
}

fn turn_to_openai(turn: &ConversationTurn) -> Value {
    match turn {
        ConversationTurn::User { text } => json!({ "role": "user", "content": text }),
        ConversationTurn::AssistantText { text } => json!({ "role": "assistant", "content": text }),
        ConversationTurn::AssistantToolRequest { text, calls } => {
            let tool_calls: Vec<Value> = calls
                .iter()
                .map(|tc| {
                    json!({
                        "id": tc.id,
                        "type": "function",
                        "function": {
                            "name": tc.name,
                            "arguments": tc.arguments,
                        }
                    })
                })
                .collect();
            json!({
                "role": "assistant",
                "content": text,
                "tool_calls": tool_calls,
            })
        }
        ConversationTurn::ToolResult(result) => json!({
            "role": "tool",
            "tool_call_id": result.invocation_id,
            "name": result.tool_name,
            "content": result.content,
        }),
    }
}

// OpenAI API response types (internal)

#[derive(Deserialize)]
struct OpenAiChatResponse {
    choices: Vec<OpenAiChoice>,
    usage: Option<OpenAiUsage>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct OpenAiMessage {
    content: Option<String>,
    tool_calls: Option<Vec<OpenAiToolCall>>,
}

#[derive(Deserialize)]
struct OpenAiToolCall {
    id: String,
    function: OpenAiFunction,
}

#[derive(Deserialize)]
struct OpenAiFunction {
    name: String,
    arguments: String,
}

#[derive(Deserialize)]
struct OpenAiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}
