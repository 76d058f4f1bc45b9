//! Conversation types for model communication.

use serde::{Deserialize, Serialize};

use super::generation::FinishReason;
use super::usage::Usage;
use crate::error::FitError;

/// Conversation role as understood by the chat endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    Tool,
}

/// A tool invocation requested by the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolInvocationRequest {
    /// Opaque correlation id issued by the endpoint.
    pub id: String,
    pub name: String,
    /// Raw argument payload exactly as received. Decoded only at dispatch.
    pub arguments: String,
}

impl ToolInvocationRequest {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments: arguments.into(),
        }
    }
}

/// Plain-text result answering one [`ToolInvocationRequest`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolResult {
    pub invocation_id: String,
    pub tool_name: String,
    pub content: String,
}

/// A single turn of a conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConversationTurn {
    User {
        text: String,
    },
    AssistantText {
        text: String,
    },
    AssistantToolRequest {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
        calls: Vec<ToolInvocationRequest>,
    },
    ToolResult(ToolResult),
}

impl ConversationTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self::User { text: text.into() }
    }

    pub fn role(&self) -> Role {
        match self {
            Self::User { .. } => Role::User,
            Self::AssistantText { .. } | Self::AssistantToolRequest { .. } => Role::Assistant,
            Self::ToolResult(_) => Role::Tool,
        }
    }
}

/// Ordered sequence of turns sent to the chat endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Conversation {
    turns: Vec<ConversationTurn>,
}

impl Conversation {
    /// Start a conversation with a single user turn.
    pub fn new(user_text: impl Into<String>) -> Self {
        Self {
            turns: vec![ConversationTurn::user(user_text)],
        }
    }

    /// Build the follow-up conversation for a tool round:
    /// `[user, assistant tool request, tool result…]`.
    ///
    /// Fails unless `results` answers every request of `message`, once each,
    /// in request order.
    pub fn with_tool_results(
        user_text: impl Into<String>,
        message: &AssistantMessage,
        results: Vec<ToolResult>,
    ) -> Result<Self, FitError> {
        if message.tool_calls.is_empty() {
            return Err(FitError::InvalidState(
                "assistant message carries no tool calls".into(),
            ));
        }
        if results.len() != message.tool_calls.len() {
            return Err(FitError::InvalidState(format!(
                "{} tool results for {} tool calls",
                results.len(),
                message.tool_calls.len()
            )));
        }
        for (call, result) in message.tool_calls.iter().zip(&results) {
            if call.id != result.invocation_id {
                return Err(FitError::InvalidState(format!(
                    "tool result '{}' does not answer call '{}'",
                    result.invocation_id, call.id
                )));
            }
        }

        let mut turns = Vec::with_capacity(results.len() + 2);
        turns.push(ConversationTurn::user(user_text));
        turns.push(message.to_turn());
        turns.extend(results.into_iter().map(ConversationTurn::ToolResult));
        Ok(Self { turns })
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Tool result turns, in conversation order.
    pub fn tool_results(&self) -> Vec<&ToolResult> {
        self.turns
            .iter()
            .filter_map(|turn| match turn {
                ConversationTurn::ToolResult(result) => Some(result),
                _ => None,
            })
            .collect()
    }
}

/// The single message returned by a completion call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssistantMessage {
    pub text: Option<String>,
    pub tool_calls: Vec<ToolInvocationRequest>,
    pub finish_reason: Option<FinishReason>,
    pub usage: Usage,
}

impl AssistantMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            finish_reason: Some(FinishReason::Stop),
            ..Default::default()
        }
    }

    pub fn tool_calls(calls: Vec<ToolInvocationRequest>) -> Self {
        Self {
            tool_calls: calls,
            finish_reason: Some(FinishReason::ToolCalls),
            ..Default::default()
        }
    }

    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }

    /// The turn this message contributes to a conversation.
    pub fn to_turn(&self) -> ConversationTurn {
        if self.tool_calls.is_empty() {
            ConversationTurn::AssistantText {
                text: self.text.clone().unwrap_or_default(),
            }
        } else {
            ConversationTurn::AssistantToolRequest {
                text: self.text.clone(),
                calls: self.tool_calls.clone(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(id: &str) -> ToolResult {
        ToolResult {
            invocation_id: id.to_string(),
            tool_name: "get_current_weather".to_string(),
            content: format!("weather for {id}"),
        }
    }

    fn two_calls() -> AssistantMessage {
        AssistantMessage::tool_calls(vec![
            ToolInvocationRequest::new("call_a", "get_current_weather", r#"{"location":"A"}"#),
            ToolInvocationRequest::new("call_b", "get_current_weather", r#"{"location":"B"}"#),
        ])
    }

    #[test]
    fn follow_up_orders_turns_user_assistant_tools() {
        let message = two_calls();
        let results = vec![result("call_a"), result("call_b")];
        let conversation = Conversation::with_tool_results("hi", &message, results).unwrap();

        let roles: Vec<Role> = conversation.turns().iter().map(|t| t.role()).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant, Role::Tool, Role::Tool]);
        assert_eq!(conversation.turns()[1], message.to_turn());
        let ids: Vec<&str> = conversation
            .tool_results()
            .iter()
            .map(|r| r.invocation_id.as_str())
            .collect();
        assert_eq!(ids, vec!["call_a", "call_b"]);
    }

    #[test]
    fn follow_up_rejects_missing_result() {
        let err = Conversation::with_tool_results("hi", &two_calls(), vec![result("call_a")])
            .unwrap_err();
        assert!(matches!(err, FitError::InvalidState(_)));
    }

    #[test]
    fn follow_up_rejects_reordered_results() {
        let err = Conversation::with_tool_results(
            "hi",
            &two_calls(),
            vec![result("call_b"), result("call_a")],
        )
        .unwrap_err();
        assert!(err.to_string().contains("does not answer call 'call_a'"));
    }

    #[test]
    fn text_only_message_becomes_assistant_text_turn() {
        let turn = AssistantMessage::text("Wear a coat.").to_turn();
        assert_eq!(
            turn,
            ConversationTurn::AssistantText {
                text: "Wear a coat.".into()
            }
        );
    }
}
