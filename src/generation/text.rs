//! The tool-calling round trip.
//!
//! A round moves through two states. While *awaiting tool results*, every
//! requested invocation is dispatched in receipt order and its text captured.
//! Once all results exist the round is *completed*: the follow-up
//! conversation `[user, assistant tool request, tool result…]` is sent back
//! to the model and its text is the final answer. Any failure aborts the round.

use tracing::{debug, info, warn};

use crate::error::{CompletionError, FitError};
use crate::provider::{ModelProvider, ProviderRequest};
use crate::tools::{ToolArguments, ToolRegistry};
use crate::types::*;

/// Ask the model once; run a tool round if it requests tools.
///
/// When the first response carries no tool calls its text is returned
/// directly and no tool is touched.
pub async fn generate_text(
    provider: &dyn ModelProvider,
    registry: &ToolRegistry,
    settings: &GenerationSettings,
    user_text: &str,
) -> Result<GenerateTextResult, FitError> {
    let conversation = Conversation::new(user_text);
    let request = ProviderRequest {
        conversation: conversation.clone(),
        settings: settings.clone(),
        tools: registry.specs(),
    };

    debug!(
        provider = provider.provider_name(),
        model = provider.model_id(),
        "generate_text: first completion"
    );
    let message = provider.complete(&request).await?;

    if message.has_tool_calls() {
        return complete_tool_round(provider, registry, settings, user_text, message).await;
    }

    let text = message.text.ok_or(CompletionError::MissingContent)?;
    Ok(GenerateTextResult {
        text,
        tool_results: Vec::new(),
        conversation,
        usage: message.usage,
        finish_reason: message.finish_reason,
    })
}

/// Execute every tool call of `message` and obtain the model's final answer.
pub async fn complete_tool_round(
    provider: &dyn ModelProvider,
    registry: &ToolRegistry,
    settings: &GenerationSettings,
    user_text: &str,
    message: AssistantMessage,
) -> Result<GenerateTextResult, FitError> {
    let results = dispatch_tool_calls(registry, &message.tool_calls).await?;
    let conversation = Conversation::with_tool_results(user_text, &message, results.clone())?;

    let request = ProviderRequest {
        conversation,
        settings: settings.clone(),
        tools: registry.specs(),
    };

    debug!(
        provider = provider.provider_name(),
        model = provider.model_id(),
        tool_results = results.len(),
        "generate_text: follow-up completion"
    );
    let answer = provider.complete(&request).await?;

    if answer.has_tool_calls() {
        warn!(
            requested = answer.tool_calls.len(),
            "model requested another tool round; only one round is supported"
        );
    }

    let mut usage = message.usage;
    usage.merge(&answer.usage);
    info!(
        input_tokens = usage.input_tokens,
        output_tokens = usage.output_tokens,
        "tool round completed"
    );

    let text = answer.text.ok_or(CompletionError::MissingContent)?;
    Ok(GenerateTextResult {
        text,
        tool_results: results,
        conversation: request.conversation,
        usage,
        finish_reason: answer.finish_reason,
    })
}

/// Dispatch each call, in order, through the static registry.
///
/// Stops at the first failure: an unknown tool, a payload that does not
/// decode under the tool's schema, or a failing tool. A tool failure that is
/// not a weather, chat or image error surfaces as [`FitError::ToolExecution`].
pub async fn dispatch_tool_calls(
    registry: &ToolRegistry,
    calls: &[ToolInvocationRequest],
) -> Result<Vec<ToolResult>, FitError> {
    let mut results = Vec::with_capacity(calls.len());

    for call in calls {
        let tool = registry
            .get(&call.name)
            .ok_or_else(|| FitError::UnknownTool(call.name.clone()))?;
        let args = ToolArguments::decode(&call.name, &call.arguments, tool.parameters())?;

        info!(tool = %call.name, id = %call.id, arguments = %args.raw(), "calling tool");
        let content = tool
            .execute(&args)
            .await
            .map_err(|e| execution_error(&call.name, e))?;
        info!(tool = %call.name, id = %call.id, result = %content, "tool returned");

        results.push(ToolResult {
            invocation_id: call.id.clone(),
            tool_name: call.name.clone(),
            content,
        });
    }

    Ok(results)
}

/// Stage errors raised inside a tool keep their type; anything else is
/// reported against the tool that failed.
fn execution_error(tool_name: &str, error: FitError) -> FitError {
    match error {
        FitError::Lookup(_)
        | FitError::Completion(_)
        | FitError::Generation(_)
        | FitError::ArgumentDecode { .. }
        | FitError::ToolExecution { .. } => error,
        other => FitError::ToolExecution {
            tool_name: tool_name.to_string(),
            message: other.to_string(),
        },
    }
}
