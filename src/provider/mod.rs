//! Chat completion provider trait and implementations.

pub mod http;
pub mod openai;

use async_trait::async_trait;

use crate::error::CompletionError;
use crate::tools::ToolSpec;
use crate::types::{AssistantMessage, Conversation, GenerationSettings};

pub use openai::OpenAiProvider;

/// A request sent to a chat completion provider.
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    pub conversation: Conversation,
    pub settings: GenerationSettings,
    /// Passed to the endpoint verbatim when present.
    pub tools: Option<Vec<ToolSpec>>,
}

/// Core trait implemented by chat completion providers.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &str;

    /// The model ID this provider instance serves.
    fn model_id(&self) -> &str;

    /// Issue one completion call and return the single assistant message.
    async fn complete(
        &self,
        request: &ProviderRequest,
    ) -> Result<AssistantMessage, CompletionError>;
}
