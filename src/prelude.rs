//! Convenience re-exports for common use.

pub use crate::advisor::{ActivityRequest, Illustration, OutfitAdvisor, Recommendation};
pub use crate::config::FitcastConfig;
pub use crate::error::{FitError, Result};
pub use crate::image::ImageGenerator;
pub use crate::provider::ModelProvider;
pub use crate::tools::{FunctionTool, Tool, ToolArguments, ToolParameters, ToolRegistry};
pub use crate::types::{
    AssistantMessage, Conversation, ConversationTurn, GenerationSettings, ToolInvocationRequest,
    ToolResult,
};
pub use crate::weather::{WeatherClient, WeatherLookup};
