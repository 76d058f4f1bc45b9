//! Error types for fitcast.
//!
//! Each external collaborator has its own error enum so callers can branch on
//! the failing stage. [`FitError`] wraps them for the end-to-end flow.

use thiserror::Error;

/// Failure of the weather lookup chain (geocoding → grid point → stations → observation).
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Location '{0}' not found")]
    LocationNotFound(String),

    #[error("No observation stations listed at {0}")]
    NoStations(String),

    #[error("Weather API error (status {status}) from {url}: {body}")]
    Api {
        status: u16,
        url: String,
        body: String,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed weather response: {0}")]
    MalformedResponse(String),
}

/// Failure of a chat completion call.
#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limited: retry after {retry_after_ms:?}ms")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No choices in completion response")]
    NoChoices,

    #[error("Completion response carried no text")]
    MissingContent,
}

impl CompletionError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }
}

/// Failure of an image generation call.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Image API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Image response contained no URL")]
    MissingUrl,
}

/// Primary error type for the end-to-end recommendation flow.
#[derive(Error, Debug)]
pub enum FitError {
    #[error("Weather lookup failed: {0}")]
    Lookup(#[from] LookupError),

    #[error("Chat completion failed: {0}")]
    Completion(#[from] CompletionError),

    #[error("Image generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("Invalid arguments for tool '{tool_name}': {message}")]
    ArgumentDecode { tool_name: String, message: String },

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Tool execution error: {tool_name}: {message}")]
    ToolExecution { tool_name: String, message: String },

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl FitError {
    /// Create an argument decoding error for a tool.
    pub fn argument_decode(tool_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ArgumentDecode {
            tool_name: tool_name.into(),
            message: message.into(),
        }
    }

    /// Whether the failure came from a remote service rather than local input.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::Lookup(_) | Self::Completion(_) | Self::Generation(_)
        )
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, FitError>;
