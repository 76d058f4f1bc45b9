//! Generation settings, finish reasons and round-trip results.

use bon::Builder;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::message::{Conversation, ToolResult};
use super::usage::Usage;

/// Temperature used for every completion call unless overridden.
pub const DEFAULT_TEMPERATURE: f64 = 0.0;

/// Output token bound used for every completion call unless overridden.
pub const DEFAULT_MAX_TOKENS: u32 = 300;

/// Settings controlling text generation.
///
/// ```
/// use fitcast::types::GenerationSettings;
///
/// let settings = GenerationSettings::builder()
///     .temperature(0.0)
///     .max_tokens(300)
///     .build();
/// assert_eq!(settings.max_tokens, Some(300));
/// ```
#[derive(Debug, Clone, Builder, Serialize, Deserialize, Default, PartialEq)]
pub struct GenerationSettings {
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
}

impl GenerationSettings {
    /// Deterministic sampling with the default output bound.
    pub fn deterministic() -> Self {
        Self {
            max_tokens: Some(DEFAULT_MAX_TOKENS),
            temperature: Some(DEFAULT_TEMPERATURE),
        }
    }
}

/// Why generation finished.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ToolCalls,
    ContentFilter,
}

/// Outcome of one end-to-end generation (optionally including a tool round).
#[derive(Debug, Clone)]
pub struct GenerateTextResult {
    /// Final assistant text.
    pub text: String,
    /// Tool results produced during the round, in request order. Empty when
    /// the model answered directly.
    pub tool_results: Vec<ToolResult>,
    /// Conversation sent on the last completion call.
    pub conversation: Conversation,
    /// Usage summed over every completion call.
    pub usage: Usage,
    pub finish_reason: Option<FinishReason>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn deterministic_settings_use_zero_temperature() {
        let settings = GenerationSettings::deterministic();
        assert_eq!(settings.temperature, Some(0.0));
        assert_eq!(settings.max_tokens, Some(DEFAULT_MAX_TOKENS));
    }

    #[test]
    fn finish_reason_round_trips_through_strings() {
        assert_eq!(FinishReason::ToolCalls.to_string(), "tool_calls");
        assert_eq!(
            FinishReason::from_str("content_filter").unwrap(),
            FinishReason::ContentFilter
        );
    }
}
