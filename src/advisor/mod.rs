//! Outfit recommendations: the flow behind the user-facing surface.
//!
//! Collects a location and an activity, runs the tool-calling round, and on
//! request turns the resulting text into an illustration.

pub mod prompt;

use std::sync::Arc;

use tracing::info;

use crate::config::FitcastConfig;
use crate::error::FitError;
use crate::generation::generate_text;
use crate::image::{ImageGenerator, OpenAiImageProvider};
use crate::provider::{ModelProvider, OpenAiProvider};
use crate::tools::{ToolRegistry, WeatherTool};
use crate::types::{GenerationSettings, ToolResult, Usage};
use crate::weather::WeatherClient;

/// Upper bound on each free-text input, in characters.
pub const MAX_INPUT_CHARS: usize = 30;

/// A validated location + activity pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRequest {
    location: String,
    activity: String,
}

impl ActivityRequest {
    /// Both inputs must be non-blank and at most [`MAX_INPUT_CHARS`] long.
    /// Accepted text is kept exactly as given.
    pub fn new(location: impl Into<String>, activity: impl Into<String>) -> Result<Self, FitError> {
        let location = location.into();
        let activity = activity.into();
        check_input("location", &location)?;
        check_input("activity", &activity)?;
        Ok(Self { location, activity })
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn activity(&self) -> &str {
        &self.activity
    }

    /// The opening user turn for this request.
    pub fn prompt(&self) -> String {
        prompt::recommendation_prompt(&self.location, &self.activity)
    }
}

fn check_input(field: &str, value: &str) -> Result<(), FitError> {
    if value.trim().is_empty() {
        return Err(FitError::InvalidInput(format!("{field} is required")));
    }
    let chars = value.chars().count();
    if chars > MAX_INPUT_CHARS {
        return Err(FitError::InvalidInput(format!(
            "{field} is {chars} characters, the limit is {MAX_INPUT_CHARS}"
        )));
    }
    Ok(())
}

/// The model's answer for one request.
#[derive(Debug, Clone)]
pub struct Recommendation {
    pub request: ActivityRequest,
    /// Opening user turn that was sent.
    pub prompt: String,
    pub text: String,
    pub tool_results: Vec<ToolResult>,
    pub usage: Usage,
}

/// A generated picture of a recommendation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Illustration {
    pub prompt: String,
    pub url: String,
}

/// Wires the chat provider, the tool registry and the image generator together.
pub struct OutfitAdvisor {
    provider: Arc<dyn ModelProvider>,
    images: Arc<dyn ImageGenerator>,
    registry: ToolRegistry,
    settings: GenerationSettings,
}

impl OutfitAdvisor {
    pub fn new(
        provider: Arc<dyn ModelProvider>,
        images: Arc<dyn ImageGenerator>,
        registry: ToolRegistry,
        settings: GenerationSettings,
    ) -> Self {
        Self {
            provider,
            images,
            registry,
            settings,
        }
    }

    /// OpenAI chat + images, with `get_current_weather` bound to the live
    /// weather services.
    pub fn from_config(config: &FitcastConfig) -> Result<Self, FitError> {
        let provider = Arc::new(OpenAiProvider::from_config(config)?);
        let images = Arc::new(OpenAiImageProvider::from_config(config)?);
        let weather = Arc::new(WeatherClient::new(config));
        let registry = ToolRegistry::new().with(Arc::new(WeatherTool::new(weather)))?;
        let settings = GenerationSettings::builder()
            .temperature(crate::types::DEFAULT_TEMPERATURE)
            .max_tokens(config.max_tokens())
            .build();
        Ok(Self::new(provider, images, registry, settings))
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Ask the model for an outfit suited to the request's weather and activity.
    pub async fn recommend(&self, request: &ActivityRequest) -> Result<Recommendation, FitError> {
        let prompt = request.prompt();
        info!(
            location = request.location(),
            activity = request.activity(),
            "requesting recommendation"
        );

        let result = generate_text(
            self.provider.as_ref(),
            &self.registry,
            &self.settings,
            &prompt,
        )
        .await?;

        Ok(Recommendation {
            request: request.clone(),
            prompt,
            text: result.text,
            tool_results: result.tool_results,
            usage: result.usage,
        })
    }

    /// Generate an image of the clothing described in `recommendation`.
    pub async fn illustrate(
        &self,
        recommendation: &Recommendation,
    ) -> Result<Illustration, FitError> {
        let prompt = prompt::illustration_prompt(&recommendation.text);
        let url = self.images.generate(&prompt).await?;
        info!(url = %url, "illustration ready");
        Ok(Illustration { prompt, url })
    }
}
