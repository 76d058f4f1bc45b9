//! Image illustration through the OpenAI image generation endpoint.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::config::FitcastConfig;
use crate::error::{FitError, GenerationError};
use crate::provider::http::{bearer_headers, shared_client, status_to_generation_error};

pub const IMAGE_SIZE: &str = "1024x1024";
pub const IMAGE_QUALITY: &str = "standard";

/// Anything that turns a prompt into an image URL.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// OpenAI images provider (`/images/generations`), one image per call.
#[derive(Debug, Clone)]
pub struct OpenAiImageProvider {
    model: String,
    api_key: String,
    base_url: String,
}

impl OpenAiImageProvider {
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

    pub fn from_config(config: &FitcastConfig) -> Result<Self, FitError> {
        Ok(Self::new(
            config.image_model(),
            config.api_key()?,
            config.openai_base_url(),
        ))
    }
}

#[async_trait]
impl ImageGenerator for OpenAiImageProvider {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let url = format!("{}/images/generations", self.base_url);
        debug!(model = %self.model, prompt_chars = prompt.len(), "OpenAI image generate");

        let resp = shared_client()
            .post(&url)
            .headers(bearer_headers(&self.api_key))
            .json(&json!({
                "model": self.model,
                "prompt": prompt,
                "size": IMAGE_SIZE,
                "quality": IMAGE_QUALITY,
                "n": 1,
            }))
            .send()
            .await?;

        let status = resp.status().as_u16();
        let body = resp.text().await?;
        if !(200..300).contains(&status) {
            return Err(status_to_generation_error(status, &body));
        }

        let data: ImageResponse = serde_json::from_str(&body)?;
        data.data
            .into_iter()
            .next()
            .and_then(|image| image.url)
            .ok_or(GenerationError::MissingUrl)
    }
}

#[derive(Deserialize)]
struct ImageResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Deserialize)]
struct ImageData {
    url: Option<String>,
}
