//! Configuration system (layered: code > env > config file > defaults).
//!
//! A [`FitcastConfig`] is built once at start-up and passed by reference to
//! every client constructor. Nothing reads credentials from global state.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::FitError;
use crate::types::DEFAULT_MAX_TOKENS;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";
pub const DEFAULT_GEOCODING_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_WEATHER_URL: &str = "https://api.weather.gov";
pub const DEFAULT_USER_AGENT: &str = "weatherApp";

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "FITCAST_CONFIG";

/// Keys accepted in the TOML config file. All optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub openai_api_key: Option<String>,
    pub openai_base_url: Option<String>,
    pub chat_model: Option<String>,
    pub image_model: Option<String>,
    pub max_tokens: Option<u32>,
    pub geocoding_url: Option<String>,
    pub weather_url: Option<String>,
    pub user_agent: Option<String>,
}

impl FileConfig {
    /// Parse a config file from disk.
    pub fn read(path: &Path) -> Result<Self, FitError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            FitError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        toml::from_str(&raw)
            .map_err(|e| FitError::Configuration(format!("invalid {}: {e}", path.display())))
    }
}

/// Resolved configuration for the chat, image and weather clients.
#[derive(Clone)]
pub struct FitcastConfig {
    openai_api_key: Option<String>,
    openai_base_url: String,
    chat_model: String,
    image_model: String,
    max_tokens: u32,
    geocoding_base_url: String,
    weather_base_url: String,
    user_agent: String,
}

impl fmt::Debug for FitcastConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FitcastConfig")
            .field("openai_api_key", &self.openai_api_key.as_ref().map(|_| ".."))
            .field("openai_base_url", &self.openai_base_url)
            .field("chat_model", &self.chat_model)
            .field("image_model", &self.image_model)
            .field("max_tokens", &self.max_tokens)
            .field("geocoding_base_url", &self.geocoding_base_url)
            .field("weather_base_url", &self.weather_base_url)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Default for FitcastConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl FitcastConfig {
    /// Built-in defaults, no API key.
    pub fn new() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            geocoding_base_url: DEFAULT_GEOCODING_URL.to_string(),
            weather_base_url: DEFAULT_WEATHER_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Load from the process environment (and `.env`), layered over the
    /// config file named by `path`, `FITCAST_CONFIG`, or the platform default.
    pub fn load(path: Option<&Path>) -> Result<Self, FitError> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        let env = |key: &str| std::env::var(key).ok();

        let file = match path
            .map(Path::to_path_buf)
            .or_else(|| env(CONFIG_PATH_ENV).map(PathBuf::from))
        {
            Some(explicit) => Some(FileConfig::read(&explicit)?),
            None => match Self::default_path() {
                Some(default) if default.is_file() => Some(FileConfig::read(&default)?),
                _ => None,
            },
        };

        Self::from_sources(file, env)
    }

    /// Load using only the environment and default config location.
    pub fn from_env() -> Result<Self, FitError> {
        Self::load(None)
    }

    /// Platform config file location (`…/fitcast/config.toml`).
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "fitcast")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Merge a parsed config file with an environment lookup; the environment wins.
    pub fn from_sources<E>(file: Option<FileConfig>, env: E) -> Result<Self, FitError>
    where
        E: Fn(&str) -> Option<String>,
    {
        let file = file.unwrap_or_default();
        let mut config = Self::new();

        let pick = |var: &str, from_file: Option<String>| env(var).or(from_file);

        config.openai_api_key = pick("OPENAI_API_KEY", file.openai_api_key);
        if let Some(url) = pick("OPENAI_BASE_URL", file.openai_base_url) {
            config.openai_base_url = url;
        }
        if let Some(model) = pick("FITCAST_CHAT_MODEL", file.chat_model) {
            config.chat_model = model;
        }
        if let Some(model) = pick("FITCAST_IMAGE_MODEL", file.image_model) {
            config.image_model = model;
        }
        if let Some(url) = pick("FITCAST_GEOCODING_URL", file.geocoding_url) {
            config.geocoding_base_url = url;
        }
        if let Some(url) = pick("FITCAST_WEATHER_URL", file.weather_url) {
            config.weather_base_url = url;
        }
        if let Some(agent) = pick("FITCAST_USER_AGENT", file.user_agent) {
            config.user_agent = agent;
        }

        config.max_tokens = match env("FITCAST_MAX_TOKENS") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(FitError::Configuration(format!(
                        "FITCAST_MAX_TOKENS must be a positive integer, got '{raw}'"
                    )))
                }
            },
            None => match file.max_tokens {
                Some(0) => {
                    return Err(FitError::Configuration(
                        "max_tokens must be a positive integer, got 0".into(),
                    ))
                }
                Some(n) => n,
                None => DEFAULT_MAX_TOKENS,
            },
        };

        Ok(config)
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.openai_api_key = Some(key.into());
        self
    }

    pub fn with_openai_base_url(mut self, url: impl Into<String>) -> Self {
        self.openai_base_url = url.into();
        self
    }

    pub fn with_chat_model(mut self, model: impl Into<String>) -> Self {
        self.chat_model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_geocoding_base_url(mut self, url: impl Into<String>) -> Self {
        self.geocoding_base_url = url.into();
        self
    }

    pub fn with_weather_base_url(mut self, url: impl Into<String>) -> Self {
        self.weather_base_url = url.into();
        self
    }

    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// The OpenAI API key, or a configuration error naming the variable to set.
    pub fn api_key(&self) -> Result<&str, FitError> {
        self.openai_api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| FitError::Configuration("Missing OPENAI_API_KEY".into()))
    }

    pub fn openai_base_url(&self) -> &str {
        &self.openai_base_url
    }

    pub fn chat_model(&self) -> &str {
        &self.chat_model
    }

    pub fn image_model(&self) -> &str {
        &self.image_model
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    pub fn geocoding_base_url(&self) -> &str {
        &self.geocoding_base_url
    }

    pub fn weather_base_url(&self) -> &str {
        &self.weather_base_url
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}
