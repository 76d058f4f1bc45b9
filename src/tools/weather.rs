//! `get_current_weather`: the weather lookup exposed as a model tool.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use super::arguments::ToolArguments;
use super::tool::Tool;
use super::types::ToolParameters;
use crate::error::FitError;
use crate::weather::WeatherLookup;

pub const WEATHER_TOOL_NAME: &str = "get_current_weather";

const WEATHER_TOOL_DESCRIPTION: &str =
    "Get a json string with the current weather conditions at a given location. \
     MUST pass in the input as CITY, STATE. e.g. Mountain View, CA.";

#[derive(Debug, Deserialize)]
struct WeatherArgs {
    location: String,
}

/// Binds [`WEATHER_TOOL_NAME`] to a [`WeatherLookup`].
pub struct WeatherTool {
    lookup: Arc<dyn WeatherLookup>,
    parameters: ToolParameters,
}

impl WeatherTool {
    pub fn new(lookup: Arc<dyn WeatherLookup>) -> Self {
        Self {
            lookup,
            parameters: ToolParameters::object()
                .string("location", "The city and state, e.g. San Francisco, CA", true)
                .build(),
        }
    }
}

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        WEATHER_TOOL_NAME
    }

    fn description(&self) -> &str {
        WEATHER_TOOL_DESCRIPTION
    }

    fn parameters(&self) -> &ToolParameters {
        &self.parameters
    }

    async fn execute(&self, args: &ToolArguments) -> Result<String, FitError> {
        let args: WeatherArgs = args.deserialize(WEATHER_TOOL_NAME)?;
        Ok(self.lookup.lookup(&args.location).await?)
    }
}

impl std::fmt::Debug for WeatherTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherTool").finish_non_exhaustive()
    }
}
