//! Structured decoding of raw tool argument payloads.

use serde_json::Value;

use super::types::ToolParameters;
use super::validation::validate_arguments;
use crate::error::FitError;

/// Tool call arguments that decoded as JSON and conform to the tool's schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolArguments {
    value: Value,
}

impl ToolArguments {
    /// Wrap an already-decoded value without schema checks.
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    /// Decode the raw payload sent by the model and check it against `parameters`.
    ///
    /// A blank payload decodes as an empty object, so it only passes when the
    /// schema declares no required parameters.
    pub fn decode(
        tool_name: &str,
        raw: &str,
        parameters: &ToolParameters,
    ) -> Result<Self, FitError> {
        let trimmed = raw.trim();
        let value = if trimmed.is_empty() {
            Value::Object(serde_json::Map::new())
        } else {
            serde_json::from_str::<Value>(trimmed).map_err(|e| {
                FitError::argument_decode(tool_name, format!("payload is not JSON: {e}"))
            })?
        };
        validate_arguments(&value, &parameters.schema)
            .map_err(|violation| FitError::argument_decode(tool_name, violation.to_string()))?;
        Ok(Self { value })
    }

    /// Get the raw JSON value.
    pub fn raw(&self) -> &Value {
        &self.value
    }

    /// Get a string argument by key.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.value.get(key).and_then(Value::as_str)
    }

    /// Deserialize the arguments into a typed struct.
    pub fn deserialize<T>(&self, tool_name: &str) -> Result<T, FitError>
    where
        T: serde::de::DeserializeOwned,
    {
        serde_json::from_value(self.value.clone())
            .map_err(|e| FitError::argument_decode(tool_name, e.to_string()))
    }
}
