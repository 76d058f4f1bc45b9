//! Check decoded tool arguments against the declared parameter schema.
//!
//! Only the top level is checked: the payload must be an object, every
//! required parameter must be present, and declared properties must carry
//! the declared JSON type. Nested schemas are not walked.

use serde_json::Value;
use thiserror::Error;

/// First way in which a payload fails its schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaViolation {
    #[error("expected object arguments, got {0}")]
    NotAnObject(&'static str),

    #[error("missing required field '{0}'")]
    MissingRequired(String),

    #[error("field '{field}' expected type '{expected}', got {actual}")]
    WrongType {
        field: String,
        expected: String,
        actual: &'static str,
    },
}

/// Validate decoded arguments against a JSON Schema object.
pub fn validate_arguments(args: &Value, schema: &Value) -> Result<(), SchemaViolation> {
    let expects_object = schema.get("type").and_then(Value::as_str) == Some("object");
    let obj = match args.as_object() {
        Some(obj) => obj,
        None if expects_object => return Err(SchemaViolation::NotAnObject(json_type_name(args))),
        None => return Ok(()),
    };

    if let Some(required) = schema.get("required").and_then(Value::as_array) {
        if let Some(missing) = required
            .iter()
            .filter_map(Value::as_str)
            .find(|name| !obj.contains_key(*name))
        {
            return Err(SchemaViolation::MissingRequired(missing.to_string()));
        }
    }

    if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
        for (key, value) in obj {
            let expected = properties
                .get(key)
                .and_then(|prop| prop.get("type"))
                .and_then(Value::as_str);
            if let Some(expected) = expected {
                if !value_matches_type(value, expected) {
                    return Err(SchemaViolation::WrongType {
                        field: key.clone(),
                        expected: expected.to_string(),
                        actual: json_type_name(value),
                    });
                }
            }
        }
    }

    Ok(())
}

fn value_matches_type(value: &Value, expected: &str) -> bool {
    match expected {
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "boolean" => value.is_boolean(),
        "object" => value.is_object(),
        "array" => value.is_array(),
        "null" => value.is_null(),
        _ => true,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
