//! Shared test helpers: a capturing mock provider and weather stubs.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use fitcast::error::CompletionError;
use fitcast::provider::{ModelProvider, ProviderRequest};
use fitcast::tools::{FunctionTool, Tool, ToolParameters};
use fitcast::types::*;

/// A mock provider that returns queued messages and records every request.
pub struct CaptureProvider {
    responses: Mutex<Vec<Result<AssistantMessage, CompletionError>>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl CaptureProvider {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a plain text answer.
    pub fn queue_text(&self, text: &str) {
        let mut message = AssistantMessage::text(text);
        message.usage = Usage {
            input_tokens: 40,
            output_tokens: 60,
            total_tokens: 100,
        };
        self.responses.lock().unwrap().push(Ok(message));
    }

    /// Queue a response requesting `calls` as `(id, name, raw arguments)`.
    pub fn queue_tool_calls(&self, calls: &[(&str, &str, &str)]) {
        let mut message = AssistantMessage::tool_calls(
            calls
                .iter()
                .map(|(id, name, args)| ToolInvocationRequest::new(*id, *name, *args))
                .collect(),
        );
        message.usage = Usage {
            input_tokens: 10,
            output_tokens: 5,
            total_tokens: 15,
        };
        self.responses.lock().unwrap().push(Ok(message));
    }

    pub fn queue_error(&self, error: CompletionError) {
        self.responses.lock().unwrap().push(Err(error));
    }

    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ModelProvider for CaptureProvider {
    fn provider_name(&self) -> &str {
        "capture"
    }

    fn model_id(&self) -> &str {
        "capture-model"
    }

    async fn complete(
        &self,
        request: &ProviderRequest,
    ) -> Result<AssistantMessage, CompletionError> {
        self.requests.lock().unwrap().push(request.clone());
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Ok(AssistantMessage::text("Mock response"));
        }
        responses.remove(0)
    }
}

/// A `get_current_weather` stand-in that counts calls and echoes the location.
pub fn counting_weather_tool(counter: Arc<AtomicUsize>) -> Arc<dyn Tool> {
    Arc::new(FunctionTool::new(
        "get_current_weather",
        "Get the current weather",
        ToolParameters::object()
            .string("location", "The city and state", true)
            .build(),
        move |args| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                let location = args.get_str("location").unwrap_or_default().to_string();
                Ok::<_, fitcast::error::FitError>(format!("Weather Data for {location}: Clear"))
            }
        },
    ))
}

/// Observation document with the readings used across weather tests.
pub fn clear_observation() -> serde_json::Value {
    serde_json::json!({
        "properties": {
            "textDescription": "Clear",
            "temperature": { "value": 10, "unitCode": "wmoUnit:degC" },
            "windSpeed": { "value": 12, "unitCode": "wmoUnit:km_h-1" },
            "visibility": { "value": 9000, "unitCode": "wmoUnit:m" },
            "windChill": { "value": 8, "unitCode": "wmoUnit:degC" },
            "relativeHumidity": { "value": 55, "unitCode": "wmoUnit:percent" }
        }
    })
}

/// Mount the full geocode → point → stations → observation chain on `server`.
pub async fn mount_weather_chain(server: &wiremock::MockServer, location: &str) {
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, ResponseTemplate};

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", location))
        .and(query_param("format", "json"))
        .and(query_param("limit", "1"))
        .and(header("user-agent", "weatherApp"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "lat": "42.28",
                "lon": "-83.74",
                "display_name": "Ann Arbor, Washtenaw County, Michigan"
            }
        ])))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/points/42.28,-83.74"))
        .and(header("user-agent", "weatherApp"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "properties": {
                "observationStations": format!("{}/gridpoints/DTX/65,33/stations", server.uri())
            }
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/gridpoints/DTX/65,33/stations"))
        .and(header("user-agent", "weatherApp"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "observationStations": [
                format!("{}/stations/STATION1", server.uri()),
                format!("{}/stations/STATION2", server.uri())
            ]
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/stations/STATION1/observations/latest"))
        .and(header("user-agent", "weatherApp"))
        .respond_with(ResponseTemplate::new(200).set_body_json(clear_observation()))
        .expect(1)
        .mount(server)
        .await;
}
