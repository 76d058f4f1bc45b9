//! OpenAI chat completions wire behavior against a stub server.

use fitcast::error::CompletionError;
use fitcast::provider::{ModelProvider, OpenAiProvider, ProviderRequest};
use fitcast::tools::{ToolParameters, ToolSpec};
use fitcast::types::*;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider_for(server: &MockServer) -> OpenAiProvider {
    OpenAiProvider::new("gpt-3.5-turbo", "sk-test", format!("{}/v1", server.uri()))
}

fn weather_request() -> ProviderRequest {
    ProviderRequest {
        conversation: Conversation::new("What should I wear in Ann Arbor, MI?"),
        settings: GenerationSettings::deterministic(),
        tools: Some(vec![ToolSpec {
            name: "get_current_weather".into(),
            description: "Get the current weather in a given location".into(),
            parameters: ToolParameters::object()
                .string("location", "The city and state, e.g. San Francisco, CA", true)
                .build(),
        }]),
    }
}

#[tokio::test]
async fn sends_model_settings_and_tools() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-3.5-turbo",
            "temperature": 0.0,
            "max_tokens": 300,
            "messages": [{ "role": "user", "content": "What should I wear in Ann Arbor, MI?" }],
            "tools": [{ "type": "function", "function": { "name": "get_current_weather" } }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{
                "message": { "role": "assistant", "content": "A light jacket." },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 12, "completion_tokens": 4, "total_tokens": 16 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let message = provider_for(&server).complete(&weather_request()).await.unwrap();

    assert_eq!(message.text.as_deref(), Some("A light jacket."));
    assert!(!message.has_tool_calls());
    assert_eq!(message.finish_reason, Some(FinishReason::Stop));
    assert_eq!(message.usage.total_tokens, 16);
}

#[tokio::test]
async fn parses_tool_calls_with_raw_arguments() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [
                        {
                            "id": "call_a",
                            "type": "function",
                            "function": { "name": "get_current_weather", "arguments": "{\"location\": \"Ann Arbor, MI\"}" }
                        },
                        {
                            "id": "call_b",
                            "type": "function",
                            "function": { "name": "get_current_weather", "arguments": "{\"location\": \"Detroit, MI\"}" }
                        }
                    ]
                },
                "finish_reason": "tool_calls"
            }]
        })))
        .mount(&server)
        .await;

    let message = provider_for(&server).complete(&weather_request()).await.unwrap();

    assert_eq!(message.text, None);
    assert_eq!(message.finish_reason, Some(FinishReason::ToolCalls));
    assert_eq!(message.tool_calls.len(), 2);
    assert_eq!(message.tool_calls[0].id, "call_a");
    assert_eq!(message.tool_calls[1].arguments, r#"{"location": "Detroit, MI"}"#);
    assert_eq!(message.usage, Usage::default());
}

#[tokio::test]
async fn empty_answer_without_tool_calls_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "content": "" }, "finish_reason": "stop" }]
        })))
        .mount(&server)
        .await;

    let message = provider_for(&server).complete(&weather_request()).await.unwrap();

    assert_eq!(message.text.as_deref(), Some(""));
}

#[tokio::test]
async fn empty_content_beside_tool_calls_is_dropped() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{
                "message": {
                    "content": "",
                    "tool_calls": [{
                        "id": "call_a",
                        "type": "function",
                        "function": {
                            "name": "get_current_weather",
                            "arguments": "{\"location\": \"Ann Arbor, MI\"}"
                        }
                    }]
                },
                "finish_reason": "tool_calls"
            }]
        })))
        .mount(&server)
        .await;

    let message = provider_for(&server).complete(&weather_request()).await.unwrap();

    assert_eq!(message.text, None);
    assert!(message.has_tool_calls());
}

#[tokio::test]
async fn unauthorized_is_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "message": "Incorrect API key provided", "type": "invalid_request_error" }
        })))
        .mount(&server)
        .await;

    let err = provider_for(&server).complete(&weather_request()).await.unwrap_err();

    assert!(matches!(
        err,
        CompletionError::Authentication(ref m) if m == "Incorrect API key provided"
    ));
}

#[tokio::test]
async fn too_many_requests_is_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    let err = provider_for(&server).complete(&weather_request()).await.unwrap_err();

    assert!(matches!(err, CompletionError::RateLimited { retry_after_ms: None }));
}

#[tokio::test]
async fn server_error_keeps_status_and_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": { "message": "The server had an error" }
        })))
        .mount(&server)
        .await;

    let err = provider_for(&server).complete(&weather_request()).await.unwrap_err();

    assert_eq!(err.to_string(), "API error (status 500): The server had an error");
}

#[tokio::test]
async fn empty_choices_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let err = provider_for(&server).complete(&weather_request()).await.unwrap_err();

    assert!(matches!(err, CompletionError::NoChoices));
}

#[tokio::test]
async fn non_json_success_body_is_serialization_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let err = provider_for(&server).complete(&weather_request()).await.unwrap_err();

    assert!(matches!(err, CompletionError::Serialization(_)));
}

#[tokio::test]
async fn follow_up_replays_tool_request_and_results() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({
            "messages": [
                { "role": "user", "content": "What should I wear in Ann Arbor, MI?" },
                {
                    "role": "assistant",
                    "tool_calls": [{
                        "id": "call_a",
                        "type": "function",
                        "function": { "name": "get_current_weather", "arguments": "{\"location\":\"Ann Arbor, MI\"}" }
                    }]
                },
                {
                    "role": "tool",
                    "tool_call_id": "call_a",
                    "name": "get_current_weather",
                    "content": "Weather Data for Ann Arbor, MI: Clear"
                }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "content": "Sunglasses." }, "finish_reason": "stop" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let first = AssistantMessage::tool_calls(vec![ToolInvocationRequest::new(
        "call_a",
        "get_current_weather",
        r#"{"location":"Ann Arbor, MI"}"#,
    )]);
    let conversation = Conversation::with_tool_results(
        "What should I wear in Ann Arbor, MI?",
        &first,
        vec![ToolResult {
            invocation_id: "call_a".into(),
            tool_name: "get_current_weather".into(),
            content: "Weather Data for Ann Arbor, MI: Clear".into(),
        }],
    )
    .unwrap();
    let request = ProviderRequest {
        conversation,
        ..weather_request()
    };

    let message = provider_for(&server).complete(&request).await.unwrap();

    assert_eq!(message.text.as_deref(), Some("Sunglasses."));
}
