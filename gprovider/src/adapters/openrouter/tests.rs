//! Focused unit tests for OpenRouter payload handling.

#![cfg(test)]

use gcommon::GenerationConfig;
use serde_json::json;

use crate::{FunctionDeclaration, ProviderErrorKind, Schema, SecretString, TransportConfig};

use super::client::OpenRouterClient;
use super::types::{
    ChoiceMessage, ContentPart, OpenRouterChoice, OpenRouterRequest, OpenRouterResponse,
    RequestMessage,
};

fn choice(raw: serde_json::Value) -> OpenRouterChoice {
    serde_json::from_value(raw).expect("choice should decode")
}

#[test]
fn prompt_request_omits_unset_fields() {
    let request = OpenRouterRequest::prompt("mistralai/mistral-7b-instruct", "hello");
    let encoded = serde_json::to_value(&request).expect("request should encode");

    assert_eq!(
        encoded,
        json!({"model": "mistralai/mistral-7b-instruct", "prompt": "hello"})
    );
}

#[test]
fn generation_config_and_tools_are_forwarded() {
    let config = GenerationConfig::default()
        .with_temperature(0.7)
        .with_top_k(20)
        .with_stop_sequence("END");
    let functions = vec![
        FunctionDeclaration::new("getEvents", "List events")
            .with_parameters(Schema::object().with_required_property("day", Schema::integer())),
    ];

    let request = OpenRouterRequest::prompt("m", "p")
        .with_generation_config(&config)
        .with_tools(&functions)
        .with_seed(7);
    let encoded = serde_json::to_value(&request).expect("request should encode");

    assert_eq!(encoded["temperature"], json!(0.7_f32));
    assert_eq!(encoded["top_k"], 20);
    assert_eq!(encoded["stop"], json!(["END"]));
    assert_eq!(encoded["seed"], 7);
    assert!(encoded.get("max_tokens").is_none());
    assert_eq!(encoded["tools"][0]["type"], "function");
    assert_eq!(
        encoded["tools"][0]["function"]["parameters"]["properties"]["day"]["type"],
        "integer"
    );
}

#[test]
fn chat_messages_encode_typed_content_parts() {
    let request = OpenRouterRequest::chat(
        "m",
        vec![RequestMessage::new(
            "user",
            vec![
                ContentPart::text("what is this?"),
                ContentPart::image_url("data:image/png;base64,AQID"),
            ],
        )],
    );
    let encoded = serde_json::to_value(&request).expect("request should encode");

    assert_eq!(
        encoded["messages"][0]["content"],
        json!([
            {"type": "text", "text": "what is this?"},
            {"type": "image_url", "image_url": {"url": "data:image/png;base64,AQID"}}
        ])
    );
    assert!(encoded["messages"][0].get("name").is_none());
}

#[test]
fn text_content_follows_precedence() {
    let text_first = choice(json!({
        "text": "from text",
        "message": {"content": "from message"},
        "delta": {"content": "from delta"}
    }));
    assert_eq!(text_first.text_content().as_deref(), Some("from text"));

    let message = choice(json!({"message": {"role": "assistant", "content": "from message"}}));
    assert_eq!(message.text_content().as_deref(), Some("from message"));

    let delta = choice(json!({"delta": {"content": "from delta"}, "finish_reason": null}));
    assert_eq!(delta.text_content().as_deref(), Some("from delta"));

    let error = choice(json!({"message": "upstream exploded", "code": 502}));
    assert!(matches!(error.message, Some(ChoiceMessage::Error(_))));
    assert_eq!(error.text_content().as_deref(), Some("upstream exploded"));

    let empty = choice(json!({"finish_reason": "stop"}));
    assert_eq!(empty.text_content(), None);
}

#[test]
fn response_decoding_is_lenient() {
    let raw = json!({
        "id": "gen-1",
        "choices": [
            {"message": {"content": "one"}},
            {"finish_reason": "length"}
        ],
        "created": 1_700_000_000,
        "model": "m",
        "object": "chat.completion",
        "usage": {"prompt_tokens": 4, "total_cost": 0.0002},
        "provider": "Mistral"
    });

    let response: OpenRouterResponse =
        serde_json::from_value(raw).expect("response should decode");
    assert_eq!(response.choice_texts(), vec!["one".to_string(), String::new()]);

    let usage = response.usage.expect("usage present");
    assert_eq!(usage.prompt_tokens, Some(4));
    assert_eq!(usage.completion_tokens, None);
}

#[test]
fn client_requires_api_key() {
    let error = OpenRouterClient::from_api_key(&SecretString::new(""), TransportConfig::default())
        .expect_err("blank key must fail");
    assert_eq!(error.kind, ProviderErrorKind::Authentication);
}

#[tokio::test]
async fn client_rejects_request_without_prompt_or_messages() {
    let client =
        OpenRouterClient::from_api_key(&SecretString::new("sk-or"), TransportConfig::default())
            .expect("client should build");

    let error = client
        .complete(&OpenRouterRequest {
            model: "m".to_string(),
            ..OpenRouterRequest::default()
        })
        .await
        .expect_err("empty request must fail");
    assert_eq!(error.kind, ProviderErrorKind::InvalidRequest);
}
