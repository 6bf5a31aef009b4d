//! Focused unit tests for Gemini adapter internals.

#![cfg(test)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use gcommon::GenerationConfig;
use serde_json::{Map, Value, json};

use crate::{
    Blob, FunctionCall, FunctionDeclaration, FunctionResponse, HarmBlockThreshold, HarmCategory,
    HttpTransport, Message, ModelProvider, ModelRequest, ModelResponse, Part, ProviderError,
    ProviderErrorKind, ProviderFuture, ProviderId, ProviderOperationHooks, Role, SafetySetting,
    Schema, SecretString, TokenUsage,
};

use super::provider::GeminiProvider;
use super::serde_api::{
    GeminiApiContent, GeminiApiResponse, args_from_wire, build_api_request,
};
use super::transport::{GeminiHttpTransport, GeminiTransport};
use super::types::{GeminiMethod, GeminiModel};

#[derive(Debug, Default)]
struct RecordingTransport {
    requests: Mutex<Vec<(String, ModelRequest)>>,
}

impl GeminiTransport for RecordingTransport {
    fn generate_content<'a>(
        &'a self,
        model: &'a GeminiModel,
        _api_key: &'a SecretString,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        Box::pin(async move {
            self.requests
                .lock()
                .expect("requests lock")
                .push((model.to_string(), request));

            Ok(ModelResponse {
                provider: ProviderId::Gemini,
                candidates: Vec::new(),
                prompt_feedback: None,
                usage: TokenUsage::default(),
            })
        })
    }

    fn count_tokens<'a>(
        &'a self,
        _model: &'a GeminiModel,
        _api_key: &'a SecretString,
        contents: Vec<Message>,
    ) -> ProviderFuture<'a, Result<u32, ProviderError>> {
        Box::pin(async move { Ok(contents.len() as u32 * 3) })
    }
}

#[derive(Default)]
struct RecordingHooks {
    events: Mutex<Vec<String>>,
}

impl ProviderOperationHooks for RecordingHooks {
    fn on_request_start(&self, provider: ProviderId, operation: &str) {
        self.events
            .lock()
            .expect("events lock")
            .push(format!("start:{provider}:{operation}"));
    }

    fn on_success(&self, provider: ProviderId, operation: &str, _elapsed: Duration) {
        self.events
            .lock()
            .expect("events lock")
            .push(format!("success:{provider}:{operation}"));
    }

    fn on_failure(
        &self,
        provider: ProviderId,
        operation: &str,
        _elapsed: Duration,
        error: &ProviderError,
    ) {
        self.events
            .lock()
            .expect("events lock")
            .push(format!("failure:{provider}:{operation}:{:?}", error.kind));
    }
}

fn all_part_kinds() -> Message {
    let mut output = Map::new();
    output.insert("events".to_string(), json!(["standup", "retro"]));

    Message::new(
        Role::Model,
        vec![
            Part::text("here you go"),
            Part::InlineData(Blob::png(&[1, 2, 3, 4])),
            Part::FunctionCall(FunctionCall::new("getEvents").with_arg("year", "2024")),
            Part::FunctionResponse(FunctionResponse::new("getEvents", output)),
        ],
    )
}

#[test]
fn message_survives_wire_round_trip_for_every_part_kind() {
    let message = all_part_kinds();
    let encoded = serde_json::to_string(&GeminiApiContent::from(message.clone()))
        .expect("content should encode");
    let decoded: GeminiApiContent = serde_json::from_str(&encoded).expect("content should decode");

    assert_eq!(Message::try_from(decoded).expect("valid message"), message);
}

#[test]
fn wire_encoding_uses_camel_case_and_omits_unset_fields() {
    let encoded = serde_json::to_value(GeminiApiContent::from(all_part_kinds()))
        .expect("content should encode");

    assert_eq!(encoded["role"], "model");
    assert_eq!(encoded["parts"][0], json!({"text": "here you go"}));
    assert_eq!(encoded["parts"][1]["inlineData"]["mimeType"], "image/png");
    assert_eq!(encoded["parts"][2]["functionCall"]["args"]["year"], "2024");
    assert!(encoded["parts"][3]["functionResponse"]["response"]["events"].is_array());
}

#[test]
fn decoding_accepts_snake_case_and_drops_unknown_parts() {
    let raw = json!({
        "parts": [
            {"inline_data": {"mime_type": "image/png", "data": "AQID"}},
            {"executableCode": {"code": "print(1)"}},
            {"text": "tail"}
        ]
    });

    let content: GeminiApiContent = serde_json::from_value(raw).expect("content should decode");
    let message = Message::try_from(content).expect("valid message");

    assert_eq!(message.role, Role::Model);
    assert_eq!(message.parts.len(), 2);
    assert_eq!(message.parts[0], Part::InlineData(Blob::new("image/png", "AQID")));
    assert_eq!(message.parts[1], Part::text("tail"));
}

#[test]
fn unknown_role_is_a_decode_error() {
    let content: GeminiApiContent =
        serde_json::from_value(json!({"role": "system", "parts": [{"text": "x"}]}))
            .expect("content should decode");

    let error = Message::try_from(content).expect_err("system role is not modelled");
    assert_eq!(error.kind, ProviderErrorKind::Decode);
}

#[test]
fn non_string_arguments_render_as_json_text() {
    let args = json!({"year": 2024, "month": "3", "flags": [true]});
    let Value::Object(args) = args else {
        panic!("object expected");
    };

    let flattened = args_from_wire(args);
    assert_eq!(flattened.get("year").map(String::as_str), Some("2024"));
    assert_eq!(flattened.get("month").map(String::as_str), Some("3"));
    assert_eq!(flattened.get("flags").map(String::as_str), Some("[true]"));
}

#[test]
fn build_api_request_includes_tools_safety_and_config_only_when_set() {
    let bare = build_api_request(ModelRequest::new(vec![Message::user("hi")]));
    let bare = serde_json::to_value(bare).expect("request should encode");
    assert_eq!(
        bare,
        json!({"contents": [{"role": "user", "parts": [{"text": "hi"}]}]})
    );

    let full = ModelRequest::new(vec![Message::user("hi")])
        .with_functions(vec![
            FunctionDeclaration::new("getEvents", "List events").with_parameters(
                Schema::object().with_required_property("year", Schema::integer()),
            ),
        ])
        .with_safety_settings(vec![SafetySetting::new(
            HarmCategory::Harassment,
            HarmBlockThreshold::BlockNone,
        )])
        .with_generation_config(GenerationConfig::default().with_max_output_tokens(64));

    let full = serde_json::to_value(build_api_request(full)).expect("request should encode");
    let declaration = &full["tools"][0]["functionDeclarations"][0];
    assert_eq!(declaration["name"], "getEvents");
    assert_eq!(declaration["parameters"]["type"], "OBJECT");
    assert_eq!(declaration["parameters"]["properties"]["year"]["type"], "INTEGER");
    assert_eq!(declaration["parameters"]["required"][0], "year");
    assert!(declaration["parameters"].get("nullable").is_none());
    assert_eq!(
        full["safetySettings"][0],
        json!({"category": "HARM_CATEGORY_HARASSMENT", "threshold": "BLOCK_NONE"})
    );
    assert_eq!(full["generationConfig"], json!({"maxOutputTokens": 64}));
}

#[test]
fn response_conversion_reads_candidates_feedback_and_usage() {
    let raw = json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": "pong"}]},
            "finishReason": "STOP",
            "safetyRatings": [{"category": "HARM_CATEGORY_HARASSMENT", "probability": "NEGLIGIBLE"}]
        }],
        "promptFeedback": {"safetyRatings": []},
        "usageMetadata": {"promptTokenCount": 3, "candidatesTokenCount": 1, "totalTokenCount": 4},
        "modelVersion": "gemini-pro-001"
    });

    let parsed: GeminiApiResponse = serde_json::from_value(raw).expect("response should decode");
    let response = ModelResponse::try_from(parsed).expect("response should convert");

    assert_eq!(response.candidates.len(), 1);
    assert_eq!(response.candidates[0].index, 0);
    assert_eq!(
        response.candidates[0].safety_ratings[0].harm_category(),
        Some(HarmCategory::Harassment)
    );
    assert_eq!(response.usage.total_tokens, 4);
    assert_eq!(
        response.into_first_content().expect("content").first_text(),
        Some("pong")
    );
}

#[test]
fn endpoint_embeds_model_and_method() {
    let transport = GeminiHttpTransport::new(HttpTransport::with_client(reqwest::Client::new()))
        .with_base_url("http://localhost:9999/v1beta/");

    assert_eq!(
        transport.endpoint(&GeminiModel::Gemini15Pro, GeminiMethod::GenerateContent),
        "http://localhost:9999/v1beta/models/gemini-1.5-pro-latest:generateContent"
    );
    assert_eq!(
        transport.endpoint(
            &GeminiModel::Custom("gemini-1.5-flash".to_string()),
            GeminiMethod::CountTokens
        ),
        "http://localhost:9999/v1beta/models/gemini-1.5-flash:countTokens"
    );
}

#[test]
fn model_parse_recognizes_known_names() {
    assert_eq!(GeminiModel::parse("gemini-pro"), GeminiModel::GeminiPro);
    assert_eq!(GeminiModel::parse("models/gemini-pro-vision"), GeminiModel::GeminiProVision);
    assert_eq!(
        GeminiModel::parse("gemini-2.0-flash"),
        GeminiModel::Custom("gemini-2.0-flash".to_string())
    );
    assert_eq!(GeminiModel::default().as_str(), "gemini-pro");
}

#[tokio::test]
async fn provider_forwards_request_and_reports_hooks() {
    let transport = Arc::new(RecordingTransport::default());
    let hooks = Arc::new(RecordingHooks::default());
    let provider = GeminiProvider::new("key", transport.clone())
        .with_model(GeminiModel::Gemini15Pro)
        .with_hooks(hooks.clone());

    provider
        .generate_content(ModelRequest::new(vec![Message::user("hi")]))
        .await
        .expect("generation should succeed");
    let tokens = provider
        .count_tokens(vec![Message::user("a"), Message::user("b")])
        .await
        .expect("count should succeed");

    assert_eq!(tokens, 6);
    let requests = transport.requests.lock().expect("requests lock");
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].0, "gemini-1.5-pro-latest");

    let events = hooks.events.lock().expect("events lock");
    assert_eq!(
        events.as_slice(),
        [
            "start:gemini:generate_content",
            "success:gemini:generate_content",
            "start:gemini:count_tokens",
            "success:gemini:count_tokens",
        ]
    );
}

#[tokio::test]
async fn provider_rejects_invalid_request_before_transport() {
    let transport = Arc::new(RecordingTransport::default());
    let hooks = Arc::new(RecordingHooks::default());
    let provider = GeminiProvider::new("key", transport.clone()).with_hooks(hooks.clone());

    let error = provider
        .generate_content(ModelRequest::new(Vec::new()))
        .await
        .expect_err("empty contents must fail");

    assert_eq!(error.kind, ProviderErrorKind::InvalidRequest);
    assert!(transport.requests.lock().expect("requests lock").is_empty());
    assert_eq!(
        hooks.events.lock().expect("events lock").last().map(String::as_str),
        Some("failure:gemini:generate_content:InvalidRequest")
    );
}

#[tokio::test]
async fn provider_requires_api_key() {
    let provider = GeminiProvider::new("  ", Arc::new(RecordingTransport::default()));

    let error = provider
        .count_tokens(vec![Message::user("hi")])
        .await
        .expect_err("blank key must fail");
    assert_eq!(error.kind, ProviderErrorKind::Authentication);
    assert!(format!("{provider:?}").contains("[REDACTED]"));
}
