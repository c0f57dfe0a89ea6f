//! Unit tests for the chat-completions client.

use std::net::TcpListener;
use std::time::Duration;

use rstest::rstest;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{ChatCompletionClient, ChatCompletionConfig, ChatContent, parse_content_value};
use crate::completion::{CompletionClient, CompletionError};

const API_KEY: &str = "sk-test";

fn client_for(base_url: &str) -> ChatCompletionClient {
    let config = ChatCompletionConfig::new(base_url, "mistral-small-latest", Some(API_KEY.to_owned()))
        .with_timeouts(Duration::from_secs(2), Duration::from_secs(2));
    ChatCompletionClient::new(config).expect("client should build")
}

fn success_body(content: serde_json::Value) -> serde_json::Value {
    json!({
        "id": "cmpl-1",
        "choices": [{ "index": 0, "message": { "role": "assistant", "content": content } }],
        "usage": { "prompt_tokens": 12, "completion_tokens": 7, "total_tokens": 19 }
    })
}

async fn mount_status(server: &MockServer, status: u16, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

#[test]
fn parse_content_value_supports_string_and_array() {
    let as_string: ChatContent =
        serde_json::from_value(json!("hello")).expect("string content should decode");
    let as_array: ChatContent = serde_json::from_value(json!([{"text":"first"}, {"text":"second"}]))
        .expect("array content should decode");

    assert_eq!(parse_content_value(&as_string), Some("hello"));
    assert_eq!(parse_content_value(&as_array), Some("first"));
}

#[tokio::test]
async fn complete_sends_expected_request_and_returns_trimmed_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", format!("Bearer {API_KEY}").as_str()))
        .and(body_partial_json(json!({
            "model": "mistral-small-latest",
            "messages": [{ "role": "user", "content": "rewrite this" }],
            "temperature": 0.7,
            "top_p": 0.9,
            "max_tokens": 22
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(success_body(json!("  Hi there.\n"))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(format!("{}/v1/", server.uri()).as_str());
    let completion = client
        .complete("rewrite this", 11)
        .await
        .expect("completion should succeed");

    assert_eq!(completion.adjusted_text, "Hi there.");
    assert_eq!(completion.model, "mistral-small-latest");
    assert_eq!(
        completion
            .usage
            .as_ref()
            .and_then(|usage| usage.get("total_tokens"))
            .and_then(serde_json::Value::as_u64),
        Some(19)
    );
}

#[rstest]
#[case::unauthorised(401, CompletionError::Authentication)]
#[case::rate_limited(429, CompletionError::RateLimited)]
#[case::server_error(500, CompletionError::UpstreamUnavailable { status: 500 })]
#[case::bad_gateway(502, CompletionError::UpstreamUnavailable { status: 502 })]
#[tokio::test]
async fn complete_maps_provider_statuses(#[case] status: u16, #[case] expected: CompletionError) {
    let server = MockServer::start().await;
    mount_status(&server, status, json!({ "message": "provider detail" })).await;

    let client = client_for(format!("{}/v1", server.uri()).as_str());
    let error = client
        .complete("rewrite this", 12)
        .await
        .expect_err("provider failure should surface");

    assert_eq!(error, expected);
}

#[tokio::test]
async fn complete_passes_unclassified_provider_message_through() {
    let server = MockServer::start().await;
    mount_status(&server, 422, json!({ "message": "max_tokens must be positive" })).await;

    let client = client_for(format!("{}/v1", server.uri()).as_str());
    let error = client
        .complete("rewrite this", 12)
        .await
        .expect_err("422 should surface");

    let CompletionError::Unknown { message } = error else {
        panic!("expected unknown error, got {error:?}");
    };
    assert!(message.contains("max_tokens must be positive"), "got {message}");
}

#[tokio::test]
async fn complete_reports_timeout_when_provider_is_slow() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(success_body(json!("late")))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let config = ChatCompletionConfig::new(
        format!("{}/v1", server.uri()),
        "mistral-small-latest",
        Some(API_KEY.to_owned()),
    )
    .with_timeouts(Duration::from_millis(50), Duration::from_millis(50));
    let client = ChatCompletionClient::new(config).expect("client should build");

    let error = client
        .complete("rewrite this", 12)
        .await
        .expect_err("slow provider should time out");

    assert_eq!(error, CompletionError::Timeout);
}

#[tokio::test]
async fn complete_reports_network_unavailable_when_connection_refused() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("port should bind");
        listener.local_addr().expect("address should resolve").port()
    };

    let client = client_for(format!("http://127.0.0.1:{port}/v1").as_str());
    let error = client
        .complete("rewrite this", 12)
        .await
        .expect_err("closed port should fail");

    assert!(
        matches!(error, CompletionError::NetworkUnavailable { .. }),
        "expected network error, got {error:?}"
    );
}

#[tokio::test]
async fn complete_reports_network_unavailable_when_host_does_not_resolve() {
    let client = client_for("http://toneshift-unresolvable.invalid/v1");

    let error = client
        .complete("rewrite this", 12)
        .await
        .expect_err("unresolvable host should fail");

    assert!(
        matches!(error, CompletionError::NetworkUnavailable { .. }),
        "expected network error, got {error:?}"
    );
}

#[tokio::test]
async fn key_check_uses_its_own_shorter_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(success_body(json!("slow but fine")))
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&server)
        .await;

    let config = ChatCompletionConfig::new(
        format!("{}/v1", server.uri()),
        "mistral-small-latest",
        Some(API_KEY.to_owned()),
    )
    .with_timeouts(Duration::from_secs(5), Duration::from_millis(50));
    let client = ChatCompletionClient::new(config).expect("client should build");

    assert!(
        !client.validate_api_key().await,
        "key check should give up after its own timeout"
    );
    let completion = client
        .complete("rewrite this", 12)
        .await
        .expect("rewrite should wait for the longer request timeout");
    assert_eq!(completion.adjusted_text, "slow but fine");
}

#[tokio::test]
async fn complete_rejects_response_without_assistant_text() {
    let server = MockServer::start().await;
    mount_status(&server, 200, success_body(json!("   "))).await;

    let client = client_for(format!("{}/v1", server.uri()).as_str());
    let error = client
        .complete("rewrite this", 12)
        .await
        .expect_err("blank content should be rejected");

    assert!(
        matches!(error, CompletionError::Unknown { .. }),
        "expected unknown error, got {error:?}"
    );
}

#[tokio::test]
async fn complete_requires_api_key() {
    let client = ChatCompletionClient::new(ChatCompletionConfig::default())
        .expect("client should build");

    let error = client
        .complete("rewrite this", 12)
        .await
        .expect_err("missing key should be rejected");

    assert!(
        matches!(error, CompletionError::Configuration { .. }),
        "expected configuration error, got {error:?}"
    );
}

#[tokio::test]
async fn validate_api_key_sends_minimal_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({
            "messages": [{ "role": "user", "content": "Test" }],
            "max_tokens": 5
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body(json!("ok"))))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(format!("{}/v1", server.uri()).as_str());

    assert!(client.validate_api_key().await);
}

#[rstest]
#[case(401)]
#[case(429)]
#[case(503)]
#[tokio::test]
async fn validate_api_key_returns_false_on_failure(#[case] status: u16) {
    let server = MockServer::start().await;
    mount_status(&server, status, json!({ "message": "nope" })).await;

    let client = client_for(format!("{}/v1", server.uri()).as_str());

    assert!(!client.validate_api_key().await);
}

#[tokio::test]
async fn validate_api_key_returns_false_without_key() {
    let client = ChatCompletionClient::new(ChatCompletionConfig::default())
        .expect("client should build");

    assert!(!client.validate_api_key().await);
}
