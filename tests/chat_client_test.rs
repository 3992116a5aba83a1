//! Integration tests for the chat-completion client against a mock server.

mod common;

use common::{completion_body, error_body};
use easycommit::llm::{ChatClient, ChatCompletion, ChatRequest, Provider};
use easycommit::LlmError;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, provider: Provider) -> ChatClient {
    ChatClient::with_base_url(provider, "sk-test", &server.uri()).expect("Failed to build client")
}

#[tokio::test]
async fn test_request_carries_bearer_key_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-4",
            "max_tokens": 300,
            "messages": [{ "role": "user", "content": "hello" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("1. ✨ feat: hi")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Provider::OpenAi);
    let completion = client
        .complete(&ChatRequest::user("gpt-4", "hello", 300))
        .await
        .unwrap();

    assert_eq!(completion.provider, Provider::OpenAi);
    assert_eq!(completion.into_text().unwrap(), "1. ✨ feat: hi");
}

#[tokio::test]
async fn test_payment_required_is_billing_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(402).set_body_json(error_body("Insufficient Balance")))
        .mount(&server)
        .await;

    let client = client_for(&server, Provider::Deepseek);
    let err = client
        .complete(&ChatRequest::user("deepseek-chat", "Test", 1))
        .await
        .unwrap_err();

    assert!(err.is_billing());
    match err {
        LlmError::Status {
            provider,
            status,
            message,
        } => {
            assert_eq!(provider, Provider::Deepseek);
            assert_eq!(status, 402);
            assert_eq!(message, "Insufficient Balance");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unauthorized_is_not_billing_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let client = client_for(&server, Provider::OpenAi);
    let err = client
        .complete(&ChatRequest::user("gpt-3.5-turbo", "Test", 1))
        .await
        .unwrap_err();

    assert!(!err.is_billing());
    assert!(err.to_string().contains("HTTP 401"));
    assert!(err.to_string().contains("Unauthorized"));
}

#[tokio::test]
async fn test_non_json_success_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy page</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server, Provider::OpenAi);
    let err = client
        .complete(&ChatRequest::user("gpt-4", "hello", 300))
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_missing_choices_yields_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let client = client_for(&server, Provider::OpenAi);
    let completion = client
        .complete(&ChatRequest::user("gpt-4", "hello", 300))
        .await
        .unwrap();

    assert_eq!(completion.content, None);
    assert!(matches!(
        completion.into_text(),
        Err(LlmError::MalformedResponse { .. })
    ));
}

#[tokio::test]
async fn test_null_content_yields_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "index": 0, "message": { "role": "assistant", "content": null } }]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, Provider::Deepseek);
    let completion = client
        .complete(&ChatRequest::user("deepseek-chat", "Test", 1))
        .await
        .unwrap();
    assert_eq!(completion.content, None);
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    // Port 1 is reserved and refuses connections.
    let client = ChatClient::with_base_url(Provider::OpenAi, "sk-test", "http://127.0.0.1:1")
        .expect("Failed to build client");
    let err = client
        .complete(&ChatRequest::user("gpt-4", "hello", 300))
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::Transport { .. }));
    assert_eq!(err.provider(), Provider::OpenAi);
}
