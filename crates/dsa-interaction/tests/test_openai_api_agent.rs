use dsa_core::{DsaError, ModelConnector};
use dsa_infrastructure::AppConfig;
use dsa_interaction::OpenAiConnector;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn connector(server: &MockServer) -> OpenAiConnector {
    OpenAiConnector::new(Some("sk-test".to_string()))
        .with_model("gpt-4")
        .with_base_url(server.uri())
}

#[tokio::test]
async fn test_complete_returns_first_choice() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-4",
            "temperature": 0.2,
            "messages": [{ "role": "user", "content": "Is this right?" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                { "message": { "role": "assistant", "content": "OK" } },
                { "message": { "role": "assistant", "content": "Not OK" } }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = connector(&server).connect().unwrap();
    let response = client.complete("Is this right?").await.unwrap();

    assert_eq!(response.raw_text, "OK");
}

#[tokio::test]
async fn test_configured_connector_sends_fixed_low_temperature() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({ "model": "gpt-4o", "temperature": 0.2 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "OK" } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = AppConfig {
        api_key: Some("sk-test".to_string()),
        model: "gpt-4o".to_string(),
        base_url: server.uri(),
        ..AppConfig::default()
    };
    let client = OpenAiConnector::from_config(&config).connect().unwrap();

    assert_eq!(client.complete("prompt").await.unwrap().raw_text, "OK");
}

#[tokio::test]
async fn test_zero_choices_is_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let client = connector(&server).connect().unwrap();
    let err = client.complete("prompt").await.unwrap_err();

    assert_eq!(err, DsaError::EmptyResponse);
}

#[tokio::test]
async fn test_api_error_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "message": "Incorrect API key provided", "type": "invalid_request_error" }
        })))
        .mount(&server)
        .await;

    let client = connector(&server).connect().unwrap();
    let err = client.complete("prompt").await.unwrap_err();

    assert!(err.is_transport());
    assert!(err.to_string().contains("Incorrect API key provided"));
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "choices": [{ "message": { "content": "OK" } }] }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = connector(&server)
        .with_timeout(Duration::from_millis(200))
        .connect()
        .unwrap();
    let err = client.complete("prompt").await.unwrap_err();

    assert!(err.is_transport());
}

#[tokio::test]
async fn test_missing_key_never_reaches_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = OpenAiConnector::new(None)
        .with_base_url(server.uri())
        .connect()
        .err()
        .unwrap();

    assert!(err.is_connection());
}
