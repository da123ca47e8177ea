use axum::{Json, Router, http::HeaderMap, http::StatusCode, routing::post};
use codegen_relay::config::AppConfig;
use codegen_relay::services::llm_client::{ChatCompletionClient, CodeGenerator, LlmError, SYSTEM_PROMPT};
use serde_json::{Value, json};
use std::time::Duration;

async fn mock_completions(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let authorized = headers
        .get("authorization")
        .is_some_and(|v| v == "Bearer test-key");
    if !authorized {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "bad key" })));
    }

    let prompt = body["messages"][1]["content"].as_str().unwrap_or_default();
    let content = match prompt {
        "empty" => return (StatusCode::OK, Json(json!({ "choices": [] }))),
        "fail" => return (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "error": "overloaded" }))),
        "echo" => body.to_string(),
        _ => format!("```python\n# {prompt}\n```"),
    };

    (
        StatusCode::OK,
        Json(json!({
            "choices": [{ "index": 0, "message": { "role": "assistant", "content": content } }]
        })),
    )
}

async fn spawn_mock_server() -> String {
    let app = Router::new().route("/openai/v1/chat/completions", post(mock_completions));
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}/openai/v1", addr)
}

fn config(base_url: &str, api_key: &str) -> AppConfig {
    AppConfig {
        api_key: api_key.to_string(),
        model: "llama3-70b-8192".to_string(),
        base_url: base_url.to_string(),
        temperature: 0.3,
        timeout: Duration::from_secs(5),
        host: "127.0.0.1".to_string(),
        port: 0,
    }
}

#[tokio::test]
async fn test_generate_returns_first_choice_content() {
    let base_url = spawn_mock_server().await;
    let client = ChatCompletionClient::new(&config(&base_url, "test-key")).unwrap();
    assert_eq!(client.endpoint(), format!("{base_url}/chat/completions"));

    let reply = client.generate("hello").await.unwrap();
    assert_eq!(reply, "```python\n# hello\n```");
}

#[tokio::test]
async fn test_request_carries_model_and_messages() {
    let base_url = spawn_mock_server().await;
    let client = ChatCompletionClient::new(&config(&base_url, "test-key")).unwrap();

    let echoed: Value = serde_json::from_str(&client.generate("echo").await.unwrap()).unwrap();
    assert_eq!(echoed["model"], "llama3-70b-8192");
    assert!((echoed["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
    assert_eq!(echoed["messages"][0]["role"], "system");
    assert_eq!(echoed["messages"][0]["content"], SYSTEM_PROMPT);
    assert_eq!(echoed["messages"][1]["role"], "user");
    assert_eq!(echoed["messages"][1]["content"], "echo");
}

#[tokio::test]
async fn test_non_success_status_is_an_error() {
    let base_url = spawn_mock_server().await;
    let client = ChatCompletionClient::new(&config(&base_url, "wrong-key")).unwrap();

    match client.generate("hello").await {
        Err(LlmError::Status { status, body }) => {
            assert_eq!(status.as_u16(), 401);
            assert!(body.contains("bad key"));
        }
        other => panic!("expected status error, got {other:?}"),
    }

    let client = ChatCompletionClient::new(&config(&base_url, "test-key")).unwrap();
    let err = client.generate("fail").await.unwrap_err();
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn test_empty_choices_is_an_error() {
    let base_url = spawn_mock_server().await;
    let client = ChatCompletionClient::new(&config(&base_url, "test-key")).unwrap();

    let err = client.generate("empty").await.unwrap_err();
    assert!(matches!(err, LlmError::EmptyReply));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_error() {
    let client = ChatCompletionClient::new(&config("http://127.0.0.1:1/v1", "test-key")).unwrap();

    let err = client.generate("hello").await.unwrap_err();
    assert!(matches!(err, LlmError::Transport(_)));
}
