//! Checks exercised against an in-process mock of the Humansa server.

use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use futures::StreamExt;
use humansa_checks::{find_spec, Check, CheckContext, CheckSpec, HttpCheck, Inspection, Labels, Method};
use humansa_core::{CheckOutcome, ProbeConfig};
use serde_json::{json, Value};

async fn serve(router: Router) -> ProbeConfig {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    ProbeConfig::for_base_url(format!("http://{}", addr)).unwrap()
}

async fn run_builtin(config: &ProbeConfig, name: &str) -> CheckOutcome {
    let check = HttpCheck::new(find_spec(config, name).unwrap());
    let ctx = CheckContext::new(config.clone()).unwrap();
    check.run(&ctx).await.unwrap()
}

#[tokio::test]
async fn health_check_echoes_body() {
    let config = serve(Router::new().route("/health", get(|| async { "healthy" }))).await;
    let outcome = run_builtin(&config, "Health Check").await;
    assert!(outcome.passed);
    assert_eq!(outcome.message, "Health check passed");
    assert_eq!(outcome.detail.as_deref(), Some("Response: healthy"));
}

#[tokio::test]
async fn ping_500_fails_with_status() {
    let config = serve(Router::new().route(
        "/ping",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    ))
    .await;
    let outcome = run_builtin(&config, "Ping").await;
    assert!(!outcome.passed);
    assert_eq!(outcome.message, "Ping failed");
    assert_eq!(outcome.detail.as_deref(), Some("Status: 500"));
}

#[tokio::test]
async fn chat_completion_reports_content_length() {
    let content = "cold symptoms include...";
    let config = serve(Router::new().route(
        "/v1/chat/completions",
        post(move || async move { Json(json!({ "choices": [{ "message": { "content": content } }] })) }),
    ))
    .await;
    let outcome = run_builtin(&config, "Chat Completion").await;
    assert!(outcome.passed);
    assert_eq!(outcome.message, "Chat completion successful");
    assert_eq!(
        outcome.detail,
        Some(format!("Response length: {} chars", content.chars().count()))
    );
}

#[tokio::test]
async fn chat_completion_without_choices_is_unexpected_format() {
    let config = serve(Router::new().route(
        "/v1/chat/completions",
        post(|| async { Json(json!({ "error": "quota" })) }),
    ))
    .await;
    let outcome = run_builtin(&config, "Chat Completion").await;
    assert!(!outcome.passed);
    assert_eq!(outcome.message, "Unexpected response format");
    assert_eq!(outcome.detail.as_deref(), Some(r#"{"error":"quota"}"#));
}

#[tokio::test]
async fn chat_completion_sends_expected_payload() {
    let seen: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
    let captured = seen.clone();
    let config = serve(Router::new().route(
        "/v1/chat/completions",
        post(move |Json(body): Json<Value>| {
            let captured = captured.clone();
            async move {
                *captured.lock().unwrap() = Some(body);
                Json(json!({ "choices": [{ "message": { "content": "ok" } }] }))
            }
        }),
    ))
    .await;

    assert!(run_builtin(&config, "Chat Completion").await.passed);

    let body = seen.lock().unwrap().take().expect("request body captured");
    assert_eq!(body["model"], "gpt-4.1-nano");
    assert_eq!(body["stream"], false);
    assert_eq!(body["messages"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn streaming_counts_lines_across_chunks() {
    let config = serve(Router::new().route(
        "/v1/chat/completions",
        post(|| async {
            let chunks: Vec<Result<&'static str, io::Error>> = vec![
                Ok("data: {\"delta\":\"1\"}\n\ndata: {\"de"),
                Ok("lta\":\"2\"}\n\n"),
                Ok("data: [DONE]\n\n"),
            ];
            Body::from_stream(futures::stream::iter(chunks))
        }),
    ))
    .await;
    let outcome = run_builtin(&config, "Streaming Chat").await;
    assert!(outcome.passed);
    assert_eq!(outcome.message, "Streaming completed");
    assert_eq!(outcome.detail.as_deref(), Some("Received 3 chunks"));
    assert_eq!(outcome.milestones.len(), 1);
    assert_eq!(outcome.milestones[0].message, "Streaming started");
    assert_eq!(
        outcome.milestones[0].detail.as_deref(),
        Some("First chunk: data: {\"delta\":\"1\"}...")
    );
}

#[tokio::test]
async fn streaming_empty_body_fails() {
    let config = serve(Router::new().route("/v1/chat/completions", post(|| async { Body::empty() }))).await;
    let outcome = run_builtin(&config, "Streaming Chat").await;
    assert!(!outcome.passed);
    assert_eq!(outcome.message, "No streaming data received");
    assert!(outcome.milestones.is_empty());
}

#[tokio::test]
async fn streaming_fault_after_first_line_keeps_milestone() {
    let config = serve(Router::new().route(
        "/v1/chat/completions",
        post(|| async {
            let first = futures::stream::iter(vec![Ok::<_, io::Error>("data: one\n")]);
            let reset = futures::stream::once(async {
                tokio::time::sleep(Duration::from_millis(200)).await;
                Err::<&'static str, _>(io::Error::new(io::ErrorKind::ConnectionReset, "upstream reset"))
            });
            Body::from_stream(first.chain(reset))
        }),
    ))
    .await;
    let outcome = run_builtin(&config, "Streaming Chat").await;
    assert!(!outcome.passed);
    assert_eq!(outcome.message, "Streaming error");
    assert!(outcome.detail.is_some());
    assert_eq!(outcome.milestones.len(), 1);
    assert_eq!(outcome.milestones[0].message, "Streaming started");
    assert_eq!(outcome.milestones[0].detail.as_deref(), Some("First chunk: data: one..."));
}

#[tokio::test]
async fn streaming_rejected_status_is_reported_before_reading() {
    let config = serve(Router::new().route(
        "/v1/chat/completions",
        post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "data: busy\n") }),
    ))
    .await;
    let outcome = run_builtin(&config, "Streaming Chat").await;
    assert!(!outcome.passed);
    assert_eq!(outcome.message, "Streaming failed");
    assert_eq!(outcome.detail.as_deref(), Some("Status: 503"));
    assert!(outcome.milestones.is_empty());
}

#[tokio::test]
async fn appointment_search_tolerates_not_found() {
    let seen: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
    let captured = seen.clone();
    let config = serve(Router::new().route(
        "/v2/humansa/appointment/search",
        post(move |Json(body): Json<Value>| {
            let captured = captured.clone();
            async move {
                *captured.lock().unwrap() = Some(body);
                StatusCode::NOT_FOUND
            }
        }),
    ))
    .await;
    let outcome = run_builtin(&config, "Appointment Search").await;
    assert!(outcome.passed);
    assert_eq!(outcome.message, "Appointment search completed");
    assert_eq!(outcome.detail.as_deref(), Some("Status: 404"));

    let body = seen.lock().unwrap().take().expect("request body captured");
    assert_eq!(body["userId"], "test-user-001");
    assert_eq!(body["dateRange"]["start"], "2024-01-15");
}

#[tokio::test]
async fn appointment_search_rejects_other_statuses() {
    let config = serve(Router::new().route(
        "/v2/humansa/appointment/search",
        post(|| async { StatusCode::BAD_GATEWAY }),
    ))
    .await;
    let outcome = run_builtin(&config, "Appointment Search").await;
    assert!(!outcome.passed);
    assert_eq!(outcome.detail.as_deref(), Some("Status: 502"));
}

#[tokio::test]
async fn debug_info_lists_keys_in_server_order() {
    let config = serve(Router::new().route(
        "/debug/info",
        get(|| async { r#"{"version": "2.0", "build": "abc"}"# }),
    ))
    .await;
    let outcome = run_builtin(&config, "Debug Info").await;
    assert!(outcome.passed);
    assert_eq!(outcome.detail.as_deref(), Some(r#"Keys: ["version", "build"]"#));
}

#[tokio::test]
async fn memory_status_preview_keeps_server_order() {
    let config = serve(Router::new().route(
        "/v2/humansa/memory/status",
        get(|| async { r#"{"zeta": 1, "alpha": 2}"# }),
    ))
    .await;
    let outcome = run_builtin(&config, "Memory Status").await;
    assert!(outcome.passed);
    assert_eq!(outcome.detail.as_deref(), Some(r#"{"zeta":1,"alpha":2}"#));
}

#[tokio::test]
async fn multi_agent_with_non_json_body_is_an_error() {
    let config = serve(Router::new().route(
        "/v1/multi-agent/response",
        post(|| async { "<html>gateway</html>" }),
    ))
    .await;
    let outcome = run_builtin(&config, "Multi-Agent").await;
    assert!(!outcome.passed);
    assert_eq!(outcome.message, "Multi-agent error");
}

#[tokio::test]
async fn v2_chat_and_memory_status_accept_any_json() {
    let config = serve(
        Router::new()
            .route("/v2/humansa/chat", post(|| async { Json(json!(["reply"])) }))
            .route(
                "/v2/humansa/memory/status",
                get(|| async { Json(json!({ "status": "ok" })) }),
            ),
    )
    .await;

    let chat = run_builtin(&config, "Humansa V2 Chat").await;
    assert!(chat.passed);
    assert_eq!(chat.detail.as_deref(), Some("Response type: array"));

    let memory = run_builtin(&config, "Memory Status").await;
    assert!(memory.passed);
    assert_eq!(memory.detail.as_deref(), Some(r#"{"status":"ok"}"#));
}

#[tokio::test]
async fn connection_refused_is_a_contained_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ProbeConfig::for_base_url(format!("http://{}", addr)).unwrap();
    let outcome = run_builtin(&config, "Ping").await;
    assert!(!outcome.passed);
    assert_eq!(outcome.message, "Ping error");
    assert!(outcome.detail.is_some());
}

#[tokio::test]
async fn slow_endpoint_times_out() {
    let config = serve(Router::new().route(
        "/slow",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "late"
        }),
    ))
    .await;

    let check = HttpCheck::new(CheckSpec {
        name: "Slow",
        title: "Slow Endpoint",
        method: Method::Get,
        path: "/slow",
        body: None,
        timeout: Duration::from_millis(200),
        accepted: &[200],
        labels: Labels {
            ok: "Slow ok",
            failed: "Slow failed",
            error: "Slow error",
        },
        inspection: Inspection::EchoText,
    });
    let ctx = CheckContext::new(config).unwrap();
    let outcome = check.run(&ctx).await.unwrap();
    assert!(!outcome.passed);
    assert_eq!(outcome.message, "Slow error");
}
