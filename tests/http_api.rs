//! HTTP API integration tests.
//!
//! Drive the real router with `tower::ServiceExt::oneshot` and point the
//! extractor at a local mock of the messages API, so the full
//! request → content blocks → API call → sanitise → envelope path runs
//! without a credential or network access.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use creditsift::{build_router, AppState, ExtractionConfig, DEFAULT_MAX_BODY_BYTES, SCHEMA_VERSION};
use http_body_util::BodyExt;
use mockito::{Matcher, Server};
use serde_json::{json, Value};
use tower::ServiceExt;

// ── Test helpers ─────────────────────────────────────────────────────────

/// Router wired to the given messages-API endpoint.
fn app(base_url: &str, api_key: Option<&str>) -> axum::Router {
    let config = ExtractionConfig {
        base_url: base_url.to_string(),
        api_key: api_key.map(String::from),
        ..ExtractionConfig::default()
    };
    let state = AppState::new(&config).expect("state must build");
    build_router(state, DEFAULT_MAX_BODY_BYTES)
}

fn post_extraction(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or_else(|e| {
        panic!("response body must be JSON: {e}");
    })
}

/// A successful messages-API reply whose single text block is `text`.
fn model_reply(text: &str) -> String {
    json!({
        "id": "msg_test",
        "type": "message",
        "content": [{ "type": "text", "text": text }],
        "model": "claude-sonnet-4-20250514",
        "stop_reason": "end_turn",
        "usage": { "input_tokens": 900, "output_tokens": 180 }
    })
    .to_string()
}

// ── Input validation (no upstream call may happen) ───────────────────────

#[tokio::test]
async fn missing_file_data_returns_400_without_calling_upstream() {
    let mut server = Server::new_async().await;
    let upstream = server
        .mock("POST", "/v1/messages")
        .expect(0)
        .create_async()
        .await;

    let response = app(&server.url(), Some("test-key"))
        .oneshot(post_extraction(&json!({ "fileType": "text" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("fileData is required"));
    assert!(body.get("fallback").is_none(), "400 must not carry fallback");

    upstream.assert_async().await;
}

#[tokio::test]
async fn empty_file_data_returns_400() {
    let mut server = Server::new_async().await;
    let upstream = server
        .mock("POST", "/v1/messages")
        .expect(0)
        .create_async()
        .await;

    let response = app(&server.url(), Some("test-key"))
        .oneshot(post_extraction(
            &json!({ "fileData": "", "fileType": "pdf" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("fileData is required"));

    upstream.assert_async().await;
}

#[tokio::test]
async fn malformed_body_returns_400() {
    let server = Server::new_async().await;

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app(&server.url(), Some("test-key"))
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));
}

#[tokio::test]
async fn missing_file_type_returns_400_naming_the_field() {
    let server = Server::new_async().await;

    let response = app(&server.url(), Some("test-key"))
        .oneshot(post_extraction(&json!({ "fileData": "some notes" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(
        body["error"].as_str().unwrap().contains("fileType"),
        "error should name the missing field: {}",
        body["error"]
    );
}

// ── Method and path routing ──────────────────────────────────────────────

#[tokio::test]
async fn non_post_methods_return_405_json_without_body_processing() {
    let mut server = Server::new_async().await;
    let upstream = server
        .mock("POST", "/v1/messages")
        .expect(0)
        .create_async()
        .await;

    let router = app(&server.url(), Some("test-key"));

    for method in ["GET", "PUT", "DELETE", "PATCH"] {
        let request = Request::builder()
            .method(method)
            .uri("/")
            .body(Body::empty())
            .unwrap();
        let response = router.clone().oneshot(request).await.unwrap();

        assert_eq!(
            response.status(),
            StatusCode::METHOD_NOT_ALLOWED,
            "{method} / must be 405"
        );
        let body = body_json(response).await;
        assert_eq!(body["error"], json!("Method not allowed. Use POST."));
        assert!(body.get("fallback").is_none(), "405 must not carry fallback");
    }

    upstream.assert_async().await;
}

#[tokio::test]
async fn unknown_path_returns_404_json() {
    let server = Server::new_async().await;

    let request = Request::builder()
        .uri("/nope")
        .body(Body::empty())
        .unwrap();
    let response = app(&server.url(), Some("test-key"))
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("Not found"));
}

// ── Happy path ───────────────────────────────────────────────────────────

#[tokio::test]
async fn fenced_reply_is_stripped_and_relayed_verbatim() {
    let metadata = json!({
        "artist": { "name": "Rhea Volt", "akaNames": [], "members": [],
                    "location": "Brussels, Belgium", "notes": null },
        "releases": [{
            "title": "Summer EP", "type": "EP", "year": 2024,
            "label": "Nightjar Records", "catalogNumber": null,
            "tracks": [], "notes": null
        }],
        "rights": { "masterOwnership": "OWNS", "publishingOwnership": "UNKNOWN",
                    "samples": "UNKNOWN", "distributors": [], "publishers": [],
                    "proAffiliation": null, "notes": null },
        "clarificationsNeeded": [],
        "parsingErrors": []
    });

    let mut server = Server::new_async().await;
    let upstream = server
        .mock("POST", "/v1/messages")
        .match_header("x-api-key", "test-key")
        .match_header("anthropic-version", "2023-06-01")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(model_reply(&format!("```json\n{metadata}\n```")))
        .create_async()
        .await;

    let response = app(&server.url(), Some("test-key"))
        .oneshot(post_extraction(&json!({
            "fileData": "Rhea Volt released Summer EP in 2024 on Nightjar Records.",
            "fileType": "text"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["schemaVersion"], json!(SCHEMA_VERSION));
    assert_eq!(body["metadata"], metadata, "metadata must be relayed verbatim");
    assert_eq!(
        body.as_object().unwrap().len(),
        3,
        "envelope is exactly success + schemaVersion + metadata"
    );

    upstream.assert_async().await;
}

#[tokio::test]
async fn text_submissions_carry_document_and_instruction() {
    let mut server = Server::new_async().await;
    let upstream = server
        .mock("POST", "/v1/messages")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex("Split sheet for Heat Index".into()),
            Matcher::Regex("music-industry metadata analyst".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(model_reply("{}"))
        .create_async()
        .await;

    let response = app(&server.url(), Some("test-key"))
        .oneshot(post_extraction(&json!({
            "fileData": "Split sheet for Heat Index: R. Volt 50%, M. Okafor 50%.",
            "fileType": "text"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    upstream.assert_async().await;
}

// ── Media types on the upstream request ──────────────────────────────────

#[tokio::test]
async fn png_file_name_is_sent_as_image_png() {
    let mut server = Server::new_async().await;
    let upstream = server
        .mock("POST", "/v1/messages")
        .match_body(Matcher::Regex(r#""media_type":"image/png""#.into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(model_reply("{}"))
        .create_async()
        .await;

    let response = app(&server.url(), Some("test-key"))
        .oneshot(post_extraction(&json!({
            "fileData": "aGVsbG8=",
            "fileType": "image",
            "fileName": "art.png"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    upstream.assert_async().await;
}

#[tokio::test]
async fn other_images_are_sent_as_image_jpeg() {
    let mut server = Server::new_async().await;
    let upstream = server
        .mock("POST", "/v1/messages")
        .match_body(Matcher::Regex(r#""media_type":"image/jpeg""#.into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(model_reply("{}"))
        .expect(2)
        .create_async()
        .await;

    let router = app(&server.url(), Some("test-key"));

    for body in [
        json!({ "fileData": "aGVsbG8=", "fileType": "image", "fileName": "liner.jpg" }),
        json!({ "fileData": "aGVsbG8=", "fileType": "image" }),
    ] {
        let response = router
            .clone()
            .oneshot(post_extraction(&body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    upstream.assert_async().await;
}

#[tokio::test]
async fn pdfs_are_sent_as_application_pdf_documents() {
    let mut server = Server::new_async().await;
    let upstream = server
        .mock("POST", "/v1/messages")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#""type":"document""#.into()),
            Matcher::Regex(r#""media_type":"application/pdf""#.into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(model_reply("{}"))
        .create_async()
        .await;

    let response = app(&server.url(), Some("test-key"))
        .oneshot(post_extraction(&json!({
            "fileData": "JVBERi0xLjQ=",
            "fileType": "pdf",
            "fileName": "weird-name.png"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    upstream.assert_async().await;
}

// ── Failure paths (every 500 carries fallback: true) ─────────────────────

#[tokio::test]
async fn unparsable_reply_returns_500_fallback_and_hides_the_raw_text() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/v1/messages")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(model_reply(
            "I could not find any XMARKERX metadata in this document.",
        ))
        .create_async()
        .await;

    let response = app(&server.url(), Some("test-key"))
        .oneshot(post_extraction(
            &json!({ "fileData": "gibberish", "fileType": "text" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("Model returned an unexpected format"));
    assert_eq!(body["fallback"], json!(true));
    assert!(
        !body.to_string().contains("XMARKERX"),
        "raw model reply must never reach the caller"
    );
}

#[tokio::test]
async fn missing_api_key_returns_500_fallback_without_calling_upstream() {
    let mut server = Server::new_async().await;
    let upstream = server
        .mock("POST", "/v1/messages")
        .expect(0)
        .create_async()
        .await;

    let response = app(&server.url(), None)
        .oneshot(post_extraction(
            &json!({ "fileData": "notes", "fileType": "text" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("Extraction service is not configured"));
    assert_eq!(body["fallback"], json!(true));

    upstream.assert_async().await;
}

#[tokio::test]
async fn upstream_error_returns_500_fallback_and_hides_the_upstream_body() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/v1/messages")
        .with_status(529)
        .with_body(r#"{"type":"error","error":{"type":"overloaded_error","message":"XSECRETX"}}"#)
        .create_async()
        .await;

    let response = app(&server.url(), Some("test-key"))
        .oneshot(post_extraction(
            &json!({ "fileData": "notes", "fileType": "text" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("Metadata extraction failed"));
    assert_eq!(body["fallback"], json!(true));
    assert!(
        !body.to_string().contains("XSECRETX"),
        "upstream error body must never reach the caller"
    );
}

#[tokio::test]
async fn upstream_is_called_exactly_once_per_request() {
    let mut server = Server::new_async().await;
    let upstream = server
        .mock("POST", "/v1/messages")
        .with_status(503)
        .with_body("service unavailable")
        .expect(1)
        .create_async()
        .await;

    let response = app(&server.url(), Some("test-key"))
        .oneshot(post_extraction(
            &json!({ "fileData": "notes", "fileType": "text" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    // expect(1) fails the assert below if the service retried.
    upstream.assert_async().await;
}

// ── Body limit ───────────────────────────────────────────────────────────

#[tokio::test]
async fn oversized_bodies_are_rejected() {
    let server = Server::new_async().await;

    let config = ExtractionConfig {
        base_url: server.url(),
        api_key: Some("test-key".into()),
        ..ExtractionConfig::default()
    };
    let state = AppState::new(&config).unwrap();
    let router = build_router(state, 256);

    let big = "x".repeat(1024);
    let response = router
        .oneshot(post_extraction(
            &json!({ "fileData": big, "fileType": "text" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));
}

// ── Health ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn health_reports_ok_without_touching_the_model_api() {
    let mut server = Server::new_async().await;
    let upstream = server
        .mock("POST", "/v1/messages")
        .expect(0)
        .create_async()
        .await;

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app(&server.url(), None)
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], json!("ok"));
    assert_eq!(body["service"], json!("creditsift"));
    assert!(body["uptime_seconds"].is_u64());
    assert!(body["model"].is_string());

    upstream.assert_async().await;
}
