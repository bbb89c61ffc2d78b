//! Layout Suggestion Client Tests
//!
//! Runs the inference client against a mock `generateContent` endpoint:
//! - Successful responses become validated shapes
//! - Error statuses, empty and malformed responses are reported
//! - The `suggest` command turns a screenshot into a document or code

use craft_cli::cli::SuggestArgs;
use craft_cli::commands;
use craft_cli::{GeminiSuggester, LayoutImage, LayoutSuggester, SuggestError};
use craft_codegen::{Dialect, BLOCK_MARKER};
use craft_core::{ElementKind, LayoutDocument};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR\0\0\0\x01\0\0\0\x01";
const MODEL_PATH: &str = "/v1beta/models/test-model:generateContent";

/// Client pointed at the mock server.
fn suggester(server: &MockServer) -> GeminiSuggester {
    GeminiSuggester::new("test-key", format!("{}/v1beta", server.uri()), "test-model")
        .expect("client")
}

/// A `generateContent` response whose text part is `text`.
fn candidate(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

async fn mount(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

fn image() -> LayoutImage {
    LayoutImage::from_bytes(PNG.to_vec()).expect("png")
}

// ============================================================================
// Client
// ============================================================================

#[tokio::test]
#[cfg_attr(
    target_os = "macos",
    ignore = "wiremock/reqwest system-configuration issue on macOS"
)]
async fn suggest_parses_shapes() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_json(candidate(
            r#"[{"type":"circle","x":20,"y":20,"width":48,"height":48},
                {"type":"text","x":88.4,"y":25,"width":200,"height":18}]"#,
        )),
    )
    .await;

    let shapes = suggester(&server).suggest(&image()).await.expect("shapes");
    assert_eq!(shapes.len(), 2);
    assert_eq!(shapes[0].kind, ElementKind::Circle);
    assert_eq!(shapes[1].rect().x, 88);
}

#[tokio::test]
#[cfg_attr(
    target_os = "macos",
    ignore = "wiremock/reqwest system-configuration issue on macOS"
)]
async fn suggest_reports_error_status() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(403).set_body_string("API key invalid")).await;

    let err = suggester(&server).suggest(&image()).await.unwrap_err();
    match err {
        SuggestError::Status { status, body } => {
            assert_eq!(status, 403);
            assert_eq!(body, "API key invalid");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
#[cfg_attr(
    target_os = "macos",
    ignore = "wiremock/reqwest system-configuration issue on macOS"
)]
async fn suggest_rejects_malformed_layout() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_json(candidate(r#"{"type":"rect"}"#)),
    )
    .await;

    let err = suggester(&server).suggest(&image()).await.unwrap_err();
    assert!(matches!(err, SuggestError::InvalidLayout(_)), "{err}");
}

#[tokio::test]
#[cfg_attr(
    target_os = "macos",
    ignore = "wiremock/reqwest system-configuration issue on macOS"
)]
async fn suggest_reports_empty_response() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })),
    )
    .await;

    let err = suggester(&server).suggest(&image()).await.unwrap_err();
    assert!(matches!(err, SuggestError::EmptyResponse), "{err}");
}

// ============================================================================
// Command
// ============================================================================

fn args(image: std::path::PathBuf, format: Option<Dialect>) -> SuggestArgs {
    SuggestArgs {
        image,
        format,
        output: None,
        api_key: "test-key".to_string(),
        endpoint: String::new(),
        model: "test-model".to_string(),
        component_name: "Suggested".to_string(),
    }
}

#[tokio::test]
#[cfg_attr(
    target_os = "macos",
    ignore = "wiremock/reqwest system-configuration issue on macOS"
)]
async fn suggest_command_outputs_document_or_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate(
            r#"[{"type":"rect","x":0,"y":0,"width":100,"height":40},
                {"type":"rect","x":0,"y":60,"width":300,"height":16}]"#,
        )))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let shot = dir.path().join("shot.png");
    std::fs::write(&shot, PNG).expect("write image");
    let client = suggester(&server);

    let json = commands::suggest(&client, &args(shot.clone(), None))
        .await
        .expect("document");
    let document = LayoutDocument::from_json(&json).expect("valid document");
    assert_eq!(document.elements.len(), 2);
    assert_eq!(document.elements[1].z_index, 2);

    let code = commands::suggest(&client, &args(shot, Some(Dialect::React)))
        .await
        .expect("code");
    assert!(code.contains("const Suggested = () => ("));
    assert_eq!(code.matches(BLOCK_MARKER).count(), 2);
}

#[tokio::test]
async fn suggest_command_rejects_unsupported_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let gif = dir.path().join("shot.gif");
    std::fs::write(&gif, b"GIF89a").expect("write image");
    let client = GeminiSuggester::new("k", "http://127.0.0.1:9", "m").expect("client");

    let err = commands::suggest(&client, &args(gif, None)).await.unwrap_err();
    assert!(err.to_string().contains("unsupported image format"), "{err}");
}
