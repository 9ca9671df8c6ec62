//! Verification API integration tests.
//!
//! Run with: `cargo test -p vidsign-api --test verify_video_test`

mod helpers;

use axum_test::multipart::MultipartForm;
use helpers::fixtures::{fake_mp4, video_part};
use helpers::{api_path, setup_test_app, StubBehavior};

fn verify_form(filename: &str) -> MultipartForm {
    MultipartForm::new().add_part("video", video_part(fake_mp4(4096), filename))
}

#[tokio::test]
async fn test_verify_signed_video() {
    let app = setup_test_app(StubBehavior::Succeed).await;

    let response = app
        .client()
        .post(&api_path("/verify-video"))
        .multipart(verify_form("signed.mp4"))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["valid"], true);
    assert_eq!(body["report"]["active_manifest"], "urn:uuid:stub");

    // The uploaded copy is removed once the report is read
    let inputs = app.signer.inputs_seen();
    assert_eq!(inputs.len(), 1);
    assert!(!inputs[0].exists());
    app.assert_storage_empty();
}

#[tokio::test]
async fn test_verify_unsigned_video_is_not_an_error() {
    let app = setup_test_app(StubBehavior::Timeout).await;

    let response = app
        .client()
        .post(&api_path("/verify-video"))
        .multipart(verify_form("plain.mov"))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["valid"], false);
    app.assert_storage_empty();
}

#[tokio::test]
async fn test_verify_rejects_unsupported_extension() {
    let app = setup_test_app(StubBehavior::Succeed).await;

    let response = app
        .client()
        .post(&api_path("/verify-video"))
        .multipart(verify_form("clip.webm"))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "UNSUPPORTED_FILE_TYPE");
    assert_eq!(app.signer.calls(), 0);
}
