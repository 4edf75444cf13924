// Copyright (c) 2025 Taleforge
// SPDX-License-Identifier: BUSL-1.1
//! Tests for POST /create-book

use std::sync::Arc;

use axum::http::StatusCode;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::json;
use taleforge_node::error::GenerationError;

use super::support::{
    post_json, raw_story_json, test_config, test_router, ScriptedImage, ScriptedText, PNG_BYTES,
};

fn mia_request() -> serde_json::Value {
    json!({"childName": "Mia", "age": 5, "storyTheme": "ocean adventure"})
}

#[tokio::test]
async fn test_create_book_returns_ten_numbered_pages() {
    let dir = tempfile::tempdir().unwrap();
    let text = Arc::new(ScriptedText::replying(raw_story_json(10)));
    let image = Arc::new(ScriptedImage::new(vec![]));
    let (router, _store) = test_router(text, image, test_config(dir.path().to_path_buf()));

    let (status, body) = post_json(&router, "/create-book", mia_request()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["title"], "Mia and the Sea");
    assert_eq!(body["illustrationStyle"], "Soft Storybook");

    let pages = body["pages"].as_array().unwrap();
    assert_eq!(pages.len(), 10);
    for (i, page) in pages.iter().enumerate() {
        assert_eq!(page["pageNumber"], (i + 1) as u64);
        assert!(!page["text"].as_str().unwrap().is_empty());
        assert!(!page["imagePrompt"].as_str().unwrap().is_empty());
        assert!(page["imageReference"].is_null());
    }
}

#[tokio::test]
async fn test_missing_mandatory_field_is_400_before_any_outbound_call() {
    for body in [
        json!({}),
        json!({"age": 5, "storyTheme": "ocean adventure"}),
        json!({"childName": "Mia", "storyTheme": "ocean adventure"}),
        json!({"childName": "Mia", "age": 5}),
    ] {
        let dir = tempfile::tempdir().unwrap();
        let text = Arc::new(ScriptedText::replying(raw_story_json(10)));
        let image = Arc::new(ScriptedImage::new(vec![]));
        let (router, _store) =
            test_router(text.clone(), image, test_config(dir.path().to_path_buf()));

        let (status, response) = post_json(&router, "/create-book", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["status"], "error");
        assert_eq!(response["code"], "invalid_input");
        assert_eq!(text.call_count(), 0);
    }
}

#[tokio::test]
async fn test_wrong_page_count_is_500_not_a_truncated_book() {
    let dir = tempfile::tempdir().unwrap();
    let text = Arc::new(ScriptedText::replying(raw_story_json(12)));
    let image = Arc::new(ScriptedImage::new(vec![]));
    let (router, _store) = test_router(text, image, test_config(dir.path().to_path_buf()));

    let (status, body) = post_json(&router, "/create-book", mia_request()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], "error");
    assert_eq!(body["code"], "upstream_malformed");
    assert!(body["message"].as_str().unwrap().contains("got 12"));
    assert!(body.get("pages").is_none());
}

#[tokio::test]
async fn test_throttled_provider_is_429() {
    let dir = tempfile::tempdir().unwrap();
    let text = Arc::new(ScriptedText::failing(GenerationError::UpstreamThrottled(
        "insufficient quota".into(),
    )));
    let image = Arc::new(ScriptedImage::new(vec![]));
    let (router, _store) = test_router(text, image, test_config(dir.path().to_path_buf()));

    let (status, body) = post_json(&router, "/create-book", mia_request()).await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["code"], "upstream_throttled");
    assert!(body["message"].as_str().unwrap().contains("quota"));
}

#[tokio::test]
async fn test_eager_illustrations_fill_page_references() {
    let dir = tempfile::tempdir().unwrap();
    let text = Arc::new(ScriptedText::replying(raw_story_json(10)));
    let image = Arc::new(ScriptedImage::inline_forever(STANDARD.encode(PNG_BYTES)));
    let mut config = test_config(dir.path().to_path_buf());
    config.eager_illustrations = true;
    let (router, _store) = test_router(text, image.clone(), config);

    let (status, body) = post_json(&router, "/create-book", mia_request()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(image.call_count(), 10);
    for page in body["pages"].as_array().unwrap() {
        let reference = page["imageReference"].as_str().unwrap();
        assert!(reference.starts_with("/generated/"));
    }
}

#[tokio::test]
async fn test_eager_illustration_failures_leave_pages_null_but_book_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let text = Arc::new(ScriptedText::replying(raw_story_json(10)));
    // Every illustration call fails; the book must still come back whole
    let image = Arc::new(ScriptedImage::new(vec![]));
    let mut config = test_config(dir.path().to_path_buf());
    config.eager_illustrations = true;
    let (router, _store) = test_router(text, image, config);

    let (status, body) = post_json(&router, "/create-book", mia_request()).await;

    assert_eq!(status, StatusCode::OK);
    let pages = body["pages"].as_array().unwrap();
    assert_eq!(pages.len(), 10);
    assert!(pages.iter().all(|p| p["imageReference"].is_null()));
}

#[tokio::test]
async fn test_explicit_character_description_skips_vision_call() {
    let dir = tempfile::tempdir().unwrap();
    let text = Arc::new(ScriptedText::replying(raw_story_json(10)));
    let image = Arc::new(ScriptedImage::new(vec![]));
    let (router, _store) =
        test_router(text.clone(), image, test_config(dir.path().to_path_buf()));

    let mut body = mia_request();
    body["characterDescription"] = json!("curly red hair and green eyes");
    let (status, _) = post_json(&router, "/create-book", body).await;

    assert_eq!(status, StatusCode::OK);
    // One call total: the story itself; the description was not re-derived
    assert_eq!(text.call_count(), 1);
    let requests = text.requests.lock().unwrap();
    assert!(requests[0].user.contains("curly red hair and green eyes"));
}

#[tokio::test]
async fn test_photo_derives_description_before_story() {
    let dir = tempfile::tempdir().unwrap();
    let text = Arc::new(ScriptedText::new(vec![
        Ok("freckles and a bright smile".to_string()),
        Ok(raw_story_json(10)),
    ]));
    let image = Arc::new(ScriptedImage::new(vec![]));
    let (router, _store) =
        test_router(text.clone(), image, test_config(dir.path().to_path_buf()));

    let mut body = mia_request();
    body["childPhoto"] = json!("AAAA");
    let (status, _) = post_json(&router, "/create-book", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(text.call_count(), 2);
    let requests = text.requests.lock().unwrap();
    assert_eq!(requests[0].attachment.as_deref(), Some("AAAA"));
    assert!(requests[1].user.contains("freckles and a bright smile"));
}
