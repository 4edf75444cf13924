// Copyright (c) 2025 Taleforge
// SPDX-License-Identifier: BUSL-1.1
//! Tests for POST /generate-character

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;
use taleforge_node::error::GenerationError;

use super::support::{post_json, test_config, test_router, ScriptedImage, ScriptedText};

#[tokio::test]
async fn test_photo_yields_description() {
    let dir = tempfile::tempdir().unwrap();
    let text = Arc::new(ScriptedText::replying("short brown hair, hazel eyes"));
    let image = Arc::new(ScriptedImage::new(vec![]));
    let (router, _store) = test_router(text, image, test_config(dir.path().to_path_buf()));

    let (status, body) =
        post_json(&router, "/generate-character", json!({"childPhoto": "AAAA"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["characterDescription"], "short brown hair, hazel eyes");
}

#[tokio::test]
async fn test_missing_photo_is_400_without_outbound_call() {
    let dir = tempfile::tempdir().unwrap();
    let text = Arc::new(ScriptedText::replying("unused"));
    let image = Arc::new(ScriptedImage::new(vec![]));
    let (router, _store) =
        test_router(text.clone(), image, test_config(dir.path().to_path_buf()));

    let (status, body) = post_json(&router, "/generate-character", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_input");
    assert!(body["message"].as_str().unwrap().contains("childPhoto"));
    assert_eq!(text.call_count(), 0);
}

#[tokio::test]
async fn test_throttled_provider_is_429() {
    let dir = tempfile::tempdir().unwrap();
    let text = Arc::new(ScriptedText::failing(GenerationError::UpstreamThrottled(
        "quota".into(),
    )));
    let image = Arc::new(ScriptedImage::new(vec![]));
    let (router, _store) = test_router(text, image, test_config(dir.path().to_path_buf()));

    let (status, body) =
        post_json(&router, "/generate-character", json!({"childPhoto": "AAAA"})).await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["code"], "upstream_throttled");
}

#[tokio::test]
async fn test_empty_vision_result_falls_back_to_generic_description() {
    let dir = tempfile::tempdir().unwrap();
    let text = Arc::new(ScriptedText::replying("   "));
    let image = Arc::new(ScriptedImage::new(vec![]));
    let (router, _store) = test_router(text, image, test_config(dir.path().to_path_buf()));

    let (status, body) =
        post_json(&router, "/generate-character", json!({"childPhoto": "AAAA"})).await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body["characterDescription"]
        .as_str()
        .unwrap()
        .trim()
        .is_empty());
}
