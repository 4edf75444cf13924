// Copyright (c) 2025 Taleforge
// SPDX-License-Identifier: BUSL-1.1
//! Illustration generation and per-book fan-out tests

use std::sync::atomic::Ordering;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use taleforge_node::config::ImageReturnMode;
use taleforge_node::error::GenerationError;
use taleforge_node::illustration::{generate_illustration, illustrate_book, ImageStore};
use taleforge_node::models::{Book, BookPage, ImageReference};
use taleforge_node::provider::ImagePayload;

use super::support::{ScriptedImage, PNG_BYTES};

fn test_store() -> (ImageStore, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let store = ImageStore::new(dir.path()).unwrap();
    (store, dir)
}

#[tokio::test]
async fn test_url_payload_is_downloaded_and_persisted() {
    let (store, _dir) = test_store();
    let provider = ScriptedImage::new(vec![Ok(ImagePayload::Url(
        "https://cdn.example/img.png".to_string(),
    ))]);

    let reference = generate_illustration(
        &provider,
        &store,
        ImageReturnMode::Stored,
        "1024x1024",
        "a whale waving",
        "Soft Storybook",
        None,
    )
    .await
    .unwrap();

    // The caller sees a relative path under this node, never the upstream URL
    let path = match &reference {
        ImageReference::Stored(path) => path.clone(),
        other => panic!("expected stored reference, got {:?}", other),
    };
    assert!(path.starts_with("/generated/"));
    assert!(!path.contains("cdn.example"));

    let file_name = path.strip_prefix("/generated/").unwrap();
    let written = tokio::fs::read(store.resolve(file_name).unwrap())
        .await
        .unwrap();
    assert_eq!(written, PNG_BYTES);
}

#[tokio::test]
async fn test_inline_payload_is_decoded_and_persisted() {
    let (store, _dir) = test_store();
    let b64 = STANDARD.encode(PNG_BYTES);
    let provider = ScriptedImage::new(vec![Ok(ImagePayload::Inline(b64))]);

    let reference = generate_illustration(
        &provider,
        &store,
        ImageReturnMode::Stored,
        "1024x1024",
        "a whale waving",
        "Soft Storybook",
        None,
    )
    .await
    .unwrap();

    let path = reference.into_api_string();
    let file_name = path.strip_prefix("/generated/").unwrap();
    let written = tokio::fs::read(store.resolve(file_name).unwrap())
        .await
        .unwrap();
    assert_eq!(written, PNG_BYTES);
}

#[tokio::test]
async fn test_inline_mode_returns_data_url_without_persisting() {
    let (store, dir) = test_store();
    let b64 = STANDARD.encode(PNG_BYTES);
    let provider = ScriptedImage::new(vec![Ok(ImagePayload::Inline(b64.clone()))]);

    let reference = generate_illustration(
        &provider,
        &store,
        ImageReturnMode::Inline,
        "1024x1024",
        "a whale waving",
        "Soft Storybook",
        None,
    )
    .await
    .unwrap();

    assert_eq!(
        reference.as_str(),
        format!("data:image/png;base64,{}", b64)
    );
    let stored_files = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(stored_files, 0);
}

#[tokio::test]
async fn test_empty_prompt_rejected_before_outbound_call() {
    let (store, _dir) = test_store();
    let provider = ScriptedImage::inline_forever("AAAA");

    let err = generate_illustration(
        &provider,
        &store,
        ImageReturnMode::Stored,
        "1024x1024",
        "   ",
        "Soft Storybook",
        None,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, GenerationError::InvalidInput(_)));
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_download_failure_is_a_persistence_failure() {
    let (store, _dir) = test_store();
    let mut provider = ScriptedImage::new(vec![Ok(ImagePayload::Url(
        "https://cdn.example/img.png".to_string(),
    ))]);
    provider.download_bytes = None;

    let err = generate_illustration(
        &provider,
        &store,
        ImageReturnMode::Stored,
        "1024x1024",
        "a whale waving",
        "Soft Storybook",
        None,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, GenerationError::PersistenceFailure(_)));
}

#[tokio::test]
async fn test_invalid_base64_payload_is_malformed() {
    let (store, _dir) = test_store();
    let provider = ScriptedImage::new(vec![Ok(ImagePayload::Inline("not base64!!!".to_string()))]);

    let err = generate_illustration(
        &provider,
        &store,
        ImageReturnMode::Stored,
        "1024x1024",
        "a whale waving",
        "Soft Storybook",
        None,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, GenerationError::UpstreamMalformed(_)));
}

fn ten_page_book() -> Book {
    Book {
        title: "Mia and the Sea".to_string(),
        subtitle: "An ocean tale".to_string(),
        illustration_style: "Soft Storybook".to_string(),
        pages: (1..=10)
            .map(|n| BookPage {
                page_number: n,
                text: format!("Page {} of the adventure.", n),
                image_prompt: format!("scene {}", n),
                image_reference: None,
            })
            .collect(),
    }
}

#[tokio::test]
async fn test_illustrate_book_fills_every_page() {
    let (store, _dir) = test_store();
    let b64 = STANDARD.encode(PNG_BYTES);
    let provider = ScriptedImage::inline_forever(b64);
    let mut book = ten_page_book();

    illustrate_book(
        &provider,
        &store,
        ImageReturnMode::Stored,
        "1024x1024",
        &mut book,
        None,
        2,
    )
    .await;

    assert_eq!(provider.call_count(), 10);
    for page in &book.pages {
        let reference = page.image_reference.as_deref().unwrap();
        assert!(reference.starts_with("/generated/"));
    }
}

#[tokio::test]
async fn test_illustrate_book_tolerates_page_failures() {
    let (store, _dir) = test_store();
    let b64 = STANDARD.encode(PNG_BYTES);
    let mut payloads: Vec<Result<ImagePayload, GenerationError>> = (0..10)
        .map(|_| Ok(ImagePayload::Inline(b64.clone())))
        .collect();
    payloads[3] = Err(GenerationError::UpstreamUnavailable("flaky".into()));
    let provider = ScriptedImage::new(payloads);
    let mut book = ten_page_book();

    illustrate_book(
        &provider,
        &store,
        ImageReturnMode::Stored,
        "1024x1024",
        &mut book,
        None,
        1,
    )
    .await;

    // Sequential dispatch (bound 1) makes the scripted failure land on page 4
    let filled = book
        .pages
        .iter()
        .filter(|p| p.image_reference.is_some())
        .count();
    assert_eq!(filled, 9);
    assert!(book.pages[3].image_reference.is_none());
}

#[tokio::test]
async fn test_illustrate_book_respects_concurrency_bound() {
    let (store, _dir) = test_store();
    let b64 = STANDARD.encode(PNG_BYTES);
    let provider = ScriptedImage::inline_forever(b64);
    let mut book = ten_page_book();

    illustrate_book(
        &provider,
        &store,
        ImageReturnMode::Stored,
        "1024x1024",
        &mut book,
        None,
        3,
    )
    .await;

    assert!(provider.max_in_flight.load(Ordering::SeqCst) <= 3);
}

#[tokio::test]
async fn test_illustrate_book_skips_pages_without_prompts() {
    let (store, _dir) = test_store();
    let b64 = STANDARD.encode(PNG_BYTES);
    let provider = ScriptedImage::inline_forever(b64);
    let mut book = ten_page_book();
    book.pages[5].image_prompt = "".to_string();

    illustrate_book(
        &provider,
        &store,
        ImageReturnMode::Stored,
        "1024x1024",
        &mut book,
        None,
        2,
    )
    .await;

    assert_eq!(provider.call_count(), 9);
    assert!(book.pages[5].image_reference.is_none());
}
