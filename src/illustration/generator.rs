// Copyright (c) 2025 Taleforge
// SPDX-License-Identifier: BUSL-1.1
//! Illustration generation and per-book fan-out

use base64::{engine::general_purpose::STANDARD, Engine as _};
use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use super::storage::ImageStore;
use crate::config::ImageReturnMode;
use crate::error::GenerationError;
use crate::models::{Book, CharacterDescription, ImageReference};
use crate::provider::{ImageGenerator, ImagePayload, ImageRequest};

/// Compose the final prompt sent to the image capability: the page's own
/// description, the requested visual style, fixed quality/tone qualifiers,
/// a no-text/no-brand instruction, and character consistency when available.
pub fn compose_prompt(
    prompt: &str,
    style: &str,
    character: Option<&CharacterDescription>,
) -> String {
    let mut composed = format!(
        "{}. Illustration style: {}. A warm, friendly, high-quality children's book \
         illustration. Do not render any text, letters, captions, watermarks or brand \
         marks in the image.",
        prompt.trim(),
        style.trim(),
    );
    if let Some(character) = character {
        composed.push_str(&format!(
            " The main character looks like this: {}. Keep the character's appearance \
             consistent with this description.",
            character.text.trim()
        ));
    }
    composed
}

/// Generate one illustration and normalize it into an [`ImageReference`].
///
/// Upstream URLs are downloaded once and persisted under a random name; the
/// upstream URL itself is never returned to the caller. In inline return mode
/// the encoded payload is handed back as a data URL with no persistence.
///
/// Not idempotent: identical input may produce a different image and always
/// allocates a new stored file.
pub async fn generate_illustration(
    provider: &dyn ImageGenerator,
    store: &ImageStore,
    mode: ImageReturnMode,
    size: &str,
    prompt: &str,
    style: &str,
    character: Option<&CharacterDescription>,
) -> Result<ImageReference, GenerationError> {
    if prompt.trim().is_empty() {
        return Err(GenerationError::InvalidInput(
            "prompt is required".to_string(),
        ));
    }

    let request = ImageRequest {
        prompt: compose_prompt(prompt, style, character),
        size: size.to_string(),
    };
    let payload = provider.generate(&request).await?;

    match (payload, mode) {
        (ImagePayload::Url(url), ImageReturnMode::Stored) => {
            let bytes = provider.download(&url).await.map_err(|e| {
                GenerationError::PersistenceFailure(format!(
                    "download after successful generation failed: {}",
                    e
                ))
            })?;
            let file_name = store.store(&bytes).await?;
            Ok(ImageReference::Stored(ImageStore::public_path(&file_name)))
        }
        (ImagePayload::Url(url), ImageReturnMode::Inline) => {
            let bytes = provider.download(&url).await.map_err(|e| {
                GenerationError::PersistenceFailure(format!(
                    "download after successful generation failed: {}",
                    e
                ))
            })?;
            Ok(ImageReference::Inline(format!(
                "data:{};base64,{}",
                content_type_of(&bytes),
                STANDARD.encode(&bytes)
            )))
        }
        (ImagePayload::Inline(b64), ImageReturnMode::Stored) => {
            let bytes = STANDARD.decode(b64.trim()).map_err(|e| {
                GenerationError::UpstreamMalformed(format!(
                    "inline image payload is not valid base64: {}",
                    e
                ))
            })?;
            let file_name = store.store(&bytes).await?;
            Ok(ImageReference::Stored(ImageStore::public_path(&file_name)))
        }
        (ImagePayload::Inline(b64), ImageReturnMode::Inline) => Ok(ImageReference::Inline(
            format!("data:image/png;base64,{}", b64.trim()),
        )),
    }
}

fn content_type_of(bytes: &[u8]) -> &'static str {
    match image::guess_format(bytes) {
        Ok(image::ImageFormat::Jpeg) => "image/jpeg",
        Ok(image::ImageFormat::WebP) => "image/webp",
        Ok(image::ImageFormat::Gif) => "image/gif",
        _ => "image/png",
    }
}

/// Generate illustrations for every page of a book, bounded fan-out.
///
/// Page numbering is assigned before dispatch so there is no cross-page
/// ordering dependency; the concurrency bound keeps a whole-book batch from
/// tripping the provider's rate limits. A failed page logs a warning and
/// leaves that page's reference unset; the book is still delivered.
pub async fn illustrate_book(
    provider: &dyn ImageGenerator,
    store: &ImageStore,
    mode: ImageReturnMode,
    size: &str,
    book: &mut Book,
    character: Option<&CharacterDescription>,
    concurrency: usize,
) {
    let jobs: Vec<(usize, String)> = book
        .pages
        .iter()
        .enumerate()
        .filter(|(_, page)| !page.image_prompt.trim().is_empty())
        .map(|(index, page)| (index, page.image_prompt.clone()))
        .collect();

    debug!(
        "Illustrating book: {} pages, concurrency bound {}",
        jobs.len(),
        concurrency
    );

    let style = book.illustration_style.clone();
    let results: Vec<(usize, Result<ImageReference, GenerationError>)> = stream::iter(jobs)
        .map(|(index, prompt)| {
            let style = style.as_str();
            async move {
                let result = generate_illustration(
                    provider, store, mode, size, &prompt, style, character,
                )
                .await;
                (index, result)
            }
        })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    for (index, result) in results {
        match result {
            Ok(reference) => {
                book.pages[index].image_reference = Some(reference.into_api_string());
            }
            Err(e) => {
                warn!(
                    "Illustration for page {} failed, leaving it unset: {}",
                    index + 1,
                    e
                );
            }
        }
    }
}
