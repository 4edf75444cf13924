// Copyright (c) 2025 Taleforge
// SPDX-License-Identifier: BUSL-1.1
//! Story generation and normalization of the raw provider payload

use serde::Deserialize;
use tracing::{debug, info, warn};

use super::prompts::{story_user_prompt, STORY_SYSTEM_PROMPT};
use crate::error::GenerationError;
use crate::models::book::{DEFAULT_SUBTITLE, DEFAULT_TITLE};
use crate::models::{Book, BookPage, BookRequest, CharacterDescription, PAGE_COUNT};
use crate::provider::{TextGenerator, TextRequest};

/// Raw story payload as the provider returns it, before normalization.
/// Everything is optional; validation decides what is fatal.
#[derive(Debug, Deserialize)]
struct RawStory {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    subtitle: Option<String>,
    #[serde(default)]
    pages: Vec<RawPage>,
}

#[derive(Debug, Deserialize)]
struct RawPage {
    #[serde(default)]
    text: Option<String>,
    #[serde(default, rename = "imagePrompt", alias = "image_prompt")]
    image_prompt: Option<String>,
}

/// Generate a story book for the request.
///
/// Validates input before any outbound call, dispatches the templated prompt
/// to the text capability, then parses and normalizes the response into a
/// [`Book`]. A page count other than [`PAGE_COUNT`] is rejected with an
/// explicit count-mismatch error; the response is never truncated or padded.
pub async fn generate_story(
    provider: &dyn TextGenerator,
    request: &BookRequest,
    character: Option<&CharacterDescription>,
) -> Result<Book, GenerationError> {
    request.validate()?;

    let text_request = TextRequest::structured(
        STORY_SYSTEM_PROMPT,
        story_user_prompt(request, character),
    );

    debug!(
        "Generating story: child={}, theme={}, language={}",
        request.child_name.as_deref().unwrap_or_default(),
        request.story_theme.as_deref().unwrap_or_default(),
        request.language()
    );

    let raw = provider.complete(&text_request).await?;
    let book = normalize_story(&raw, request.style())?;

    info!(
        "Story generated: title=\"{}\", pages={}",
        book.title,
        book.pages.len()
    );
    Ok(book)
}

/// Parse and validate the raw textual payload into a canonical [`Book`].
pub fn normalize_story(raw: &str, style: &str) -> Result<Book, GenerationError> {
    let story: RawStory = serde_json::from_str(raw).map_err(|e| {
        warn!("Story payload failed to parse as JSON: {}", e);
        GenerationError::UpstreamMalformed(format!("story payload is not valid JSON: {}", e))
    })?;

    if story.pages.len() != PAGE_COUNT {
        return Err(GenerationError::UpstreamMalformed(format!(
            "page count mismatch: expected exactly {}, got {}",
            PAGE_COUNT,
            story.pages.len()
        )));
    }

    let mut pages = Vec::with_capacity(PAGE_COUNT);
    for (index, raw_page) in story.pages.into_iter().enumerate() {
        let text = raw_page.text.as_deref().unwrap_or_default().trim().to_string();
        if text.is_empty() {
            return Err(GenerationError::UpstreamMalformed(format!(
                "page {} has no text",
                index + 1
            )));
        }
        pages.push(BookPage {
            page_number: (index + 1) as u32,
            text,
            image_prompt: raw_page
                .image_prompt
                .as_deref()
                .unwrap_or_default()
                .trim()
                .to_string(),
            image_reference: None,
        });
    }

    Ok(Book {
        title: story
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        subtitle: story
            .subtitle
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SUBTITLE.to_string()),
        illustration_style: style.to_string(),
        pages,
    })
}
