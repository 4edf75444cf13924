// Copyright (c) 2025 Taleforge
// SPDX-License-Identifier: BUSL-1.1
//! Photo-based character description
//!
//! Optional pipeline stage: derives a short, reusable physical description
//! from a child's photo so illustration prompts stay consistent across all
//! pages of a book. The description is a plain value threaded explicitly into
//! later prompt construction, never hidden shared state.

use tracing::{debug, warn};

use crate::error::GenerationError;
use crate::models::CharacterDescription;
use crate::provider::{TextGenerator, TextRequest};
use crate::story::prompts::{CHARACTER_SYSTEM_PROMPT, CHARACTER_USER_PROMPT};

/// Derive a character description from a base64-encoded photo.
///
/// An empty or missing provider result substitutes a generic fallback
/// description rather than failing the whole pipeline.
pub async fn describe_character(
    provider: &dyn TextGenerator,
    photo_base64: &str,
) -> Result<CharacterDescription, GenerationError> {
    if photo_base64.trim().is_empty() {
        return Err(GenerationError::InvalidInput(
            "childPhoto is required".to_string(),
        ));
    }

    let request = TextRequest::vision(
        CHARACTER_SYSTEM_PROMPT,
        CHARACTER_USER_PROMPT,
        photo_base64.trim(),
    );

    debug!("Requesting character description from vision capability");
    let raw = provider.complete(&request).await?;

    let text = raw.trim();
    if text.is_empty() {
        warn!("Vision capability returned an empty description, using fallback");
        return Ok(CharacterDescription::fallback());
    }

    Ok(CharacterDescription::new(text))
}
