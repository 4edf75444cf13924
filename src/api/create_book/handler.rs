// Copyright (c) 2025 Taleforge
// SPDX-License-Identifier: BUSL-1.1
//! Book creation endpoint handler

use axum::{extract::State, Json};
use tracing::{info, warn};

use super::response::CreateBookResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::character::describe_character;
use crate::illustration::illustrate_book;
use crate::models::{BookRequest, CharacterDescription};
use crate::story::generate_story;

/// POST /create-book - assemble a complete storybook
///
/// Pipeline:
/// 1. Validate mandatory fields (no outbound call happens before this)
/// 2. Resolve the character description: an explicit one from the request
///    wins; otherwise derive one from the photo when present
/// 3. Generate and normalize the story (exactly 10 pages, or the whole
///    request fails)
/// 4. When eager illustration is enabled, fan out per-page image generation
///    under the configured concurrency bound; page failures leave that
///    page's reference unset
pub async fn create_book_handler(
    State(state): State<AppState>,
    Json(request): Json<BookRequest>,
) -> Result<Json<CreateBookResponse>, ApiError> {
    request.validate()?;

    let character = match (&request.character_description, &request.child_photo) {
        (Some(description), _) if !description.trim().is_empty() => {
            Some(CharacterDescription::new(description.trim()))
        }
        (_, Some(photo)) if !photo.trim().is_empty() => {
            match describe_character(state.text.as_ref(), photo).await {
                Ok(description) => Some(description),
                Err(e) => {
                    // The description is an enhancement; a failed derivation
                    // must not sink the whole book.
                    warn!("Character description failed, continuing without: {}", e);
                    None
                }
            }
        }
        _ => None,
    };

    let mut book = generate_story(state.text.as_ref(), &request, character.as_ref()).await?;

    if state.config.eager_illustrations {
        illustrate_book(
            state.image.as_ref(),
            &state.store,
            state.config.return_mode,
            &state.config.image_size,
            &mut book,
            character.as_ref(),
            state.config.illustration_concurrency,
        )
        .await;
    }

    info!(
        "Book created: \"{}\" ({} pages, eager_illustrations={})",
        book.title,
        book.pages.len(),
        state.config.eager_illustrations
    );

    Ok(Json(CreateBookResponse::from_book(book)))
}
