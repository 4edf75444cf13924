// Copyright (c) 2025 Taleforge
// SPDX-License-Identifier: BUSL-1.1
//! Character description endpoint handler

use axum::{extract::State, Json};
use tracing::info;

use super::request::GenerateCharacterRequest;
use super::response::GenerateCharacterResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::character::describe_character;

/// POST /generate-character - derive a character description from a photo
pub async fn generate_character_handler(
    State(state): State<AppState>,
    Json(request): Json<GenerateCharacterRequest>,
) -> Result<Json<GenerateCharacterResponse>, ApiError> {
    request.validate()?;

    let photo = request.child_photo.as_deref().unwrap_or_default();
    let description = describe_character(state.text.as_ref(), photo).await?;

    info!(
        "Character description generated ({} chars)",
        description.text.len()
    );

    Ok(Json(GenerateCharacterResponse::ok(description.text)))
}
