// Copyright (c) 2025 Taleforge
// SPDX-License-Identifier: BUSL-1.1
//! Illustration endpoint handler

use axum::{extract::State, Json};
use tracing::info;

use super::request::GenerateImageRequest;
use super::response::GenerateImageResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::illustration::generate_illustration;
use crate::models::CharacterDescription;

/// POST /generate-image - generate a single illustration
pub async fn generate_image_handler(
    State(state): State<AppState>,
    Json(request): Json<GenerateImageRequest>,
) -> Result<Json<GenerateImageResponse>, ApiError> {
    request.validate()?;

    let prompt = request.prompt.as_deref().unwrap_or_default();
    let character = request
        .character_description
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(CharacterDescription::new);

    let reference = generate_illustration(
        state.image.as_ref(),
        &state.store,
        state.config.return_mode,
        &state.config.image_size,
        prompt,
        request.style(),
        character.as_ref(),
    )
    .await?;

    info!("Illustration generated (style={})", request.style());

    Ok(Json(GenerateImageResponse::ok(reference.into_api_string())))
}
