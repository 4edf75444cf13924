// Copyright (c) 2025 Taleforge
// SPDX-License-Identifier: BUSL-1.1
//! Character description request types and validation

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// Maximum accepted photo size (base64-encoded)
const MAX_PHOTO_SIZE: usize = 10 * 1024 * 1024;

/// Request for POST /generate-character
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCharacterRequest {
    /// Base64-encoded photo of the child
    #[serde(default)]
    pub child_photo: Option<String>,
    /// Reserved for variants that also render a styled portrait
    #[serde(default)]
    pub illustration_style: Option<String>,
}

impl GenerateCharacterRequest {
    pub fn validate(&self) -> Result<(), GenerationError> {
        let photo = self
            .child_photo
            .as_deref()
            .map(str::trim)
            .unwrap_or_default();
        if photo.is_empty() {
            return Err(GenerationError::InvalidInput(
                "childPhoto is required".to_string(),
            ));
        }
        if photo.len() > MAX_PHOTO_SIZE {
            return Err(GenerationError::InvalidInput(format!(
                "childPhoto exceeds maximum size of {} bytes",
                MAX_PHOTO_SIZE
            )));
        }
        Ok(())
    }
}
