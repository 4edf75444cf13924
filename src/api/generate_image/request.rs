// Copyright (c) 2025 Taleforge
// SPDX-License-Identifier: BUSL-1.1
//! Illustration request types and validation

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;
use crate::models::DEFAULT_STYLE;

/// Request for POST /generate-image
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageRequest {
    /// Description of the desired illustration
    #[serde(default)]
    pub prompt: Option<String>,
    /// Visual style; falls back to the fixed default when absent
    #[serde(default)]
    pub illustration_style: Option<String>,
    /// Character description carried over from /generate-character
    #[serde(default)]
    pub character_description: Option<String>,
}

impl GenerateImageRequest {
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self
            .prompt
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .is_empty()
        {
            return Err(GenerationError::InvalidInput(
                "prompt is required".to_string(),
            ));
        }
        Ok(())
    }

    pub fn style(&self) -> &str {
        self.illustration_style
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_STYLE)
    }
}
