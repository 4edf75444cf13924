// Copyright (c) 2025 Taleforge
// SPDX-License-Identifier: BUSL-1.1
//! Book creation request and its validation

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// Visual style applied when the caller does not pick one
pub const DEFAULT_STYLE: &str = "Soft Storybook";

/// Output language when the caller does not pick one
pub const DEFAULT_LANGUAGE: &str = "English";

/// Request body for POST /create-book.
///
/// All fields are optional at the serde level so that a missing mandatory
/// field surfaces as a 400 from `validate()` rather than a deserialization
/// rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRequest {
    #[serde(default)]
    pub child_name: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub story_theme: Option<String>,
    #[serde(default)]
    pub illustration_style: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    /// Base64-encoded photo, used to derive a character description
    #[serde(default)]
    pub child_photo: Option<String>,
    /// Pre-computed character description from /generate-character
    #[serde(default)]
    pub character_description: Option<String>,
}

impl BookRequest {
    /// Check mandatory fields; called before any outbound provider call.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self
            .child_name
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .is_empty()
        {
            return Err(GenerationError::InvalidInput(
                "childName is required".to_string(),
            ));
        }
        if self.age.is_none() {
            return Err(GenerationError::InvalidInput("age is required".to_string()));
        }
        if self
            .story_theme
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .is_empty()
        {
            return Err(GenerationError::InvalidInput(
                "storyTheme is required".to_string(),
            ));
        }
        Ok(())
    }

    /// Requested style, or the fixed fallback
    pub fn style(&self) -> &str {
        self.illustration_style
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_STYLE)
    }

    /// Requested output language, or the fixed fallback
    pub fn language(&self) -> &str {
        self.language
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_LANGUAGE)
    }
}
