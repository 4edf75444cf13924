// Copyright (c) 2025 Taleforge
// SPDX-License-Identifier: BUSL-1.1
//! Character description response types

use serde::{Deserialize, Serialize};

/// Response from POST /generate-character
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCharacterResponse {
    pub status: String,
    /// Short physical description for reuse across illustration prompts
    pub character_description: String,
}

impl GenerateCharacterResponse {
    pub fn ok(character_description: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            character_description: character_description.into(),
        }
    }
}
