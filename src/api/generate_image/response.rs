// Copyright (c) 2025 Taleforge
// SPDX-License-Identifier: BUSL-1.1
//! Illustration response types

use serde::{Deserialize, Serialize};

/// Response from POST /generate-image
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageResponse {
    pub status: String,
    /// Relative retrieval path or inline data URL, depending on the node's
    /// image return mode
    pub image_reference: String,
}

impl GenerateImageResponse {
    pub fn ok(image_reference: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            image_reference: image_reference.into(),
        }
    }
}
