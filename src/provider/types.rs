// Copyright (c) 2025 Taleforge
// SPDX-License-Identifier: BUSL-1.1
//! Provider request/response types and capability traits

use async_trait::async_trait;

use crate::error::GenerationError;

/// A single text-generation invocation.
#[derive(Debug, Clone)]
pub struct TextRequest {
    /// System instruction fixing role and constraints
    pub system: String,
    /// User content (the templated prompt)
    pub user: String,
    /// Optional base64-encoded image attached to the user message
    pub attachment: Option<String>,
    /// Sampling temperature; non-zero so output varies within constraints
    pub temperature: f32,
    pub max_tokens: u32,
    /// Ask the provider for machine-parseable JSON output
    pub json: bool,
}

impl TextRequest {
    /// A structured-output request, used for story generation.
    pub fn structured(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            attachment: None,
            temperature: 0.9,
            max_tokens: 4096,
            json: true,
        }
    }

    /// A vision request with an attached photo, used for character
    /// description. Plain-text output, low temperature for consistency.
    pub fn vision(
        system: impl Into<String>,
        user: impl Into<String>,
        photo_base64: impl Into<String>,
    ) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            attachment: Some(photo_base64.into()),
            temperature: 0.4,
            max_tokens: 300,
            json: false,
        }
    }
}

/// A single image-generation invocation.
#[derive(Debug, Clone)]
pub struct ImageRequest {
    pub prompt: String,
    /// Output resolution, e.g. "1024x1024"
    pub size: String,
}

/// The two shapes an image capability may return.
#[derive(Debug, Clone, PartialEq)]
pub enum ImagePayload {
    /// A retrieval URL, usually time-limited
    Url(String),
    /// Base64-encoded image bytes
    Inline(String),
}

impl ImagePayload {
    /// Normalize the dual return shape of the upstream image response.
    ///
    /// A URL wins when both are present; neither present is a generation
    /// failure, not an empty success.
    pub fn from_parts(
        url: Option<String>,
        b64_json: Option<String>,
    ) -> Result<Self, GenerationError> {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            return Ok(ImagePayload::Url(url));
        }
        if let Some(b64) = b64_json.filter(|b| !b.trim().is_empty()) {
            return Ok(ImagePayload::Inline(b64));
        }
        Err(GenerationError::UpstreamMalformed(
            "no image returned: provider response carried neither a URL nor an inline payload"
                .to_string(),
        ))
    }
}

/// Text-generation capability.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Run one completion and return the raw textual payload.
    async fn complete(&self, request: &TextRequest) -> Result<String, GenerationError>;
}

/// Image-generation capability.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate one image for the prompt.
    async fn generate(&self, request: &ImageRequest) -> Result<ImagePayload, GenerationError>;

    /// Fetch the bytes behind a retrieval URL returned by `generate`.
    async fn download(&self, url: &str) -> Result<Vec<u8>, GenerationError>;
}
