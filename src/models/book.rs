// Copyright (c) 2025 Taleforge
// SPDX-License-Identifier: BUSL-1.1
//! Book, page and illustration-reference types

use serde::{Deserialize, Serialize};

/// Every book has exactly this many pages; a provider response with any other
/// count is rejected, never truncated or padded.
pub const PAGE_COUNT: usize = 10;

/// Fallback title when the provider omits one
pub const DEFAULT_TITLE: &str = "A Wonderful Adventure";

/// Fallback subtitle when the provider omits one
pub const DEFAULT_SUBTITLE: &str = "A personalized storybook";

/// One page of story text paired with one illustration prompt/image.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPage {
    /// 1-based position in the page sequence
    pub page_number: u32,
    /// Story text for this page, trimmed, non-empty
    pub text: String,
    /// Prompt used to illustrate this page
    pub image_prompt: String,
    /// Retrieval path or inline data URL once an illustration exists
    pub image_reference: Option<String>,
}

/// The full generated storybook record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub title: String,
    pub subtitle: String,
    pub illustration_style: String,
    pub pages: Vec<BookPage>,
}

/// A short physical description of the child, derived once from a photo and
/// threaded explicitly into every subsequent illustration prompt. Ephemeral:
/// lives only for the duration of a request/session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterDescription {
    pub text: String,
}

impl CharacterDescription {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Generic description substituted when the vision capability returns
    /// nothing usable, so the pipeline keeps going instead of failing.
    pub fn fallback() -> Self {
        Self {
            text: "a cheerful young child with a friendly smile and bright, curious eyes"
                .to_string(),
        }
    }
}

/// Canonical reference to a generated illustration.
///
/// The upstream capability may hand back either a time-limited retrieval URL
/// or an inline base64 payload; both shapes are normalized into this type and
/// the upstream URL is never exposed to callers.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageReference {
    /// Relative retrieval path served by this node, e.g. `/generated/<file>`
    Stored(String),
    /// Inline data URL for client-side rendering, no server-side persistence
    Inline(String),
}

impl ImageReference {
    /// The string form placed in API responses.
    pub fn into_api_string(self) -> String {
        match self {
            ImageReference::Stored(path) => path,
            ImageReference::Inline(data_url) => data_url,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ImageReference::Stored(path) => path,
            ImageReference::Inline(data_url) => data_url,
        }
    }
}
