// Copyright (c) 2025 Taleforge
// SPDX-License-Identifier: BUSL-1.1
//! Taleforge storybook node
//!
//! An HTTP service that turns a child's name, age and a story theme into a
//! personalized ten-page storybook. Text and illustrations are produced by an
//! OpenAI-compatible provider; this crate owns the book-assembly pipeline:
//! request validation, prompt templating, normalization of untrusted provider
//! output into a stable schema, and persistence of generated illustrations.

pub mod api;
pub mod character;
pub mod config;
pub mod error;
pub mod illustration;
pub mod models;
pub mod provider;
pub mod story;

pub use config::{ImageReturnMode, NodeConfig};
pub use error::GenerationError;
pub use models::{Book, BookPage, BookRequest, CharacterDescription, ImageReference, PAGE_COUNT};
pub use provider::{
    ImageGenerator, ImagePayload, ImageRequest, OpenAiClient, TextGenerator, TextRequest,
};
