// Copyright (c) 2025 Taleforge
// SPDX-License-Identifier: BUSL-1.1
//! Generative AI provider integration
//!
//! The pipeline talks to text- and image-generation capabilities through the
//! [`TextGenerator`] and [`ImageGenerator`] traits; [`OpenAiClient`] is the
//! production implementation for any OpenAI-compatible API.

pub mod client;
pub mod types;

pub use client::OpenAiClient;
pub use types::{ImageGenerator, ImagePayload, ImageRequest, TextGenerator, TextRequest};
