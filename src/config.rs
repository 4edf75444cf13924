// Copyright (c) 2025 Taleforge
// SPDX-License-Identifier: BUSL-1.1
//! Node configuration loaded from environment variables

use std::env;
use std::path::PathBuf;

/// How generated illustrations are returned to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageReturnMode {
    /// Persist bytes under the generated-image directory and return a
    /// relative retrieval path (`/generated/<file>`).
    Stored,
    /// Return the base64 payload inline as a data URL, no server-side
    /// persistence.
    Inline,
}

impl ImageReturnMode {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "stored" => Ok(ImageReturnMode::Stored),
            "inline" => Ok(ImageReturnMode::Inline),
            other => Err(format!(
                "invalid image return mode '{}'; expected 'stored' or 'inline'",
                other
            )),
        }
    }
}

/// Configuration for the storybook node
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Provider API key
    pub api_key: String,
    /// Base URL of the OpenAI-compatible provider
    pub base_url: String,
    /// Model used for story and character-description generation
    pub text_model: String,
    /// Model used for illustration generation
    pub image_model: String,
    /// Listening port for the HTTP server
    pub port: u16,
    /// Directory where generated illustrations are persisted
    pub generated_dir: PathBuf,
    /// Output resolution requested from the image capability
    pub image_size: String,
    /// Response shape requested from the image capability ("url" or "b64_json")
    pub image_response_format: String,
    /// Whether illustrations are returned as stored paths or inline payloads
    pub return_mode: ImageReturnMode,
    /// Generate all page illustrations as part of create-book
    pub eager_illustrations: bool,
    /// Concurrency bound for per-page illustration fan-out
    pub illustration_concurrency: usize,
    /// Upper bound per upstream call, in seconds
    pub request_timeout_secs: u64,
}

impl NodeConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
            base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com".to_string()),
            text_model: env::var("TEXT_MODEL").unwrap_or_else(|_| "gpt-4o".to_string()),
            image_model: env::var("IMAGE_MODEL").unwrap_or_else(|_| "dall-e-3".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            generated_dir: PathBuf::from(
                env::var("GENERATED_DIR").unwrap_or_else(|_| "./generated".to_string()),
            ),
            image_size: env::var("IMAGE_SIZE").unwrap_or_else(|_| "1024x1024".to_string()),
            image_response_format: env::var("IMAGE_RESPONSE_FORMAT")
                .unwrap_or_else(|_| "url".to_string()),
            return_mode: env::var("IMAGE_RETURN_MODE")
                .ok()
                .and_then(|v| ImageReturnMode::parse(&v).ok())
                .unwrap_or(ImageReturnMode::Stored),
            eager_illustrations: env::var("EAGER_ILLUSTRATIONS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(false),
            illustration_concurrency: env::var("ILLUSTRATION_CONCURRENCY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(2),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.trim().is_empty() {
            return Err("OPENAI_API_KEY must be set".to_string());
        }
        if self.illustration_concurrency == 0 {
            return Err("illustration concurrency must be greater than 0".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request timeout must be greater than 0".to_string());
        }
        let parts: Vec<&str> = self.image_size.split('x').collect();
        if parts.len() != 2 || parts.iter().any(|p| p.parse::<u32>().is_err()) {
            return Err(format!(
                "invalid image size '{}'; expected WIDTHxHEIGHT",
                self.image_size
            ));
        }
        if self.image_response_format != "url" && self.image_response_format != "b64_json" {
            return Err(format!(
                "invalid image response format '{}'; expected 'url' or 'b64_json'",
                self.image_response_format
            ));
        }
        Ok(())
    }
}
