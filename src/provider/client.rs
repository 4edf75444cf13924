// Copyright (c) 2025 Taleforge
// SPDX-License-Identifier: BUSL-1.1
//! OpenAI-compatible provider client for text and image generation

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use super::types::{ImageGenerator, ImagePayload, ImageRequest, TextGenerator, TextRequest};
use crate::config::NodeConfig;
use crate::error::GenerationError;

/// Upper bound on upstream diagnostic text attached to errors
const MAX_DIAGNOSTIC_LEN: usize = 500;

/// Client for an OpenAI-compatible provider (chat completions + images).
///
/// Built once at process start and carried in `AppState`; no ambient
/// singleton.
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: String,
    text_model: String,
    image_model: String,
    image_response_format: String,
}

// --- OpenAI-compatible response types ---

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ImagesResponse {
    data: Vec<ImagesData>,
}

#[derive(Debug, Deserialize)]
struct ImagesData {
    url: Option<String>,
    b64_json: Option<String>,
}

impl OpenAiClient {
    /// Create a new client from node configuration
    pub fn new(config: &NodeConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        info!(
            "Provider client configured: base_url={}, text_model={}, image_model={}",
            base_url, config.text_model, config.image_model
        );

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
            text_model: config.text_model.clone(),
            image_model: config.image_model.clone(),
            image_response_format: config.image_response_format.clone(),
        })
    }

    pub fn text_model(&self) -> &str {
        &self.text_model
    }

    pub fn image_model(&self) -> &str {
        &self.image_model
    }

    /// Map transport-level failures (connect, timeout) onto the pipeline's
    /// "provider unavailable" kind.
    fn transport_error(err: reqwest::Error) -> GenerationError {
        GenerationError::UpstreamUnavailable(err.to_string())
    }

    /// Turn a non-success upstream status into the matching error kind.
    /// 429 carries an actionable quota message distinct from generic faults.
    async fn check_status(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, GenerationError> {
        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let text = response.text().await.unwrap_or_default();
            return Err(GenerationError::UpstreamThrottled(format!(
                "the provider reported a rate limit or exhausted quota; \
                 check the account's plan and billing, then retry ({})",
                truncate(&text)
            )));
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(GenerationError::Upstream {
                status: status.as_u16(),
                message: truncate(&text),
            });
        }
        Ok(response)
    }
}

fn truncate(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.len() <= MAX_DIAGNOSTIC_LEN {
        trimmed.to_string()
    } else {
        let mut end = MAX_DIAGNOSTIC_LEN;
        while !trimmed.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &trimmed[..end])
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn complete(&self, request: &TextRequest) -> Result<String, GenerationError> {
        let user_content = match &request.attachment {
            Some(photo) => json!([
                {"type": "text", "text": request.user},
                {"type": "image_url", "image_url": {
                    "url": format!("data:image/jpeg;base64,{}", photo)
                }},
            ]),
            None => json!(request.user),
        };

        let mut body = json!({
            "model": self.text_model,
            "temperature": request.temperature,
            "max_tokens": request.max_tokens,
            "messages": [
                {"role": "system", "content": request.system},
                {"role": "user", "content": user_content},
            ],
        });
        if request.json {
            body["response_format"] = json!({"type": "json_object"});
        }

        let url = format!("{}/v1/chat/completions", self.base_url);
        debug!("Text completion POST {} (model={})", url, self.text_model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(Self::transport_error)?;

        let response = Self::check_status(response).await?;
        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            GenerationError::UpstreamMalformed(format!("unparseable completion response: {}", e))
        })?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| {
                GenerationError::UpstreamMalformed(
                    "completion response carried no content".to_string(),
                )
            })
    }
}

#[async_trait]
impl ImageGenerator for OpenAiClient {
    async fn generate(&self, request: &ImageRequest) -> Result<ImagePayload, GenerationError> {
        let body = json!({
            "model": self.image_model,
            "prompt": request.prompt,
            "n": 1,
            "size": request.size,
            "response_format": self.image_response_format,
        });

        let url = format!("{}/v1/images/generations", self.base_url);
        debug!("Image generation POST {} (model={})", url, self.image_model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(Self::transport_error)?;

        let response = Self::check_status(response).await?;
        let images: ImagesResponse = response.json().await.map_err(|e| {
            GenerationError::UpstreamMalformed(format!("unparseable image response: {}", e))
        })?;

        let first = images.data.into_iter().next().ok_or_else(|| {
            GenerationError::UpstreamMalformed("empty data array in image response".to_string())
        })?;

        ImagePayload::from_parts(first.url, first.b64_json)
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, GenerationError> {
        debug!("Downloading generated image from upstream URL");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(Self::transport_error)?;

        let response = Self::check_status(response).await?;
        let bytes = response.bytes().await.map_err(Self::transport_error)?;
        Ok(bytes.to_vec())
    }
}
