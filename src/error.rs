// Copyright (c) 2025 Taleforge
// SPDX-License-Identifier: BUSL-1.1
//! Pipeline error types

use thiserror::Error;

/// Errors produced by the book-assembly pipeline.
///
/// Every upstream call site maps provider failures onto one of these kinds
/// immediately after the call returns; the API boundary translates them into
/// HTTP statuses and a structured error body.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// A mandatory request field is missing or empty.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The provider signalled a rate limit or exhausted quota (HTTP 429).
    #[error("provider rate limit or quota exhausted: {0}")]
    UpstreamThrottled(String),

    /// The provider answered but the payload violates the required shape
    /// (unparseable JSON, wrong page count, no image in the response).
    #[error("malformed provider response: {0}")]
    UpstreamMalformed(String),

    /// The provider could not be reached: connect failure or timeout.
    #[error("provider unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Generation succeeded but writing the result to storage did not.
    #[error("failed to persist generated image: {0}")]
    PersistenceFailure(String),

    /// Any other upstream fault, with the provider's diagnostic attached.
    #[error("generation failed (upstream status {status}): {message}")]
    Upstream { status: u16, message: String },
}

impl GenerationError {
    /// Stable machine-readable code for the API error body.
    pub fn code(&self) -> &'static str {
        match self {
            GenerationError::InvalidInput(_) => "invalid_input",
            GenerationError::UpstreamThrottled(_) => "upstream_throttled",
            GenerationError::UpstreamMalformed(_) => "upstream_malformed",
            GenerationError::UpstreamUnavailable(_) => "upstream_unavailable",
            GenerationError::PersistenceFailure(_) => "persistence_failure",
            GenerationError::Upstream { .. } => "generation_failed",
        }
    }
}
