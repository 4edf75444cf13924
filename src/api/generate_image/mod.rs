// Copyright (c) 2025 Taleforge
// SPDX-License-Identifier: BUSL-1.1
//! Illustration endpoint module
//!
//! POST /generate-image renders one illustration for a prompt, used by
//! callers that illustrate a book page by page after creation.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::generate_image_handler;
pub use request::GenerateImageRequest;
pub use response::GenerateImageResponse;
