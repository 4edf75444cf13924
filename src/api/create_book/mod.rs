// Copyright (c) 2025 Taleforge
// SPDX-License-Identifier: BUSL-1.1
//! Book creation endpoint module
//!
//! POST /create-book drives the full pipeline: optional character
//! description, story generation, and (config-gated) eager per-page
//! illustration. The request body is the domain-level
//! [`crate::models::BookRequest`].

pub mod handler;
pub mod response;

pub use handler::create_book_handler;
pub use response::CreateBookResponse;
