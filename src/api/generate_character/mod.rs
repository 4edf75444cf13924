// Copyright (c) 2025 Taleforge
// SPDX-License-Identifier: BUSL-1.1
//! Character description endpoint module
//!
//! POST /generate-character derives a reusable character description from a
//! child's photo, ahead of book creation.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::generate_character_handler;
pub use request::GenerateCharacterRequest;
pub use response::GenerateCharacterResponse;
