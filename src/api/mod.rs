// Copyright (c) 2025 Taleforge
// SPDX-License-Identifier: BUSL-1.1
pub mod create_book;
pub mod errors;
pub mod generate_character;
pub mod generate_image;
pub mod http_server;

pub use create_book::{create_book_handler, CreateBookResponse};
pub use errors::{ApiError, ErrorResponse};
pub use generate_character::{
    generate_character_handler, GenerateCharacterRequest, GenerateCharacterResponse,
};
pub use generate_image::{generate_image_handler, GenerateImageRequest, GenerateImageResponse};
pub use http_server::{build_router, start_server, AppState};
