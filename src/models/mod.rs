// Copyright (c) 2025 Taleforge
// SPDX-License-Identifier: BUSL-1.1
//! Domain models for the book-assembly pipeline

pub mod book;
pub mod request;

pub use book::{Book, BookPage, CharacterDescription, ImageReference, PAGE_COUNT};
pub use request::{BookRequest, DEFAULT_LANGUAGE, DEFAULT_STYLE};
