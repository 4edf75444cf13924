// Copyright (c) 2025 Taleforge
// SPDX-License-Identifier: BUSL-1.1
//! Book creation response types

use serde::{Deserialize, Serialize};

use crate::models::{Book, BookPage};

/// Response from POST /create-book. Pages length is always exactly 10.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookResponse {
    pub status: String,
    pub title: String,
    pub subtitle: String,
    pub illustration_style: String,
    pub pages: Vec<BookPage>,
}

impl CreateBookResponse {
    pub fn from_book(book: Book) -> Self {
        Self {
            status: "ok".to_string(),
            title: book.title,
            subtitle: book.subtitle,
            illustration_style: book.illustration_style,
            pages: book.pages,
        }
    }
}
