// Copyright (c) 2025 Taleforge
// SPDX-License-Identifier: BUSL-1.1
//! Illustration generation: prompt composition, provider invocation,
//! normalization of the dual image-return shape, and persistence

pub mod generator;
pub mod storage;

pub use generator::{compose_prompt, generate_illustration, illustrate_book};
pub use storage::ImageStore;
