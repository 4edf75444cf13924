// Copyright (c) 2025 Taleforge
// SPDX-License-Identifier: BUSL-1.1
//! Story generation: prompt templating, provider invocation, and
//! normalization of the raw payload into a validated [`crate::models::Book`]

pub mod generator;
pub mod prompts;

pub use generator::generate_story;
