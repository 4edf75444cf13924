// Copyright (c) 2025 Taleforge
// SPDX-License-Identifier: BUSL-1.1
//! Persistent storage for generated illustrations

use std::path::{Path, PathBuf};

use image::ImageFormat;
use tracing::debug;
use uuid::Uuid;

use crate::error::GenerationError;

/// Writes generated image bytes under a server-controlled directory.
///
/// File names are random (uuid v4) so concurrent requests never contend on a
/// write target, and repeated calls always allocate a new file. Retrieval
/// only ever resolves plain file names, never paths.
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    /// Create a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `bytes` under a fresh random name and return that file name.
    ///
    /// The extension is sniffed from the bytes' magic; unrecognized data
    /// falls back to `.png`.
    pub async fn store(&self, bytes: &[u8]) -> Result<String, GenerationError> {
        if bytes.is_empty() {
            return Err(GenerationError::PersistenceFailure(
                "refusing to store an empty image".to_string(),
            ));
        }

        let extension = image::guess_format(bytes)
            .ok()
            .and_then(format_extension)
            .unwrap_or("png");
        let file_name = format!("{}.{}", Uuid::new_v4(), extension);
        let path = self.dir.join(&file_name);

        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| GenerationError::PersistenceFailure(format!("write {:?}: {}", path, e)))?;

        debug!("Stored illustration: {} ({} bytes)", file_name, bytes.len());
        Ok(file_name)
    }

    /// The relative retrieval path served by this node for a stored file.
    pub fn public_path(file_name: &str) -> String {
        format!("/generated/{}", file_name)
    }

    /// Resolve a caller-supplied file name to a path inside the store.
    ///
    /// Only plain file names survive: anything carrying a path separator, a
    /// parent reference, or characters outside the names we generate is
    /// rejected.
    pub fn resolve(&self, file_name: &str) -> Option<PathBuf> {
        if file_name.is_empty() || file_name.starts_with('.') {
            return None;
        }
        let valid = file_name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.');
        if !valid || file_name.contains("..") {
            return None;
        }
        Some(self.dir.join(file_name))
    }

    /// Content type for a stored file, by extension.
    pub fn content_type(file_name: &str) -> &'static str {
        match file_name.rsplit('.').next() {
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("webp") => "image/webp",
            Some("gif") => "image/gif",
            _ => "image/png",
        }
    }
}

fn format_extension(format: ImageFormat) -> Option<&'static str> {
    match format {
        ImageFormat::Png => Some("png"),
        ImageFormat::Jpeg => Some("jpg"),
        ImageFormat::WebP => Some("webp"),
        ImageFormat::Gif => Some("gif"),
        _ => None,
    }
}
