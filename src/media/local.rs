//! # Local Image Store
//!
//! Writes uploaded image bytes to a designated directory under a unique
//! filename and hands back the relative URL the caller stores in the
//! record's `imageF` field. The registry never sees image bytes, only the
//! returned path string.

use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::observability::Logger;

use super::errors::{MediaError, MediaResult};

/// URL prefix under which stored images are served
pub const IMAGE_URL_PREFIX: &str = "/images";

/// Local filesystem image store
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    /// Create a store rooted at the given images directory.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Store uploaded bytes under a unique name derived from the client's
    /// filename, returning the relative URL to persist.
    pub fn store(&self, original_name: &str, data: &[u8]) -> MediaResult<String> {
        if data.is_empty() {
            return Err(MediaError::EmptyUpload);
        }

        let unique_name = format!("{}_{}", Uuid::new_v4(), sanitize_filename(original_name)?);
        let path = self.root.join(&unique_name);

        fs::create_dir_all(&self.root).map_err(|e| MediaError::WriteFailed(e.to_string()))?;
        fs::write(&path, data).map_err(|e| MediaError::WriteFailed(e.to_string()))?;

        Logger::info(
            "IMAGE_STORED",
            &[
                ("name", unique_name.as_str()),
                ("bytes", &data.len().to_string()),
            ],
        );
        Ok(format!("{}/{}", IMAGE_URL_PREFIX, unique_name))
    }

    /// Read a stored image back by its unique name.
    pub fn read(&self, name: &str) -> MediaResult<Vec<u8>> {
        // Only plain filenames are valid; anything path-like is rejected
        // before touching the filesystem.
        let name = sanitize_filename(name)?;
        let path = self.root.join(name.as_ref());

        fs::read(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                MediaError::NotFound(name.into_owned())
            } else {
                MediaError::ReadFailed(e.to_string())
            }
        })
    }

    /// Images directory this store writes into.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Reduce a client-supplied filename to its final path component and reject
/// names that would escape the images directory.
fn sanitize_filename(name: &str) -> MediaResult<std::borrow::Cow<'_, str>> {
    let trimmed = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(name)
        .trim();

    if trimmed.is_empty() || trimmed == "." || trimmed == ".." {
        return Err(MediaError::InvalidFilename(name.to_string()));
    }

    if trimmed.len() == name.len() {
        Ok(std::borrow::Cow::Borrowed(trimmed))
    } else {
        Ok(std::borrow::Cow::Owned(trimmed.to_string()))
    }
}
