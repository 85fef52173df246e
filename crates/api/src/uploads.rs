// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Storage for circular attachments.

use std::path::PathBuf;

use harbour_domain::Timestamp;
use thiserror::Error;
use tracing::{debug, info};

/// Upload storage errors.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The requested file does not exist or its name is not acceptable.
    #[error("Uploaded file not found: {0}")]
    NotFound(String),

    /// The file could not be read or written.
    #[error("Upload storage error: {0}")]
    Io(#[from] std::io::Error),
}

/// A directory of uploaded circular attachments.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Saves an attachment under `"{unix_timestamp}_{basename}"`.
    ///
    /// Only the final path component of `client_name` is used.
    ///
    /// # Returns
    ///
    /// The stored name, or `None` if the client sent no usable name.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(
        &self,
        client_name: &str,
        contents: &[u8],
        uploaded_at: Timestamp,
    ) -> Result<Option<String>, UploadError> {
        let Some(base_name) = base_name(client_name) else {
            debug!(client_name, "Attachment has no usable file name, ignoring");
            return Ok(None);
        };

        let stored_name: String = format!("{}_{base_name}", uploaded_at.unix_timestamp());
        std::fs::write(self.dir.join(&stored_name), contents)?;

        info!(stored_name, bytes = contents.len(), "Attachment stored");
        Ok(Some(stored_name))
    }

    /// Resolves a stored name to a path inside the uploads directory.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::NotFound` if the name is not a single plain
    /// path component, or if no such file exists.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, UploadError> {
        if !is_plain_file_name(name) {
            return Err(UploadError::NotFound(name.to_string()));
        }

        let path: PathBuf = self.dir.join(name);
        if !path.is_file() {
            return Err(UploadError::NotFound(name.to_string()));
        }
        Ok(path)
    }

    /// Removes a stored attachment whose circular was never recorded.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not acceptable or the file cannot be
    /// removed.
    pub fn discard(&self, name: &str) -> Result<(), UploadError> {
        let path: PathBuf = self.resolve(name)?;
        std::fs::remove_file(path)?;
        debug!(name, "Attachment discarded");
        Ok(())
    }
}

/// The last path component of a client-supplied file name.
fn base_name(client_name: &str) -> Option<&str> {
    let candidate: &str = client_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    is_plain_file_name(candidate).then_some(candidate)
}

/// A single path component that names a file in the uploads directory.
///
/// Saving and resolving share this check, so every stored name resolves.
fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}
