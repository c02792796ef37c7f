//! Image gallery backed by a plain directory.
//!
//! Nothing is indexed: the listing re-reads the directory on every call and
//! keeps whatever looks like an image by extension.

use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{debug, info};

// Hardcoded regex patterns - guaranteed to be valid at compile time
#[allow(clippy::unwrap_used)]
static IMAGE_EXTENSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(png|jpe?g|gif|webp)$").unwrap());
#[allow(clippy::unwrap_used)]
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Only image files are allowed")]
    NotAnImage,
    #[error("Please select an image file to upload.")]
    MissingFile,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct MediaStore {
    dir: PathBuf,
}

impl MediaStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Image file names in the directory, sorted. A missing directory is empty.
    pub async fn list_images(&self) -> Result<Vec<String>, MediaError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut images = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if is_image_name(&name) {
                images.push(name);
            }
        }

        images.sort();
        Ok(images)
    }

    /// Validate and persist one upload, returning the stored file name.
    pub async fn store_image(
        &self,
        original_name: &str,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> Result<String, MediaError> {
        if original_name.trim().is_empty() || bytes.is_empty() {
            return Err(MediaError::MissingFile);
        }
        if !is_image_content_type(content_type) {
            debug!("Rejected upload {} ({:?})", original_name, content_type);
            return Err(MediaError::NotAnImage);
        }

        tokio::fs::create_dir_all(&self.dir).await?;

        let stored = stored_file_name(original_name, Utc::now().timestamp_millis());
        tokio::fs::write(self.dir.join(&stored), bytes).await?;

        info!("Stored upload {} ({} bytes)", stored, bytes.len());
        Ok(stored)
    }
}

pub fn is_image_name(name: &str) -> bool {
    IMAGE_EXTENSION.is_match(name)
}

pub fn is_image_content_type(content_type: Option<&str>) -> bool {
    content_type
        .map(|ct| ct.trim().to_ascii_lowercase().starts_with("image/"))
        .unwrap_or(false)
}

/// `{millis}_{basename}` with whitespace runs collapsed to `_`.
pub fn stored_file_name(original_name: &str, millis: i64) -> String {
    // Browsers on Windows may send a full path.
    let base = original_name
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(original_name);
    let base = if base.is_empty() || base == "." || base == ".." {
        "upload"
    } else {
        base
    };
    format!("{}_{}", millis, WHITESPACE_RUN.replace_all(base, "_"))
}
