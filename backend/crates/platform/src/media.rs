//! Media Host Upload Client
//!
//! Client for the external media host that stores user-uploaded images.
//! Records referencing an uploaded image are only written after the host
//! has acknowledged the upload, so a failed upload aborts the whole
//! operation and leaves no partial record behind.

use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// Constants
// ============================================================================

/// Maximum accepted upload size (5 MiB)
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Accepted image MIME types
pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png", "image/gif"];

// ============================================================================
// Error Types
// ============================================================================

/// Media upload errors
#[derive(Debug, Error)]
pub enum MediaError {
    /// File type is not an accepted image type
    #[error("Only images are allowed (got {0})")]
    UnsupportedType(String),

    /// File exceeds the size limit
    #[error("File exceeds the {max} byte limit (got {actual})")]
    TooLarge { max: usize, actual: usize },

    /// The media host rejected or failed the upload
    #[error("Media host upload failed: {0}")]
    UploadFailed(String),
}

// ============================================================================
// Uploaded file
// ============================================================================

/// An in-memory file received from a client, validated for upload
#[derive(Debug, Clone)]
pub struct UploadedFile {
    bytes: Vec<u8>,
    filename: String,
    content_type: String,
}

impl UploadedFile {
    /// Validate and wrap a received file
    ///
    /// Rejects non-image MIME types and files over [`MAX_UPLOAD_BYTES`].
    pub fn new(
        bytes: Vec<u8>,
        filename: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Result<Self, MediaError> {
        let content_type = content_type.into();

        if !ALLOWED_IMAGE_TYPES.contains(&content_type.as_str()) {
            return Err(MediaError::UnsupportedType(content_type));
        }

        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(MediaError::TooLarge {
                max: MAX_UPLOAD_BYTES,
                actual: bytes.len(),
            });
        }

        Ok(Self {
            bytes,
            filename: filename.into(),
            content_type,
        })
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// ============================================================================
// Store trait + HTTP implementation
// ============================================================================

/// Trait for media storage backends
#[trait_variant::make(MediaStore: Send)]
pub trait LocalMediaStore {
    /// Upload a file, returning the hosted secure URL
    async fn upload(&self, file: &UploadedFile) -> Result<String, MediaError>;
}

/// Media host configuration
#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// Upload endpoint of the media host
    pub upload_url: String,
    /// Unsigned upload preset / folder identifier
    pub upload_preset: String,
}

/// HTTP client for the external media host
///
/// Sends the file as a multipart form (`file` + `upload_preset` parts) and
/// expects a JSON body carrying the hosted `secure_url`.
#[derive(Clone)]
pub struct HttpMediaHost {
    client: reqwest::Client,
    config: MediaConfig,
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
}

impl HttpMediaHost {
    pub fn new(config: MediaConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

impl MediaStore for HttpMediaHost {
    async fn upload(&self, file: &UploadedFile) -> Result<String, MediaError> {
        let part = reqwest::multipart::Part::bytes(file.bytes.clone())
            .file_name(file.filename.clone())
            .mime_str(&file.content_type)
            .map_err(|e| MediaError::UploadFailed(e.to_string()))?;

        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("upload_preset", self.config.upload_preset.clone());

        let response = self
            .client
            .post(&self.config.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| MediaError::UploadFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MediaError::UploadFailed(format!(
                "host returned status {}",
                response.status()
            )));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| MediaError::UploadFailed(e.to_string()))?;

        tracing::debug!(
            filename = %file.filename,
            url = %body.secure_url,
            "Uploaded file to media host"
        );

        Ok(body.secure_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_allowed_image_types() {
        for ty in ALLOWED_IMAGE_TYPES {
            assert!(UploadedFile::new(vec![0u8; 16], "a.png", *ty).is_ok());
        }
    }

    #[test]
    fn test_rejects_non_image_type() {
        let err = UploadedFile::new(vec![0u8; 16], "a.pdf", "application/pdf").unwrap_err();
        assert!(matches!(err, MediaError::UnsupportedType(_)));
    }

    #[test]
    fn test_rejects_oversized_file() {
        let err =
            UploadedFile::new(vec![0u8; MAX_UPLOAD_BYTES + 1], "big.png", "image/png").unwrap_err();
        assert!(matches!(err, MediaError::TooLarge { .. }));
    }

    #[test]
    fn test_boundary_size_accepted() {
        assert!(UploadedFile::new(vec![0u8; MAX_UPLOAD_BYTES], "ok.png", "image/png").is_ok());
    }
}
