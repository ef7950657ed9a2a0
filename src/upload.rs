//! Uploaded photo handling.
//!
//! Wraps the raw bytes of a user-selected file and encodes them as a base64
//! data URL for transport to the captioning service.

use crate::ai::mime;
use crate::{Error, Result};
use std::path::Path;

/// Raw bytes of a user-selected photo. Request-scoped; dropped once the
/// caption call completes.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    bytes: Vec<u8>,
}

impl UploadedImage {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        if bytes.is_empty() {
            return Err(Error::Generic("Selected file is empty".to_string()));
        }
        Ok(Self { bytes })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        tracing::debug!("Read {} bytes from {}", bytes.len(), path.display());
        Self::from_bytes(bytes)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Encode as a `data:<mime>;base64,<payload>` URL.
    pub fn to_data_url(&self) -> String {
        use base64::Engine as _;
        let mime = mime::detect_image_mime(&self.bytes);
        let encoded = base64::engine::general_purpose::STANDARD.encode(&self.bytes);
        format!("data:{};base64,{}", mime, encoded)
    }
}
