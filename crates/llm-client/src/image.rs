//! Image payloads for multi-modal requests.

use anyhow::{bail, Context, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use std::path::Path;

/// Raw image bytes with their MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInput {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageInput {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Reads an image file; the MIME type is guessed from the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .to_string();
        if !mime_type.starts_with("image/") {
            bail!(
                "Unsupported image type {} for {}",
                mime_type,
                path.display()
            );
        }
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read image {}", path.display()))?;
        Ok(Self { mime_type, bytes })
    }

    /// Decodes base64 image data: either a `data:<mime>;base64,<data>` URL, or bare
    /// base64 with the MIME type given by `default_mime`.
    pub fn from_base64(data: &str, default_mime: &str) -> Result<Self> {
        let data = data.trim();
        let (mime_type, payload) = match data.strip_prefix("data:") {
            Some(rest) => {
                let (header, payload) = rest
                    .split_once(',')
                    .context("Malformed data URL: missing ','")?;
                let mime = header
                    .strip_suffix(";base64")
                    .context("Only base64 data URLs are supported")?;
                (mime.to_string(), payload)
            }
            None => (default_mime.to_string(), data),
        };
        let bytes = BASE64
            .decode(payload)
            .context("Invalid base64 image data")?;
        Ok(Self { mime_type, bytes })
    }

    /// `data:` URL accepted by OpenAI-compatible vision endpoints.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, BASE64.encode(&self.bytes))
    }
}
