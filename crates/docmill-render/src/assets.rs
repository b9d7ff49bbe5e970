use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::error::AssetError;

/// A binary image asset encoded for inline embedding in an HTML document.
#[derive(Debug, Clone)]
pub struct EmbeddedAsset {
    media_type: &'static str,
    payload: String,
}

impl EmbeddedAsset {
    /// Read and encode an image file. The media type is derived from the
    /// file extension; anything outside the allow-list is rejected before
    /// the file is touched.
    pub async fn from_file(path: &Path) -> Result<Self, AssetError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        let Some(media_type) = media_type_for(&extension) else {
            return Err(AssetError::Unsupported { extension });
        };

        let bytes = tokio::fs::read(path).await.map_err(|source| AssetError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            media_type,
            payload: STANDARD.encode(bytes),
        })
    }

    pub fn media_type(&self) -> &str {
        self.media_type
    }

    /// `data:<mediaType>;base64,<payload>`
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.payload)
    }
}

fn media_type_for(extension: &str) -> Option<&'static str> {
    match extension {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "svg" => Some("image/svg+xml"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}
