//! Decoding the JSON request carrying a base64 image.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;
use tracing::warn;

use crate::error::{Error, Result};
use crate::raster::GrayRaster;

/// Request body: `{"imageBase64": "..."}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Payload {
    #[serde(rename = "imageBase64", default)]
    pub image_base64: String,
}

impl Payload {
    /// Parse a request body.
    ///
    /// Empty or malformed input gives an empty payload, which then fails
    /// image decoding.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::default();
        }
        serde_json::from_str(raw).unwrap_or_else(|err| {
            warn!(%err, "payload is not valid JSON");
            Self::default()
        })
    }
}

/// Decode base64 image data (optionally a `data:` URL) to grayscale.
pub fn decode_image(data: &str) -> Result<GrayRaster> {
    if data.is_empty() {
        return Err(Error::Decode("empty image data".into()));
    }
    // data:image/png;base64,<payload>
    let encoded = data.split_once(',').map_or(data, |(_, rest)| rest);

    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|e| Error::Decode(format!("invalid base64: {e}")))?;
    if bytes.is_empty() {
        return Err(Error::Decode("empty image data".into()));
    }

    let image = image::load_from_memory(&bytes).map_err(|e| Error::Decode(e.to_string()))?;
    if image.width() == 0 || image.height() == 0 {
        return Err(Error::Decode("image dimensions are zero".into()));
    }
    Ok(GrayRaster::from_luma(image.to_luma8()))
}
