/// Inline image data
///
/// The self-describing image representation used across the app: raw
/// bytes plus a MIME type. This is what the uploader produces, what the
/// generation client sends and receives, and what export writes out.

use base64::{engine::general_purpose, Engine as _};

/// Upload MIME types the app accepts
pub const SUPPORTED_MIME_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/webp"];

/// An image held in memory with its MIME type
#[derive(Debug, Clone, PartialEq)]
pub struct InlineImage {
    /// MIME type, e.g. "image/png"
    pub mime_type: String,
    /// Raw (not base64) image bytes
    pub data: Vec<u8>,
}

impl InlineImage {
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        InlineImage {
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Encode as a `data:<mime>;base64,<payload>` URI
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            general_purpose::STANDARD.encode(&self.data)
        )
    }

    /// Parse a `data:<mime>;base64,<payload>` URI
    pub fn from_data_uri(uri: &str) -> Result<Self, String> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| "Not a data URI".to_string())?;

        let (mime_type, payload) = rest
            .split_once(";base64,")
            .ok_or_else(|| "Data URI is not base64-encoded".to_string())?;

        if mime_type.is_empty() {
            return Err("Data URI is missing its MIME type".to_string());
        }

        let data = general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| format!("Invalid base64 payload: {}", e))?;

        Ok(InlineImage::new(mime_type, data))
    }

    /// File extension matching the MIME type (defaults to "png")
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/jpeg" => "jpg",
            "image/webp" => "webp",
            _ => "png",
        }
    }

    /// Size of the raw image data in kilobytes
    pub fn size_kb(&self) -> usize {
        self.data.len() / 1024
    }
}

/// Whether a MIME type is accepted for upload
pub fn is_supported_mime(mime_type: &str) -> bool {
    SUPPORTED_MIME_TYPES.contains(&mime_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_uri_round_trip() {
        let image = InlineImage::new("image/png", vec![1, 2, 3, 250, 251]);
        let uri = image.to_data_uri();
        assert!(uri.starts_with("data:image/png;base64,"));

        let restored = InlineImage::from_data_uri(&uri).unwrap();
        assert_eq!(restored, image);
    }

    #[test]
    fn test_from_data_uri_rejects_garbage() {
        assert!(InlineImage::from_data_uri("http://example.com/a.png").is_err());
        assert!(InlineImage::from_data_uri("data:image/png,plain").is_err());
        assert!(InlineImage::from_data_uri("data:;base64,AAAA").is_err());
        assert!(InlineImage::from_data_uri("data:image/png;base64,!!!").is_err());
    }

    #[test]
    fn test_extension_mapping() {
        assert_eq!(InlineImage::new("image/png", vec![]).extension(), "png");
        assert_eq!(InlineImage::new("image/jpeg", vec![]).extension(), "jpg");
        assert_eq!(InlineImage::new("image/webp", vec![]).extension(), "webp");
        // Unknown types fall back to png
        assert_eq!(InlineImage::new("image/tiff", vec![]).extension(), "png");
    }

    #[test]
    fn test_supported_mime_types() {
        assert!(is_supported_mime("image/png"));
        assert!(is_supported_mime("image/jpeg"));
        assert!(is_supported_mime("image/webp"));
        assert!(!is_supported_mime("image/gif"));
        assert!(!is_supported_mime("application/pdf"));
    }
}
