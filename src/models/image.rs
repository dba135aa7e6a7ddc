use crate::error::{CreatorError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerateImageRequest {
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerateImageResponse {
    pub photo: String, // Base64 encoded
}

/// A decoded image together with its MIME type.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageData {
    /// Checks that `payload` is valid base64 and wraps it as `data:<mime>;base64,<payload>`.
    ///
    /// The payload is kept as sent so the data URI stays byte-identical to what the
    /// generation service returned.
    pub fn wrap_base64(mime: &str, payload: &str) -> Result<String> {
        let payload = payload.trim();
        if payload.is_empty() {
            return Err(CreatorError::DecodeError("empty image payload".into()));
        }
        STANDARD
            .decode(payload)
            .map_err(|e| CreatorError::DecodeError(e.to_string()))?;

        Ok(format!("data:{};base64,{}", mime, payload))
    }

    pub fn from_data_uri(uri: &str) -> Result<Self> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| CreatorError::DecodeError("not a data URI".into()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| CreatorError::DecodeError("data URI has no payload".into()))?;
        let mime = header
            .strip_suffix(";base64")
            .ok_or_else(|| CreatorError::DecodeError("data URI is not base64".into()))?;

        let bytes = STANDARD
            .decode(payload)
            .map_err(|e| CreatorError::DecodeError(e.to_string()))?;

        Ok(Self {
            mime: if mime.is_empty() {
                "text/plain".to_string()
            } else {
                mime.to_string()
            },
            bytes,
        })
    }

    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }

    pub fn extension(&self) -> &'static str {
        match self.mime.as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/png" => "png",
            "image/webp" => "webp",
            "image/gif" => "gif",
            _ => "bin",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_base64() {
        let uri = ImageData::wrap_base64("image/jpeg", "abcd").unwrap();
        assert_eq!(uri, "data:image/jpeg;base64,abcd");
    }

    #[test]
    fn test_wrap_rejects_garbage() {
        assert!(matches!(
            ImageData::wrap_base64("image/jpeg", "not base64!"),
            Err(CreatorError::DecodeError(_))
        ));
        assert!(matches!(
            ImageData::wrap_base64("image/jpeg", "   "),
            Err(CreatorError::DecodeError(_))
        ));
    }

    #[test]
    fn test_parse_data_uri() {
        let image = ImageData::from_data_uri("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(image.mime, "image/png");
        assert_eq!(image.bytes, b"hello");
        assert_eq!(image.extension(), "png");
        assert_eq!(image.to_data_uri(), "data:image/png;base64,aGVsbG8=");
    }

    #[test]
    fn test_parse_rejects_non_base64_uri() {
        assert!(ImageData::from_data_uri("https://example.com/cat.jpg").is_err());
        assert!(ImageData::from_data_uri("data:image/png,raw").is_err());
        assert!(ImageData::from_data_uri("data:image/png;base64").is_err());
    }

    #[test]
    fn test_response_field_name() {
        let response: GenerateImageResponse =
            serde_json::from_str(r#"{"photo": "abcd"}"#).unwrap();
        assert_eq!(response.photo, "abcd");
        assert!(serde_json::from_str::<GenerateImageResponse>(r#"{"image": "abcd"}"#).is_err());
    }
}
