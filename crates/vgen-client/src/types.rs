//! Service request/response types.

use std::path::Path;

use serde::{Deserialize, Serialize};
use validator::Validate;
use vgen_models::Style;

use crate::error::{ClientError, ClientResult};

/// Maximum number of product images the service accepts per request.
pub const MAX_IMAGES: usize = 3;

/// Request to generate a product video (`POST /api/videos`).
#[derive(Debug, Clone, Validate)]
pub struct CreateVideoRequest {
    /// Name of the product
    #[validate(length(min = 1, max = 255))]
    pub product_name: String,
    /// Description and key features
    pub product_description: Option<String>,
    /// Video style
    pub style: Style,
    /// Product images, sent as repeated `images` parts
    pub images: Vec<ImageUpload>,
}

impl CreateVideoRequest {
    pub fn new(product_name: impl Into<String>, style: Style) -> Self {
        Self {
            product_name: product_name.into(),
            product_description: None,
            style,
            images: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.product_description = Some(description.into());
        self
    }

    pub fn with_image(mut self, image: ImageUpload) -> Self {
        self.images.push(image);
        self
    }

    /// Run field validation plus the checks the derive cannot express.
    pub fn ensure_valid(&self) -> ClientResult<()> {
        self.validate()?;

        if self.product_name.trim().is_empty() {
            return Err(ClientError::invalid_request("Product name cannot be blank"));
        }

        if self.images.len() > MAX_IMAGES {
            return Err(ClientError::invalid_request(format!(
                "At most {} images are allowed, got {}",
                MAX_IMAGES,
                self.images.len()
            )));
        }

        if let Some(empty) = self.images.iter().find(|img| img.bytes.is_empty()) {
            return Err(ClientError::invalid_request(format!(
                "Image {} is empty",
                empty.file_name
            )));
        }

        Ok(())
    }
}

/// One image part of a create request.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Build an upload from raw bytes, inferring the content type from the file name.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name).to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    /// Read an image from disk.
    pub async fn from_path(path: impl AsRef<Path>) -> ClientResult<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| {
                ClientError::invalid_request(format!("Not a file path: {}", path.display()))
            })?;

        Ok(Self::new(file_name, bytes))
    }
}

/// MIME type for an image file name, by extension.
pub fn content_type_for(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: Option<String>,
}

impl HealthResponse {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy" || self.status == "ok"
    }
}

/// Error body returned by the service (`{"detail": "..."}`).
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: serde_json::Value,
}

impl ErrorBody {
    /// Extract a human-readable message from an error response body.
    ///
    /// Falls back to the raw body when it is not a `detail` document.
    pub(crate) fn message_from(body: &str) -> String {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(ErrorBody {
                detail: serde_json::Value::String(detail),
            }) => detail,
            Ok(ErrorBody { detail }) => detail.to_string(),
            Err(_) => body.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(name: &str) -> ImageUpload {
        ImageUpload::new(name, vec![0xFF, 0xD8, 0xFF])
    }

    #[test]
    fn test_content_type_inference() {
        assert_eq!(content_type_for("front.JPG"), "image/jpeg");
        assert_eq!(content_type_for("side.png"), "image/png");
        assert_eq!(content_type_for("top.webp"), "image/webp");
        assert_eq!(content_type_for("noext"), "application/octet-stream");
    }

    #[test]
    fn test_valid_request() {
        let request = CreateVideoRequest::new("Aroma Diffuser", Style::Tech)
            .with_description("300ml")
            .with_image(image("a.jpg"))
            .with_image(image("b.jpg"))
            .with_image(image("c.jpg"));
        assert!(request.ensure_valid().is_ok());
    }

    #[test]
    fn test_rejects_more_than_three_images() {
        let mut request = CreateVideoRequest::new("Aroma Diffuser", Style::Tech);
        for i in 0..=MAX_IMAGES {
            request = request.with_image(image(&format!("{}.jpg", i)));
        }
        match request.ensure_valid() {
            Err(ClientError::InvalidRequest(message)) => {
                assert_eq!(message, "At most 3 images are allowed, got 4")
            }
            other => panic!("Expected InvalidRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_empty_and_blank_names() {
        let request = CreateVideoRequest::new("", Style::Minimal);
        assert!(matches!(request.ensure_valid(), Err(ClientError::Validation(_))));

        let request = CreateVideoRequest::new("   ", Style::Minimal);
        assert!(matches!(request.ensure_valid(), Err(ClientError::InvalidRequest(_))));

        let request = CreateVideoRequest::new("x".repeat(256), Style::Minimal);
        assert!(request.ensure_valid().is_err());
    }

    #[test]
    fn test_rejects_empty_image() {
        let request = CreateVideoRequest::new("Lamp", Style::Minimal)
            .with_image(ImageUpload::new("empty.png", Vec::new()));
        assert!(matches!(request.ensure_valid(), Err(ClientError::InvalidRequest(_))));
    }

    #[test]
    fn test_error_body_message() {
        assert_eq!(ErrorBody::message_from(r#"{"detail": "Video not found"}"#), "Video not found");
        assert_eq!(ErrorBody::message_from("Bad Gateway"), "Bad Gateway");
    }
}
