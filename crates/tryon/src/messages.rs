//! Wire types for the try-on server's JSON API.

use serde::{Deserialize, Serialize};

use crate::error::TryOnError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TryOnMode {
    Single,
    Multiple,
}

/// Body of `POST /api/virtual-tryon`. Images are base64 without a data-URL prefix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TryOnRequest {
    pub user_image: String,
    pub clothing_images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    pub mode: TryOnMode,
}

impl TryOnRequest {
    /// Build a request; the mode follows the number of garments.
    pub fn new(user_image: String, clothing_images: Vec<String>, prompt: Option<String>) -> Self {
        let mode = if clothing_images.len() == 1 {
            TryOnMode::Single
        } else {
            TryOnMode::Multiple
        };
        Self {
            user_image,
            clothing_images,
            prompt: prompt.filter(|p| !p.trim().is_empty()),
            mode,
        }
    }

    pub fn validate(&self) -> Result<(), TryOnError> {
        if self.user_image.trim().is_empty() {
            return Err(TryOnError::InvalidRequest(
                "A photo of the user is required".into(),
            ));
        }
        if self.clothing_images.is_empty() {
            return Err(TryOnError::InvalidRequest(
                "At least one clothing image is required".into(),
            ));
        }
        Ok(())
    }
}

/// Response of `POST /api/virtual-tryon`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TryOnResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Server-side processing time in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_time: Option<f64>,
}

impl TryOnResponse {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            result_image: None,
            error: Some(error.into()),
            processing_time: None,
        }
    }
}

/// Response of `GET /health`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_follows_garment_count() {
        let one = TryOnRequest::new("u".into(), vec!["a".into()], None);
        assert_eq!(one.mode, TryOnMode::Single);
        let two = TryOnRequest::new("u".into(), vec!["a".into(), "b".into()], None);
        assert_eq!(two.mode, TryOnMode::Multiple);
    }

    #[test]
    fn request_serializes_wire_format() {
        let req = TryOnRequest::new("dXNlcg==".into(), vec!["c2hpcnQ=".into()], None);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["mode"], "single");
        assert_eq!(json["clothing_images"][0], "c2hpcnQ=");
        assert!(json.get("prompt").is_none());
    }

    #[test]
    fn blank_prompt_is_dropped() {
        let req = TryOnRequest::new("u".into(), vec!["a".into()], Some("  ".into()));
        assert!(req.prompt.is_none());
    }

    #[test]
    fn validation_requires_images() {
        assert!(TryOnRequest::new("".into(), vec!["a".into()], None).validate().is_err());
        assert!(TryOnRequest::new("u".into(), vec![], None).validate().is_err());
        assert!(TryOnRequest::new("u".into(), vec!["a".into()], None).validate().is_ok());
    }

    #[test]
    fn response_tolerates_missing_fields() {
        let resp: TryOnResponse = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert!(!resp.success);
        assert!(resp.error.is_none());
    }
}
