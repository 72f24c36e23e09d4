//! # Error Types Module
//!
//! This module defines the error types used throughout the thumbnail pipeline.
//! Each stage (configuration, prompt extraction, generation, delivery) owns
//! one error type so handlers can map failures to user-facing replies.

use std::time::Duration;

/// Number of body bytes rendered by [`GenerationError::body_preview`]
pub const BODY_PREVIEW_LEN: usize = 200;

/// Startup configuration errors; the process must not start when one occurs
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is absent or blank
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),
    /// A variable is present but cannot be used
    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// The user supplied no prompt text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("prompt is empty")]
pub struct EmptyPromptError;

/// Failures while turning a prompt into an annotated image
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Transport-level failure talking to the inference service
    #[error("inference request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The inference call did not complete within the configured bound
    #[error("inference request timed out after {0:?}")]
    Timeout(Duration),
    /// The response body was not a decodable image
    #[error("inference response (status {status}, {} bytes) is not a decodable image: {source}", .body.len())]
    DecodeFailed {
        status: u16,
        body: Vec<u8>,
        #[source]
        source: image::ImageError,
    },
}

impl GenerationError {
    /// Lossy UTF-8 preview of the raw response for diagnostics
    pub fn body_preview(&self) -> Option<String> {
        match self {
            GenerationError::DecodeFailed { body, .. } => {
                let end = body.len().min(BODY_PREVIEW_LEN);
                Some(String::from_utf8_lossy(&body[..end]).into_owned())
            }
            _ => None,
        }
    }
}

/// Failures while staging or sending the finished image
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
    #[error("failed to stage image file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to send photo: {0}")]
    Send(#[from] teloxide::RequestError),
}
