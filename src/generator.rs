//! # Image Generator Module
//!
//! Sends a prompt to the inference backend, decodes the returned bytes and
//! draws the caption overlay. Each call owns its image; nothing is shared
//! between requests.

use image::RgbaImage;
use std::time::Duration;
use tracing::{info, warn};

use crate::errors::GenerationError;
use crate::inference::InferenceBackend;
use crate::overlay::{draw_text, OverlayStyle, OVERLAY_TEXT};
use crate::prompt::Prompt;

/// Prompt-to-image pipeline over an inference backend
pub struct ImageGenerator<B> {
    backend: B,
    timeout: Duration,
    style: OverlayStyle,
}

impl<B: InferenceBackend> ImageGenerator<B> {
    pub fn new(backend: B, timeout: Duration) -> Self {
        Self {
            backend,
            timeout,
            style: OverlayStyle::default(),
        }
    }

    pub fn with_style(mut self, style: OverlayStyle) -> Self {
        self.style = style;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Generate one captioned image for `prompt`
    pub async fn generate(&self, prompt: &Prompt) -> Result<RgbaImage, GenerationError> {
        let reply = tokio::time::timeout(self.timeout, self.backend.infer(prompt))
            .await
            .map_err(|_| GenerationError::Timeout(self.timeout))??;

        let decoded = match image::load_from_memory(&reply.body) {
            Ok(decoded) => decoded,
            Err(source) => {
                let err = GenerationError::DecodeFailed {
                    status: reply.status,
                    body: reply.body,
                    source,
                };
                warn!(
                    error = %err,
                    body_preview = %err.body_preview().unwrap_or_default(),
                    "Inference response could not be decoded"
                );
                return Err(err);
            }
        };

        let mut image = decoded.to_rgba8();
        draw_text(&mut image, OVERLAY_TEXT, &self.style);

        info!(
            width = image.width(),
            height = image.height(),
            "Generated image with overlay"
        );
        Ok(image)
    }
}
