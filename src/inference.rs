//! # Inference Client Module
//!
//! HTTP client for the remote text-to-image inference service. The service
//! takes `{"inputs": <prompt>}` with a bearer token and answers with raw
//! image bytes on success.

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::InferenceConfig;
use crate::errors::GenerationError;
use crate::prompt::Prompt;

/// Status and body of one inference call, before any decoding
#[derive(Debug, Clone)]
pub struct InferenceReply {
    pub status: u16,
    pub body: Vec<u8>,
}

/// A service that turns a prompt into image bytes
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    async fn infer(&self, prompt: &Prompt) -> Result<InferenceReply, GenerationError>;
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

/// Inference API client authenticated with a bearer token
#[derive(Clone)]
pub struct HuggingFaceClient {
    http: reqwest::Client,
    endpoint: String,
    api_token: String,
    timeout: Duration,
}

impl HuggingFaceClient {
    pub fn new(config: &InferenceConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            endpoint: config.endpoint(),
            api_token: config.api_token.clone(),
            timeout: config.timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl InferenceBackend for HuggingFaceClient {
    #[tracing::instrument(skip_all, fields(endpoint = %self.endpoint))]
    async fn infer(&self, prompt: &Prompt) -> Result<InferenceReply, GenerationError> {
        info!(
            prompt_preview = %prompt.as_str().chars().take(100).collect::<String>(),
            api_token = %mask_token(&self.api_token),
            "Sending inference request"
        );

        let map_err = |e: reqwest::Error| {
            if e.is_timeout() {
                GenerationError::Timeout(self.timeout)
            } else {
                GenerationError::Request(e)
            }
        };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_token)
            .json(&InferenceRequest {
                inputs: prompt.as_str(),
            })
            .send()
            .await
            .map_err(map_err)?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(map_err)?.to_vec();

        debug!(status, bytes = body.len(), "Inference response received");

        Ok(InferenceReply { status, body })
    }
}

/// Mask a secret for logging: keep a short prefix and suffix only
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 11 {
        return "***".to_string();
    }
    let head: String = chars[..7].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}***{tail}")
}
