//! # Configuration Module
//!
//! Process-wide, read-only configuration loaded once at startup from the
//! environment and handed explicitly to the components that need it.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;

use crate::errors::ConfigError;

// Constants for inference configuration
pub const DEFAULT_INFERENCE_BASE_URL: &str = "https://api-inference.huggingface.co";
pub const DEFAULT_INFERENCE_MODEL: &str = "CompVis/stable-diffusion-v-1-4-original";
pub const DEFAULT_INFERENCE_TIMEOUT_SECS: u64 = 120;

/// Credentials and endpoint for the image-generation service
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    /// Bearer token sent with every inference request
    pub api_token: String,
    /// Service root, e.g. `https://api-inference.huggingface.co`
    pub base_url: Url,
    /// Model identifier appended to `/models/`
    pub model: String,
    /// Upper bound for a single inference call
    pub timeout: Duration,
}

impl InferenceConfig {
    /// Full endpoint URL for the configured model
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}",
            self.base_url.as_str().trim_end_matches('/'),
            self.model
        )
    }
}

/// Telegram connection settings
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    /// Accepted for compatibility; not used for access control
    pub admin_id: Option<String>,
    /// Bot API override (TELEGRAM_API_URL)
    pub api_url: Option<Url>,
}

/// Complete bot configuration
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub telegram: TelegramConfig,
    pub inference: InferenceConfig,
    /// Directory for per-request staging files
    pub staging_dir: PathBuf,
    /// Emit JSON log lines instead of plain text
    pub json_logs: bool,
}

impl BotConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let bot_token = var("CHAT_BOT_TOKEN")
            .or_else(|| var("TELEGRAM_BOT_TOKEN"))
            .ok_or(ConfigError::Missing("CHAT_BOT_TOKEN"))?;
        let api_token = var("INFERENCE_API_TOKEN")
            .or_else(|| var("HUGGINGFACE_API_TOKEN"))
            .ok_or(ConfigError::Missing("INFERENCE_API_TOKEN"))?;

        let base_url = parse_url(
            "INFERENCE_BASE_URL",
            &var("INFERENCE_BASE_URL").unwrap_or_else(|| DEFAULT_INFERENCE_BASE_URL.to_string()),
        )?;
        let api_url = var("TELEGRAM_API_URL")
            .map(|raw| parse_url("TELEGRAM_API_URL", &raw))
            .transpose()?;

        let timeout_secs = match var("INFERENCE_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|e| ConfigError::Invalid {
                name: "INFERENCE_TIMEOUT_SECS",
                reason: format!("{raw:?} is not a number of seconds ({e})"),
            })?,
            None => DEFAULT_INFERENCE_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                name: "INFERENCE_TIMEOUT_SECS",
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            telegram: TelegramConfig {
                bot_token,
                admin_id: var("ADMIN_ID"),
                api_url,
            },
            inference: InferenceConfig {
                api_token,
                base_url,
                model: var("INFERENCE_MODEL").unwrap_or_else(|| DEFAULT_INFERENCE_MODEL.to_string()),
                timeout: Duration::from_secs(timeout_secs),
            },
            staging_dir: var("STAGING_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(std::env::temp_dir),
            json_logs: json_logs_requested(&lookup),
        })
    }
}

/// Whether `LOG_FORMAT` asks for JSON logs.
///
/// Read on its own so logging can start before the rest of the
/// configuration is validated.
pub fn json_logs_requested<F>(lookup: &F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    lookup("LOG_FORMAT").is_some_and(|f| f.trim().eq_ignore_ascii_case("json"))
}

fn parse_url(name: &'static str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::Invalid {
        name,
        reason: format!("{raw:?} is not a valid URL ({e})"),
    })
}
