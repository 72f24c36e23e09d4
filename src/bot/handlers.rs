//! Command handlers: greeting, help and the prompt-to-image flow

use anyhow::Result;
use teloxide::types::ChatId;
use tracing::{debug, error, info, warn};

use crate::delivery::{deliver, ChatSender, StagingArea, PHOTO_FILE_NAME};
use crate::errors::GenerationError;
use crate::generator::ImageGenerator;
use crate::inference::InferenceBackend;
use crate::localization::{t_args_lang, t_lang};
use crate::prompt::{extract, tokenize};

/// How a generate command ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// The captioned image was sent to the chat
    Delivered,
    /// No prompt text; the user was asked for one
    EmptyPrompt,
    /// The inference call failed or returned something that is not an image
    GenerationFailed,
    /// The image was produced but could not be staged or sent
    DeliveryFailed,
}

/// Longest prompt excerpt quoted in the progress message
pub const PROGRESS_PREVIEW_CHARS: usize = 100;

/// Prompt excerpt for the progress message, cut at a char boundary
pub fn progress_preview(prompt: &str) -> String {
    if prompt.chars().count() <= PROGRESS_PREVIEW_CHARS {
        return prompt.to_string();
    }
    let mut preview: String = prompt.chars().take(PROGRESS_PREVIEW_CHARS).collect();
    preview.push('…');
    preview
}

/// Send the welcome message
pub async fn greet<S>(sender: &S, chat_id: ChatId, language_code: Option<&str>) -> Result<()>
where
    S: ChatSender + ?Sized,
{
    debug!(chat_id = %chat_id, "Sending welcome message");
    sender
        .send_text(chat_id, &t_lang("welcome", language_code))
        .await?;
    Ok(())
}

/// Send the list of commands
pub async fn help<S>(sender: &S, chat_id: ChatId, language_code: Option<&str>) -> Result<()>
where
    S: ChatSender + ?Sized,
{
    sender.send_text(chat_id, &t_lang("help", language_code)).await?;
    Ok(())
}

/// Generate a captioned image for the prompt in `args` and send it back.
///
/// Generation and delivery failures are answered with a chat message; only
/// a failure to send that message is returned as an error.
pub async fn generate<S, B>(
    sender: &S,
    generator: &ImageGenerator<B>,
    staging: &StagingArea,
    chat_id: ChatId,
    args: &str,
    language_code: Option<&str>,
) -> Result<GenerateOutcome>
where
    S: ChatSender + ?Sized,
    B: InferenceBackend,
{
    let prompt = match extract(tokenize(args)) {
        Ok(prompt) => prompt,
        Err(_) => {
            debug!(chat_id = %chat_id, "Generate command without prompt");
            sender
                .send_text(chat_id, &t_lang("prompt-required", language_code))
                .await?;
            return Ok(GenerateOutcome::EmptyPrompt);
        }
    };

    info!(chat_id = %chat_id, prompt_len = prompt.as_str().len(), "Generating image");
    let preview = progress_preview(prompt.as_str());
    if let Err(e) = sender
        .send_text(
            chat_id,
            &t_args_lang("generating", &[("prompt", preview.as_str())], language_code),
        )
        .await
    {
        warn!(chat_id = %chat_id, error = %e, "Failed to send progress message");
    }

    let image = match generator.generate(&prompt).await {
        Ok(image) => image,
        Err(e) => {
            error!(chat_id = %chat_id, error = %e, "Image generation failed");
            let key = match e {
                GenerationError::Timeout(_) => "error-generation-timeout",
                GenerationError::Request(_) | GenerationError::DecodeFailed { .. } => {
                    "error-generation-failed"
                }
            };
            sender.send_text(chat_id, &t_lang(key, language_code)).await?;
            return Ok(GenerateOutcome::GenerationFailed);
        }
    };

    if let Err(e) = deliver(sender, staging, &image, chat_id, PHOTO_FILE_NAME).await {
        warn!(chat_id = %chat_id, error = %e, "Image delivery failed");
        sender
            .send_text(chat_id, &t_lang("error-delivery-failed", language_code))
            .await?;
        return Ok(GenerateOutcome::DeliveryFailed);
    }

    info!(chat_id = %chat_id, "Image delivered");
    Ok(GenerateOutcome::Delivered)
}
