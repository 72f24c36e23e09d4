//! # Delivery Module
//!
//! Stages a finished image as a uniquely named PNG file and uploads it to
//! the originating chat. The staging file is removed when its guard drops,
//! on success and on every error path.

use async_trait::async_trait;
use image::{ImageFormat, RgbaImage};
use std::path::{Path, PathBuf};
use teloxide::prelude::*;
use teloxide::types::InputFile;
use teloxide::RequestError;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::errors::DeliveryError;

/// Prefix of every staging file name
pub const STAGING_PREFIX: &str = "thumbnail-";
/// Name the photo is uploaded under
pub const PHOTO_FILE_NAME: &str = "thumbnail.png";

/// Outbound chat operations used by the handlers
#[async_trait]
pub trait ChatSender: Send + Sync {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<(), RequestError>;

    /// Upload the file at `photo` as a photo named `file_name`
    async fn send_photo(
        &self,
        chat_id: ChatId,
        photo: &Path,
        file_name: &str,
    ) -> Result<(), RequestError>;
}

#[async_trait]
impl ChatSender for Bot {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<(), RequestError> {
        self.send_message(chat_id, text).await?;
        Ok(())
    }

    async fn send_photo(
        &self,
        chat_id: ChatId,
        photo: &Path,
        file_name: &str,
    ) -> Result<(), RequestError> {
        let input = InputFile::file(photo.to_path_buf()).file_name(file_name.to_string());
        Requester::send_photo(self, chat_id, input).await?;
        Ok(())
    }
}

/// Directory where outgoing images are staged, one file per request
#[derive(Debug, Clone)]
pub struct StagingArea {
    dir: PathBuf,
}

impl StagingArea {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Write `image` as PNG to a fresh file; the file is deleted when the
    /// returned guard drops
    pub fn stage(&self, image: &RgbaImage) -> Result<NamedTempFile, DeliveryError> {
        let staged = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .suffix(".png")
            .tempfile_in(&self.dir)?;
        image.save_with_format(staged.path(), ImageFormat::Png)?;
        Ok(staged)
    }
}

/// Stage `image` and send it to `chat_id` as a photo
pub async fn deliver<S>(
    sender: &S,
    staging: &StagingArea,
    image: &RgbaImage,
    chat_id: ChatId,
    file_name: &str,
) -> Result<(), DeliveryError>
where
    S: ChatSender + ?Sized,
{
    let staged = staging.stage(image)?;
    debug!(
        chat_id = %chat_id,
        staged_path = %staged.path().display(),
        "Image staged for delivery"
    );

    sender.send_photo(chat_id, staged.path(), file_name).await?;

    let staged_path = staged.path().to_path_buf();
    if let Err(e) = staged.close() {
        warn!(staged_path = %staged_path.display(), error = %e, "Failed to remove staging file");
    }
    Ok(())
}
