//! Shared test doubles for the inference backend and the chat transport.

#![allow(dead_code)]

use async_trait::async_trait;
use image::{DynamicImage, ImageOutputFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use teloxide::types::ChatId;
use teloxide::{ApiError, RequestError};

use thumbnail_bot::delivery::ChatSender;
use thumbnail_bot::errors::GenerationError;
use thumbnail_bot::inference::{InferenceBackend, InferenceReply};
use thumbnail_bot::prompt::Prompt;

pub const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
pub const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
pub const GREEN: Rgba<u8> = Rgba([0, 255, 0, 255]);
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// PNG bytes of a solid-color image
pub fn solid_png(width: u32, height: u32, color: Rgba<u8>) -> Vec<u8> {
    let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, color));
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
        .expect("encode test png");
    bytes
}

pub fn ok_reply(body: Vec<u8>) -> InferenceReply {
    InferenceReply { status: 200, body }
}

type Responder = Box<dyn Fn(&str) -> (InferenceReply, Duration) + Send + Sync>;

/// Inference backend answering from a closure and recording prompts
pub struct MockBackend {
    responder: Responder,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl MockBackend {
    /// Answer every prompt with the same reply, immediately
    pub fn replying(reply: InferenceReply) -> Self {
        Self::with_responder(move |_| (reply.clone(), Duration::ZERO))
    }

    /// Answer every prompt with the same reply after `delay`
    pub fn delayed(reply: InferenceReply, delay: Duration) -> Self {
        Self::with_responder(move |_| (reply.clone(), delay))
    }

    pub fn with_responder<F>(responder: F) -> Self
    where
        F: Fn(&str) -> (InferenceReply, Duration) + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl InferenceBackend for MockBackend {
    async fn infer(&self, prompt: &Prompt) -> Result<InferenceReply, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.as_str().to_string());
        let (reply, delay) = (self.responder)(prompt.as_str());
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        Ok(reply)
    }
}

/// One outbound chat operation seen by [`RecordingSender`]
#[derive(Debug, Clone)]
pub enum Sent {
    Text {
        chat_id: ChatId,
        text: String,
    },
    Photo {
        chat_id: ChatId,
        path: PathBuf,
        file_name: String,
        /// Image decoded from the staged file at send time
        image: RgbaImage,
    },
}

/// Chat sender that records everything it is asked to send
#[derive(Default)]
pub struct RecordingSender {
    sent: Mutex<Vec<Sent>>,
    fail_photos: bool,
    /// Texts longer than this many chars are rejected like the Bot API does
    text_limit: Option<usize>,
}

impl RecordingSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sender whose photo uploads are rejected by the API
    pub fn failing_photos() -> Self {
        Self {
            fail_photos: true,
            ..Self::default()
        }
    }

    /// A sender rejecting texts longer than `limit` chars
    pub fn with_text_limit(limit: usize) -> Self {
        Self {
            text_limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<(ChatId, String)> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Text { chat_id, text } => Some((chat_id, text)),
                Sent::Photo { .. } => None,
            })
            .collect()
    }

    pub fn photos(&self) -> Vec<(ChatId, PathBuf, String, RgbaImage)> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Photo {
                    chat_id,
                    path,
                    file_name,
                    image,
                } => Some((chat_id, path, file_name, image)),
                Sent::Text { .. } => None,
            })
            .collect()
    }
}

#[async_trait]
impl ChatSender for RecordingSender {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<(), RequestError> {
        if self.text_limit.is_some_and(|limit| text.chars().count() > limit) {
            return Err(RequestError::Api(ApiError::MessageIsTooLong));
        }
        self.sent.lock().unwrap().push(Sent::Text {
            chat_id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_photo(
        &self,
        chat_id: ChatId,
        photo: &Path,
        file_name: &str,
    ) -> Result<(), RequestError> {
        // Let concurrent requests interleave between staging and upload
        tokio::task::yield_now().await;

        if self.fail_photos {
            return Err(RequestError::Api(ApiError::BotBlocked));
        }

        let image = image::open(photo).expect("staged photo is readable").to_rgba8();
        self.sent.lock().unwrap().push(Sent::Photo {
            chat_id,
            path: photo.to_path_buf(),
            file_name: file_name.to_string(),
            image,
        });
        Ok(())
    }
}
