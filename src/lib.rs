//! # Thumbnail Telegram Bot
//!
//! A Telegram bot that turns a text prompt into a generated image with a
//! short caption overlay, using a remote image-generation API.

pub mod bot;
pub mod config;
pub mod delivery;
pub mod errors;
pub mod generator;
pub mod inference;
pub mod localization;
pub mod overlay;
pub mod prompt;
