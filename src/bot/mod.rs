//! Bot module for handling Telegram interactions
//!
//! This module is split into two submodules:
//! - `commands`: the command set registered with Telegram
//! - `handlers`: greeting, help and the prompt-to-image flow

pub mod commands;
pub mod handlers;

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::{debug, info, warn};

use crate::config::{BotConfig, TelegramConfig};
use crate::delivery::{ChatSender, StagingArea};
use crate::generator::ImageGenerator;
use crate::inference::{HuggingFaceClient, InferenceBackend};

pub use commands::Command;
pub use handlers::{generate, greet, help, GenerateOutcome};

/// Shared, read-only state handed to every command handler
pub struct AppState<B = HuggingFaceClient> {
    pub generator: ImageGenerator<B>,
    pub staging: StagingArea,
}

impl AppState<HuggingFaceClient> {
    pub fn from_config(config: &BotConfig) -> Result<Self> {
        let client = HuggingFaceClient::new(&config.inference)?;
        info!(endpoint = %client.endpoint(), "Inference client ready");
        Ok(Self {
            generator: ImageGenerator::new(client, config.inference.timeout),
            staging: StagingArea::new(&config.staging_dir),
        })
    }
}

/// Build the Telegram client, honoring an API URL override
pub fn build_bot(config: &TelegramConfig) -> Bot {
    let bot = Bot::new(&config.bot_token);
    match &config.api_url {
        Some(url) => bot.set_api_url(url.clone()),
        None => bot,
    }
}

/// Dispatch one parsed command to its handler
pub async fn route<S, B>(
    sender: &S,
    state: &AppState<B>,
    chat_id: ChatId,
    cmd: Command,
    language_code: Option<&str>,
) -> Result<()>
where
    S: ChatSender + ?Sized,
    B: InferenceBackend,
{
    debug!(chat_id = %chat_id, command = ?cmd, "Received command");

    match cmd {
        Command::Start => greet(sender, chat_id, language_code).await?,
        Command::Help => help(sender, chat_id, language_code).await?,
        Command::Thumbnail(args) | Command::Generate(args) => {
            let outcome = generate(
                sender,
                &state.generator,
                &state.staging,
                chat_id,
                &args,
                language_code,
            )
            .await?;
            debug!(chat_id = %chat_id, outcome = ?outcome, "Generate command finished");
        }
    }
    Ok(())
}

/// Dispatcher endpoint for parsed commands
pub async fn answer(bot: Bot, msg: Message, cmd: Command, state: Arc<AppState>) -> Result<()> {
    let language_code = msg
        .from
        .as_ref()
        .and_then(|user| user.language_code.as_deref());

    route(&bot, state.as_ref(), msg.chat.id, cmd, language_code).await
}

/// Register commands and poll for updates until Ctrl-C
pub async fn run(bot: Bot, state: Arc<AppState>) -> Result<()> {
    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %e, "Failed to register bot commands");
    }

    let handler = Update::filter_message()
        .filter_command::<Command>()
        .endpoint(answer);

    info!("Bot initialized, starting dispatcher");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
