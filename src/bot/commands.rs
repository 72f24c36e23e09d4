//! Command set understood by the bot

use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "show the welcome message")]
    Start,
    #[command(description = "show available commands")]
    Help,
    #[command(description = "generate an image from a prompt")]
    Thumbnail(String),
    #[command(description = "same as /thumbnail")]
    Generate(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOT_NAME: &str = "thumbnail_bot";

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("/start", BOT_NAME).unwrap(), Command::Start);
        assert_eq!(Command::parse("/help", BOT_NAME).unwrap(), Command::Help);
        assert_eq!(
            Command::parse("/thumbnail a red fox", BOT_NAME).unwrap(),
            Command::Thumbnail("a red fox".to_string())
        );
        assert_eq!(
            Command::parse("/generate a red fox", BOT_NAME).unwrap(),
            Command::Generate("a red fox".to_string())
        );
    }

    #[test]
    fn test_parse_addressed_command() {
        assert_eq!(
            Command::parse("/thumbnail@thumbnail_bot sunset", BOT_NAME).unwrap(),
            Command::Thumbnail("sunset".to_string())
        );
        assert!(Command::parse("/unknown", BOT_NAME).is_err());
    }

    #[test]
    fn test_descriptions_list_every_command() {
        let text = Command::descriptions().to_string();
        for name in ["/start", "/help", "/thumbnail", "/generate"] {
            assert!(text.contains(name), "{name} missing from descriptions");
        }
    }
}
