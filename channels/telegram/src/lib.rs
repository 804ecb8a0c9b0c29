pub mod send;

use common::config::{ChatTarget, Config};
use teloxide::types::Recipient;
use teloxide::prelude::*;
use thiserror::Error;
use tracing::info;

/// Failure to build the bot at startup. Always fatal.
#[derive(Debug, Error)]
pub enum NotifierInitError {
    #[error("malformed bot token (expected `<bot id>:<secret>`)")]
    MalformedToken,
    #[error("failed to build HTTP client for the bot: {0}")]
    Client(String),
}

/// Delivers notifications to a single Telegram chat.
pub struct TelegramNotifier {
    bot: Bot,
    recipient: Recipient,
}

impl TelegramNotifier {
    pub fn new(config: &Config) -> Result<Self, NotifierInitError> {
        validate_token(&config.telegram_token)?;

        let client = teloxide::net::default_reqwest_settings()
            .build()
            .map_err(|e| NotifierInitError::Client(e.to_string()))?;
        let bot = Bot::with_client(&config.telegram_token, client);

        info!(chat = %config.telegram_chat, "Telegram bot ready");
        Ok(Self {
            bot,
            recipient: recipient(&config.telegram_chat),
        })
    }
}

fn recipient(target: &ChatTarget) -> Recipient {
    match target {
        ChatTarget::Id(id) => Recipient::Id(ChatId(*id)),
        ChatTarget::Username(name) => Recipient::ChannelUsername(name.clone()),
    }
}

fn validate_token(token: &str) -> Result<(), NotifierInitError> {
    match token.split_once(':') {
        Some((id, secret))
            if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) && !secret.is_empty() =>
        {
            Ok(())
        }
        _ => Err(NotifierInitError::MalformedToken),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config_with_token(token: &str) -> Config {
        config_for(token, ChatTarget::Id(-100200300))
    }

    fn config_for(token: &str, chat: ChatTarget) -> Config {
        Config {
            practicum_token: "practicum".into(),
            telegram_token: token.into(),
            telegram_chat: chat,
            endpoint: common::config::DEFAULT_ENDPOINT.into(),
            retry_period: Duration::from_secs(600),
        }
    }

    #[test]
    fn test_validate_token() {
        assert!(validate_token("123456789:AAHdqTcvCH1vGWJxfSeofSAs0K5PALDsaw").is_ok());
        assert!(validate_token("no-colon").is_err());
        assert!(validate_token(":secret").is_err());
        assert!(validate_token("12ab:secret").is_err());
        assert!(validate_token("123456:").is_err());
    }

    #[test]
    fn test_malformed_token_is_fatal() {
        let err = TelegramNotifier::new(&config_with_token("not a token"))
            .err()
            .expect("construction must fail");
        assert!(matches!(err, NotifierInitError::MalformedToken));
    }

    #[test]
    fn test_builds_with_valid_token() {
        let notifier = TelegramNotifier::new(&config_with_token("42:secret")).unwrap();
        assert_eq!(notifier.recipient, Recipient::Id(ChatId(-100200300)));
    }

    #[test]
    fn test_channel_username_recipient() {
        let config = config_for("42:secret", ChatTarget::Username("@homework_feed".into()));
        let notifier = TelegramNotifier::new(&config).unwrap();
        assert_eq!(
            notifier.recipient,
            Recipient::ChannelUsername("@homework_feed".into())
        );
    }
}
