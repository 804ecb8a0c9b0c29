use crate::TelegramNotifier;
use async_trait::async_trait;
use common::error::PollError;
use common::notify::Notifier;
use teloxide::prelude::*;
use teloxide::RequestError;
use tracing::{debug, error};

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send_message(&self, text: &str) -> Result<(), PollError> {
        match self.bot.send_message(self.recipient.clone(), text).await {
            Ok(_) => {
                debug!("Bot sent message \"{}\"", text);
                Ok(())
            }
            Err(e) => Err(classify(e)),
        }
    }
}

/// Log a failed `sendMessage` and turn it into a delivery failure.
fn classify(err: RequestError) -> PollError {
    match &err {
        RequestError::Api(api_err) => {
            error!(api_error = ?api_err, "Telegram API rejected the message: {}", err);
        }
        other => {
            error!(error = ?other, "Failed to reach Telegram: {}", err);
        }
    }
    PollError::CantSend(err.to_string())
}
