use crate::error::PollError;
use async_trait::async_trait;

/// A sink that delivers plain-text messages to the configured chat.
///
/// Implementations return [`PollError::CantSend`] on any delivery failure.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_message(&self, text: &str) -> Result<(), PollError>;
}
