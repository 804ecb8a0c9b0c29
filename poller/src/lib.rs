//! Homework status notifier.
//!
//! Polls the review API for submissions whose status changed since the
//! cursor and relays each change to a Telegram chat.

pub mod api;
pub mod poller;
pub mod validate;
pub mod verdict;
