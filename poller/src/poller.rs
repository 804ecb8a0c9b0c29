//! Status poller — one tick fetches, validates and relays changes.
//!
//! Failures never leave a tick. Each one is logged, and its text is relayed
//! to the chat once; identical text is suppressed until a clean tick clears
//! the dedup set. When delivery itself fails the poller stops trying to
//! report anything until a clean tick.

use common::error::PollError;
use common::notify::Notifier;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::time::{self, Duration, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::api::StatusApi;
use crate::validate::{check_response, parse_record};
use crate::verdict::{as_text, parse_status};

/// Result of a single [`Poller::tick`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Clean iteration. `notified` status messages were delivered.
    Advanced { cursor: i64, notified: usize },
    /// Failure logged and relayed to the chat.
    Reported(String),
    /// Failure logged only: already relayed, or the channel is broken.
    Suppressed(String),
}

pub struct Poller {
    api: Arc<dyn StatusApi>,
    notifier: Arc<dyn Notifier>,
    cursor: i64,
    reported: HashSet<String>,
    cant_send: bool,
}

impl Poller {
    pub fn new(api: Arc<dyn StatusApi>, notifier: Arc<dyn Notifier>, cursor: i64) -> Self {
        Self {
            api,
            notifier,
            cursor,
            reported: HashSet::new(),
            cant_send: false,
        }
    }

    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    pub fn reported(&self) -> &HashSet<String> {
        &self.reported
    }

    pub fn cant_send(&self) -> bool {
        self.cant_send
    }

    /// Drive [`Poller::tick`] forever, one tick per `period`.
    pub async fn run(mut self, period: Duration) {
        info!(
            cursor = self.cursor,
            period_secs = period.as_secs(),
            "Poller starting"
        );

        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            let outcome = self.tick().await;
            debug!(?outcome, "Tick finished");
        }
    }

    /// Run one iteration.
    pub async fn tick(&mut self) -> TickOutcome {
        let err = match self.poll_once().await {
            Ok(notified) => {
                self.reported.clear();
                self.cant_send = false;
                return TickOutcome::Advanced {
                    cursor: self.cursor,
                    notified,
                };
            }
            Err(e) => e,
        };

        if err.is_delivery() {
            self.cant_send = true;
        }
        self.report(err.to_string()).await
    }

    async fn poll_once(&mut self) -> Result<usize, PollError> {
        let body = self.api.get_api_answer(self.cursor).await?;
        let response = check_response(&body)?;
        self.cursor = response.current_date;

        if response.homeworks.is_empty() {
            debug!(cursor = self.cursor, "No new statuses");
            return Ok(0);
        }

        for raw in &response.homeworks {
            let homework = parse_record(raw)?;
            let message = parse_status(&homework)?;
            debug!(
                homework = %homework.homework_name.as_ref().map(as_text).unwrap_or_default(),
                status = %homework.status.as_ref().map(as_text).unwrap_or_default(),
                "Status changed"
            );
            self.notifier.send_message(&message).await?;
        }

        Ok(response.homeworks.len())
    }

    async fn report(&mut self, message: String) -> TickOutcome {
        error!("{}", message);

        if self.cant_send || self.reported.contains(&message) {
            return TickOutcome::Suppressed(message);
        }

        match self.notifier.send_message(&message).await {
            Ok(()) => {
                self.reported.insert(message.clone());
                TickOutcome::Reported(message)
            }
            Err(e) => {
                warn!("Could not relay failure to chat: {}", e);
                self.cant_send = true;
                TickOutcome::Suppressed(message)
            }
        }
    }
}
