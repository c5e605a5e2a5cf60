//! Best-effort registration notifications
//!
//! A notification never fails the request that triggered it: every outcome,
//! including provider errors, comes back as a [`NotificationOutcome`].

mod message;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use member_common::NotificationConfig;
use member_core::entities::Member;
use member_core::{EmailSender, MailError};
use tokio::task::JoinHandle;
use tokio_util::task::TaskTracker;
use tracing::{info, instrument, warn};

pub use message::{admin_alert, submitter_confirmation};

/// Why a notification was not delivered
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error(transparent)]
    Mail(#[from] MailError),
}

/// What happened to a notification
#[derive(Debug)]
pub enum NotificationOutcome {
    /// Accepted by the provider
    Sent { recipient: String, message_id: String },
    /// Notifications are switched off
    Disabled,
    /// Delivery failed; already logged
    Failed(NotificationError),
}

impl NotificationOutcome {
    /// Check if the provider accepted the message
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent { .. })
    }
}

/// Composes and sends registration notifications
#[derive(Clone)]
pub struct Notifier {
    enabled: bool,
    sender_email: String,
    mailer: Arc<dyn EmailSender>,
    in_flight: TaskTracker,
}

impl Notifier {
    pub fn new(enabled: bool, sender_email: impl Into<String>, mailer: Arc<dyn EmailSender>) -> Self {
        Self {
            enabled,
            sender_email: sender_email.into(),
            mailer,
            in_flight: TaskTracker::new(),
        }
    }

    pub fn from_config(config: &NotificationConfig, mailer: Arc<dyn EmailSender>) -> Self {
        Self::new(config.enabled, config.sender_email.clone(), mailer)
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Notify about a newly registered member
    ///
    /// With a known submitter the confirmation goes to them; otherwise an
    /// alert goes to the configured admin address.
    #[instrument(skip(self, member, submitter), fields(member_id = %member.id))]
    pub async fn send_registration_notification(
        &self,
        member: &Member,
        submitter: Option<&str>,
    ) -> NotificationOutcome {
        if !self.enabled {
            info!("Notifications are disabled");
            return NotificationOutcome::Disabled;
        }

        let message = match submitter {
            Some(to) => submitter_confirmation(member, &self.sender_email, to),
            None => admin_alert(member, &self.sender_email),
        };

        match self.mailer.send(&message).await {
            Ok(message_id) => {
                info!(recipient = %message.to, message_id = %message_id, "Registration notification sent");
                NotificationOutcome::Sent {
                    recipient: message.to,
                    message_id,
                }
            }
            Err(e) => {
                match e.hint() {
                    Some(hint) => warn!(
                        error = %e,
                        code = e.code(),
                        hint,
                        "Failed to send registration notification"
                    ),
                    None => warn!(error = %e, code = e.code(), "Failed to send registration notification"),
                }
                NotificationOutcome::Failed(e.into())
            }
        }
    }

    /// Send the notification on a background task
    ///
    /// The caller can drop the handle; the send still completes, and
    /// [`Notifier::drain`] waits for it.
    pub fn dispatch(&self, member: Member, submitter: Option<String>) -> JoinHandle<NotificationOutcome> {
        let notifier = self.clone();
        self.in_flight.spawn(async move {
            notifier
                .send_registration_notification(&member, submitter.as_deref())
                .await
        })
    }

    /// Wait up to `timeout` for dispatched notifications to finish
    ///
    /// Returns `false` if some were still running when time ran out.
    pub async fn drain(&self, timeout: Duration) -> bool {
        self.in_flight.close();
        let pending = self.in_flight.len();
        if pending > 0 {
            info!(pending, "Waiting for in-flight notifications");
        }
        tokio::time::timeout(timeout, self.in_flight.wait()).await.is_ok()
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("enabled", &self.enabled)
            .field("sender_email", &self.sender_email)
            .field("in_flight", &self.in_flight.len())
            .finish_non_exhaustive()
    }
}
