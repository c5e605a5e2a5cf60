//! SMTP delivery through `lettre`
//!
//! Works against any SMTP relay, including the SES SMTP interface.

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use member_core::{EmailMessage, EmailSender, MailError};
use tracing::{debug, instrument};

use crate::config::SmtpConfig;

/// `EmailSender` backed by a pooled async SMTP transport
#[derive(Clone)]
pub struct SmtpEmailSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpEmailSender {
    /// Build a transport from configuration
    ///
    /// Authenticated relays are reached over STARTTLS; without credentials
    /// the connection is plain (local catch-all servers).
    pub fn from_config(config: &SmtpConfig) -> Result<Self, MailError> {
        let transport = match (&config.username, &config.password) {
            (Some(username), Some(password)) => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                    .map_err(|e| MailError::Transport(e.to_string()))?
                    .port(config.port)
                    .credentials(Credentials::new(username.clone(), password.clone()))
                    .build()
            }
            _ => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
                .port(config.port)
                .build(),
        };

        Ok(Self { transport })
    }
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    #[instrument(skip(self, message), fields(subject = %message.subject))]
    async fn send(&self, message: &EmailMessage) -> Result<String, MailError> {
        let email = build_message(message)?;

        let response = self.transport.send(email).await.map_err(|e| {
            let status = e.status().map(|code| code.to_string());
            if is_transaction_refused(status.as_deref()) {
                MailError::Rejected(e.to_string())
            } else {
                MailError::Transport(e.to_string())
            }
        })?;

        let reply = response.message().collect::<Vec<_>>().join(" ");
        debug!(code = %response.code(), reply = %reply, "SMTP relay accepted message");
        Ok(reply)
    }
}

/// SMTP 554: the relay refused the whole transaction
///
/// SES answers this way for unverified senders and sandbox recipients.
fn is_transaction_refused(status: Option<&str>) -> bool {
    status == Some("554")
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address.parse().map_err(|e: lettre::address::AddressError| MailError::InvalidAddress {
        address: address.to_string(),
        reason: e.to_string(),
    })
}

fn build_message(message: &EmailMessage) -> Result<Message, MailError> {
    Message::builder()
        .from(parse_mailbox(&message.from)?)
        .to(parse_mailbox(&message.to)?)
        .subject(message.subject.as_str())
        .multipart(MultiPart::alternative_plain_html(
            message.text_body.clone(),
            message.html_body.clone(),
        ))
        .map_err(|e| MailError::Build(e.to_string()))
}
