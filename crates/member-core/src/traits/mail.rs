//! Email delivery port
//!
//! The notifier composes messages; an `EmailSender` only moves them to a
//! provider and reports what happened.

use async_trait::async_trait;
use thiserror::Error;

/// A composed email with plain-text and HTML alternatives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

/// Email delivery failures
#[derive(Debug, Error)]
pub enum MailError {
    #[error("Invalid address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Failed to build message: {0}")]
    Build(String),

    #[error("Provider rejected message: {0}")]
    Rejected(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

impl MailError {
    /// Get an error code string for diagnostics
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidAddress { .. } => "INVALID_ADDRESS",
            Self::Build(_) => "BUILD_FAILED",
            Self::Rejected(_) => "MESSAGE_REJECTED",
            Self::Transport(_) => "TRANSPORT_ERROR",
        }
    }

    /// Likely operator fix, for failures that usually have one
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Rejected(_) => Some("sender address may not be verified with the mail provider"),
            _ => None,
        }
    }
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Deliver a message, returning the provider's message id
    async fn send(&self, message: &EmailMessage) -> Result<String, MailError>;
}
