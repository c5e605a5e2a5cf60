//! Email delivery adapters

mod smtp;

pub use smtp::SmtpEmailSender;
