//! Ports implemented by infrastructure crates

mod mail;
mod repositories;

pub use mail::{EmailMessage, EmailSender, MailError};
pub use repositories::{MemberRepository, RepoResult};
