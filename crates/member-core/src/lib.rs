//! # member-core
//!
//! Domain layer containing the member entity, input sanitization rules,
//! and the ports (repository and email delivery) implemented by outer crates.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod sanitize;
pub mod traits;

// Re-export commonly used types at crate root
pub use entities::{Member, MemberFilter, NewMember};
pub use error::DomainError;
pub use sanitize::{
    sanitize_name, sanitize_phone_number, sanitize_string, validate_phone_number, PhoneRegion,
    PhoneRegionError, DEFAULT_MAX_LENGTH, NAME_MAX_LENGTH,
};
pub use traits::{EmailMessage, EmailSender, MailError, MemberRepository, RepoResult};
