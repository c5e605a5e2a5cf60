//! Input sanitization
//!
//! Turns untrusted text into bounded, markup-free values, and phone numbers
//! into canonical E.164 strings. Everything here is pure and deterministic.

mod phone;
mod text;

pub use phone::{sanitize_phone_number, validate_phone_number, PhoneRegion, PhoneRegionError};
pub use text::{sanitize_name, sanitize_string, DEFAULT_MAX_LENGTH, NAME_MAX_LENGTH};
