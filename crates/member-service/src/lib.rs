//! # member-service
//!
//! Application layer containing the member use cases, registration
//! notifications, and DTOs.

pub mod dto;
pub mod notifier;
pub mod services;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use notifier::{NotificationError, NotificationOutcome, Notifier};
pub use services::{MemberService, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult};
