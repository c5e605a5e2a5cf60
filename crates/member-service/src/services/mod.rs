//! Business logic services
//!
//! Service layer implementations that validate input and orchestrate the
//! repository and notifier.

pub mod context;
pub mod error;
pub mod member;

pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use member::{MemberService, NO_MEMBERS_FOUND};
