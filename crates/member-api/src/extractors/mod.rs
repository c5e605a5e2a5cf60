//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, and query/path parsing.

mod auth;
mod path;
mod query;
mod validated;

pub use auth::{ApiKeyAuth, Submitter};
pub use path::UuidPath;
pub use query::{MemberQuery, MemberQueryParams};
pub use validated::ValidatedJson;
