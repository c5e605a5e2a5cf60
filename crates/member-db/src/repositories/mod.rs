//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in member-core.

mod error;
mod member;

pub use error::{map_db_error, map_unique_violation};
pub use member::PgMemberRepository;
