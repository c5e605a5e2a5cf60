//! # member-db
//!
//! Database layer implementing the member repository with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementation
//! - Schema bootstrap and local sample data
//!
//! ## Usage
//!
//! ```rust,ignore
//! use member_common::{AppConfig, EnvCredentialProvider, CredentialProvider};
//! use member_db::{create_pool, ensure_schema, PgMemberRepository, PoolConfig};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::from_env()?;
//!     let credentials = EnvCredentialProvider::from_settings(&config.database)
//!         .database_credentials()
//!         .await?;
//!     let pool = create_pool(&PoolConfig::from_settings(&config.database, &credentials)?).await?;
//!     ensure_schema(&pool).await?;
//!     let member_repo = PgMemberRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;
pub mod schema;
pub mod seed;

// Re-export commonly used types
pub use pool::{create_pool, PgPool, PoolConfig};
pub use repositories::PgMemberRepository;
pub use schema::ensure_schema;
pub use seed::{sample_member, seed_sample_member, SAMPLE_MEMBER_ID};
