//! # Gazette Infrastructure
//!
//! Concrete implementations of the ports defined in `gazette-core`.
//! This crate contains the database, cache, and pub/sub integrations.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL persistence via SeaORM
//! - `redis` - Redis support for cache and pub/sub

pub mod cache;
pub mod database;
pub mod pubsub;

// Re-exports - In-Memory
pub use cache::InMemoryCache;
pub use pubsub::InMemoryPubSub;

pub use database::DatabaseConfig;

#[cfg(feature = "postgres")]
pub use database::{
    PostgresAppointmentRepository, PostgresAuthorRepository, PostgresCategoryRepository,
    PostgresCommentRepository, PostgresPostRepository, PostgresUserRepository, connect,
};

// Re-exports - Redis
#[cfg(feature = "redis")]
pub use cache::{RedisCache, RedisConfig};
#[cfg(feature = "redis")]
pub use pubsub::RedisPubSub;
