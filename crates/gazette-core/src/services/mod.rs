//! Application services - the site's operations composed from the ports.
//!
//! Infrastructure-free: everything here talks to trait objects, so the
//! services run identically against Postgres/Redis and the in-memory
//! implementations.

mod authors;
mod comments;
mod posts;

pub use authors::AuthorService;
pub use comments::CommentService;
pub use posts::{POST_INVALIDATION_CHANNEL, PostService};

#[cfg(test)]
pub(crate) mod fakes;
