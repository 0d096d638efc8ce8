//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod cache;
mod pubsub;
mod repository;

pub use cache::{Cache, CacheError};
pub use pubsub::{MessageHandler, PubSub, PubSubError, PubSubMessage};
pub use repository::{
    AppointmentRepository, AuthorRepository, BaseRepository, CategoryRepository, CommentRepository,
    PostRepository, UserRepository,
};
