//! SeaORM entities mirroring the persisted schema.

pub mod appointment;
pub mod author;
pub mod category;
pub mod category_subscription;
pub mod comment;
pub mod post;
pub mod post_category;
pub mod user;
