use async_trait::async_trait;

use crate::domain::{Appointment, Author, Category, Comment, Post, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
///
/// `save` both creates and updates: an entity with id `0` has never been
/// persisted and is inserted under a fresh auto-increment key.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Dependent rows go with it via the
    /// schema's cascade rules.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository.
#[async_trait]
pub trait UserRepository: BaseRepository<User, i64> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}

/// Author repository.
#[async_trait]
pub trait AuthorRepository: BaseRepository<Author, i64> {
    async fn find_by_user_id(&self, user_id: i64) -> Result<Option<Author>, RepoError>;

    /// Persist a freshly recomputed reputation score.
    async fn set_rating(&self, id: i64, rating: i64) -> Result<(), RepoError>;
}

/// Category repository, including the subscriber join table.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, i64> {
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepoError>;

    async fn list(&self) -> Result<Vec<Category>, RepoError>;

    /// Add a user to the category's subscriber set. Idempotent.
    async fn subscribe(&self, category_id: i64, user_id: i64) -> Result<(), RepoError>;

    /// Remove a user from the category's subscriber set.
    async fn unsubscribe(&self, category_id: i64, user_id: i64) -> Result<(), RepoError>;

    async fn subscriber_ids(&self, category_id: i64) -> Result<Vec<i64>, RepoError>;
}

/// Post repository, including ratings and the category join table.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i64> {
    async fn find_by_author_id(&self, author_id: i64) -> Result<Vec<Post>, RepoError>;

    /// Move the rating by `delta` as a single in-database increment, so
    /// concurrent adjustments cannot lose updates. `RepoError::NotFound`
    /// if no such post exists.
    async fn adjust_rating(&self, id: i64, delta: i32) -> Result<(), RepoError>;

    /// Sum of all this author's post ratings; zero when they have none.
    async fn sum_ratings_by_author(&self, author_id: i64) -> Result<i64, RepoError>;

    /// File the post under a category. Idempotent.
    async fn attach_category(&self, post_id: i64, category_id: i64) -> Result<(), RepoError>;

    async fn detach_category(&self, post_id: i64, category_id: i64) -> Result<(), RepoError>;

    async fn category_ids(&self, post_id: i64) -> Result<Vec<i64>, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, i64> {
    async fn find_by_post_id(&self, post_id: i64) -> Result<Vec<Comment>, RepoError>;

    /// Same atomic increment semantics as `PostRepository::adjust_rating`.
    async fn adjust_rating(&self, id: i64, delta: i32) -> Result<(), RepoError>;

    /// Sum of all ratings on comments written by this user; zero when
    /// they have none.
    async fn sum_ratings_by_user(&self, user_id: i64) -> Result<i64, RepoError>;
}

/// Appointment repository - plain CRUD, no domain-specific queries.
#[async_trait]
pub trait AppointmentRepository: BaseRepository<Appointment, i64> {}
