//! Application state - shared across all handlers.

use std::sync::Arc;

use anyhow::Context;

use gazette_core::ports::{
    AppointmentRepository, AuthorRepository, Cache, CategoryRepository, CommentRepository,
    PostRepository, PubSub, UserRepository,
};
use gazette_core::services::{AuthorService, CommentService, PostService};
use gazette_infra::cache::{InMemoryCache, RedisCache};
use gazette_infra::database::{
    PostgresAppointmentRepository, PostgresAuthorRepository, PostgresCategoryRepository,
    PostgresCommentRepository, PostgresPostRepository, PostgresUserRepository, connect,
};
use gazette_infra::pubsub::{InMemoryPubSub, RedisPubSub};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub authors: Arc<dyn AuthorRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub appointments: Arc<dyn AppointmentRepository>,
    pub post_repo: Arc<dyn PostRepository>,
    pub comment_repo: Arc<dyn CommentRepository>,
    pub posts: Arc<PostService>,
    pub comments: Arc<CommentService>,
    pub author_ratings: Arc<AuthorService>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let cache = init_cache().await;
        let events = init_pubsub().await;

        let db_config = config
            .database
            .as_ref()
            .context("DATABASE_URL must be set")?;
        let db = connect(db_config).await?;

        let users: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(db.clone()));
        let authors: Arc<dyn AuthorRepository> =
            Arc::new(PostgresAuthorRepository::new(db.clone()));
        let categories: Arc<dyn CategoryRepository> =
            Arc::new(PostgresCategoryRepository::new(db.clone()));
        let appointments: Arc<dyn AppointmentRepository> =
            Arc::new(PostgresAppointmentRepository::new(db.clone()));
        let post_repo: Arc<dyn PostRepository> = Arc::new(PostgresPostRepository::new(db.clone()));
        let comment_repo: Arc<dyn CommentRepository> =
            Arc::new(PostgresCommentRepository::new(db.clone()));

        let posts = Arc::new(PostService::new(post_repo.clone(), cache, events));
        let comments = Arc::new(CommentService::new(comment_repo.clone()));
        let author_ratings = Arc::new(AuthorService::new(
            authors.clone(),
            post_repo.clone(),
            comment_repo.clone(),
        ));

        tracing::info!("Application state initialized");

        Ok(Self {
            users,
            authors,
            categories,
            appointments,
            post_repo,
            comment_repo,
            posts,
            comments,
            author_ratings,
        })
    }
}

/// Redis when `REDIS_URL` is set and reachable, in-memory otherwise.
async fn init_cache() -> Arc<dyn Cache> {
    if std::env::var("REDIS_URL").is_ok() {
        match RedisCache::from_env().await {
            Ok(redis) => return Arc::new(redis),
            Err(e) => {
                tracing::warn!("Redis cache unavailable ({e}); using in-memory cache");
            }
        }
    }
    Arc::new(InMemoryCache::new())
}

async fn init_pubsub() -> Arc<dyn PubSub> {
    if std::env::var("REDIS_URL").is_ok() {
        match RedisPubSub::from_env().await {
            Ok(redis) => return Arc::new(redis),
            Err(e) => {
                tracing::warn!("Redis pub/sub unavailable ({e}); using in-memory pub/sub");
            }
        }
    }
    Arc::new(InMemoryPubSub::default())
}
