//! Post service - owns the write path and its cache invalidation.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::Post;
use crate::error::RepoError;
use crate::ports::{BaseRepository, Cache, PostRepository, PubSub};

/// Channel carrying post cache-invalidation events.
pub const POST_INVALIDATION_CHANNEL: &str = "posts.invalidated";

/// TTL for cached post renderings; writes drop the entry sooner.
const CACHE_TTL: Duration = Duration::from_secs(300);

/// Coordinates the post repository with the cache and the event bus.
///
/// Every successful write (create, update, like, dislike, delete) deletes
/// the `post-{id}` cache entry and publishes an invalidation event, so
/// readers recompute on their next access.
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    cache: Arc<dyn Cache>,
    events: Arc<dyn PubSub>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>, cache: Arc<dyn Cache>, events: Arc<dyn PubSub>) -> Self {
        Self {
            posts,
            cache,
            events,
        }
    }

    /// Read through the cache: a hit deserializes the stored entry, a miss
    /// loads from the repository and fills it.
    pub async fn get(&self, id: i64) -> Result<Option<Post>, RepoError> {
        let key = Post::cache_key_for(id);

        if let Some(cached) = self.cache.get(&key).await {
            match serde_json::from_str(&cached) {
                Ok(post) => return Ok(Some(post)),
                Err(e) => {
                    tracing::warn!(key = %key, "Dropping undecodable cache entry: {e}");
                }
            }
        }

        let Some(post) = self.posts.find_by_id(id).await? else {
            return Ok(None);
        };

        match serde_json::to_string(&post) {
            Ok(json) => {
                if let Err(e) = self.cache.set(&key, &json, Some(CACHE_TTL)).await {
                    tracing::warn!(key = %key, "Failed to fill post cache: {e}");
                }
            }
            Err(e) => tracing::warn!(key = %key, "Failed to serialize post for cache: {e}"),
        }

        Ok(Some(post))
    }

    /// Persist a post (create or update), then invalidate its cache entry.
    pub async fn save(&self, post: Post) -> Result<Post, RepoError> {
        let saved = self.posts.save(post).await?;
        self.invalidate(saved.id).await;
        Ok(saved)
    }

    pub async fn delete(&self, id: i64) -> Result<(), RepoError> {
        self.posts.delete(id).await?;
        self.invalidate(id).await;
        Ok(())
    }

    /// Raise the rating by one. Counts as a write.
    pub async fn like(&self, id: i64) -> Result<(), RepoError> {
        self.adjust_rating(id, 1).await
    }

    /// Lower the rating by one. Counts as a write.
    pub async fn dislike(&self, id: i64) -> Result<(), RepoError> {
        self.adjust_rating(id, -1).await
    }

    async fn adjust_rating(&self, id: i64, delta: i32) -> Result<(), RepoError> {
        self.posts.adjust_rating(id, delta).await?;
        self.invalidate(id).await;
        Ok(())
    }

    /// Invalidation is best-effort: a lost delete only delays freshness
    /// until the next write, so failures are logged, not surfaced.
    async fn invalidate(&self, id: i64) {
        let key = Post::cache_key_for(id);
        if let Err(e) = self.cache.delete(&key).await {
            tracing::warn!(key = %key, "Cache invalidation failed: {e}");
        }

        let payload = serde_json::json!({ "id": id }).to_string();
        if let Err(e) = self.events.publish(POST_INVALIDATION_CHANNEL, &payload).await {
            tracing::warn!(post_id = id, "Failed to publish invalidation event: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PostKind;
    use crate::services::fakes::{InMemoryPosts, RecordingBus, RecordingCache};

    fn service() -> (PostService, Arc<InMemoryPosts>, Arc<RecordingCache>, Arc<RecordingBus>) {
        let posts = Arc::new(InMemoryPosts::default());
        let cache = Arc::new(RecordingCache::default());
        let bus = Arc::new(RecordingBus::default());
        let service = PostService::new(posts.clone(), cache.clone(), bus.clone());
        (service, posts, cache, bus)
    }

    fn draft() -> Post {
        Post::new(1, PostKind::News, "headline".to_owned(), "body".to_owned())
    }

    #[tokio::test]
    async fn rating_moves_by_exactly_one_per_like_and_dislike() {
        let (service, posts, _, _) = service();
        let post = service.save(draft()).await.unwrap();

        for _ in 0..5 {
            service.like(post.id).await.unwrap();
        }
        for _ in 0..2 {
            service.dislike(post.id).await.unwrap();
        }

        let stored = posts.find_by_id(post.id).await.unwrap().unwrap();
        assert_eq!(stored.rating, 3);
    }

    #[tokio::test]
    async fn like_on_missing_post_is_not_found() {
        let (service, _, _, _) = service();
        assert!(matches!(service.like(999).await, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn save_drops_cache_entry_and_publishes_event() {
        let (service, _, cache, bus) = service();
        let post = service.save(draft()).await.unwrap();

        // Warm the cache, then write again.
        service.get(post.id).await.unwrap();
        assert!(cache.exists(&Post::cache_key_for(post.id)).await);

        let mut updated = post.clone();
        updated.title = "updated headline".to_owned();
        service.save(updated).await.unwrap();

        assert!(!cache.exists(&Post::cache_key_for(post.id)).await);
        let events = bus.published().await;
        let expected = serde_json::json!({ "id": post.id }).to_string();
        assert!(
            events
                .iter()
                .any(|(ch, msg)| ch == POST_INVALIDATION_CHANNEL && msg == &expected)
        );
    }

    #[tokio::test]
    async fn like_also_counts_as_a_write_for_invalidation() {
        let (service, _, cache, _) = service();
        let post = service.save(draft()).await.unwrap();

        service.get(post.id).await.unwrap();
        assert!(cache.exists(&Post::cache_key_for(post.id)).await);

        service.like(post.id).await.unwrap();
        assert!(!cache.exists(&Post::cache_key_for(post.id)).await);
    }

    #[tokio::test]
    async fn get_serves_the_cached_entry_once_filled() {
        let (service, posts, _, _) = service();
        let post = service.save(draft()).await.unwrap();

        // Fill the cache, then change the row behind the service's back.
        service.get(post.id).await.unwrap();
        posts.adjust_rating(post.id, 10).await.unwrap();

        // Stale by design: the cache entry is only dropped on a write
        // through the service.
        let cached = service.get(post.id).await.unwrap().unwrap();
        assert_eq!(cached.rating, 0);
    }
}
