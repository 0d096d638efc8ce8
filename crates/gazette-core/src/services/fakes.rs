//! In-memory port implementations backing the service tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Author, Comment, Post};
use crate::error::RepoError;
use crate::ports::{
    AuthorRepository, BaseRepository, Cache, CacheError, CommentRepository, MessageHandler,
    PostRepository, PubSub, PubSubError,
};

#[derive(Default)]
pub(crate) struct InMemoryPosts {
    rows: Mutex<HashMap<i64, Post>>,
    categories: Mutex<Vec<(i64, i64)>>,
    next_id: AtomicI64,
}

#[async_trait]
impl BaseRepository<Post, i64> for InMemoryPosts {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        Ok(self.rows.lock().await.get(&id).cloned())
    }

    async fn save(&self, mut entity: Post) -> Result<Post, RepoError> {
        if entity.id == 0 {
            entity.id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        }
        self.rows.lock().await.insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        self.rows
            .lock()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPosts {
    async fn find_by_author_id(&self, author_id: i64) -> Result<Vec<Post>, RepoError> {
        Ok(self
            .rows
            .lock()
            .await
            .values()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect())
    }

    async fn adjust_rating(&self, id: i64, delta: i32) -> Result<(), RepoError> {
        let mut rows = self.rows.lock().await;
        let post = rows.get_mut(&id).ok_or(RepoError::NotFound)?;
        post.rating += delta;
        Ok(())
    }

    async fn sum_ratings_by_author(&self, author_id: i64) -> Result<i64, RepoError> {
        Ok(self
            .rows
            .lock()
            .await
            .values()
            .filter(|p| p.author_id == author_id)
            .map(|p| i64::from(p.rating))
            .sum())
    }

    async fn attach_category(&self, post_id: i64, category_id: i64) -> Result<(), RepoError> {
        let mut links = self.categories.lock().await;
        if !links.contains(&(post_id, category_id)) {
            links.push((post_id, category_id));
        }
        Ok(())
    }

    async fn detach_category(&self, post_id: i64, category_id: i64) -> Result<(), RepoError> {
        self.categories
            .lock()
            .await
            .retain(|link| *link != (post_id, category_id));
        Ok(())
    }

    async fn category_ids(&self, post_id: i64) -> Result<Vec<i64>, RepoError> {
        Ok(self
            .categories
            .lock()
            .await
            .iter()
            .filter(|(p, _)| *p == post_id)
            .map(|(_, c)| *c)
            .collect())
    }
}

#[derive(Default)]
pub(crate) struct InMemoryComments {
    rows: Mutex<HashMap<i64, Comment>>,
    next_id: AtomicI64,
}

#[async_trait]
impl BaseRepository<Comment, i64> for InMemoryComments {
    async fn find_by_id(&self, id: i64) -> Result<Option<Comment>, RepoError> {
        Ok(self.rows.lock().await.get(&id).cloned())
    }

    async fn save(&self, mut entity: Comment) -> Result<Comment, RepoError> {
        if entity.id == 0 {
            entity.id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        }
        self.rows.lock().await.insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        self.rows
            .lock()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl CommentRepository for InMemoryComments {
    async fn find_by_post_id(&self, post_id: i64) -> Result<Vec<Comment>, RepoError> {
        Ok(self
            .rows
            .lock()
            .await
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn adjust_rating(&self, id: i64, delta: i32) -> Result<(), RepoError> {
        let mut rows = self.rows.lock().await;
        let comment = rows.get_mut(&id).ok_or(RepoError::NotFound)?;
        comment.rating += delta;
        Ok(())
    }

    async fn sum_ratings_by_user(&self, user_id: i64) -> Result<i64, RepoError> {
        Ok(self
            .rows
            .lock()
            .await
            .values()
            .filter(|c| c.user_id == user_id)
            .map(|c| i64::from(c.rating))
            .sum())
    }
}

#[derive(Default)]
pub(crate) struct InMemoryAuthors {
    rows: Mutex<HashMap<i64, Author>>,
    next_id: AtomicI64,
}

#[async_trait]
impl BaseRepository<Author, i64> for InMemoryAuthors {
    async fn find_by_id(&self, id: i64) -> Result<Option<Author>, RepoError> {
        Ok(self.rows.lock().await.get(&id).cloned())
    }

    async fn save(&self, mut entity: Author) -> Result<Author, RepoError> {
        if entity.id == 0 {
            entity.id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        }
        self.rows.lock().await.insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        self.rows
            .lock()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl AuthorRepository for InMemoryAuthors {
    async fn find_by_user_id(&self, user_id: i64) -> Result<Option<Author>, RepoError> {
        Ok(self
            .rows
            .lock()
            .await
            .values()
            .find(|a| a.user_id == user_id)
            .cloned())
    }

    async fn set_rating(&self, id: i64, rating: i64) -> Result<(), RepoError> {
        let mut rows = self.rows.lock().await;
        let author = rows.get_mut(&id).ok_or(RepoError::NotFound)?;
        author.rating = rating;
        Ok(())
    }
}

/// Plain map-backed cache; TTLs are ignored.
#[derive(Default)]
pub(crate) struct RecordingCache {
    store: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl Cache for RecordingCache {
    async fn get(&self, key: &str) -> Option<String> {
        self.store.lock().await.get(key).cloned()
    }

    async fn set(&self, key: &str, value: &str, _ttl: Option<Duration>) -> Result<(), CacheError> {
        self.store
            .lock()
            .await
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.lock().await.remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> bool {
        self.store.lock().await.contains_key(key)
    }
}

/// Bus that records every publish for later assertions.
#[derive(Default)]
pub(crate) struct RecordingBus {
    events: Mutex<Vec<(String, String)>>,
}

impl RecordingBus {
    pub(crate) async fn published(&self) -> Vec<(String, String)> {
        self.events.lock().await.clone()
    }
}

#[async_trait]
impl PubSub for RecordingBus {
    async fn publish(&self, channel: &str, message: &str) -> Result<(), PubSubError> {
        self.events
            .lock()
            .await
            .push((channel.to_owned(), message.to_owned()));
        Ok(())
    }

    async fn subscribe(&self, _channel: &str, _handler: MessageHandler) -> Result<(), PubSubError> {
        Ok(())
    }

    async fn unsubscribe(&self, _channel: &str) -> Result<(), PubSubError> {
        Ok(())
    }
}
