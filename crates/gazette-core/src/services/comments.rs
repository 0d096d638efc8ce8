//! Comment service.

use std::sync::Arc;

use crate::domain::Comment;
use crate::error::RepoError;
use crate::ports::{BaseRepository, CommentRepository};

/// Thin coordinator over the comment repository. Comments are not cached,
/// so unlike posts their writes carry no invalidation side effects.
pub struct CommentService {
    comments: Arc<dyn CommentRepository>,
}

impl CommentService {
    pub fn new(comments: Arc<dyn CommentRepository>) -> Self {
        Self { comments }
    }

    pub async fn save(&self, comment: Comment) -> Result<Comment, RepoError> {
        self.comments.save(comment).await
    }

    pub async fn list_for_post(&self, post_id: i64) -> Result<Vec<Comment>, RepoError> {
        self.comments.find_by_post_id(post_id).await
    }

    /// Raise the rating by one.
    pub async fn like(&self, id: i64) -> Result<(), RepoError> {
        self.comments.adjust_rating(id, 1).await
    }

    /// Lower the rating by one.
    pub async fn dislike(&self, id: i64) -> Result<(), RepoError> {
        self.comments.adjust_rating(id, -1).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fakes::InMemoryComments;

    #[tokio::test]
    async fn rating_after_likes_and_dislikes_matches_the_tally() {
        let comments = Arc::new(InMemoryComments::default());
        let service = CommentService::new(comments.clone());

        let comment = service
            .save(Comment::new(1, 7, "nice read".to_owned()))
            .await
            .unwrap();

        for _ in 0..4 {
            service.like(comment.id).await.unwrap();
        }
        service.dislike(comment.id).await.unwrap();

        let stored = comments.find_by_id(comment.id).await.unwrap().unwrap();
        assert_eq!(stored.rating, 3);
    }
}
