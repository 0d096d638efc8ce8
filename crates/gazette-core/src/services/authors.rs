//! Author reputation service.

use std::sync::Arc;

use crate::domain::Author;
use crate::error::RepoError;
use crate::ports::{AuthorRepository, BaseRepository, CommentRepository, PostRepository};

/// Recomputes author reputation on demand.
///
/// The score is `3 x (sum of the author's post ratings) + (sum of their
/// user's comment ratings)`. Both sums coalesce to zero when the author
/// has no posts or no comments. The read-aggregate-write sequence is not
/// atomic and the stored score is stale until the next recomputation;
/// nothing enforces freshness.
pub struct AuthorService {
    authors: Arc<dyn AuthorRepository>,
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl AuthorService {
    pub fn new(
        authors: Arc<dyn AuthorRepository>,
        posts: Arc<dyn PostRepository>,
        comments: Arc<dyn CommentRepository>,
    ) -> Self {
        Self {
            authors,
            posts,
            comments,
        }
    }

    /// Recompute and persist the reputation score; returns the new value.
    pub async fn recompute_rating(&self, author_id: i64) -> Result<i64, RepoError> {
        let author = self
            .authors
            .find_by_id(author_id)
            .await?
            .ok_or(RepoError::NotFound)?;

        let post_sum = self.posts.sum_ratings_by_author(author.id).await?;
        let comment_sum = self.comments.sum_ratings_by_user(author.user_id).await?;

        let rating = Author::combined_rating(post_sum, comment_sum);
        self.authors.set_rating(author.id, rating).await?;

        tracing::debug!(author_id, post_sum, comment_sum, rating, "Recomputed author rating");
        Ok(rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Comment, Post, PostKind};
    use crate::services::fakes::{InMemoryAuthors, InMemoryComments, InMemoryPosts};

    async fn seeded_author(authors: &InMemoryAuthors, user_id: i64) -> Author {
        authors.save(Author::new(user_id)).await.unwrap()
    }

    async fn post_with_rating(posts: &InMemoryPosts, author_id: i64, rating: i32) {
        let mut post = Post::new(author_id, PostKind::Article, "t".to_owned(), "b".to_owned());
        post.rating = rating;
        posts.save(post).await.unwrap();
    }

    async fn comment_with_rating(comments: &InMemoryComments, user_id: i64, rating: i32) {
        let mut comment = Comment::new(1, user_id, "c".to_owned());
        comment.rating = rating;
        comments.save(comment).await.unwrap();
    }

    #[tokio::test]
    async fn recompute_weighs_post_sums_triple() {
        let authors = Arc::new(InMemoryAuthors::default());
        let posts = Arc::new(InMemoryPosts::default());
        let comments = Arc::new(InMemoryComments::default());
        let service = AuthorService::new(authors.clone(), posts.clone(), comments.clone());

        let author = seeded_author(&authors, 7).await;
        post_with_rating(&posts, author.id, 2).await;
        post_with_rating(&posts, author.id, 3).await;
        comment_with_rating(&comments, 7, 4).await;

        let rating = service.recompute_rating(author.id).await.unwrap();
        assert_eq!(rating, 3 * (2 + 3) + 4);

        let stored = authors.find_by_id(author.id).await.unwrap().unwrap();
        assert_eq!(stored.rating, 19);
    }

    #[tokio::test]
    async fn recompute_with_no_posts_and_no_comments_is_zero() {
        let authors = Arc::new(InMemoryAuthors::default());
        let posts = Arc::new(InMemoryPosts::default());
        let comments = Arc::new(InMemoryComments::default());
        let service = AuthorService::new(authors.clone(), posts, comments);

        let author = seeded_author(&authors, 7).await;

        // The empty case coalesces to zero instead of failing.
        assert_eq!(service.recompute_rating(author.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn recompute_only_counts_the_authors_own_rows() {
        let authors = Arc::new(InMemoryAuthors::default());
        let posts = Arc::new(InMemoryPosts::default());
        let comments = Arc::new(InMemoryComments::default());
        let service = AuthorService::new(authors.clone(), posts.clone(), comments.clone());

        let author = seeded_author(&authors, 7).await;
        let other = seeded_author(&authors, 8).await;

        post_with_rating(&posts, author.id, 5).await;
        post_with_rating(&posts, other.id, 100).await;
        comment_with_rating(&comments, 7, 1).await;
        comment_with_rating(&comments, 8, 100).await;

        assert_eq!(service.recompute_rating(author.id).await.unwrap(), 16);
    }

    #[tokio::test]
    async fn recompute_on_missing_author_is_not_found() {
        let service = AuthorService::new(
            Arc::new(InMemoryAuthors::default()),
            Arc::new(InMemoryPosts::default()),
            Arc::new(InMemoryComments::default()),
        );

        assert!(matches!(
            service.recompute_rating(404).await,
            Err(RepoError::NotFound)
        ));
    }
}
