use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of characters shown in the on-site preview excerpt.
pub const PREVIEW_CHARS: usize = 123;

/// Number of characters shown in the email digest excerpt.
pub const EMAIL_PREVIEW_CHARS: usize = 50;

/// Kind tag distinguishing short news items from full articles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostKind {
    News,
    #[default]
    Article,
}

impl PostKind {
    /// Two-letter code stored in the database.
    pub fn code(self) -> &'static str {
        match self {
            PostKind::News => "NW",
            PostKind::Article => "AR",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "NW" => Some(PostKind::News),
            "AR" => Some(PostKind::Article),
            _ => None,
        }
    }
}

/// Post entity - a news item or article written by an author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub author_id: i64,
    pub kind: PostKind,
    pub title: String,
    pub body: String,
    /// Popularity counter, moved by exactly ±1 per like/dislike.
    pub rating: i32,
    /// Set once at creation, immutable afterwards.
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Create a new, not-yet-persisted post.
    pub fn new(author_id: i64, kind: PostKind, title: String, body: String) -> Self {
        Self {
            id: 0,
            author_id,
            kind,
            title,
            body,
            rating: 0,
            created_at: Utc::now(),
        }
    }

    /// Leading excerpt for listing pages: the first [`PREVIEW_CHARS`]
    /// characters of the body plus an ellipsis marker. No word-boundary
    /// awareness; a body shorter than the limit comes back whole.
    pub fn preview(&self) -> String {
        truncate_chars(&self.body, PREVIEW_CHARS)
    }

    /// Shorter excerpt used in notification emails.
    pub fn email_preview(&self) -> String {
        truncate_chars(&self.body, EMAIL_PREVIEW_CHARS)
    }

    /// Canonical site path for this post.
    pub fn permalink(&self) -> String {
        format!("/news/{}", self.id)
    }

    /// Cache key under which the rendered post is stored.
    pub fn cache_key(&self) -> String {
        Self::cache_key_for(self.id)
    }

    /// Cache key for a post id; shared by the read and invalidation paths.
    pub fn cache_key_for(id: i64) -> String {
        format!("post-{id}")
    }
}

fn truncate_chars(text: &str, limit: usize) -> String {
    // Char-wise, not byte-wise: slicing bytes would split multi-byte
    // code points.
    let mut excerpt: String = text.chars().take(limit).collect();
    excerpt.push_str("...");
    excerpt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_with_body(body: &str) -> Post {
        Post::new(1, PostKind::Article, "title".to_owned(), body.to_owned())
    }

    #[test]
    fn preview_truncates_long_body_to_exactly_123_chars() {
        let body = "x".repeat(200);
        let preview = post_with_body(&body).preview();

        assert_eq!(preview.chars().count(), PREVIEW_CHARS + 3);
        assert_eq!(&preview[..PREVIEW_CHARS], &body[..PREVIEW_CHARS]);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn preview_of_short_body_returns_everything_plus_ellipsis() {
        let preview = post_with_body("short body").preview();
        assert_eq!(preview, "short body...");
    }

    #[test]
    fn preview_does_not_split_multibyte_characters() {
        let body = "д".repeat(200);
        let preview = post_with_body(&body).preview();
        assert_eq!(preview.chars().count(), PREVIEW_CHARS + 3);
    }

    #[test]
    fn email_preview_truncates_to_50_chars() {
        let body = "y".repeat(80);
        let preview = post_with_body(&body).email_preview();
        assert_eq!(preview, format!("{}...", "y".repeat(50)));
    }

    #[test]
    fn kind_codes_round_trip() {
        assert_eq!(PostKind::News.code(), "NW");
        assert_eq!(PostKind::Article.code(), "AR");
        assert_eq!(PostKind::from_code("NW"), Some(PostKind::News));
        assert_eq!(PostKind::from_code("XX"), None);
    }

    #[test]
    fn permalink_uses_news_path() {
        let mut post = post_with_body("body");
        post.id = 42;
        assert_eq!(post.permalink(), "/news/42");
    }
}
