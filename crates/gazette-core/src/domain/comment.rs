use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Comment entity - a user's remark on a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub body: String,
    /// Popularity counter, moved by exactly ±1 per like/dislike.
    pub rating: i32,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(post_id: i64, user_id: i64, body: String) -> Self {
        Self {
            id: 0,
            post_id,
            user_id,
            body,
            rating: 0,
            created_at: Utc::now(),
        }
    }
}
