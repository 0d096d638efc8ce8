use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity - an identity record on the site.
///
/// Users become content contributors through an [`super::Author`] row;
/// they also comment on posts and subscribe to categories directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Database identifier; `0` until first persisted.
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new, not-yet-persisted user.
    pub fn new(username: String, email: String) -> Self {
        Self {
            id: 0,
            username,
            email,
            created_at: Utc::now(),
        }
    }
}
