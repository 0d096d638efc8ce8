use serde::{Deserialize, Serialize};

/// Author entity - a user in their role as a content contributor.
///
/// Carries a derived reputation score that is only as fresh as the last
/// explicit recomputation (see `services::AuthorService::recompute_rating`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    pub id: i64,
    /// One-to-one link to the owning user.
    pub user_id: i64,
    pub rating: i64,
}

impl Author {
    pub fn new(user_id: i64) -> Self {
        Self {
            id: 0,
            user_id,
            rating: 0,
        }
    }

    /// Reputation formula: post ratings weigh three times comment ratings.
    pub fn combined_rating(post_rating_sum: i64, comment_rating_sum: i64) -> i64 {
        post_rating_sum * 3 + comment_rating_sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combined_rating_weighs_posts_triple() {
        assert_eq!(Author::combined_rating(4, 5), 17);
        assert_eq!(Author::combined_rating(0, 0), 0);
        assert_eq!(Author::combined_rating(-2, 1), -5);
    }
}
