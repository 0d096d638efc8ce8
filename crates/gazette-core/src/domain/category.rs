use std::fmt;

use serde::{Deserialize, Serialize};

/// Category entity - a named topic posts can be filed under.
///
/// Users subscribe to categories through a join table; the subscriber set
/// lives behind `CategoryRepository`, not on this struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    /// Unique across all categories.
    pub name: String,
}

impl Category {
    pub fn new(name: String) -> Self {
        Self { id: 0, name }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
