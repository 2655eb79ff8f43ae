//! Product categories.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The category a product is filed under.
///
/// The storefront ships with three known categories; anything else a
/// manifest names is kept verbatim as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Historical,
    Digital,
    Anime,
    Other(String),
}

impl Category {
    /// Parse a category name. Known names match case-insensitively; any
    /// other name keeps its casing, so filtering on it is exact.
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "historical" => Category::Historical,
            "digital" => Category::Digital,
            "anime" => Category::Anime,
            _ => Category::Other(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Category::Historical => "historical",
            Category::Digital => "digital",
            Category::Anime => "anime",
            Category::Other(name) => name,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Category::parse(&s)
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        c.as_str().to_string()
    }
}
