//! Scoring categories.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::i18n::Translate;

/// Lookup keys of the default categories, in sheet order.
pub const DEFAULT_CATEGORY_KEYS: [&str; 6] = [
    "categories.c1",
    "categories.c2",
    "categories.c3",
    "categories.c4",
    "categories.c5",
    "categories.c6",
];

/// One scoring dimension of the sheet, named by a string lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category {
    key: String,
}

impl Category {
    /// Create a category from its lookup key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// Lookup key of this category.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Display label, resolved through `strings`.
    #[must_use]
    pub fn label(&self, strings: &dyn Translate) -> String {
        strings.lookup(&self.key, &[])
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

/// The default category set.
#[must_use]
pub fn default_categories() -> Vec<Category> {
    DEFAULT_CATEGORY_KEYS.into_iter().map(Category::new).collect()
}
