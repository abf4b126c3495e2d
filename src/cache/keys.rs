//! Cache key definitions.

use std::fmt;

/// Slot holding the serialized list of every recipe.
pub const RECIPES_LIST_KEY: &str = "recipes-list";

/// Named cache slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Full recipe list as last materialized from the store.
    RecipesList,
}

impl CacheKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            CacheKey::RecipesList => RECIPES_LIST_KEY,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
