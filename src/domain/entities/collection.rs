//! Per-user recipe collections.

use std::fmt;

/// A list of recipes a user keeps. Each (user, recipe) pair is either
/// absent or present; there is no intermediate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecipeCollection {
    ShoppingCart,
    Favorites,
}

impl RecipeCollection {
    /// Backing table. Only ever one of two static names, never user input.
    pub fn table(self) -> &'static str {
        match self {
            Self::ShoppingCart => "shopping_cart",
            Self::Favorites => "favorites",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::ShoppingCart => "shopping cart",
            Self::Favorites => "favorites",
        }
    }
}

impl fmt::Display for RecipeCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_distinct() {
        assert_eq!(RecipeCollection::ShoppingCart.table(), "shopping_cart");
        assert_eq!(RecipeCollection::Favorites.table(), "favorites");
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(RecipeCollection::ShoppingCart.to_string(), "shopping cart");
    }
}
