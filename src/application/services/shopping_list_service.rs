//! Shopping list aggregation over a user's cart.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{CartIngredientLine, Principal};
use crate::domain::repositories::RecipeRepository;
use crate::error::AppError;

const HEADER: &str = "СПИСОК ПОКУПОК";
const RULE_WIDTH: usize = 30;

/// Total quantity of one ingredient across the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListItem {
    pub name: String,
    pub measurement_unit: String,
    pub total: i64,
}

/// Sums cart lines per `(name, unit)`, ordered by name then unit.
///
/// Amounts are widened to `i64` so long carts cannot overflow.
pub fn aggregate(lines: Vec<CartIngredientLine>) -> Vec<ShoppingListItem> {
    let mut totals: BTreeMap<(String, String), i64> = BTreeMap::new();

    for line in lines {
        *totals.entry((line.name, line.measurement_unit)).or_default() += i64::from(line.amount);
    }

    totals
        .into_iter()
        .map(|((name, measurement_unit), total)| ShoppingListItem {
            name,
            measurement_unit,
            total,
        })
        .collect()
}

/// Renders the downloadable plain-text list.
pub fn render_text(items: &[ShoppingListItem]) -> String {
    let mut out = String::new();
    out.push_str(HEADER);
    out.push('\n');
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');

    for item in items {
        out.push_str(&format!(
            "• {} ({}) — {}\n",
            item.name, item.measurement_unit, item.total
        ));
    }

    out
}

/// Builds shopping lists from the recipes in a user's cart.
///
/// Quantities of the same ingredient and unit are summed across recipes.
pub struct ShoppingListService<R: RecipeRepository> {
    recipes: Arc<R>,
}

impl<R: RecipeRepository> ShoppingListService<R> {
    /// Creates a new shopping list service.
    pub fn new(recipes: Arc<R>) -> Self {
        Self { recipes }
    }

    /// Aggregated ingredient totals for the principal's cart.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::EmptyCollection`] if the cart has no ingredients.
    pub async fn shopping_list(
        &self,
        principal: Principal,
    ) -> Result<Vec<ShoppingListItem>, AppError> {
        let lines = self
            .recipes
            .cart_ingredient_lines(principal.user_id)
            .await?;

        if lines.is_empty() {
            return Err(AppError::empty_collection(
                "Shopping cart is empty",
                json!({ "user_id": principal.user_id }),
            ));
        }

        let items = aggregate(lines);
        tracing::debug!(user_id = principal.user_id, items = items.len(), "Shopping list built");

        Ok(items)
    }

    /// The principal's shopping list as downloadable text.
    pub async fn shopping_list_text(&self, principal: Principal) -> Result<String, AppError> {
        let items = self.shopping_list(principal).await?;
        metrics::counter!("shopping_lists_downloaded_total").increment(1);

        Ok(render_text(&items))
    }
}
