//! DTOs for tags and ingredients.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Ingredient, Tag};

#[derive(Debug, Clone, Serialize)]
pub struct TagView {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

impl From<Tag> for TagView {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
            slug: tag.slug,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IngredientView {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
}

impl From<Ingredient> for IngredientView {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            id: ingredient.id,
            name: ingredient.name,
            measurement_unit: ingredient.measurement_unit,
        }
    }
}

/// `?name=` prefix search on ingredients.
#[derive(Debug, Default, Deserialize)]
pub struct IngredientSearchParams {
    pub name: Option<String>,
}
