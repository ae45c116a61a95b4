//! PostgreSQL implementation of recipe repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::{PgConnection, PgPool};
use std::sync::Arc;

use crate::domain::entities::{
    CartIngredientLine, Recipe, RecipeDraft, RecipeFilter, RecipeIngredient,
};
use crate::domain::repositories::RecipeRepository;
use crate::error::AppError;

const RECIPE_COLUMNS: &str = "r.id, r.author_id, r.name, r.text, r.image, r.cooking_time, r.pub_date";

/// Shared `WHERE` clause for listing and counting. Binds `$1..=$4`:
/// author id, tag slugs, favorited-by user id, in-cart-of user id.
const FILTER_CLAUSE: &str = r#"
    WHERE ($1::BIGINT IS NULL OR r.author_id = $1)
      AND (CARDINALITY($2::TEXT[]) = 0 OR EXISTS (
            SELECT 1 FROM recipe_tags rt
            JOIN tags t ON t.id = rt.tag_id
            WHERE rt.recipe_id = r.id AND t.slug = ANY($2)))
      AND ($3::BIGINT IS NULL OR EXISTS (
            SELECT 1 FROM favorites f
            WHERE f.recipe_id = r.id AND f.user_id = $3))
      AND ($4::BIGINT IS NULL OR EXISTS (
            SELECT 1 FROM shopping_cart c
            WHERE c.recipe_id = r.id AND c.user_id = $4))
"#;

/// PostgreSQL repository for the recipe aggregate.
///
/// Recipe rows, `recipe_tags` and `recipe_ingredients` are written in one
/// transaction. Duplicate ingredient lines are rejected by the
/// `unique_ingredient_in_recipe` constraint.
pub struct PgRecipeRepository {
    pool: Arc<PgPool>,
}

impl PgRecipeRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

/// Inserts tag links and ingredient lines for `recipe_id`.
async fn insert_relations(
    conn: &mut PgConnection,
    recipe_id: i64,
    draft: &RecipeDraft,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO recipe_tags (recipe_id, tag_id)
        SELECT $1, tag_id FROM UNNEST($2::BIGINT[]) AS tag_id
        "#,
    )
    .bind(recipe_id)
    .bind(&draft.tags)
    .execute(&mut *conn)
    .await?;

    let (ingredient_ids, amounts): (Vec<i64>, Vec<i32>) = draft
        .ingredients
        .iter()
        .map(|line| (line.ingredient_id, line.amount))
        .unzip();

    sqlx::query(
        r#"
        INSERT INTO recipe_ingredients (recipe_id, ingredient_id, amount)
        SELECT $1, line.ingredient_id, line.amount
        FROM UNNEST($2::BIGINT[], $3::INTEGER[]) WITH ORDINALITY
             AS line(ingredient_id, amount, position)
        ORDER BY line.position
        "#,
    )
    .bind(recipe_id)
    .bind(&ingredient_ids)
    .bind(&amounts)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

#[async_trait]
impl RecipeRepository for PgRecipeRepository {
    async fn create(&self, author_id: i64, draft: RecipeDraft) -> Result<Recipe, AppError> {
        let mut tx = self.pool.begin().await?;

        let recipe = sqlx::query_as::<_, Recipe>(&format!(
            r#"
            INSERT INTO recipes AS r (author_id, name, text, image, cooking_time)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {RECIPE_COLUMNS}
            "#
        ))
        .bind(author_id)
        .bind(&draft.name)
        .bind(&draft.text)
        .bind(&draft.image)
        .bind(draft.cooking_time)
        .fetch_one(&mut *tx)
        .await?;

        insert_relations(&mut *tx, recipe.id, &draft).await?;

        tx.commit().await?;

        Ok(recipe)
    }

    async fn update(&self, id: i64, draft: RecipeDraft) -> Result<Recipe, AppError> {
        let mut tx = self.pool.begin().await?;

        let recipe = sqlx::query_as::<_, Recipe>(&format!(
            r#"
            UPDATE recipes AS r
            SET name = $2, text = $3, image = $4, cooking_time = $5
            WHERE r.id = $1
            RETURNING {RECIPE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&draft.name)
        .bind(&draft.text)
        .bind(&draft.image)
        .bind(draft.cooking_time)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found("Recipe not found", json!({ "id": id })))?;

        sqlx::query("DELETE FROM recipe_tags WHERE recipe_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        insert_relations(&mut *tx, id, &draft).await?;

        tx.commit().await?;

        Ok(recipe)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Recipe>, AppError> {
        let recipe = sqlx::query_as::<_, Recipe>(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes r WHERE r.id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(recipe)
    }

    async fn list(
        &self,
        filter: RecipeFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Recipe>, AppError> {
        let recipes = sqlx::query_as::<_, Recipe>(&format!(
            r#"
            SELECT {RECIPE_COLUMNS}
            FROM recipes r
            {FILTER_CLAUSE}
            ORDER BY r.pub_date DESC, r.id DESC
            LIMIT $5 OFFSET $6
            "#
        ))
        .bind(filter.author_id)
        .bind(&filter.tags)
        .bind(filter.favorited_by)
        .bind(filter.in_cart_of)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(recipes)
    }

    async fn count(&self, filter: RecipeFilter) -> Result<i64, AppError> {
        let count: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM recipes r {FILTER_CLAUSE}"))
                .bind(filter.author_id)
                .bind(&filter.tags)
                .bind(filter.favorited_by)
                .bind(filter.in_cart_of)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(count)
    }

    async fn ingredients(&self, recipe_id: i64) -> Result<Vec<RecipeIngredient>, AppError> {
        let lines = sqlx::query_as::<_, RecipeIngredient>(
            r#"
            SELECT ri.ingredient_id, i.name, i.measurement_unit, ri.amount
            FROM recipe_ingredients ri
            JOIN ingredients i ON i.id = ri.ingredient_id
            WHERE ri.recipe_id = $1
            ORDER BY ri.id
            "#,
        )
        .bind(recipe_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(lines)
    }

    async fn cart_ingredient_lines(
        &self,
        user_id: i64,
    ) -> Result<Vec<CartIngredientLine>, AppError> {
        let lines = sqlx::query_as::<_, CartIngredientLine>(
            r#"
            SELECT i.name, i.measurement_unit, ri.amount
            FROM shopping_cart c
            JOIN recipe_ingredients ri ON ri.recipe_id = c.recipe_id
            JOIN ingredients i ON i.id = ri.ingredient_id
            WHERE c.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(lines)
    }
}
