mod common;

use foodgram::domain::entities::{IngredientAmount, RecipeDraft, RecipeFilter};
use foodgram::domain::repositories::RecipeRepository;
use foodgram::error::AppError;
use foodgram::infrastructure::persistence::PgRecipeRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn draft(name: &str, tags: Vec<i64>, ingredients: Vec<(i64, i32)>) -> RecipeDraft {
    RecipeDraft {
        name: name.to_string(),
        text: "Mix and cook.".to_string(),
        image: "recipes/images/test.png".to_string(),
        cooking_time: 15,
        tags,
        ingredients: ingredients
            .into_iter()
            .map(|(ingredient_id, amount)| IngredientAmount {
                ingredient_id,
                amount,
            })
            .collect(),
    }
}

#[sqlx::test]
async fn test_create_writes_relations(pool: PgPool) {
    let author = common::create_user(&pool, "ann").await;
    let lunch = common::create_tag(&pool, "lunch").await;
    let flour = common::create_ingredient(&pool, "flour", "g").await;
    let eggs = common::create_ingredient(&pool, "eggs", "pcs").await;
    let repo = PgRecipeRepository::new(Arc::new(pool));

    let recipe = repo
        .create(author, draft("Pancakes", vec![lunch], vec![(flour, 200), (eggs, 2)]))
        .await
        .unwrap();

    assert_eq!(recipe.author_id, author);
    assert_eq!(recipe.name, "Pancakes");

    let lines = repo.ingredients(recipe.id).await.unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].ingredient_id, flour);
    assert_eq!(lines[0].amount, 200);
    assert_eq!(lines[1].name, "eggs");
    assert_eq!(lines[1].measurement_unit, "pcs");
}

#[sqlx::test]
async fn test_create_with_unknown_tag_writes_nothing(pool: PgPool) {
    let author = common::create_user(&pool, "ann").await;
    let flour = common::create_ingredient(&pool, "flour", "g").await;
    let repo = PgRecipeRepository::new(Arc::new(pool));

    let result = repo
        .create(author, draft("Bread", vec![9999], vec![(flour, 500)]))
        .await;

    assert!(matches!(result, Err(AppError::UnknownReference { .. })));
    assert_eq!(repo.count(RecipeFilter::default()).await.unwrap(), 0);
}

#[sqlx::test]
async fn test_update_replaces_relations(pool: PgPool) {
    let author = common::create_user(&pool, "ann").await;
    let lunch = common::create_tag(&pool, "lunch").await;
    let dinner = common::create_tag(&pool, "dinner").await;
    let flour = common::create_ingredient(&pool, "flour", "g").await;
    let milk = common::create_ingredient(&pool, "milk", "ml").await;
    let recipe_id = common::create_recipe(&pool, author, "Pancakes", &[lunch], &[(flour, 200)]).await;
    let repo = PgRecipeRepository::new(Arc::new(pool));

    let updated = repo
        .update(recipe_id, draft("Crepes", vec![dinner], vec![(milk, 300)]))
        .await
        .unwrap();

    assert_eq!(updated.name, "Crepes");

    let lines = repo.ingredients(recipe_id).await.unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].ingredient_id, milk);

    let by_lunch = RecipeFilter {
        tags: vec!["lunch".to_string()],
        ..Default::default()
    };
    assert_eq!(repo.count(by_lunch).await.unwrap(), 0);
}

#[sqlx::test]
async fn test_update_missing_recipe(pool: PgPool) {
    let repo = PgRecipeRepository::new(Arc::new(pool));

    let result = repo.update(9999, draft("Ghost", vec![], vec![])).await;

    assert!(matches!(result, Err(AppError::NotFound { .. })));
}

#[sqlx::test]
async fn test_list_filters(pool: PgPool) {
    let ann = common::create_user(&pool, "ann").await;
    let bob = common::create_user(&pool, "bob").await;
    let lunch = common::create_tag(&pool, "lunch").await;
    let dinner = common::create_tag(&pool, "dinner").await;

    let soup = common::create_recipe(&pool, ann, "Soup", &[lunch], &[]).await;
    let stew = common::create_recipe(&pool, ann, "Stew", &[dinner], &[]).await;
    let salad = common::create_recipe(&pool, bob, "Salad", &[lunch, dinner], &[]).await;

    sqlx::query("INSERT INTO favorites (user_id, recipe_id) VALUES ($1, $2)")
        .bind(bob)
        .bind(stew)
        .execute(&pool)
        .await
        .unwrap();
    common::add_to_cart(&pool, bob, soup).await;

    let repo = PgRecipeRepository::new(Arc::new(pool));

    let all = repo.list(RecipeFilter::default(), 0, 10).await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].id, salad, "newest first");

    let by_ann = RecipeFilter {
        author_id: Some(ann),
        ..Default::default()
    };
    assert_eq!(repo.count(by_ann).await.unwrap(), 2);

    let by_any_tag = RecipeFilter {
        tags: vec!["lunch".to_string(), "dinner".to_string()],
        ..Default::default()
    };
    assert_eq!(repo.count(by_any_tag).await.unwrap(), 3);

    let favorited = RecipeFilter {
        favorited_by: Some(bob),
        ..Default::default()
    };
    let favorites = repo.list(favorited, 0, 10).await.unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].id, stew);

    let in_cart = RecipeFilter {
        in_cart_of: Some(bob),
        tags: vec!["lunch".to_string()],
        ..Default::default()
    };
    let cart = repo.list(in_cart, 0, 10).await.unwrap();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart[0].id, soup);
}

#[sqlx::test]
async fn test_list_pagination(pool: PgPool) {
    let ann = common::create_user(&pool, "ann").await;
    for i in 0..5 {
        common::create_recipe(&pool, ann, &format!("Recipe {i}"), &[], &[]).await;
    }
    let repo = PgRecipeRepository::new(Arc::new(pool));

    let second_page = repo.list(RecipeFilter::default(), 2, 2).await.unwrap();
    let last_page = repo.list(RecipeFilter::default(), 4, 2).await.unwrap();

    assert_eq!(second_page.len(), 2);
    assert_eq!(last_page.len(), 1);
}

#[sqlx::test]
async fn test_cart_ingredient_lines(pool: PgPool) {
    let ann = common::create_user(&pool, "ann").await;
    let eggs = common::create_ingredient(&pool, "eggs", "pcs").await;
    let flour = common::create_ingredient(&pool, "flour", "kg").await;
    let omelette = common::create_recipe(&pool, ann, "Omelette", &[], &[(eggs, 3)]).await;
    let cake = common::create_recipe(&pool, ann, "Cake", &[], &[(eggs, 2), (flour, 1)]).await;
    common::create_recipe(&pool, ann, "Bread", &[], &[(flour, 5)]).await;
    common::add_to_cart(&pool, ann, omelette).await;
    common::add_to_cart(&pool, ann, cake).await;
    let repo = PgRecipeRepository::new(Arc::new(pool));

    let lines = repo.cart_ingredient_lines(ann).await.unwrap();

    assert_eq!(lines.len(), 3);
    let eggs_total: i32 = lines
        .iter()
        .filter(|line| line.name == "eggs")
        .map(|line| line.amount)
        .sum();
    assert_eq!(eggs_total, 5);
}

#[sqlx::test]
async fn test_delete(pool: PgPool) {
    let ann = common::create_user(&pool, "ann").await;
    let recipe_id = common::create_recipe(&pool, ann, "Soup", &[], &[]).await;
    let repo = PgRecipeRepository::new(Arc::new(pool));

    assert!(repo.delete(recipe_id).await.unwrap());
    assert!(!repo.delete(recipe_id).await.unwrap());
    assert!(repo.find_by_id(recipe_id).await.unwrap().is_none());
}
