//! Invariant checks applied before mutations reach the store.
//!
//! These are pure functions over request data. Checks that need the store
//! (existence of referenced ids, duplicate pairs) are done by the services,
//! with the store's unique constraints as the final word.

use std::collections::BTreeSet;

use serde_json::json;

use crate::domain::entities::{Principal, RecipeDraft};
use crate::error::AppError;

/// Returns the ids that occur more than once, sorted.
fn duplicates(ids: impl IntoIterator<Item = i64>) -> Vec<i64> {
    let mut seen = BTreeSet::new();
    let mut repeated = BTreeSet::new();

    for id in ids {
        if !seen.insert(id) {
            repeated.insert(id);
        }
    }

    repeated.into_iter().collect()
}

/// Checks the collection rules of a recipe draft.
///
/// # Errors
///
/// - [`AppError::EmptyCollection`] if there are no ingredients or no tags
/// - [`AppError::DuplicateEntry`] if an ingredient id or tag id repeats
pub fn validate_recipe_draft(draft: &RecipeDraft) -> Result<(), AppError> {
    if draft.ingredients.is_empty() {
        return Err(AppError::empty_collection(
            "A recipe must have at least one ingredient",
            json!({ "field": "ingredients" }),
        ));
    }

    let repeated = duplicates(draft.ingredients.iter().map(|line| line.ingredient_id));
    if !repeated.is_empty() {
        return Err(AppError::duplicate_entry(
            "Ingredients must not repeat",
            json!({ "field": "ingredients", "ids": repeated }),
        ));
    }

    if draft.tags.is_empty() {
        return Err(AppError::empty_collection(
            "A recipe must have at least one tag",
            json!({ "field": "tags" }),
        ));
    }

    let repeated = duplicates(draft.tags.iter().copied());
    if !repeated.is_empty() {
        return Err(AppError::duplicate_entry(
            "Tags must not repeat",
            json!({ "field": "tags", "ids": repeated }),
        ));
    }

    Ok(())
}

/// Fails with [`AppError::UnknownReference`] listing every requested id that
/// is not in `existing`.
pub fn ensure_references_exist(
    field: &str,
    requested: &[i64],
    existing: &[i64],
) -> Result<(), AppError> {
    let existing: BTreeSet<i64> = existing.iter().copied().collect();
    let missing: BTreeSet<i64> = requested
        .iter()
        .copied()
        .filter(|id| !existing.contains(id))
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    let missing: Vec<i64> = missing.into_iter().collect();
    Err(AppError::unknown_reference(
        format!("Unknown {field} ids: {missing:?}"),
        json!({ "field": field, "missing_ids": missing }),
    ))
}

/// Rejects operations where the principal targets themself.
pub fn ensure_not_self(principal: Principal, target_user_id: i64) -> Result<(), AppError> {
    if principal.user_id == target_user_id {
        return Err(AppError::self_reference(
            "You cannot subscribe to yourself",
            json!({ "user_id": target_user_id }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::IngredientAmount;

    fn draft(ingredients: &[i64], tags: &[i64]) -> RecipeDraft {
        RecipeDraft {
            name: "Omelette".to_string(),
            text: "Whisk and fry.".to_string(),
            image: "recipes/images/omelette.png".to_string(),
            cooking_time: 10,
            tags: tags.to_vec(),
            ingredients: ingredients
                .iter()
                .map(|&ingredient_id| IngredientAmount {
                    ingredient_id,
                    amount: 2,
                })
                .collect(),
        }
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(validate_recipe_draft(&draft(&[1, 2], &[1])).is_ok());
    }

    #[test]
    fn test_no_ingredients_is_empty_collection() {
        let err = validate_recipe_draft(&draft(&[], &[1])).unwrap_err();
        assert!(matches!(err, AppError::EmptyCollection { .. }));
    }

    #[test]
    fn test_no_tags_is_empty_collection() {
        let err = validate_recipe_draft(&draft(&[1], &[])).unwrap_err();
        assert!(matches!(err, AppError::EmptyCollection { .. }));
    }

    #[test]
    fn test_repeated_ingredient_is_duplicate_entry() {
        let err = validate_recipe_draft(&draft(&[3, 1, 3], &[1])).unwrap_err();
        match err {
            AppError::DuplicateEntry { details, .. } => {
                assert_eq!(details["field"], "ingredients");
                assert_eq!(details["ids"], json!([3]));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_repeated_tag_is_duplicate_entry() {
        let err = validate_recipe_draft(&draft(&[1], &[2, 2])).unwrap_err();
        match err {
            AppError::DuplicateEntry { details, .. } => assert_eq!(details["field"], "tags"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_ensure_references_lists_missing_ids_sorted() {
        let err = ensure_references_exist("ingredient", &[9, 1, 4], &[1]).unwrap_err();
        match err {
            AppError::UnknownReference { details, .. } => {
                assert_eq!(details["missing_ids"], json!([4, 9]));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_ensure_references_ok_when_all_present() {
        assert!(ensure_references_exist("tag", &[1, 2], &[2, 1, 3]).is_ok());
    }

    #[test]
    fn test_self_reference_always_rejected() {
        for id in [1, 42, i64::MAX] {
            let err = ensure_not_self(Principal::new(id), id).unwrap_err();
            assert!(matches!(err, AppError::SelfReference { .. }));
        }
        assert!(ensure_not_self(Principal::new(1), 2).is_ok());
    }
}
