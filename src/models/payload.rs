use serde::Deserialize;

use crate::constants::{ERR_FIELD_BLANK, ERR_FIELD_REQUIRED};
use crate::error::{FieldErrors, Result};
use crate::models::{NewRecipe, RecipeChanges};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IngredientPayload {
    pub name: Option<String>,
}

/// Request body shared by create, full update and partial update
///
/// Every field is optional at the decoding stage so that missing fields can be
/// reported together. `id` and unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipePayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<Vec<IngredientPayload>>,
}

impl RecipePayload {
    /// Validate a create / full update body: every field must be present
    pub fn into_new_recipe(self) -> Result<NewRecipe> {
        let mut errors = FieldErrors::new();

        let name = required_text(self.name, "name", &mut errors);
        let description = required_text(self.description, "description", &mut errors);
        let ingredients = match self.ingredients {
            Some(items) => ingredient_names(items, &mut errors),
            None => {
                errors.add("ingredients", ERR_FIELD_REQUIRED);
                Vec::new()
            }
        };

        errors.into_result(NewRecipe {
            name: name.unwrap_or_default(),
            description: description.unwrap_or_default(),
            ingredients,
        })
    }

    /// Validate a partial update body: only the fields present are checked
    pub fn into_changes(self) -> Result<RecipeChanges> {
        let mut errors = FieldErrors::new();

        let name = self
            .name
            .and_then(|v| non_blank(v, "name", &mut errors));
        let description = self
            .description
            .and_then(|v| non_blank(v, "description", &mut errors));
        let ingredients = self
            .ingredients
            .map(|items| ingredient_names(items, &mut errors));

        errors.into_result(RecipeChanges {
            name,
            description,
            ingredients,
        })
    }
}

fn required_text(value: Option<String>, field: &str, errors: &mut FieldErrors) -> Option<String> {
    match value {
        Some(v) => non_blank(v, field, errors),
        None => {
            errors.add(field, ERR_FIELD_REQUIRED);
            None
        }
    }
}

fn non_blank(value: String, field: &str, errors: &mut FieldErrors) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(field, ERR_FIELD_BLANK);
        return None;
    }
    Some(trimmed.to_string())
}

fn ingredient_names(items: Vec<IngredientPayload>, errors: &mut FieldErrors) -> Vec<String> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| required_text(item.name, &format!("ingredients[{i}].name"), errors))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> RecipePayload {
        serde_json::from_value(value).unwrap()
    }

    fn field_errors(result: Result<impl std::fmt::Debug>) -> FieldErrors {
        match result {
            Err(AppError::Validation(errors)) => errors,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_new_recipe_from_complete_payload() {
        let recipe = payload(json!({
            "name": "Hamburger",
            "description": "A bit of minced meat between two pieces of bread",
            "ingredients": [{"name": "minced meat"}, {"name": "bread"}]
        }))
        .into_new_recipe()
        .unwrap();

        assert_eq!(recipe.name, "Hamburger");
        assert_eq!(recipe.ingredients, vec!["minced meat", "bread"]);
    }

    #[test]
    fn test_new_recipe_reports_every_missing_field() {
        let errors = field_errors(payload(json!({})).into_new_recipe());

        assert_eq!(errors.get("name"), Some(ERR_FIELD_REQUIRED));
        assert_eq!(errors.get("description"), Some(ERR_FIELD_REQUIRED));
        assert_eq!(errors.get("ingredients"), Some(ERR_FIELD_REQUIRED));
    }

    #[test]
    fn test_new_recipe_allows_empty_ingredient_list() {
        let recipe = payload(json!({
            "name": "Water",
            "description": "Just water",
            "ingredients": []
        }))
        .into_new_recipe()
        .unwrap();

        assert!(recipe.ingredients.is_empty());
    }

    #[test]
    fn test_blank_and_nested_fields_are_rejected() {
        let errors = field_errors(
            payload(json!({
                "name": "   ",
                "description": "ok",
                "ingredients": [{"name": "salt"}, {}]
            }))
            .into_new_recipe(),
        );

        assert_eq!(errors.get("name"), Some(ERR_FIELD_BLANK));
        assert_eq!(errors.get("ingredients[1].name"), Some(ERR_FIELD_REQUIRED));
        assert_eq!(errors.get("description"), None);
    }

    #[test]
    fn test_changes_distinguish_omitted_and_empty_ingredients() {
        let omitted = payload(json!({"description": "new"}))
            .into_changes()
            .unwrap();
        assert_eq!(omitted.ingredients, None);
        assert_eq!(omitted.name, None);
        assert_eq!(omitted.description.as_deref(), Some("new"));

        let cleared = payload(json!({"ingredients": []})).into_changes().unwrap();
        assert_eq!(cleared.ingredients, Some(vec![]));
    }

    #[test]
    fn test_changes_treat_null_as_omitted() {
        let changes = payload(json!({"name": null, "ingredients": null}))
            .into_changes()
            .unwrap();

        assert_eq!(changes, RecipeChanges::default());
    }

    #[test]
    fn test_changes_reject_blank_name() {
        let errors = field_errors(payload(json!({"name": ""})).into_changes());
        assert_eq!(errors.get("name"), Some(ERR_FIELD_BLANK));
    }

    #[test]
    fn test_wrong_type_fails_to_decode() {
        let result: std::result::Result<RecipePayload, _> =
            serde_json::from_value(json!({"name": 5}));
        assert!(result.is_err());
    }
}
