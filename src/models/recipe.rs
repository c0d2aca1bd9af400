use serde::Serialize;

/// Primary key of the `recipe` table
pub type RecipeId = i64;

/// Ingredient as exposed by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ingredient {
    pub name: String,
}

/// Recipe aggregate: the recipe row together with its ingredients
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    pub description: String,
    /// Ingredients in creation order
    pub ingredients: Vec<Ingredient>,
}

impl Recipe {
    /// Ingredient names, in the stored order
    pub fn ingredient_names(&self) -> Vec<&str> {
        self.ingredients.iter().map(|i| i.name.as_str()).collect()
    }
}

/// Row of the `recipe` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RecipeRow {
    pub id: RecipeId,
    pub name: String,
    pub description: String,
}

/// Row of the `ingredient` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct IngredientRow {
    pub id: i64,
    pub recipe_id: RecipeId,
    pub name: String,
}

impl RecipeRow {
    pub fn into_recipe(self, ingredients: Vec<Ingredient>) -> Recipe {
        Recipe {
            id: self.id,
            name: self.name,
            description: self.description,
            ingredients,
        }
    }
}

/// A fully specified recipe, ready to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecipe {
    pub name: String,
    pub description: String,
    pub ingredients: Vec<String>,
}

/// Changes applied to an existing recipe
///
/// `None` leaves the stored value as is. For `ingredients`, `Some(vec![])`
/// clears the list while `None` keeps the current ingredients.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<Vec<String>>,
}

impl From<NewRecipe> for RecipeChanges {
    fn from(recipe: NewRecipe) -> Self {
        Self {
            name: Some(recipe.name),
            description: Some(recipe.description),
            ingredients: Some(recipe.ingredients),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_serialization_shape() {
        let recipe = Recipe {
            id: 7,
            name: "Hamburger".to_string(),
            description: "A bit of minced meat between two pieces of bread".to_string(),
            ingredients: vec![
                Ingredient {
                    name: "minced meat".to_string(),
                },
                Ingredient {
                    name: "bread".to_string(),
                },
            ],
        };

        let value = serde_json::to_value(&recipe).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": 7,
                "name": "Hamburger",
                "description": "A bit of minced meat between two pieces of bread",
                "ingredients": [{"name": "minced meat"}, {"name": "bread"}]
            })
        );
        assert_eq!(recipe.ingredient_names(), vec!["minced meat", "bread"]);
    }

    #[test]
    fn test_full_update_replaces_everything() {
        let changes = RecipeChanges::from(NewRecipe {
            name: "Soup".to_string(),
            description: "Hot".to_string(),
            ingredients: vec![],
        });

        assert_eq!(changes.name.as_deref(), Some("Soup"));
        assert_eq!(changes.description.as_deref(), Some("Hot"));
        assert_eq!(changes.ingredients, Some(vec![]));
    }
}
