pub mod payload;
pub mod recipe;

pub use payload::RecipePayload;
pub use recipe::{Ingredient, NewRecipe, Recipe, RecipeChanges, RecipeId};
