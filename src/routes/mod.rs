pub mod health;
pub mod recipes;

pub use health::health_check;
pub use recipes::{
    create_recipe, delete_recipe, get_recipe, list_recipes, patch_recipe, update_recipe,
};

use axum::{routing::get, Router};

use crate::AppState;

/// Build the API router with every endpoint mounted
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/recipes", get(list_recipes).post(create_recipe))
        .route(
            "/recipes/:id",
            get(get_recipe)
                .put(update_recipe)
                .patch(patch_recipe)
                .delete(delete_recipe),
        )
        .with_state(state)
}
