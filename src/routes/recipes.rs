use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};

use crate::db::RecipeRepository;
use crate::error::Result;
use crate::filter::RecipeQuery;
use crate::models::{Recipe, RecipeId, RecipePayload};
use crate::AppState;

/// List recipes
///
/// `GET /recipes?name=<substr>` keeps only the recipes whose name contains
/// the given substring (case-sensitive).
pub async fn list_recipes(
    State(state): State<AppState>,
    Query(query): Query<RecipeQuery>,
) -> Result<Json<Vec<Recipe>>> {
    let recipes = RecipeRepository::new(&state.db)
        .list(query.name_filter())
        .await?;

    tracing::debug!(
        "Listed {} recipes (filter: {:?})",
        recipes.len(),
        query.name
    );

    Ok(Json(recipes))
}

/// Retrieve a single recipe with its ingredients
pub async fn get_recipe(
    State(state): State<AppState>,
    id: std::result::Result<Path<RecipeId>, PathRejection>,
) -> Result<Json<Recipe>> {
    let Path(id) = id?;
    let recipe = RecipeRepository::new(&state.db).get(id).await?;
    Ok(Json(recipe))
}

/// Create a recipe together with its ingredients
///
/// `name`, `description` and `ingredients` are all required; an empty
/// ingredient list is accepted. Returns 201 with the stored recipe.
pub async fn create_recipe(
    State(state): State<AppState>,
    payload: std::result::Result<Json<RecipePayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Recipe>)> {
    let Json(payload) = payload?;
    let new_recipe = payload.into_new_recipe()?;

    let repo = RecipeRepository::new(&state.db);
    let id = repo.create(new_recipe).await?;
    let recipe = repo.get(id).await?;

    Ok((StatusCode::CREATED, Json(recipe)))
}

/// Replace a recipe (`PUT`)
///
/// Same body rules as create. The ingredient list always replaces the
/// stored one. An unknown id is reported before the body is looked at.
pub async fn update_recipe(
    State(state): State<AppState>,
    id: std::result::Result<Path<RecipeId>, PathRejection>,
    payload: std::result::Result<Json<RecipePayload>, JsonRejection>,
) -> Result<Json<Recipe>> {
    let Path(id) = id?;
    let repo = RecipeRepository::new(&state.db);
    repo.ensure_exists(id).await?;

    let Json(payload) = payload?;
    let changes = payload.into_new_recipe()?.into();
    repo.update(id, changes).await?;

    Ok(Json(repo.get(id).await?))
}

/// Partially update a recipe (`PATCH`)
///
/// Omitted fields keep their values. Supplying `ingredients` replaces the
/// whole list, so `"ingredients": []` removes every ingredient.
pub async fn patch_recipe(
    State(state): State<AppState>,
    id: std::result::Result<Path<RecipeId>, PathRejection>,
    payload: std::result::Result<Json<RecipePayload>, JsonRejection>,
) -> Result<Json<Recipe>> {
    let Path(id) = id?;
    let repo = RecipeRepository::new(&state.db);
    repo.ensure_exists(id).await?;

    let Json(payload) = payload?;
    let changes = payload.into_changes()?;
    repo.update(id, changes).await?;

    Ok(Json(repo.get(id).await?))
}

/// Delete a recipe and, through the cascade, its ingredients
pub async fn delete_recipe(
    State(state): State<AppState>,
    id: std::result::Result<Path<RecipeId>, PathRejection>,
) -> Result<StatusCode> {
    let Path(id) = id?;
    RecipeRepository::new(&state.db).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
