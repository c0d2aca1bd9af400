//! Persistence for the recipe aggregate.
//!
//! A recipe and its ingredients are read and written as one unit. Every write
//! that touches more than one row runs inside a single transaction, and
//! ingredients are removed together with their recipe by the
//! `ON DELETE CASCADE` foreign key.

use std::collections::HashMap;

use sqlx::{Sqlite, SqliteConnection, Transaction};

use super::Db;
use crate::constants::ERR_FIELD_REQUIRED;
use crate::error::{AppError, FieldErrors, Result};
use crate::filter::NameFilter;
use crate::models::recipe::{IngredientRow, RecipeRow};
use crate::models::{Ingredient, NewRecipe, Recipe, RecipeChanges, RecipeId};

/// Repository for recipes and their ingredients
#[derive(Debug, Clone, Copy)]
pub struct RecipeRepository<'a> {
    db: &'a Db,
}

impl<'a> RecipeRepository<'a> {
    pub fn new(db: &'a Db) -> Self {
        Self { db }
    }

    /// Insert a recipe and one ingredient row per name
    pub async fn create(&self, recipe: NewRecipe) -> Result<RecipeId> {
        if recipe.name.trim().is_empty() {
            let mut errors = FieldErrors::new();
            errors.add("name", ERR_FIELD_REQUIRED);
            return Err(AppError::Validation(errors));
        }

        let mut tx = self.db.begin().await?;

        let id = sqlx::query("INSERT INTO recipe (name, description) VALUES (?, ?)")
            .bind(&recipe.name)
            .bind(&recipe.description)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

        insert_ingredients(&mut tx, id, &recipe.ingredients).await?;
        tx.commit().await?;

        tracing::info!(
            "Recipe {} created with {} ingredients",
            id,
            recipe.ingredients.len()
        );

        Ok(id)
    }

    /// Apply `changes` to an existing recipe
    ///
    /// When `changes.ingredients` is `Some`, the current ingredients are
    /// deleted and recreated from the list (an empty list clears them).
    /// When it is `None` they are left untouched.
    pub async fn update(&self, id: RecipeId, changes: RecipeChanges) -> Result<()> {
        let mut tx = self.db.begin().await?;

        let updated = sqlx::query(
            "UPDATE recipe SET name = COALESCE(?, name), description = COALESCE(?, description) WHERE id = ?",
        )
        .bind(changes.name.as_deref())
        .bind(changes.description.as_deref())
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            tracing::warn!("Update attempt for non-existent recipe: {}", id);
            return Err(AppError::RecipeNotFound);
        }

        if let Some(ingredients) = &changes.ingredients {
            let removed = sqlx::query("DELETE FROM ingredient WHERE recipe_id = ?")
                .bind(id)
                .execute(&mut *tx)
                .await?
                .rows_affected();
            insert_ingredients(&mut tx, id, ingredients).await?;

            tracing::debug!(
                "Recipe {}: replaced {} ingredients with {}",
                id,
                removed,
                ingredients.len()
            );
        }

        tx.commit().await?;

        tracing::info!("Recipe {} updated", id);
        Ok(())
    }

    /// `Err(RecipeNotFound)` unless a recipe with `id` is stored
    pub async fn ensure_exists(&self, id: RecipeId) -> Result<()> {
        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM recipe WHERE id = ?")
            .bind(id)
            .fetch_optional(self.db)
            .await?;

        found.map(|_| ()).ok_or(AppError::RecipeNotFound)
    }

    /// Load one recipe with its ingredients in creation order
    pub async fn get(&self, id: RecipeId) -> Result<Recipe> {
        let mut tx = self.db.begin().await?;
        let recipe = load_recipe(&mut *tx, id).await?;
        tx.commit().await?;

        recipe.ok_or(AppError::RecipeNotFound)
    }

    /// Load every recipe accepted by `filter`, ordered by id
    pub async fn list(&self, filter: NameFilter<'_>) -> Result<Vec<Recipe>> {
        let mut tx = self.db.begin().await?;

        let rows = sqlx::query_as::<_, RecipeRow>(
            "SELECT id, name, description FROM recipe ORDER BY id",
        )
        .fetch_all(&mut *tx)
        .await?;

        let ingredient_rows = sqlx::query_as::<_, IngredientRow>(
            "SELECT id, recipe_id, name FROM ingredient ORDER BY recipe_id, id",
        )
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        let mut by_recipe: HashMap<RecipeId, Vec<Ingredient>> = HashMap::new();
        for row in ingredient_rows {
            by_recipe
                .entry(row.recipe_id)
                .or_default()
                .push(Ingredient { name: row.name });
        }

        let recipes = rows
            .into_iter()
            .map(|row| {
                let ingredients = by_recipe.remove(&row.id).unwrap_or_default();
                row.into_recipe(ingredients)
            })
            .collect();

        Ok(filter.apply(recipes))
    }

    /// Delete a recipe; its ingredients go with it
    pub async fn delete(&self, id: RecipeId) -> Result<()> {
        let deleted = sqlx::query("DELETE FROM recipe WHERE id = ?")
            .bind(id)
            .execute(self.db)
            .await?;

        if deleted.rows_affected() == 0 {
            tracing::warn!("Delete attempt for non-existent recipe: {}", id);
            return Err(AppError::RecipeNotFound);
        }

        tracing::info!("Recipe {} and its ingredients deleted", id);
        Ok(())
    }
}

async fn insert_ingredients(
    tx: &mut Transaction<'_, Sqlite>,
    recipe_id: RecipeId,
    names: &[String],
) -> Result<()> {
    for name in names {
        sqlx::query("INSERT INTO ingredient (name, recipe_id) VALUES (?, ?)")
            .bind(name)
            .bind(recipe_id)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

async fn load_recipe(conn: &mut SqliteConnection, id: RecipeId) -> Result<Option<Recipe>> {
    let Some(row) = sqlx::query_as::<_, RecipeRow>(
        "SELECT id, name, description FROM recipe WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?
    else {
        return Ok(None);
    };

    let ingredients = sqlx::query_as::<_, IngredientRow>(
        "SELECT id, recipe_id, name FROM ingredient WHERE recipe_id = ? ORDER BY id",
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await?
    .into_iter()
    .map(|row| Ingredient { name: row.name })
    .collect();

    Ok(Some(row.into_recipe(ingredients)))
}
