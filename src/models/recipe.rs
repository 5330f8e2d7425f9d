use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, types::Json};

use super::{RecordId, encode_json};

/// Ingredients keyed by name, in the order they were submitted.
pub type Ingredients = IndexMap<String, Ingredient>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Kept as a JSON number so integral amounts are not rendered as floats.
    pub amount: serde_json::Number,
    pub measurement: String,
}

/// Body accepted by create and update. Any `id` sent by the client is ignored.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RecipePayload {
    pub name: String,
    pub directions: Vec<String>,
    pub ingredients: Ingredients,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Recipe {
    pub id: RecordId,
    pub name: String,
    pub directions: Vec<String>,
    pub ingredients: Ingredients,
}

#[derive(FromRow)]
struct RecipeRow {
    id: RecordId,
    name: String,
    directions: Json<Vec<String>>,
    ingredients: Json<Ingredients>,
}

impl From<RecipeRow> for Recipe {
    fn from(row: RecipeRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            directions: row.directions.0,
            ingredients: row.ingredients.0,
        }
    }
}

impl Recipe {
    pub async fn insert(pool: &PgPool, recipe: &RecipePayload) -> sqlx::Result<Recipe> {
        let directions = encode_json(&recipe.directions)?;
        let ingredients = encode_json(&recipe.ingredients)?;

        sqlx::query_as::<_, RecipeRow>(
            "INSERT INTO recipes (name, directions, ingredients) VALUES ($1, $2::json, $3::json)
             RETURNING id, name, directions, ingredients",
        )
        .bind(&recipe.name)
        .bind(directions)
        .bind(ingredients)
        .fetch_one(pool)
        .await
        .map(Recipe::from)
    }

    pub async fn find_by_id(pool: &PgPool, id: RecordId) -> sqlx::Result<Option<Recipe>> {
        let row = sqlx::query_as::<_, RecipeRow>(
            "SELECT id, name, directions, ingredients FROM recipes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(Recipe::from))
    }

    pub async fn find_all(pool: &PgPool) -> sqlx::Result<Vec<Recipe>> {
        let rows = sqlx::query_as::<_, RecipeRow>(
            "SELECT id, name, directions, ingredients FROM recipes ORDER BY id",
        )
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(Recipe::from).collect())
    }

    /// Replaces every column of the recipe; nothing from the old row is merged.
    pub async fn update(
        pool: &PgPool,
        id: RecordId,
        recipe: &RecipePayload,
    ) -> sqlx::Result<Option<Recipe>> {
        let directions = encode_json(&recipe.directions)?;
        let ingredients = encode_json(&recipe.ingredients)?;

        let row = sqlx::query_as::<_, RecipeRow>(
            "UPDATE recipes SET name = $2, directions = $3::json, ingredients = $4::json
             WHERE id = $1
             RETURNING id, name, directions, ingredients",
        )
        .bind(id)
        .bind(&recipe.name)
        .bind(directions)
        .bind(ingredients)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(Recipe::from))
    }

    /// Deletes the recipe and returns it as it was stored. Logs that reference
    /// it are left in place.
    pub async fn delete(pool: &PgPool, id: RecordId) -> sqlx::Result<Option<Recipe>> {
        let row = sqlx::query_as::<_, RecipeRow>(
            "DELETE FROM recipes WHERE id = $1 RETURNING id, name, directions, ingredients",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(Recipe::from))
    }
}
