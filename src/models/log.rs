use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use super::RecordId;

/// Body accepted by create and update.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogPayload {
    pub recipe_id: RecordId,
    pub date_of_event: String,
    pub notes: String,
    pub rating: i32,
}

/// One attempt at cooking a recipe. `recipe_id` is not checked against the
/// recipes table.
#[derive(Clone, Debug, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    pub id: RecordId,
    pub recipe_id: RecordId,
    pub date_of_event: String,
    pub notes: String,
    pub rating: i32,
}

impl Log {
    pub async fn insert(pool: &PgPool, log: &LogPayload) -> sqlx::Result<Log> {
        sqlx::query_as::<_, Log>(
            "INSERT INTO logs (recipe_id, date_of_event, notes, rating) VALUES ($1, $2, $3, $4)
             RETURNING id, recipe_id, date_of_event, notes, rating",
        )
        .bind(log.recipe_id)
        .bind(&log.date_of_event)
        .bind(&log.notes)
        .bind(log.rating)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: RecordId) -> sqlx::Result<Option<Log>> {
        sqlx::query_as::<_, Log>(
            "SELECT id, recipe_id, date_of_event, notes, rating FROM logs WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_all(pool: &PgPool) -> sqlx::Result<Vec<Log>> {
        sqlx::query_as::<_, Log>(
            "SELECT id, recipe_id, date_of_event, notes, rating FROM logs ORDER BY id",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn update(
        pool: &PgPool,
        id: RecordId,
        log: &LogPayload,
    ) -> sqlx::Result<Option<Log>> {
        sqlx::query_as::<_, Log>(
            "UPDATE logs SET recipe_id = $2, date_of_event = $3, notes = $4, rating = $5
             WHERE id = $1
             RETURNING id, recipe_id, date_of_event, notes, rating",
        )
        .bind(id)
        .bind(log.recipe_id)
        .bind(&log.date_of_event)
        .bind(&log.notes)
        .bind(log.rating)
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &PgPool, id: RecordId) -> sqlx::Result<Option<Log>> {
        sqlx::query_as::<_, Log>(
            "DELETE FROM logs WHERE id = $1 RETURNING id, recipe_id, date_of_event, notes, rating",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}
