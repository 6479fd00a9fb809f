// src/db/tournament_queries.rs
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::tournament::Tournament;

pub async fn find(pool: &PgPool, tournament_id: Uuid) -> Result<Option<Tournament>, sqlx::Error> {
    sqlx::query_as::<_, Tournament>(
        "SELECT id, name, start_date, extras_deadline, created_at FROM tournaments WHERE id = $1",
    )
    .bind(tournament_id)
    .fetch_optional(pool)
    .await
}
