// src/db/team_queries.rs
use sqlx::PgPool;

use crate::models::team::Team;

pub async fn list(pool: &PgPool) -> Result<Vec<Team>, sqlx::Error> {
    sqlx::query_as::<_, Team>("SELECT id, name, code FROM teams ORDER BY name")
        .fetch_all(pool)
        .await
}
