// src/db/stage_queries.rs
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::models::stage::Stage;

const STAGE_COLUMNS: &str = r#"
    id, tournament_id, "order", name, deadline,
    points_exact_score, points_result, points_one_team_goals
"#;

pub async fn find_by_order(
    pool: &PgPool,
    tournament_id: Uuid,
    order: i32,
) -> Result<Option<Stage>, sqlx::Error> {
    let query = format!(
        r#"SELECT {STAGE_COLUMNS} FROM stages WHERE tournament_id = $1 AND "order" = $2"#
    );
    sqlx::query_as::<_, Stage>(&query)
        .bind(tournament_id)
        .bind(order)
        .fetch_optional(pool)
        .await
}

pub async fn list_for_tournament(
    pool: &PgPool,
    tournament_id: Option<Uuid>,
) -> Result<Vec<Stage>, sqlx::Error> {
    let query = format!(
        r#"
        SELECT {STAGE_COLUMNS}
        FROM stages
        WHERE ($1::uuid IS NULL OR tournament_id = $1)
        ORDER BY "order"
        "#
    );
    sqlx::query_as::<_, Stage>(&query)
        .bind(tournament_id)
        .fetch_all(pool)
        .await
}

/// Highest stage order of a tournament, i.e. its terminal stage.
pub async fn max_order(pool: &PgPool, tournament_id: Uuid) -> Result<Option<i32>, sqlx::Error> {
    let row = sqlx::query(r#"SELECT MAX("order") AS max_order FROM stages WHERE tournament_id = $1"#)
        .bind(tournament_id)
        .fetch_one(pool)
        .await?;
    row.try_get("max_order")
}
