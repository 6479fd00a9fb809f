// src/db/extra_queries.rs
use std::collections::HashMap;

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::models::extra::{ExtraBet, ExtraBetContext, ExtraResult, ExtraType};

/// The official answer key for a tournament, keyed by prediction type.
pub async fn answer_key(
    pool: &PgPool,
    tournament_id: Uuid,
) -> Result<HashMap<ExtraType, ExtraResult>, sqlx::Error> {
    let results = sqlx::query_as::<_, ExtraResult>(
        r#"
        SELECT id, tournament_id, type, team_id, player_name
        FROM extra_results
        WHERE tournament_id = $1
        "#,
    )
    .bind(tournament_id)
    .fetch_all(pool)
    .await?;

    Ok(results.into_iter().map(|r| (r.kind, r)).collect())
}

fn extra_bet_from_row(row: &PgRow) -> Result<ExtraBetContext, sqlx::Error> {
    Ok(ExtraBetContext {
        username: row.try_get("username")?,
        bet: ExtraBet {
            id: row.try_get("id")?,
            tournament_id: row.try_get("tournament_id")?,
            user_id: row.try_get("user_id")?,
            kind: row.try_get("type")?,
            team_id: row.try_get("team_id")?,
            player_name: row.try_get("player_name")?,
            created_at: row.try_get("created_at")?,
        },
    })
}

/// Every extra bet of a tournament joined with its owner's username.
pub async fn extra_bet_contexts(
    pool: &PgPool,
    tournament_id: Uuid,
) -> Result<Vec<ExtraBetContext>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT e.id, e.tournament_id, e.user_id, e.type, e.team_id, e.player_name,
               e.created_at, u.username
        FROM extra_bets e
        JOIN users u ON u.id = e.user_id
        WHERE e.tournament_id = $1
        "#,
    )
    .bind(tournament_id)
    .fetch_all(pool)
    .await?;
    rows.iter().map(extra_bet_from_row).collect()
}

/// One user's extra bets for a tournament.
pub async fn extra_bets_for_user(
    pool: &PgPool,
    tournament_id: Uuid,
    user_id: Uuid,
) -> Result<Vec<ExtraBet>, sqlx::Error> {
    sqlx::query_as::<_, ExtraBet>(
        r#"
        SELECT id, tournament_id, user_id, type, team_id, player_name, created_at
        FROM extra_bets
        WHERE tournament_id = $1 AND user_id = $2
        ORDER BY type
        "#,
    )
    .bind(tournament_id)
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Create or overwrite the user's prediction for one extra type.
pub async fn upsert_extra_bet(
    pool: &PgPool,
    tournament_id: Uuid,
    user_id: Uuid,
    kind: ExtraType,
    team_id: Option<Uuid>,
    player_name: Option<&str>,
) -> Result<ExtraBet, sqlx::Error> {
    sqlx::query_as::<_, ExtraBet>(
        r#"
        INSERT INTO extra_bets (tournament_id, user_id, type, team_id, player_name)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (tournament_id, user_id, type) DO UPDATE
            SET team_id = EXCLUDED.team_id,
                player_name = EXCLUDED.player_name
        RETURNING id, tournament_id, user_id, type, team_id, player_name, created_at
        "#,
    )
    .bind(tournament_id)
    .bind(user_id)
    .bind(kind)
    .bind(team_id)
    .bind(player_name)
    .fetch_one(pool)
    .await
}
