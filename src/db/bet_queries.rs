// src/db/bet_queries.rs
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::models::bet::{Bet, BetContext};
use crate::models::matches::Match;
use crate::models::stage::Stage;

const BET_CONTEXT_QUERY: &str = r#"
    SELECT b.id AS bet_id, b.user_id, b.match_id,
           b.home_score AS bet_home_score, b.away_score AS bet_away_score,
           b.created_at AS bet_created_at, b.updated_at AS bet_updated_at,
           u.username,
           m.tournament_id, m.stage_id, m.home_team_id, m.away_team_id,
           m.kickoff, m.group_name,
           m.home_score AS official_home_score, m.away_score AS official_away_score,
           m.home_penalties, m.away_penalties,
           m.created_at AS match_created_at, m.updated_at AS match_updated_at,
           s."order" AS stage_order, s.name AS stage_name, s.deadline AS stage_deadline,
           s.points_exact_score, s.points_result, s.points_one_team_goals
    FROM bets b
    JOIN users u ON u.id = b.user_id
    JOIN matches m ON m.id = b.match_id
    JOIN stages s ON s.id = m.stage_id
"#;

fn bet_context_from_row(row: &PgRow) -> Result<BetContext, sqlx::Error> {
    let bet = Bet {
        id: row.try_get("bet_id")?,
        user_id: row.try_get("user_id")?,
        match_id: row.try_get("match_id")?,
        home_score: row.try_get("bet_home_score")?,
        away_score: row.try_get("bet_away_score")?,
        created_at: row.try_get("bet_created_at")?,
        updated_at: row.try_get("bet_updated_at")?,
    };
    let game = Match {
        id: bet.match_id,
        tournament_id: row.try_get("tournament_id")?,
        stage_id: row.try_get("stage_id")?,
        home_team_id: row.try_get("home_team_id")?,
        away_team_id: row.try_get("away_team_id")?,
        kickoff: row.try_get("kickoff")?,
        group_name: row.try_get("group_name")?,
        home_score: row.try_get("official_home_score")?,
        away_score: row.try_get("official_away_score")?,
        home_penalties: row.try_get("home_penalties")?,
        away_penalties: row.try_get("away_penalties")?,
        created_at: row.try_get("match_created_at")?,
        updated_at: row.try_get("match_updated_at")?,
    };
    let stage = Stage {
        id: game.stage_id,
        tournament_id: game.tournament_id,
        order: row.try_get("stage_order")?,
        name: row.try_get("stage_name")?,
        deadline: row.try_get("stage_deadline")?,
        points_exact_score: row.try_get("points_exact_score")?,
        points_result: row.try_get("points_result")?,
        points_one_team_goals: row.try_get("points_one_team_goals")?,
    };
    Ok(BetContext {
        username: row.try_get("username")?,
        bet,
        game,
        stage,
    })
}

/// Every bet of a tournament joined with its match and stage, the ranking
/// aggregator's input.
pub async fn bet_contexts(
    pool: &PgPool,
    tournament_id: Uuid,
) -> Result<Vec<BetContext>, sqlx::Error> {
    let query = format!("{BET_CONTEXT_QUERY} WHERE m.tournament_id = $1");
    let rows = sqlx::query(&query)
        .bind(tournament_id)
        .fetch_all(pool)
        .await?;
    rows.iter().map(bet_context_from_row).collect()
}

/// One user's bets for a tournament, ordered by kickoff.
pub async fn bets_for_user(
    pool: &PgPool,
    tournament_id: Uuid,
    user_id: Uuid,
) -> Result<Vec<BetContext>, sqlx::Error> {
    let query = format!(
        "{BET_CONTEXT_QUERY} WHERE m.tournament_id = $1 AND b.user_id = $2 ORDER BY m.kickoff"
    );
    let rows = sqlx::query(&query)
        .bind(tournament_id)
        .bind(user_id)
        .fetch_all(pool)
        .await?;
    rows.iter().map(bet_context_from_row).collect()
}

/// Create or overwrite the user's prediction for one match.
pub async fn upsert_bet(
    pool: &PgPool,
    user_id: Uuid,
    match_id: Uuid,
    home_score: i32,
    away_score: i32,
) -> Result<Bet, sqlx::Error> {
    sqlx::query_as::<_, Bet>(
        r#"
        INSERT INTO bets (user_id, match_id, home_score, away_score)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (user_id, match_id) DO UPDATE
            SET home_score = EXCLUDED.home_score,
                away_score = EXCLUDED.away_score,
                updated_at = NOW()
        RETURNING id, user_id, match_id, home_score, away_score, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(match_id)
    .bind(home_score)
    .bind(away_score)
    .fetch_one(pool)
    .await
}
