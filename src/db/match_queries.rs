// src/db/match_queries.rs
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::models::matches::{Match, MatchWithTeams, MatchesQuery};
use crate::models::stage::Stage;

/// Column list shared by every match-with-teams query. Ordering by
/// (kickoff, created_at, id) is the store's deterministic match order.
const MATCH_WITH_TEAMS_COLUMNS: &str = r#"
    m.id, m.tournament_id, m.stage_id, m.home_team_id, m.away_team_id,
    m.kickoff, m.group_name, m.home_score, m.away_score,
    m.home_penalties, m.away_penalties, m.created_at, m.updated_at,
    h.name AS home_team_name, h.code AS home_team_code,
    a.name AS away_team_name, a.code AS away_team_code
"#;

/// All matches of one stage, joined with both teams, in deterministic order.
pub async fn matches_with_teams(
    pool: &PgPool,
    tournament_id: Uuid,
    stage_id: Uuid,
) -> Result<Vec<MatchWithTeams>, sqlx::Error> {
    let query = format!(
        r#"
        SELECT {MATCH_WITH_TEAMS_COLUMNS}
        FROM matches m
        JOIN teams h ON h.id = m.home_team_id
        JOIN teams a ON a.id = m.away_team_id
        WHERE m.tournament_id = $1 AND m.stage_id = $2
        ORDER BY m.kickoff, m.created_at, m.id
        "#
    );
    sqlx::query_as::<_, MatchWithTeams>(&query)
        .bind(tournament_id)
        .bind(stage_id)
        .fetch_all(pool)
        .await
}

/// Filterable match listing for the read API, same deterministic order.
pub async fn list_matches(
    pool: &PgPool,
    filter: &MatchesQuery,
) -> Result<Vec<MatchWithTeams>, sqlx::Error> {
    let query = format!(
        r#"
        SELECT {MATCH_WITH_TEAMS_COLUMNS}
        FROM matches m
        JOIN teams h ON h.id = m.home_team_id
        JOIN teams a ON a.id = m.away_team_id
        JOIN stages s ON s.id = m.stage_id
        WHERE ($1::uuid IS NULL OR m.tournament_id = $1)
          AND ($2::int IS NULL OR s."order" = $2)
          AND ($3::varchar IS NULL OR m.group_name = $3)
        ORDER BY m.kickoff, m.created_at, m.id
        "#
    );
    sqlx::query_as::<_, MatchWithTeams>(&query)
        .bind(filter.tournament)
        .bind(filter.stage_order)
        .bind(filter.group_name.as_deref())
        .fetch_all(pool)
        .await
}

/// A single match together with its stage, for deadline checks.
pub async fn find_with_stage(
    pool: &PgPool,
    match_id: Uuid,
) -> Result<Option<(Match, Stage)>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT m.id, m.tournament_id, m.stage_id, m.home_team_id, m.away_team_id,
               m.kickoff, m.group_name, m.home_score, m.away_score,
               m.home_penalties, m.away_penalties, m.created_at, m.updated_at,
               s."order" AS stage_order, s.name AS stage_name, s.deadline AS stage_deadline,
               s.points_exact_score, s.points_result, s.points_one_team_goals
        FROM matches m
        JOIN stages s ON s.id = m.stage_id
        WHERE m.id = $1
        "#,
    )
    .bind(match_id)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let game = Match {
        id: row.try_get("id")?,
        tournament_id: row.try_get("tournament_id")?,
        stage_id: row.try_get("stage_id")?,
        home_team_id: row.try_get("home_team_id")?,
        away_team_id: row.try_get("away_team_id")?,
        kickoff: row.try_get("kickoff")?,
        group_name: row.try_get("group_name")?,
        home_score: row.try_get("home_score")?,
        away_score: row.try_get("away_score")?,
        home_penalties: row.try_get("home_penalties")?,
        away_penalties: row.try_get("away_penalties")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
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
    Ok(Some((game, stage)))
}

/// Set or clear the official 90-minute score of a match.
pub async fn set_result(
    pool: &PgPool,
    match_id: Uuid,
    home_score: Option<i32>,
    away_score: Option<i32>,
) -> Result<Option<Match>, sqlx::Error> {
    sqlx::query_as::<_, Match>(
        r#"
        UPDATE matches
        SET home_score = $1, away_score = $2, updated_at = NOW()
        WHERE id = $3
        RETURNING id, tournament_id, stage_id, home_team_id, away_team_id,
                  kickoff, group_name, home_score, away_score,
                  home_penalties, away_penalties, created_at, updated_at
        "#,
    )
    .bind(home_score)
    .bind(away_score)
    .bind(match_id)
    .fetch_optional(pool)
    .await
}

pub async fn count_for_stage(pool: &PgPool, stage_id: Uuid) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM matches WHERE stage_id = $1")
        .bind(stage_id)
        .fetch_one(pool)
        .await?;
    row.try_get("count")
}
