// src/models/matches.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};
use uuid::Uuid;

use crate::models::team::Team;

/// One fixture of the tournament. Group-stage matches carry a `group_name`;
/// knockout matches leave it unset except for the two terminal-stage slots
/// ("3rd place" and "Final"). A match is finished once both official scores
/// are recorded. Penalty scores are stored for reference only and never
/// decide anything automatically.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Match {
    pub id: Uuid,
    pub tournament_id: Uuid,
    pub stage_id: Uuid,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub kickoff: DateTime<Utc>,
    pub group_name: Option<String>,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub home_penalties: Option<i32>,
    pub away_penalties: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Match {
    pub fn is_finished(&self) -> bool {
        self.home_score.is_some() && self.away_score.is_some()
    }
}

/// A match joined with both team records, the shape every engine operation
/// works on.
#[derive(Debug, Serialize, Clone)]
pub struct MatchWithTeams {
    pub game: Match,
    pub home_team: Team,
    pub away_team: Team,
}

impl<'r> FromRow<'r, PgRow> for MatchWithTeams {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            game: Match::from_row(row)?,
            home_team: Team {
                id: row.try_get("home_team_id")?,
                name: row.try_get("home_team_name")?,
                code: row.try_get("home_team_code")?,
            },
            away_team: Team {
                id: row.try_get("away_team_id")?,
                name: row.try_get("away_team_name")?,
                code: row.try_get("away_team_code")?,
            },
        })
    }
}

// Request/query DTOs

#[derive(Debug, Deserialize)]
pub struct MatchesQuery {
    pub tournament: Option<Uuid>,
    pub stage_order: Option<i32>,
    pub group_name: Option<String>,
}

/// Official-result update. Only the 90-minute score is writable here;
/// sending null clears a score.
#[derive(Debug, Deserialize)]
pub struct MatchResultRequest {
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
}
