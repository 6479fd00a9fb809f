// src/models/extra.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The closed set of extra-prediction types. Each is worth a fixed number
/// of points, independent of any stage weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExtraType {
    Champion,
    RunnerUp,
    ThirdPlace,
    MostRed,
    MostYellow,
    FewestGoalsConceded,
    MostGoalsConceded,
    FewestGoalsScored,
    MostGoalsScored,
    TopScorer,
}

impl ExtraType {
    /// Fixed point value of a correct prediction of this type.
    pub fn points(&self) -> i32 {
        match self {
            ExtraType::Champion => 500,
            ExtraType::RunnerUp => 250,
            ExtraType::ThirdPlace => 125,
            ExtraType::MostRed => 100,
            ExtraType::MostYellow => 100,
            ExtraType::FewestGoalsConceded => 50,
            ExtraType::MostGoalsConceded => 250,
            ExtraType::FewestGoalsScored => 250,
            ExtraType::MostGoalsScored => 300,
            ExtraType::TopScorer => 300,
        }
    }

    /// Top-scorer predictions name a player; every other type names a team.
    pub fn requires_player_name(&self) -> bool {
        matches!(self, ExtraType::TopScorer)
    }
}

/// The official answer for one extra-prediction type, one row per
/// (tournament, type).
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct ExtraResult {
    pub id: Uuid,
    pub tournament_id: Uuid,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: ExtraType,
    pub team_id: Option<Uuid>,
    pub player_name: Option<String>,
}

/// A user's prediction for one extra type, at most one per
/// (tournament, user, type).
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct ExtraBet {
    pub id: Uuid,
    pub tournament_id: Uuid,
    pub user_id: Uuid,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: ExtraType,
    pub team_id: Option<Uuid>,
    pub player_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// An extra bet joined with its owner's display name.
#[derive(Debug, Clone)]
pub struct ExtraBetContext {
    pub username: String,
    pub bet: ExtraBet,
}

#[derive(Debug, Deserialize)]
pub struct PlaceExtraBetRequest {
    pub tournament_id: Uuid,
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub kind: ExtraType,
    pub team_id: Option<Uuid>,
    pub player_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExtraBetsQuery {
    pub tournament: Uuid,
    pub user: Uuid,
}

/// Response row for a user's extra-bet list.
#[derive(Debug, Serialize)]
pub struct ExtraBetView {
    #[serde(flatten)]
    pub bet: ExtraBet,
    pub points: i32,
}
