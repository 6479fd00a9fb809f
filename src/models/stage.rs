// src/models/stage.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One phase of the tournament. Order 1 is the group stage; every later
/// order is a knockout round, and the highest order holds the 3rd-place
/// match and the final.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Stage {
    pub id: Uuid,
    pub tournament_id: Uuid,
    pub order: i32,
    pub name: String,
    /// Prediction cut-off for every match of this stage. Also anchors the
    /// kickoff times of generated knockout matches.
    pub deadline: Option<DateTime<Utc>>,
    pub points_exact_score: i32,
    pub points_result: i32,
    pub points_one_team_goals: i32,
}

/// Generation state of a knockout stage, derived from the match store.
/// A stage transitions Empty -> Generated exactly once; regeneration of a
/// populated stage is always refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StageState {
    Empty,
    Generated,
}

impl StageState {
    pub fn from_match_count(count: i64) -> Self {
        if count == 0 {
            StageState::Empty
        } else {
            StageState::Generated
        }
    }
}
