// src/models/ranking.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One leaderboard row. `position` is assigned 1..N after the full sort;
/// rows tied on every key still get adjacent positions, never a shared one.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RankingRow {
    pub user_id: Uuid,
    pub username: String,
    pub position: i32,
    pub total_points: i32,
    pub exact_scores: i32,
    pub results: i32,
    pub final_stage_points: i32,
    pub extras_points: i32,
    pub champion_hit: bool,
}

impl RankingRow {
    pub fn new(user_id: Uuid, username: String) -> Self {
        Self {
            user_id,
            username,
            position: 0,
            total_points: 0,
            exact_scores: 0,
            results: 0,
            final_stage_points: 0,
            extras_points: 0,
            champion_hit: false,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RankingQuery {
    pub tournament: Uuid,
}
