// src/models/bet.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::matches::Match;
use crate::models::stage::Stage;

/// A user's score prediction for one match. At most one per (user, match);
/// updates overwrite in place until the stage deadline.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Bet {
    pub id: Uuid,
    pub user_id: Uuid,
    pub match_id: Uuid,
    pub home_score: i32,
    pub away_score: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A bet joined with its match and stage, everything scoring needs.
#[derive(Debug, Clone)]
pub struct BetContext {
    pub username: String,
    pub bet: Bet,
    pub game: Match,
    pub stage: Stage,
}

#[derive(Debug, Deserialize)]
pub struct PlaceBetRequest {
    pub user_id: Uuid,
    pub match_id: Uuid,
    pub home_score: i32,
    pub away_score: i32,
}

#[derive(Debug, Deserialize)]
pub struct BetsQuery {
    pub tournament: Uuid,
    pub user: Uuid,
}

/// Response row for a user's bet list: the prediction, its match and the
/// points it is currently worth.
#[derive(Debug, Serialize)]
pub struct BetView {
    pub bet: Bet,
    #[serde(rename = "match")]
    pub game: Match,
    pub stage: Stage,
    pub points: i32,
}
