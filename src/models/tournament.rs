// src/models/tournament.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Tournament {
    pub id: Uuid,
    pub name: String,
    pub start_date: DateTime<Utc>,
    /// Cut-off for champion/top-scorer style predictions, tournament-wide.
    pub extras_deadline: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
