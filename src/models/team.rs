// src/models/team.rs
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A national team from the global catalog, identified by its short code
/// (e.g. BRA, ARG).
#[derive(Debug, FromRow, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub code: String,
}
