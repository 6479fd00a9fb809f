// src/errors.rs
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use uuid::Uuid;

/// Errors surfaced by the tournament engine.
///
/// All of these describe well-defined invalid state in the data, not engine
/// faults, so each maps to a 4xx status; only `Database` is a 5xx.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("precondition not met: {0}")]
    PreconditionNotMet(String),

    #[error("match {match_id} has no official score yet")]
    UndecidedMatch { match_id: Uuid },

    #[error("match {match_id} ended level and no tie-break has been recorded")]
    DrawWithoutTiebreak { match_id: Uuid },

    #[error("group {group} has {found} teams, at least 3 are required")]
    InsufficientGroupSize { group: String, found: usize },

    #[error("expected 8 third-placed qualifiers, found {found}")]
    InsufficientThirdPlaceCandidates { found: usize },

    #[error("{0} not found")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ResponseError for EngineError {
    fn status_code(&self) -> StatusCode {
        match self {
            EngineError::PreconditionNotMet(_) => StatusCode::CONFLICT,
            EngineError::UndecidedMatch { .. }
            | EngineError::DrawWithoutTiebreak { .. }
            | EngineError::InsufficientGroupSize { .. }
            | EngineError::InsufficientThirdPlaceCandidates { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            EngineError::NotFound(_) => StatusCode::NOT_FOUND,
            EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            EngineError::Database(e) => {
                tracing::error!("Database error: {}", e);
                "internal error".to_string()
            }
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(json!({ "error": message }))
    }
}
