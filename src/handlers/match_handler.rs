// src/handlers/match_handler.rs
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::match_queries;
use crate::errors::EngineError;
use crate::models::matches::{MatchResultRequest, MatchesQuery};

pub async fn list_matches(
    query: web::Query<MatchesQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, EngineError> {
    let matches = match_queries::list_matches(pool.get_ref(), &query).await?;
    Ok(HttpResponse::Ok().json(matches))
}

/// Record (or clear) the official result of a match. Only the 90-minute
/// score is writable through this endpoint; a drawn knockout match stays a
/// hard stop for bracket generation until the score is amended.
pub async fn update_result(
    path: web::Path<Uuid>,
    body: web::Json<MatchResultRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, EngineError> {
    let match_id = path.into_inner();
    let updated =
        match_queries::set_result(pool.get_ref(), match_id, body.home_score, body.away_score)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("match {match_id}")))?;

    tracing::info!(
        "Recorded result for match {}: {:?} - {:?}",
        updated.id,
        updated.home_score,
        updated.away_score
    );
    Ok(HttpResponse::Ok().json(updated))
}
