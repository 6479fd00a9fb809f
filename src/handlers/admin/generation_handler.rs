// src/handlers/admin/generation_handler.rs
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::EngineError;
use crate::tournament::bracket::BracketService;

#[derive(Debug, Deserialize)]
pub struct GenerateKnockoutRequest {
    pub tournament_id: Uuid,
}

/// Run the knockout generation pipeline as far as recorded results allow
/// and report what happened per stage.
pub async fn generate_knockout(
    body: web::Json<GenerateKnockoutRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, EngineError> {
    let service = BracketService::new(pool.get_ref().clone());
    let report = service.run_pipeline(body.tournament_id).await?;
    Ok(HttpResponse::Ok().json(report))
}
