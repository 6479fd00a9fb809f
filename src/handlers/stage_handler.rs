// src/handlers/stage_handler.rs
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::stage_queries;
use crate::errors::EngineError;

#[derive(Debug, Deserialize)]
pub struct StagesQuery {
    pub tournament: Option<Uuid>,
}

pub async fn list_stages(
    query: web::Query<StagesQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, EngineError> {
    let stages = stage_queries::list_for_tournament(pool.get_ref(), query.tournament).await?;
    Ok(HttpResponse::Ok().json(stages))
}
