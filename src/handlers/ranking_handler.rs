// src/handlers/ranking_handler.rs
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::errors::EngineError;
use crate::models::ranking::RankingQuery;
use crate::tournament::ranking::RankingService;

/// The tournament leaderboard, a bare array of rows already in final order.
pub async fn get_ranking(
    query: web::Query<RankingQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, EngineError> {
    let service = RankingService::new(pool.get_ref().clone());
    let ranking = service.ranking(query.tournament).await?;
    Ok(HttpResponse::Ok().json(ranking))
}
