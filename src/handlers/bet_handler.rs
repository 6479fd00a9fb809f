// src/handlers/bet_handler.rs
use actix_web::{web, HttpResponse};
use chrono::Utc;
use sqlx::PgPool;

use crate::db::{bet_queries, match_queries};
use crate::errors::EngineError;
use crate::models::bet::{BetView, BetsQuery, PlaceBetRequest};
use crate::tournament::scoring;

/// A user's bets for one tournament, each with the points it is currently
/// worth.
pub async fn list_bets(
    query: web::Query<BetsQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, EngineError> {
    let contexts = bet_queries::bets_for_user(pool.get_ref(), query.tournament, query.user).await?;
    let views: Vec<BetView> = contexts
        .into_iter()
        .map(|ctx| {
            let points = scoring::score_bet(&ctx.bet, &ctx.game, &ctx.stage);
            BetView {
                bet: ctx.bet,
                game: ctx.game,
                stage: ctx.stage,
                points,
            }
        })
        .collect();
    Ok(HttpResponse::Ok().json(views))
}

/// Create or update a score prediction. Refused once the stage's prediction
/// deadline has passed.
pub async fn place_bet(
    body: web::Json<PlaceBetRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, EngineError> {
    let (_, stage) = match_queries::find_with_stage(pool.get_ref(), body.match_id)
        .await?
        .ok_or_else(|| EngineError::NotFound(format!("match {}", body.match_id)))?;

    if let Some(deadline) = stage.deadline {
        if Utc::now() >= deadline {
            return Err(EngineError::PreconditionNotMet(format!(
                "the prediction deadline for stage '{}' has passed",
                stage.name
            )));
        }
    }

    let bet = bet_queries::upsert_bet(
        pool.get_ref(),
        body.user_id,
        body.match_id,
        body.home_score,
        body.away_score,
    )
    .await?;
    Ok(HttpResponse::Created().json(bet))
}
