// src/handlers/extra_bet_handler.rs
use actix_web::{web, HttpResponse};
use chrono::Utc;
use sqlx::PgPool;

use crate::db::{extra_queries, tournament_queries};
use crate::errors::EngineError;
use crate::models::extra::{ExtraBetView, ExtraBetsQuery, PlaceExtraBetRequest};
use crate::tournament::scoring;

/// A user's extra predictions for one tournament, each with its current
/// point value.
pub async fn list_extra_bets(
    query: web::Query<ExtraBetsQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, EngineError> {
    let bets =
        extra_queries::extra_bets_for_user(pool.get_ref(), query.tournament, query.user).await?;
    let answers = extra_queries::answer_key(pool.get_ref(), query.tournament).await?;

    let views: Vec<ExtraBetView> = bets
        .into_iter()
        .map(|bet| {
            let points = scoring::score_extra_bet(&bet, answers.get(&bet.kind));
            ExtraBetView { bet, points }
        })
        .collect();
    Ok(HttpResponse::Ok().json(views))
}

/// Create or update an extra prediction. Refused once the tournament's
/// extras deadline has passed; the payload must carry a player name for
/// top-scorer predictions and a team for every other type.
pub async fn place_extra_bet(
    body: web::Json<PlaceExtraBetRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, EngineError> {
    let tournament = tournament_queries::find(pool.get_ref(), body.tournament_id)
        .await?
        .ok_or_else(|| EngineError::NotFound(format!("tournament {}", body.tournament_id)))?;

    if Utc::now() >= tournament.extras_deadline {
        return Err(EngineError::PreconditionNotMet(
            "the deadline for extra predictions has passed".to_string(),
        ));
    }

    if body.kind.requires_player_name() {
        if body
            .player_name
            .as_deref()
            .map_or(true, |name| name.trim().is_empty())
        {
            return Err(EngineError::PreconditionNotMet(
                "a player name is required for this prediction type".to_string(),
            ));
        }
    } else if body.team_id.is_none() {
        return Err(EngineError::PreconditionNotMet(
            "a team is required for this prediction type".to_string(),
        ));
    }

    let bet = extra_queries::upsert_extra_bet(
        pool.get_ref(),
        body.tournament_id,
        body.user_id,
        body.kind,
        body.team_id,
        body.player_name.as_deref(),
    )
    .await?;
    Ok(HttpResponse::Created().json(bet))
}
