// src/routes/copa.rs
use actix_web::{get, patch, post, web, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::handlers::admin::generation_handler;
use crate::handlers::admin::generation_handler::GenerateKnockoutRequest;
use crate::handlers::{
    bet_handler, extra_bet_handler, match_handler, ranking_handler, stage_handler, team_handler,
};
use crate::handlers::stage_handler::StagesQuery;
use crate::models::bet::{BetsQuery, PlaceBetRequest};
use crate::models::extra::{ExtraBetsQuery, PlaceExtraBetRequest};
use crate::models::matches::{MatchResultRequest, MatchesQuery};
use crate::models::ranking::RankingQuery;

/// Team catalog
#[get("/teams")]
async fn list_teams(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    Ok(team_handler::list_teams(pool).await?)
}

/// Tournament stages with their point weights and deadlines
#[get("/stages")]
async fn list_stages(
    query: web::Query<StagesQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    Ok(stage_handler::list_stages(query, pool).await?)
}

/// Matches, filterable by tournament, stage order and group
#[get("/matches")]
async fn list_matches(
    query: web::Query<MatchesQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    Ok(match_handler::list_matches(query, pool).await?)
}

/// Record the official result of a match
#[patch("/matches/{match_id}")]
async fn update_match_result(
    path: web::Path<Uuid>,
    body: web::Json<MatchResultRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    Ok(match_handler::update_result(path, body, pool).await?)
}

/// A user's score predictions
#[get("/bets")]
async fn list_bets(query: web::Query<BetsQuery>, pool: web::Data<PgPool>) -> Result<HttpResponse> {
    Ok(bet_handler::list_bets(query, pool).await?)
}

/// Place or update a score prediction
#[post("/bets")]
async fn place_bet(
    body: web::Json<PlaceBetRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    Ok(bet_handler::place_bet(body, pool).await?)
}

/// A user's extra predictions
#[get("/extra-bets")]
async fn list_extra_bets(
    query: web::Query<ExtraBetsQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    Ok(extra_bet_handler::list_extra_bets(query, pool).await?)
}

/// Place or update an extra prediction
#[post("/extra-bets")]
async fn place_extra_bet(
    body: web::Json<PlaceExtraBetRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    Ok(extra_bet_handler::place_extra_bet(body, pool).await?)
}

/// The tournament leaderboard
#[get("/ranking")]
async fn get_ranking(
    query: web::Query<RankingQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    Ok(ranking_handler::get_ranking(query, pool).await?)
}

/// Generate the next knockout stage(s) from recorded results
#[post("/generate-knockout")]
async fn generate_knockout(
    body: web::Json<GenerateKnockoutRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    Ok(generation_handler::generate_knockout(body, pool).await?)
}
