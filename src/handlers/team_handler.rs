// src/handlers/team_handler.rs
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::db::team_queries;
use crate::errors::EngineError;

pub async fn list_teams(pool: web::Data<PgPool>) -> Result<HttpResponse, EngineError> {
    let teams = team_queries::list(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(teams))
}
