// src/tournament/ranking.rs
use std::collections::{BTreeMap, HashMap};

use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{bet_queries, extra_queries, stage_queries, tournament_queries};
use crate::errors::EngineError;
use crate::models::bet::BetContext;
use crate::models::extra::{ExtraBetContext, ExtraResult, ExtraType};
use crate::models::ranking::RankingRow;
use crate::tournament::scoring::{classify_bet, score_bet, score_extra_bet, BetOutcome};

/// Fold every user's scored predictions into the leaderboard.
///
/// A user appears once they have at least one bet or extra bet, even if it
/// is worth nothing yet. Rows are ordered by total points, then champion
/// hit, exact scores, correct results, terminal-stage points and extras
/// points, all descending; positions are sequential after that sort, with
/// no shared ranks.
pub fn aggregate(
    bets: &[BetContext],
    extras: &[ExtraBetContext],
    answers: &HashMap<ExtraType, ExtraResult>,
    terminal_stage_order: i32,
) -> Vec<RankingRow> {
    // BTreeMap keeps the pre-sort order deterministic for rows that tie on
    // every ranking key.
    let mut rows: BTreeMap<Uuid, RankingRow> = BTreeMap::new();

    for ctx in bets {
        let row = rows
            .entry(ctx.bet.user_id)
            .or_insert_with(|| RankingRow::new(ctx.bet.user_id, ctx.username.clone()));

        let points = score_bet(&ctx.bet, &ctx.game, &ctx.stage);
        row.total_points += points;
        if ctx.stage.order == terminal_stage_order {
            row.final_stage_points += points;
        }
        match classify_bet(&ctx.bet, &ctx.game) {
            Some(BetOutcome::ExactScore) => row.exact_scores += 1,
            Some(BetOutcome::CorrectResult) => row.results += 1,
            _ => {}
        }
    }

    for ctx in extras {
        let row = rows
            .entry(ctx.bet.user_id)
            .or_insert_with(|| RankingRow::new(ctx.bet.user_id, ctx.username.clone()));

        let points = score_extra_bet(&ctx.bet, answers.get(&ctx.bet.kind));
        row.total_points += points;
        row.extras_points += points;
        if ctx.bet.kind == ExtraType::Champion && points > 0 {
            row.champion_hit = true;
        }
    }

    let mut ranking: Vec<RankingRow> = rows.into_values().collect();
    ranking.sort_by(|a, b| {
        b.total_points
            .cmp(&a.total_points)
            .then(b.champion_hit.cmp(&a.champion_hit))
            .then(b.exact_scores.cmp(&a.exact_scores))
            .then(b.results.cmp(&a.results))
            .then(b.final_stage_points.cmp(&a.final_stage_points))
            .then(b.extras_points.cmp(&a.extras_points))
    });
    for (index, row) in ranking.iter_mut().enumerate() {
        row.position = index as i32 + 1;
    }
    ranking
}

/// Read-only service producing the leaderboard for one tournament. The
/// ranking is recomputed in full on every request from a consistent
/// snapshot of bets, results and the answer key.
pub struct RankingService {
    pool: PgPool,
}

impl RankingService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn ranking(&self, tournament_id: Uuid) -> Result<Vec<RankingRow>, EngineError> {
        tournament_queries::find(&self.pool, tournament_id)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("tournament {tournament_id}")))?;

        let terminal_stage_order = stage_queries::max_order(&self.pool, tournament_id)
            .await?
            .ok_or_else(|| {
                EngineError::NotFound(format!("stages for tournament {tournament_id}"))
            })?;

        let bets = bet_queries::bet_contexts(&self.pool, tournament_id).await?;
        let extras = extra_queries::extra_bet_contexts(&self.pool, tournament_id).await?;
        let answers = extra_queries::answer_key(&self.pool, tournament_id).await?;

        Ok(aggregate(&bets, &extras, &answers, terminal_stage_order))
    }
}
