// src/tournament/scoring.rs
use crate::models::bet::Bet;
use crate::models::extra::{ExtraBet, ExtraResult, ExtraType};
use crate::models::matches::Match;
use crate::models::stage::Stage;

/// How a score prediction relates to the official result, from best to
/// worst. Exactly one applies; an exact score is never also counted as a
/// correct result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BetOutcome {
    ExactScore,
    CorrectResult,
    OneTeamGoals,
    Miss,
}

/// Classify a prediction against the official score. Returns `None` while
/// the match has no official result.
pub fn classify_bet(bet: &Bet, game: &Match) -> Option<BetOutcome> {
    let (official_home, official_away) = match (game.home_score, game.away_score) {
        (Some(h), Some(a)) => (h, a),
        _ => return None,
    };

    if bet.home_score == official_home && bet.away_score == official_away {
        return Some(BetOutcome::ExactScore);
    }

    let official_sign = (official_home - official_away).signum();
    let predicted_sign = (bet.home_score - bet.away_score).signum();
    if official_sign == predicted_sign {
        return Some(BetOutcome::CorrectResult);
    }

    if bet.home_score == official_home || bet.away_score == official_away {
        return Some(BetOutcome::OneTeamGoals);
    }

    Some(BetOutcome::Miss)
}

/// Point value of one score prediction under its stage's weights. An
/// unfinished match is worth nothing, whatever was predicted.
pub fn score_bet(bet: &Bet, game: &Match, stage: &Stage) -> i32 {
    match classify_bet(bet, game) {
        Some(BetOutcome::ExactScore) => stage.points_exact_score,
        Some(BetOutcome::CorrectResult) => stage.points_result,
        Some(BetOutcome::OneTeamGoals) => stage.points_one_team_goals,
        Some(BetOutcome::Miss) | None => 0,
    }
}

/// Point value of one extra prediction against the official answer key.
///
/// Top-scorer predictions compare player names ignoring case and
/// surrounding whitespace; every other type matches on team identity. No
/// answer recorded yet means no points, and there is no partial credit.
pub fn score_extra_bet(bet: &ExtraBet, answer: Option<&ExtraResult>) -> i32 {
    let answer = match answer {
        Some(answer) if answer.kind == bet.kind => answer,
        _ => return 0,
    };

    if bet.kind == ExtraType::TopScorer {
        match (bet.player_name.as_deref(), answer.player_name.as_deref()) {
            (Some(predicted), Some(official))
                if !predicted.trim().is_empty()
                    && predicted.trim().to_lowercase() == official.trim().to_lowercase() =>
            {
                bet.kind.points()
            }
            _ => 0,
        }
    } else {
        match (bet.team_id, answer.team_id) {
            (Some(predicted), Some(official)) if predicted == official => bet.kind.points(),
            _ => 0,
        }
    }
}
