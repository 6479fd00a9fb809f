// src/tournament/bracket.rs
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::db::{match_queries, stage_queries, tournament_queries};
use crate::errors::EngineError;
use crate::models::matches::MatchWithTeams;
use crate::models::stage::{Stage, StageState};
use crate::models::team::Team;
use crate::tournament::standings::{
    calculate_group_standings, standings_sort_key, third_placed_rows, GroupStandings,
};

/// Stage orders of the five-phase bracket.
pub const GROUP_STAGE: i32 = 1;
pub const ROUND_OF_32: i32 = 2;
pub const QUARTER_FINALS: i32 = 3;
pub const SEMI_FINALS: i32 = 4;
pub const FINAL_STAGE: i32 = 5;

/// Fixed cross-group adjacency for the first knockout round: the winner of
/// each group meets the runner-up of its paired group, and vice versa.
pub const GROUP_PAIRS: [(&str, &str); 6] = [
    ("A", "B"),
    ("C", "D"),
    ("E", "F"),
    ("G", "H"),
    ("I", "J"),
    ("K", "L"),
];

/// Rank pairings among the 8 best third-placed teams: 1v8, 2v7, 3v6, 4v5.
pub const BEST_THIRD_PAIRS: [(usize, usize); 4] = [(0, 7), (1, 6), (2, 5), (3, 4)];

pub const BEST_THIRD_COUNT: usize = 8;

/// Slot labels carried by the two terminal-stage matches.
pub const THIRD_PLACE_LABEL: &str = "3rd place";
pub const FINAL_LABEL: &str = "Final";

/// A home/away pairing for a knockout match still to be created.
#[derive(Debug, Clone, PartialEq)]
pub struct Pairing {
    pub home: Team,
    pub away: Team,
    pub label: Option<String>,
}

impl Pairing {
    fn new(home: Team, away: Team) -> Self {
        Self {
            home,
            away,
            label: None,
        }
    }

    fn labeled(home: Team, away: Team, label: &str) -> Self {
        Self {
            home,
            away,
            label: Some(label.to_string()),
        }
    }
}

/// Winner of a knockout match. The official 90-minute score decides; a
/// level score is a hard stop until an operator records the resolved result,
/// penalty fields are never consulted.
pub fn winner_of(m: &MatchWithTeams) -> Result<&Team, EngineError> {
    match (m.game.home_score, m.game.away_score) {
        (Some(h), Some(a)) if h > a => Ok(&m.home_team),
        (Some(h), Some(a)) if a > h => Ok(&m.away_team),
        (Some(_), Some(_)) => Err(EngineError::DrawWithoutTiebreak { match_id: m.game.id }),
        _ => Err(EngineError::UndecidedMatch { match_id: m.game.id }),
    }
}

pub fn loser_of(m: &MatchWithTeams) -> Result<&Team, EngineError> {
    match (m.game.home_score, m.game.away_score) {
        (Some(h), Some(a)) if h > a => Ok(&m.away_team),
        (Some(h), Some(a)) if a > h => Ok(&m.home_team),
        (Some(_), Some(_)) => Err(EngineError::DrawWithoutTiebreak { match_id: m.game.id }),
        _ => Err(EngineError::UndecidedMatch { match_id: m.game.id }),
    }
}

/// Seed the first knockout round from the final group tables: winner/runner
/// pairs across the fixed group adjacency, then the 8 best third-placed
/// teams paired by rank.
pub fn seed_round_of_32(standings: &[GroupStandings]) -> Result<Vec<Pairing>, EngineError> {
    let mut pairings = Vec::new();

    for (g1, g2) in GROUP_PAIRS {
        let (first, second) = match (find_group(standings, g1), find_group(standings, g2)) {
            (Some(first), Some(second)) => (first, second),
            _ => continue,
        };
        pairings.push(Pairing::new(
            first.winner().team.clone(),
            second.runner_up().team.clone(),
        ));
        pairings.push(Pairing::new(
            second.winner().team.clone(),
            first.runner_up().team.clone(),
        ));
    }

    let mut thirds = third_placed_rows(standings);
    thirds.sort_by(|a, b| standings_sort_key(a.1, b.1));
    if thirds.len() < BEST_THIRD_COUNT {
        return Err(EngineError::InsufficientThirdPlaceCandidates {
            found: thirds.len(),
        });
    }
    let best = &thirds[..BEST_THIRD_COUNT];
    for (i, j) in BEST_THIRD_PAIRS {
        pairings.push(Pairing::new(best[i].1.team.clone(), best[j].1.team.clone()));
    }

    Ok(pairings)
}

/// Pair the winners of a finished round in match order: 0v1, 2v3, and so
/// on. The input must already be in the store's deterministic order.
pub fn pair_next_round(prev: &[MatchWithTeams]) -> Result<Vec<Pairing>, EngineError> {
    if prev.is_empty() || prev.len() % 2 != 0 {
        return Err(EngineError::PreconditionNotMet(format!(
            "previous round must have an even, non-zero number of matches, found {}",
            prev.len()
        )));
    }

    let mut pairings = Vec::with_capacity(prev.len() / 2);
    for pair in prev.chunks(2) {
        let first = winner_of(&pair[0])?;
        let second = winner_of(&pair[1])?;
        pairings.push(Pairing::new(first.clone(), second.clone()));
    }
    Ok(pairings)
}

/// Anchor time for generated kickoffs: the target stage's deadline, falling
/// back to the predecessor's, falling back to now.
pub fn kickoff_anchor(target: &Stage, predecessor: &Stage) -> DateTime<Utc> {
    target
        .deadline
        .or(predecessor.deadline)
        .unwrap_or_else(Utc::now)
}

fn find_group<'a>(standings: &'a [GroupStandings], name: &str) -> Option<&'a GroupStandings> {
    standings.iter().find(|g| g.group == name)
}

/// Outcome of one pipeline step.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    Generated { matches_created: usize },
    AlreadyGenerated,
    Pending { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct StageGeneration {
    pub stage_order: i32,
    pub stage_name: String,
    pub outcome: StepOutcome,
}

/// Service that advances the knockout bracket from recorded results.
///
/// Every generation step is a single transaction that locks the target
/// stage row, re-checks that the stage is still empty and inserts the whole
/// batch, so two concurrent attempts cannot both succeed.
pub struct BracketService {
    pool: PgPool,
}

impl BracketService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Seed the round of 32 from the fully decided group stage.
    pub async fn generate_round_of_32(&self, tournament_id: Uuid) -> Result<usize, EngineError> {
        let group_stage = self.stage_by_order(tournament_id, GROUP_STAGE).await?;
        let target = self.stage_by_order(tournament_id, ROUND_OF_32).await?;

        let group_matches =
            match_queries::matches_with_teams(&self.pool, tournament_id, group_stage.id).await?;
        if group_matches.is_empty() {
            return Err(EngineError::PreconditionNotMet(
                "the group stage has no matches to seed from".to_string(),
            ));
        }

        let standings = calculate_group_standings(&group_matches)?;
        let pairings = seed_round_of_32(&standings)?;
        let anchor = kickoff_anchor(&target, &group_stage);
        self.create_stage_matches(&target, &pairings, anchor, Duration::hours(1))
            .await
    }

    /// Pair the winners of `from_order` into the empty `to_order` stage.
    pub async fn generate_next_round(
        &self,
        tournament_id: Uuid,
        from_order: i32,
        to_order: i32,
    ) -> Result<usize, EngineError> {
        let from_stage = self.stage_by_order(tournament_id, from_order).await?;
        let target = self.stage_by_order(tournament_id, to_order).await?;

        let prev = match_queries::matches_with_teams(&self.pool, tournament_id, from_stage.id).await?;
        let pairings = pair_next_round(&prev)?;
        let anchor = kickoff_anchor(&target, &from_stage);
        self.create_stage_matches(&target, &pairings, anchor, Duration::hours(1))
            .await
    }

    /// Create the 3rd-place match (semi-final losers, at the anchor) and the
    /// final (winners, three hours later).
    pub async fn generate_final_and_third(&self, tournament_id: Uuid) -> Result<usize, EngineError> {
        let semi_stage = self.stage_by_order(tournament_id, SEMI_FINALS).await?;
        let target = self.stage_by_order(tournament_id, FINAL_STAGE).await?;

        let semis =
            match_queries::matches_with_teams(&self.pool, tournament_id, semi_stage.id).await?;
        if semis.len() != 2 {
            return Err(EngineError::PreconditionNotMet(format!(
                "expected exactly 2 semi-final matches, found {}",
                semis.len()
            )));
        }

        let third_place = Pairing::labeled(
            loser_of(&semis[0])?.clone(),
            loser_of(&semis[1])?.clone(),
            THIRD_PLACE_LABEL,
        );
        let final_match = Pairing::labeled(
            winner_of(&semis[0])?.clone(),
            winner_of(&semis[1])?.clone(),
            FINAL_LABEL,
        );

        let anchor = kickoff_anchor(&target, &semi_stage);
        self.create_stage_matches(&target, &[third_place, final_match], anchor, Duration::hours(3))
            .await
    }

    /// Drive the whole bracket as far as recorded results allow:
    /// groups -> round of 32 -> quarters -> semis -> final + 3rd place.
    ///
    /// Populated stages report `AlreadyGenerated`; the first stage whose
    /// predecessor is not fully decided reports `Pending` and stops the run.
    /// Re-running after more results arrive picks up where it left off.
    pub async fn run_pipeline(
        &self,
        tournament_id: Uuid,
    ) -> Result<Vec<StageGeneration>, EngineError> {
        tournament_queries::find(&self.pool, tournament_id)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("tournament {tournament_id}")))?;

        let steps = [
            (GROUP_STAGE, ROUND_OF_32),
            (ROUND_OF_32, QUARTER_FINALS),
            (QUARTER_FINALS, SEMI_FINALS),
            (SEMI_FINALS, FINAL_STAGE),
        ];

        let mut report = Vec::with_capacity(steps.len());
        for (from_order, to_order) in steps {
            let from_stage = self.stage_by_order(tournament_id, from_order).await?;
            let target = self.stage_by_order(tournament_id, to_order).await?;

            if self.stage_state(&target).await? == StageState::Generated {
                report.push(StageGeneration {
                    stage_order: to_order,
                    stage_name: target.name,
                    outcome: StepOutcome::AlreadyGenerated,
                });
                continue;
            }

            let prev =
                match_queries::matches_with_teams(&self.pool, tournament_id, from_stage.id).await?;
            if prev.is_empty() || prev.iter().any(|m| !m.game.is_finished()) {
                report.push(StageGeneration {
                    stage_order: to_order,
                    stage_name: target.name,
                    outcome: StepOutcome::Pending {
                        reason: format!("stage '{}' is not fully decided", from_stage.name),
                    },
                });
                break;
            }

            let created = match to_order {
                ROUND_OF_32 => self.generate_round_of_32(tournament_id).await?,
                FINAL_STAGE => self.generate_final_and_third(tournament_id).await?,
                _ => {
                    self.generate_next_round(tournament_id, from_order, to_order)
                        .await?
                }
            };
            tracing::info!(
                "Generated stage '{}' for tournament {}: {} matches",
                target.name,
                tournament_id,
                created
            );
            report.push(StageGeneration {
                stage_order: to_order,
                stage_name: target.name,
                outcome: StepOutcome::Generated {
                    matches_created: created,
                },
            });
        }
        Ok(report)
    }

    async fn stage_by_order(&self, tournament_id: Uuid, order: i32) -> Result<Stage, EngineError> {
        stage_queries::find_by_order(&self.pool, tournament_id, order)
            .await?
            .ok_or_else(|| {
                EngineError::NotFound(format!(
                    "stage with order {order} for tournament {tournament_id}"
                ))
            })
    }

    async fn stage_state(&self, stage: &Stage) -> Result<StageState, EngineError> {
        let count = match_queries::count_for_stage(&self.pool, stage.id).await?;
        Ok(StageState::from_match_count(count))
    }

    /// Atomic check-and-create: lock the target stage row, refuse if any
    /// match already exists, then insert the whole batch. Kickoffs step
    /// `spacing` apart from the anchor.
    async fn create_stage_matches(
        &self,
        target: &Stage,
        pairings: &[Pairing],
        anchor: DateTime<Utc>,
        spacing: Duration,
    ) -> Result<usize, EngineError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT id FROM stages WHERE id = $1 FOR UPDATE")
            .bind(target.id)
            .fetch_one(&mut *tx)
            .await?;

        let existing: i64 = sqlx::query("SELECT COUNT(*) AS count FROM matches WHERE stage_id = $1")
            .bind(target.id)
            .fetch_one(&mut *tx)
            .await?
            .get("count");
        if existing > 0 {
            return Err(EngineError::PreconditionNotMet(format!(
                "stage '{}' already has {} matches",
                target.name, existing
            )));
        }

        for (idx, pairing) in pairings.iter().enumerate() {
            let kickoff = anchor + spacing * idx as i32;
            sqlx::query(
                r#"
                INSERT INTO matches (tournament_id, stage_id, home_team_id, away_team_id, kickoff, group_name)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(target.tournament_id)
            .bind(target.id)
            .bind(pairing.home.id)
            .bind(pairing.away.id)
            .bind(kickoff)
            .bind(pairing.label.as_deref())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(pairings.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::matches::Match;
    use chrono::TimeZone;

    fn team(name: &str, code: &str) -> Team {
        Team {
            id: Uuid::new_v4(),
            name: name.to_string(),
            code: code.to_string(),
        }
    }

    fn knockout_match(home: &Team, away: &Team, score: Option<(i32, i32)>) -> MatchWithTeams {
        let kickoff = Utc.with_ymd_and_hms(2026, 6, 29, 12, 0, 0).unwrap();
        MatchWithTeams {
            game: Match {
                id: Uuid::new_v4(),
                tournament_id: Uuid::new_v4(),
                stage_id: Uuid::new_v4(),
                home_team_id: home.id,
                away_team_id: away.id,
                kickoff,
                group_name: None,
                home_score: score.map(|(h, _)| h),
                away_score: score.map(|(_, a)| a),
                home_penalties: None,
                away_penalties: None,
                created_at: kickoff,
                updated_at: kickoff,
            },
            home_team: home.clone(),
            away_team: away.clone(),
        }
    }

    #[test]
    fn winner_and_loser_follow_the_official_score() {
        let a = team("Austria", "AUT");
        let b = team("Belgium", "BEL");
        let m = knockout_match(&a, &b, Some((0, 2)));
        assert_eq!(winner_of(&m).unwrap().code, "BEL");
        assert_eq!(loser_of(&m).unwrap().code, "AUT");
    }

    #[test]
    fn undecided_match_has_no_winner() {
        let a = team("Austria", "AUT");
        let b = team("Belgium", "BEL");
        let m = knockout_match(&a, &b, None);
        assert!(matches!(
            winner_of(&m).unwrap_err(),
            EngineError::UndecidedMatch { .. }
        ));
        assert!(matches!(
            loser_of(&m).unwrap_err(),
            EngineError::UndecidedMatch { .. }
        ));
    }

    #[test]
    fn drawn_knockout_match_halts_even_with_penalties_recorded() {
        let a = team("Austria", "AUT");
        let b = team("Belgium", "BEL");
        let mut m = knockout_match(&a, &b, Some((1, 1)));
        m.game.home_penalties = Some(5);
        m.game.away_penalties = Some(4);
        assert!(matches!(
            winner_of(&m).unwrap_err(),
            EngineError::DrawWithoutTiebreak { .. }
        ));
        assert!(matches!(
            loser_of(&m).unwrap_err(),
            EngineError::DrawWithoutTiebreak { .. }
        ));
    }

    #[test]
    fn next_round_pairs_consecutive_winners() {
        let a = team("Austria", "AUT");
        let b = team("Belgium", "BEL");
        let c = team("Croatia", "CRO");
        let d = team("Denmark", "DEN");

        let prev = vec![
            knockout_match(&a, &b, Some((2, 0))),
            knockout_match(&c, &d, Some((0, 1))),
        ];

        let pairings = pair_next_round(&prev).unwrap();
        assert_eq!(pairings.len(), 1);
        assert_eq!(pairings[0].home.code, "AUT");
        assert_eq!(pairings[0].away.code, "DEN");
        assert!(pairings[0].label.is_none());
    }

    #[test]
    fn odd_match_count_is_rejected() {
        let a = team("Austria", "AUT");
        let b = team("Belgium", "BEL");
        let prev = vec![knockout_match(&a, &b, Some((2, 0)))];
        assert!(matches!(
            pair_next_round(&prev).unwrap_err(),
            EngineError::PreconditionNotMet(_)
        ));
        assert!(matches!(
            pair_next_round(&[]).unwrap_err(),
            EngineError::PreconditionNotMet(_)
        ));
    }

    #[test]
    fn kickoff_anchor_prefers_target_then_predecessor_deadline() {
        let target_deadline = Utc.with_ymd_and_hms(2026, 6, 30, 0, 0, 0).unwrap();
        let predecessor_deadline = Utc.with_ymd_and_hms(2026, 6, 11, 0, 0, 0).unwrap();

        let mut target = Stage {
            id: Uuid::new_v4(),
            tournament_id: Uuid::new_v4(),
            order: ROUND_OF_32,
            name: "Round of 32".to_string(),
            deadline: Some(target_deadline),
            points_exact_score: 50,
            points_result: 20,
            points_one_team_goals: 10,
        };
        let predecessor = Stage {
            id: Uuid::new_v4(),
            tournament_id: target.tournament_id,
            order: GROUP_STAGE,
            name: "Group stage".to_string(),
            deadline: Some(predecessor_deadline),
            points_exact_score: 25,
            points_result: 10,
            points_one_team_goals: 5,
        };

        assert_eq!(kickoff_anchor(&target, &predecessor), target_deadline);
        target.deadline = None;
        assert_eq!(kickoff_anchor(&target, &predecessor), predecessor_deadline);
    }

    /// Builds decided standings for the given groups where the winner is
    /// `<group>1`, the runner-up `<group>2` and the third `<group>3`, with
    /// the third's record scaled by `third_strength` goals for tie-breaks.
    fn synthetic_standings(groups: &[(&str, i32)]) -> Vec<GroupStandings> {
        use crate::tournament::standings::TeamStanding;

        groups
            .iter()
            .map(|(g, third_strength)| {
                let mk = |suffix: &str| team(&format!("Team {g}{suffix}"), &format!("{g}{suffix}"));
                GroupStandings {
                    group: g.to_string(),
                    rows: vec![
                        TeamStanding {
                            team: mk("1"),
                            points: 9,
                            goals_for: 9,
                            goals_against: 1,
                        },
                        TeamStanding {
                            team: mk("2"),
                            points: 6,
                            goals_for: 6,
                            goals_against: 4,
                        },
                        TeamStanding {
                            team: mk("3"),
                            points: 3,
                            goals_for: *third_strength,
                            goals_against: 5,
                        },
                    ],
                }
            })
            .collect()
    }

    #[test]
    fn round_of_32_pairs_winners_with_cross_group_runners_up() {
        let groups: Vec<(&str, i32)> = ["A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L"]
            .iter()
            .enumerate()
            .map(|(i, g)| (*g, i as i32 + 1))
            .collect();
        let standings = synthetic_standings(&groups);

        let pairings = seed_round_of_32(&standings).unwrap();
        assert_eq!(pairings.len(), 16);

        // First tier: winner(A) v runner-up(B), winner(B) v runner-up(A), ...
        assert_eq!(pairings[0].home.code, "A1");
        assert_eq!(pairings[0].away.code, "B2");
        assert_eq!(pairings[1].home.code, "B1");
        assert_eq!(pairings[1].away.code, "A2");
        assert_eq!(pairings[10].home.code, "K1");
        assert_eq!(pairings[10].away.code, "L2");
        assert_eq!(pairings[11].home.code, "L1");
        assert_eq!(pairings[11].away.code, "K2");
    }

    #[test]
    fn best_thirds_are_ranked_and_paired_first_against_eighth() {
        // Third-placed strength rises with the group letter, so the 8 best
        // thirds are groups E..L and L3 is the top seed among them.
        let groups: Vec<(&str, i32)> = ["A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L"]
            .iter()
            .enumerate()
            .map(|(i, g)| (*g, i as i32 + 1))
            .collect();
        let standings = synthetic_standings(&groups);

        let pairings = seed_round_of_32(&standings).unwrap();
        let thirds = &pairings[12..];
        assert_eq!(thirds[0].home.code, "L3"); // 1st v 8th
        assert_eq!(thirds[0].away.code, "E3");
        assert_eq!(thirds[1].home.code, "K3"); // 2nd v 7th
        assert_eq!(thirds[1].away.code, "F3");
        assert_eq!(thirds[2].home.code, "J3"); // 3rd v 6th
        assert_eq!(thirds[2].away.code, "G3");
        assert_eq!(thirds[3].home.code, "I3"); // 4th v 5th
        assert_eq!(thirds[3].away.code, "H3");
    }

    #[test]
    fn fewer_than_eight_thirds_is_a_hard_error() {
        let standings = synthetic_standings(&[("A", 1), ("B", 2), ("C", 3), ("D", 4)]);
        match seed_round_of_32(&standings).unwrap_err() {
            EngineError::InsufficientThirdPlaceCandidates { found } => assert_eq!(found, 4),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
