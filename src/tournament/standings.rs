// src/tournament/standings.rs
use std::collections::BTreeMap;

use serde::Serialize;

use crate::errors::EngineError;
use crate::models::matches::MatchWithTeams;
use crate::models::team::Team;

/// One row of a group table.
#[derive(Debug, Clone, Serialize)]
pub struct TeamStanding {
    pub team: Team,
    pub points: i32,
    pub goals_for: i32,
    pub goals_against: i32,
}

impl TeamStanding {
    fn new(team: Team) -> Self {
        Self {
            team,
            points: 0,
            goals_for: 0,
            goals_against: 0,
        }
    }

    pub fn goal_difference(&self) -> i32 {
        self.goals_for - self.goals_against
    }
}

/// A group's final table, rows ordered best-first.
#[derive(Debug, Clone, Serialize)]
pub struct GroupStandings {
    pub group: String,
    pub rows: Vec<TeamStanding>,
}

impl GroupStandings {
    pub fn winner(&self) -> &TeamStanding {
        &self.rows[0]
    }

    pub fn runner_up(&self) -> &TeamStanding {
        &self.rows[1]
    }

    pub fn third(&self) -> &TeamStanding {
        &self.rows[2]
    }
}

/// Orders standings rows best-first: points, then goal difference, then
/// goals scored, with the team name ascending as the last word. The name
/// tie-break keeps equal records in one reproducible order.
pub fn standings_sort_key(a: &TeamStanding, b: &TeamStanding) -> std::cmp::Ordering {
    b.points
        .cmp(&a.points)
        .then(b.goal_difference().cmp(&a.goal_difference()))
        .then(b.goals_for.cmp(&a.goals_for))
        .then(a.team.name.cmp(&b.team.name))
}

/// Build the group tables from the group stage's matches, groups in
/// ascending name order.
///
/// Every match must be finished and tagged with a group; a win is worth 3
/// points, a draw 1. Incomplete input is an error, never skipped.
pub fn calculate_group_standings(
    matches: &[MatchWithTeams],
) -> Result<Vec<GroupStandings>, EngineError> {
    let mut groups: BTreeMap<String, Vec<TeamStanding>> = BTreeMap::new();

    for m in matches {
        let group = m.game.group_name.clone().ok_or_else(|| {
            EngineError::PreconditionNotMet(format!(
                "group-stage match {} has no group name",
                m.game.id
            ))
        })?;
        let (home_score, away_score) = match (m.game.home_score, m.game.away_score) {
            (Some(h), Some(a)) => (h, a),
            _ => return Err(EngineError::UndecidedMatch { match_id: m.game.id }),
        };

        let rows = groups.entry(group).or_default();

        let home = row_index(rows, &m.home_team);
        rows[home].goals_for += home_score;
        rows[home].goals_against += away_score;

        let away = row_index(rows, &m.away_team);
        rows[away].goals_for += away_score;
        rows[away].goals_against += home_score;

        if home_score > away_score {
            rows[home].points += 3;
        } else if away_score > home_score {
            rows[away].points += 3;
        } else {
            rows[home].points += 1;
            rows[away].points += 1;
        }
    }

    let mut standings = Vec::with_capacity(groups.len());
    for (group, mut rows) in groups {
        rows.sort_by(standings_sort_key);
        if rows.len() < 3 {
            return Err(EngineError::InsufficientGroupSize {
                group,
                found: rows.len(),
            });
        }
        standings.push(GroupStandings { group, rows });
    }
    Ok(standings)
}

/// All third-placed rows across groups, tagged with their group name, for
/// the best-thirds seeding step.
pub fn third_placed_rows(standings: &[GroupStandings]) -> Vec<(&str, &TeamStanding)> {
    standings
        .iter()
        .map(|g| (g.group.as_str(), g.third()))
        .collect()
}

fn row_index(rows: &mut Vec<TeamStanding>, team: &Team) -> usize {
    match rows.iter().position(|r| r.team.id == team.id) {
        Some(idx) => idx,
        None => {
            rows.push(TeamStanding::new(team.clone()));
            rows.len() - 1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::matches::Match;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn team(name: &str, code: &str) -> Team {
        Team {
            id: Uuid::new_v4(),
            name: name.to_string(),
            code: code.to_string(),
        }
    }

    fn group_match(
        group: &str,
        home: &Team,
        away: &Team,
        score: Option<(i32, i32)>,
    ) -> MatchWithTeams {
        let kickoff = Utc.with_ymd_and_hms(2026, 6, 12, 15, 0, 0).unwrap();
        MatchWithTeams {
            game: Match {
                id: Uuid::new_v4(),
                tournament_id: Uuid::new_v4(),
                stage_id: Uuid::new_v4(),
                home_team_id: home.id,
                away_team_id: away.id,
                kickoff,
                group_name: Some(group.to_string()),
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
    fn three_team_round_robin_orders_by_points() {
        let bra = team("Brazil", "BRA");
        let arg = team("Argentina", "ARG");
        let chi = team("Chile", "CHI");

        let matches = vec![
            group_match("A", &bra, &arg, Some((2, 0))),
            group_match("A", &arg, &chi, Some((3, 1))),
            group_match("A", &chi, &bra, Some((0, 1))),
        ];

        let standings = calculate_group_standings(&matches).unwrap();
        assert_eq!(standings.len(), 1);
        let group = &standings[0];
        assert_eq!(group.winner().team.code, "BRA");
        assert_eq!(group.winner().points, 6);
        assert_eq!(group.runner_up().team.code, "ARG");
        assert_eq!(group.runner_up().points, 3);
        assert_eq!(group.third().team.code, "CHI");
        assert_eq!(group.third().points, 0);
    }

    #[test]
    fn four_team_group_uses_goal_difference_then_goals_for() {
        let a = team("Austria", "AUT");
        let b = team("Belgium", "BEL");
        let c = team("Croatia", "CRO");
        let d = team("Denmark", "DEN");

        // a and b both finish on 6 points; a has the better goal difference.
        let matches = vec![
            group_match("B", &a, &b, Some((3, 0))),
            group_match("B", &c, &d, Some((2, 2))),
            group_match("B", &a, &c, Some((2, 0))),
            group_match("B", &b, &d, Some((1, 0))),
            group_match("B", &a, &d, Some((0, 1))),
            group_match("B", &b, &c, Some((2, 1))),
        ];

        let standings = calculate_group_standings(&matches).unwrap();
        let rows = &standings[0].rows;
        assert_eq!(rows[0].team.code, "AUT"); // 6 pts, +4
        assert_eq!(rows[1].team.code, "BEL"); // 6 pts, -1
        assert_eq!(rows[2].team.code, "DEN"); // 4 pts
        assert_eq!(rows[3].team.code, "CRO"); // 1 pt
    }

    #[test]
    fn identical_records_fall_back_to_team_name() {
        let x = team("Zambia", "ZAM");
        let y = team("Albania", "ALB");
        let z = team("Mexico", "MEX");

        // All three draw 1-1 with each other: identical points, difference
        // and goals. Alphabetical order of names decides.
        let matches = vec![
            group_match("C", &x, &y, Some((1, 1))),
            group_match("C", &y, &z, Some((1, 1))),
            group_match("C", &z, &x, Some((1, 1))),
        ];

        let standings = calculate_group_standings(&matches).unwrap();
        let rows = &standings[0].rows;
        assert_eq!(rows[0].team.name, "Albania");
        assert_eq!(rows[1].team.name, "Mexico");
        assert_eq!(rows[2].team.name, "Zambia");
    }

    #[test]
    fn unfinished_match_is_an_error() {
        let a = team("Austria", "AUT");
        let b = team("Belgium", "BEL");
        let matches = vec![group_match("A", &a, &b, None)];

        let err = calculate_group_standings(&matches).unwrap_err();
        assert!(matches!(err, EngineError::UndecidedMatch { .. }));
    }

    #[test]
    fn missing_group_name_is_an_error() {
        let a = team("Austria", "AUT");
        let b = team("Belgium", "BEL");
        let mut m = group_match("A", &a, &b, Some((1, 0)));
        m.game.group_name = None;

        let err = calculate_group_standings(&[m]).unwrap_err();
        assert!(matches!(err, EngineError::PreconditionNotMet(_)));
    }

    #[test]
    fn group_with_fewer_than_three_teams_is_an_error() {
        let a = team("Austria", "AUT");
        let b = team("Belgium", "BEL");
        let matches = vec![group_match("A", &a, &b, Some((1, 0)))];

        let err = calculate_group_standings(&matches).unwrap_err();
        match err {
            EngineError::InsufficientGroupSize { group, found } => {
                assert_eq!(group, "A");
                assert_eq!(found, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn groups_are_reported_in_name_order() {
        let a = team("Austria", "AUT");
        let b = team("Belgium", "BEL");
        let c = team("Croatia", "CRO");
        let d = team("Denmark", "DEN");
        let e = team("Ecuador", "ECU");
        let f = team("France", "FRA");

        let matches = vec![
            group_match("B", &d, &e, Some((1, 0))),
            group_match("B", &e, &f, Some((1, 0))),
            group_match("B", &f, &d, Some((1, 0))),
            group_match("A", &a, &b, Some((1, 0))),
            group_match("A", &b, &c, Some((1, 0))),
            group_match("A", &c, &a, Some((1, 0))),
        ];

        let standings = calculate_group_standings(&matches).unwrap();
        assert_eq!(standings[0].group, "A");
        assert_eq!(standings[1].group, "B");
    }
}
