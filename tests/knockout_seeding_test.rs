//! End-to-end seeding of the first knockout round from a fully decided
//! 12-group, 3-teams-per-group tournament, plus the progression of winners
//! through a follow-up round. Runs entirely on the pure engine.

use chrono::{Duration, TimeZone, Utc};
use uuid::Uuid;

use bolao_backend::models::matches::{Match, MatchWithTeams};
use bolao_backend::models::team::Team;
use bolao_backend::tournament::bracket::{pair_next_round, seed_round_of_32, Pairing};
use bolao_backend::tournament::standings::calculate_group_standings;

const GROUPS: [&str; 12] = ["A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L"];

fn team(code: &str) -> Team {
    Team {
        id: Uuid::new_v4(),
        name: format!("Team {code}"),
        code: code.to_string(),
    }
}

fn played(group: Option<&str>, home: &Team, away: &Team, score: (i32, i32)) -> MatchWithTeams {
    let kickoff = Utc.with_ymd_and_hms(2026, 6, 12, 15, 0, 0).unwrap();
    MatchWithTeams {
        game: Match {
            id: Uuid::new_v4(),
            tournament_id: Uuid::new_v4(),
            stage_id: Uuid::new_v4(),
            home_team_id: home.id,
            away_team_id: away.id,
            kickoff,
            group_name: group.map(str::to_string),
            home_score: Some(score.0),
            away_score: Some(score.1),
            home_penalties: None,
            away_penalties: None,
            created_at: kickoff,
            updated_at: kickoff,
        },
        home_team: home.clone(),
        away_team: away.clone(),
    }
}

/// Full decided group stage. In every group the "1" team wins both its
/// matches and the "2" team beats the "3" team; the third-placed teams'
/// goals scored rise with the group letter, so the 8 best thirds are the
/// groups E through L.
fn decided_group_stage() -> Vec<MatchWithTeams> {
    let mut matches = Vec::new();
    for (index, group) in GROUPS.into_iter().enumerate() {
        let first = team(&format!("{group}1"));
        let second = team(&format!("{group}2"));
        let third = team(&format!("{group}3"));
        let strength = index as i32;

        matches.push(played(Some(group), &first, &second, (2, 0)));
        matches.push(played(Some(group), &first, &third, (1, 0)));
        matches.push(played(
            Some(group),
            &second,
            &third,
            (strength + 2, strength),
        ));
    }
    matches
}

#[test]
fn seeds_sixteen_round_of_32_matchups_from_twelve_groups() {
    let standings = calculate_group_standings(&decided_group_stage()).unwrap();
    assert_eq!(standings.len(), 12);

    let pairings = seed_round_of_32(&standings).unwrap();
    assert_eq!(pairings.len(), 16);

    let codes: Vec<(&str, &str)> = pairings
        .iter()
        .map(|p| (p.home.code.as_str(), p.away.code.as_str()))
        .collect();

    // Tier 1: winners against the paired group's runners-up.
    let expected_cross_group = [
        ("A1", "B2"),
        ("B1", "A2"),
        ("C1", "D2"),
        ("D1", "C2"),
        ("E1", "F2"),
        ("F1", "E2"),
        ("G1", "H2"),
        ("H1", "G2"),
        ("I1", "J2"),
        ("J1", "I2"),
        ("K1", "L2"),
        ("L1", "K2"),
    ];
    assert_eq!(&codes[..12], &expected_cross_group);

    // Tier 2: the 8 best thirds (groups E..L, L strongest) by rank.
    let expected_thirds = [
        ("L3", "E3"),
        ("K3", "F3"),
        ("J3", "G3"),
        ("I3", "H3"),
    ];
    assert_eq!(&codes[12..], &expected_thirds);

    // No knockout pairing carries a group label.
    assert!(pairings.iter().all(|p| p.label.is_none()));
}

#[test]
fn winners_progress_pairwise_into_the_next_round() {
    let standings = calculate_group_standings(&decided_group_stage()).unwrap();
    let pairings = seed_round_of_32(&standings).unwrap();

    // Play the round: every home side wins 1-0, kickoffs an hour apart in
    // pairing order, matching how generated matches are scheduled.
    let anchor = Utc.with_ymd_and_hms(2026, 6, 30, 0, 0, 0).unwrap();
    let round: Vec<MatchWithTeams> = pairings
        .iter()
        .enumerate()
        .map(|(i, Pairing { home, away, .. })| {
            let mut m = played(None, home, away, (1, 0));
            m.game.kickoff = anchor + Duration::hours(i as i64);
            m
        })
        .collect();

    let next = pair_next_round(&round).unwrap();
    assert_eq!(next.len(), 8);
    assert_eq!(next[0].home.code, "A1");
    assert_eq!(next[0].away.code, "B1");
    assert_eq!(next[5].home.code, "K1");
    assert_eq!(next[5].away.code, "L1");
    assert_eq!(next[6].home.code, "L3");
    assert_eq!(next[6].away.code, "K3");
    assert_eq!(next[7].home.code, "J3");
    assert_eq!(next[7].away.code, "I3");
}

#[test]
fn four_groups_cannot_seed_the_bracket() {
    let mut matches = Vec::new();
    for group in ["A", "B", "C", "D"] {
        let first = team(&format!("{group}1"));
        let second = team(&format!("{group}2"));
        let third = team(&format!("{group}3"));
        matches.push(played(Some(group), &first, &second, (2, 0)));
        matches.push(played(Some(group), &first, &third, (1, 0)));
        matches.push(played(Some(group), &second, &third, (3, 1)));
    }

    let standings = calculate_group_standings(&matches).unwrap();
    let err = seed_round_of_32(&standings).unwrap_err();
    assert!(matches!(
        err,
        bolao_backend::errors::EngineError::InsufficientThirdPlaceCandidates { found: 4 }
    ));
}
