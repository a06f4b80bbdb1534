//! # Pool Leaderboard
//!
//! Scores every player of a pool against the published results and ranks
//! them. Players are scored independently and in parallel; the inputs are
//! read-only.

use crate::config::{MatchPickTypeConfig, PhasePickConfig, PhaseScoring, StructuralRules};
use crate::models::{MatchPick, MatchResult, ScoreLine, StructuralResult, UserStructuralPick};
use crate::scoring::{
    calculate_max_points_for_phase, get_phase_config, saturating_sum, score_match_pick,
};
use crate::structural::score_user_structural_picks;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchPickEntry {
    pub match_id: String,
    /// A null or malformed pick loads as empty and scores zero
    #[serde(default, deserialize_with = "crate::models::pick::lenient_match_pick")]
    pub pick: MatchPick,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResultEntry {
    pub match_id: String,
    pub phase_id: String,
    pub result: MatchResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPicks {
    pub user_id: String,
    #[serde(default)]
    pub match_picks: Vec<MatchPickEntry>,
    #[serde(default)]
    pub structural_picks: Vec<UserStructuralPick>,
}

/// Everything needed to rank a pool at one point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolSnapshot {
    pub config: Vec<PhasePickConfig>,
    #[serde(default)]
    pub match_results: Vec<MatchResultEntry>,
    #[serde(default)]
    pub structural_results: Vec<StructuralResult>,
    pub players: Vec<PlayerPicks>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardRow {
    pub rank: u32,
    pub user_id: String,
    pub match_points: u32,
    pub structural_points: u32,
    pub total_points: u32,
    pub exact_scores: u32,
    pub scored_matches: u32,
    pub effectiveness_pct: f64,
}

/// Published match results that can be scored, with their phase rules
struct ScorableResults<'a> {
    by_match: HashMap<&'a str, (ScoreLine, &'a MatchPickTypeConfig)>,
    max_available: u32,
}

impl<'a> ScorableResults<'a> {
    fn build(snapshot: &'a PoolSnapshot) -> Self {
        let mut by_match = HashMap::new();
        let mut max_available: u32 = 0;

        for entry in &snapshot.match_results {
            let Some(phase) = get_phase_config(&snapshot.config, &entry.phase_id) else {
                log::warn!(
                    "No pick configuration for phase '{}' (match {}); result not scored",
                    entry.phase_id,
                    entry.match_id
                );
                continue;
            };
            let (PhaseScoring::Match(rules), Some(score)) =
                (&phase.scoring, entry.result.score_line())
            else {
                log::debug!("Result of match {} is not scorable as a match pick", entry.match_id);
                continue;
            };

            if by_match.insert(entry.match_id.as_str(), (score, rules)).is_none() {
                max_available = max_available.saturating_add(calculate_max_points_for_phase(phase));
            }
        }

        let structural_max =
            structural_max_available(&snapshot.structural_results, &snapshot.config);
        max_available = max_available.saturating_add(structural_max);
        Self { by_match, max_available }
    }
}

fn structural_max_available(results: &[StructuralResult], config: &[PhasePickConfig]) -> u32 {
    saturating_sum(results.iter().filter_map(|result| {
        let phase = get_phase_config(config, &result.phase_id)?;
        let data = result.result_data.as_ref()?;
        let units = match phase.structural_picks()? {
            StructuralRules::GroupStandings(_) => {
                data.groups.iter().filter(|g| !g.teams().is_empty()).count()
            }
            StructuralRules::KnockoutWinner(_) => {
                data.matches.iter().filter(|m| m.winner().is_some()).count()
            }
        };
        let units = u32::try_from(units).unwrap_or(u32::MAX);
        Some(calculate_max_points_for_phase(phase).saturating_mul(units))
    }))
}

fn score_player(
    player: &PlayerPicks,
    scorable: &ScorableResults<'_>,
    snapshot: &PoolSnapshot,
) -> LeaderboardRow {
    let mut match_points: u32 = 0;
    let mut exact_scores = 0;
    let mut scored_matches = 0;

    for entry in &player.match_picks {
        let Some((score, rules)) = scorable.by_match.get(entry.match_id.as_str()) else {
            continue;
        };
        let result = MatchResult::from(*score);
        let points = score_match_pick(Some(&entry.pick), Some(&result), rules).total_points;
        match_points = match_points.saturating_add(points);
        scored_matches += 1;
        if entry.pick.score_line() == Some(*score) {
            exact_scores += 1;
        }
    }

    let structural_points = score_user_structural_picks(
        &player.structural_picks,
        &snapshot.structural_results,
        &snapshot.config,
    );

    let total_points = match_points.saturating_add(structural_points);
    let effectiveness_pct = if scorable.max_available > 0 {
        total_points as f64 * 100.0 / scorable.max_available as f64
    } else {
        0.0
    };

    LeaderboardRow {
        rank: 0,
        user_id: player.user_id.clone(),
        match_points,
        structural_points,
        total_points,
        exact_scores,
        scored_matches,
        effectiveness_pct,
    }
}

/// Rank all players of a pool.
///
/// Equal totals share a rank and the next rank is skipped (1, 1, 3). Within a
/// tie, rows are listed by exact scores and then user id.
pub fn compute_leaderboard(snapshot: &PoolSnapshot) -> Vec<LeaderboardRow> {
    let scorable = ScorableResults::build(snapshot);

    let mut rows: Vec<LeaderboardRow> = snapshot
        .players
        .par_iter()
        .map(|player| score_player(player, &scorable, snapshot))
        .collect();

    rows.sort_by(|a, b| {
        (Reverse(a.total_points), Reverse(a.exact_scores), &a.user_id).cmp(&(
            Reverse(b.total_points),
            Reverse(b.exact_scores),
            &b.user_id,
        ))
    });

    let mut previous_total = None;
    let mut current_rank = 0;
    for (index, row) in rows.iter_mut().enumerate() {
        if previous_total != Some(row.total_points) {
            current_rank = index as u32 + 1;
            previous_total = Some(row.total_points);
        }
        row.rank = current_rank;
    }

    log::debug!(
        "Ranked {} players over {} scorable matches",
        rows.len(),
        scorable.by_match.len()
    );
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{KnockoutWinnerRules, MatchPickType};
    use crate::models::{KnockoutAdvance, StructuralSelections};

    fn match_entry(match_id: &str, home: u32, away: u32) -> MatchPickEntry {
        MatchPickEntry { match_id: match_id.to_string(), pick: MatchPick::score(home, away) }
    }

    fn result_entry(match_id: &str, phase_id: &str, home: u32, away: u32) -> MatchResultEntry {
        MatchResultEntry {
            match_id: match_id.to_string(),
            phase_id: phase_id.to_string(),
            result: MatchResult::new(home, away),
        }
    }

    fn player(user_id: &str, picks: Vec<MatchPickEntry>) -> PlayerPicks {
        PlayerPicks {
            user_id: user_id.to_string(),
            match_picks: picks,
            structural_picks: Vec::new(),
        }
    }

    fn snapshot() -> PoolSnapshot {
        PoolSnapshot {
            config: vec![
                PhasePickConfig::match_based(
                    "groups",
                    "Groups",
                    MatchPickTypeConfig::new()
                        .with_rule(MatchPickType::ExactScore, 20)
                        .with_rule(MatchPickType::MatchOutcome90Min, 5),
                ),
                PhasePickConfig::structural(
                    "final",
                    "Final",
                    StructuralRules::KnockoutWinner(KnockoutWinnerRules {
                        points_per_correct_advance: 15,
                    }),
                ),
            ],
            match_results: vec![
                result_entry("m1", "groups", 2, 1),
                result_entry("m2", "groups", 0, 0),
                // stale phase id: never scored
                result_entry("m3", "group_stage", 1, 0),
            ],
            structural_results: vec![StructuralResult {
                phase_id: "final".to_string(),
                result_data: Some(StructuralSelections::matches(vec![KnockoutAdvance::new(
                    "f1", "t_BRA",
                )])),
            }],
            players: vec![
                player("ana", vec![match_entry("m1", 2, 1), match_entry("m2", 1, 1)]),
                player("bo", vec![match_entry("m1", 1, 0), match_entry("m3", 1, 0)]),
                player("cy", vec![match_entry("m1", 3, 0), match_entry("m2", 2, 2)]),
                player("di", Vec::new()),
            ],
        }
    }

    #[test]
    fn test_ranking_and_totals() {
        let rows = compute_leaderboard(&snapshot());
        let order: Vec<(&str, u32, u32)> =
            rows.iter().map(|r| (r.user_id.as_str(), r.rank, r.total_points)).collect();
        assert_eq!(order, vec![("ana", 1, 30), ("cy", 2, 10), ("bo", 3, 5), ("di", 4, 0)]);

        let ana = &rows[0];
        assert_eq!(ana.exact_scores, 1);
        assert_eq!(ana.scored_matches, 2);
        assert!((ana.effectiveness_pct - 30.0 * 100.0 / 65.0).abs() < 1e-9);
    }

    #[test]
    fn test_stale_phase_results_are_not_scored() {
        let rows = compute_leaderboard(&snapshot());
        let bo = rows.iter().find(|r| r.user_id == "bo").unwrap();
        assert_eq!(bo.scored_matches, 1);
        assert_eq!(bo.match_points, 5);
    }

    #[test]
    fn test_structural_points_included() {
        let mut snapshot = snapshot();
        snapshot.players[3].structural_picks.push(UserStructuralPick {
            phase_id: "final".to_string(),
            pick_data: Some(StructuralSelections::matches(vec![KnockoutAdvance::new(
                "f1", "t_BRA",
            )])),
        });

        let rows = compute_leaderboard(&snapshot);
        let di = rows.iter().find(|r| r.user_id == "di").unwrap();
        assert_eq!(di.structural_points, 15);
        assert_eq!(di.total_points, 15);
        assert_eq!(di.rank, 2);
    }

    #[test]
    fn test_ties_share_rank() {
        let mut snapshot = snapshot();
        snapshot.players = vec![
            player("zed", vec![match_entry("m1", 2, 1)]),
            player("amy", vec![match_entry("m1", 3, 1)]),
            player("bob", vec![match_entry("m1", 2, 1)]),
            player("cat", Vec::new()),
        ];

        let rows = compute_leaderboard(&snapshot);
        let order: Vec<(&str, u32)> = rows.iter().map(|r| (r.user_id.as_str(), r.rank)).collect();
        assert_eq!(order, vec![("bob", 1), ("zed", 1), ("amy", 3), ("cat", 4)]);
    }

    #[test]
    fn test_malformed_pick_scores_zero_for_that_player_only() {
        let snapshot: PoolSnapshot = serde_json::from_value(serde_json::json!({
            "config": [{
                "phaseId": "groups",
                "requiresScore": true,
                "matchPicks": {"EXACT_SCORE": {"enabled": true, "points": 20}}
            }],
            "matchResults": [
                {"matchId": "m1", "phaseId": "groups", "result": {"homeGoals": 1, "awayGoals": 0}}
            ],
            "players": [
                {"userId": "good", "matchPicks": [
                    {"matchId": "m1", "pick": {"homeGoals": 1, "awayGoals": 0}}
                ]},
                {"userId": "bad_outcome", "matchPicks": [
                    {"matchId": "m1", "pick": {"outcome": "HOME_WIN"}}
                ]},
                {"userId": "null_pick", "matchPicks": [{"matchId": "m1", "pick": null}]},
                {"userId": "no_pick", "matchPicks": [{"matchId": "m1"}]},
                {"userId": "text_pick", "matchPicks": [{"matchId": "m1", "pick": "1-0"}]}
            ]
        }))
        .unwrap();

        let rows = compute_leaderboard(&snapshot);
        assert_eq!(rows.len(), 5);
        let top = &rows[0];
        assert_eq!((top.user_id.as_str(), top.rank, top.total_points), ("good", 1, 20));
        assert!(rows[1..].iter().all(|r| r.total_points == 0 && r.rank == 2));
    }

    #[test]
    fn test_huge_point_values_saturate() {
        let mut snapshot = snapshot();
        snapshot.config[0] = PhasePickConfig::match_based(
            "groups",
            "Groups",
            MatchPickTypeConfig::new()
                .with_rule(MatchPickType::ExactScore, u32::MAX - 1)
                .with_rule(MatchPickType::MatchOutcome90Min, u32::MAX - 1),
        );

        let rows = compute_leaderboard(&snapshot);
        assert_eq!(rows[0].user_id, "ana");
        assert_eq!(rows[0].total_points, u32::MAX);
        assert!(rows[0].effectiveness_pct <= 100.0);
    }

    #[test]
    fn test_empty_pool() {
        let snapshot = PoolSnapshot {
            config: Vec::new(),
            match_results: Vec::new(),
            structural_results: Vec::new(),
            players: vec![player("solo", vec![match_entry("m1", 1, 0)])],
        };
        let rows = compute_leaderboard(&snapshot);
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].effectiveness_pct, 0.0);
    }
}
