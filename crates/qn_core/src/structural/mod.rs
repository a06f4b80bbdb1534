//! # Structural Scoring Engine
//!
//! Scores picks that carry no goal counts: the finishing order of a group and
//! the team advancing from a knockout match. Missing or mismatched input
//! scores zero; a phase without a published result is simply not scorable yet.

use crate::config::{
    GroupStandingsRules, KnockoutWinnerRules, PhasePickConfig, PhaseScoring, StructuralRules,
};
use crate::models::{
    GroupStandings, KnockoutAdvance, StructuralResult, StructuralSelections, UserStructuralPick,
};
use crate::scoring::saturating_sum;
use std::collections::HashMap;

/// Positions (index, team matched) of the official ordering that the pick can
/// be compared against
pub(crate) fn position_hits<'a>(
    pick: &'a [String],
    result: &'a [String],
) -> impl Iterator<Item = (usize, bool)> + 'a {
    result.iter().enumerate().map(move |(index, team)| (index, pick.get(index) == Some(team)))
}

pub(crate) fn is_perfect_group(pick: &[String], result: &[String]) -> bool {
    !result.is_empty() && pick == result
}

/// Points for one group's predicted ordering
pub fn score_group_standings(
    pick: &GroupStandings,
    result: &GroupStandings,
    rules: &GroupStandingsRules,
) -> u32 {
    let (pick_teams, result_teams) = (pick.teams(), result.teams());
    if pick_teams.is_empty() || result_teams.is_empty() {
        return 0;
    }

    let position_points = saturating_sum(
        position_hits(pick_teams, result_teams)
            .filter(|(_, matched)| *matched)
            .map(|(index, _)| rules.points_for_position(index)),
    );

    let bonus = match rules.perfect_group_bonus {
        Some(bonus) if is_perfect_group(pick_teams, result_teams) => bonus,
        _ => 0,
    };

    position_points.saturating_add(bonus)
}

/// Flat points when the predicted team advanced
pub fn score_knockout_winner(
    pick: &KnockoutAdvance,
    result: &KnockoutAdvance,
    rules: &KnockoutWinnerRules,
) -> u32 {
    match (pick.winner(), result.winner()) {
        (Some(picked), Some(advanced)) if picked == advanced => rules.points_per_correct_advance,
        _ => 0,
    }
}

/// Points for all of one player's structural picks in a phase
pub fn score_structural_phase(
    pick_data: Option<&StructuralSelections>,
    result_data: Option<&StructuralSelections>,
    phase: Option<&PhasePickConfig>,
) -> u32 {
    let (Some(pick_data), Some(result_data), Some(phase)) = (pick_data, result_data, phase) else {
        return 0;
    };

    match &phase.scoring {
        PhaseScoring::Structural(StructuralRules::GroupStandings(rules)) => {
            saturating_sum(pick_data.groups.iter().filter_map(|group| {
                result_data
                    .find_group(&group.group_id)
                    .map(|result| score_group_standings(group, result, rules))
            }))
        }
        PhaseScoring::Structural(StructuralRules::KnockoutWinner(rules)) => {
            saturating_sum(pick_data.matches.iter().filter_map(|advance| {
                result_data
                    .find_match(&advance.match_id)
                    .map(|result| score_knockout_winner(advance, result, rules))
            }))
        }
        PhaseScoring::Match(_) => {
            log::debug!("Phase {} is score-based; structural picks ignored", phase.phase_id);
            0
        }
    }
}

/// Sum of every structural pick of one user across a pool
pub fn score_user_structural_picks(
    user_picks: &[UserStructuralPick],
    structural_results: &[StructuralResult],
    pool_config: &[PhasePickConfig],
) -> u32 {
    let results_by_phase: HashMap<&str, &StructuralResult> =
        structural_results.iter().map(|r| (r.phase_id.as_str(), r)).collect();
    let config_by_phase: HashMap<&str, &PhasePickConfig> =
        pool_config.iter().map(|c| (c.phase_id.as_str(), c)).collect();

    saturating_sum(user_picks.iter().filter_map(|pick| {
        let result = results_by_phase.get(pick.phase_id.as_str())?;
        let config = config_by_phase.get(pick.phase_id.as_str())?;
        Some(score_structural_phase(
            pick.pick_data.as_ref(),
            result.result_data.as_ref(),
            Some(*config),
        ))
    }))
}
