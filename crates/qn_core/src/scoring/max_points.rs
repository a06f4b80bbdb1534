//! Maximum achievable points, used for effectiveness percentages.

use super::saturating_sum;
use crate::config::{PhasePickConfig, PhaseScoring, StructuralRules};
use std::collections::HashMap;

/// Most points one scoring unit of the phase can yield.
///
/// A unit is a match for score-based and knockout phases, and a group of
/// `GROUP_SIZE` teams for group standings phases.
pub fn calculate_max_points_for_phase(phase: &PhasePickConfig) -> u32 {
    match &phase.scoring {
        PhaseScoring::Match(rules) => {
            saturating_sum(rules.enabled_rules().map(|(_, points)| points))
        }
        PhaseScoring::Structural(StructuralRules::GroupStandings(rules)) => {
            rules.max_points_per_group()
        }
        PhaseScoring::Structural(StructuralRules::KnockoutWinner(rules)) => {
            rules.points_per_correct_advance
        }
    }
}

/// Pool-wide maximum: per-phase maximum times the number of units in that
/// phase. Phases absent from `unit_counts_by_phase` contribute nothing.
pub fn calculate_max_points_for_pool(
    pick_types_config: &[PhasePickConfig],
    unit_counts_by_phase: &HashMap<String, u32>,
) -> u32 {
    saturating_sum(pick_types_config.iter().map(|phase| {
        let count = unit_counts_by_phase.get(&phase.phase_id).copied().unwrap_or(0);
        calculate_max_points_for_phase(phase).saturating_mul(count)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        GroupStandingsRules, KnockoutWinnerRules, MatchPickType, MatchPickTypeConfig,
    };

    fn pool() -> Vec<PhasePickConfig> {
        vec![
            PhasePickConfig::match_based(
                "groups",
                "Group stage",
                MatchPickTypeConfig::new()
                    .with_rule(MatchPickType::ExactScore, 20)
                    .with_rule(MatchPickType::MatchOutcome90Min, 5)
                    .with_disabled_rule(MatchPickType::GoalDifference, 2),
            ),
            PhasePickConfig::structural(
                "final",
                "Final",
                StructuralRules::KnockoutWinner(KnockoutWinnerRules {
                    points_per_correct_advance: 15,
                }),
            ),
            PhasePickConfig::structural(
                "standings",
                "Standings",
                StructuralRules::GroupStandings(GroupStandingsRules::flat(10, Some(20))),
            ),
        ]
    }

    #[test]
    fn test_phase_max_ignores_disabled_rules() {
        assert_eq!(calculate_max_points_for_phase(&pool()[0]), 25);
        assert_eq!(calculate_max_points_for_phase(&pool()[1]), 15);
        assert_eq!(calculate_max_points_for_phase(&pool()[2]), 60);
    }

    #[test]
    fn test_pool_max() {
        let counts = HashMap::from([
            ("groups".to_string(), 48),
            ("final".to_string(), 1),
            ("standings".to_string(), 12),
        ]);
        assert_eq!(calculate_max_points_for_pool(&pool(), &counts), 25 * 48 + 15 + 60 * 12);
    }

    #[test]
    fn test_pool_max_saturates() {
        let config = vec![PhasePickConfig::match_based(
            "groups",
            "Group stage",
            MatchPickTypeConfig::new()
                .with_rule(MatchPickType::ExactScore, u32::MAX - 1)
                .with_rule(MatchPickType::MatchOutcome90Min, 10),
        )];
        assert_eq!(calculate_max_points_for_phase(&config[0]), u32::MAX);

        let counts = HashMap::from([("groups".to_string(), 48)]);
        assert_eq!(calculate_max_points_for_pool(&config, &counts), u32::MAX);
    }

    #[test]
    fn test_pool_max_without_counts() {
        assert_eq!(calculate_max_points_for_pool(&pool(), &HashMap::new()), 0);
    }
}
