//! # qn_core - Prediction Pool Scoring Engine
//!
//! Pick configuration and scoring for sports-prediction pools ("quinielas").
//! Hosts configure each tournament phase with a preset or custom rules;
//! this crate scores player picks against official results and explains
//! every point awarded.
//!
//! ## Features
//! - Additive match-pick rules (exact score, outcome, goal difference, ...)
//! - Group standings and knockout winner picks
//! - Per-rule breakdowns that always reconcile with the totals
//! - Presets generated from the tournament's live phase list
//! - Parallel leaderboard computation
//!
//! All scoring functions are pure: malformed or incomplete input scores zero
//! instead of failing, so one bad pick never aborts a pool.

pub mod api;
pub mod breakdown;
pub mod config;
pub mod error;
pub mod leaderboard;
pub mod models;
pub mod presets;
pub mod scoring;
pub mod structural;

pub use api::{
    auto_scale_config_json, check_phase_drift_json, compute_leaderboard_json,
    generate_preset_json, list_presets_json, score_match_pick_json, score_structural_phase_json,
};
pub use breakdown::{
    generate_group_standings_breakdown, generate_knockout_winner_breakdown,
    generate_match_pick_breakdown, BreakdownEntry, BreakdownRule,
};
pub use config::{
    load_pool_config, MatchPickType, MatchPickTypeConfig, PhasePickConfig, PhaseScoring,
    StructuralRules,
};
pub use error::{PoolError, Result};
pub use leaderboard::{compute_leaderboard, LeaderboardRow, PoolSnapshot};
pub use models::{MatchPick, MatchResult, ScoreLine};
pub use presets::{
    generate_dynamic_preset_config, get_all_presets, get_preset_by_key, TournamentPhase,
};
pub use scoring::{
    apply_auto_scaling, apply_auto_scaling_to_config, calculate_max_points_for_phase,
    calculate_max_points_for_pool, get_phase_config, is_match_based_scoring,
    is_structural_scoring, score_match_pick, PickEvaluation,
};
pub use structural::{
    score_group_standings, score_knockout_winner, score_structural_phase,
    score_user_structural_picks,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GroupStandings, KnockoutAdvance};
    use crate::config::{GroupStandingsRules, KnockoutWinnerRules};

    fn reference_config() -> MatchPickTypeConfig {
        MatchPickTypeConfig::new()
            .with_rule(MatchPickType::ExactScore, 20)
            .with_rule(MatchPickType::MatchOutcome90Min, 5)
            .with_rule(MatchPickType::GoalDifference, 2)
    }

    #[test]
    fn test_exact_score_scenario() {
        let pick = MatchPick::score(2, 1);
        let result = MatchResult::new(2, 1);
        let evaluation = score_match_pick(Some(&pick), Some(&result), &reference_config());
        assert_eq!(evaluation.total_points, 27);
    }

    #[test]
    fn test_outcome_scenario() {
        let pick = MatchPick::score(3, 0);
        let result = MatchResult::new(2, 0);
        let evaluation = score_match_pick(Some(&pick), Some(&result), &reference_config());
        assert_eq!(evaluation.total_points, 5);
    }

    #[test]
    fn test_group_standings_scenario() {
        let rules: GroupStandingsRules = serde_json::from_value(serde_json::json!({
            "pointsPerExactPosition": 10,
            "bonusPerfectGroupEnabled": true,
            "bonusPerfectGroup": 20
        }))
        .unwrap();
        let pick = GroupStandings::new("A", &["A", "B", "C", "D"]);
        let result = GroupStandings::new("A", &["A", "C", "B", "D"]);
        assert_eq!(score_group_standings(&pick, &result, &rules), 20);
    }

    #[test]
    fn test_knockout_scenario() {
        let rules = KnockoutWinnerRules { points_per_correct_advance: 15 };
        let pick = KnockoutAdvance::new("sf1", "t_BRA");
        let result = KnockoutAdvance::new("sf1", "t_BRA");
        assert_eq!(score_knockout_winner(&pick, &result, &rules), 15);
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert_eq!(SCHEMA_VERSION, 1);
    }
}
