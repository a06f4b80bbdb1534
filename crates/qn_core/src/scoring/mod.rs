//! # Match-Pick Scoring Engine
//!
//! Scores one player's pick for one match against the official result under a
//! phase's [`MatchPickTypeConfig`]. Rules are independent and additive: one
//! pick can collect points from several matching rules.
//!
//! Incomplete input never fails: a missing pick, a missing result or unusable
//! goal counts score zero with an empty breakdown.

mod auto_scale;
mod max_points;


pub use auto_scale::{apply_auto_scaling, apply_auto_scaling_to_config};
pub use max_points::{calculate_max_points_for_phase, calculate_max_points_for_pool};

use crate::config::{MatchPickType, MatchPickTypeConfig, PhasePickConfig};
use crate::models::{MatchPick, MatchResult, Prediction, ScoreLine};
use serde::{Deserialize, Serialize};

/// One matched rule and the points it contributed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleHit {
    #[serde(rename = "type")]
    pub rule_type: MatchPickType,
    pub matched: bool,
    pub points: u32,
}

/// Total points of a pick and the rules that produced them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickEvaluation {
    pub total_points: u32,
    pub breakdown: Vec<RuleHit>,
}

impl PickEvaluation {
    pub fn matched(&self, rule_type: MatchPickType) -> bool {
        self.breakdown.iter().any(|hit| hit.rule_type == rule_type && hit.matched)
    }
}

/// Whether `rule_type` holds for this prediction and official score.
///
/// Outcome-only predictions can only satisfy `MATCH_OUTCOME_90MIN`.
pub fn rule_matches(rule_type: MatchPickType, prediction: &Prediction, result: &ScoreLine) -> bool {
    let pick = match prediction {
        Prediction::Score(pick) => pick,
        Prediction::Outcome(outcome) => {
            return rule_type == MatchPickType::MatchOutcome90Min && *outcome == result.outcome();
        }
    };

    let home_correct = pick.home_goals == result.home_goals;
    let away_correct = pick.away_goals == result.away_goals;

    match rule_type {
        MatchPickType::ExactScore => home_correct && away_correct,
        MatchPickType::GoalDifference => pick.goal_difference() == result.goal_difference(),
        MatchPickType::PartialScore => home_correct != away_correct,
        MatchPickType::TotalGoals => pick.total_goals() == result.total_goals(),
        MatchPickType::MatchOutcome90Min => pick.outcome() == result.outcome(),
        MatchPickType::HomeGoals => home_correct,
        MatchPickType::AwayGoals => away_correct,
    }
}

/// Sum of point values, capped at `u32::MAX` instead of overflowing
pub(crate) fn saturating_sum(points: impl IntoIterator<Item = u32>) -> u32 {
    points.into_iter().fold(0, u32::saturating_add)
}

/// Prediction and official score when both are usable
pub(crate) fn scorable(
    pick: Option<&MatchPick>,
    result: Option<&MatchResult>,
) -> Option<(Prediction, ScoreLine)> {
    let prediction = pick?.prediction()?;
    let score = result?.score_line()?;
    Some((prediction, score))
}

/// Score a pick against an official result.
///
/// Only matched, enabled rules appear in the breakdown; see
/// [`crate::breakdown::generate_match_pick_breakdown`] for the full view.
pub fn score_match_pick(
    pick: Option<&MatchPick>,
    result: Option<&MatchResult>,
    config: &MatchPickTypeConfig,
) -> PickEvaluation {
    let Some((prediction, score)) = scorable(pick, result) else {
        log::trace!("Skipping incomplete pick/result pair");
        return PickEvaluation::default();
    };

    let breakdown: Vec<RuleHit> = config
        .enabled_rules()
        .filter(|(rule_type, _)| rule_matches(*rule_type, &prediction, &score))
        .map(|(rule_type, points)| RuleHit { rule_type, matched: true, points })
        .collect();

    let total_points = saturating_sum(breakdown.iter().map(|hit| hit.points));
    PickEvaluation { total_points, breakdown }
}

pub fn is_match_based_scoring(phase: &PhasePickConfig) -> bool {
    phase.requires_score()
}

pub fn is_structural_scoring(phase: &PhasePickConfig) -> bool {
    !phase.requires_score()
}

/// Exact lookup by phase id. No fuzzy matching: a caller holding a stale
/// phase id gets `None` and no points are computed for that phase.
pub fn get_phase_config<'a>(
    pick_types_config: &'a [PhasePickConfig],
    phase_id: &str,
) -> Option<&'a PhasePickConfig> {
    pick_types_config.iter().find(|phase| phase.phase_id == phase_id)
}
