//! # Breakdown Generator
//!
//! Per-rule explanation of a score for audit views. Unlike the engines, every
//! configured rule is listed, including disabled and unmatched ones. The
//! matches are decided by the same predicates the engines use, so the awarded
//! points always add up to the engine total.

use crate::config::{GroupStandingsRules, KnockoutWinnerRules, MatchPickType, MatchPickTypeConfig};
use crate::models::{GroupStandings, KnockoutAdvance, MatchPick, MatchResult};
use crate::scoring::{rule_matches, saturating_sum, scorable};
use crate::structural::{is_perfect_group, position_hits};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BreakdownRule {
    MatchRule {
        #[serde(rename = "type")]
        rule_type: MatchPickType,
    },
    /// 1-based group position
    GroupPosition { position: usize },
    PerfectGroupBonus,
    KnockoutWinner,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownEntry {
    pub rule: BreakdownRule,
    pub rule_name: String,
    pub enabled: bool,
    pub matched: bool,
    pub points_awarded: u32,
    /// Configured points of the rule, reported even while it is disabled
    pub points_max: u32,
}

impl BreakdownEntry {
    fn new(
        rule: BreakdownRule,
        rule_name: String,
        enabled: bool,
        matched: bool,
        points: u32,
    ) -> Self {
        let matched = enabled && matched;
        Self {
            rule,
            rule_name,
            enabled,
            matched,
            points_awarded: if matched { points } else { 0 },
            points_max: points,
        }
    }
}

pub fn total_awarded(entries: &[BreakdownEntry]) -> u32 {
    saturating_sum(entries.iter().map(|e| e.points_awarded))
}

/// Points available from enabled rules only
pub fn total_possible(entries: &[BreakdownEntry]) -> u32 {
    saturating_sum(entries.iter().filter(|e| e.enabled).map(|e| e.points_max))
}

/// One entry per configured rule. Empty when the pick or result is incomplete.
pub fn generate_match_pick_breakdown(
    pick: Option<&MatchPick>,
    result: Option<&MatchResult>,
    config: &MatchPickTypeConfig,
) -> Vec<BreakdownEntry> {
    let Some((prediction, score)) = scorable(pick, result) else {
        return Vec::new();
    };

    config
        .rules()
        .map(|(rule_type, setting)| {
            BreakdownEntry::new(
                BreakdownRule::MatchRule { rule_type },
                rule_type.label().to_string(),
                setting.enabled,
                rule_matches(rule_type, &prediction, &score),
                setting.points,
            )
        })
        .collect()
}

/// One entry per official position plus one for the perfect group bonus.
/// Empty when either ordering is missing.
pub fn generate_group_standings_breakdown(
    pick: &GroupStandings,
    result: &GroupStandings,
    rules: &GroupStandingsRules,
) -> Vec<BreakdownEntry> {
    let (pick_teams, result_teams) = (pick.teams(), result.teams());
    if pick_teams.is_empty() || result_teams.is_empty() {
        return Vec::new();
    }

    let mut entries: Vec<BreakdownEntry> = position_hits(pick_teams, result_teams)
        .map(|(index, matched)| {
            BreakdownEntry::new(
                BreakdownRule::GroupPosition { position: index + 1 },
                format!("Position {}", index + 1),
                true,
                matched,
                rules.points_for_position(index),
            )
        })
        .collect();

    entries.push(BreakdownEntry::new(
        BreakdownRule::PerfectGroupBonus,
        "Perfect group bonus".to_string(),
        rules.perfect_group_bonus.is_some(),
        is_perfect_group(pick_teams, result_teams),
        rules.bonus_points(),
    ));

    entries
}

pub fn generate_knockout_winner_breakdown(
    pick: &KnockoutAdvance,
    result: &KnockoutAdvance,
    rules: &KnockoutWinnerRules,
) -> BreakdownEntry {
    let matched = matches!((pick.winner(), result.winner()), (Some(p), Some(r)) if p == r);
    BreakdownEntry::new(
        BreakdownRule::KnockoutWinner,
        "Correct winner".to_string(),
        true,
        matched,
        rules.points_per_correct_advance,
    )
}
