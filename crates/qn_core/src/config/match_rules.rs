//! Match-pick rule types and their per-phase point settings.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Rule types a score pick can be evaluated against
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchPickType {
    ExactScore,
    GoalDifference,
    PartialScore,
    TotalGoals,
    #[serde(rename = "MATCH_OUTCOME_90MIN")]
    MatchOutcome90Min,
    HomeGoals,
    AwayGoals,
}

impl MatchPickType {
    pub const ALL: [MatchPickType; 7] = [
        MatchPickType::ExactScore,
        MatchPickType::GoalDifference,
        MatchPickType::PartialScore,
        MatchPickType::TotalGoals,
        MatchPickType::MatchOutcome90Min,
        MatchPickType::HomeGoals,
        MatchPickType::AwayGoals,
    ];

    /// Display label for breakdown views
    pub fn label(&self) -> &'static str {
        match self {
            MatchPickType::ExactScore => "Exact score",
            MatchPickType::GoalDifference => "Goal difference",
            MatchPickType::PartialScore => "Partial score",
            MatchPickType::TotalGoals => "Total goals",
            MatchPickType::MatchOutcome90Min => "Match outcome (90 min)",
            MatchPickType::HomeGoals => "Home goals",
            MatchPickType::AwayGoals => "Away goals",
        }
    }
}

/// Whether a rule is active and what it is worth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSetting {
    pub enabled: bool,
    #[serde(default)]
    pub points: u32,
}

impl RuleSetting {
    pub fn enabled(points: u32) -> Self {
        Self { enabled: true, points }
    }

    pub fn disabled(points: u32) -> Self {
        Self { enabled: false, points }
    }

    /// Points this rule can contribute; disabled rules are worth nothing
    pub fn effective_points(&self) -> u32 {
        if self.enabled {
            self.points
        } else {
            0
        }
    }
}

/// Rule settings of one score-based phase, keyed by rule type.
/// Serialized as `{"EXACT_SCORE": {"enabled": true, "points": 20}, ...}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchPickTypeConfig {
    rules: BTreeMap<MatchPickType, RuleSetting>,
}

impl MatchPickTypeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule(mut self, rule_type: MatchPickType, points: u32) -> Self {
        self.rules.insert(rule_type, RuleSetting::enabled(points));
        self
    }

    pub fn with_disabled_rule(mut self, rule_type: MatchPickType, points: u32) -> Self {
        self.rules.insert(rule_type, RuleSetting::disabled(points));
        self
    }

    pub fn set(&mut self, rule_type: MatchPickType, setting: RuleSetting) {
        self.rules.insert(rule_type, setting);
    }

    pub fn get(&self, rule_type: MatchPickType) -> Option<&RuleSetting> {
        self.rules.get(&rule_type)
    }

    /// Every configured rule, enabled or not, in rule-type order
    pub fn rules(&self) -> impl Iterator<Item = (MatchPickType, &RuleSetting)> + '_ {
        self.rules.iter().map(|(rule_type, setting)| (*rule_type, setting))
    }

    pub fn enabled_rules(&self) -> impl Iterator<Item = (MatchPickType, u32)> + '_ {
        self.rules().filter(|(_, s)| s.enabled).map(|(rule_type, s)| (rule_type, s.points))
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
