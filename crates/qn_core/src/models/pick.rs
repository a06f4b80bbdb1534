//! Match picks, official match results and the score lines they carry.

use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;

/// 90-minute outcome bucket of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchOutcome {
    #[serde(rename = "HOME", alias = "home")]
    HomeWin,
    #[serde(rename = "DRAW", alias = "draw")]
    Draw,
    #[serde(rename = "AWAY", alias = "away")]
    AwayWin,
}

/// A complete, validated score line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreLine {
    pub home_goals: u32,
    pub away_goals: u32,
}

impl ScoreLine {
    pub fn new(home_goals: u32, away_goals: u32) -> Self {
        Self { home_goals, away_goals }
    }

    pub fn goal_difference(&self) -> i64 {
        self.home_goals as i64 - self.away_goals as i64
    }

    pub fn total_goals(&self) -> u64 {
        self.home_goals as u64 + self.away_goals as u64
    }

    pub fn outcome(&self) -> MatchOutcome {
        match self.home_goals.cmp(&self.away_goals) {
            Ordering::Greater => MatchOutcome::HomeWin,
            Ordering::Equal => MatchOutcome::Draw,
            Ordering::Less => MatchOutcome::AwayWin,
        }
    }
}

/// What a pick actually predicts once incomplete fields are discarded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prediction {
    Score(ScoreLine),
    Outcome(MatchOutcome),
}

/// A player's pick for one match.
///
/// Goal counts that are missing, negative or not integers load as `None`;
/// such a pick falls back to its `outcome` if one was given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchPick {
    #[serde(
        default,
        deserialize_with = "lenient_goal_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub home_goals: Option<u32>,
    #[serde(
        default,
        deserialize_with = "lenient_goal_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub away_goals: Option<u32>,
    #[serde(
        default,
        deserialize_with = "lenient_outcome",
        skip_serializing_if = "Option::is_none"
    )]
    pub outcome: Option<MatchOutcome>,
}

impl MatchPick {
    pub fn score(home_goals: u32, away_goals: u32) -> Self {
        Self { home_goals: Some(home_goals), away_goals: Some(away_goals), outcome: None }
    }

    pub fn outcome_only(outcome: MatchOutcome) -> Self {
        Self { home_goals: None, away_goals: None, outcome: Some(outcome) }
    }

    pub fn score_line(&self) -> Option<ScoreLine> {
        Some(ScoreLine::new(self.home_goals?, self.away_goals?))
    }

    /// Score prediction when both goal counts are valid, otherwise the outcome
    pub fn prediction(&self) -> Option<Prediction> {
        self.score_line().map(Prediction::Score).or(self.outcome.map(Prediction::Outcome))
    }
}

/// Official result of a finished match
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    #[serde(
        default,
        deserialize_with = "lenient_goal_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub home_goals: Option<u32>,
    #[serde(
        default,
        deserialize_with = "lenient_goal_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub away_goals: Option<u32>,
}

impl MatchResult {
    pub fn new(home_goals: u32, away_goals: u32) -> Self {
        Self { home_goals: Some(home_goals), away_goals: Some(away_goals) }
    }

    pub fn score_line(&self) -> Option<ScoreLine> {
        Some(ScoreLine::new(self.home_goals?, self.away_goals?))
    }
}

impl From<ScoreLine> for MatchResult {
    fn from(score: ScoreLine) -> Self {
        Self::new(score.home_goals, score.away_goals)
    }
}

fn lenient_goal_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_u64()).and_then(|n| u32::try_from(n).ok()))
}

fn lenient_outcome<'de, D>(deserializer: D) -> Result<Option<MatchOutcome>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Whole-pick counterpart of the field-level parsers: `null` or a value that
/// is not a pick object loads as an empty pick, which scores zero.
pub(crate) fn lenient_match_pick<'de, D>(deserializer: D) -> Result<MatchPick, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}
