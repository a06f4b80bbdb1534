//! Structural rule settings and the normalization of their stored shapes.
//!
//! Group standings configs exist in two stored shapes: per-position values
//! (`pointsPosition1..4`) and a flat `pointsPerExactPosition`. The perfect
//! group bonus is either flagged explicitly or implied by a positive
//! `bonusPerfectGroup`. Both collapse into [`GroupStandingsRules`] at load time.

use serde::{Deserialize, Serialize};

/// Number of positions with an individually configurable value
pub const GROUP_SIZE: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StructuralPickConfigRecord", into = "StructuralPickConfigRecord")]
pub enum StructuralRules {
    GroupStandings(GroupStandingsRules),
    KnockoutWinner(KnockoutWinnerRules),
}

impl StructuralRules {
    pub fn kind(&self) -> StructuralPickType {
        match self {
            StructuralRules::GroupStandings(_) => StructuralPickType::GroupStandings,
            StructuralRules::KnockoutWinner(_) => StructuralPickType::KnockoutWinner,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StructuralPickType {
    GroupStandings,
    KnockoutWinner,
}

/// Canonical group standings scoring
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "GroupStandingsConfigRecord", into = "GroupStandingsConfigRecord")]
pub struct GroupStandingsRules {
    pub position_points: [u32; GROUP_SIZE],
    /// Points for correct positions past the configurable ones
    pub fallback_points: u32,
    pub perfect_group_bonus: Option<u32>,
}

impl GroupStandingsRules {
    /// Same value for every position
    pub fn flat(points_per_position: u32, perfect_group_bonus: Option<u32>) -> Self {
        Self {
            position_points: [points_per_position; GROUP_SIZE],
            fallback_points: points_per_position,
            perfect_group_bonus,
        }
    }

    pub fn points_for_position(&self, index: usize) -> u32 {
        self.position_points.get(index).copied().unwrap_or(self.fallback_points)
    }

    pub fn bonus_points(&self) -> u32 {
        self.perfect_group_bonus.unwrap_or(0)
    }

    /// Best possible score for a group of `GROUP_SIZE` teams
    pub fn max_points_per_group(&self) -> u32 {
        self.position_points
            .iter()
            .fold(self.bonus_points(), |total, points| total.saturating_add(*points))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "KnockoutWinnerConfigRecord", into = "KnockoutWinnerConfigRecord")]
pub struct KnockoutWinnerRules {
    pub points_per_correct_advance: u32,
}

// ========== Stored shapes ==========

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "config", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StructuralPickConfigRecord {
    GroupStandings(GroupStandingsConfigRecord),
    KnockoutWinner(KnockoutWinnerConfigRecord),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupStandingsConfigRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points_position1: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points_position2: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points_position3: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points_position4: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points_per_exact_position: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus_perfect_group_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus_perfect_group: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnockoutWinnerConfigRecord {
    #[serde(default)]
    pub points_per_correct_advance: u32,
}

impl From<GroupStandingsConfigRecord> for GroupStandingsRules {
    fn from(record: GroupStandingsConfigRecord) -> Self {
        let flat = record.points_per_exact_position;
        let explicit = [
            record.points_position1,
            record.points_position2,
            record.points_position3,
            record.points_position4,
        ];
        let position_points = explicit.map(|points| points.or(flat).unwrap_or(0));

        let bonus = record.bonus_perfect_group.unwrap_or(0);
        let bonus_enabled = record.bonus_perfect_group_enabled.unwrap_or(bonus > 0);

        Self {
            position_points,
            fallback_points: flat.unwrap_or(0),
            perfect_group_bonus: bonus_enabled.then_some(bonus),
        }
    }
}

impl From<GroupStandingsRules> for GroupStandingsConfigRecord {
    fn from(rules: GroupStandingsRules) -> Self {
        let [p1, p2, p3, p4] = rules.position_points;
        Self {
            points_position1: Some(p1),
            points_position2: Some(p2),
            points_position3: Some(p3),
            points_position4: Some(p4),
            points_per_exact_position: Some(rules.fallback_points),
            bonus_perfect_group_enabled: Some(rules.perfect_group_bonus.is_some()),
            bonus_perfect_group: Some(rules.bonus_points()),
        }
    }
}

impl From<KnockoutWinnerConfigRecord> for KnockoutWinnerRules {
    fn from(record: KnockoutWinnerConfigRecord) -> Self {
        Self { points_per_correct_advance: record.points_per_correct_advance }
    }
}

impl From<KnockoutWinnerRules> for KnockoutWinnerConfigRecord {
    fn from(rules: KnockoutWinnerRules) -> Self {
        Self { points_per_correct_advance: rules.points_per_correct_advance }
    }
}

impl From<StructuralPickConfigRecord> for StructuralRules {
    fn from(record: StructuralPickConfigRecord) -> Self {
        match record {
            StructuralPickConfigRecord::GroupStandings(group) => {
                StructuralRules::GroupStandings(group.into())
            }
            StructuralPickConfigRecord::KnockoutWinner(knockout) => {
                StructuralRules::KnockoutWinner(knockout.into())
            }
        }
    }
}

impl From<StructuralRules> for StructuralPickConfigRecord {
    fn from(rules: StructuralRules) -> Self {
        match rules {
            StructuralRules::GroupStandings(group) => {
                StructuralPickConfigRecord::GroupStandings(group.into())
            }
            StructuralRules::KnockoutWinner(knockout) => {
                StructuralPickConfigRecord::KnockoutWinner(knockout.into())
            }
        }
    }
}
