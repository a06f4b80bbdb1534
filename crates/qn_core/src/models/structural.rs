//! Structural (score-free) picks and results: group orderings and knockout winners.

use serde::{Deserialize, Serialize};

/// Ordered standings of one group; index 0 is first place.
/// Used for both a player's pick and the official result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupStandings {
    pub group_id: String,
    #[serde(default)]
    pub team_ids: Option<Vec<String>>,
}

impl GroupStandings {
    pub fn new(group_id: &str, team_ids: &[&str]) -> Self {
        Self {
            group_id: group_id.to_string(),
            team_ids: Some(team_ids.iter().map(|t| t.to_string()).collect()),
        }
    }

    /// Team ordering, empty when absent
    pub fn teams(&self) -> &[String] {
        self.team_ids.as_deref().unwrap_or(&[])
    }
}

pub type GroupStandingsPick = GroupStandings;
pub type GroupStandingsResult = GroupStandings;

/// Team advancing from one knockout match
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnockoutAdvance {
    pub match_id: String,
    #[serde(default)]
    pub winner_id: Option<String>,
}

impl KnockoutAdvance {
    pub fn new(match_id: &str, winner_id: &str) -> Self {
        Self { match_id: match_id.to_string(), winner_id: Some(winner_id.to_string()) }
    }

    /// Winner id, treating an empty id as missing
    pub fn winner(&self) -> Option<&str> {
        self.winner_id.as_deref().filter(|id| !id.is_empty())
    }
}

pub type KnockoutPick = KnockoutAdvance;
pub type KnockoutResult = KnockoutAdvance;

/// Structural selections for one phase. Which list is read depends on the
/// phase's structural rule type; the other one is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuralSelections {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<GroupStandings>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matches: Vec<KnockoutAdvance>,
}

impl StructuralSelections {
    pub fn groups(groups: Vec<GroupStandings>) -> Self {
        Self { groups, matches: Vec::new() }
    }

    pub fn matches(matches: Vec<KnockoutAdvance>) -> Self {
        Self { groups: Vec::new(), matches }
    }

    pub fn find_group(&self, group_id: &str) -> Option<&GroupStandings> {
        self.groups.iter().find(|g| g.group_id == group_id)
    }

    pub fn find_match(&self, match_id: &str) -> Option<&KnockoutAdvance> {
        self.matches.iter().find(|m| m.match_id == match_id)
    }
}

/// One player's structural picks for one phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStructuralPick {
    pub phase_id: String,
    #[serde(default)]
    pub pick_data: Option<StructuralSelections>,
}

/// Official structural outcome for one phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuralResult {
    pub phase_id: String,
    #[serde(default)]
    pub result_data: Option<StructuralSelections>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_team_ids_reads_as_empty() {
        let group: GroupStandings = serde_json::from_str(r#"{"groupId": "A"}"#).unwrap();
        assert!(group.teams().is_empty());
    }

    #[test]
    fn test_selection_lookup() {
        let selections = StructuralSelections::matches(vec![
            KnockoutAdvance::new("m1", "t_BRA"),
            KnockoutAdvance::new("m2", "t_ARG"),
        ]);
        assert_eq!(selections.find_match("m2").and_then(|m| m.winner_id.as_deref()), Some("t_ARG"));
        assert!(selections.find_match("m3").is_none());
        assert!(selections.find_group("A").is_none());
    }
}
