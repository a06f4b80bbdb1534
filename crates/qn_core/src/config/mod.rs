//! # Phase Pick Configuration
//!
//! Per-phase scoring setup of a pool. Stored records carry a `requiresScore`
//! flag plus either `matchPicks` or `structuralPicks`; on load they are
//! validated and normalized into [`PhaseScoring`], so scoring code matches on
//! a closed sum type instead of re-checking flags and legacy shapes.
//!
//! ```rust
//! use qn_core::config::{MatchPickType, MatchPickTypeConfig, PhasePickConfig};
//!
//! let phase = PhasePickConfig::match_based(
//!     "group_r1",
//!     "Group stage - Round 1",
//!     MatchPickTypeConfig::new().with_rule(MatchPickType::ExactScore, 5),
//! );
//! assert!(phase.requires_score());
//! ```

mod match_rules;
mod structural;

pub use match_rules::{MatchPickType, MatchPickTypeConfig, RuleSetting};
pub use structural::{
    GroupStandingsConfigRecord, GroupStandingsRules, KnockoutWinnerConfigRecord,
    KnockoutWinnerRules, StructuralPickConfigRecord, StructuralPickType, StructuralRules,
    GROUP_SIZE,
};

use crate::error::PoolError;
use serde::{Deserialize, Serialize};

/// How a phase is scored
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhaseScoring {
    Match(MatchPickTypeConfig),
    Structural(StructuralRules),
}

/// Scoring configuration of one tournament phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PhasePickConfigRecord", into = "PhasePickConfigRecord")]
pub struct PhasePickConfig {
    pub phase_id: String,
    pub phase_name: String,
    pub scoring: PhaseScoring,
}

impl PhasePickConfig {
    pub fn match_based(phase_id: &str, phase_name: &str, rules: MatchPickTypeConfig) -> Self {
        Self {
            phase_id: phase_id.to_string(),
            phase_name: phase_name.to_string(),
            scoring: PhaseScoring::Match(rules),
        }
    }

    pub fn structural(phase_id: &str, phase_name: &str, rules: StructuralRules) -> Self {
        Self {
            phase_id: phase_id.to_string(),
            phase_name: phase_name.to_string(),
            scoring: PhaseScoring::Structural(rules),
        }
    }

    pub fn requires_score(&self) -> bool {
        matches!(self.scoring, PhaseScoring::Match(_))
    }

    pub fn match_picks(&self) -> Option<&MatchPickTypeConfig> {
        match &self.scoring {
            PhaseScoring::Match(rules) => Some(rules),
            PhaseScoring::Structural(_) => None,
        }
    }

    pub fn structural_picks(&self) -> Option<&StructuralRules> {
        match &self.scoring {
            PhaseScoring::Structural(rules) => Some(rules),
            PhaseScoring::Match(_) => None,
        }
    }
}

/// Stored shape of a phase configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhasePickConfigRecord {
    pub phase_id: String,
    #[serde(default)]
    pub phase_name: String,
    pub requires_score: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_picks: Option<MatchPickTypeConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structural_picks: Option<StructuralRules>,
}

impl TryFrom<PhasePickConfigRecord> for PhasePickConfig {
    type Error = PoolError;

    fn try_from(record: PhasePickConfigRecord) -> Result<Self, Self::Error> {
        let scoring = match (record.requires_score, record.match_picks, record.structural_picks) {
            (true, Some(rules), None) => PhaseScoring::Match(rules),
            (false, None, Some(rules)) => PhaseScoring::Structural(rules),
            (_, Some(_), Some(_)) => {
                return Err(PoolError::invalid_phase(
                    &record.phase_id,
                    "both matchPicks and structuralPicks are set",
                ));
            }
            (true, None, _) => {
                return Err(PoolError::invalid_phase(
                    &record.phase_id,
                    "requiresScore is set but matchPicks is missing",
                ));
            }
            (false, _, None) => {
                return Err(PoolError::invalid_phase(
                    &record.phase_id,
                    "structural phase is missing structuralPicks",
                ));
            }
        };

        Ok(Self { phase_id: record.phase_id, phase_name: record.phase_name, scoring })
    }
}

impl From<PhasePickConfig> for PhasePickConfigRecord {
    fn from(config: PhasePickConfig) -> Self {
        let requires_score = config.requires_score();
        let (match_picks, structural_picks) = match config.scoring {
            PhaseScoring::Match(rules) => (Some(rules), None),
            PhaseScoring::Structural(rules) => (None, Some(rules)),
        };
        Self {
            phase_id: config.phase_id,
            phase_name: config.phase_name,
            requires_score,
            match_picks,
            structural_picks,
        }
    }
}

/// Parse a pool's stored configuration, rejecting any malformed phase
pub fn load_pool_config(json: &str) -> crate::Result<Vec<PhasePickConfig>> {
    let phases: Vec<PhasePickConfig> = serde_json::from_str(json)?;
    log::debug!("Loaded pick configuration for {} phases", phases.len());
    Ok(phases)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_match_record_loads() {
        let config: PhasePickConfig = serde_json::from_value(json!({
            "phaseId": "group_r1",
            "phaseName": "Round 1",
            "requiresScore": true,
            "matchPicks": {"EXACT_SCORE": {"enabled": true, "points": 5}}
        }))
        .unwrap();

        assert!(config.requires_score());
        assert_eq!(config.match_picks().unwrap().get(MatchPickType::ExactScore).unwrap().points, 5);
        assert!(config.structural_picks().is_none());
    }

    #[test]
    fn test_structural_record_loads() {
        let config: PhasePickConfig = serde_json::from_value(json!({
            "phaseId": "r16",
            "requiresScore": false,
            "structuralPicks": {
                "type": "KNOCKOUT_WINNER",
                "config": {"pointsPerCorrectAdvance": 15}
            }
        }))
        .unwrap();

        assert!(!config.requires_score());
        assert_eq!(config.phase_name, "");
        assert_eq!(config.structural_picks().unwrap().kind(), StructuralPickType::KnockoutWinner);
    }

    #[test]
    fn test_record_invariant_violations_rejected() {
        let missing_match = serde_json::from_value::<PhasePickConfig>(json!({
            "phaseId": "p1",
            "requiresScore": true,
            "structuralPicks": {"type": "KNOCKOUT_WINNER", "config": {"pointsPerCorrectAdvance": 1}}
        }));
        let err = missing_match.unwrap_err().to_string();
        assert!(err.contains("p1"), "error should name the phase: {}", err);

        let both = serde_json::from_value::<PhasePickConfig>(json!({
            "phaseId": "p2",
            "requiresScore": true,
            "matchPicks": {},
            "structuralPicks": {"type": "KNOCKOUT_WINNER", "config": {"pointsPerCorrectAdvance": 1}}
        }));
        assert!(both.is_err());

        let neither = serde_json::from_value::<PhasePickConfig>(json!({
            "phaseId": "p3",
            "requiresScore": false
        }));
        assert!(neither.is_err());
    }

    #[test]
    fn test_record_roundtrip_keeps_flag() {
        let config = PhasePickConfig::structural(
            "groups",
            "Groups",
            StructuralRules::GroupStandings(GroupStandingsRules::flat(10, Some(20))),
        );
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["requiresScore"], false);
        assert!(json.get("matchPicks").is_none());

        let reloaded: PhasePickConfig = serde_json::from_value(json).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_load_pool_config() {
        let json = r#"[
            {"phaseId": "a", "requiresScore": true, "matchPicks": {}},
            {"phaseId": "b", "requiresScore": false,
             "structuralPicks": {
                 "type": "GROUP_STANDINGS",
                 "config": {"pointsPerExactPosition": 3}
             }}
        ]"#;
        let phases = load_pool_config(json).unwrap();
        assert_eq!(phases.len(), 2);
        assert!(load_pool_config("[{\"phaseId\": \"x\"}]").is_err());
    }
}
