//! Detection of pool configurations whose phase ids no longer match the
//! tournament they belong to.

use super::TournamentPhase;
use crate::config::PhasePickConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseDrift {
    /// Configured phase ids the tournament does not have
    pub stale_phase_ids: Vec<String>,
    /// Tournament phase ids without a configuration
    pub unconfigured_phase_ids: Vec<String>,
}

impl PhaseDrift {
    pub fn is_clean(&self) -> bool {
        self.stale_phase_ids.is_empty() && self.unconfigured_phase_ids.is_empty()
    }
}

/// Compare a stored configuration against the tournament's live phase list.
/// Picks in unconfigured phases would silently score zero.
pub fn detect_phase_drift(config: &[PhasePickConfig], phases: &[TournamentPhase]) -> PhaseDrift {
    let live: HashSet<&str> = phases.iter().map(|p| p.id.as_str()).collect();
    let configured: HashSet<&str> = config.iter().map(|c| c.phase_id.as_str()).collect();

    let drift = PhaseDrift {
        stale_phase_ids: config
            .iter()
            .filter(|c| !live.contains(c.phase_id.as_str()))
            .map(|c| c.phase_id.clone())
            .collect(),
        unconfigured_phase_ids: phases
            .iter()
            .filter(|p| !configured.contains(p.id.as_str()))
            .map(|p| p.id.clone())
            .collect(),
    };

    if !drift.is_clean() {
        log::warn!(
            "Pick configuration drifted from tournament phases: {} stale, {} unconfigured",
            drift.stale_phase_ids.len(),
            drift.unconfigured_phase_ids.len()
        );
    }
    drift
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::{generate_dynamic_preset_config, PhaseKind, SIMPLE};

    fn phases() -> Vec<TournamentPhase> {
        vec![
            TournamentPhase::new("wc_gs", "Groups", PhaseKind::Group),
            TournamentPhase::new("wc_ko", "Knockout", PhaseKind::Knockout),
        ]
    }

    #[test]
    fn test_generated_config_is_clean() {
        let config = generate_dynamic_preset_config(SIMPLE, &phases()).unwrap();
        assert!(detect_phase_drift(&config, &phases()).is_clean());
    }

    #[test]
    fn test_hardcoded_ids_are_reported() {
        let stale = vec![
            TournamentPhase::new("group_stage", "Groups", PhaseKind::Group),
            TournamentPhase::new("wc_ko", "Knockout", PhaseKind::Knockout),
        ];
        let config = generate_dynamic_preset_config(SIMPLE, &stale).unwrap();

        let drift = detect_phase_drift(&config, &phases());
        assert_eq!(drift.stale_phase_ids, vec!["group_stage".to_string()]);
        assert_eq!(drift.unconfigured_phase_ids, vec!["wc_gs".to_string()]);
        assert!(!drift.is_clean());
    }
}
