//! # Preset Library
//!
//! Named scoring templates a host can start a pool from. Templates describe
//! point values per phase kind and position only; phase ids always come from
//! the tournament's live phase list passed to
//! [`generate_dynamic_preset_config`], so a generated configuration can never
//! drift from the tournament it was built for.
//!
//! ```rust
//! use qn_core::presets::{generate_dynamic_preset_config, PhaseKind, TournamentPhase};
//!
//! let phases = vec![
//!     TournamentPhase::new("wc26_groups_md1", "Matchday 1", PhaseKind::Group),
//!     TournamentPhase::new("wc26_r32", "Round of 32", PhaseKind::Knockout),
//! ];
//! let config = generate_dynamic_preset_config("simple", &phases).unwrap();
//! assert_eq!(config[1].phase_id, "wc26_r32");
//! ```

mod drift;

pub use drift::{detect_phase_drift, PhaseDrift};

use crate::config::{
    GroupStandingsRules, KnockoutWinnerRules, MatchPickType, MatchPickTypeConfig,
    PhasePickConfig, StructuralRules,
};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

pub const SIMPLE: &str = "SIMPLE";
pub const CUMULATIVE: &str = "CUMULATIVE";
pub const NO_SCORES: &str = "NO_SCORES";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PhaseKind {
    #[serde(alias = "group")]
    Group,
    #[serde(alias = "knockout")]
    Knockout,
}

/// A phase as listed by the live tournament data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentPhase {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PhaseKind,
}

impl TournamentPhase {
    pub fn new(id: &str, name: &str, kind: PhaseKind) -> Self {
        Self { id: id.to_string(), name: name.to_string(), kind }
    }
}

/// Point recipe of a preset, independent of any tournament
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scheme", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PresetTemplate {
    /// Exact score only, worth `base_points + points_step * phase_index`
    #[serde(rename_all = "camelCase")]
    Simple { base_points: u32, points_step: u32 },
    /// Independent outcome/difference/goal rules, heavier in knockout phases
    Cumulative { group: MatchPickTypeConfig, knockout: MatchPickTypeConfig },
    /// Group orderings and knockout winners instead of scores
    NoScores { group: GroupStandingsRules, knockout: KnockoutWinnerRules },
}

impl PresetTemplate {
    fn phase_config(&self, index: usize, phase: &TournamentPhase) -> PhasePickConfig {
        match self {
            PresetTemplate::Simple { base_points, points_step } => {
                let points = base_points + points_step * index as u32;
                PhasePickConfig::match_based(
                    &phase.id,
                    &phase.name,
                    MatchPickTypeConfig::new().with_rule(MatchPickType::ExactScore, points),
                )
            }
            PresetTemplate::Cumulative { group, knockout } => {
                let rules = match phase.kind {
                    PhaseKind::Group => group,
                    PhaseKind::Knockout => knockout,
                };
                PhasePickConfig::match_based(&phase.id, &phase.name, rules.clone())
            }
            PresetTemplate::NoScores { group, knockout } => {
                let rules = match phase.kind {
                    PhaseKind::Group => StructuralRules::GroupStandings(group.clone()),
                    PhaseKind::Knockout => StructuralRules::KnockoutWinner(*knockout),
                };
                PhasePickConfig::structural(&phase.id, &phase.name, rules)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetSummary {
    pub key: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub key: String,
    pub name: String,
    pub description: String,
    pub template: PresetTemplate,
}

impl Preset {
    pub fn summary(&self) -> PresetSummary {
        PresetSummary {
            key: self.key.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }
}

fn cumulative_rules(outcome: u32, difference: u32, side_goals: u32) -> MatchPickTypeConfig {
    MatchPickTypeConfig::new()
        .with_rule(MatchPickType::MatchOutcome90Min, outcome)
        .with_rule(MatchPickType::GoalDifference, difference)
        .with_rule(MatchPickType::HomeGoals, side_goals)
        .with_rule(MatchPickType::AwayGoals, side_goals)
}

static PRESETS: Lazy<Vec<Preset>> = Lazy::new(|| {
    vec![
        Preset {
            key: SIMPLE.to_string(),
            name: "Simple".to_string(),
            description: "Points only for the exact score, worth more in every later phase"
                .to_string(),
            template: PresetTemplate::Simple { base_points: 5, points_step: 5 },
        },
        Preset {
            key: CUMULATIVE.to_string(),
            name: "Cumulative".to_string(),
            description: "Outcome, goal difference and each side's goals add up; \
                          knockout phases count double"
                .to_string(),
            template: PresetTemplate::Cumulative {
                group: cumulative_rules(5, 3, 1),
                knockout: cumulative_rules(10, 6, 2),
            },
        },
        Preset {
            key: NO_SCORES.to_string(),
            name: "No scores".to_string(),
            description: "Predict group standings and knockout winners instead of scores"
                .to_string(),
            template: PresetTemplate::NoScores {
                group: GroupStandingsRules::flat(10, Some(20)),
                knockout: KnockoutWinnerRules { points_per_correct_advance: 15 },
            },
        },
    ]
});

/// Metadata of every built-in preset
pub fn get_all_presets() -> Vec<PresetSummary> {
    PRESETS.iter().map(Preset::summary).collect()
}

/// Case-insensitive lookup; unknown keys give `None`
pub fn get_preset_by_key(key: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|preset| preset.key.eq_ignore_ascii_case(key.trim()))
}

/// Build one phase configuration per tournament phase, in order, with the
/// tournament's own phase ids. `None` for an unknown preset key.
pub fn generate_dynamic_preset_config(
    preset_key: &str,
    phases: &[TournamentPhase],
) -> Option<Vec<PhasePickConfig>> {
    let Some(preset) = get_preset_by_key(preset_key) else {
        log::warn!("Unknown preset key '{}'", preset_key);
        return None;
    };

    let config: Vec<PhasePickConfig> = phases
        .iter()
        .enumerate()
        .map(|(index, phase)| preset.template.phase_config(index, phase))
        .collect();

    log::debug!("Generated {} preset config for {} phases", preset.key, config.len());
    Some(config)
}
