//! Pool Tools Library
//!
//! File-based runners behind the `qn` CLI: preset generation, rule
//! auto-scaling, leaderboards and phase drift checks over JSON files.

use anyhow::{bail, Context, Result};
use qn_core::leaderboard::{compute_leaderboard, LeaderboardRow, PoolSnapshot};
use qn_core::presets::{
    detect_phase_drift, generate_dynamic_preset_config, PhaseDrift, TournamentPhase,
};
use qn_core::{apply_auto_scaling_to_config, MatchPickTypeConfig, PhasePickConfig};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Read and parse a JSON input file
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read JSON file: {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Write pretty JSON to `out`, or return it for stdout when no path is given
pub fn write_json<T: Serialize>(value: &T, out: Option<&Path>) -> Result<Option<String>> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory: {}", parent.display())
                })?;
            }
            fs::write(path, &json)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            log::info!("Wrote {}", path.display());
            Ok(None)
        }
        None => Ok(Some(json)),
    }
}

/// Generate a pool configuration from a preset and a tournament phase file
pub fn generate_config(preset_key: &str, phases_file: &Path) -> Result<Vec<PhasePickConfig>> {
    let phases: Vec<TournamentPhase> = read_json(phases_file)?;
    if phases.is_empty() {
        bail!("Phase list {} is empty", phases_file.display());
    }
    generate_dynamic_preset_config(preset_key, &phases)
        .with_context(|| format!("Unknown preset: {}", preset_key))
}

/// Rescale a phase rule set so its enabled rules sum to `target_max`
pub fn scale_config(config_file: &Path, target_max: u32) -> Result<MatchPickTypeConfig> {
    let config: MatchPickTypeConfig = read_json(config_file)?;
    Ok(apply_auto_scaling_to_config(&config, target_max))
}

pub fn leaderboard(pool_file: &Path) -> Result<Vec<LeaderboardRow>> {
    let snapshot: PoolSnapshot = read_json(pool_file)?;
    Ok(compute_leaderboard(&snapshot))
}

pub fn check_phases(config_file: &Path, phases_file: &Path) -> Result<PhaseDrift> {
    let config: Vec<PhasePickConfig> = read_json(config_file)?;
    let phases: Vec<TournamentPhase> = read_json(phases_file)?;
    Ok(detect_phase_drift(&config, &phases))
}
