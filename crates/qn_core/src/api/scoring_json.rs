//! JSON API for pool configuration and scoring
//!
//! String-in/string-out entry points for the web layer. Every function
//! returns an `ApiResponse<T>` envelope; malformed requests produce an error
//! envelope rather than a panic.

use crate::breakdown::{generate_match_pick_breakdown, BreakdownEntry};
use crate::config::{MatchPickTypeConfig, PhasePickConfig};
use crate::error::{PoolError, Result};
use crate::leaderboard::{compute_leaderboard, LeaderboardRow, PoolSnapshot};
use crate::models::{MatchPick, MatchResult, StructuralSelections};
use crate::presets::{
    detect_phase_drift, generate_dynamic_preset_config, get_all_presets, PhaseDrift,
    PresetSummary, TournamentPhase,
};
use crate::scoring::{apply_auto_scaling_to_config, score_match_pick, PickEvaluation};
use crate::structural::score_structural_phase;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

/// API version for schema compatibility
pub const API_VERSION: &str = "v1";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
    pub schema_version: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl From<&PoolError> for ApiError {
    fn from(err: &PoolError) -> Self {
        Self { code: err.code().to_string(), message: err.to_string() }
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            schema_version: API_VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn error(error: ApiError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            schema_version: API_VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePresetRequest {
    pub preset_key: String,
    pub phases: Vec<TournamentPhase>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreMatchPickRequest {
    #[serde(default)]
    pub pick: Option<MatchPick>,
    #[serde(default)]
    pub result: Option<MatchResult>,
    /// Missing config scores zero like any other incomplete input
    #[serde(default)]
    pub config: MatchPickTypeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreMatchPickResponse {
    pub evaluation: PickEvaluation,
    pub breakdown: Vec<BreakdownEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreStructuralPhaseRequest {
    #[serde(default)]
    pub pick_data: Option<StructuralSelections>,
    #[serde(default)]
    pub result_data: Option<StructuralSelections>,
    #[serde(default)]
    pub phase_config: Option<PhasePickConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreStructuralPhaseResponse {
    pub total_points: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoScaleRequest {
    pub config: MatchPickTypeConfig,
    pub target_max: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseDriftRequest {
    pub config: Vec<PhasePickConfig>,
    pub phases: Vec<TournamentPhase>,
}

fn parse_request<R: DeserializeOwned>(request_json: &str, request_name: &str) -> Result<R> {
    serde_json::from_str(request_json).map_err(|e| {
        error!("Failed to parse {}: {}", request_name, e);
        PoolError::from(e)
    })
}

fn respond<T: Serialize>(outcome: Result<T>) -> String {
    let response = match outcome {
        Ok(data) => ApiResponse::success(data),
        Err(err) => ApiResponse::error(ApiError::from(&err)),
    };
    serde_json::to_string(&response).unwrap_or_else(|_| "{}".to_string())
}

/// List built-in presets (metadata only)
///
/// # Returns
/// JSON string containing ApiResponse<Vec<PresetSummary>>
pub fn list_presets_json() -> String {
    let presets: Vec<PresetSummary> = get_all_presets();
    debug!("Listing {} presets", presets.len());
    respond(Ok(presets))
}

/// Generate a pool configuration from a preset and the tournament's phases
///
/// # Arguments
/// * `request_json` - JSON string containing GeneratePresetRequest
///
/// # Returns
/// JSON string containing ApiResponse<Vec<PhasePickConfig>>
pub fn generate_preset_json(request_json: &str) -> String {
    respond(parse_request::<GeneratePresetRequest>(request_json, "GeneratePresetRequest").and_then(
        |request| {
            info!(
                "Generating {} preset for {} phases",
                request.preset_key,
                request.phases.len()
            );
            generate_dynamic_preset_config(&request.preset_key, &request.phases).ok_or_else(|| {
                warn!("Unknown preset requested: {}", request.preset_key);
                PoolError::UnknownPreset(request.preset_key.clone())
            })
        },
    ))
}

/// Score one match pick and explain the result
///
/// # Returns
/// JSON string containing ApiResponse<ScoreMatchPickResponse>
pub fn score_match_pick_json(request_json: &str) -> String {
    respond(parse_request::<ScoreMatchPickRequest>(request_json, "ScoreMatchPickRequest").map(
        |request| {
            let pick = request.pick.as_ref();
            let result = request.result.as_ref();
            let evaluation = score_match_pick(pick, result, &request.config);
            let breakdown = generate_match_pick_breakdown(pick, result, &request.config);
            debug!("Match pick scored {} points", evaluation.total_points);
            ScoreMatchPickResponse { evaluation, breakdown }
        },
    ))
}

/// Score one player's structural picks for one phase
///
/// # Returns
/// JSON string containing ApiResponse<ScoreStructuralPhaseResponse>
pub fn score_structural_phase_json(request_json: &str) -> String {
    respond(
        parse_request::<ScoreStructuralPhaseRequest>(request_json, "ScoreStructuralPhaseRequest")
            .map(|request| ScoreStructuralPhaseResponse {
                total_points: score_structural_phase(
                    request.pick_data.as_ref(),
                    request.result_data.as_ref(),
                    request.phase_config.as_ref(),
                ),
            }),
    )
}

/// Rescale a phase's enabled rules to a target maximum
///
/// # Returns
/// JSON string containing ApiResponse<MatchPickTypeConfig>
pub fn auto_scale_config_json(request_json: &str) -> String {
    respond(
        parse_request::<AutoScaleRequest>(request_json, "AutoScaleRequest")
            .map(|request| apply_auto_scaling_to_config(&request.config, request.target_max)),
    )
}

/// Rank every player of a pool
///
/// # Returns
/// JSON string containing ApiResponse<Vec<LeaderboardRow>>
pub fn compute_leaderboard_json(request_json: &str) -> String {
    respond(parse_request::<PoolSnapshot>(request_json, "PoolSnapshot").map(|snapshot| {
        let rows: Vec<LeaderboardRow> = compute_leaderboard(&snapshot);
        info!("Computed leaderboard for {} players", rows.len());
        rows
    }))
}

/// Compare a stored configuration with the tournament's live phases
///
/// # Returns
/// JSON string containing ApiResponse<PhaseDrift>
pub fn check_phase_drift_json(request_json: &str) -> String {
    respond(parse_request::<PhaseDriftRequest>(request_json, "PhaseDriftRequest").map(
        |request| -> PhaseDrift { detect_phase_drift(&request.config, &request.phases) },
    ))
}
