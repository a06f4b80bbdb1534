pub mod scoring_json;

pub use scoring_json::{
    auto_scale_config_json, check_phase_drift_json, compute_leaderboard_json,
    generate_preset_json, list_presets_json, score_match_pick_json, score_structural_phase_json,
    ApiError, ApiResponse, API_VERSION,
};
