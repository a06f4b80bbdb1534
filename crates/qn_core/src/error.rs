use thiserror::Error;

#[derive(Error, Debug)]
pub enum PoolError {
    #[error("Invalid configuration for phase '{phase_id}': {reason}")]
    InvalidPhaseConfig { phase_id: String, reason: String },

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("Correcting the result of match '{match_id}' requires a reason")]
    MissingCorrectionReason { match_id: String },

    #[error("Correction for match '{match_id}' does not change the published score")]
    UnchangedCorrection { match_id: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PoolError {
    /// Stable code used by the JSON API error envelope
    pub fn code(&self) -> &'static str {
        match self {
            PoolError::InvalidPhaseConfig { .. } => "INVALID_PHASE_CONFIG",
            PoolError::UnknownPreset(_) => "UNKNOWN_PRESET",
            PoolError::MissingCorrectionReason { .. } => "MISSING_CORRECTION_REASON",
            PoolError::UnchangedCorrection { .. } => "UNCHANGED_CORRECTION",
            PoolError::Serialization(_) => "INVALID_JSON",
        }
    }

    pub(crate) fn invalid_phase(phase_id: &str, reason: impl Into<String>) -> Self {
        PoolError::InvalidPhaseConfig { phase_id: phase_id.to_string(), reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, PoolError>;
