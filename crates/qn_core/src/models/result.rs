//! Published match results and their correction (errata) trail.

use super::pick::{MatchResult, ScoreLine};
use crate::error::{PoolError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One correction applied to a published result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultCorrection {
    pub previous: ScoreLine,
    pub corrected: ScoreLine,
    pub reason: String,
    pub corrected_at: DateTime<Utc>,
}

/// Official result as published by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedResult {
    pub match_id: String,
    pub score: ScoreLine,
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub corrections: Vec<ResultCorrection>,
}

impl PublishedResult {
    pub fn publish(match_id: &str, score: ScoreLine) -> Self {
        Self {
            match_id: match_id.to_string(),
            score,
            published_at: Utc::now(),
            corrections: Vec::new(),
        }
    }

    /// Overwrite the published score. The reason is stored with the previous score.
    pub fn correct(&mut self, score: ScoreLine, reason: &str) -> Result<()> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(PoolError::MissingCorrectionReason { match_id: self.match_id.clone() });
        }
        if score == self.score {
            return Err(PoolError::UnchangedCorrection { match_id: self.match_id.clone() });
        }

        log::info!(
            "Correcting result of match {}: {}-{} -> {}-{} ({})",
            self.match_id,
            self.score.home_goals,
            self.score.away_goals,
            score.home_goals,
            score.away_goals,
            reason
        );

        self.corrections.push(ResultCorrection {
            previous: self.score,
            corrected: score,
            reason: reason.to_string(),
            corrected_at: Utc::now(),
        });
        self.score = score;
        Ok(())
    }

    pub fn is_corrected(&self) -> bool {
        !self.corrections.is_empty()
    }

    pub fn match_result(&self) -> MatchResult {
        self.score.into()
    }
}

/// Publish a result, or correct an existing one. A reason is mandatory only
/// when a result already exists.
pub fn record_result(
    existing: Option<PublishedResult>,
    match_id: &str,
    score: ScoreLine,
    reason: Option<&str>,
) -> Result<PublishedResult> {
    match existing {
        None => Ok(PublishedResult::publish(match_id, score)),
        Some(mut published) => {
            published.correct(score, reason.unwrap_or_default())?;
            Ok(published)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_publication_needs_no_reason() {
        let published = record_result(None, "m1", ScoreLine::new(2, 1), None).unwrap();
        assert_eq!(published.score, ScoreLine::new(2, 1));
        assert!(!published.is_corrected());
        assert_eq!(published.match_result(), MatchResult::new(2, 1));
    }

    #[test]
    fn test_correction_requires_reason() {
        let published = PublishedResult::publish("m1", ScoreLine::new(2, 1));

        let err = record_result(Some(published.clone()), "m1", ScoreLine::new(2, 2), None);
        assert!(matches!(err, Err(PoolError::MissingCorrectionReason { .. })));

        let err = record_result(Some(published), "m1", ScoreLine::new(2, 2), Some("   "));
        assert!(matches!(err, Err(PoolError::MissingCorrectionReason { .. })));
    }

    #[test]
    fn test_correction_keeps_audit_trail() {
        let mut published = PublishedResult::publish("m1", ScoreLine::new(2, 1));
        published.correct(ScoreLine::new(2, 2), "Late equaliser missed").unwrap();

        assert_eq!(published.score, ScoreLine::new(2, 2));
        assert_eq!(published.corrections.len(), 1);
        assert_eq!(published.corrections[0].previous, ScoreLine::new(2, 1));
        assert_eq!(published.corrections[0].reason, "Late equaliser missed");
    }

    #[test]
    fn test_unchanged_correction_rejected() {
        let mut published = PublishedResult::publish("m1", ScoreLine::new(1, 0));
        let err = published.correct(ScoreLine::new(1, 0), "typo");
        assert!(matches!(err, Err(PoolError::UnchangedCorrection { .. })));
        assert!(published.corrections.is_empty());
    }
}
