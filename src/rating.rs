//! Credibility ratings and weighted score aggregation
//!
//! Every completed quiz carries one rating: how credible the reader found
//! the article (1-5) and how confident they are in that judgment (1-5).
//! The confidence acts as a weight when ratings are folded into the
//! article's 0-100 credibility score.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Lowest accepted rating or confidence value
pub const RATING_MIN: u8 = 1;

/// Highest accepted rating or confidence value
pub const RATING_MAX: u8 = 5;

/// Multiplier mapping the 1-5 rating scale onto the 0-100 score scale
pub const SCORE_SCALE: f64 = 20.0;

/// One reader's credibility assessment of an article
///
/// - `value`: 1 = not credible ... 5 = highly credible
/// - `confidence`: 1 = guessing ... 5 = certain
///
/// Both components are validated at construction; out-of-range input is
/// rejected rather than silently accepted. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRating")]
pub struct Rating {
    value: u8,
    confidence: u8,
}

/// Unvalidated wire form; promoted to `Rating` via `TryFrom`
#[derive(Deserialize)]
struct RawRating {
    value: u8,
    confidence: u8,
}

impl TryFrom<RawRating> for Rating {
    type Error = Error;

    fn try_from(raw: RawRating) -> Result<Self> {
        Rating::new(raw.value, raw.confidence)
    }
}

impl Rating {
    /// Create a validated rating
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidRating` when either component falls outside
    /// the 1-5 scale.
    pub fn new(value: u8, confidence: u8) -> Result<Self> {
        if !(RATING_MIN..=RATING_MAX).contains(&value) {
            return Err(Error::InvalidRating(format!(
                "value {} outside {}-{}",
                value, RATING_MIN, RATING_MAX
            )));
        }
        if !(RATING_MIN..=RATING_MAX).contains(&confidence) {
            return Err(Error::InvalidRating(format!(
                "confidence {} outside {}-{}",
                confidence, RATING_MIN, RATING_MAX
            )));
        }
        Ok(Self { value, confidence })
    }

    /// Credibility judgment (1-5)
    pub fn value(&self) -> u8 {
        self.value
    }

    /// Self-reported certainty (1-5), used as the aggregation weight
    pub fn confidence(&self) -> u8 {
        self.confidence
    }
}

/// Fold a collection of ratings into a single 0-100 credibility score
///
/// Confidence-weighted average, scaled to the score range:
/// `score = (Σ value·confidence / Σ confidence) × 20`
///
/// With all values ≥ 1 the result lies in [20, 100]; it is clamped to
/// [0, 100] regardless. The fold runs over the full collection each time;
/// callers pass a consistent snapshot of the article's ratings.
///
/// # Errors
///
/// Returns `Error::InsufficientData` for an empty collection. "No score"
/// is not the same as "score 0".
pub fn aggregate(ratings: &[Rating]) -> Result<f64> {
    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;

    for rating in ratings {
        weighted_sum += f64::from(rating.value) * f64::from(rating.confidence);
        total_weight += f64::from(rating.confidence);
    }

    if total_weight <= 0.0 {
        return Err(Error::InsufficientData);
    }

    let score = ((weighted_sum / total_weight) * SCORE_SCALE).clamp(0.0, 100.0);
    debug!(score, ratings = ratings.len(), "recomputed credibility score");
    Ok(score)
}

/// Derived credibility view for one article
///
/// Not stored independently of its inputs: recomputed from the
/// authoritative rating collection whenever a rating is added. `score` is
/// `None` until at least one rating exists.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CredibilityAggregate {
    /// Weighted credibility score, absent when no ratings exist
    pub score: Option<f64>,
    /// Number of ratings folded into the score
    pub total_responses: usize,
}

impl CredibilityAggregate {
    /// Recompute the aggregate from the full rating collection
    pub fn from_ratings(ratings: &[Rating]) -> Self {
        Self {
            score: aggregate(ratings).ok(),
            total_responses: ratings.len(),
        }
    }

    /// True once at least one rating has been folded in
    pub fn is_rated(&self) -> bool {
        self.score.is_some()
    }
}
