//! Community consensus classification
//!
//! Maps an article's numeric credibility score onto a categorical verdict
//! for display and analytics ranking. Three score bands plus a distinct
//! "no data" verdict; band lower bounds are inclusive.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Community consensus verdict for an article
///
/// Derived from the 0-100 credibility score:
/// - `HighCredibility`: score ≥ 70
/// - `Disputed`: 40 ≤ score < 70
/// - `LikelyMisinformation`: score < 40
/// - `Unrated`: no score available (zero responses) — deliberately
///   distinct from `Disputed`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Consensus {
    /// The crowd broadly trusts the article
    HighCredibility,

    /// No clear agreement either way
    Disputed,

    /// The crowd leans toward misinformation
    LikelyMisinformation,

    /// Not enough responses to call
    Unrated,
}

/// Score boundaries between consensus bands
///
/// Valid ordering: `0 ≤ disputed < high ≤ 100`. Defaults are 70/40.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsensusThresholds {
    /// Scores at or above this are `HighCredibility`
    pub high: f64,
    /// Scores at or above this (but below `high`) are `Disputed`
    pub disputed: f64,
}

impl Default for ConsensusThresholds {
    fn default() -> Self {
        Self {
            high: 70.0,
            disputed: 40.0,
        }
    }
}

impl ConsensusThresholds {
    /// Check band ordering and range
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.high) || !(0.0..=100.0).contains(&self.disputed) {
            return Err(Error::Config(format!(
                "consensus thresholds must lie in [0, 100], got high={} disputed={}",
                self.high, self.disputed
            )));
        }
        if self.disputed >= self.high {
            return Err(Error::Config(format!(
                "disputed threshold ({}) must be below high threshold ({})",
                self.disputed, self.high
            )));
        }
        Ok(())
    }
}

/// Classify a credibility score using the default 70/40 thresholds
///
/// `None` (no score available) maps to `Consensus::Unrated`.
pub fn classify(score: Option<f64>) -> Consensus {
    classify_with(score, &ConsensusThresholds::default())
}

/// Classify a credibility score against explicit thresholds
pub fn classify_with(score: Option<f64>, thresholds: &ConsensusThresholds) -> Consensus {
    match score {
        None => Consensus::Unrated,
        Some(s) if s >= thresholds.high => Consensus::HighCredibility,
        Some(s) if s >= thresholds.disputed => Consensus::Disputed,
        Some(_) => Consensus::LikelyMisinformation,
    }
}

impl Consensus {
    /// Parse verdict from string (from database or API payloads)
    ///
    /// Accepts canonical database values plus common aliases:
    /// - 'high_credibility', 'high-credibility'
    /// - 'disputed'
    /// - 'likely_misinformation', 'misinformation'
    /// - 'not_enough_data', 'unrated'
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "high_credibility" | "high-credibility" => Some(Consensus::HighCredibility),
            "disputed" => Some(Consensus::Disputed),
            "likely_misinformation" | "misinformation" => Some(Consensus::LikelyMisinformation),
            "not_enough_data" | "unrated" => Some(Consensus::Unrated),
            _ => None,
        }
    }

    /// Convert to canonical database string representation
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Consensus::HighCredibility => "high_credibility",
            Consensus::Disputed => "disputed",
            Consensus::LikelyMisinformation => "likely_misinformation",
            Consensus::Unrated => "not_enough_data",
        }
    }

    /// Get human-readable display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Consensus::HighCredibility => "High Credibility",
            Consensus::Disputed => "Disputed",
            Consensus::LikelyMisinformation => "Likely Misinformation",
            Consensus::Unrated => "Not Yet Rated",
        }
    }

    /// Get all verdict variants
    ///
    /// Useful for UI legends and validation
    pub fn all_variants() -> &'static [Consensus] {
        &[
            Consensus::HighCredibility,
            Consensus::Disputed,
            Consensus::LikelyMisinformation,
            Consensus::Unrated,
        ]
    }
}

impl Default for Consensus {
    /// An article starts out unrated
    fn default() -> Self {
        Consensus::Unrated
    }
}

impl std::fmt::Display for Consensus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(classify(Some(70.0)), Consensus::HighCredibility);
        assert_eq!(classify(Some(69.999)), Consensus::Disputed);
        assert_eq!(classify(Some(40.0)), Consensus::Disputed);
        assert_eq!(classify(Some(39.999)), Consensus::LikelyMisinformation);
    }

    #[test]
    fn test_no_data_is_unrated() {
        assert_eq!(classify(None), Consensus::Unrated);
        assert_ne!(classify(None), Consensus::Disputed);
    }

    #[test]
    fn test_extremes() {
        assert_eq!(classify(Some(100.0)), Consensus::HighCredibility);
        assert_eq!(classify(Some(0.0)), Consensus::LikelyMisinformation);
    }

    #[test]
    fn test_custom_thresholds() {
        let strict = ConsensusThresholds {
            high: 90.0,
            disputed: 50.0,
        };
        assert_eq!(classify_with(Some(89.0), &strict), Consensus::Disputed);
        assert_eq!(classify_with(Some(90.0), &strict), Consensus::HighCredibility);
        assert_eq!(
            classify_with(Some(49.0), &strict),
            Consensus::LikelyMisinformation
        );
    }

    #[test]
    fn test_threshold_validation() {
        assert!(ConsensusThresholds::default().validate().is_ok());

        let inverted = ConsensusThresholds {
            high: 40.0,
            disputed: 70.0,
        };
        assert!(inverted.validate().is_err());

        let out_of_range = ConsensusThresholds {
            high: 170.0,
            disputed: 40.0,
        };
        assert!(out_of_range.validate().is_err());
    }

    #[test]
    fn test_database_round_trip() {
        for verdict in Consensus::all_variants() {
            let db_string = verdict.to_db_string();
            let parsed = Consensus::from_str(db_string).unwrap();
            assert_eq!(*verdict, parsed, "Round-trip failed for {:?}", verdict);
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(Consensus::from_str("unrated"), Some(Consensus::Unrated));
        assert_eq!(
            Consensus::from_str("misinformation"),
            Some(Consensus::LikelyMisinformation)
        );
        assert_eq!(
            Consensus::from_str("HIGH_CREDIBILITY"),
            Some(Consensus::HighCredibility)
        );
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(Consensus::from_str("invalid"), None);
        assert_eq!(Consensus::from_str(""), None);
    }

    #[test]
    fn test_default() {
        assert_eq!(Consensus::default(), Consensus::Unrated);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Consensus::HighCredibility), "High Credibility");
        assert_eq!(format!("{}", Consensus::Unrated), "Not Yet Rated");
    }
}
