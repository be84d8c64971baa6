//! Configuration loading
//!
//! Scoring behavior (consensus thresholds, ranking gate) is tunable via a
//! TOML file. Resolution priority order:
//! 1. Explicit path argument (highest priority)
//! 2. `CROWDCHECK_CONFIG` environment variable
//! 3. Platform config directory (`<config_dir>/crowdcheck/config.toml`)
//! 4. Compiled defaults (fallback)

use crate::consensus::ConsensusThresholds;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable naming an explicit config file path
pub const CONFIG_ENV_VAR: &str = "CROWDCHECK_CONFIG";

/// Tunable scoring parameters
///
/// Every field has a compiled default, so a partial (or absent) config
/// file is fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Consensus band boundaries (default 70/40)
    pub consensus: ConsensusThresholds,

    /// Minimum responses before an article may appear in the
    /// most-credible ranking
    ///
    /// Valid range: >= 1
    /// Default: 3
    pub min_ranking_responses: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            consensus: ConsensusThresholds::default(),
            min_ranking_responses: 3,
        }
    }
}

impl ScoringConfig {
    /// Validate field ranges and band ordering
    pub fn validate(&self) -> Result<()> {
        self.consensus.validate()?;
        if self.min_ranking_responses == 0 {
            return Err(Error::Config(
                "min_ranking_responses must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ScoringConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration following the resolution priority order
    ///
    /// An explicitly named file (argument or environment variable) must
    /// exist and parse; a missing file at the platform default location
    /// silently falls back to compiled defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // Priority 1: explicit path argument
        if let Some(path) = explicit_path {
            return Self::load_file(path);
        }

        // Priority 2: environment variable
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Self::load_file(Path::new(&path));
        }

        // Priority 3: platform config directory
        if let Some(path) = default_config_path() {
            if path.exists() {
                return Self::load_file(&path);
            }
        }

        // Priority 4: compiled defaults
        Ok(Self::default())
    }

    /// Read and parse a specific config file
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        info!(path = %path.display(), "loaded scoring config");
        Ok(config)
    }
}

/// Platform default config file path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("crowdcheck").join("config.toml"))
}
