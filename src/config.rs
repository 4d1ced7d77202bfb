//! League configuration.
//!
//! Loaded from TOML; every field has a default so an empty file (or no file)
//! gives the standard points system and a T20 format:
//!
//! ```toml
//! points_for_win = 2
//! points_for_tie = 1
//! points_for_no_result = 1
//!
//! [format]
//! overs_quota = 50
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::ConfigError;
use crate::types::MatchFormat;

/// Points awarded per result and the league's default match format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeagueConfig {
    pub points_for_win: u32,
    pub points_for_tie: u32,
    /// Awarded to both sides of an abandoned match
    pub points_for_no_result: u32,
    pub format: MatchFormat,
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            points_for_win: 2,
            points_for_tie: 1,
            points_for_no_result: 1,
            format: MatchFormat::default(),
        }
    }
}

impl LeagueConfig {
    /// Load and validate a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("loading league config");
        let content = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&content)?;
        info!(
            win = config.points_for_win,
            tie = config.points_for_tie,
            no_result = config.points_for_no_result,
            "league config loaded"
        );
        Ok(config)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// A win must be worth more than a tie, and the format must be playable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.points_for_win <= self.points_for_tie {
            return Err(ConfigError::Invalid(format!(
                "points for a win ({}) must exceed points for a tie ({})",
                self.points_for_win, self.points_for_tie
            )));
        }
        self.format
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
