//! Match format: balls per over, overs quota and the all-out threshold.

use serde::{Deserialize, Serialize};

use crate::error::ScoringError;
use crate::types::overs::DEFAULT_BALLS_PER_OVER;

/// Wickets that end an innings (all out).
pub const ALL_OUT_WICKETS: u32 = 10;

/// Limits that govern one innings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchFormat {
    /// Legal deliveries per over
    pub balls_per_over: u32,
    /// Overs allotted to each side
    pub overs_quota: u32,
    /// Wickets at which the batting side is all out
    pub max_wickets: u32,
}

impl Default for MatchFormat {
    fn default() -> Self {
        Self::t20()
    }
}

impl MatchFormat {
    /// Twenty overs, six-ball overs.
    pub const fn t20() -> Self {
        Self {
            balls_per_over: DEFAULT_BALLS_PER_OVER,
            overs_quota: 20,
            max_wickets: ALL_OUT_WICKETS,
        }
    }

    /// Fifty overs, six-ball overs.
    pub const fn one_day() -> Self {
        Self {
            balls_per_over: DEFAULT_BALLS_PER_OVER,
            overs_quota: 50,
            max_wickets: ALL_OUT_WICKETS,
        }
    }

    /// Same format with a different overs quota (shortened matches).
    pub const fn with_overs(self, overs_quota: u32) -> Self {
        Self { overs_quota, ..self }
    }

    /// Same format with a different over length.
    pub const fn with_balls_per_over(self, balls_per_over: u32) -> Self {
        Self { balls_per_over, ..self }
    }

    /// Reject formats the clock cannot run.
    pub fn validate(&self) -> Result<(), ScoringError> {
        if self.balls_per_over == 0 {
            return Err(ScoringError::InvalidFormat("balls_per_over must be positive".into()));
        }
        if self.overs_quota == 0 {
            return Err(ScoringError::InvalidFormat("overs_quota must be positive".into()));
        }
        if self.max_wickets == 0 || self.max_wickets > ALL_OUT_WICKETS {
            return Err(ScoringError::InvalidFormat(format!(
                "max_wickets must be in 1..={}",
                ALL_OUT_WICKETS
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(MatchFormat::t20().overs_quota, 20);
        assert_eq!(MatchFormat::one_day().overs_quota, 50);
        assert_eq!(MatchFormat::default(), MatchFormat::t20());
        assert_eq!(MatchFormat::t20().with_overs(8).overs_quota, 8);
    }

    #[test]
    fn test_validate() {
        assert!(MatchFormat::t20().validate().is_ok());
        assert!(MatchFormat::t20().with_balls_per_over(0).validate().is_err());
        assert!(MatchFormat::t20().with_overs(0).validate().is_err());
        let bad = MatchFormat { max_wickets: 11, ..MatchFormat::t20() };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_deserialize_partial_uses_defaults() {
        let format: MatchFormat = toml::from_str("overs_quota = 50").unwrap();
        assert_eq!(format.overs_quota, 50);
        assert_eq!(format.balls_per_over, 6);
        assert_eq!(format.max_wickets, 10);
    }
}
