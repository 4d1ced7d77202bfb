//! Running score of an innings.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Extras conceded by the bowling side, by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extras {
    pub wides: u32,
    pub no_balls: u32,
    pub byes: u32,
    pub leg_byes: u32,
}

impl Extras {
    /// Sum of all extras.
    pub fn total(&self) -> u32 {
        self.wides
            .saturating_add(self.no_balls)
            .saturating_add(self.byes)
            .saturating_add(self.leg_byes)
    }
}

/// Team total, wickets fallen and extras breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    pub total_runs: u32,
    pub wickets: u32,
    pub extras: Extras,
}

impl Score {
    /// Runs credited to batters (total minus extras).
    pub fn bat_runs(&self) -> u32 {
        self.total_runs.saturating_sub(self.extras.total())
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.total_runs, self.wickets)
    }
}
