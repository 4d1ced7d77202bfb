//! Season standings types.
//!
//! [`NetRunRate`] keeps the exact `Decimal` so rankings compare the unrounded
//! value; rounding to three places happens only in `Display`.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::types::TeamId;

/// Decimal places shown for net run rate.
pub const NRR_DISPLAY_DP: u32 = 3;

// ============================================================================
// Team
// ============================================================================

/// A team as registered with the league.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    /// Season the team is registered to, if any
    #[serde(default)]
    pub season_id: Option<String>,
}

impl Team {
    pub fn new(id: impl Into<TeamId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            logo_url: None,
            season_id: None,
        }
    }

    pub fn in_season(self, season_id: impl Into<String>) -> Self {
        Self {
            season_id: Some(season_id.into()),
            ..self
        }
    }
}

// ============================================================================
// NetRunRate
// ============================================================================

/// Net run rate, unrounded.
///
/// Displays with three decimals and an explicit sign for non-zero values:
///
/// ```
/// use crease_core::types::NetRunRate;
/// use rust_decimal::Decimal;
///
/// assert_eq!(NetRunRate::new(Decimal::new(14951432, 7)).to_string(), "+1.495");
/// assert_eq!(NetRunRate::new(Decimal::new(-25, 2)).to_string(), "-0.250");
/// assert_eq!(NetRunRate::ZERO.to_string(), "0.000");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NetRunRate(Decimal);

impl NetRunRate {
    pub const ZERO: NetRunRate = NetRunRate(Decimal::ZERO);

    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Exact value used for ordering.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Value rounded half away from zero to display precision.
    pub fn rounded(&self) -> Decimal {
        self.0
            .round_dp_with_strategy(NRR_DISPLAY_DP, RoundingStrategy::MidpointAwayFromZero)
    }
}

impl fmt::Display for NetRunRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.rounded();
        if rounded.is_zero() {
            // Avoid "-0.000" and "+0.000"
            write!(f, "{:.3}", Decimal::ZERO)
        } else if rounded.is_sign_positive() {
            write!(f, "+{:.3}", rounded)
        } else {
            write!(f, "{:.3}", rounded)
        }
    }
}

// ============================================================================
// TeamSeasonStat
// ============================================================================

/// One team's season record, rebuilt from scratch on every aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSeasonStat {
    pub season_id: String,
    pub team_id: TeamId,
    pub played: u32,
    pub won: u32,
    pub lost: u32,
    pub tied: u32,
    pub no_result: u32,
    pub points: u32,
    pub nrr: NetRunRate,
    pub runs_scored: u32,
    /// Decimal overs faced (all-out innings charged the full quota)
    pub overs_faced: Decimal,
    pub runs_conceded: u32,
    pub overs_bowled: Decimal,
}

impl TeamSeasonStat {
    /// A zeroed row.
    pub fn new(season_id: impl Into<String>, team_id: impl Into<TeamId>) -> Self {
        Self {
            season_id: season_id.into(),
            team_id: team_id.into(),
            played: 0,
            won: 0,
            lost: 0,
            tied: 0,
            no_result: 0,
            points: 0,
            nrr: NetRunRate::ZERO,
            runs_scored: 0,
            overs_faced: Decimal::ZERO,
            runs_conceded: 0,
            overs_bowled: Decimal::ZERO,
        }
    }

    /// Storage key, `<season>_<team>`.
    pub fn key(&self) -> String {
        format!("{}_{}", self.season_id, self.team_id)
    }
}

// ============================================================================
// PointsTableEntry
// ============================================================================

/// A ranked row of the points table with display fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsTableEntry {
    pub position: u32,
    pub team_id: TeamId,
    pub team_name: String,
    #[serde(default)]
    pub team_logo: Option<String>,
    pub played: u32,
    pub won: u32,
    pub lost: u32,
    pub tied: u32,
    pub no_result: u32,
    pub points: u32,
    pub nrr: NetRunRate,
}

impl PointsTableEntry {
    /// Project a stat row. Unknown teams display their id as the name.
    pub fn from_stat(position: u32, stat: &TeamSeasonStat, team: Option<&Team>) -> Self {
        Self {
            position,
            team_id: stat.team_id.clone(),
            team_name: team
                .map(|t| t.name.clone())
                .unwrap_or_else(|| stat.team_id.clone()),
            team_logo: team.and_then(|t| t.logo_url.clone()),
            played: stat.played,
            won: stat.won,
            lost: stat.lost,
            tied: stat.tied,
            no_result: stat.no_result,
            points: stat.points,
            nrr: stat.nrr,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nrr_display_sign_policy() {
        assert_eq!(NetRunRate::new(Decimal::new(1495, 3)).to_string(), "+1.495");
        assert_eq!(NetRunRate::new(Decimal::new(-1495, 3)).to_string(), "-1.495");
        assert_eq!(NetRunRate::new(Decimal::new(-4, 4)).to_string(), "0.000");
        assert_eq!(NetRunRate::new(Decimal::new(2, 1)).to_string(), "+0.200");
    }

    #[test]
    fn test_nrr_rounding_half_away_from_zero() {
        assert_eq!(NetRunRate::new(Decimal::new(12345, 4)).rounded(), Decimal::new(1235, 3));
        assert_eq!(NetRunRate::new(Decimal::new(-12345, 4)).rounded(), Decimal::new(-1235, 3));
    }

    #[test]
    fn test_nrr_orders_on_exact_value() {
        // Both display as +0.100
        let a = NetRunRate::new(Decimal::new(10001, 5));
        let b = NetRunRate::new(Decimal::new(10004, 5));
        assert_eq!(a.to_string(), b.to_string());
        assert!(b > a);
    }

    #[test]
    fn test_points_entry_falls_back_to_team_id() {
        let stat = TeamSeasonStat::new("s1", "X");
        let entry = PointsTableEntry::from_stat(3, &stat, None);
        assert_eq!(entry.team_name, "X");
        assert_eq!(entry.position, 3);

        let team = Team::new("X", "Xavier XI");
        let entry = PointsTableEntry::from_stat(1, &stat, Some(&team));
        assert_eq!(entry.team_name, "Xavier XI");
    }

    #[test]
    fn test_stat_key() {
        assert_eq!(TeamSeasonStat::new("s1", "SA").key(), "s1_SA");
    }
}
