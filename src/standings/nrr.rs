//! Net run rate over a season's completed matches.
//!
//! ## Rules
//!
//! For every completed match the team played:
//!
//! - **Runs for**: the team's runs, or `target - 1` when the result used a
//!   revised target (DLS/VJD) and the team batted second.
//! - **Overs faced**: the full match quota when the team was all out,
//!   otherwise its actual overs converted with the match's balls-per-over.
//! - **Runs against / overs bowled**: the same, from the opponent's line.
//!
//! `NRR = runs_for / overs_for - runs_against / overs_against`, with either
//! ratio taken as zero when its overs are zero.

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::OversError;
use crate::types::overs::run_rate;
use crate::types::{InningsTotal, MatchRecord, NetRunRate, ALL_OUT_WICKETS};

/// Season aggregates behind a team's net run rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NrrBreakdown {
    pub runs_for: u32,
    pub overs_for: Decimal,
    pub runs_against: u32,
    pub overs_against: Decimal,
    pub nrr: NetRunRate,
}

impl NrrBreakdown {
    fn add_match(&mut self, record: &MatchRecord, team: &str) -> Result<(), OversError> {
        let Some((own, opponent)) = record.sides_for(team) else {
            return Ok(());
        };

        let runs_for = match (record.method().adjusts_target(), record.target_score) {
            (true, Some(target)) if record.batted_second(team) => target.saturating_sub(1),
            _ => own.runs,
        };

        self.runs_for += runs_for;
        self.overs_for += charged_overs(record, own)?;
        self.runs_against += opponent.runs;
        self.overs_against += charged_overs(record, opponent)?;
        Ok(())
    }

    fn finish(mut self) -> Self {
        let value = run_rate(self.runs_for, self.overs_for)
            - run_rate(self.runs_against, self.overs_against);
        self.nrr = NetRunRate::new(value);
        self
    }
}

/// Overs an innings counts for: the quota if all out, else the overs used.
fn charged_overs(record: &MatchRecord, line: &InningsTotal) -> Result<Decimal, OversError> {
    if line.wickets >= ALL_OUT_WICKETS {
        return Ok(Decimal::from(record.total_overs));
    }
    let balls_per_over = record.balls_per_over();
    line.overs.resolve(balls_per_over)?.to_decimal(balls_per_over)
}

/// Net run rate for `team` over `matches`.
///
/// Matches that are not completed, carry no score, or do not involve the team
/// are skipped. No qualifying matches yields zero.
///
/// # Errors
///
/// [`OversError`] when a qualifying record has an unreadable overs value.
///
/// # Example
///
/// ```
/// use crease_core::standings::net_run_rate;
/// use crease_core::types::{InningsTotal, MatchRecord};
///
/// let matches = vec![MatchRecord::completed(
///     "m1", "s1", "SA", "SL", 50,
///     InningsTotal::new(199, 9, "50"),
///     InningsTotal::new(110, 10, "35.2"),
/// )];
///
/// let nrr = net_run_rate("SA", &matches).unwrap();
/// assert_eq!(nrr.runs_against, 110);
/// assert_eq!(nrr.nrr.to_string(), "+1.780");
/// ```
pub fn net_run_rate(team: &str, matches: &[MatchRecord]) -> Result<NrrBreakdown, OversError> {
    let mut breakdown = NrrBreakdown::default();
    for record in matches.iter().filter(|m| m.is_completed() && m.involves(team)) {
        breakdown.add_match(record, team)?;
    }
    let breakdown = breakdown.finish();
    debug!(
        team,
        runs_for = breakdown.runs_for,
        runs_against = breakdown.runs_against,
        nrr = %breakdown.nrr,
        "net run rate"
    );
    Ok(breakdown)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MatchStatus, ResultMethod};

    fn sa_season() -> Vec<MatchRecord> {
        vec![
            MatchRecord::completed(
                "m1",
                "s1",
                "SA",
                "IND",
                50,
                InningsTotal::new(254, 6, "47.2"),
                InningsTotal::new(253, 5, "50"),
            ),
            MatchRecord::completed(
                "m2",
                "s1",
                "SA",
                "SL",
                50,
                InningsTotal::new(199, 9, "50"),
                InningsTotal::new(110, 10, "35.2"),
            ),
            MatchRecord::completed(
                "m3",
                "s1",
                "ENG",
                "SA",
                50,
                InningsTotal::new(103, 10, "41"),
                InningsTotal::new(225, 7, "50"),
            ),
        ]
    }

    #[test]
    fn test_sa_season_aggregates() {
        let nrr = net_run_rate("SA", &sa_season()).unwrap();
        assert_eq!(nrr.runs_for, 678);
        assert_eq!(nrr.runs_against, 466);
        assert_eq!(nrr.overs_against, Decimal::from(150));
        assert_eq!(
            nrr.overs_for.round_dp(3),
            Decimal::new(147333, 3)
        );
        assert_eq!(nrr.nrr.to_string(), "+1.495");
    }

    #[test]
    fn test_all_out_charges_full_quota() {
        let nrr = net_run_rate("SL", &sa_season()).unwrap();
        assert_eq!(nrr.runs_for, 110);
        assert_eq!(nrr.overs_for, Decimal::from(50));
        assert_eq!(nrr.overs_against, Decimal::from(50));
    }

    #[test]
    fn test_no_matches_is_zero() {
        let nrr = net_run_rate("NZ", &sa_season()).unwrap();
        assert_eq!(nrr.nrr, NetRunRate::ZERO);
        assert_eq!(nrr.nrr.to_string(), "0.000");
        assert_eq!(net_run_rate("SA", &[]).unwrap(), NrrBreakdown::default());
    }

    #[test]
    fn test_skips_unfinished_matches() {
        let mut matches = sa_season();
        matches[0].status = MatchStatus::Live;
        matches[1].status = MatchStatus::Abandoned;
        matches[2].score = None;
        let nrr = net_run_rate("SA", &matches).unwrap();
        assert_eq!(nrr.runs_for, 0);
        assert_eq!(nrr.nrr, NetRunRate::ZERO);
    }

    #[test]
    fn test_revised_target_substitutes_runs_for_chaser() {
        let record = MatchRecord::completed(
            "m1",
            "s1",
            "A",
            "B",
            20,
            InningsTotal::new(170, 6, "20"),
            InningsTotal::new(151, 4, "16.3"),
        )
        .with_revised_target(ResultMethod::Dls, 150, "A");

        let chaser = net_run_rate("B", std::slice::from_ref(&record)).unwrap();
        assert_eq!(chaser.runs_for, 149);
        // The side batting first is charged the chaser's actual runs
        let setter = net_run_rate("A", std::slice::from_ref(&record)).unwrap();
        assert_eq!(setter.runs_for, 170);
        assert_eq!(setter.runs_against, 151);
    }

    #[test]
    fn test_normal_method_ignores_target() {
        let record = MatchRecord::completed(
            "m1",
            "s1",
            "A",
            "B",
            20,
            InningsTotal::new(170, 6, "20"),
            InningsTotal::new(171, 4, "18"),
        )
        .with_revised_target(ResultMethod::Normal, 171, "A");
        let chaser = net_run_rate("B", &[record]).unwrap();
        assert_eq!(chaser.runs_for, 171);
    }

    #[test]
    fn test_uses_match_balls_per_over() {
        let record = MatchRecord::completed(
            "m1",
            "s1",
            "A",
            "B",
            10,
            InningsTotal::new(80, 2, "9.7"),
            InningsTotal::new(70, 5, "10"),
        )
        .with_balls_per_over(8);
        let nrr = net_run_rate("A", &[record.clone()]).unwrap();
        assert_eq!(nrr.overs_for, Decimal::new(9875, 3));

        // The same text is invalid for a six-ball over
        let record = MatchRecord {
            balls_per_over: None,
            ..record
        };
        assert!(matches!(
            net_run_rate("A", &[record]),
            Err(OversError::BallsOutOfRange { balls: 7, balls_per_over: 6 })
        ));
    }

    #[test]
    fn test_swapping_sides_negates() {
        let matches = &sa_season()[..1];
        let sa = net_run_rate("SA", matches).unwrap();
        let ind = net_run_rate("IND", matches).unwrap();
        assert_eq!(sa.nrr.value(), -ind.nrr.value());
    }
}
