//! Season standings: a full recompute from the match list.
//!
//! ## Algorithm
//!
//! 1. Start a zeroed row for every team in the union of: teams registered to
//!    the season, teams with an existing stat row, and teams named in any of
//!    the season's matches. A team that played without being registered is
//!    never dropped.
//! 2. For each completed match with a score: both sides get `played + 1`; the
//!    side with more runs wins, equal runs is a tie.
//! 3. For each abandoned match: both sides get `played + 1`, `no_result + 1`
//!    and the no-result points.
//! 4. Net run rate per team over the completed matches.
//! 5. Rank by points, then exact NRR (both descending), then team id.
//!
//! Nothing is carried over from the previous rows except membership, so
//! running the aggregation twice over the same input gives the same table.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use tracing::{debug, info, instrument};

use crate::config::LeagueConfig;
use crate::error::OversError;
use crate::standings::nrr::net_run_rate;
use crate::types::{MatchRecord, PointsTableEntry, Team, TeamId, TeamSeasonStat};

/// Recomputes season standings under a league's points system.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandingsAggregator {
    config: LeagueConfig,
}

impl StandingsAggregator {
    pub fn new(config: LeagueConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LeagueConfig {
        &self.config
    }

    /// Ranked stat rows for `season_id`.
    ///
    /// Matches from other seasons are ignored. The returned rows are ordered
    /// by rank.
    ///
    /// # Errors
    ///
    /// [`OversError`] when a completed match has an unreadable overs value.
    ///
    /// # Example
    ///
    /// ```
    /// use crease_core::standings::StandingsAggregator;
    /// use crease_core::types::{InningsTotal, MatchRecord};
    ///
    /// let matches = vec![MatchRecord::completed(
    ///     "m1", "s1", "A", "B", 20,
    ///     InningsTotal::new(160, 5, "20"),
    ///     InningsTotal::new(150, 8, "20"),
    /// )];
    ///
    /// let rows = StandingsAggregator::default()
    ///     .aggregate("s1", &[], &[], &matches)
    ///     .unwrap();
    /// assert_eq!(rows[0].team_id, "A");
    /// assert_eq!(rows[0].points, 2);
    /// assert_eq!(rows[1].lost, 1);
    /// ```
    #[instrument(skip(self, teams, existing, matches), fields(matches = matches.len()))]
    pub fn aggregate(
        &self,
        season_id: &str,
        teams: &[Team],
        existing: &[TeamSeasonStat],
        matches: &[MatchRecord],
    ) -> Result<Vec<TeamSeasonStat>, OversError> {
        let season: Vec<&MatchRecord> = matches.iter().filter(|m| m.season_id == season_id).collect();

        // BTreeMap keeps iteration independent of input order
        let mut rows: BTreeMap<TeamId, TeamSeasonStat> = BTreeMap::new();
        let members = teams
            .iter()
            .filter(|t| t.season_id.as_deref() == Some(season_id))
            .map(|t| &t.id)
            .chain(existing.iter().filter(|s| s.season_id == season_id).map(|s| &s.team_id))
            .chain(season.iter().flat_map(|m| [&m.team_a, &m.team_b]));
        for team in members {
            rows.entry(team.clone())
                .or_insert_with(|| TeamSeasonStat::new(season_id, team.clone()));
        }

        let completed: Vec<MatchRecord> = season
            .iter()
            .filter(|m| m.is_completed())
            .map(|m| (*m).clone())
            .collect();

        for record in &completed {
            self.apply_result(&mut rows, record);
        }
        for record in season.iter().filter(|m| m.is_abandoned()) {
            self.apply_no_result(&mut rows, record);
        }

        for (team, row) in rows.iter_mut() {
            let breakdown = net_run_rate(team, &completed)?;
            row.nrr = breakdown.nrr;
            row.runs_scored = breakdown.runs_for;
            row.overs_faced = breakdown.overs_for;
            row.runs_conceded = breakdown.runs_against;
            row.overs_bowled = breakdown.overs_against;
        }

        let mut ranked: Vec<TeamSeasonStat> = rows.into_values().collect();
        ranked.sort_by(rank_order);

        info!(
            season_id,
            teams = ranked.len(),
            completed = completed.len(),
            "standings recomputed"
        );
        Ok(ranked)
    }

    fn apply_result(&self, rows: &mut BTreeMap<TeamId, TeamSeasonStat>, record: &MatchRecord) {
        let Some(score) = &record.score else {
            return;
        };
        let (a_runs, b_runs) = (score.team_a.runs, score.team_b.runs);
        let points = &self.config;

        if let Some(a) = rows.get_mut(&record.team_a) {
            a.played += 1;
            match a_runs.cmp(&b_runs) {
                Ordering::Greater => {
                    a.won += 1;
                    a.points += points.points_for_win;
                }
                Ordering::Less => a.lost += 1,
                Ordering::Equal => {
                    a.tied += 1;
                    a.points += points.points_for_tie;
                }
            }
        }
        if let Some(b) = rows.get_mut(&record.team_b) {
            b.played += 1;
            match b_runs.cmp(&a_runs) {
                Ordering::Greater => {
                    b.won += 1;
                    b.points += points.points_for_win;
                }
                Ordering::Less => b.lost += 1,
                Ordering::Equal => {
                    b.tied += 1;
                    b.points += points.points_for_tie;
                }
            }
        }
        debug!(match_id = %record.id, a_runs, b_runs, "result applied");
    }

    fn apply_no_result(&self, rows: &mut BTreeMap<TeamId, TeamSeasonStat>, record: &MatchRecord) {
        for team in [&record.team_a, &record.team_b] {
            if let Some(row) = rows.get_mut(team) {
                row.played += 1;
                row.no_result += 1;
                row.points += self.config.points_for_no_result;
            }
        }
        debug!(match_id = %record.id, "no result applied");
    }
}

/// Points desc, exact NRR desc, team id asc.
fn rank_order(a: &TeamSeasonStat, b: &TeamSeasonStat) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.nrr.cmp(&a.nrr))
        .then_with(|| a.team_id.cmp(&b.team_id))
}

/// Project ranked rows into table entries with positions `1..=N`.
///
/// Rows are re-sorted, so unranked input is accepted.
pub fn points_table(rows: &[TeamSeasonStat], teams: &[Team]) -> Vec<PointsTableEntry> {
    let by_id: HashMap<&str, &Team> = teams.iter().map(|t| (t.id.as_str(), t)).collect();
    let mut ranked: Vec<&TeamSeasonStat> = rows.iter().collect();
    ranked.sort_by(|a, b| rank_order(a, b));
    ranked
        .into_iter()
        .zip(1u32..)
        .map(|(row, position)| {
            PointsTableEntry::from_stat(position, row, by_id.get(row.team_id.as_str()).copied())
        })
        .collect()
}

/// A zeroed table for a new season, in the order the teams are given.
pub fn initial_points_table(season_id: &str, teams: &[Team]) -> Vec<PointsTableEntry> {
    teams
        .iter()
        .zip(1u32..)
        .map(|(team, position)| {
            let row = TeamSeasonStat::new(season_id, team.id.clone());
            PointsTableEntry::from_stat(position, &row, Some(team))
        })
        .collect()
}

// ============================================================================
// Unit Tests
// ============================================================================
