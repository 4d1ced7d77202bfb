//! League storage seam and season recompute service.
//!
//! ## Architecture
//!
//! The engine never talks to a database directly. [`LeagueRepository`] is the
//! contract a store must meet; [`InMemoryRepository`] implements it for tests,
//! the CLI and embedding.
//!
//! ## Memory Model
//!
//! Matches live in a [`Slab`] with a match id → slab key index, so lookups,
//! replacements and removals are O(1) and keys are reused after removal.
//!
//! ## Live states
//!
//! Live innings states are saved with compare-and-swap on the state root:
//! a writer passes the root it last read, and the save fails with
//! [`RepositoryError::StaleWrite`] if another writer got there first.

use std::collections::HashMap;

use slab::Slab;
use tracing::{info, instrument, warn};

use crate::error::RepositoryError;
use crate::standings::aggregator::{points_table, StandingsAggregator};
use crate::types::frame::state_root;
use crate::types::{MatchRecord, MatchState, PointsTableEntry, Team, TeamSeasonStat};

/// 32-byte state root used as a compare-and-swap token.
pub type StateRoot = [u8; 32];

/// Storage operations the standings and live-scoring paths need.
pub trait LeagueRepository {
    /// All known teams.
    fn teams(&self) -> Vec<Team>;

    /// Every match of a season, in any status.
    fn matches_by_season(&self, season_id: &str) -> Vec<MatchRecord>;

    /// Stat rows currently stored for a season.
    fn season_stats(&self, season_id: &str) -> Vec<TeamSeasonStat>;

    /// Replace a season's stat rows wholesale.
    fn replace_season_stats(&mut self, season_id: &str, rows: Vec<TeamSeasonStat>);

    /// Stored points table, ordered by position.
    fn points_table(&self, season_id: &str) -> Vec<PointsTableEntry>;

    /// Replace a season's points table wholesale.
    fn replace_points_table(&mut self, season_id: &str, table: Vec<PointsTableEntry>);

    /// Latest saved live state of a match and its root.
    fn live_state(&self, match_id: &str) -> Option<(MatchState, StateRoot)>;

    /// Save a live state if the stored root still equals `expected`
    /// (`None` meaning nothing saved yet). Returns the new root.
    fn save_live_state(
        &mut self,
        expected: Option<StateRoot>,
        state: MatchState,
    ) -> Result<StateRoot, RepositoryError>;
}

// ============================================================================
// In-memory implementation
// ============================================================================

/// Repository held entirely in memory.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    teams: Vec<Team>,
    matches: Slab<MatchRecord>,
    match_index: HashMap<String, usize>,
    /// Keyed by `TeamSeasonStat::key`
    stats: HashMap<String, TeamSeasonStat>,
    tables: HashMap<String, Vec<PointsTableEntry>>,
    live: HashMap<String, (MatchState, StateRoot)>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate room for `match_capacity` matches.
    pub fn with_capacity(match_capacity: usize) -> Self {
        Self {
            matches: Slab::with_capacity(match_capacity),
            match_index: HashMap::with_capacity(match_capacity),
            ..Self::default()
        }
    }

    /// Seed from teams and matches, e.g. a JSON export.
    pub fn from_parts(teams: Vec<Team>, matches: Vec<MatchRecord>) -> Self {
        let mut repo = Self::with_capacity(matches.len());
        repo.teams = teams;
        for record in matches {
            repo.put_match(record);
        }
        repo
    }

    // ========================================================================
    // Teams and matches
    // ========================================================================

    /// Insert or replace a team by id.
    pub fn put_team(&mut self, team: Team) {
        match self.teams.iter_mut().find(|t| t.id == team.id) {
            Some(existing) => *existing = team,
            None => self.teams.push(team),
        }
    }

    /// Insert or replace a match by id. Returns the slab key.
    pub fn put_match(&mut self, record: MatchRecord) -> usize {
        if let Some(&key) = self.match_index.get(&record.id) {
            self.matches[key] = record;
            return key;
        }
        let id = record.id.clone();
        let key = self.matches.insert(record);
        self.match_index.insert(id, key);
        key
    }

    pub fn get_match(&self, match_id: &str) -> Result<&MatchRecord, RepositoryError> {
        self.match_index
            .get(match_id)
            .and_then(|&key| self.matches.get(key))
            .ok_or_else(|| RepositoryError::MatchNotFound(match_id.to_string()))
    }

    /// Remove a match, returning it.
    pub fn remove_match(&mut self, match_id: &str) -> Result<MatchRecord, RepositoryError> {
        let key = self
            .match_index
            .remove(match_id)
            .ok_or_else(|| RepositoryError::MatchNotFound(match_id.to_string()))?;
        Ok(self.matches.remove(key))
    }

    #[inline]
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.matches.capacity()
    }
}

impl LeagueRepository for InMemoryRepository {
    fn teams(&self) -> Vec<Team> {
        self.teams.clone()
    }

    fn matches_by_season(&self, season_id: &str) -> Vec<MatchRecord> {
        let mut season: Vec<MatchRecord> = self
            .matches
            .iter()
            .map(|(_, m)| m)
            .filter(|m| m.season_id == season_id)
            .cloned()
            .collect();
        // Slab order depends on key reuse; present a stable order
        season.sort_by(|a, b| a.id.cmp(&b.id));
        season
    }

    fn season_stats(&self, season_id: &str) -> Vec<TeamSeasonStat> {
        let mut rows: Vec<TeamSeasonStat> = self
            .stats
            .values()
            .filter(|s| s.season_id == season_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.team_id.cmp(&b.team_id));
        rows
    }

    fn replace_season_stats(&mut self, season_id: &str, rows: Vec<TeamSeasonStat>) {
        self.stats.retain(|_, s| s.season_id != season_id);
        for row in rows {
            self.stats.insert(row.key(), row);
        }
    }

    fn points_table(&self, season_id: &str) -> Vec<PointsTableEntry> {
        self.tables.get(season_id).cloned().unwrap_or_default()
    }

    fn replace_points_table(&mut self, season_id: &str, mut table: Vec<PointsTableEntry>) {
        table.sort_by_key(|e| e.position);
        self.tables.insert(season_id.to_string(), table);
    }

    fn live_state(&self, match_id: &str) -> Option<(MatchState, StateRoot)> {
        self.live.get(match_id).cloned()
    }

    fn save_live_state(
        &mut self,
        expected: Option<StateRoot>,
        state: MatchState,
    ) -> Result<StateRoot, RepositoryError> {
        let current = self.live.get(state.match_id()).map(|(_, root)| *root);
        if current != expected {
            let err = RepositoryError::StaleWrite {
                match_id: state.match_id().to_string(),
                expected: root_label(expected),
                actual: root_label(current),
            };
            warn!(error = %err, "live state rejected");
            return Err(err);
        }

        let root = state_root(&state)?;
        self.live.insert(state.match_id().to_string(), (state, root));
        Ok(root)
    }
}

fn root_label(root: Option<StateRoot>) -> String {
    root.map(hex::encode).unwrap_or_else(|| "none".to_string())
}

// ============================================================================
// Recompute service
// ============================================================================

/// Recompute and store a season's stat rows and points table.
///
/// Reads the season's teams, existing rows and matches, aggregates from
/// scratch, and replaces both the rows and the table. Taking `&mut` on the
/// repository keeps recomputes for one repository from interleaving.
#[instrument(skip(repo, aggregator))]
pub fn recompute_season<R: LeagueRepository>(
    repo: &mut R,
    season_id: &str,
    aggregator: &StandingsAggregator,
) -> Result<Vec<PointsTableEntry>, RepositoryError> {
    let teams = repo.teams();
    let existing = repo.season_stats(season_id);
    let matches = repo.matches_by_season(season_id);

    let rows = aggregator.aggregate(season_id, &teams, &existing, &matches)?;
    let table = points_table(&rows, &teams);

    repo.replace_season_stats(season_id, rows);
    repo.replace_points_table(season_id, table.clone());
    info!(season_id, entries = table.len(), "points table stored");
    Ok(table)
}

// ============================================================================
// Unit Tests
// ============================================================================
