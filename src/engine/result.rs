//! Deciding a match from its two innings.
//!
//! Bridges ball-by-ball scoring and standings: once both innings are complete,
//! [`decide`] names the winner and margin and [`completed_record`] produces the
//! [`MatchRecord`] the standings aggregator consumes.

use std::fmt;

use tracing::{info, instrument};

use crate::error::ScoringError;
use crate::types::{
    InningsSetup, InningsTotal, MatchRecord, MatchScore, MatchState, MatchStatus, ResultMethod,
    TeamId,
};
use crate::types::overs::DEFAULT_BALLS_PER_OVER;

/// How a match was won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Margin {
    /// Side batting first defended its total
    Runs(u32),
    /// Chasing side reached the target with wickets in hand
    Wickets(u32),
    Tie,
}

/// Winner and margin of a completed match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    pub winner: Option<TeamId>,
    pub loser: Option<TeamId>,
    pub margin: Margin,
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let winner = self.winner.as_deref().unwrap_or_default();
        match self.margin {
            Margin::Tie => f.write_str("Match tied"),
            Margin::Runs(1) => write!(f, "{} won by 1 run", winner),
            Margin::Runs(n) => write!(f, "{} won by {} runs", winner, n),
            Margin::Wickets(1) => write!(f, "{} won by 1 wicket", winner),
            Margin::Wickets(n) => write!(f, "{} won by {} wickets", winner, n),
        }
    }
}

/// Setup for the chase: teams swapped, target one more than the first total.
pub fn second_innings_setup(first: &MatchState) -> Result<InningsSetup, ScoringError> {
    ensure_complete(first)?;
    Ok(InningsSetup {
        match_id: first.match_id().to_string(),
        innings: 2,
        batting_team: first.bowling_team().to_string(),
        bowling_team: first.batting_team().to_string(),
        format: first.format(),
        target: Some(first.score().total_runs + 1),
    })
}

/// Winner and margin. Both innings must be complete.
#[instrument(skip(first, second), fields(match_id = %first.match_id()))]
pub fn decide(first: &MatchState, second: &MatchState) -> Result<MatchOutcome, ScoringError> {
    ensure_complete(first)?;
    ensure_complete(second)?;

    let set = first.score().total_runs;
    let chased = second.score().total_runs;

    let outcome = if chased > set {
        let wickets_in_hand = second
            .format()
            .max_wickets
            .saturating_sub(second.score().wickets);
        MatchOutcome {
            winner: Some(second.batting_team().to_string()),
            loser: Some(first.batting_team().to_string()),
            margin: Margin::Wickets(wickets_in_hand),
        }
    } else if set > chased {
        MatchOutcome {
            winner: Some(first.batting_team().to_string()),
            loser: Some(second.batting_team().to_string()),
            margin: Margin::Runs(set - chased),
        }
    } else {
        MatchOutcome {
            winner: None,
            loser: None,
            margin: Margin::Tie,
        }
    };

    info!(result = %outcome, "match decided");
    Ok(outcome)
}

/// Stored record for a match scored ball by ball. Team A batted first.
pub fn completed_record(
    season_id: impl Into<String>,
    first: &MatchState,
    second: &MatchState,
) -> Result<MatchRecord, ScoringError> {
    ensure_complete(first)?;
    ensure_complete(second)?;

    let format = first.format();
    let total = |state: &MatchState| {
        InningsTotal::new(state.score().total_runs, state.score().wickets, state.overs())
    };

    Ok(MatchRecord {
        id: first.match_id().to_string(),
        season_id: season_id.into(),
        team_a: first.batting_team().to_string(),
        team_b: second.batting_team().to_string(),
        status: MatchStatus::Completed,
        score: Some(MatchScore {
            team_a: total(first),
            team_b: total(second),
        }),
        total_overs: format.overs_quota,
        balls_per_over: (format.balls_per_over != DEFAULT_BALLS_PER_OVER)
            .then_some(format.balls_per_over),
        method: Some(ResultMethod::Normal),
        target_score: second.target(),
        batting_first: Some(first.batting_team().to_string()),
    })
}

fn ensure_complete(state: &MatchState) -> Result<(), ScoringError> {
    if state.phase().is_complete() {
        Ok(())
    } else {
        Err(ScoringError::InningsInProgress(state.innings()))
    }
}
