//! Ball processor: applies one delivery to an innings.
//!
//! ## Order of operations
//!
//! 1. Validate: the innings must be in progress, and a wicket must resolve to
//!    a batter at the crease. Nothing is applied when validation fails.
//! 2. Runs: total += runs + penalty. Wides take `1 + runs` into the wides
//!    subtotal, no-balls take the 1-run penalty, byes and leg byes take the
//!    runs. None of these are credited to the batter.
//! 3. Clock: legal deliveries advance the over/ball clock; wides and no-balls
//!    do not.
//! 4. Over log: append the [`BallCode`].
//! 5. Wicket: increment wickets and record the dismissed batter. The caller
//!    supplies the replacement afterwards with `MatchState::with_new_batter`.
//! 6. Strike: odd runs run swap the batters; the end of an over swaps them
//!    once more, clears the over log and asks for a new bowler.

use tracing::{debug, info, instrument, warn};

use crate::engine::clock::OverClock;
use crate::error::ScoringError;
use crate::types::{BallCode, BallEvent, ExtrasType, InningsPhase, MatchState, PlayerId};

/// Outcome of processing one delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BallOutcome {
    /// State after the delivery
    pub state: MatchState,
    /// Over-log entry appended for this delivery
    pub code: BallCode,
    /// Runs added to the team total
    pub runs_added: u32,
    /// Batter dismissed on this delivery
    pub dismissed: Option<PlayerId>,
    /// This delivery completed an over
    pub over_completed: bool,
}

impl BallOutcome {
    /// The innings ended on this delivery.
    pub fn innings_complete(&self) -> bool {
        self.state.phase().is_complete()
    }
}

/// Stateless delivery processor.
///
/// ## Example
///
/// ```
/// use crease_core::engine::BallProcessor;
/// use crease_core::types::{BallEvent, InningsSetup, MatchFormat, MatchState};
///
/// let state = MatchState::new(InningsSetup {
///     match_id: "m1".into(),
///     innings: 1,
///     batting_team: "A".into(),
///     bowling_team: "B".into(),
///     format: MatchFormat::t20(),
///     target: None,
/// })
/// .unwrap()
/// .start("p1", "p2", "b1")
/// .unwrap();
///
/// let processor = BallProcessor::new();
/// let outcome = processor.process(&state, &BallEvent::runs(1)).unwrap();
/// assert_eq!(outcome.state.score().total_runs, 1);
/// assert_eq!(outcome.state.striker(), Some("p2"));
/// // The input is untouched
/// assert_eq!(state.score().total_runs, 0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BallProcessor;

impl BallProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Apply `event` to `state`, returning the next state.
    ///
    /// # Errors
    ///
    /// * [`ScoringError::InningsComplete`] once the innings has ended
    /// * [`ScoringError::InningsNotStarted`] before openers and bowler are set
    /// * [`ScoringError::AwaitingBatter`] until a dismissed batter is replaced
    /// * [`ScoringError::AwaitingBowler`] until the next over's bowler is set
    /// * [`ScoringError::AmbiguousDismissal`] for a run out with no named batter
    /// * [`ScoringError::NotAtCrease`] when the named batter is not batting
    /// * [`ScoringError::RunsOverflow`] when the total would not fit in a `u32`
    #[instrument(skip(self, state, event), fields(match_id = %state.match_id(), seq = state.sequence()))]
    pub fn process(&self, state: &MatchState, event: &BallEvent) -> Result<BallOutcome, ScoringError> {
        self.apply(state, event).map_err(|e| {
            warn!(error = %e, "delivery rejected");
            e
        })
    }

    fn apply(&self, state: &MatchState, event: &BallEvent) -> Result<BallOutcome, ScoringError> {
        let (striker, non_striker) = Self::batters_in_play(state)?;
        let dismissed = if event.is_wicket() {
            Some(Self::resolve_dismissed(event, striker, non_striker)?)
        } else {
            None
        };
        let clock = OverClock::new(state.format.balls_per_over)
            .map_err(|e| ScoringError::InvalidFormat(e.to_string()))?;

        let mut next = state.clone();
        let runs = event.runs_scored();

        // Runs and extras. Subtotals never exceed the total.
        let runs_added = event.total_runs().ok_or(ScoringError::RunsOverflow)?;
        next.score.total_runs = next
            .score
            .total_runs
            .checked_add(runs_added)
            .ok_or(ScoringError::RunsOverflow)?;
        let extras = &mut next.score.extras;
        match event.extras() {
            ExtrasType::Wide => extras.wides += runs_added,
            // Penalty only: runs off a no-ball belong to the batter. The league
            // app's scorer books `1 + runs` here instead.
            ExtrasType::NoBall => extras.no_balls += 1,
            ExtrasType::Bye => extras.byes += runs,
            ExtrasType::LegBye => extras.leg_byes += runs,
            ExtrasType::None => {}
        }

        // Clock
        let over_completed = if event.is_legal() {
            let tick = clock.advance(next.overs);
            next.overs = tick.overs;
            tick.over_completed
        } else {
            false
        };

        // Over log
        let code = BallCode::for_event(event);
        next.this_over.push(code);

        // Wicket
        if let Some(player) = &dismissed {
            next.score.wickets += 1;
            next.dismissed.insert(player.clone());
        }

        // Strike rotation for runs run
        if runs % 2 == 1 {
            std::mem::swap(&mut next.striker, &mut next.non_striker);
        }

        // End of over
        if over_completed {
            std::mem::swap(&mut next.striker, &mut next.non_striker);
            next.this_over.clear();
            next.previous_bowler = next.bowler.clone();
            next.awaiting_bowler = true;
        }

        next.sequence += 1;

        debug!(
            code = %code,
            score = %next.score,
            overs = %next.overs,
            "delivery applied"
        );

        match next.phase() {
            InningsPhase::Complete(reason) => {
                next.awaiting_bowler = false;
                info!(?reason, score = %next.score, overs = %next.overs, "innings complete");
            }
            _ if over_completed => {
                info!(over = next.overs.completed(), score = %next.score, "over complete");
            }
            _ => {}
        }

        Ok(BallOutcome {
            state: next,
            code,
            runs_added,
            dismissed,
            over_completed,
        })
    }

    /// Striker and non-striker, if the innings can accept a delivery.
    fn batters_in_play(state: &MatchState) -> Result<(&str, &str), ScoringError> {
        match state.phase() {
            InningsPhase::InProgress => {}
            InningsPhase::NotStarted => return Err(ScoringError::InningsNotStarted),
            InningsPhase::AwaitingBatter(player) => return Err(ScoringError::AwaitingBatter(player)),
            InningsPhase::AwaitingBowler => return Err(ScoringError::AwaitingBowler),
            InningsPhase::Complete(_) => return Err(ScoringError::InningsComplete),
        }
        match (state.striker(), state.non_striker()) {
            (Some(striker), Some(non_striker)) => Ok((striker, non_striker)),
            _ => Err(ScoringError::InningsNotStarted),
        }
    }

    /// Who is out: the named batter, or the striker when the mode of dismissal
    /// can only apply to the striker.
    fn resolve_dismissed(
        event: &BallEvent,
        striker: &str,
        non_striker: &str,
    ) -> Result<PlayerId, ScoringError> {
        match event.dismissed() {
            Some(player) if player == striker || player == non_striker => Ok(player.to_string()),
            Some(player) => Err(ScoringError::NotAtCrease(player.to_string())),
            None => match event.wicket_type() {
                Some(kind) if kind.requires_named_batter() => Err(ScoringError::AmbiguousDismissal),
                _ => Ok(striker.to_string()),
            },
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
