//! Innings state for ball-by-ball scoring.
//!
//! ## Immutability
//!
//! A [`MatchState`] is never edited in place. Every transition (starting the
//! innings, a delivery, a new batter, a bowler change) takes `&self` and returns
//! a new value. Undo is therefore just "keep the previous value".
//!
//! ## Phases
//!
//! ```text
//! NotStarted --start--> InProgress --ball--> InProgress
//!                          |   ^                |
//!                 wicket   v   | new batter     | over complete
//!                     AwaitingBatter      AwaitingBowler --bowler--> InProgress
//!
//! any --all out / quota reached / target reached--> Complete
//! ```

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ScoringError;
use crate::types::overs::run_rate;
use crate::types::{BallCode, MatchFormat, Overs, PlayerId, Score, TeamId};

// ============================================================================
// Phase
// ============================================================================

/// Why an innings ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompletionReason {
    AllOut,
    OversExhausted,
    TargetReached,
}

/// Where the innings is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InningsPhase {
    /// Openers and bowler not yet chosen
    NotStarted,
    /// Accepting deliveries
    InProgress,
    /// A batter was dismissed and has not been replaced
    AwaitingBatter(PlayerId),
    /// An over just ended; the next bowler must be chosen
    AwaitingBowler,
    /// Terminal
    Complete(CompletionReason),
}

impl InningsPhase {
    /// Compact code used in the live frame.
    pub fn to_u8(&self) -> u8 {
        match self {
            InningsPhase::NotStarted => 0,
            InningsPhase::InProgress => 1,
            InningsPhase::AwaitingBatter(_) => 2,
            InningsPhase::AwaitingBowler => 3,
            InningsPhase::Complete(CompletionReason::AllOut) => 4,
            InningsPhase::Complete(CompletionReason::OversExhausted) => 5,
            InningsPhase::Complete(CompletionReason::TargetReached) => 6,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, InningsPhase::Complete(_))
    }
}

// ============================================================================
// InningsSetup
// ============================================================================

/// Everything needed to open an innings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InningsSetup {
    pub match_id: String,
    /// 1 or 2
    pub innings: u8,
    pub batting_team: TeamId,
    pub bowling_team: TeamId,
    pub format: MatchFormat,
    /// Runs required to win, for a chasing innings
    pub target: Option<u32>,
}

// ============================================================================
// MatchState
// ============================================================================

/// The state of one innings after some number of deliveries.
///
/// ## Example
///
/// ```
/// use crease_core::types::{InningsSetup, InningsPhase, MatchFormat, MatchState};
///
/// let state = MatchState::new(InningsSetup {
///     match_id: "m1".into(),
///     innings: 1,
///     batting_team: "SA".into(),
///     bowling_team: "IND".into(),
///     format: MatchFormat::t20(),
///     target: None,
/// })
/// .unwrap();
/// assert_eq!(state.phase(), InningsPhase::NotStarted);
///
/// let state = state.start("p1", "p2", "b1").unwrap();
/// assert_eq!(state.phase(), InningsPhase::InProgress);
/// assert_eq!(state.striker(), Some("p1"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchState {
    pub(crate) match_id: String,
    pub(crate) innings: u8,
    pub(crate) batting_team: TeamId,
    pub(crate) bowling_team: TeamId,
    pub(crate) format: MatchFormat,
    pub(crate) target: Option<u32>,
    pub(crate) score: Score,
    pub(crate) striker: Option<PlayerId>,
    pub(crate) non_striker: Option<PlayerId>,
    pub(crate) bowler: Option<PlayerId>,
    /// Bowler of the last completed over
    pub(crate) previous_bowler: Option<PlayerId>,
    pub(crate) overs: Overs,
    pub(crate) this_over: Vec<BallCode>,
    pub(crate) dismissed: BTreeSet<PlayerId>,
    pub(crate) awaiting_bowler: bool,
    /// Incremented by every transition
    pub(crate) sequence: u64,
}

impl MatchState {
    /// Open an innings with no deliveries bowled.
    ///
    /// # Errors
    ///
    /// [`ScoringError::InvalidFormat`] if the format cannot be scored.
    pub fn new(setup: InningsSetup) -> Result<Self, ScoringError> {
        setup.format.validate()?;
        Ok(Self {
            match_id: setup.match_id,
            innings: setup.innings,
            batting_team: setup.batting_team,
            bowling_team: setup.bowling_team,
            format: setup.format,
            target: setup.target,
            score: Score::default(),
            striker: None,
            non_striker: None,
            bowler: None,
            previous_bowler: None,
            overs: Overs::ZERO,
            this_over: Vec::new(),
            dismissed: BTreeSet::new(),
            awaiting_bowler: false,
            sequence: 0,
        })
    }

    // ========================================================================
    // Transitions (other than deliveries)
    // ========================================================================

    /// Choose the opening pair and the opening bowler.
    pub fn start(
        &self,
        striker: impl Into<PlayerId>,
        non_striker: impl Into<PlayerId>,
        bowler: impl Into<PlayerId>,
    ) -> Result<Self, ScoringError> {
        if self.phase() != InningsPhase::NotStarted {
            return Err(ScoringError::AlreadyStarted);
        }
        let striker = striker.into();
        let non_striker = non_striker.into();
        if striker == non_striker {
            return Err(ScoringError::SameBatters);
        }
        for player in [&striker, &non_striker] {
            if self.dismissed.contains(player) {
                return Err(ScoringError::AlreadyDismissed(player.clone()));
            }
        }

        let mut next = self.clone();
        next.striker = Some(striker);
        next.non_striker = Some(non_striker);
        next.bowler = Some(bowler.into());
        next.sequence += 1;
        Ok(next)
    }

    /// Put `new_batter` in the slot vacated by `dismissed`.
    ///
    /// The caller chooses the replacement; the engine only checks that it is a
    /// batter who is neither out nor already at the crease.
    pub fn with_new_batter(
        &self,
        dismissed: &str,
        new_batter: impl Into<PlayerId>,
    ) -> Result<Self, ScoringError> {
        if let InningsPhase::Complete(_) = self.phase() {
            return Err(ScoringError::InningsComplete);
        }
        if !self.dismissed.contains(dismissed) {
            return Err(ScoringError::NotAtCrease(dismissed.to_string()));
        }
        let new_batter = new_batter.into();
        if self.dismissed.contains(&new_batter) {
            return Err(ScoringError::AlreadyDismissed(new_batter));
        }
        if self.is_at_crease(&new_batter) {
            return Err(ScoringError::AlreadyBatting(new_batter));
        }

        let mut next = self.clone();
        if next.striker.as_deref() == Some(dismissed) {
            next.striker = Some(new_batter);
        } else if next.non_striker.as_deref() == Some(dismissed) {
            next.non_striker = Some(new_batter);
        } else {
            return Err(ScoringError::NotAtCrease(dismissed.to_string()));
        }
        next.sequence += 1;
        Ok(next)
    }

    /// Hand the ball to the bowler of the next over.
    pub fn with_bowler(&self, bowler: impl Into<PlayerId>) -> Result<Self, ScoringError> {
        if let InningsPhase::Complete(_) = self.phase() {
            return Err(ScoringError::InningsComplete);
        }
        if !self.awaiting_bowler {
            return Err(ScoringError::NoBowlerChangePending);
        }
        let bowler = bowler.into();
        if self.previous_bowler.as_ref() == Some(&bowler) {
            return Err(ScoringError::ConsecutiveOvers(bowler));
        }

        let mut next = self.clone();
        next.bowler = Some(bowler);
        next.awaiting_bowler = false;
        next.sequence += 1;
        Ok(next)
    }

    // ========================================================================
    // Derived state
    // ========================================================================

    /// Current lifecycle phase, derived from the fields.
    pub fn phase(&self) -> InningsPhase {
        if let Some(reason) = self.completion() {
            return InningsPhase::Complete(reason);
        }
        let (Some(striker), Some(non_striker), Some(_)) =
            (&self.striker, &self.non_striker, &self.bowler)
        else {
            return InningsPhase::NotStarted;
        };
        for batter in [striker, non_striker] {
            if self.dismissed.contains(batter) {
                return InningsPhase::AwaitingBatter(batter.clone());
            }
        }
        if self.awaiting_bowler {
            return InningsPhase::AwaitingBowler;
        }
        InningsPhase::InProgress
    }

    fn completion(&self) -> Option<CompletionReason> {
        if let Some(target) = self.target {
            if self.score.total_runs >= target {
                return Some(CompletionReason::TargetReached);
            }
        }
        if self.score.wickets >= self.format.max_wickets {
            return Some(CompletionReason::AllOut);
        }
        if self.overs.completed() >= self.format.overs_quota {
            return Some(CompletionReason::OversExhausted);
        }
        None
    }

    /// Whether `player` is the striker or non-striker.
    pub fn is_at_crease(&self, player: &str) -> bool {
        self.striker.as_deref() == Some(player) || self.non_striker.as_deref() == Some(player)
    }

    /// Decimal overs bowled, for rate arithmetic.
    pub fn decimal_overs(&self) -> Decimal {
        // Format is validated at construction and the clock keeps balls in range.
        self.overs
            .to_decimal(self.format.balls_per_over)
            .unwrap_or(Decimal::ZERO)
    }

    /// Runs per over so far.
    pub fn current_run_rate(&self) -> Decimal {
        run_rate(self.score.total_runs, self.decimal_overs())
    }

    /// Legal deliveries left in the quota.
    pub fn balls_remaining(&self) -> u64 {
        let quota = u64::from(self.format.overs_quota) * u64::from(self.format.balls_per_over);
        quota.saturating_sub(self.overs.total_balls(self.format.balls_per_over))
    }

    /// Runs still needed to reach the target, if chasing.
    pub fn runs_needed(&self) -> Option<u32> {
        self.target
            .map(|target| target.saturating_sub(self.score.total_runs))
    }

    /// Runs per over needed from here to reach the target.
    pub fn required_run_rate(&self) -> Option<Decimal> {
        let needed = self.runs_needed()?;
        let balls = self.balls_remaining();
        if balls == 0 {
            return Some(Decimal::ZERO);
        }
        let overs_left = Decimal::from(balls) / Decimal::from(self.format.balls_per_over);
        Some(run_rate(needed, overs_left))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn match_id(&self) -> &str {
        &self.match_id
    }

    pub fn innings(&self) -> u8 {
        self.innings
    }

    pub fn batting_team(&self) -> &str {
        &self.batting_team
    }

    pub fn bowling_team(&self) -> &str {
        &self.bowling_team
    }

    pub fn format(&self) -> MatchFormat {
        self.format
    }

    pub fn target(&self) -> Option<u32> {
        self.target
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn striker(&self) -> Option<&str> {
        self.striker.as_deref()
    }

    pub fn non_striker(&self) -> Option<&str> {
        self.non_striker.as_deref()
    }

    pub fn bowler(&self) -> Option<&str> {
        self.bowler.as_deref()
    }

    pub fn previous_bowler(&self) -> Option<&str> {
        self.previous_bowler.as_deref()
    }

    pub fn overs(&self) -> Overs {
        self.overs
    }

    /// Legal balls bowled in the over in progress.
    pub fn balls_bowled_in_over(&self) -> u32 {
        self.overs.balls()
    }

    pub fn this_over(&self) -> &[BallCode] {
        &self.this_over
    }

    pub fn dismissed_players(&self) -> &BTreeSet<PlayerId> {
        &self.dismissed
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(target: Option<u32>) -> InningsSetup {
        InningsSetup {
            match_id: "m1".into(),
            innings: if target.is_some() { 2 } else { 1 },
            batting_team: "A".into(),
            bowling_team: "B".into(),
            format: MatchFormat::t20(),
            target,
        }
    }

    #[test]
    fn test_new_rejects_invalid_format() {
        let mut bad = setup(None);
        bad.format = MatchFormat::t20().with_balls_per_over(0);
        assert!(matches!(MatchState::new(bad), Err(ScoringError::InvalidFormat(_))));
    }

    #[test]
    fn test_start() {
        let state = MatchState::new(setup(None)).unwrap();
        let started = state.start("p1", "p2", "b1").unwrap();
        assert_eq!(started.phase(), InningsPhase::InProgress);
        assert_eq!(started.sequence(), 1);
        // Original value untouched
        assert_eq!(state.phase(), InningsPhase::NotStarted);

        assert_eq!(started.start("p3", "p4", "b2"), Err(ScoringError::AlreadyStarted));
        assert_eq!(state.start("p1", "p1", "b1"), Err(ScoringError::SameBatters));
    }

    #[test]
    fn test_with_new_batter_fills_vacated_slot() {
        let mut state = MatchState::new(setup(None)).unwrap().start("p1", "p2", "b1").unwrap();
        state.dismissed.insert("p2".into());
        assert_eq!(state.phase(), InningsPhase::AwaitingBatter("p2".into()));

        let next = state.with_new_batter("p2", "p3").unwrap();
        assert_eq!(next.striker(), Some("p1"));
        assert_eq!(next.non_striker(), Some("p3"));
        assert_eq!(next.phase(), InningsPhase::InProgress);
    }

    #[test]
    fn test_with_new_batter_rejections() {
        let mut state = MatchState::new(setup(None)).unwrap().start("p1", "p2", "b1").unwrap();
        state.dismissed.insert("p2".into());
        assert_eq!(
            state.with_new_batter("p2", "p1"),
            Err(ScoringError::AlreadyBatting("p1".into()))
        );
        assert_eq!(
            state.with_new_batter("p2", "p2"),
            Err(ScoringError::AlreadyDismissed("p2".into()))
        );
        assert_eq!(
            state.with_new_batter("p9", "p3"),
            Err(ScoringError::NotAtCrease("p9".into()))
        );
    }

    #[test]
    fn test_with_bowler_rules() {
        let mut state = MatchState::new(setup(None)).unwrap().start("p1", "p2", "b1").unwrap();
        assert_eq!(state.with_bowler("b2"), Err(ScoringError::NoBowlerChangePending));

        state.awaiting_bowler = true;
        state.previous_bowler = Some("b1".into());
        assert_eq!(state.phase(), InningsPhase::AwaitingBowler);
        assert_eq!(
            state.with_bowler("b1"),
            Err(ScoringError::ConsecutiveOvers("b1".into()))
        );
        let next = state.with_bowler("b2").unwrap();
        assert_eq!(next.bowler(), Some("b2"));
        assert_eq!(next.phase(), InningsPhase::InProgress);
    }

    #[test]
    fn test_completion_reasons() {
        let mut state = MatchState::new(setup(None)).unwrap().start("p1", "p2", "b1").unwrap();
        state.score.wickets = 10;
        assert_eq!(state.phase(), InningsPhase::Complete(CompletionReason::AllOut));

        let mut state = MatchState::new(setup(None)).unwrap().start("p1", "p2", "b1").unwrap();
        state.overs = Overs::whole(20);
        assert_eq!(state.phase(), InningsPhase::Complete(CompletionReason::OversExhausted));

        let mut state = MatchState::new(setup(Some(150))).unwrap().start("p1", "p2", "b1").unwrap();
        state.score.total_runs = 150;
        assert_eq!(state.phase(), InningsPhase::Complete(CompletionReason::TargetReached));
    }

    #[test]
    fn test_rates() {
        let mut state = MatchState::new(setup(Some(181))).unwrap().start("p1", "p2", "b1").unwrap();
        assert_eq!(state.current_run_rate(), Decimal::ZERO);

        state.score.total_runs = 90;
        state.overs = Overs::whole(10);
        assert_eq!(state.current_run_rate(), Decimal::from(9));
        assert_eq!(state.runs_needed(), Some(91));
        assert_eq!(state.balls_remaining(), 60);
        assert_eq!(state.required_run_rate().unwrap(), Decimal::new(91, 1));
    }

    #[test]
    fn test_required_rate_absent_without_target() {
        let state = MatchState::new(setup(None)).unwrap();
        assert_eq!(state.required_run_rate(), None);
    }
}
