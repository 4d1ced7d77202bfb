//! Scoring session for one innings.
//!
//! A [`ScoringSession`] is what a scoring console holds: the current
//! [`MatchState`], the squads it may draw players from, a stack of previous
//! states for undo, and the commentary produced so far. It is owned by a
//! single scorer; the engine does not arbitrate concurrent writers.

use std::collections::HashMap;

use tracing::{debug, info, instrument};

use crate::engine::commentary::{ball_commentary, innings_start_commentary, new_bowler_commentary};
use crate::engine::processor::{BallOutcome, BallProcessor};
use crate::error::ScoringError;
use crate::types::{BallEvent, InningsPhase, MatchState, PlayerId};

/// A player available to the scorer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SquadPlayer {
    pub id: PlayerId,
    pub name: String,
}

impl SquadPlayer {
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Batting and bowling squads for the innings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Squads {
    pub batting: Vec<SquadPlayer>,
    pub bowling: Vec<SquadPlayer>,
}

impl Squads {
    fn contains(players: &[SquadPlayer], id: &str) -> bool {
        players.iter().any(|p| p.id == id)
    }

    fn check_batter(&self, id: &str) -> Result<(), ScoringError> {
        if Self::contains(&self.batting, id) {
            Ok(())
        } else {
            Err(ScoringError::NotInSquad(id.to_string()))
        }
    }

    fn check_bowler(&self, id: &str) -> Result<(), ScoringError> {
        if Self::contains(&self.bowling, id) {
            Ok(())
        } else {
            Err(ScoringError::NotInSquad(id.to_string()))
        }
    }
}

/// Undo entry: the state before a transition and the commentary length then.
#[derive(Debug, Clone)]
struct Checkpoint {
    state: MatchState,
    commentary_len: usize,
}

/// Ball-by-ball scoring for one innings with undo.
#[derive(Debug, Clone)]
pub struct ScoringSession {
    processor: BallProcessor,
    squads: Squads,
    names: HashMap<PlayerId, String>,
    current: MatchState,
    history: Vec<Checkpoint>,
    commentary: Vec<String>,
}

impl ScoringSession {
    /// Start a session from an existing state (fresh or resumed).
    pub fn new(state: MatchState, squads: Squads) -> Self {
        let names = squads
            .batting
            .iter()
            .chain(squads.bowling.iter())
            .map(|p| (p.id.clone(), p.name.clone()))
            .collect();
        Self {
            processor: BallProcessor::new(),
            squads,
            names,
            current: state,
            history: Vec::new(),
            commentary: Vec::new(),
        }
    }

    // ========================================================================
    // Scorer actions
    // ========================================================================

    /// Choose openers and the opening bowler.
    #[instrument(skip(self), fields(match_id = %self.current.match_id()))]
    pub fn start(&mut self, striker: &str, non_striker: &str, bowler: &str) -> Result<&MatchState, ScoringError> {
        self.squads.check_batter(striker)?;
        self.squads.check_batter(non_striker)?;
        self.squads.check_bowler(bowler)?;

        let next = self.current.start(striker, non_striker, bowler)?;
        let line = innings_start_commentary(self.name(striker), self.name(bowler));
        self.commit(next, Some(line));
        Ok(&self.current)
    }

    /// Record a delivery that is not a wicket, or a wicket whose replacement
    /// will be supplied later with [`ScoringSession::send_in`].
    #[instrument(skip(self, event), fields(match_id = %self.current.match_id()))]
    pub fn record(&mut self, event: &BallEvent) -> Result<BallOutcome, ScoringError> {
        let outcome = self.processor.process(&self.current, event)?;
        let line = self.describe(event);
        self.commit(outcome.state.clone(), line);
        Ok(outcome)
    }

    /// Record a wicket and send in the next batter in one step.
    ///
    /// The new batter takes the slot the dismissed player occupies after the
    /// delivery (including any end-of-over swap). When the wicket ends the
    /// innings no replacement is made.
    #[instrument(skip(self, event), fields(match_id = %self.current.match_id()))]
    pub fn record_wicket(&mut self, event: &BallEvent, new_batter: &str) -> Result<BallOutcome, ScoringError> {
        self.squads.check_batter(new_batter)?;
        let mut outcome = self.processor.process(&self.current, event)?;

        if let (Some(dismissed), false) = (&outcome.dismissed, outcome.innings_complete()) {
            outcome.state = outcome.state.with_new_batter(dismissed, new_batter)?;
        }

        let line = self.describe(event);
        self.commit(outcome.state.clone(), line);
        Ok(outcome)
    }

    /// Put a new batter in for a dismissed one.
    pub fn send_in(&mut self, dismissed: &str, new_batter: &str) -> Result<&MatchState, ScoringError> {
        self.squads.check_batter(new_batter)?;
        let next = self.current.with_new_batter(dismissed, new_batter)?;
        self.commit(next, None);
        Ok(&self.current)
    }

    /// Hand the ball to the next over's bowler.
    pub fn change_bowler(&mut self, bowler: &str) -> Result<&MatchState, ScoringError> {
        self.squads.check_bowler(bowler)?;
        let next = self.current.with_bowler(bowler)?;
        let line = new_bowler_commentary(self.name(bowler));
        self.commit(next, Some(line));
        Ok(&self.current)
    }

    /// Restore the state before the last action. Returns `false` when there is
    /// nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(checkpoint) => {
                debug!(sequence = checkpoint.state.sequence(), "undo");
                self.current = checkpoint.state;
                self.commentary.truncate(checkpoint.commentary_len);
                true
            }
            None => false,
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn state(&self) -> &MatchState {
        &self.current
    }

    pub fn phase(&self) -> InningsPhase {
        self.current.phase()
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn commentary(&self) -> &[String] {
        &self.commentary
    }

    /// Batters who may come in next: not out and not at the crease.
    pub fn available_batters(&self) -> Vec<&SquadPlayer> {
        self.squads
            .batting
            .iter()
            .filter(|p| !self.current.is_at_crease(&p.id))
            .filter(|p| !self.current.dismissed_players().contains(&p.id))
            .collect()
    }

    /// Bowlers who may bowl the next over.
    pub fn available_bowlers(&self) -> Vec<&SquadPlayer> {
        let previous = self.current.previous_bowler();
        self.squads
            .bowling
            .iter()
            .filter(|p| Some(p.id.as_str()) != previous)
            .collect()
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn name<'a>(&'a self, id: &'a str) -> &'a str {
        self.names.get(id).map(String::as_str).unwrap_or(id)
    }

    fn describe(&self, event: &BallEvent) -> Option<String> {
        let bowler = self.current.bowler()?;
        let striker = self.current.striker()?;
        Some(ball_commentary(self.name(bowler), self.name(striker), event))
    }

    fn commit(&mut self, next: MatchState, line: Option<String>) {
        let previous = std::mem::replace(&mut self.current, next);
        self.history.push(Checkpoint {
            state: previous,
            commentary_len: self.commentary.len(),
        });
        if let Some(line) = line {
            self.commentary.push(line);
        }
        if let InningsPhase::Complete(reason) = self.current.phase() {
            info!(?reason, score = %self.current.score(), "innings closed");
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{InningsSetup, MatchFormat, WicketType};

    fn squads() -> Squads {
        Squads {
            batting: (1..=11)
                .map(|i| SquadPlayer::new(format!("a{}", i), format!("Batter {}", i)))
                .collect(),
            bowling: (1..=11)
                .map(|i| SquadPlayer::new(format!("b{}", i), format!("Bowler {}", i)))
                .collect(),
        }
    }

    fn session() -> ScoringSession {
        let state = MatchState::new(InningsSetup {
            match_id: "m1".into(),
            innings: 1,
            batting_team: "A".into(),
            bowling_team: "B".into(),
            format: MatchFormat::t20(),
            target: None,
        })
        .unwrap();
        let mut session = ScoringSession::new(state, squads());
        session.start("a1", "a2", "b1").unwrap();
        session
    }

    #[test]
    fn test_start_checks_squads() {
        let state = MatchState::new(InningsSetup {
            match_id: "m1".into(),
            innings: 1,
            batting_team: "A".into(),
            bowling_team: "B".into(),
            format: MatchFormat::t20(),
            target: None,
        })
        .unwrap();
        let mut session = ScoringSession::new(state, squads());
        assert_eq!(
            session.start("b1", "a2", "b2").unwrap_err(),
            ScoringError::NotInSquad("b1".into())
        );
        assert_eq!(
            session.start("a1", "a2", "a3").unwrap_err(),
            ScoringError::NotInSquad("a3".into())
        );
        assert!(session.start("a1", "a2", "b1").is_ok());
        assert_eq!(
            session.commentary().last().map(String::as_str),
            Some("Match started. Batter 1 on strike. Bowler 1 to open the bowling.")
        );
    }

    #[test]
    fn test_record_and_undo() {
        let mut session = session();
        session.record(&BallEvent::runs(4)).unwrap();
        session.record(&BallEvent::runs(1)).unwrap();
        assert_eq!(session.state().score().total_runs, 5);
        assert_eq!(session.commentary().len(), 3);

        assert!(session.undo());
        assert_eq!(session.state().score().total_runs, 4);
        assert_eq!(session.state().striker(), Some("a1"));
        assert_eq!(session.commentary().len(), 2);

        assert!(session.undo());
        assert!(session.undo());
        assert_eq!(session.phase(), InningsPhase::NotStarted);
        assert!(!session.undo());
    }

    #[test]
    fn test_rejected_delivery_leaves_history_alone() {
        let mut session = session();
        let before = session.state().clone();
        let err = session.record(&BallEvent::wicket(WicketType::RunOut)).unwrap_err();
        assert_eq!(err, ScoringError::AmbiguousDismissal);
        assert_eq!(session.state(), &before);
        assert_eq!(session.commentary().len(), 1);
    }

    #[test]
    fn test_record_wicket_sends_in_new_batter() {
        let mut session = session();
        let outcome = session
            .record_wicket(&BallEvent::wicket(WicketType::Caught), "a3")
            .unwrap();
        assert_eq!(outcome.dismissed.as_deref(), Some("a1"));
        assert_eq!(session.state().striker(), Some("a3"));
        assert_eq!(session.phase(), InningsPhase::InProgress);
        assert_eq!(
            session.commentary().last().map(String::as_str),
            Some("Bowler 1 to Batter 1, OUT! Caught.")
        );
    }

    #[test]
    fn test_record_wicket_rejects_unavailable_batter() {
        let mut session = session();
        let err = session
            .record_wicket(&BallEvent::wicket(WicketType::Bowled), "a2")
            .unwrap_err();
        assert_eq!(err, ScoringError::AlreadyBatting("a2".into()));
        assert_eq!(session.state().score().wickets, 0);
    }

    #[test]
    fn test_send_in_after_plain_record() {
        let mut session = session();
        session.record(&BallEvent::wicket(WicketType::Bowled)).unwrap();
        assert_eq!(session.phase(), InningsPhase::AwaitingBatter("a1".into()));
        session.send_in("a1", "a3").unwrap();
        assert_eq!(session.phase(), InningsPhase::InProgress);
    }

    #[test]
    fn test_over_change_flow() {
        let mut session = session();
        for _ in 0..6 {
            session.record(&BallEvent::runs(0)).unwrap();
        }
        assert_eq!(session.phase(), InningsPhase::AwaitingBowler);
        let ids: Vec<&str> = session.available_bowlers().iter().map(|p| p.id.as_str()).collect();
        assert!(!ids.contains(&"b1"));
        assert_eq!(ids.len(), 10);

        assert_eq!(
            session.change_bowler("b1").unwrap_err(),
            ScoringError::ConsecutiveOvers("b1".into())
        );
        session.change_bowler("b2").unwrap();
        assert_eq!(session.state().bowler(), Some("b2"));
        assert_eq!(
            session.commentary().last().map(String::as_str),
            Some("New bowler: Bowler 2 comes into the attack.")
        );
    }

    #[test]
    fn test_available_batters_excludes_crease_and_dismissed() {
        let mut session = session();
        session
            .record_wicket(&BallEvent::wicket(WicketType::Bowled), "a3")
            .unwrap();
        let ids: Vec<&str> = session.available_batters().iter().map(|p| p.id.as_str()).collect();
        assert!(!ids.contains(&"a1"));
        assert!(!ids.contains(&"a2"));
        assert!(!ids.contains(&"a3"));
        assert_eq!(ids.len(), 8);
    }
}
