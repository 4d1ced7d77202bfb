//! Ball-by-ball scoring engine.
//!
//! ## Design Principles
//!
//! 1. **Determinism**: the same state and delivery always produce the same
//!    next state
//! 2. **Immutable transitions**: every operation returns a new [`MatchState`]
//!    and leaves its input untouched, so undo is just keeping the old value
//! 3. **Integer overs**: the clock counts balls, never base-10 fractions
//! 4. **Synchronous**: no I/O and no async in the scoring path
//!
//! ## Components
//!
//! - [`OverClock`]: the over/ball counter
//! - [`BallProcessor`]: applies one delivery
//! - [`ScoringSession`]: a scorer's view with squads, undo and commentary
//! - [`decide`] / [`completed_record`]: result of a two-innings match
//!
//! ## Example
//!
//! ```
//! use crease_core::engine::{ScoringSession, SquadPlayer, Squads};
//! use crease_core::types::{BallEvent, InningsSetup, MatchFormat, MatchState};
//!
//! let state = MatchState::new(InningsSetup {
//!     match_id: "m1".into(),
//!     innings: 1,
//!     batting_team: "A".into(),
//!     bowling_team: "B".into(),
//!     format: MatchFormat::t20(),
//!     target: None,
//! })
//! .unwrap();
//! let squads = Squads {
//!     batting: vec![SquadPlayer::new("p1", "Opener"), SquadPlayer::new("p2", "Partner")],
//!     bowling: vec![SquadPlayer::new("b1", "Quick")],
//! };
//!
//! let mut session = ScoringSession::new(state, squads);
//! session.start("p1", "p2", "b1").unwrap();
//! session.record(&BallEvent::runs(4)).unwrap();
//! assert_eq!(session.state().score().total_runs, 4);
//!
//! assert!(session.undo());
//! assert_eq!(session.state().score().total_runs, 0);
//! ```
//!
//! [`MatchState`]: crate::types::MatchState

pub mod clock;
pub mod commentary;
pub mod processor;
pub mod result;
pub mod session;

pub use clock::{ClockTick, OverClock};
pub use processor::{BallOutcome, BallProcessor};
pub use result::{completed_record, decide, second_innings_setup, Margin, MatchOutcome};
pub use session::{ScoringSession, SquadPlayer, Squads};
