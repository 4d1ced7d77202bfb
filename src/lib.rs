//! # Crease
//!
//! Ball-by-ball cricket scoring and season standings.
//!
//! ## Architecture
//!
//! - **Types**: overs, deliveries, innings state, match records, standings rows
//! - **Engine**: over clock, ball processor, scoring session, match result
//! - **Standings**: net run rate, season aggregation, repository seam
//!
//! ## Design Principles
//!
//! 1. **Determinism**: identical inputs produce identical states and tables
//! 2. **No Floating Point**: overs are an integer pair; rates use `Decimal`
//! 3. **Immutable Transitions**: each delivery yields a new state value
//! 4. **Full Recompute**: standings are rebuilt from the match list every time
//!
//! ## Example
//!
//! ```
//! use crease_core::{BallEvent, BallProcessor, InningsSetup, MatchFormat, MatchState};
//!
//! let state = MatchState::new(InningsSetup {
//!     match_id: "m1".into(),
//!     innings: 1,
//!     batting_team: "A".into(),
//!     bowling_team: "B".into(),
//!     format: MatchFormat::t20(),
//!     target: None,
//! })
//! .unwrap()
//! .start("p1", "p2", "b1")
//! .unwrap();
//!
//! let outcome = BallProcessor::new().process(&state, &BallEvent::wide(0)).unwrap();
//! assert_eq!(outcome.state.score().total_runs, 1);
//! assert_eq!(outcome.state.overs().to_string(), "0");
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: overs, deliveries, states, records
pub mod types;

/// Scoring engine: clock, ball processor, session, result
pub mod engine;

/// Standings: NRR, aggregation, repository
pub mod standings;

/// League configuration loaded from TOML
pub mod config;

/// Error types
pub mod error;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use types::{BallEvent, ExtrasType, InningsSetup, MatchFormat, MatchRecord, MatchState, Overs, WicketType};
pub use engine::{BallOutcome, BallProcessor, ScoringSession};
pub use standings::{net_run_rate, recompute_season, InMemoryRepository, LeagueRepository, StandingsAggregator};
pub use config::LeagueConfig;
pub use error::{ConfigError, FrameError, OversError, RepositoryError, ScoringError};
