//! Core data types for the scoring and standings engine.
//!
//! ## Types
//!
//! - [`Overs`]: completed overs plus balls, never a base-10 decimal
//! - [`BallEvent`]: one delivery as recorded by the scorer
//! - [`Score`]: team total, wickets and extras
//! - [`BallCode`]: over-history entry
//! - [`MatchState`]: one innings after some deliveries
//! - [`MatchRecord`]: a stored fixture, input to standings
//! - [`TeamSeasonStat`] / [`PointsTableEntry`]: standings output
//! - [`LiveFrame`]: fixed-size SSZ scoreboard for broadcast
//!
//! Player and team records live outside the engine; it refers to them by id.

pub mod overs;
mod format;
mod event;
mod score;
mod ball_code;
mod match_state;
mod record;
mod standings;
pub mod frame;

/// Identifier of a player record held by the surrounding application.
pub type PlayerId = String;

/// Identifier of a team record held by the surrounding application.
pub type TeamId = String;

pub use overs::Overs;
pub use format::{MatchFormat, ALL_OUT_WICKETS};
pub use event::{BallEvent, ExtrasType, WicketType};
pub use score::{Extras, Score};
pub use ball_code::BallCode;
pub use match_state::{CompletionReason, InningsPhase, InningsSetup, MatchState};
pub use record::{InningsTotal, MatchRecord, MatchScore, MatchStatus, OversEntry, ResultMethod};
pub use standings::{NetRunRate, PointsTableEntry, Team, TeamSeasonStat, NRR_DISPLAY_DP};
pub use frame::LiveFrame;
