//! Error types for the scoring and standings engine.
//!
//! Every fallible operation returns one of these typed errors. Nothing is
//! partially applied when an error is returned: the caller still holds the
//! previous value.

use thiserror::Error;

use crate::types::PlayerId;

/// A delivery or state transition that cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error("runs scored cannot be negative (got {0})")]
    NegativeRuns(i64),

    #[error("wicket details were supplied for a delivery that is not a wicket")]
    WicketDetailsWithoutWicket,

    #[error("innings is complete; no further deliveries are accepted")]
    InningsComplete,

    #[error("innings has not started: striker, non-striker and bowler are required")]
    InningsNotStarted,

    #[error("a replacement batter is required for {0} before the next delivery")]
    AwaitingBatter(PlayerId),

    #[error("over completed: a new bowler must be selected before the next delivery")]
    AwaitingBowler,

    #[error("run out requires the dismissed player to be named")]
    AmbiguousDismissal,

    #[error("player {0} is not at the crease")]
    NotAtCrease(PlayerId),

    #[error("player {0} has already been dismissed")]
    AlreadyDismissed(PlayerId),

    #[error("player {0} is already batting")]
    AlreadyBatting(PlayerId),

    #[error("striker and non-striker must be different players")]
    SameBatters,

    #[error("bowler {0} bowled the previous over")]
    ConsecutiveOvers(PlayerId),

    #[error("no bowler change is pending")]
    NoBowlerChangePending,

    #[error("player {0} is not in the squad")]
    NotInSquad(PlayerId),

    #[error("innings {0} is still in progress")]
    InningsInProgress(u8),

    #[error("innings has already started")]
    AlreadyStarted,

    #[error("invalid match format: {0}")]
    InvalidFormat(String),

    #[error("runs total overflowed")]
    RunsOverflow,
}

/// An overs value that cannot be interpreted without guessing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OversError {
    #[error("malformed overs value `{0}`")]
    Malformed(String),

    #[error("ball count {balls} is not below balls-per-over {balls_per_over}")]
    BallsOutOfRange { balls: u32, balls_per_over: u32 },

    #[error("balls-per-over must be positive")]
    ZeroBallsPerOver,
}

/// Failure inside a repository implementation.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("match {0} not found")]
    MatchNotFound(String),

    #[error("stale write for match {match_id}: expected root {expected}, found {actual}")]
    StaleWrite {
        match_id: String,
        expected: String,
        actual: String,
    },

    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error(transparent)]
    Overs(#[from] OversError),
}

/// A live frame could not be encoded.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("could not encode live frame: {0}")]
    Encoding(#[from] ssz_rs::SerializeError),
}

/// League configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
