//! Live scoreboard frame and innings state root.
//!
//! ## SSZ Serialization
//!
//! [`LiveFrame`] is a fixed-size SSZ container broadcast after every
//! transition. Every field is a basic type, so the encoding is a fixed 68 bytes
//! and identical on every machine.
//!
//! ## State Root
//!
//! The state root is SHA-256 over the frame bytes followed by everything the
//! frame leaves out:
//!
//! - match id, batting team and bowling team
//! - format (balls per over, overs quota, max wickets)
//! - striker, non-striker, bowler and previous bowler
//! - the current over log
//! - dismissed players in sorted order
//!
//! Strings are length-prefixed and lists are count-prefixed, so distinct
//! states never share an input. The repository uses the root as a
//! compare-and-swap token when saving live states.

use ssz_rs::prelude::*;
use sha2::{Digest, Sha256};

use crate::error::FrameError;
use crate::types::MatchState;

/// Compact scoreboard for broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct LiveFrame {
    /// Transition counter of the source state
    pub sequence: u64,
    /// 1 or 2
    pub innings: u8,
    pub total_runs: u64,
    pub wickets: u8,
    pub completed_overs: u64,
    pub balls: u8,
    pub wides: u64,
    pub no_balls: u64,
    pub byes: u64,
    pub leg_byes: u64,
    /// Zero when not chasing
    pub target: u64,
    /// See `InningsPhase::to_u8`
    pub phase_raw: u8,
}

impl LiveFrame {
    /// Snapshot the numeric part of a state.
    pub fn from_state(state: &MatchState) -> Self {
        let score = state.score();
        let extras = score.extras;
        Self {
            sequence: state.sequence(),
            innings: state.innings(),
            total_runs: u64::from(score.total_runs),
            wickets: u8::try_from(score.wickets).unwrap_or(u8::MAX),
            completed_overs: u64::from(state.overs().completed()),
            balls: u8::try_from(state.overs().balls()).unwrap_or(u8::MAX),
            wides: u64::from(extras.wides),
            no_balls: u64::from(extras.no_balls),
            byes: u64::from(extras.byes),
            leg_byes: u64::from(extras.leg_byes),
            target: u64::from(state.target().unwrap_or(0)),
            phase_raw: state.phase().to_u8(),
        }
    }

    /// SSZ bytes of this frame.
    pub fn encode(&self) -> Result<Vec<u8>, FrameError> {
        Ok(ssz_rs::serialize(self)?)
    }
}

fn hash_str(hasher: &mut Sha256, value: &str) {
    hasher.update((value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}

fn hash_player(hasher: &mut Sha256, id: Option<&str>) {
    match id {
        Some(id) => {
            hasher.update([1u8]);
            hash_str(hasher, id);
        }
        None => hasher.update([0u8]),
    }
}

/// SHA-256 root over the frame and the rest of an innings state.
pub fn state_root(state: &MatchState) -> Result<[u8; 32], FrameError> {
    let frame = LiveFrame::from_state(state).encode()?;

    let mut hasher = Sha256::new();
    hasher.update(&frame);

    hash_str(&mut hasher, state.match_id());
    hash_str(&mut hasher, state.batting_team());
    hash_str(&mut hasher, state.bowling_team());

    let format = state.format();
    for value in [format.balls_per_over, format.overs_quota, format.max_wickets] {
        hasher.update(value.to_le_bytes());
    }

    for id in [
        state.striker(),
        state.non_striker(),
        state.bowler(),
        state.previous_bowler(),
    ] {
        hash_player(&mut hasher, id);
    }

    hasher.update((state.this_over().len() as u64).to_le_bytes());
    for code in state.this_over() {
        hash_str(&mut hasher, &code.to_string());
    }

    hasher.update((state.dismissed_players().len() as u64).to_le_bytes());
    for id in state.dismissed_players() {
        hash_str(&mut hasher, id);
    }

    let mut root = [0u8; 32];
    root.copy_from_slice(&hasher.finalize());
    Ok(root)
}

/// State root as lowercase hex.
pub fn state_root_hex(state: &MatchState) -> Result<String, FrameError> {
    state_root(state).map(hex::encode)
}

// ============================================================================
// Unit Tests
// ============================================================================
