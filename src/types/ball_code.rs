//! Over-history entries.
//!
//! The scoreboard shows the over in progress as a row of short codes
//! (`1 4 wd+1 W . 6`). The engine keeps them as a tagged variant and only turns
//! them into text through `Display`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{BallEvent, ExtrasType};

/// One entry in the over-in-progress log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "runs")]
pub enum BallCode {
    /// Runs off the bat (zero is a dot ball)
    Runs(u32),
    /// A wicket fell
    Wicket,
    /// Wide plus runs run
    Wide(u32),
    /// No-ball plus runs
    NoBall(u32),
    Bye(u32),
    LegBye(u32),
}

impl BallCode {
    /// Code for a delivery. A wicket takes precedence over any extras marker.
    pub fn for_event(event: &BallEvent) -> Self {
        if event.is_wicket() {
            return BallCode::Wicket;
        }
        let runs = event.runs_scored();
        match event.extras() {
            ExtrasType::None => BallCode::Runs(runs),
            ExtrasType::Wide => BallCode::Wide(runs),
            ExtrasType::NoBall => BallCode::NoBall(runs),
            ExtrasType::Bye => BallCode::Bye(runs),
            ExtrasType::LegBye => BallCode::LegBye(runs),
        }
    }
}

impl fmt::Display for BallCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            BallCode::Runs(runs) => write!(f, "{}", runs),
            BallCode::Wicket => f.write_str("W"),
            BallCode::Wide(0) => f.write_str("wd"),
            BallCode::Wide(runs) => write!(f, "wd+{}", runs),
            BallCode::NoBall(0) => f.write_str("nb"),
            BallCode::NoBall(runs) => write!(f, "nb+{}", runs),
            BallCode::Bye(runs) => write!(f, "b{}", runs),
            BallCode::LegBye(runs) => write!(f, "lb{}", runs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WicketType;

    #[test]
    fn test_codes() {
        let cases = [
            (BallEvent::runs(0), "0"),
            (BallEvent::runs(4), "4"),
            (BallEvent::wide(0), "wd"),
            (BallEvent::wide(1), "wd+1"),
            (BallEvent::no_ball(0), "nb"),
            (BallEvent::no_ball(6), "nb+6"),
            (BallEvent::bye(2), "b2"),
            (BallEvent::leg_bye(1), "lb1"),
            (BallEvent::wicket(WicketType::Bowled), "W"),
        ];
        for (event, expected) in cases {
            assert_eq!(BallCode::for_event(&event).to_string(), expected);
        }
    }

    #[test]
    fn test_wicket_on_wide_is_wicket_code() {
        let stumped = BallEvent::wicket(WicketType::Stumped).on(ExtrasType::Wide);
        assert_eq!(BallCode::for_event(&stumped), BallCode::Wicket);
    }
}
