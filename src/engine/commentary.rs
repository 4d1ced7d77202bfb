//! One-line commentary for a delivery.

use crate::types::{BallEvent, ExtrasType};

/// Text for one delivery, e.g. `"Steyn to Tendulkar, FOUR! Beautiful shot."`.
///
/// Wickets take precedence, then boundaries off the bat, then extras.
pub fn ball_commentary(bowler: &str, batter: &str, event: &BallEvent) -> String {
    if event.is_wicket() {
        let how = event
            .wicket_type()
            .map(|kind| kind.to_string())
            .unwrap_or_else(|| "Dismissed".to_string());
        return match event.dismissed() {
            Some(player) if player != batter => {
                format!("{} to {}, OUT! {} is {}.", bowler, batter, player, how.to_lowercase())
            }
            _ => format!("{} to {}, OUT! {}.", bowler, batter, how),
        };
    }

    let runs = event.runs_scored();
    if event.extras() == ExtrasType::None {
        return match runs {
            0 => format!("{} to {}, no run.", bowler, batter),
            1 => format!("{} to {}, 1 run.", bowler, batter),
            4 => format!("{} to {}, FOUR! Beautiful shot.", bowler, batter),
            6 => format!("{} to {}, SIX! That's huge!", bowler, batter),
            n => format!("{} to {}, {} runs.", bowler, batter, n),
        };
    }

    let plus = match runs {
        0 => String::new(),
        1 => " + 1 run".to_string(),
        n => format!(" + {} runs", n),
    };
    format!("{} to {}, {}{}.", bowler, batter, event.extras(), plus)
}

/// Announcement when a new bowler comes on.
pub fn new_bowler_commentary(bowler: &str) -> String {
    format!("New bowler: {} comes into the attack.", bowler)
}

/// Announcement at the start of an innings.
pub fn innings_start_commentary(striker: &str, bowler: &str) -> String {
    format!("Match started. {} on strike. {} to open the bowling.", striker, bowler)
}
