//! Over/ball clock.
//!
//! Counts legal deliveries as an integer pair. When the ball counter reaches
//! balls-per-over the completed-overs count goes up by one and the counter
//! resets to zero, so `balls` is always in `[0, balls_per_over)`.

use crate::error::OversError;
use crate::types::Overs;

/// Result of advancing the clock by one legal delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTick {
    pub overs: Overs,
    /// The delivery was the last ball of an over
    pub over_completed: bool,
}

/// Legal-delivery counter for one format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverClock {
    balls_per_over: u32,
}

impl OverClock {
    /// # Errors
    ///
    /// [`OversError::ZeroBallsPerOver`] if `balls_per_over` is zero.
    pub fn new(balls_per_over: u32) -> Result<Self, OversError> {
        if balls_per_over == 0 {
            return Err(OversError::ZeroBallsPerOver);
        }
        Ok(Self { balls_per_over })
    }

    pub fn balls_per_over(&self) -> u32 {
        self.balls_per_over
    }

    /// Count one legal delivery.
    ///
    /// # Example
    ///
    /// ```
    /// use crease_core::engine::OverClock;
    /// use crease_core::types::Overs;
    ///
    /// let clock = OverClock::new(6).unwrap();
    /// let tick = clock.advance(Overs::new(3, 5, 6).unwrap());
    /// assert!(tick.over_completed);
    /// assert_eq!(tick.overs, Overs::whole(4));
    /// ```
    #[inline]
    pub fn advance(&self, overs: Overs) -> ClockTick {
        let balls = overs.balls() + 1;
        if balls >= self.balls_per_over {
            ClockTick {
                overs: Overs::whole(overs.completed() + 1),
                over_completed: true,
            }
        } else {
            ClockTick {
                overs: Overs::from_parts(overs.completed(), balls),
                over_completed: false,
            }
        }
    }
}
