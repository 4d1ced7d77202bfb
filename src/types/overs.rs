//! Overs as an integer pair, and the rate calculator built on it.
//!
//! ## Overview
//!
//! Cricket writes overs as `overs.balls`: `14.2` means fourteen completed overs
//! and two legal balls of the fifteenth. The digit after the point is a ball
//! count in `[0, balls_per_over)`, **not** a base-10 fraction. Adding `14.2` and
//! `0.5` as decimals gives `14.7`, which is not an overs value at all.
//!
//! [`Overs`] stores the pair explicitly and never does arithmetic on the
//! combined display value. The only way to get a number for rate math is
//! [`Overs::to_decimal`], which divides the balls by balls-per-over exactly
//! using `rust_decimal`.
//!
//! ## Examples
//!
//! ```
//! use crease_core::types::overs::{Overs, run_rate};
//! use rust_decimal::Decimal;
//!
//! let overs = Overs::parse("14.2", 6).unwrap();
//! assert_eq!(overs.completed(), 14);
//! assert_eq!(overs.balls(), 2);
//! assert_eq!(overs.to_string(), "14.2");
//!
//! // 14 + 2/6 overs
//! let decimal = overs.to_decimal(6).unwrap();
//! assert_eq!(decimal.round_dp(4), Decimal::new(143333, 4));
//!
//! // 86 runs in 14.2 overs = 6 per over
//! assert_eq!(run_rate(86, decimal).round_dp(2), Decimal::new(600, 2));
//! ```

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::OversError;

/// Default number of legal deliveries in an over.
pub const DEFAULT_BALLS_PER_OVER: u32 = 6;

// ============================================================================
// Overs
// ============================================================================

/// Completed overs plus legal balls bowled in the over in progress.
///
/// Ordering compares completed overs first, then balls, which is the correct
/// order for two values recorded with the same balls-per-over.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Overs {
    completed: u32,
    balls: u32,
}

impl Overs {
    /// No balls bowled.
    pub const ZERO: Overs = Overs { completed: 0, balls: 0 };

    /// Create an overs value, checking the ball count against `balls_per_over`.
    ///
    /// # Errors
    ///
    /// * [`OversError::ZeroBallsPerOver`] if `balls_per_over` is zero
    /// * [`OversError::BallsOutOfRange`] if `balls >= balls_per_over`
    pub fn new(completed: u32, balls: u32, balls_per_over: u32) -> Result<Self, OversError> {
        if balls_per_over == 0 {
            return Err(OversError::ZeroBallsPerOver);
        }
        if balls >= balls_per_over {
            return Err(OversError::BallsOutOfRange { balls, balls_per_over });
        }
        Ok(Self { completed, balls })
    }

    /// Build without validation. Callers must keep `balls < balls_per_over`.
    pub(crate) const fn from_parts(completed: u32, balls: u32) -> Self {
        Self { completed, balls }
    }

    /// A whole number of overs.
    pub const fn whole(completed: u32) -> Self {
        Self { completed, balls: 0 }
    }

    /// Completed overs.
    #[inline]
    pub fn completed(&self) -> u32 {
        self.completed
    }

    /// Legal balls bowled in the over in progress.
    #[inline]
    pub fn balls(&self) -> u32 {
        self.balls
    }

    /// Total legal deliveries represented by this value.
    pub fn total_balls(&self, balls_per_over: u32) -> u64 {
        u64::from(self.completed) * u64::from(balls_per_over) + u64::from(self.balls)
    }

    /// Parse an `overs.balls` display value such as `"47.2"` or `"50"`.
    ///
    /// The fractional digits are read as a ball count. A ball count that is not
    /// below `balls_per_over` is rejected rather than truncated, so `"14.6"` in a
    /// six-ball format is an error, not fifteen overs. The count must be written
    /// without leading zeros, and with a single digit when an over has ten
    /// balls or fewer.
    ///
    /// # Example
    ///
    /// ```
    /// use crease_core::types::overs::Overs;
    ///
    /// assert_eq!(Overs::parse("35.2", 6).unwrap().balls(), 2);
    /// assert_eq!(Overs::parse("50", 6).unwrap(), Overs::whole(50));
    /// assert!(Overs::parse("14.6", 6).is_err());
    /// assert!(Overs::parse("14.6", 8).is_ok());
    /// assert!(Overs::parse("14.02", 6).is_err());
    /// ```
    pub fn parse(text: &str, balls_per_over: u32) -> Result<Self, OversError> {
        let trimmed = text.trim();
        let malformed = || OversError::Malformed(text.to_string());

        let (whole, fraction) = match trimmed.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (trimmed, None),
        };

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let completed: u32 = whole.parse().map_err(|_| malformed())?;

        let balls = match fraction {
            None => 0,
            Some(digits) => {
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(malformed());
                }
                // The ball count is written plainly: "14.02" is not two balls
                let padded = digits.len() > 1 && digits.starts_with('0');
                let too_wide = balls_per_over <= 10 && digits.len() > 1;
                if padded || too_wide {
                    return Err(malformed());
                }
                digits.parse().map_err(|_| malformed())?
            }
        };

        Self::new(completed, balls, balls_per_over)
    }

    /// Convert to true decimal overs: `completed + balls / balls_per_over`.
    ///
    /// # Errors
    ///
    /// Fails if `balls_per_over` is zero or the stored ball count is not valid
    /// for it.
    pub fn to_decimal(&self, balls_per_over: u32) -> Result<Decimal, OversError> {
        // Re-validate: the value may have been built for a different format.
        Self::new(self.completed, self.balls, balls_per_over)?;
        let fraction = Decimal::from(self.balls) / Decimal::from(balls_per_over);
        Ok(Decimal::from(self.completed) + fraction)
    }
}

impl fmt::Display for Overs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.balls == 0 {
            write!(f, "{}", self.completed)
        } else {
            write!(f, "{}.{}", self.completed, self.balls)
        }
    }
}

// ============================================================================
// Rate helpers
// ============================================================================

/// Runs per over. A zero overs value yields zero, never an error.
pub fn run_rate(runs: u32, decimal_overs: Decimal) -> Decimal {
    if decimal_overs.is_zero() {
        return Decimal::ZERO;
    }
    Decimal::from(runs) / decimal_overs
}

// ============================================================================
// Unit Tests
// ============================================================================
