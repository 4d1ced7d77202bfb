//! Delivery events fed to the ball processor.
//!
//! A [`BallEvent`] describes one delivery as the scorer saw it: runs physically
//! run (or hit to the boundary), the extras type, and whether a wicket fell.
//! Events are immutable once built. External JSON is deserialised through a
//! signed raw form so that negative runs are rejected instead of wrapped.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ScoringError;
use crate::types::PlayerId;

// ============================================================================
// ExtrasType enum
// ============================================================================

/// Kind of extra attached to a delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExtrasType {
    /// Runs off the bat (or a dot ball)
    #[default]
    None,
    /// Wide: one penalty run, not a legal delivery
    Wide,
    /// No-ball: one penalty run, not a legal delivery
    NoBall,
    /// Byes: runs run without the bat, legal delivery
    Bye,
    /// Leg byes: runs off the body, legal delivery
    LegBye,
}

impl ExtrasType {
    /// Whether the delivery counts toward the over.
    pub fn is_legal(self) -> bool {
        !matches!(self, ExtrasType::Wide | ExtrasType::NoBall)
    }

    /// Fixed penalty runs added to the total for this extra.
    pub fn penalty_runs(self) -> u32 {
        match self {
            ExtrasType::Wide | ExtrasType::NoBall => 1,
            ExtrasType::None | ExtrasType::Bye | ExtrasType::LegBye => 0,
        }
    }
}

impl fmt::Display for ExtrasType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ExtrasType::None => "None",
            ExtrasType::Wide => "Wide",
            ExtrasType::NoBall => "No Ball",
            ExtrasType::Bye => "Bye",
            ExtrasType::LegBye => "Leg Bye",
        };
        f.write_str(text)
    }
}

// ============================================================================
// WicketType enum
// ============================================================================

/// Mode of dismissal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WicketType {
    Bowled,
    Caught,
    #[serde(rename = "LBW")]
    Lbw,
    RunOut,
    Stumped,
    HitWicket,
    Retired,
}

impl WicketType {
    /// Dismissals where either batter may be out, so the scorer must say who.
    pub fn requires_named_batter(self) -> bool {
        matches!(self, WicketType::RunOut | WicketType::Retired)
    }
}

impl fmt::Display for WicketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            WicketType::Bowled => "Bowled",
            WicketType::Caught => "Caught",
            WicketType::Lbw => "LBW",
            WicketType::RunOut => "Run Out",
            WicketType::Stumped => "Stumped",
            WicketType::HitWicket => "Hit Wicket",
            WicketType::Retired => "Retired",
        };
        f.write_str(text)
    }
}

// ============================================================================
// BallEvent
// ============================================================================

/// One delivery as recorded by the scorer.
///
/// ## Example
///
/// ```
/// use crease_core::types::{BallEvent, ExtrasType, WicketType};
///
/// let four = BallEvent::runs(4);
/// assert_eq!(four.runs_scored(), 4);
/// assert!(four.is_legal());
///
/// let wide = BallEvent::wide(1);
/// assert_eq!(wide.extras(), ExtrasType::Wide);
/// assert!(!wide.is_legal());
///
/// let run_out = BallEvent::wicket(WicketType::RunOut).dismissing("p2");
/// assert_eq!(run_out.dismissed(), Some("p2"));
///
/// assert!(BallEvent::try_new(-1, ExtrasType::None, false, None, None).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBallEvent", rename_all = "camelCase")]
pub struct BallEvent {
    runs_scored: u32,
    #[serde(rename = "extrasType")]
    extras: ExtrasType,
    is_wicket: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    wicket_type: Option<WicketType>,
    #[serde(rename = "playerDismissedId", skip_serializing_if = "Option::is_none")]
    dismissed: Option<PlayerId>,
}

impl BallEvent {
    /// Validate raw scorer input.
    ///
    /// # Errors
    ///
    /// * [`ScoringError::NegativeRuns`] if `runs_scored < 0`
    /// * [`ScoringError::WicketDetailsWithoutWicket`] if a dismissal mode or
    ///   dismissed player is given for a delivery that is not a wicket
    pub fn try_new(
        runs_scored: i64,
        extras: ExtrasType,
        is_wicket: bool,
        wicket_type: Option<WicketType>,
        dismissed: Option<PlayerId>,
    ) -> Result<Self, ScoringError> {
        let runs_scored =
            u32::try_from(runs_scored).map_err(|_| ScoringError::NegativeRuns(runs_scored))?;
        if !is_wicket && (wicket_type.is_some() || dismissed.is_some()) {
            return Err(ScoringError::WicketDetailsWithoutWicket);
        }
        Ok(Self {
            runs_scored,
            extras,
            is_wicket,
            wicket_type,
            dismissed,
        })
    }

    /// Runs off the bat (or a dot ball when `runs == 0`).
    pub fn runs(runs: u32) -> Self {
        Self::with_extras(ExtrasType::None, runs)
    }

    /// A wide, plus any runs run.
    pub fn wide(runs: u32) -> Self {
        Self::with_extras(ExtrasType::Wide, runs)
    }

    /// A no-ball, plus any runs run or hit.
    pub fn no_ball(runs: u32) -> Self {
        Self::with_extras(ExtrasType::NoBall, runs)
    }

    /// Byes.
    pub fn bye(runs: u32) -> Self {
        Self::with_extras(ExtrasType::Bye, runs)
    }

    /// Leg byes.
    pub fn leg_bye(runs: u32) -> Self {
        Self::with_extras(ExtrasType::LegBye, runs)
    }

    /// A wicket on a legal delivery with no runs.
    pub fn wicket(wicket_type: WicketType) -> Self {
        Self {
            runs_scored: 0,
            extras: ExtrasType::None,
            is_wicket: true,
            wicket_type: Some(wicket_type),
            dismissed: None,
        }
    }

    fn with_extras(extras: ExtrasType, runs_scored: u32) -> Self {
        Self {
            runs_scored,
            extras,
            is_wicket: false,
            wicket_type: None,
            dismissed: None,
        }
    }

    /// Name the dismissed batter. Only meaningful on a wicket.
    pub fn dismissing(self, player: impl Into<PlayerId>) -> Self {
        Self {
            dismissed: Some(player.into()),
            ..self
        }
    }

    /// Attach an extras type to a wicket delivery (e.g. stumped off a wide).
    pub fn on(self, extras: ExtrasType) -> Self {
        Self { extras, ..self }
    }

    /// Runs completed between the wickets on a wicket delivery (e.g. a run out
    /// attempting the second run).
    pub fn with_runs(self, runs_scored: u32) -> Self {
        Self { runs_scored, ..self }
    }

    pub fn runs_scored(&self) -> u32 {
        self.runs_scored
    }

    pub fn extras(&self) -> ExtrasType {
        self.extras
    }

    pub fn is_wicket(&self) -> bool {
        self.is_wicket
    }

    pub fn wicket_type(&self) -> Option<WicketType> {
        self.wicket_type
    }

    pub fn dismissed(&self) -> Option<&str> {
        self.dismissed.as_deref()
    }

    /// Whether the delivery advances the over.
    pub fn is_legal(&self) -> bool {
        self.extras.is_legal()
    }

    /// Runs this delivery adds to the team total, `None` if that does not fit
    /// in a `u32`.
    pub fn total_runs(&self) -> Option<u32> {
        self.runs_scored.checked_add(self.extras.penalty_runs())
    }
}

/// Wire form of [`BallEvent`] before validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBallEvent {
    runs_scored: i64,
    #[serde(default)]
    extras_type: ExtrasType,
    #[serde(default)]
    is_wicket: bool,
    #[serde(default)]
    wicket_type: Option<WicketType>,
    #[serde(default)]
    player_dismissed_id: Option<PlayerId>,
}

impl TryFrom<RawBallEvent> for BallEvent {
    type Error = ScoringError;

    fn try_from(raw: RawBallEvent) -> Result<Self, Self::Error> {
        BallEvent::try_new(
            raw.runs_scored,
            raw.extras_type,
            raw.is_wicket,
            raw.wicket_type,
            raw.player_dismissed_id,
        )
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legality() {
        assert!(ExtrasType::None.is_legal());
        assert!(ExtrasType::Bye.is_legal());
        assert!(ExtrasType::LegBye.is_legal());
        assert!(!ExtrasType::Wide.is_legal());
        assert!(!ExtrasType::NoBall.is_legal());
    }

    #[test]
    fn test_total_runs_includes_penalty() {
        assert_eq!(BallEvent::wide(0).total_runs(), Some(1));
        assert_eq!(BallEvent::no_ball(4).total_runs(), Some(5));
        assert_eq!(BallEvent::bye(2).total_runs(), Some(2));
        assert_eq!(BallEvent::runs(6).total_runs(), Some(6));
    }

    #[test]
    fn test_total_runs_none_past_u32() {
        let event = BallEvent::try_new(u32::MAX as i64, ExtrasType::Wide, false, None, None).unwrap();
        assert_eq!(event.total_runs(), None);
        assert_eq!(BallEvent::runs(u32::MAX).total_runs(), Some(u32::MAX));
    }

    #[test]
    fn test_try_new_rejects_negative_runs() {
        let err = BallEvent::try_new(-2, ExtrasType::None, false, None, None).unwrap_err();
        assert_eq!(err, ScoringError::NegativeRuns(-2));
    }

    #[test]
    fn test_try_new_rejects_orphan_dismissal() {
        let err = BallEvent::try_new(0, ExtrasType::None, false, None, Some("p1".into()))
            .unwrap_err();
        assert_eq!(err, ScoringError::WicketDetailsWithoutWicket);
    }

    #[test]
    fn test_deserialize_from_scorer_json() {
        let event: BallEvent = serde_json::from_str(
            r#"{"runsScored":1,"extrasType":"Wide","isWicket":false}"#,
        )
        .unwrap();
        assert_eq!(event, BallEvent::wide(1));

        let event: BallEvent = serde_json::from_str(
            r#"{"runsScored":0,"extrasType":"None","isWicket":true,"wicketType":"RunOut","playerDismissedId":"p7"}"#,
        )
        .unwrap();
        assert_eq!(event.wicket_type(), Some(WicketType::RunOut));
        assert_eq!(event.dismissed(), Some("p7"));
    }

    #[test]
    fn test_deserialize_rejects_negative_runs() {
        let result: Result<BallEvent, _> =
            serde_json::from_str(r#"{"runsScored":-1,"extrasType":"None","isWicket":false}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_uses_scorer_field_names() {
        let json = serde_json::to_value(BallEvent::leg_bye(1)).unwrap();
        assert_eq!(json["runsScored"], 1);
        assert_eq!(json["extrasType"], "LegBye");
        assert_eq!(json["isWicket"], false);
        assert!(json.get("playerDismissedId").is_none());
    }

    #[test]
    fn test_named_batter_required() {
        assert!(WicketType::RunOut.requires_named_batter());
        assert!(!WicketType::Caught.requires_named_batter());
    }
}
