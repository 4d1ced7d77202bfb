//! Match records supplied by the persistence layer for standings.
//!
//! A [`MatchRecord`] mirrors what the league stores for a fixture. The
//! standings engine only reads records whose status is
//! [`MatchStatus::Completed`] and which carry a score; abandoned fixtures count
//! toward the no-result column.
//!
//! Overs in stored records arrive as display values (`47.2`, `"35.2"`, `50`).
//! They are kept as [`OversEntry`] text and only interpreted once the match's
//! balls-per-over is known.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::OversError;
use crate::types::overs::DEFAULT_BALLS_PER_OVER;
use crate::types::{Overs, TeamId};

// ============================================================================
// Enums
// ============================================================================

/// Lifecycle of a fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MatchStatus {
    #[default]
    Scheduled,
    Live,
    Completed,
    /// Called off without a result
    Abandoned,
}

/// How the result was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ResultMethod {
    #[default]
    Normal,
    /// Duckworth-Lewis-Stern revised target
    #[serde(rename = "DLS")]
    Dls,
    /// VJD revised target
    #[serde(rename = "VJD")]
    Vjd,
}

impl ResultMethod {
    /// Whether the chasing side played to a revised target.
    pub fn adjusts_target(self) -> bool {
        matches!(self, ResultMethod::Dls | ResultMethod::Vjd)
    }
}

// ============================================================================
// OversEntry
// ============================================================================

/// An overs display value as stored, not yet checked against a format.
///
/// Accepts a JSON string (`"47.2"`), an integer (`50`) or a float (`35.2`).
/// Floats are read through their shortest round-trip text, so `35.2` is the
/// ball count 2, never `35.19999`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OversEntry(String);

impl OversEntry {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Interpret against the match's balls-per-over.
    pub fn resolve(&self, balls_per_over: u32) -> Result<Overs, OversError> {
        Overs::parse(&self.0, balls_per_over)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Overs> for OversEntry {
    fn from(overs: Overs) -> Self {
        Self(overs.to_string())
    }
}

impl From<&str> for OversEntry {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl fmt::Display for OversEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for OversEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for OversEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Whole(u64),
            Float(f64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Whole(n) => OversEntry(n.to_string()),
            Raw::Float(f) => OversEntry(f.to_string()),
            Raw::Text(s) => OversEntry(s),
        })
    }
}

// ============================================================================
// Scores
// ============================================================================

/// One side's final line: runs, wickets and overs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InningsTotal {
    pub runs: u32,
    pub wickets: u32,
    pub overs: OversEntry,
}

impl InningsTotal {
    pub fn new(runs: u32, wickets: u32, overs: impl Into<OversEntry>) -> Self {
        Self {
            runs,
            wickets,
            overs: overs.into(),
        }
    }
}

/// Both sides' totals, keyed by the record's team A / team B.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchScore {
    pub team_a: InningsTotal,
    pub team_b: InningsTotal,
}

// ============================================================================
// MatchRecord
// ============================================================================

/// A fixture as stored by the league.
///
/// ## Example
///
/// ```
/// use crease_core::types::{InningsTotal, MatchRecord};
///
/// let record = MatchRecord::completed(
///     "m1", "s1", "SA", "IND", 50,
///     InningsTotal::new(254, 6, "47.2"),
///     InningsTotal::new(253, 5, "50"),
/// );
/// assert!(record.is_completed());
/// assert!(record.involves("IND"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub id: String,
    pub season_id: String,
    #[serde(rename = "teamAId")]
    pub team_a: TeamId,
    #[serde(rename = "teamBId")]
    pub team_b: TeamId,
    #[serde(default)]
    pub status: MatchStatus,
    #[serde(default)]
    pub score: Option<MatchScore>,
    /// Overs quota per side
    pub total_overs: u32,
    #[serde(default)]
    pub balls_per_over: Option<u32>,
    #[serde(default)]
    pub method: Option<ResultMethod>,
    #[serde(default)]
    pub target_score: Option<u32>,
    #[serde(default, rename = "battingFirstId")]
    pub batting_first: Option<TeamId>,
}

impl MatchRecord {
    /// A completed match with a normal result.
    pub fn completed(
        id: impl Into<String>,
        season_id: impl Into<String>,
        team_a: impl Into<TeamId>,
        team_b: impl Into<TeamId>,
        total_overs: u32,
        team_a_total: InningsTotal,
        team_b_total: InningsTotal,
    ) -> Self {
        Self {
            id: id.into(),
            season_id: season_id.into(),
            team_a: team_a.into(),
            team_b: team_b.into(),
            status: MatchStatus::Completed,
            score: Some(MatchScore {
                team_a: team_a_total,
                team_b: team_b_total,
            }),
            total_overs,
            balls_per_over: None,
            method: None,
            target_score: None,
            batting_first: None,
        }
    }

    /// Mark the chasing side's revised target.
    pub fn with_revised_target(
        self,
        method: ResultMethod,
        target_score: u32,
        batting_first: impl Into<TeamId>,
    ) -> Self {
        Self {
            method: Some(method),
            target_score: Some(target_score),
            batting_first: Some(batting_first.into()),
            ..self
        }
    }

    pub fn with_balls_per_over(self, balls_per_over: u32) -> Self {
        Self {
            balls_per_over: Some(balls_per_over),
            ..self
        }
    }

    /// Balls per over, defaulting to six.
    pub fn balls_per_over(&self) -> u32 {
        self.balls_per_over.unwrap_or(DEFAULT_BALLS_PER_OVER)
    }

    pub fn method(&self) -> ResultMethod {
        self.method.unwrap_or_default()
    }

    /// Completed with a recorded score.
    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed && self.score.is_some()
    }

    pub fn is_abandoned(&self) -> bool {
        self.status == MatchStatus::Abandoned
    }

    pub fn involves(&self, team: &str) -> bool {
        self.team_a == team || self.team_b == team
    }

    /// `(own, opponent)` totals from `team`'s point of view.
    pub fn sides_for(&self, team: &str) -> Option<(&InningsTotal, &InningsTotal)> {
        let score = self.score.as_ref()?;
        if self.team_a == team {
            Some((&score.team_a, &score.team_b))
        } else if self.team_b == team {
            Some((&score.team_b, &score.team_a))
        } else {
            None
        }
    }

    /// Whether `team` batted second in this match, when known.
    pub fn batted_second(&self, team: &str) -> bool {
        match &self.batting_first {
            Some(first) => first != team && self.involves(team),
            None => false,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
