//! Season standings.
//!
//! - [`net_run_rate`]: one team's NRR with its aggregates
//! - [`StandingsAggregator`]: idempotent full recompute of a season
//! - [`LeagueRepository`] / [`recompute_season`]: fetch, aggregate and store
//!
//! ## Example
//!
//! ```
//! use crease_core::standings::{recompute_season, InMemoryRepository, StandingsAggregator};
//! use crease_core::types::{InningsTotal, MatchRecord, Team};
//!
//! let mut repo = InMemoryRepository::from_parts(
//!     vec![Team::new("A", "Alphas"), Team::new("B", "Betas")],
//!     vec![MatchRecord::completed(
//!         "m1", "s1", "A", "B", 20,
//!         InningsTotal::new(120, 10, "18.4"),
//!         InningsTotal::new(121, 3, "15"),
//!     )],
//! );
//!
//! let table = recompute_season(&mut repo, "s1", &StandingsAggregator::default()).unwrap();
//! assert_eq!(table[0].team_name, "Betas");
//! assert_eq!(table[0].position, 1);
//! assert_eq!(table[1].nrr.to_string(), "-2.067");
//! ```

pub mod aggregator;
pub mod nrr;
pub mod repository;

pub use aggregator::{initial_points_table, points_table, StandingsAggregator};
pub use nrr::{net_run_rate, NrrBreakdown};
pub use repository::{recompute_season, InMemoryRepository, LeagueRepository, StateRoot};
