//! Gamesim Core - possession-by-possession basketball game simulation.
//!
//! Given two rosters with composite ratings, plays out a full game with
//! weighted random events, a fatigue-driven rotation and a stat ledger that
//! rolls every player event up to the team box score. Python bindings are
//! available behind the `python` feature.

pub mod config;
pub mod constants;
pub mod draws;
pub mod error;
pub mod game;
pub mod possession;
pub mod ratings;
pub mod rotation;
pub mod schedule;
pub mod selector;
pub mod stats;
pub mod team;

#[cfg(feature = "python")]
mod python;

pub use config::SimConfig;
pub use constants::{GAME_MINUTES, ON_COURT, SUBS_EVERY_N};
pub use draws::{DrawSource, SeededDraws};
pub use error::SimError;
pub use game::{simulate, GameSim};
pub use possession::{resolve_possession, PossessionOutcome, Side};
pub use ratings::{Rating, RatingMap};
pub use rotation::update_on_court;
pub use schedule::simulate_schedule;
pub use selector::pick_player;
pub use stats::{Stat, StatMap};
pub use team::{Player, ResultPlayer, ResultTeam, Team};
