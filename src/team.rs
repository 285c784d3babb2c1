use serde::{Deserialize, Serialize};

use crate::constants::ON_COURT;
use crate::error::SimError;
use crate::ratings::{Rating, RatingMap};
use crate::stats::{Stat, StatMap};

/// Player as handed over by the roster layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: u32,

    /// Scouting overall used only for rotation decisions
    pub overall_rating: f64,

    #[serde(default)]
    pub stats: StatMap,

    pub composite_ratings: RatingMap,
}

impl Player {
    pub fn new(id: u32, overall_rating: f64, composite_ratings: RatingMap) -> Self {
        Player {
            id,
            overall_rating,
            stats: StatMap::new(),
            composite_ratings,
        }
    }

    pub fn rating(&self, rating: Rating) -> f64 {
        self.composite_ratings.get(rating)
    }
}

/// Team as handed over by the roster layer.
///
/// `players` is ordered by intended starting order: the first five start.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: u32,

    /// Added to the opponent's turnover and block chances and subtracted
    /// from their shooting percentages
    pub defense: f64,

    /// Mean number of possessions the team likes to have in a game
    pub pace: f64,

    #[serde(default)]
    pub stats: StatMap,

    pub players: Vec<Player>,
}

impl Team {
    pub fn new(id: u32, defense: f64, pace: f64, players: Vec<Player>) -> Self {
        Team {
            id,
            defense,
            pace,
            stats: StatMap::new(),
            players,
        }
    }

    /// Add `amount` to a player's stat and, for box score stats, to the
    /// team total under the same name.
    pub fn record(&mut self, player: usize, stat: Stat, amount: f64) {
        self.players[player].stats.add(stat, amount);
        if stat.rolls_up() {
            self.stats.add(stat, amount);
        }
    }

    /// Reject rosters the engine cannot simulate.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.players.len() < ON_COURT {
            return Err(SimError::roster(
                self.id,
                format!("{} players, need at least {}", self.players.len(), ON_COURT),
            ));
        }
        if !self.defense.is_finite() || !self.pace.is_finite() {
            return Err(SimError::roster(self.id, "defense and pace must be finite"));
        }
        if let Some(stat) = first_bad_count(&self.stats) {
            return Err(SimError::roster(
                self.id,
                format!("team stat {} must be finite and non-negative", stat),
            ));
        }

        for player in &self.players {
            if !player.overall_rating.is_finite() {
                return Err(SimError::roster(
                    self.id,
                    format!("player {} has a non-finite overallRating", player.id),
                ));
            }
            if let Some(rating) = player.composite_ratings.missing() {
                return Err(SimError::roster(
                    self.id,
                    format!("player {} is missing {}", player.id, rating),
                ));
            }
            if let Some((rating, _)) = player
                .composite_ratings
                .iter()
                .find(|(_, value)| !value.is_finite())
            {
                return Err(SimError::roster(
                    self.id,
                    format!("player {} has a non-finite {}", player.id, rating),
                ));
            }
            if let Some(stat) = first_bad_count(&player.stats) {
                return Err(SimError::roster(
                    self.id,
                    format!("player {} has a negative or non-finite {}", player.id, stat),
                ));
            }
            if player.stats.contains(Stat::Energy) {
                let energy = player.stats.get(Stat::Energy);
                if !(0.0..=1.0).contains(&energy) {
                    return Err(SimError::roster(
                        self.id,
                        format!("player {} has energy {} outside [0, 1]", player.id, energy),
                    ));
                }
            }
        }

        Ok(())
    }

    /// Seed the per-game rotation fields: full energy unless supplied, and
    /// the starter flag for the first five.
    pub(crate) fn prepare(&mut self) {
        for player in self.players.iter_mut() {
            if !player.stats.contains(Stat::Energy) {
                player.stats.set(Stat::Energy, 1.0);
            }
            for stat in [Stat::CourtTime, Stat::BenchTime] {
                if !player.stats.contains(stat) {
                    player.stats.set(stat, 0.0);
                }
            }
        }
        for player in self.players.iter_mut().take(ON_COURT) {
            player.stats.set(Stat::Starter, 1.0);
        }
    }

    /// Drop the scouting inputs, keeping only ids and stats.
    pub fn into_result(self) -> ResultTeam {
        ResultTeam {
            id: self.id,
            stats: self.stats,
            players: self
                .players
                .into_iter()
                .map(|p| ResultPlayer {
                    id: p.id,
                    stats: p.stats,
                })
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultPlayer {
    pub id: u32,
    pub stats: StatMap,
}

/// Sanitized team box score returned to the storage layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultTeam {
    pub id: u32,
    pub stats: StatMap,
    pub players: Vec<ResultPlayer>,
}

impl ResultTeam {
    pub fn points(&self) -> f64 {
        self.stats.get(Stat::Points)
    }

    /// Sum of a stat over the roster.
    pub fn player_total(&self, stat: Stat) -> f64 {
        self.players.iter().map(|p| p.stats.get(stat)).sum()
    }
}

/// First supplied count that is negative or not finite. The rotation clocks
/// are exempt; they are reset to signed values during a game.
fn first_bad_count(stats: &StatMap) -> Option<Stat> {
    stats
        .iter()
        .filter(|(stat, _)| !matches!(stat, Stat::CourtTime | Stat::BenchTime))
        .find(|(_, value)| !value.is_finite() || *value < 0.0)
        .map(|(stat, _)| stat)
}
