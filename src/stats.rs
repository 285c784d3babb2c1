use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::SimError;

/// Box score and rotation bookkeeping fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Stat {
    Minutes,
    FieldGoalsMade,
    FieldGoalsAttempted,
    ThreePointersMade,
    ThreePointersAttempted,
    FreeThrowsMade,
    FreeThrowsAttempted,
    OffensiveRebounds,
    DefensiveRebounds,
    Assists,
    Turnovers,
    Steals,
    Blocks,
    PersonalFouls,
    Points,
    Starter,
    CourtTime,
    BenchTime,
    Energy,
}

impl Stat {
    pub const ALL: [Stat; 19] = [
        Stat::Minutes,
        Stat::FieldGoalsMade,
        Stat::FieldGoalsAttempted,
        Stat::ThreePointersMade,
        Stat::ThreePointersAttempted,
        Stat::FreeThrowsMade,
        Stat::FreeThrowsAttempted,
        Stat::OffensiveRebounds,
        Stat::DefensiveRebounds,
        Stat::Assists,
        Stat::Turnovers,
        Stat::Steals,
        Stat::Blocks,
        Stat::PersonalFouls,
        Stat::Points,
        Stat::Starter,
        Stat::CourtTime,
        Stat::BenchTime,
        Stat::Energy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Stat::Minutes => "minutes",
            Stat::FieldGoalsMade => "fieldGoalsMade",
            Stat::FieldGoalsAttempted => "fieldGoalsAttempted",
            Stat::ThreePointersMade => "threePointersMade",
            Stat::ThreePointersAttempted => "threePointersAttempted",
            Stat::FreeThrowsMade => "freeThrowsMade",
            Stat::FreeThrowsAttempted => "freeThrowsAttempted",
            Stat::OffensiveRebounds => "offensiveRebounds",
            Stat::DefensiveRebounds => "defensiveRebounds",
            Stat::Assists => "assists",
            Stat::Turnovers => "turnovers",
            Stat::Steals => "steals",
            Stat::Blocks => "blocks",
            Stat::PersonalFouls => "personalFouls",
            Stat::Points => "points",
            Stat::Starter => "starter",
            Stat::CourtTime => "courtTime",
            Stat::BenchTime => "benchTime",
            Stat::Energy => "energy",
        }
    }

    /// Whether a player-level increment is mirrored into the team totals.
    ///
    /// Rotation bookkeeping stays on the player.
    pub fn rolls_up(self) -> bool {
        !matches!(
            self,
            Stat::Starter | Stat::CourtTime | Stat::BenchTime | Stat::Energy
        )
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stat {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stat::ALL
            .iter()
            .copied()
            .find(|stat| stat.as_str() == s)
            .ok_or_else(|| SimError::UnknownStat(s.to_string()))
    }
}

/// Accumulated stat values; absent stats read as zero.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatMap {
    values: BTreeMap<Stat, f64>,
}

impl StatMap {
    pub fn new() -> Self {
        StatMap::default()
    }

    pub fn get(&self, stat: Stat) -> f64 {
        self.values.get(&stat).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, stat: Stat) -> bool {
        self.values.contains_key(&stat)
    }

    pub fn set(&mut self, stat: Stat, value: f64) {
        self.values.insert(stat, value);
    }

    pub fn add(&mut self, stat: Stat, amount: f64) {
        *self.values.entry(stat).or_insert(0.0) += amount;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Stat, f64)> + '_ {
        self.values.iter().map(|(&stat, &value)| (stat, value))
    }
}

impl FromIterator<(Stat, f64)> for StatMap {
    fn from_iter<I: IntoIterator<Item = (Stat, f64)>>(iter: I) -> Self {
        StatMap {
            values: iter.into_iter().collect(),
        }
    }
}
